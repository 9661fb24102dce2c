//! Audit log CLI command

use crate::bot::FinanceBot;
use crate::error::FinanceResult;
use crate::models::UserId;

/// Print the most recent audit entries, optionally for one user only
pub fn handle_audit_command(
    bot: &FinanceBot,
    limit: usize,
    user: Option<String>,
) -> FinanceResult<()> {
    let Some(logger) = bot.storage().audit() else {
        println!("Audit logging is disabled (set \"audit_enabled\": true in config.json).");
        return Ok(());
    };

    let user = user.map(UserId::from);
    let entries = logger.read_recent(limit, user.as_ref())?;

    if entries.is_empty() {
        println!("No audit entries.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.summary());
    }

    Ok(())
}
