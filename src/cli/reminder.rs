//! Reminder CLI commands

use clap::Subcommand;

use crate::bot::{FinanceBot, Reply};
use crate::display::format_reminders;
use crate::error::FinanceResult;
use crate::models::UserId;

/// Reminder subcommands
#[derive(Subcommand)]
pub enum ReminderCommands {
    /// List reminders
    List {
        /// User identifier
        #[arg(short, long)]
        user: String,
    },
    /// Add a reminder
    Add {
        /// User identifier
        #[arg(short, long)]
        user: String,
        /// Reminder text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

/// Handle a reminder command
pub fn handle_reminder_command(bot: &FinanceBot, cmd: ReminderCommands) -> FinanceResult<()> {
    match cmd {
        ReminderCommands::List { user } => {
            if let Reply::Reminders(reminders) = bot.request_reminders(&UserId::from(user))? {
                print!("{}", format_reminders(&reminders));
            }
        }
        ReminderCommands::Add { user, text } => {
            match bot.add_reminder_direct(&UserId::from(user), &text.join(" "))? {
                Reply::ReminderAdded(reminder) => {
                    println!("Reminder added: {}({})", reminder.text, reminder.created_at)
                }
                _ => println!("Reminder text was empty, nothing added."),
            }
        }
    }

    Ok(())
}
