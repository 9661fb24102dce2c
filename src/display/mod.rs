//! Display formatting for the chat front end
//!
//! Turns the core's plain [`Reply`] values into text.

pub mod menu;
pub mod report;

pub use menu::{format_category_menu, format_main_menu, format_reminders_menu, MAIN_MENU};
pub use report::{format_reminders, format_stats, format_tips, format_transaction_recorded};

use crate::bot::Reply;
use crate::config::Settings;

/// Render a reply as the text the user sees; `None` means stay silent
pub fn render_reply(reply: &Reply, settings: &Settings) -> Option<String> {
    let symbol = settings.currency_symbol.as_str();

    let text = match reply {
        Reply::MainMenu => format_main_menu(),
        Reply::ChooseCategory { kind, categories } => format_category_menu(*kind, categories),
        Reply::PromptAmount { category, .. } => format!("Enter the amount for {}:\n", category),
        Reply::InvalidAmount { .. } => "Please enter a number:\n".to_string(),
        Reply::TransactionRecorded(txn) => {
            format!("{}\n{}", format_transaction_recorded(txn, symbol), format_main_menu())
        }
        Reply::PromptReminderText => "Enter the reminder text:\n".to_string(),
        Reply::ReminderAdded(_) => format!("Reminder added.\n\n{}", format_main_menu()),
        Reply::ReminderNotAdded => "Reminder text was empty, nothing added.\n".to_string(),
        Reply::Stats(stats) => format!("{}\n{}", format_stats(stats, symbol), format_main_menu()),
        Reply::Reminders(reminders) => {
            format!("{}\n{}", format_reminders(reminders), format_reminders_menu())
        }
        Reply::Tips(tips) => format!("{}\n{}", format_tips(tips), format_main_menu()),
        Reply::Ignored => return None,
    };

    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;

    #[test]
    fn test_ignored_is_silent() {
        assert_eq!(render_reply(&Reply::Ignored, &Settings::default()), None);
    }

    #[test]
    fn test_prompts() {
        let settings = Settings::default();
        let prompt = Reply::PromptAmount {
            kind: TransactionType::Expense,
            category: "еда".into(),
        };
        assert_eq!(
            render_reply(&prompt, &settings).unwrap(),
            "Enter the amount for еда:\n"
        );

        let retry = Reply::InvalidAmount {
            kind: TransactionType::Expense,
            category: "еда".into(),
        };
        assert!(render_reply(&retry, &settings).unwrap().contains("number"));
    }

    #[test]
    fn test_empty_queries_still_answer() {
        let settings = Settings::default();
        let stats = render_reply(&Reply::Stats(Default::default()), &settings).unwrap();
        assert!(stats.contains("No transactions yet"));

        let reminders = render_reply(&Reply::Reminders(Vec::new()), &settings).unwrap();
        assert!(reminders.contains("No reminders yet"));
        assert!(reminders.contains("/add_reminder"));
    }
}
