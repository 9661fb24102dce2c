//! Menu rendering
//!
//! Menus are numbered lists; the chat front end maps a typed number back to
//! the entry it labels.

use crate::models::TransactionType;

/// Entries of the main menu, in display order
pub const MAIN_MENU: &[(&str, &str)] = &[
    ("/income", "Add income"),
    ("/expense", "Add expense"),
    ("/stats", "Statistics"),
    ("/tips", "Tips"),
    ("/reminders", "Reminders"),
];

/// Format the main menu
pub fn format_main_menu() -> String {
    let mut output = String::from("Finance assistant. Manage your money:\n");
    for (command, label) in MAIN_MENU {
        output.push_str(&format!("  {:<12} {}\n", command, label));
    }
    output
}

/// Format a numbered category menu for a transaction type
pub fn format_category_menu(kind: TransactionType, categories: &[String]) -> String {
    let mut output = format!("{}: choose a category\n", kind);

    for (i, category) in categories.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, category));
    }
    output.push_str("  /back        Main menu\n");

    output
}

/// Format the footer shown under the reminder list
pub fn format_reminders_menu() -> String {
    "  /add_reminder Add a reminder\n  /back        Main menu\n".to_string()
}
