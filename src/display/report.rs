//! Statistics, reminder and tips formatting

use crate::models::{Reminder, Transaction};
use crate::services::{Stats, STATS_WINDOW};

/// Format statistics; always produces text, even for a user with no data
pub fn format_stats(stats: &Stats, symbol: &str) -> String {
    if stats.is_empty() {
        return "Statistics\n\nNo transactions yet. Add an income or an expense first.\n"
            .to_string();
    }

    let mut output = format!("Statistics (last {} transactions)\n\n", STATS_WINDOW);
    output.push_str(&format!(
        "  Income:   {}\n",
        stats.income_sum.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Expenses: {}\n",
        stats.expense_sum.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Balance:  {}\n",
        stats.balance.format_with_symbol(symbol)
    ));

    if !stats.category_totals.is_empty() {
        output.push_str("\nExpenses by category (all time):\n");
        let width = stats
            .category_totals
            .keys()
            .map(|c| c.chars().count())
            .max()
            .unwrap_or(0);
        for (category, amount) in &stats.category_totals {
            output.push_str(&format!(
                "  • {:<width$}  {}\n",
                category,
                amount.format_with_symbol(symbol),
                width = width
            ));
        }
    }

    output
}

/// Format the reminder list as `text(date)` lines
pub fn format_reminders(reminders: &[Reminder]) -> String {
    let mut output = String::from("Your reminders:\n\n");

    if reminders.is_empty() {
        output.push_str("No reminders yet.\n");
        return output;
    }

    for reminder in reminders {
        output.push_str(&format!("  • {}({})\n", reminder.text, reminder.created_at));
    }

    output
}

/// Confirmation line for a recorded transaction
pub fn format_transaction_recorded(txn: &Transaction, symbol: &str) -> String {
    format!(
        "{} of {} added to '{}'.\n",
        txn.kind,
        txn.amount.format_with_symbol(symbol),
        txn.category
    )
}

/// Format the tips, one per line
pub fn format_tips(tips: &[String]) -> String {
    if tips.is_empty() {
        return "No tips configured.\n".to_string();
    }
    tips.iter().map(|t| format!("💡 {}\n", t)).collect()
}
