//! Transaction CLI commands

use clap::Subcommand;

use crate::bot::FinanceBot;
use crate::display::format_transaction_recorded;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Amount, TransactionType, UserId};
use crate::services::LedgerService;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record an income or expense in one step
    Add {
        /// User identifier
        #[arg(short, long)]
        user: String,
        /// Transaction type (income or expense)
        #[arg(short = 't', long = "type")]
        kind: TransactionType,
        /// Category name
        #[arg(short, long)]
        category: String,
        /// Amount (e.g., "150" or "99.90")
        amount: String,
    },
    /// List the most recent transactions
    List {
        /// User identifier
        #[arg(short, long)]
        user: String,
        /// Number of transactions to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(bot: &FinanceBot, cmd: TransactionCommands) -> FinanceResult<()> {
    let service = LedgerService::new(bot.storage());
    let symbol = &bot.settings().currency_symbol;

    match cmd {
        TransactionCommands::Add {
            user,
            kind,
            category,
            amount,
        } => {
            let amount = Amount::parse(&amount).map_err(|e| {
                FinanceError::Validation(format!("{}. Use a number like '150' or '99.90'", e))
            })?;

            let txn = service.record_transaction(&UserId::from(user), amount, &category, kind)?;
            print!("{}", format_transaction_recorded(&txn, symbol));
        }
        TransactionCommands::List { user, limit } => {
            let transactions = service.recent_transactions(&UserId::from(user), limit)?;

            if transactions.is_empty() {
                println!("No transactions yet.");
                return Ok(());
            }

            for txn in transactions {
                let sign = match txn.kind {
                    TransactionType::Income => "+",
                    TransactionType::Expense => "-",
                };
                println!(
                    "{}  {}{}  {}",
                    txn.created_at,
                    sign,
                    txn.amount.format_with_symbol(symbol),
                    txn.category
                );
            }
        }
    }

    Ok(())
}
