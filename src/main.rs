use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use finance_tracker::bot::{FinanceBot, Reply};
use finance_tracker::cli::{
    handle_audit_command, handle_reminder_command, handle_transaction_command, ChatSession,
    ReminderCommands, TransactionCommands,
};
use finance_tracker::config::{paths::DATA_DIR_ENV, FinancePaths, Settings};
use finance_tracker::display::{format_stats, format_tips};
use finance_tracker::models::UserId;
use finance_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "finbot",
    version,
    about = "Conversational personal finance tracker",
    long_about = "Record incomes and expenses by category, see recent statistics, \
                  and keep reminders, through a chat-style prompt or one-shot commands."
)]
struct Cli {
    /// Directory holding config.json, finance_data.json and audit.log
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive conversation
    Chat {
        /// User identifier
        #[arg(short, long, default_value = "local")]
        user: String,
    },

    /// Show statistics for a user
    Stats {
        /// User identifier
        #[arg(short, long)]
        user: String,
    },

    /// Show money-management tips
    Tips,

    /// Transaction commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Reminder commands
    #[command(subcommand)]
    Reminder(ReminderCommands),

    /// Show recently recorded transactions and reminders from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Only show entries of this user
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Write config.json with the current (or default) settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => FinancePaths::with_base_dir(dir),
        None => FinancePaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;

    let storage = Storage::open(paths.clone())?.with_audit(settings.audit_enabled);
    let bot = FinanceBot::new(storage, settings);

    match cli.command {
        Some(Commands::Chat { user }) => {
            info!(%user, "chat started");
            let stdin = io::stdin();
            ChatSession::new(&bot, UserId::from(user)).run(stdin.lock(), io::stdout())?;
        }
        Some(Commands::Stats { user }) => {
            if let Reply::Stats(stats) = bot.request_stats(&UserId::from(user))? {
                print!("{}", format_stats(&stats, &bot.settings().currency_symbol));
            }
        }
        Some(Commands::Tips) => {
            print!("{}", format_tips(&bot.settings().tips));
        }
        Some(Commands::Transaction(cmd)) => handle_transaction_command(&bot, cmd)?,
        Some(Commands::Reminder(cmd)) => handle_reminder_command(&bot, cmd)?,
        Some(Commands::Audit { limit, user }) => handle_audit_command(&bot, limit, user)?,
        Some(Commands::Config) => {
            let settings = bot.settings();
            println!("Finance tracker configuration");
            println!("=============================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data file:      {}", paths.data_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:    {}", settings.currency_symbol);
            println!("  Expense categories: {}", settings.expense_categories.join(", "));
            println!("  Income categories:  {}", settings.income_categories.join(", "));
            println!("  Audit log enabled:  {}", settings.audit_enabled);
            println!("  Known users:        {}", bot.storage().users.count()?);
        }
        Some(Commands::Init) => {
            bot.settings().save(&paths)?;
            println!("Settings written to {}", paths.settings_file().display());
        }
        None => {
            println!("finbot - conversational personal finance tracker");
            println!();
            println!("Run 'finbot --help' for usage information.");
            println!("Run 'finbot chat --user <id>' to start a conversation.");
        }
    }

    bot.shutdown()?;
    Ok(())
}
