//! Line-oriented chat front end
//!
//! Reads one message per line, turns it into a bot action, and prints the
//! rendered reply. Slash commands stand in for the buttons of a chat
//! platform; after a category menu is shown, a bare number picks an entry.

use std::io::{BufRead, Write};

use tracing::error;

use crate::bot::{FinanceBot, Reply};
use crate::display::render_reply;
use crate::error::FinanceResult;
use crate::models::{TransactionType, UserId};

/// One parsed line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput {
    Start,
    Back,
    Choose(TransactionType),
    Stats,
    Tips,
    Reminders,
    AddReminder,
    Remind(String),
    Quit,
    Text(String),
}

/// Parse a line into a chat input
///
/// Unknown slash commands fall through as free text, like any other message.
pub fn parse_input(line: &str) -> ChatInput {
    let trimmed = line.trim();
    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (trimmed, ""),
    };

    match command {
        "/start" => ChatInput::Start,
        "/back" | "/menu" => ChatInput::Back,
        "/income" => ChatInput::Choose(TransactionType::Income),
        "/expense" => ChatInput::Choose(TransactionType::Expense),
        "/stats" => ChatInput::Stats,
        "/tips" => ChatInput::Tips,
        "/reminders" => ChatInput::Reminders,
        "/add_reminder" => ChatInput::AddReminder,
        "/remind" => ChatInput::Remind(rest.to_string()),
        "/quit" | "/exit" => ChatInput::Quit,
        _ => ChatInput::Text(line.trim_end_matches(['\r', '\n']).to_string()),
    }
}

/// A conversation between one user and the bot
pub struct ChatSession<'a> {
    bot: &'a FinanceBot,
    user_id: UserId,
    /// The category menu currently on screen, if any
    category_menu: Option<(TransactionType, Vec<String>)>,
}

impl<'a> ChatSession<'a> {
    /// Start a conversation for `user_id`
    pub fn new(bot: &'a FinanceBot, user_id: UserId) -> Self {
        Self {
            bot,
            user_id,
            category_menu: None,
        }
    }

    /// Handle one line and return the bot's reply
    ///
    /// `Ok(None)` means the user asked to quit.
    pub fn handle_line(&mut self, line: &str) -> FinanceResult<Option<Reply>> {
        let input = parse_input(line);
        let menu = self.category_menu.take();
        let user = &self.user_id;

        let reply = match input {
            ChatInput::Quit => return Ok(None),
            ChatInput::Start | ChatInput::Back => self.bot.cancel(user)?,
            ChatInput::Choose(kind) => self.bot.select_transaction_type(user, kind)?,
            ChatInput::Stats => self.bot.request_stats(user)?,
            ChatInput::Tips => self.bot.request_tips(user)?,
            ChatInput::Reminders => self.bot.request_reminders(user)?,
            ChatInput::AddReminder => self.bot.request_add_reminder(user)?,
            ChatInput::Remind(text) if text.is_empty() => {
                // `/remind` without text is silently dropped
                Reply::Ignored
            }
            ChatInput::Remind(text) => self.bot.add_reminder_direct(user, &text)?,
            ChatInput::Text(text) => match menu_choice(&menu, &text) {
                Some((kind, category)) => self.bot.select_category(user, kind, &category)?,
                None => {
                    // Not a menu entry; the menu stays up for the next line
                    self.category_menu = menu;
                    self.bot.submit_free_text(user, &text)?
                }
            },
        };

        if let Reply::ChooseCategory { kind, categories } = &reply {
            self.category_menu = Some((*kind, categories.clone()));
        }

        Ok(Some(reply))
    }

    /// Run the conversation until `/quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> FinanceResult<()> {
        writeln!(output, "{}", crate::display::format_main_menu())?;

        for line in input.lines() {
            let line = line?;
            match self.handle_line(&line) {
                Ok(Some(reply)) => {
                    if let Some(text) = render_reply(&reply, self.bot.settings()) {
                        writeln!(output, "{}", text)?;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    error!(user = %self.user_id, error = %e, "action failed");
                    writeln!(output, "Error: {}\n", e)?;
                }
            }
            output.flush()?;
        }

        Ok(())
    }
}

/// Resolve a typed menu number (or category name) against the menu on screen
fn menu_choice(
    menu: &Option<(TransactionType, Vec<String>)>,
    text: &str,
) -> Option<(TransactionType, String)> {
    let (kind, categories) = menu.as_ref()?;
    let text = text.trim();

    if let Ok(index) = text.parse::<usize>() {
        return categories
            .get(index.checked_sub(1)?)
            .map(|category| (*kind, category.clone()));
    }

    categories
        .iter()
        .find(|c| c.to_lowercase() == text.to_lowercase())
        .map(|category| (*kind, category.clone()))
}
