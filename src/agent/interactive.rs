//! Interactive chat session
//!
//! A line-editing loop around [`Chatbot`]. Unknown answers are asked for on
//! the same editor, so history and Ctrl-C/Ctrl-D behave the same everywhere.

use anyhow::Result;
use std::io;
use std::path::{Path, PathBuf};
use crossterm::{execute, style::{Color, Print, ResetColor, SetForegroundColor}};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::hint::Hinter;
use rustyline::highlight::Highlighter;
use rustyline::history::DefaultHistory;
use rustyline::validate::{Validator, ValidationResult, ValidationContext};
use rustyline::{Editor, Helper};

use super::chatbot::{AnswerSource, Chatbot};
use super::intent::Intent;
use crate::config::{ChatConfig, Config};
use crate::knowledge;

/// Completion and hints for command words
struct ChatHelper {
    keywords: &'static [&'static str],
}

impl ChatHelper {
    fn new() -> Self {
        Self { keywords: &Intent::KEYWORDS }
    }

    fn matches<'a>(&'a self, partial: &'a str) -> impl Iterator<Item = &'static str> + 'a {
        let lower = partial.to_lowercase();
        self.keywords
            .iter()
            .copied()
            .filter(move |k| k.starts_with(&lower) && k.len() > lower.len())
    }
}

impl Completer for ChatHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let partial = &line[..pos];

        // Only the first word is a command
        if partial.is_empty() || partial.contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }

        let matches = self
            .matches(partial)
            .map(|k| Pair {
                display: k.to_string(),
                replacement: k[partial.len()..].to_string(),
            })
            .collect();
        Ok((pos, matches))
    }
}

impl Hinter for ChatHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<Self::Hint> {
        if line.is_empty() || pos < line.len() || line.contains(char::is_whitespace) {
            return None;
        }
        self.matches(line).next().map(|k| k[line.len()..].to_string())
    }
}

impl Validator for ChatHelper {
    fn validate(&self, _ctx: &mut ValidationContext<'_>) -> rustyline::Result<ValidationResult> {
        Ok(ValidationResult::Valid(None))
    }
}

impl Highlighter for ChatHelper {}

impl Helper for ChatHelper {}

type ChatEditor = Editor<ChatHelper, DefaultHistory>;

/// Asks the person at the keyboard
struct EditorAnswers<'a> {
    editor: &'a mut ChatEditor,
    chat: &'a ChatConfig,
}

impl AnswerSource for EditorAnswers<'_> {
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        print_reply(&self.chat.bot_name, prompt);
        match self.editor.readline(&user_prompt(&self.chat.user_name)) {
            Ok(line) if line.trim().is_empty() => Ok(None),
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

fn print_colored(text: &str, color: Color) {
    let _ = execute!(
        io::stdout(),
        SetForegroundColor(color),
        Print(text),
        ResetColor
    );
}

/// Print a chatbot reply
fn print_reply(bot_name: &str, text: &str) {
    print_colored(&format!("{}: ", bot_name), Color::Cyan);
    println!("{}", text);
}

/// Print an error message
fn print_error(text: &str) {
    print_colored(text, Color::Red);
    println!();
}

fn user_prompt(user_name: &str) -> String {
    format!("\x1b[32m{}:\x1b[0m ", user_name)
}

fn print_banner(chat: &ChatConfig) {
    println!();
    println!("  \x1b[1m{} v{}\x1b[0m", chat.bot_name, crate::VERSION);
    println!();
    println!("  \x1b[90mAsk me what, where or who questions.\x1b[0m");
    println!("  \x1b[90mload <file.ini>, save <file.ini>, reset, exit\x1b[0m");
    println!();
}

fn history_path() -> Option<PathBuf> {
    crate::config::data_dir().ok().map(|dir| dir.join("history.txt"))
}

/// Load the knowledge file a session starts with
fn load_startup_file(bot: &mut Chatbot, chat: &ChatConfig, path: &Path) {
    match knowledge::load_file(bot.store_mut(), path) {
        Ok(count) => print_reply(
            &chat.bot_name,
            &format!("I have read {} responses from {}", count, path.display()),
        ),
        Err(e) => print_error(&format!("✗ {}", e)),
    }
}

/// Run an interactive session. `load` overrides the configured startup file.
pub fn run_interactive(load: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let chat = config.chat;
    let mut bot = Chatbot::new(chat.response_capacity);

    print_banner(&chat);

    if let Some(path) = load.or_else(|| chat.startup_file.clone()) {
        load_startup_file(&mut bot, &chat, &path);
    }

    let editor_config = rustyline::Config::builder()
        .completion_type(rustyline::CompletionType::List)
        .edit_mode(rustyline::EditMode::Emacs)
        .auto_add_history(true)
        .build();

    let mut rl = ChatEditor::with_config(editor_config)?;
    rl.set_helper(Some(ChatHelper::new()));

    let history = if chat.history { history_path() } else { None };
    if let Some(path) = &history {
        if rl.load_history(path).is_err() {
            tracing::debug!("No history at {}", path.display());
        }
    }

    loop {
        let readline = rl.readline(&user_prompt(&chat.user_name));

        match readline {
            Ok(line) => {
                let mut answers = EditorAnswers { editor: &mut rl, chat: &chat };
                match bot.respond(&line, &mut answers) {
                    Ok(reply) => {
                        if !reply.text.is_empty() {
                            print_reply(&chat.bot_name, &reply.text);
                        }
                        if reply.exit {
                            break;
                        }
                    }
                    Err(e) => print_error(&format!("✗ Error: {}", e)),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                print_reply(&chat.bot_name, "Goodbye!");
                break;
            }
            Err(err) => {
                print_error(&format!("Error: {}", err));
                break;
            }
        }
    }

    if let Some(path) = &history {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = rl.save_history(path) {
            tracing::warn!("Failed to save history: {}", e);
        }
    }

    Ok(())
}
