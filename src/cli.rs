//! CLI interface for kb-chat

use clap::{Parser, Subcommand};
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::agent::{AnswerSource, Chatbot};
use crate::config::Config;
use crate::knowledge::{self, Category, KnowledgeStore};

#[derive(Parser)]
#[command(name = "kb-chat")]
#[command(about = "Question-answering chatbot that learns what, where and who facts", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session (default when no command given)
    Chat {
        /// Knowledge file to load before the session starts
        #[arg(short, long)]
        load: Option<PathBuf>,
    },
    /// Ask a single question
    Ask {
        /// Knowledge file to answer from; learned answers are saved back to it
        #[arg(short, long)]
        kb: Option<PathBuf>,
        /// The question, e.g. "what is SIT"
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Print the facts stored in a knowledge file
    Inspect {
        /// Knowledge file to read
        file: PathBuf,
        /// Only print facts for this question word (what, where or who)
        #[arg(short, long)]
        category: Option<Category>,
    },
    /// Configure the chatbot
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
        /// Reset configuration to defaults
        #[arg(long)]
        reset: bool,
        /// Print the default configuration file
        #[arg(long)]
        print_default: bool,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => crate::agent::interactive::run_interactive(None)?,
        Some(Commands::Chat { load }) => crate::agent::interactive::run_interactive(load)?,
        Some(Commands::Ask { kb, question }) => ask_once(kb.as_deref(), &question.join(" "))?,
        Some(Commands::Inspect { file, category }) => inspect(&file, category)?,
        Some(Commands::Config { show, reset, print_default }) => {
            if reset {
                crate::config::reset_config()?;
            } else if print_default {
                print!("{}", crate::config::default_config_toml());
            } else if show {
                crate::config::show_config()?;
            } else {
                println!("Configuration options:");
                println!("  --show             Display current configuration");
                println!("  --reset            Reset configuration to defaults");
                println!("  --print-default    Print the default configuration file");
            }
        }
    }

    Ok(())
}

/// Reads a learned answer from standard input
struct StdinAnswers;

impl AnswerSource for StdinAnswers {
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        println!("{}", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 || line.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

/// Answer one question, learning and saving the answer if it is unknown
fn ask_once(kb: Option<&Path>, question: &str) -> Result<()> {
    let config = Config::load()?;
    let mut store = KnowledgeStore::new();
    if let Some(path) = kb.filter(|path| path.exists()) {
        knowledge::load_file(&mut store, path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
    }

    let mut bot = Chatbot::with_store(store, config.chat.response_capacity);
    let before = knowledge::to_document(bot.store());
    let reply = bot.respond(question, &mut StdinAnswers)?;
    println!("{}", reply.text);

    if let Some(path) = kb {
        if knowledge::to_document(bot.store()) != before {
            tracing::info!("Knowledge changed, saving {}", path.display());
            knowledge::save_file(bot.store(), path)
                .with_context(|| format!("Failed to save {}", path.display()))?;
        }
    }

    Ok(())
}

/// Print the facts in a knowledge file, grouped by category
fn inspect(file: &Path, only: Option<Category>) -> Result<()> {
    let mut store = KnowledgeStore::new();
    let count = knowledge::load_file(&mut store, file)
        .with_context(|| format!("Failed to load {}", file.display()))?;

    println!("{}: {} responses read, {} facts", file.display(), count, store.len());
    for category in Category::ALL {
        if only.is_some_and(|only| only != category) {
            continue;
        }
        let facts = store.count(category);
        if facts == 0 {
            continue;
        }
        println!();
        println!("[{}] ({})", category, facts);
        for fact in store.facts(category) {
            println!("  {} = {}", fact.entity, fact.answer);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_category_filter() {
        let cli = Cli::try_parse_from(["kb-chat", "inspect", "kb.ini", "--category", "WHO"]).unwrap();
        match cli.command {
            Some(Commands::Inspect { file, category }) => {
                assert_eq!(file, PathBuf::from("kb.ini"));
                assert_eq!(category, Some(Category::Who));
            }
            _ => panic!("expected the inspect command"),
        }

        let err = Cli::try_parse_from(["kb-chat", "inspect", "kb.ini", "-c", "why"]).err().unwrap();
        assert!(err.to_string().contains("unknown question word 'why'"));
    }
}
