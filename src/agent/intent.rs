//! Intent detection
//!
//! The first word of a line selects the intent. The remaining words are
//! split into the pieces each intent needs.

use crate::knowledge::{ends_with_suffix, tokens_equal, Category, ENTRY_SEPARATOR, KNOWLEDGE_FILE_SUFFIX};

/// What the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Exit,
    Load,
    Question(Category),
    Reset,
    Save,
}

impl Intent {
    /// Words that start a command, used for completion
    pub const KEYWORDS: [&'static str; 8] =
        ["exit", "quit", "load", "save", "reset", "what", "where", "who"];

    pub fn detect(word: &str) -> Option<Self> {
        if tokens_equal(word, "exit") || tokens_equal(word, "quit") {
            Some(Intent::Exit)
        } else if tokens_equal(word, "load") {
            Some(Intent::Load)
        } else if let Some(category) = Category::from_token(word) {
            Some(Intent::Question(category))
        } else if tokens_equal(word, "reset") {
            Some(Intent::Reset)
        } else if tokens_equal(word, "save") {
            Some(Intent::Save)
        } else {
            None
        }
    }
}

/// Split a raw input line into words. Trailing question marks are dropped.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.trim_end().trim_end_matches('?').split_whitespace().collect()
}

/// Shape of a question after the question word
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Question<'a> {
    /// Only the question word was given
    WordOnly(Category),
    /// "what is" with nothing after it
    MissingNoun,
    /// The entity contains `=`, which the knowledge file cannot hold
    ReservedCharacter,
    Ask {
        word: &'a str,
        article: Option<&'a str>,
        entity: String,
    },
}

fn is_article(word: &str) -> bool {
    tokens_equal(word, "is") || tokens_equal(word, "are")
}

/// Parse `words` (question word first) into a [`Question`].
pub fn parse_question<'a>(category: Category, words: &[&'a str]) -> Question<'a> {
    let question = match words {
        [] | [_] => Question::WordOnly(category),
        [_, second] if is_article(second) => Question::MissingNoun,
        [word, second, rest @ ..] if is_article(second) => Question::Ask {
            word: *word,
            article: Some(*second),
            entity: rest.join(" "),
        },
        [word, rest @ ..] => Question::Ask {
            word: *word,
            article: None,
            entity: rest.join(" "),
        },
    };
    match question {
        Question::Ask { ref entity, .. } if entity.contains(ENTRY_SEPARATOR) => {
            Question::ReservedCharacter
        }
        question => question,
    }
}

/// Where a `load` command reads from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileTarget {
    Missing,
    NotKnowledgeFile(String),
    File(String),
}

/// `load [from] <file words...>`: every word after the optional "from" is part
/// of the file name.
pub fn load_target(words: &[&str]) -> FileTarget {
    let rest = match words {
        [_, from, rest @ ..] if tokens_equal(from, "from") => rest,
        [_, rest @ ..] => rest,
        [] => return FileTarget::Missing,
    };
    if rest.is_empty() {
        return FileTarget::Missing;
    }
    let file = rest.join(" ");
    if ends_with_suffix(&file, KNOWLEDGE_FILE_SUFFIX) {
        FileTarget::File(file)
    } else {
        FileTarget::NotKnowledgeFile(file)
    }
}

/// `save [as|to] <file>`: the last word naming a knowledge file wins.
pub fn save_target(words: &[&str]) -> FileTarget {
    if words.len() < 2 {
        return FileTarget::Missing;
    }
    match words
        .iter()
        .rev()
        .find(|word| ends_with_suffix(word, KNOWLEDGE_FILE_SUFFIX))
    {
        Some(file) => FileTarget::File(file.to_string()),
        None => FileTarget::NotKnowledgeFile(words[1..].join(" ")),
    }
}
