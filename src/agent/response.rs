//! User-facing reply text
//!
//! Every reply is bounded by the configured capacity (in characters) and is
//! cut on a character boundary, so it is always valid text.

use crate::knowledge::{Category, GetOutcome, PutOutcome};

/// Default reply capacity, in characters
pub const DEFAULT_CAPACITY: usize = 256;

/// Example questions shown when a question word arrives on its own
fn example_question(category: Category) -> &'static str {
    match category {
        Category::What => "What is SIT?",
        Category::Where => "Where is SIT?",
        Category::Who => "Who is Frank Guan?",
    }
}

/// Cut `text` to at most `capacity` characters
pub fn truncate(text: &str, capacity: usize) -> String {
    match text.char_indices().nth(capacity) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

/// Builds the chatbot's replies
#[derive(Debug, Clone, Copy)]
pub struct ResponseFormatter {
    capacity: usize,
}

impl Default for ResponseFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ResponseFormatter {
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn bounded(&self, text: impl AsRef<str>) -> String {
        truncate(text.as_ref(), self.capacity)
    }

    /// Reply for a lookup. `None` means the caller has to learn the answer.
    pub fn lookup(&self, outcome: &GetOutcome) -> Option<String> {
        match outcome {
            GetOutcome::Found(answer) => Some(self.bounded(answer)),
            GetOutcome::InvalidCategory => Some(self.bounded("Invalid Intent.")),
            GetOutcome::NotFound => None,
        }
    }

    /// The question put back to the user when no answer is known
    pub fn unknown(&self, question_word: &str, article: Option<&str>, entity: &str) -> String {
        match article {
            Some(article) => self.bounded(format!("I don't know. {} {} {}?", question_word, article, entity)),
            None => self.bounded(format!("I don't know. {} {}?", question_word, entity)),
        }
    }

    /// Reply after trying to store a learned answer
    pub fn learned(&self, outcome: PutOutcome) -> String {
        self.bounded(match outcome {
            PutOutcome::Inserted | PutOutcome::Updated => "Thank you for the response.",
            PutOutcome::InvalidCategory => "Unknown Question, please re-type.",
            PutOutcome::OutOfMemory => "Insufficient memory space. Please clear the knowledge in memory.",
        })
    }

    /// The user declined to supply an answer
    pub fn not_learned(&self) -> String {
        self.bounded("Okay, I will leave that one unanswered.")
    }

    pub fn question_word_only(&self, category: Category) -> String {
        self.bounded(format!(
            "I do not understand the phrase. Please enter a question. e.g. '{}'",
            example_question(category)
        ))
    }

    pub fn missing_noun(&self) -> String {
        self.bounded("Missing Noun. Please re-enter the question.")
    }

    pub fn reserved_character(&self) -> String {
        self.bounded("I cannot remember names containing '='. Please re-enter the question.")
    }

    pub fn not_understood(&self, word: &str) -> String {
        self.bounded(format!("I don't understand \"{}\".", word))
    }

    pub fn goodbye(&self) -> String {
        self.bounded("Goodbye!")
    }

    pub fn reset_done(&self) -> String {
        self.bounded("Chatbot reset.")
    }

    pub fn load_missing_file(&self) -> String {
        self.bounded("There is no file for me to read. Please specify file to load. e.g. 'sample.ini'")
    }

    pub fn save_missing_file(&self) -> String {
        self.bounded("There is no file for me to write to. Please specify file to save to. e.g. 'sample.ini'")
    }

    pub fn not_ini_file(&self) -> String {
        self.bounded("I cannot read the file. Please upload a .ini file. e.g. 'sample.ini'")
    }

    pub fn file_not_found(&self) -> String {
        self.bounded("I cannot find the file. Please upload an existing .ini file.")
    }

    pub fn cannot_create(&self) -> String {
        self.bounded("I am unable to open/create file. Please try again.")
    }

    pub fn read_failed(&self, file: &str) -> String {
        self.bounded(format!("I could not finish reading {}. Please check the file.", file))
    }

    pub fn load_out_of_memory(&self) -> String {
        self.bounded("There is insufficient memory space. Please clear the knowledge in memory.")
    }

    pub fn loaded(&self, count: usize, file: &str) -> String {
        self.bounded(format!("I have read {} responses from {}", count, file))
    }

    pub fn saved(&self, file: &str) -> String {
        self.bounded(format!("My knowledge has been saved to {}", file))
    }
}
