//! Chatbot front end
//!
//! Routes each input line to the knowledge base and formats the reply. When a
//! question has no known answer, the chatbot asks an [`AnswerSource`] and
//! learns whatever comes back.

use std::collections::VecDeque;

use anyhow::Result;
use tracing::{info, warn};

use super::intent::{self, FileTarget, Intent, Question};
use super::response::ResponseFormatter;
use crate::knowledge::{self, Category, KbError, KnowledgeStore};

/// Something that can supply answers the knowledge base does not have yet
pub trait AnswerSource {
    /// Show `prompt` and return the answer. `None` means no answer was given.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Answers from a fixed queue. Records every prompt it was shown.
#[derive(Debug, Default)]
pub struct ScriptedAnswers {
    answers: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedAnswers {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Prompts shown so far
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl AnswerSource for ScriptedAnswers {
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.answers.pop_front())
    }
}

/// The chatbot's reply to one line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// The session should end after this reply
    pub exit: bool,
}

impl Reply {
    fn say(text: String) -> Self {
        Self { text, exit: false }
    }
}

/// Question-answering agent over a [`KnowledgeStore`]
#[derive(Debug, Default)]
pub struct Chatbot {
    store: KnowledgeStore,
    formatter: ResponseFormatter,
}

impl Chatbot {
    /// Create a chatbot with an empty knowledge base
    pub fn new(capacity: usize) -> Self {
        Self::with_store(KnowledgeStore::new(), capacity)
    }

    pub fn with_store(store: KnowledgeStore, capacity: usize) -> Self {
        Self {
            store,
            formatter: ResponseFormatter::new(capacity),
        }
    }

    pub fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut KnowledgeStore {
        &mut self.store
    }

    /// Respond to one line of user input
    pub fn respond(&mut self, line: &str, answers: &mut dyn AnswerSource) -> Result<Reply> {
        let words = intent::tokenize(line);
        let Some(first) = words.first() else {
            return Ok(Reply::say(String::new()));
        };

        let reply = match Intent::detect(first) {
            Some(Intent::Exit) => Reply {
                text: self.formatter.goodbye(),
                exit: true,
            },
            Some(Intent::Load) => Reply::say(self.load(&words)),
            Some(Intent::Question(category)) => Reply::say(self.question(category, &words, answers)?),
            Some(Intent::Reset) => {
                self.store.reset();
                Reply::say(self.formatter.reset_done())
            }
            Some(Intent::Save) => Reply::say(self.save(&words)),
            None => Reply::say(self.formatter.not_understood(first)),
        };
        Ok(reply)
    }

    fn question(
        &mut self,
        category: Category,
        words: &[&str],
        answers: &mut dyn AnswerSource,
    ) -> Result<String> {
        let (word, article, entity) = match intent::parse_question(category, words) {
            Question::WordOnly(category) => return Ok(self.formatter.question_word_only(category)),
            Question::MissingNoun => return Ok(self.formatter.missing_noun()),
            Question::ReservedCharacter => return Ok(self.formatter.reserved_character()),
            Question::Ask { word, article, entity } => (word, article, entity),
        };

        let outcome = self
            .store
            .get_within(word, &entity, self.formatter.capacity());
        if let Some(reply) = self.formatter.lookup(&outcome) {
            return Ok(reply);
        }

        let prompt = self.formatter.unknown(word, article, &entity);
        let answer = answers.ask(&prompt)?.unwrap_or_default();
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(self.formatter.not_learned());
        }

        let outcome = self.store.put(word, &entity, answer);
        if outcome.is_stored() {
            info!("Learned {} '{}'", category, entity);
        }
        Ok(self.formatter.learned(outcome))
    }

    fn load(&mut self, words: &[&str]) -> String {
        let file = match intent::load_target(words) {
            FileTarget::Missing => return self.formatter.load_missing_file(),
            FileTarget::NotKnowledgeFile(_) => return self.formatter.not_ini_file(),
            FileTarget::File(file) => file,
        };

        match knowledge::load_file(&mut self.store, &file) {
            Ok(count) => self.formatter.loaded(count, &file),
            Err(KbError::OutOfMemory) => self.formatter.load_out_of_memory(),
            Err(KbError::FileNotFound { .. }) => self.formatter.file_not_found(),
            Err(e) => {
                warn!("Failed to read {}: {}", file, e);
                self.formatter.read_failed(&file)
            }
        }
    }

    fn save(&self, words: &[&str]) -> String {
        let file = match intent::save_target(words) {
            FileTarget::Missing => return self.formatter.save_missing_file(),
            FileTarget::NotKnowledgeFile(_) => return self.formatter.not_ini_file(),
            FileTarget::File(file) => file,
        };

        match knowledge::save_file(&self.store, &file) {
            Ok(()) => self.formatter.saved(&file),
            Err(e) => {
                warn!("Failed to save {}: {}", file, e);
                self.formatter.cannot_create()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::GetOutcome;

    fn ask(bot: &mut Chatbot, line: &str) -> String {
        let mut answers = ScriptedAnswers::default();
        bot.respond(line, &mut answers).unwrap().text
    }

    #[test]
    fn test_empty_input() {
        let mut bot = Chatbot::default();
        assert_eq!(ask(&mut bot, "   "), "");
    }

    #[test]
    fn test_exit_ends_session() {
        let mut bot = Chatbot::default();
        let mut answers = ScriptedAnswers::default();
        let reply = bot.respond("Quit", &mut answers).unwrap();
        assert!(reply.exit);
        assert_eq!(reply.text, "Goodbye!");
    }

    #[test]
    fn test_unknown_intent() {
        let mut bot = Chatbot::default();
        assert_eq!(ask(&mut bot, "hello there"), "I don't understand \"hello\".");
    }

    #[test]
    fn test_learns_unknown_answer() {
        let mut bot = Chatbot::default();
        let mut answers = ScriptedAnswers::new(["Singapore Institute of Technology"]);

        let reply = bot.respond("What is SIT?", &mut answers).unwrap();
        assert_eq!(reply.text, "Thank you for the response.");
        assert_eq!(answers.prompts(), ["I don't know. What is SIT?"]);

        let reply = bot.respond("what is sit", &mut answers).unwrap();
        assert_eq!(reply.text, "Singapore Institute of Technology");
        assert_eq!(answers.prompts().len(), 1);
    }

    #[test]
    fn test_question_without_article() {
        let mut bot = Chatbot::default();
        let mut answers = ScriptedAnswers::new(["a lecturer"]);
        bot.respond("who Frank Guan", &mut answers).unwrap();
        assert_eq!(answers.prompts(), ["I don't know. who Frank Guan?"]);
        assert_eq!(
            bot.store().get("who", "frank guan"),
            GetOutcome::Found("a lecturer".to_string())
        );
    }

    #[test]
    fn test_no_answer_given() {
        let mut bot = Chatbot::default();
        assert_eq!(ask(&mut bot, "where is SIT"), "Okay, I will leave that one unanswered.");
        assert!(bot.store().is_empty());
    }

    #[test]
    fn test_blank_answer_not_learned() {
        let mut bot = Chatbot::default();
        let mut answers = ScriptedAnswers::new(["   "]);
        let reply = bot.respond("what is SIT", &mut answers).unwrap();
        assert_eq!(reply.text, "Okay, I will leave that one unanswered.");
        assert_eq!(answers.prompts(), ["I don't know. what is SIT?"]);
        assert!(bot.store().is_empty());
    }

    #[test]
    fn test_entity_with_separator_not_asked() {
        let mut bot = Chatbot::default();
        let mut answers = ScriptedAnswers::new(["two"]);
        let reply = bot.respond("what is 1+1=2", &mut answers).unwrap();
        assert_eq!(reply.text, "I cannot remember names containing '='. Please re-enter the question.");
        assert!(answers.prompts().is_empty());
        assert!(bot.store().is_empty());
    }

    #[test]
    fn test_learning_into_full_store() {
        let mut bot = Chatbot::with_store(KnowledgeStore::with_fact_limit(0), 256);
        let mut answers = ScriptedAnswers::new(["Dover"]);
        let reply = bot.respond("where is SIT", &mut answers).unwrap();
        assert_eq!(reply.text, "Insufficient memory space. Please clear the knowledge in memory.");
        assert!(bot.store().is_empty());
    }

    #[test]
    fn test_malformed_questions() {
        let mut bot = Chatbot::default();
        assert_eq!(
            ask(&mut bot, "who"),
            "I do not understand the phrase. Please enter a question. e.g. 'Who is Frank Guan?'"
        );
        assert_eq!(ask(&mut bot, "what is"), "Missing Noun. Please re-enter the question.");
    }

    #[test]
    fn test_reset() {
        let mut bot = Chatbot::default();
        bot.store_mut().put("what", "SIT", "a university");
        assert_eq!(ask(&mut bot, "RESET"), "Chatbot reset.");
        assert!(bot.store().is_empty());
    }

    #[test]
    fn test_file_commands_without_file() {
        let mut bot = Chatbot::default();
        assert!(ask(&mut bot, "load").starts_with("There is no file for me to read."));
        assert!(ask(&mut bot, "save").starts_with("There is no file for me to write to."));
        assert!(ask(&mut bot, "load notes.txt").starts_with("I cannot read the file."));
        assert!(ask(&mut bot, "save as notes.txt").starts_with("I cannot read the file."));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.ini");
        let mut bot = Chatbot::default();
        assert_eq!(
            ask(&mut bot, &format!("load from {}", path.display())),
            "I cannot find the file. Please upload an existing .ini file."
        );
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kb.ini");
        let path = path.display().to_string();

        let mut bot = Chatbot::default();
        bot.store_mut().put("where", "SIT", "Punggol");
        assert_eq!(ask(&mut bot, &format!("save as {}", path)), format!("My knowledge has been saved to {}", path));

        let mut fresh = Chatbot::default();
        assert_eq!(ask(&mut fresh, &format!("load {}", path)), format!("I have read 1 responses from {}", path));
        assert_eq!(ask(&mut fresh, "Where is sit?"), "Punggol");
    }

    #[test]
    fn test_load_into_full_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.ini");
        std::fs::write(&path, "[what]\nSIT=a university\nNUS=another university\nNTU=a third\n").unwrap();

        let mut bot = Chatbot::with_store(KnowledgeStore::with_fact_limit(1), 256);
        assert_eq!(
            ask(&mut bot, &format!("load {}", path.display())),
            "There is insufficient memory space. Please clear the knowledge in memory."
        );
        assert_eq!(bot.store().len(), 1);
    }

    #[test]
    fn test_save_to_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("kb.ini");
        let mut bot = Chatbot::default();
        assert_eq!(
            ask(&mut bot, &format!("save {}", path.display())),
            "I am unable to open/create file. Please try again."
        );
    }
}
