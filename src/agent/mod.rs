//! Chatbot front end
//!
//! - `intent`: first-word intent detection and argument splitting
//! - `response`: bounded reply text
//! - `chatbot`: dispatch from input lines to the knowledge base
//! - `interactive`: the line-editing chat session

pub mod intent;
pub mod response;
pub mod chatbot;
pub mod interactive;

pub use chatbot::{AnswerSource, Chatbot, Reply, ScriptedAnswers};
pub use response::ResponseFormatter;
