//! kb-chat - a question-answering chatbot library
//!
//! A small knowledge base of what/where/who facts with:
//! - Case-insensitive lookup and insert-or-update
//! - Save/load in a sectioned `.ini` text format
//! - A chatbot front end that asks for answers it does not know
//!
//! # Example
//!
//! ```
//! use kb_chat::knowledge::{GetOutcome, KnowledgeStore, PutOutcome};
//!
//! let mut store = KnowledgeStore::new();
//! assert_eq!(store.put("what", "SIT", "Singapore Institute of Technology"), PutOutcome::Inserted);
//! assert_eq!(
//!     store.get("WHAT", "sit"),
//!     GetOutcome::Found("Singapore Institute of Technology".to_string())
//! );
//! ```

// Core modules
pub mod knowledge;
pub mod agent;
pub mod config;
pub mod cli;

// Re-export commonly used types for convenience
pub use knowledge::{
    Category,
    Fact,
    GetOutcome,
    KbError,
    KnowledgeStore,
    PutOutcome,
};

pub use agent::{
    AnswerSource,
    Chatbot,
    Reply,
    ResponseFormatter,
    ScriptedAnswers,
};

pub use config::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
