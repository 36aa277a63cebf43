//! Knowledge base
//!
//! - `token`: case-insensitive token comparison
//! - `store`: the category-bucketed fact store
//! - `codec`: the sectioned `.ini` text format used for save/load

pub mod token;
pub mod store;
pub mod codec;

use std::path::PathBuf;

pub use codec::{load_file, read_document, read_from, save_file, to_document, write_to};
pub use store::{Category, Fact, GetOutcome, KnowledgeStore, PutOutcome};
pub use token::{ends_with_suffix, tokens_equal};

/// File extension required for knowledge files
pub const KNOWLEDGE_FILE_SUFFIX: &str = ".ini";

/// Separates an entity from its answer on a knowledge file line. Entities
/// cannot contain it.
pub const ENTRY_SEPARATOR: char = '=';

/// Errors raised by knowledge base file operations
#[derive(Debug, thiserror::Error)]
pub enum KbError {
    #[error("unknown question word '{0}'")]
    InvalidCategory(String),

    #[error("out of memory while storing knowledge")]
    OutOfMemory,

    #[error("cannot open knowledge file {}: {source}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot create knowledge file {}: {source}", path.display())]
    CannotCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
