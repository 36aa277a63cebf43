//! Knowledge file format
//!
//! ```text
//! [what]
//! SIT=Singapore Institute of Technology
//!
//! [who]
//! Frank Guan=a lecturer
//! ```
//!
//! Lines that do not parse are skipped. Only I/O failures and a full store
//! stop a read.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use super::store::{Category, KnowledgeStore, Placement, PutOutcome};
use super::{KbError, ENTRY_SEPARATOR};

/// Parser state while scanning a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    /// Before the first header, or after a header naming no known category
    Outside,
    Inside(Category),
}

/// Write every non-empty category as a `[name]` section.
pub fn write_to<W: Write>(store: &KnowledgeStore, writer: &mut W) -> std::io::Result<()> {
    for category in Category::ALL {
        if store.count(category) == 0 {
            continue;
        }
        writeln!(writer, "[{}]", category.name())?;
        for fact in store.facts(category) {
            writeln!(writer, "{}{}{}", fact.entity, ENTRY_SEPARATOR, fact.answer)?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Render the store as a knowledge document
pub fn to_document(store: &KnowledgeStore) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_to(store, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Read a knowledge document into `store`.
///
/// Returns the number of entity/answer pairs applied (new and overwritten).
/// Facts keep the order they have in the document. Stops with
/// [`KbError::OutOfMemory`] as soon as the store cannot take another fact.
pub fn read_from<R: BufRead>(store: &mut KnowledgeStore, mut reader: R) -> Result<usize, KbError> {
    let mut section = Section::Outside;
    let mut applied = 0;
    let mut buf = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let raw = String::from_utf8_lossy(&buf);
        let line = raw.trim_end_matches(|c: char| c == '\n' || c == '\r');

        if let Some(name) = parse_header(line) {
            section = match Category::from_token(name) {
                Some(category) => Section::Inside(category),
                None => {
                    debug!("line {}: skipping unknown section [{}]", line_no, name);
                    Section::Outside
                }
            };
            continue;
        }

        let Section::Inside(category) = section else {
            continue;
        };
        let Some((entity, answer)) = parse_entry(line) else {
            if !line.trim().is_empty() {
                debug!("line {}: no entity=answer pair, skipped", line_no);
            }
            continue;
        };

        match store.put_at(category.name(), entity, &answer, Placement::Back) {
            PutOutcome::Inserted | PutOutcome::Updated => applied += 1,
            PutOutcome::OutOfMemory => return Err(KbError::OutOfMemory),
            // The section name was resolved above
            PutOutcome::InvalidCategory => {}
        }
    }

    Ok(applied)
}

/// Read a knowledge document held in memory
pub fn read_document(store: &mut KnowledgeStore, document: &str) -> Result<usize, KbError> {
    read_from(store, document.as_bytes())
}

/// Load a knowledge file into `store`, returning the number of pairs read.
pub fn load_file(store: &mut KnowledgeStore, path: impl AsRef<Path>) -> Result<usize, KbError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| KbError::FileNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let count = read_from(store, BufReader::new(file))?;
    info!("Loaded {} responses from {}", count, path.display());
    Ok(count)
}

/// Save `store` to a knowledge file, replacing any existing content.
pub fn save_file(store: &KnowledgeStore, path: impl AsRef<Path>) -> Result<(), KbError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| KbError::CannotCreate {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    write_to(store, &mut writer)?;
    writer.flush()?;
    info!("Saved {} facts to {}", store.len(), path.display());
    Ok(())
}

/// `[name]` -> `name`
fn parse_header(line: &str) -> Option<&str> {
    let line = line.trim();
    line.strip_prefix('[')?.strip_suffix(']').map(str::trim)
}

/// `entity=answer` -> (entity, answer). The answer loses any bracket characters.
fn parse_entry(line: &str) -> Option<(&str, String)> {
    let (entity, answer) = line.split_once(ENTRY_SEPARATOR)?;
    if entity.is_empty() {
        return None;
    }
    let answer = answer.chars().filter(|c| !matches!(c, '[' | ']')).collect();
    Some((entity, answer))
}
