//! In-memory knowledge store
//!
//! Facts are bucketed by question category. Each bucket is an ordered
//! sequence; facts learned through [`KnowledgeStore::put`] go to the front so
//! the most recently learned answer is listed first when the store is saved.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use super::token::tokens_equal;
use super::KbError;

/// Question categories understood by the knowledge base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    What,
    Where,
    Who,
}

impl Category {
    /// All categories in serialization order
    pub const ALL: [Category; 3] = [Category::What, Category::Where, Category::Who];

    /// Lower-case name, as used in section headers
    pub fn name(&self) -> &'static str {
        match self {
            Category::What => "what",
            Category::Where => "where",
            Category::Who => "who",
        }
    }

    /// Resolve a question word (case-insensitive). Returns None for anything
    /// outside the fixed set.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| tokens_equal(token, category.name()))
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Category {
    type Err = KbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| KbError::InvalidCategory(s.to_string()))
    }
}

/// A stored (category, entity) -> answer association
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fact {
    pub category: Category,
    pub entity: String,
    pub answer: String,
}

/// Result of a lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GetOutcome {
    Found(String),
    NotFound,
    InvalidCategory,
}

/// Result of an insert-or-update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    Inserted,
    Updated,
    InvalidCategory,
    /// The category bucket could not grow. The store is unchanged.
    OutOfMemory,
}

impl PutOutcome {
    /// True for `Inserted` and `Updated`
    pub fn is_stored(&self) -> bool {
        matches!(self, PutOutcome::Inserted | PutOutcome::Updated)
    }
}

/// Where a newly created fact lands inside its category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Placement {
    Front,
    Back,
}

/// Category-bucketed knowledge base
#[derive(Debug, Default, Clone)]
pub struct KnowledgeStore {
    buckets: [VecDeque<Fact>; 3],
    /// Most facts the store will hold. None leaves growth to the allocator.
    fact_limit: Option<usize>,
}

impl KnowledgeStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty store that reports `OutOfMemory` once it holds `limit` facts
    pub(crate) fn with_fact_limit(limit: usize) -> Self {
        Self {
            fact_limit: Some(limit),
            ..Self::default()
        }
    }

    /// Look up the answer for `entity` under the question word `category`.
    pub fn get(&self, category: &str, entity: &str) -> GetOutcome {
        self.get_within(category, entity, usize::MAX)
    }

    /// Like [`get`](Self::get), but only answers of at most `max_len`
    /// characters qualify. A stored answer that does not fit is passed over,
    /// it is never truncated.
    pub fn get_within(&self, category: &str, entity: &str, max_len: usize) -> GetOutcome {
        let Some(category) = Category::from_token(category) else {
            return GetOutcome::InvalidCategory;
        };

        self.buckets[category.index()]
            .iter()
            .filter(|fact| tokens_equal(&fact.entity, entity))
            .find(|fact| fact.answer.chars().count() <= max_len)
            .map(|fact| GetOutcome::Found(fact.answer.clone()))
            .unwrap_or(GetOutcome::NotFound)
    }

    /// Insert a new fact, or overwrite the answer of an existing one.
    ///
    /// New facts are placed at the front of their category.
    pub fn put(&mut self, category: &str, entity: &str, answer: &str) -> PutOutcome {
        self.put_at(category, entity, answer, Placement::Front)
    }

    pub(crate) fn put_at(
        &mut self,
        category: &str,
        entity: &str,
        answer: &str,
        placement: Placement,
    ) -> PutOutcome {
        let Some(category) = Category::from_token(category) else {
            debug!("Rejected fact for unknown category '{}'", category);
            return PutOutcome::InvalidCategory;
        };

        let full = self.fact_limit.is_some_and(|limit| self.len() >= limit);
        let bucket = &mut self.buckets[category.index()];

        if let Some(existing) = bucket
            .iter_mut()
            .find(|fact| tokens_equal(&fact.entity, entity))
        {
            existing.answer.clear();
            existing.answer.push_str(answer);
            debug!("Updated {} '{}'", category, existing.entity);
            return PutOutcome::Updated;
        }

        if full {
            warn!("Fact limit reached, cannot add {} '{}'", category, entity);
            return PutOutcome::OutOfMemory;
        }
        if let Err(e) = bucket.try_reserve(1) {
            warn!("Cannot grow '{}' facts: {}", category, e);
            return PutOutcome::OutOfMemory;
        }

        let fact = Fact {
            category,
            entity: entity.to_string(),
            answer: answer.to_string(),
        };
        match placement {
            Placement::Front => bucket.push_front(fact),
            Placement::Back => bucket.push_back(fact),
        }
        debug!("Inserted {} '{}'", category, entity);
        PutOutcome::Inserted
    }

    /// Forget everything
    pub fn reset(&mut self) {
        let dropped = self.len();
        for bucket in &mut self.buckets {
            bucket.clear();
            bucket.shrink_to_fit();
        }
        debug!("Knowledge store reset ({} facts dropped)", dropped);
    }

    /// Facts of one category, in stored order
    pub fn facts(&self, category: Category) -> impl Iterator<Item = &Fact> {
        self.buckets[category.index()].iter()
    }

    /// All facts, category by category
    pub fn iter(&self) -> impl Iterator<Item = &Fact> {
        self.buckets.iter().flat_map(|bucket| bucket.iter())
    }

    /// Number of facts in a category
    pub fn count(&self, category: Category) -> usize {
        self.buckets[category.index()].len()
    }

    /// Total number of facts
    pub fn len(&self) -> usize {
        self.buckets.iter().map(VecDeque::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(VecDeque::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_token() {
        assert_eq!(Category::from_token("WHAT"), Some(Category::What));
        assert_eq!(Category::from_token("Where"), Some(Category::Where));
        assert_eq!(Category::from_token("who"), Some(Category::Who));
        assert_eq!(Category::from_token("why"), None);
        assert_eq!(Category::from_token("what "), None);
        assert!("when".parse::<Category>().is_err());
    }

    #[test]
    fn test_put_then_get() {
        let mut store = KnowledgeStore::new();
        assert_eq!(
            store.put("what", "SIT", "Singapore Institute of Technology"),
            PutOutcome::Inserted
        );
        assert_eq!(
            store.get("what", "sit"),
            GetOutcome::Found("Singapore Institute of Technology".to_string())
        );
        assert_eq!(store.get("WHAT", "Sit"), store.get("what", "SIT"));
        assert_eq!(store.get("who", "SIT"), GetOutcome::NotFound);
        assert_eq!(store.get("why", "SIT"), GetOutcome::InvalidCategory);
    }

    #[test]
    fn test_put_overwrites_existing_entity() {
        let mut store = KnowledgeStore::new();
        store.put("where", "SIT", "Dover");
        assert_eq!(store.put("where", "sit", "Punggol"), PutOutcome::Updated);

        assert_eq!(store.count(Category::Where), 1);
        assert_eq!(store.get("where", "SIT"), GetOutcome::Found("Punggol".to_string()));
        // The original spelling of the entity is kept
        let fact = store.facts(Category::Where).next().unwrap();
        assert_eq!(fact.entity, "SIT");
    }

    #[test]
    fn test_invalid_category_never_stored() {
        let mut store = KnowledgeStore::new();
        assert_eq!(store.put("why", "SIT", "because"), PutOutcome::InvalidCategory);
        assert!(store.is_empty());
    }

    #[test]
    fn test_new_facts_listed_first() {
        let mut store = KnowledgeStore::new();
        store.put("who", "Alice", "a");
        store.put("who", "Bob", "b");
        store.put("who", "Carol", "c");
        store.put("who", "alice", "a2");

        let entities: Vec<_> = store.facts(Category::Who).map(|f| f.entity.as_str()).collect();
        assert_eq!(entities, vec!["Carol", "Bob", "Alice"]);
    }

    #[test]
    fn test_back_placement_appends() {
        let mut store = KnowledgeStore::new();
        store.put_at("what", "one", "1", Placement::Back);
        store.put_at("what", "two", "2", Placement::Back);
        let entities: Vec<_> = store.facts(Category::What).map(|f| f.entity.as_str()).collect();
        assert_eq!(entities, vec!["one", "two"]);
    }

    #[test]
    fn test_get_within_skips_answers_that_do_not_fit() {
        let mut store = KnowledgeStore::new();
        store.put("what", "SIT", "Singapore Institute of Technology");

        assert_eq!(store.get_within("what", "SIT", 5), GetOutcome::NotFound);
        assert_eq!(
            store.get_within("what", "SIT", 33),
            GetOutcome::Found("Singapore Institute of Technology".to_string())
        );
        assert_eq!(store.get_within("why", "SIT", 0), GetOutcome::InvalidCategory);
    }

    #[test]
    fn test_put_past_limit_is_out_of_memory() {
        let mut store = KnowledgeStore::with_fact_limit(2);
        assert_eq!(store.put("what", "SIT", "a university"), PutOutcome::Inserted);
        assert_eq!(store.put("who", "Frank Guan", "a lecturer"), PutOutcome::Inserted);

        assert_eq!(store.put("where", "SIT", "Dover"), PutOutcome::OutOfMemory);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("where", "SIT"), GetOutcome::NotFound);

        // Updating a known entity needs no room
        assert_eq!(store.put("what", "sit", "a school"), PutOutcome::Updated);
        assert_eq!(store.get("what", "SIT"), GetOutcome::Found("a school".to_string()));

        store.reset();
        assert_eq!(store.put("where", "SIT", "Dover"), PutOutcome::Inserted);
    }

    #[test]
    fn test_reset_forgets_everything() {
        let mut store = KnowledgeStore::new();
        store.put("what", "SIT", "a university");
        store.put("who", "Frank Guan", "a lecturer");
        assert_eq!(store.len(), 2);

        store.reset();
        assert!(store.is_empty());
        assert_eq!(store.get("what", "SIT"), GetOutcome::NotFound);
        assert_eq!(store.get("who", "Frank Guan"), GetOutcome::NotFound);
    }

    #[test]
    fn test_iter_follows_category_order() {
        let mut store = KnowledgeStore::new();
        store.put("who", "Frank Guan", "a lecturer");
        store.put("what", "SIT", "a university");
        store.put("where", "SIT", "Dover");

        let categories: Vec<_> = store.iter().map(|f| f.category).collect();
        assert_eq!(categories, vec![Category::What, Category::Where, Category::Who]);
    }
}
