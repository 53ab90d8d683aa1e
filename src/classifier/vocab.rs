use indexmap::IndexSet;

use crate::classifier::WordId;
use crate::error::{BowError, Result};

/// 単語帳
/// Bidirectional word <-> word ID table.
///
/// IDs are dense and handed out in first-seen order. The set position of a
/// word is its ID, so the forward table (ID -> word) and the reverse index
/// (word -> ID) can never drift apart.
/// Words are never removed.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: IndexSet<String>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self {
            words: IndexSet::new(),
        }
    }

    /// Rebuild the index from a forward table (ID -> word).
    /// A repeated word would make two IDs share one entry, so it is rejected.
    pub fn rebuild<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let iter = words.into_iter();
        let mut set = IndexSet::with_capacity(iter.size_hint().0);
        for (id, word) in iter.enumerate() {
            let word: String = word.into();
            if let Some(first) = set.get_index_of(word.as_str()) {
                return Err(BowError::Corrupted(format!(
                    "word {:?} is listed at both id {} and id {}",
                    word, first, id
                )));
            }
            set.insert(word);
        }
        Ok(Self { words: set })
    }

    /// Return the ID of `word`, assigning the next sequential ID if it is new.
    #[inline]
    pub fn resolve(&mut self, word: &str) -> WordId {
        if let Some(id) = self.words.get_index_of(word) {
            return id;
        }
        let (id, _) = self.words.insert_full(word.to_string());
        log::trace!("vocabulary grew: {:?} -> {}", word, id);
        id
    }

    /// Look up a word without growing the table.
    #[inline]
    pub fn get(&self, word: &str) -> Option<WordId> {
        self.words.get_index_of(word)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Forward table in ID order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Owned copy of the forward table, as persisted.
    pub fn to_table(&self) -> Vec<String> {
        self.words.iter().cloned().collect()
    }
}
