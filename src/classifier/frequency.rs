use indexmap::IndexMap;

use crate::classifier::WordId;

/// WordFrequency 構造体
/// In-document word occurrence counts, keyed by word ID.
///
/// Iteration follows first-occurrence order, which keeps the posterior sum
/// reproducible for the same document.
///
/// # Examples
/// ```
/// use bayes_bow::WordFrequency;
/// let mut freq = WordFrequency::new();
/// freq.add_word(3).add_word(1).add_word(3);
///
/// assert_eq!(freq.count(3), 2);
/// assert_eq!(freq.distinct(), 2);
/// assert_eq!(freq.total(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordFrequency {
    counts: IndexMap<WordId, u64>,
    total: u64,
}

impl WordFrequency {
    pub fn new() -> Self {
        Self {
            counts: IndexMap::new(),
            total: 0,
        }
    }

    /// 単語を1回分カウントする
    #[inline]
    pub fn add_word(&mut self, word: WordId) -> &mut Self {
        *self.counts.entry(word).or_insert(0) += 1;
        self.total += 1;
        self
    }

    /// Add several occurrences at once.
    #[inline]
    pub fn add_words<I>(&mut self, words: I) -> &mut Self
    where
        I: IntoIterator<Item = WordId>,
    {
        for word in words {
            self.add_word(word);
        }
        self
    }

    /// Occurrences of `word` in this document, 0 if absent.
    #[inline]
    pub fn count(&self, word: WordId) -> u64 {
        self.counts.get(&word).copied().unwrap_or(0)
    }

    /// Number of distinct words.
    #[inline]
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Number of occurrences over all words.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Distinct word IDs with their counts.
    pub fn iter(&self) -> impl Iterator<Item = (WordId, u64)> + '_ {
        self.counts.iter().map(|(&id, &count)| (id, count))
    }

    /// Distinct word IDs.
    pub fn word_ids(&self) -> impl Iterator<Item = WordId> + '_ {
        self.counts.keys().copied()
    }
}

impl FromIterator<WordId> for WordFrequency {
    fn from_iter<T: IntoIterator<Item = WordId>>(iter: T) -> Self {
        let mut freq = WordFrequency::new();
        freq.add_words(iter);
        freq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_order() {
        let freq: WordFrequency = vec![5, 2, 5, 9, 2, 5].into_iter().collect();
        assert_eq!(freq.count(5), 3);
        assert_eq!(freq.count(2), 2);
        assert_eq!(freq.count(7), 0);
        assert_eq!(freq.total(), 6);
        assert_eq!(freq.word_ids().collect::<Vec<_>>(), vec![5, 2, 9]);
    }

    #[test]
    fn empty_frequency() {
        let freq = WordFrequency::new();
        assert!(freq.is_empty());
        assert_eq!(freq.total(), 0);
        assert_eq!(freq.iter().count(), 0);
    }
}
