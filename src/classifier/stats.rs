use std::collections::HashMap;

use crate::classifier::{frequency::WordFrequency, LabelId, WordId};

/// Running counters over every accumulated document.
///
/// Per-label structures are vectors indexed by label ID, sized once at
/// creation. Per-word structures are sparse; an absent entry means 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    /// ラベルごとの単語の出現数 (label -> word -> occurrences)
    pub(crate) label_word_freq: Vec<HashMap<WordId, u64>>,
    /// ラベルごとの単語数, always the row sum of `label_word_freq`
    pub(crate) label_word_total: Vec<u64>,
    /// (document, label) pairs each word appeared in
    pub(crate) word_doc_freq: HashMap<WordId, u64>,
    pub(crate) doc_count: u64,
    pub(crate) label_doc_count: Vec<u64>,
}

impl Statistics {
    pub fn new(label_count: usize) -> Self {
        Self {
            label_word_freq: vec![HashMap::new(); label_count],
            label_word_total: vec![0; label_count],
            word_doc_freq: HashMap::new(),
            doc_count: 0,
            label_doc_count: vec![0; label_count],
        }
    }

    #[inline]
    pub fn label_count(&self) -> usize {
        self.label_doc_count.len()
    }

    /// Fold one document into the counters.
    ///
    /// `labels` must already be validated and free of duplicates.
    /// `word_doc_freq` goes up once per (word, label) pair, so a document with
    /// two labels bumps it twice for each of its words.
    pub(crate) fn accumulate(&mut self, freq: &WordFrequency, labels: &[LabelId]) {
        self.doc_count += 1;

        for (word, count) in freq.iter() {
            for &label in labels {
                *self.word_doc_freq.entry(word).or_insert(0) += 1;
                *self.label_word_freq[label].entry(word).or_insert(0) += count;
                self.label_word_total[label] += count;
            }
        }

        for &label in labels {
            self.label_doc_count[label] += 1;
        }
    }

    #[inline]
    pub fn label_word_freq(&self, label: LabelId, word: WordId) -> u64 {
        self.label_word_freq
            .get(label)
            .and_then(|row| row.get(&word))
            .copied()
            .unwrap_or(0)
    }

    #[inline]
    pub fn label_word_total(&self, label: LabelId) -> u64 {
        self.label_word_total.get(label).copied().unwrap_or(0)
    }

    #[inline]
    pub fn word_doc_freq(&self, word: WordId) -> u64 {
        self.word_doc_freq.get(&word).copied().unwrap_or(0)
    }

    #[inline]
    pub fn label_doc_count(&self, label: LabelId) -> u64 {
        self.label_doc_count.get(label).copied().unwrap_or(0)
    }

    #[inline]
    pub fn doc_count(&self) -> u64 {
        self.doc_count
    }

    /// First label whose cached total differs from the sum of its row.
    /// A row whose sum does not fit in `u64` reports `None` as its sum.
    pub(crate) fn find_total_mismatch(&self) -> Option<(LabelId, Option<u64>, u64)> {
        self.label_word_freq
            .iter()
            .zip(&self.label_word_total)
            .enumerate()
            .find_map(|(label, (row, &total))| {
                let sum = row.values().try_fold(0u64, |acc, &n| acc.checked_add(n));
                (sum != Some(total)).then_some((label, sum, total))
            })
    }
}
