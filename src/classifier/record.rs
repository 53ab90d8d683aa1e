use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::classifier::{
    filter::TokenFilter, stats::Statistics, vocab::Vocabulary, Corpus, LabelId, WordId,
};
use crate::error::{BowError, Result};

/// Corpusのシリアライズ用のデータ構造
/// Persisted form of a [`Corpus`].
///
/// Only the forward word table is stored; the reverse index is rebuilt on
/// load. Maps are ordered by ID so the pretty-printed JSON stays diffable.
/// The lowercase field names of older files are accepted as aliases.
/// The token filter is not part of the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusRecord {
    #[serde(default)]
    pub note: String,
    #[serde(alias = "labelnames")]
    pub label_names: Vec<String>,
    #[serde(alias = "labelcount")]
    pub label_count: usize,
    #[serde(default)]
    pub words: Vec<String>,
    #[serde(alias = "wordcount")]
    pub word_count: usize,
    #[serde(alias = "worddoccount", default)]
    pub word_doc_count: BTreeMap<WordId, u64>,
    #[serde(alias = "doccount")]
    pub doc_count: u64,
    #[serde(alias = "lwf", default)]
    pub label_word_freq: BTreeMap<LabelId, BTreeMap<WordId, u64>>,
    #[serde(alias = "labelwordcount", default)]
    pub label_word_total: BTreeMap<LabelId, u64>,
    #[serde(alias = "pl")]
    pub label_prior: Vec<f64>,
    #[serde(alias = "labeldoccount")]
    pub label_doc_count: Vec<u64>,
}

impl From<&Corpus> for CorpusRecord {
    /// The word table is taken from the live vocabulary, so it always
    /// matches the IDs used by the counters.
    fn from(corpus: &Corpus) -> Self {
        let stats = &corpus.stats;
        Self {
            note: corpus.note.clone(),
            label_names: corpus.label_names.clone(),
            label_count: corpus.label_count(),
            words: corpus.vocab.to_table(),
            word_count: corpus.word_count(),
            word_doc_count: stats.word_doc_freq.iter().map(|(&w, &c)| (w, c)).collect(),
            doc_count: stats.doc_count,
            label_word_freq: stats
                .label_word_freq
                .iter()
                .enumerate()
                .map(|(label, row)| (label, row.iter().map(|(&w, &c)| (w, c)).collect()))
                .collect(),
            label_word_total: stats.label_word_total.iter().copied().enumerate().collect(),
            label_prior: corpus.label_prior.clone(),
            label_doc_count: stats.label_doc_count.clone(),
        }
    }
}

impl CorpusRecord {
    /// Check the record and turn it into a usable corpus with the filter
    /// disabled. Nothing is returned unless every check passes.
    pub fn into_corpus(self) -> Result<Corpus> {
        let label_count = self.label_count;
        if label_count == 0 {
            return Err(BowError::NoLabels);
        }
        expect_len("labelNames", self.label_names.len(), label_count)?;
        expect_len("labelPrior", self.label_prior.len(), label_count)?;
        expect_len("labelDocCount", self.label_doc_count.len(), label_count)?;
        expect_len("words", self.words.len(), self.word_count)?;

        let vocab = Vocabulary::rebuild(self.words)?;
        let word_count = vocab.len();

        if let Some(&word) = self.word_doc_count.keys().find(|&&w| w >= word_count) {
            return Err(corrupted(format!(
                "wordDocCount refers to word id {} of {}",
                word, word_count
            )));
        }

        let mut label_word_freq: Vec<HashMap<WordId, u64>> = vec![HashMap::new(); label_count];
        for (label, row) in self.label_word_freq {
            if label >= label_count {
                return Err(corrupted(format!(
                    "labelWordFreq refers to label id {} of {}",
                    label, label_count
                )));
            }
            if let Some(&word) = row.keys().find(|&&w| w >= word_count) {
                return Err(corrupted(format!(
                    "labelWordFreq[{}] refers to word id {} of {}",
                    label, word, word_count
                )));
            }
            label_word_freq[label] = row.into_iter().collect();
        }

        let mut label_word_total = vec![0u64; label_count];
        for (label, total) in self.label_word_total {
            if label >= label_count {
                return Err(corrupted(format!(
                    "labelWordTotal refers to label id {} of {}",
                    label, label_count
                )));
            }
            label_word_total[label] = total;
        }

        // the prior denominator is doc_count + label_count
        if self.doc_count.checked_add(label_count as u64).is_none() {
            return Err(corrupted(format!(
                "docCount {} leaves no room for {} labels",
                self.doc_count, label_count
            )));
        }
        if let Some(label) = self.label_doc_count.iter().position(|&n| n > self.doc_count) {
            return Err(corrupted(format!(
                "labelDocCount[{}] = {} exceeds docCount {}",
                label, self.label_doc_count[label], self.doc_count
            )));
        }

        let stats = Statistics {
            label_word_freq,
            label_word_total,
            word_doc_freq: self.word_doc_count.into_iter().collect(),
            doc_count: self.doc_count,
            label_doc_count: self.label_doc_count,
        };
        match stats.find_total_mismatch() {
            Some((label, Some(sum), total)) => {
                return Err(corrupted(format!(
                    "labelWordTotal[{}] is {} but its words sum to {}",
                    label, total, sum
                )));
            }
            Some((label, None, _)) => {
                return Err(corrupted(format!(
                    "labelWordFreq[{}] sums past the counter range",
                    label
                )));
            }
            None => {}
        }

        Ok(Corpus {
            note: self.note,
            label_names: self.label_names,
            vocab,
            stats,
            label_prior: self.label_prior,
            filter: TokenFilter::disabled(),
        })
    }
}

#[inline]
fn corrupted(msg: String) -> BowError {
    BowError::Corrupted(msg)
}

fn expect_len(field: &str, got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(corrupted(format!(
            "{} has {} entries, expected {}",
            field, got, expected
        )));
    }
    Ok(())
}
