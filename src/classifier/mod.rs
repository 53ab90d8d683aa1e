pub mod estimate;
pub mod filter;
pub mod frequency;
pub mod record;
pub mod stats;
pub mod vocab;

use crate::classifier::{
    filter::TokenFilter, frequency::WordFrequency, stats::Statistics, vocab::Vocabulary,
};
use crate::error::{BowError, Result};

/// Dense label index in `[0, label_count)`.
pub type LabelId = usize;
/// Dense word index, assigned in first-seen order.
pub type WordId = usize;

/// 文書群データ
/// Bag-of-words corpus with a Naive Bayes estimator on top.
///
/// Holds:
/// - the fixed label set
/// - the vocabulary (grows, never shrinks)
/// - the running statistics
/// - a cache of label priors, refreshed before every posterior
/// - the token filter used by both training and prediction
#[derive(Debug, Clone)]
pub struct Corpus {
    pub(crate) note: String,
    pub(crate) label_names: Vec<String>,
    pub(crate) vocab: Vocabulary,
    pub(crate) stats: Statistics,
    pub(crate) label_prior: Vec<f64>,
    pub(crate) filter: TokenFilter,
}

/// Result of [`Corpus::predict`].
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// arg-max label, lowest ID on ties
    pub label: LabelId,
    /// posterior probability of every label, indexed by label ID
    pub posterior: Vec<f64>,
}

impl Prediction {
    /// Display name of the chosen label.
    pub fn label_name<'a>(&self, corpus: &'a Corpus) -> Option<&'a str> {
        corpus.label_name(self.label)
    }

    /// Posterior probability of the chosen label.
    pub fn confidence(&self) -> f64 {
        self.posterior.get(self.label).copied().unwrap_or(0.0)
    }
}

impl Corpus {
    /// Create an empty corpus over a fixed label set.
    /// Priors start out uniform.
    pub fn new<S, I>(note: impl Into<String>, label_names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let label_names: Vec<String> = label_names.into_iter().map(Into::into).collect();
        let label_count = label_names.len();
        if label_count == 0 {
            return Err(BowError::NoLabels);
        }
        Ok(Self {
            note: note.into(),
            label_prior: vec![1.0 / label_count as f64; label_count],
            stats: Statistics::new(label_count),
            vocab: Vocabulary::new(),
            label_names,
            filter: TokenFilter::disabled(),
        })
    }

    /// Replace the token filter.
    pub fn with_filter(mut self, filter: TokenFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn set_filter(&mut self, filter: TokenFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> &TokenFilter {
        &self.filter
    }

    /// Add a document tagged with one or more labels.
    ///
    /// Labels are checked before anything is touched, so a rejected call
    /// leaves both the vocabulary and the counters unchanged.
    /// Repeated label IDs count once.
    pub fn add_document<T>(&mut self, words: &[T], labels: &[LabelId]) -> Result<()>
    where
        T: AsRef<str>,
    {
        let labels = self.validate_labels(labels)?;
        let vocab_before = self.vocab.len();
        let freq = self.tally(words);
        self.stats.accumulate(&freq, &labels);
        log::debug!(
            "added document #{}: {} tokens, {} distinct, {} new words, labels {:?}",
            self.stats.doc_count,
            freq.total(),
            freq.distinct(),
            self.vocab.len() - vocab_before,
            labels
        );
        Ok(())
    }

    /// Estimate the label of a document.
    ///
    /// Not read-only: unseen words are added to the vocabulary exactly as in
    /// [`Corpus::add_document`], which also widens the smoothing denominator
    /// for later predictions. Label statistics are never changed.
    pub fn predict<T>(&mut self, words: &[T]) -> Result<Prediction>
    where
        T: AsRef<str>,
    {
        let freq = self.tally(words);
        let posterior = self.posterior(&freq)?;
        Ok(Prediction {
            label: arg_max(&posterior),
            posterior,
        })
    }

    /// Like [`Corpus::predict`], but normalises with [`Corpus::posterior_stable`].
    pub fn predict_stable<T>(&mut self, words: &[T]) -> Result<Prediction>
    where
        T: AsRef<str>,
    {
        let freq = self.tally(words);
        let posterior = self.posterior_stable(&freq)?;
        Ok(Prediction {
            label: arg_max(&posterior),
            posterior,
        })
    }

    /// Filter tokens, resolve them to word IDs (growing the vocabulary) and
    /// count them. Shared by training and prediction.
    pub fn tally<T>(&mut self, words: &[T]) -> WordFrequency
    where
        T: AsRef<str>,
    {
        let mut freq = WordFrequency::new();
        for word in words {
            let word = word.as_ref();
            if !self.filter.accepts(word) {
                continue;
            }
            freq.add_word(self.vocab.resolve(word));
        }
        freq
    }

    fn validate_labels(&self, labels: &[LabelId]) -> Result<Vec<LabelId>> {
        if labels.is_empty() {
            return Err(BowError::EmptyLabelSet);
        }
        let label_count = self.label_count();
        let mut unique = Vec::with_capacity(labels.len());
        for &label in labels {
            if label >= label_count {
                return Err(BowError::InvalidLabel { label, label_count });
            }
            if !unique.contains(&label) {
                unique.push(label);
            }
        }
        Ok(unique)
    }
}

/// Accessors
impl Corpus {
    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    pub fn label_names(&self) -> &[String] {
        &self.label_names
    }

    pub fn label_name(&self, label: LabelId) -> Option<&str> {
        self.label_names.get(label).map(String::as_str)
    }

    /// First label with the given display name.
    pub fn label_id(&self, name: &str) -> Option<LabelId> {
        self.label_names.iter().position(|n| n == name)
    }

    #[inline]
    pub fn label_count(&self) -> usize {
        self.stats.label_count()
    }

    #[inline]
    pub fn word_count(&self) -> usize {
        self.vocab.len()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Forward word table in ID order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.vocab.iter()
    }

    pub fn word_id(&self, word: &str) -> Option<WordId> {
        self.vocab.get(word)
    }

    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    #[inline]
    pub fn doc_count(&self) -> u64 {
        self.stats.doc_count()
    }

    #[inline]
    pub fn label_doc_count(&self, label: LabelId) -> u64 {
        self.stats.label_doc_count(label)
    }

    #[inline]
    pub fn label_word_freq(&self, label: LabelId, word: WordId) -> u64 {
        self.stats.label_word_freq(label, word)
    }

    #[inline]
    pub fn label_word_total(&self, label: LabelId) -> u64 {
        self.stats.label_word_total(label)
    }

    #[inline]
    pub fn word_doc_freq(&self, word: WordId) -> u64 {
        self.stats.word_doc_freq(word)
    }

    /// 与えられた単語の出現文書数
    /// Document-label incidences of `word`; 0 for an unknown word.
    /// Never grows the vocabulary.
    pub fn word_doc_count_of(&self, word: &str) -> u64 {
        self.vocab
            .get(word)
            .map_or(0, |id| self.stats.word_doc_freq(id))
    }

    /// Cached priors. Stale until the next [`Corpus::refresh_priors`].
    pub fn label_priors(&self) -> &[f64] {
        &self.label_prior
    }
}

/// Left-to-right scan; only a strictly greater value replaces the current best.
fn arg_max(values: &[f64]) -> LabelId {
    let mut best = 0;
    for (label, &value) in values.iter().enumerate().skip(1) {
        if value > values[best] {
            best = label;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::filter::StopWordList;

    fn spam_ham() -> Corpus {
        let mut corpus = Corpus::new("test", ["spam", "ham"]).unwrap();
        corpus.add_document(&["buy", "now", "buy"], &[0]).unwrap();
        corpus.add_document(&["hello", "friend"], &[1]).unwrap();
        corpus
    }

    #[test]
    fn new_rejects_empty_label_set() {
        let res = Corpus::new("empty", Vec::<String>::new());
        assert!(matches!(res, Err(BowError::NoLabels)));
    }

    #[test]
    fn new_starts_with_uniform_priors() {
        let corpus = Corpus::new("", ["a", "b", "c", "d"]).unwrap();
        assert_eq!(corpus.label_priors(), &[0.25; 4]);
        assert_eq!(corpus.word_count(), 0);
        assert_eq!(corpus.doc_count(), 0);
    }

    #[test]
    fn spam_ham_counts() {
        let corpus = spam_ham();
        let buy = corpus.word_id("buy").unwrap();
        assert_eq!(corpus.doc_count(), 2);
        assert_eq!(corpus.label_doc_count(0), 1);
        assert_eq!(corpus.label_doc_count(1), 1);
        assert_eq!(corpus.label_word_freq(0, buy), 2);
        assert_eq!(corpus.label_word_total(0), 3);
        assert_eq!(corpus.label_word_total(1), 2);
        assert_eq!(corpus.word_count(), 4);
    }

    #[test]
    fn spam_ham_prediction() {
        let mut corpus = spam_ham();
        let prediction = corpus.predict(&["buy", "buy"]).unwrap();
        assert_eq!(prediction.label, 0);
        assert!(prediction.posterior[0] > prediction.posterior[1]);
        assert_eq!(prediction.label_name(&corpus), Some("spam"));
        let sum: f64 = prediction.posterior.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn invalid_label_leaves_state_untouched() {
        let mut corpus = spam_ham();
        let before_words = corpus.word_count();
        let before_stats = corpus.statistics().clone();

        let res = corpus.add_document(&["brand", "new", "words"], &[0, 2]);
        assert!(matches!(res, Err(BowError::InvalidLabel { label: 2, label_count: 2 })));
        assert_eq!(corpus.word_count(), before_words);
        assert_eq!(corpus.statistics(), &before_stats);

        let res = corpus.add_document(&["brand"], &[]);
        assert!(matches!(res, Err(BowError::EmptyLabelSet)));
        assert_eq!(corpus.word_count(), before_words);
        assert_eq!(corpus.doc_count(), 2);
    }

    #[test]
    fn duplicate_labels_count_once() {
        let mut once = Corpus::new("", ["a", "b"]).unwrap();
        once.add_document(&["x", "y"], &[1]).unwrap();
        let mut twice = Corpus::new("", ["a", "b"]).unwrap();
        twice.add_document(&["x", "y"], &[1, 1]).unwrap();
        assert_eq!(once.statistics(), twice.statistics());
    }

    #[test]
    fn predict_grows_vocabulary_but_not_counts() {
        let mut corpus = spam_ham();
        let before = corpus.statistics().clone();
        corpus.predict(&["unseen", "buy"]).unwrap();
        assert_eq!(corpus.word_count(), 5);
        assert_eq!(corpus.word_id("unseen"), Some(4));
        assert_eq!(corpus.statistics(), &before);
    }

    #[test]
    fn stop_words_are_skipped_in_both_paths() {
        let filter = TokenFilter::new(StopWordList::new(["the"], Vec::<String>::new()));
        let mut corpus = Corpus::new("", ["a", "b"]).unwrap().with_filter(filter);
        corpus.add_document(&["the", "cat", "", "the"], &[0]).unwrap();
        assert_eq!(corpus.word_count(), 1);
        assert_eq!(corpus.label_word_total(0), 1);
        corpus.predict(&["the", "dog"]).unwrap();
        assert_eq!(corpus.word_id("the"), None);
        assert_eq!(corpus.word_count(), 2);
    }

    #[test]
    fn disabled_filter_keeps_stop_words() {
        let filter = TokenFilter::new(|t: &str| t == "the").with_enabled(false);
        let mut corpus = Corpus::new("", ["a"]).unwrap().with_filter(filter);
        corpus.add_document(&["the", "cat"], &[0]).unwrap();
        assert_eq!(corpus.word_count(), 2);
    }

    #[test]
    fn word_doc_count_of_does_not_grow_vocabulary() {
        let mut corpus = Corpus::new("", ["a", "b"]).unwrap();
        corpus.add_document(&["x", "x", "y"], &[0, 1]).unwrap();
        corpus.add_document(&["x"], &[1]).unwrap();
        assert_eq!(corpus.word_doc_count_of("x"), 3);
        assert_eq!(corpus.word_doc_count_of("y"), 2);
        assert_eq!(corpus.word_doc_count_of("z"), 0);
        assert_eq!(corpus.word_count(), 2);
    }

    #[test]
    fn arg_max_prefers_lowest_label_on_ties() {
        assert_eq!(arg_max(&[0.25, 0.5, 0.5, 0.25]), 1);
        assert_eq!(arg_max(&[0.5, 0.5]), 0);
        assert_eq!(arg_max(&[f64::NAN, f64::NAN]), 0);
    }

    #[test]
    fn symmetric_corpus_ties_to_first_label() {
        let mut corpus = Corpus::new("", ["left", "right"]).unwrap();
        corpus.add_document(&["a", "b"], &[0]).unwrap();
        corpus.add_document(&["c", "d"], &[1]).unwrap();
        let prediction = corpus.predict(&["e"]).unwrap();
        assert_eq!(prediction.posterior[0], prediction.posterior[1]);
        assert_eq!(prediction.label, 0);
    }

    #[test]
    fn label_lookup() {
        let corpus = spam_ham();
        assert_eq!(corpus.label_id("ham"), Some(1));
        assert_eq!(corpus.label_id("eggs"), None);
        assert_eq!(corpus.label_name(0), Some("spam"));
        assert_eq!(corpus.label_name(9), None);
    }
}
