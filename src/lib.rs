/// This crate is an incremental multinomial Naive Bayes classifier over
/// bag-of-words documents.
pub mod classifier;
pub mod config;
pub mod error;
pub mod persist;
pub mod shared;

/// Bag-of-words Corpus
/// The top-level struct of this crate. It holds a fixed label set, a growing
/// vocabulary and the running statistics, and estimates labels from them.
///
/// Internally, it holds:
/// - The label names
/// - The vocabulary (word <-> word ID)
/// - Per-label word frequencies and totals
/// - Per-word document-label incidence counts
/// - Document counts, overall and per label
/// - A label prior cache
/// - The token filter
///
/// Training (`add_document`) and prediction (`predict`) share one tokenizing
/// step, so prediction also grows the vocabulary. It never changes label
/// statistics.
///
/// # Serialization
/// Supported through `CorpusRecord`, as pretty JSON or CBOR.
/// The token filter is not persisted.
///
/// # Thread Safety
/// `Corpus` itself is not synchronised. Wrap it in `SharedCorpus` to use it
/// from several threads.
pub use classifier::Corpus;

/// Result of a prediction: the arg-max label and the full posterior.
pub use classifier::Prediction;

/// Dense label and word IDs.
pub use classifier::{LabelId, WordId};

/// Word Frequency structure
/// In-document occurrence counts keyed by word ID, produced by
/// `Corpus::tally` and consumed by `Corpus::posterior`.
pub use classifier::frequency::WordFrequency;

/// Vocabulary Index
/// Bidirectional word <-> ID table. IDs are handed out in first-seen order
/// and never reused.
pub use classifier::vocab::Vocabulary;

/// Running counters of a corpus.
pub use classifier::stats::Statistics;

/// Token filtering
/// `TokenFilter` drops empty tokens and, when enabled, stop words.
/// Stop words are decided by a `StopWordPredicate`: either a `StopWordList`
/// (exact words plus word-class prefixes) or any `Fn(&str) -> bool`.
pub use classifier::filter::{StopWordList, StopWordPredicate, TokenFilter};

/// Persisted record of a corpus.
pub use classifier::record::CorpusRecord;

/// Stop-word configuration loaded from TOML.
pub use config::FilterConfig;

pub use error::{BowError, Result};
pub use persist::Format;
pub use shared::SharedCorpus;
