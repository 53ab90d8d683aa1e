use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::classifier::{Corpus, LabelId, Prediction};
use crate::error::Result;

/// Thread-safe handle to a [`Corpus`].
///
/// The whole corpus sits behind one exclusive lock. Prediction takes it too,
/// because it can grow the vocabulary, and so does saving, so a snapshot
/// never sees a half-applied document.
#[derive(Debug, Clone)]
pub struct SharedCorpus {
    inner: Arc<Mutex<Corpus>>,
}

impl SharedCorpus {
    pub fn new(corpus: Corpus) -> Self {
        Self {
            inner: Arc::new(Mutex::new(corpus)),
        }
    }

    pub fn add_document<T>(&self, words: &[T], labels: &[LabelId]) -> Result<()>
    where
        T: AsRef<str>,
    {
        self.inner.lock().add_document(words, labels)
    }

    pub fn predict<T>(&self, words: &[T]) -> Result<Prediction>
    where
        T: AsRef<str>,
    {
        self.inner.lock().predict(words)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.inner.lock().save(path)
    }

    /// Run `f` with exclusive access.
    pub fn with<R>(&self, f: impl FnOnce(&mut Corpus) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Consistent copy of the current state.
    pub fn snapshot(&self) -> Corpus {
        self.inner.lock().clone()
    }
}

impl From<Corpus> for SharedCorpus {
    fn from(corpus: Corpus) -> Self {
        Self::new(corpus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn concurrent_training_keeps_counts() {
        let shared = SharedCorpus::new(Corpus::new("", ["even", "odd"]).unwrap());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for i in 0..50 {
                        let word = format!("w{}", (t * 50 + i) % 30);
                        shared.add_document(&[word.as_str(), "common"], &[i % 2]).unwrap();
                        shared.predict(&[word.as_str()]).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let corpus = shared.snapshot();
        assert_eq!(corpus.doc_count(), 200);
        assert_eq!(corpus.label_doc_count(0) + corpus.label_doc_count(1), 200);
        assert_eq!(corpus.word_count(), 31);
        let common = corpus.word_id("common").unwrap();
        assert_eq!(corpus.word_doc_freq(common), 200);
        for (id, word) in corpus.words().enumerate() {
            assert_eq!(corpus.word_id(word), Some(id));
        }
    }

    #[test]
    fn with_gives_mutable_access() {
        let shared: SharedCorpus = Corpus::new("", ["a"]).unwrap().into();
        shared.with(|c| c.set_note("edited"));
        assert_eq!(shared.snapshot().note(), "edited");
    }
}
