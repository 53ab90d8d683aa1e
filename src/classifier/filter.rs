use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Decides whether a token is a stop word.
/// Implementations must be pure: the same token always gets the same answer.
pub trait StopWordPredicate: Send + Sync {
    fn is_stop_word(&self, token: &str) -> bool;
}

impl<F> StopWordPredicate for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    #[inline]
    fn is_stop_word(&self, token: &str) -> bool {
        self(token)
    }
}

/// ストップワードリスト
/// A token is a stop word when it equals one of `words`, or when it starts
/// with one of the word-class prefixes in `classes` (for tokens tagged by a
/// morphological analyser, e.g. `"助詞/は"`).
#[derive(Debug, Clone, Default)]
pub struct StopWordList {
    words: HashSet<String>,
    classes: Vec<String>,
}

impl StopWordList {
    pub fn new<W, C, S, T>(words: W, classes: C) -> Self
    where
        W: IntoIterator<Item = S>,
        C: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            classes: classes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.classes.is_empty()
    }
}

impl StopWordPredicate for StopWordList {
    fn is_stop_word(&self, token: &str) -> bool {
        self.words.contains(token)
            || self.classes.iter().any(|class| token.starts_with(class.as_str()))
    }
}

/// Token filter owned by a corpus.
///
/// Empty tokens are always dropped. Stop words are dropped only while the
/// filter is enabled and a predicate is attached.
#[derive(Clone, Default)]
pub struct TokenFilter {
    use_stop_words: bool,
    predicate: Option<Arc<dyn StopWordPredicate>>,
}

impl TokenFilter {
    /// Filter that only drops empty tokens.
    pub fn disabled() -> Self {
        Self {
            use_stop_words: false,
            predicate: None,
        }
    }

    /// Filter that drops tokens matched by `predicate`.
    pub fn new<P>(predicate: P) -> Self
    where
        P: StopWordPredicate + 'static,
    {
        Self {
            use_stop_words: true,
            predicate: Some(Arc::new(predicate)),
        }
    }

    /// Toggle stop-word filtering without dropping the predicate.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.use_stop_words = enabled;
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.set_enabled(enabled);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.use_stop_words && self.predicate.is_some()
    }

    /// `true` if the token should be counted.
    #[inline]
    pub fn accepts(&self, token: &str) -> bool {
        if token.is_empty() {
            return false;
        }
        match &self.predicate {
            Some(predicate) if self.use_stop_words => !predicate.is_stop_word(token),
            _ => true,
        }
    }
}

impl fmt::Debug for TokenFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenFilter")
            .field("use_stop_words", &self.use_stop_words)
            .field("has_predicate", &self.predicate.is_some())
            .finish()
    }
}
