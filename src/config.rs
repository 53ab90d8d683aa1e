use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classifier::filter::{StopWordList, TokenFilter};
use crate::error::Result;

/// Stop-word configuration, normally read from a TOML file:
///
/// ```toml
/// use_stop_words = true
/// stop_words = ["the", "a", "of"]
/// stop_word_classes = ["助詞", "記号"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub use_stop_words: bool,
    pub stop_words: Vec<String>,
    /// Word-class prefixes; a token starting with one of them is dropped.
    pub stop_word_classes: Vec<String>,
}

impl FilterConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&text)?;
        log::debug!(
            "filter config from {}: enabled={}, {} words, {} classes",
            path.as_ref().display(),
            config.use_stop_words,
            config.stop_words.len(),
            config.stop_word_classes.len()
        );
        Ok(config)
    }

    /// Build the token filter this configuration describes.
    pub fn build(&self) -> TokenFilter {
        let list = StopWordList::new(
            self.stop_words.iter().cloned(),
            self.stop_word_classes.iter().cloned(),
        );
        if list.is_empty() {
            return TokenFilter::disabled();
        }
        TokenFilter::new(list).with_enabled(self.use_stop_words)
    }
}
