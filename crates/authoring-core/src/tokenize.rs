//! Word tokenizer for rescans.
//!
//! Words are the matches of the configured pattern (by default maximal runs of Unicode letters);
//! everything else separates them. Offsets are character offsets.

use crate::config::DiagnosticsConfig;
use crate::error::ConfigError;
use crate::text::{CharIndex, char_len};
use regex::Regex;

/// A word found in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordSpan<'a> {
    /// Start character offset.
    pub from: usize,
    /// End character offset (exclusive).
    pub to: usize,
    /// The word text.
    pub word: &'a str,
}

/// Compiled word pattern plus the minimum word length.
#[derive(Debug, Clone)]
pub struct WordTokenizer {
    regex: Regex,
    min_word_len: usize,
}

impl WordTokenizer {
    /// Compile the tokenizer described by `config`.
    pub fn new(config: &DiagnosticsConfig) -> Result<Self, ConfigError> {
        let regex = Regex::new(&config.word_pattern).map_err(|source| ConfigError::WordPattern {
            pattern: config.word_pattern.clone(),
            source,
        })?;
        Ok(Self {
            regex,
            min_word_len: config.min_word_len.max(1),
        })
    }

    /// Every word of at least `min_word_len` characters, in document order.
    pub fn words<'a>(&self, text: &'a str) -> Vec<WordSpan<'a>> {
        let index = CharIndex::new(text);
        self.regex
            .find_iter(text)
            .filter_map(|m| {
                let word = m.as_str();
                if word.is_empty() || char_len(word) < self.min_word_len {
                    return None;
                }
                Some(WordSpan {
                    from: index.byte_to_char(m.start()),
                    to: index.byte_to_char(m.end()),
                    word,
                })
            })
            .collect()
    }
}
