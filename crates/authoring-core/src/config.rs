//! Engine configuration.
//!
//! Configuration is an explicit value passed to [`AuthoringEngine::new`](crate::AuthoringEngine::new)
//! and validated there, so a bad marker or cap fails at construction rather than on a keystroke.
//! Every field has a default; partial YAML/JSON documents deserialize cleanly.

use crate::error::ConfigError;
use crate::text::char_len;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default trigger marker.
pub const DEFAULT_MARKER: &str = "template:";

/// Default diagnostics tokenizer: maximal runs of Unicode letters.
pub const DEFAULT_WORD_PATTERN: &str = r"\p{L}+";

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Trigger marker detection.
    pub trigger: TriggerConfig,
    /// Completion caps.
    pub completion: CompletionConfig,
    /// Misspelling tracking.
    pub diagnostics: DiagnosticsConfig,
    /// Hard line reflow while typing.
    pub reflow: ReflowConfig,
    /// Per-session debug logging.
    pub debug: DebugConfig,
}

impl EngineConfig {
    /// Check every invariant the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.trigger.validate()?;
        self.completion.validate()?;
        self.diagnostics.validate()?;
        self.reflow.validate()?;
        Ok(())
    }
}

/// Trigger marker detection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerConfig {
    /// Literal marker that opens the template picker.
    pub marker: String,
    /// How many characters before the caret are inspected.
    pub lookback_chars: usize,
    /// Reopen suppression after a selection or dismiss, in milliseconds.
    pub suppression_ms: u64,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            lookback_chars: 256,
            suppression_ms: 500,
        }
    }
}

impl TriggerConfig {
    /// Reopen suppression window.
    pub fn suppression(&self) -> Duration {
        Duration::from_millis(self.suppression_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.marker.is_empty() {
            return Err(ConfigError::EmptyMarker);
        }
        let marker_len = char_len(&self.marker);
        if self.lookback_chars < marker_len {
            return Err(ConfigError::LookbackTooShort {
                lookback: self.lookback_chars,
                marker_len,
            });
        }
        Ok(())
    }
}

/// Completion list caps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Maximum entries in the trigger-opened template picker.
    pub trigger_cap: usize,
    /// Maximum entries for inline word autocomplete.
    pub inline_cap: usize,
    /// Minimum word fragment length before inline autocomplete runs.
    pub min_inline_prefix: usize,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            trigger_cap: 5,
            inline_cap: 20,
            min_inline_prefix: 2,
        }
    }
}

impl CompletionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.trigger_cap == 0 {
            return Err(ConfigError::Zero("completion.trigger_cap"));
        }
        if self.inline_cap == 0 {
            return Err(ConfigError::Zero("completion.inline_cap"));
        }
        Ok(())
    }
}

/// Misspelling tracking settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Trailing debounce before a rescan, in milliseconds.
    pub debounce_ms: u64,
    /// Words shorter than this (in characters) are never flagged.
    pub min_word_len: usize,
    /// Regex matching a single word.
    pub word_pattern: String,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            min_word_len: 1,
            word_pattern: DEFAULT_WORD_PATTERN.to_string(),
        }
    }
}

impl DiagnosticsConfig {
    /// Rescan debounce window.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_word_len == 0 {
            return Err(ConfigError::Zero("diagnostics.min_word_len"));
        }
        regex::Regex::new(&self.word_pattern).map_err(|source| ConfigError::WordPattern {
            pattern: self.word_pattern.clone(),
            source,
        })?;
        Ok(())
    }
}

/// Hard line reflow settings. Disabled unless explicitly enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReflowConfig {
    /// Whether the engine proposes line breaks.
    pub enabled: bool,
    /// Maximum line width in display cells.
    pub max_width: usize,
    /// Tab stop width in cells.
    pub tab_width: usize,
}

impl Default for ReflowConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_width: 80,
            tab_width: 4,
        }
    }
}

impl ReflowConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.max_width == 0 {
            return Err(ConfigError::Zero("reflow.max_width"));
        }
        Ok(())
    }
}

/// Per-session debug switch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Emit detailed `tracing` events for this session.
    pub enabled: bool,
}
