//! Trigger marker detection.
//!
//! The detector looks at the text immediately before the caret for the last occurrence of the
//! configured marker (e.g. `template:`) with no whitespace between the end of the marker and the
//! caret. The characters after the marker form the picker's filter.
//!
//! Selecting a completion or dismissing the picker suppresses detection for a short window. A
//! selection removes the marker text, and without the cooldown the very next scan could match
//! leftover characters and reopen the picker.

use crate::config::TriggerConfig;
use crate::error::ConfigError;
use crate::scheduler::Timestamp;
use crate::text::CharIndex;
use std::time::Duration;

/// A marker match before the caret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerMatch {
    /// Character offset of the first character of the marker.
    pub trigger_pos: usize,
    /// Text between the end of the marker and the caret.
    pub filter_text: String,
}

/// Detector state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TriggerState {
    /// Whether the picker is open.
    pub active: bool,
    /// Marker offset of the active match.
    pub trigger_pos: usize,
    /// Filter text of the active match.
    pub filter_text: String,
    /// Scans return `None` until this time.
    pub suppressed_until: Timestamp,
}

/// Scans text before the caret for the trigger marker.
#[derive(Debug, Clone)]
pub struct TriggerDetector {
    marker: String,
    suppression: Duration,
    state: TriggerState,
}

impl TriggerDetector {
    /// Create a detector. Fails if the marker is empty.
    pub fn new(config: &TriggerConfig) -> Result<Self, ConfigError> {
        if config.marker.is_empty() {
            return Err(ConfigError::EmptyMarker);
        }
        Ok(Self {
            marker: config.marker.clone(),
            suppression: config.suppression(),
            state: TriggerState::default(),
        })
    }

    /// Current state.
    pub fn state(&self) -> &TriggerState {
        &self.state
    }

    /// Whether the picker is open.
    pub fn is_active(&self) -> bool {
        self.state.active
    }

    /// The configured marker.
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Scan `text_before_cursor`, which is assumed to start at document offset 0.
    pub fn scan(&mut self, text_before_cursor: &str, now: Timestamp) -> Option<TriggerMatch> {
        self.scan_window(text_before_cursor, 0, now)
    }

    /// Scan a window of text ending at the caret and starting at document offset `base`.
    pub fn scan_window(
        &mut self,
        window: &str,
        base: usize,
        now: Timestamp,
    ) -> Option<TriggerMatch> {
        if now < self.state.suppressed_until {
            return None;
        }

        match find_marker(window, &self.marker) {
            Some((pos, filter_text)) => {
                let found = TriggerMatch {
                    trigger_pos: base + pos,
                    filter_text,
                };
                self.state.active = true;
                self.state.trigger_pos = found.trigger_pos;
                self.state.filter_text = found.filter_text.clone();
                Some(found)
            }
            None => {
                if self.state.active {
                    tracing::trace!(marker = %self.marker, "trigger no longer matches; deactivating");
                }
                self.deactivate();
                None
            }
        }
    }

    /// Forget all state, including any suppression window.
    pub fn reset(&mut self) {
        self.state = TriggerState::default();
    }

    /// Deactivate after the user picked a completion.
    pub fn select(&mut self, now: Timestamp) {
        self.deactivate_suppressed(now);
    }

    /// Deactivate after an explicit cancel (escape).
    pub fn dismiss(&mut self, now: Timestamp) {
        self.deactivate_suppressed(now);
    }

    fn deactivate_suppressed(&mut self, now: Timestamp) {
        self.deactivate();
        self.state.suppressed_until = now + self.suppression;
    }

    fn deactivate(&mut self) {
        self.state.active = false;
        self.state.trigger_pos = 0;
        self.state.filter_text.clear();
    }
}

/// Last occurrence of `marker` in `text` followed only by non-whitespace up to the end.
///
/// Returns the marker's character offset and the filter text.
fn find_marker(text: &str, marker: &str) -> Option<(usize, String)> {
    let byte_pos = text.rfind(marker)?;
    let filter = &text[byte_pos + marker.len()..];
    if filter.chars().any(char::is_whitespace) {
        return None;
    }
    let index = CharIndex::new(text);
    Some((index.byte_to_char(byte_pos), filter.to_string()))
}
