//! Replacement computation for chosen completions.
//!
//! These are pure functions: they describe the edit, and the host applies it. Keeping the engine
//! out of the widget's mutation API is what lets it run headless.

use crate::delta::EditDelta;
use crate::error::CoreError;
use crate::terms::Term;
use crate::text::char_len;

/// A proposed document edit plus the caret position after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    /// Start of the replaced span.
    pub from: usize,
    /// End of the replaced span (exclusive).
    pub to: usize,
    /// Text inserted in place of `from..to`.
    pub insert_text: String,
    /// Caret offset after the edit.
    pub new_cursor_pos: usize,
}

impl Replacement {
    /// The delta the host reports back after applying this replacement.
    pub fn to_delta(&self) -> EditDelta {
        EditDelta::new(self.from, self.to, self.insert_text.clone())
    }
}

/// Replace everything from the trigger marker through the caret with the chosen term.
///
/// `document_text` is only used to bounds-check the span.
pub fn compute_replacement(
    document_text: &str,
    trigger_pos: usize,
    cursor_pos: usize,
    chosen: &Term,
) -> Result<Replacement, CoreError> {
    let len = char_len(document_text);
    if trigger_pos > cursor_pos || cursor_pos > len {
        return Err(CoreError::InvalidSpan {
            from: trigger_pos,
            to: cursor_pos,
            len,
        });
    }

    let insert_text = chosen.insert_text().to_string();
    let new_cursor_pos = trigger_pos + char_len(&insert_text);
    Ok(Replacement {
        from: trigger_pos,
        to: cursor_pos,
        insert_text,
        new_cursor_pos,
    })
}

/// Character offset where the letter run ending at the end of `text_before_cursor` starts,
/// relative to `text_before_cursor`.
pub fn fragment_start(text_before_cursor: &str) -> usize {
    let total = char_len(text_before_cursor);
    let run = text_before_cursor
        .chars()
        .rev()
        .take_while(|c| c.is_alphabetic())
        .count();
    total - run
}
