//! Read-only shadow of the host's document.
//!
//! The host owns the real document. The engine keeps a [`DocumentMirror`] so it can validate
//! incoming deltas against current bounds, answer "text before cursor" queries, and hand the full
//! text to rescans. The mirror only changes when an accepted delta is applied.

use crate::delta::EditDelta;
use crate::error::{CoreError, DeltaError};
use ropey::Rope;

/// Rope-backed copy of the document text plus the caret offset.
#[derive(Debug, Clone, Default)]
pub struct DocumentMirror {
    rope: Rope,
    cursor: usize,
}

impl DocumentMirror {
    /// Create a mirror of `text` with the caret at the start.
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: 0,
        }
    }

    /// Document length in characters.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Whether the document is empty.
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Current caret offset.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the caret. Fails if `cursor` is past the end of the document.
    pub fn set_cursor(&mut self, cursor: usize) -> Result<(), CoreError> {
        let len = self.len_chars();
        if cursor > len {
            return Err(CoreError::CursorOutOfBounds { cursor, len });
        }
        self.cursor = cursor;
        Ok(())
    }

    /// Apply a validated delta. The mirror is left untouched when validation fails.
    ///
    /// The caret is shifted like any other offset after the edit; callers normally follow up
    /// with [`set_cursor`](Self::set_cursor) using the host's reported caret.
    pub fn apply(&mut self, delta: &EditDelta) -> Result<(), DeltaError> {
        delta.validate(self.len_chars())?;

        if delta.from < delta.to {
            self.rope.remove(delta.from..delta.to);
        }
        if !delta.inserted_text.is_empty() {
            self.rope.insert(delta.from, &delta.inserted_text);
        }

        if self.cursor >= delta.to {
            self.cursor = (self.cursor as isize + delta.shift()).max(0) as usize;
        } else if self.cursor > delta.from {
            self.cursor = delta.from + delta.inserted_len();
        }
        self.cursor = self.cursor.min(self.len_chars());
        Ok(())
    }

    /// Full document text.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Text of `from..to`, clamped to the document.
    pub fn slice(&self, from: usize, to: usize) -> String {
        let len = self.len_chars();
        let to = to.min(len);
        let from = from.min(to);
        self.rope.slice(from..to).to_string()
    }

    /// Up to `n` characters immediately before the caret, with the offset where they start.
    pub fn text_before_cursor(&self, n: usize) -> (usize, String) {
        let start = self.cursor.saturating_sub(n);
        (start, self.slice(start, self.cursor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_replaces_range_and_tracks_cursor() {
        let mut doc = DocumentMirror::new("Patient had fever");
        doc.set_cursor(17).unwrap();

        doc.apply(&EditDelta::new(8, 11, "has")).unwrap();
        assert_eq!(doc.text(), "Patient has fever");
        assert_eq!(doc.cursor(), 17);

        doc.apply(&EditDelta::delete(0, 8)).unwrap();
        assert_eq!(doc.text(), "has fever");
        assert_eq!(doc.cursor(), 9);
    }

    #[test]
    fn test_rejected_delta_leaves_mirror_untouched() {
        let mut doc = DocumentMirror::new("abc");
        let err = doc.apply(&EditDelta::delete(2, 9)).unwrap_err();
        assert_eq!(
            err,
            DeltaError::OutOfBounds {
                from: 2,
                to: 9,
                len: 3
            }
        );
        assert_eq!(doc.text(), "abc");
    }

    #[test]
    fn test_text_before_cursor_is_bounded() {
        let mut doc = DocumentMirror::new("Findings: template:disc");
        doc.set_cursor(23).unwrap();
        assert_eq!(doc.text_before_cursor(4), (19, "disc".to_string()));
        assert_eq!(doc.text_before_cursor(100).0, 0);
        assert!(doc.set_cursor(24).is_err());
    }
}
