//! Structured edit deltas.
//!
//! The host reports every document mutation as an [`EditDelta`]: a removed character range in
//! the pre-edit document plus the text inserted in its place. The engine never diffs old and new
//! text; deltas are the only way it learns about edits.

use crate::error::DeltaError;
use crate::text::char_len;

/// A single atomic document mutation, expressed in character offsets.
///
/// Semantics:
/// - `from..to` is the removed range in the document **before** this edit.
/// - `inserted_text` is placed at `from`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDelta {
    /// Start of the removed range (inclusive).
    pub from: usize,
    /// End of the removed range (exclusive).
    pub to: usize,
    /// Exact inserted text (may be empty).
    pub inserted_text: String,
}

impl EditDelta {
    /// Create a delta replacing `from..to` with `inserted_text`.
    pub fn new(from: usize, to: usize, inserted_text: impl Into<String>) -> Self {
        Self {
            from,
            to,
            inserted_text: inserted_text.into(),
        }
    }

    /// Pure insertion at `at`.
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::new(at, at, text)
    }

    /// Pure deletion of `from..to`.
    pub fn delete(from: usize, to: usize) -> Self {
        Self::new(from, to, String::new())
    }

    /// Length of the removed range in characters.
    pub fn removed_len(&self) -> usize {
        self.to.saturating_sub(self.from)
    }

    /// Length of `inserted_text` in characters.
    pub fn inserted_len(&self) -> usize {
        char_len(&self.inserted_text)
    }

    /// Signed change in document length caused by this edit.
    pub fn shift(&self) -> isize {
        self.inserted_len() as isize - self.removed_len() as isize
    }

    /// Check that this delta can be applied to a document of `doc_len` characters.
    pub fn validate(&self, doc_len: usize) -> Result<(), DeltaError> {
        if self.from > self.to {
            return Err(DeltaError::InvertedRange {
                from: self.from,
                to: self.to,
            });
        }
        if self.to > doc_len {
            return Err(DeltaError::OutOfBounds {
                from: self.from,
                to: self.to,
                len: doc_len,
            });
        }
        Ok(())
    }
}

/// Where a delta came from.
///
/// Every delta is remapped through the diagnostic ranges, but only user input restarts the
/// rescan debounce. Formatting and reflow passes are programmatic so that they cannot feed a
/// rescan loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditOrigin {
    /// Typing, deletion, paste, or an applied completion.
    #[default]
    Input,
    /// An internal pass such as reformatting or reflow.
    Programmatic,
}

impl EditOrigin {
    /// Whether deltas with this origin restart the rescan debounce.
    pub fn restarts_debounce(self) -> bool {
        match self {
            Self::Input => true,
            Self::Programmatic => false,
        }
    }
}
