//! Term index: the session's dictionary words and report templates.
//!
//! The index is loaded once by an external collaborator and never mutated afterwards. It is
//! shared by completion ranking (every term is a candidate) and spellchecking (the case-folded
//! lexicon of every letter run in the index).

use crate::spell::SpellPredicate;
use std::collections::HashSet;
use std::sync::Arc;

/// What inserting a term produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermKind {
    /// A dictionary word; inserting it inserts the word itself.
    Word,
    /// A report template; inserting it inserts the full body.
    Template {
        /// Template body text.
        body: String,
    },
}

/// A single known word or template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// Display text (the word, or the template name).
    pub text: String,
    /// Free-form grouping, e.g. `"imaging"` or `"discharge"`.
    pub category: String,
    /// Word or template payload.
    pub kind: TermKind,
}

impl Term {
    /// A dictionary word.
    pub fn word(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
            kind: TermKind::Word,
        }
    }

    /// A template named `name` whose insertion produces `body`.
    pub fn template(
        name: impl Into<String>,
        category: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            text: name.into(),
            category: category.into(),
            kind: TermKind::Template { body: body.into() },
        }
    }

    /// Text placed into the document when this term is chosen.
    pub fn insert_text(&self) -> &str {
        match &self.kind {
            TermKind::Word => &self.text,
            TermKind::Template { body } => body,
        }
    }

    /// Whether this is a [`TermKind::Word`].
    pub fn is_word(&self) -> bool {
        matches!(self.kind, TermKind::Word)
    }
}

/// Immutable, cheaply clonable collection of terms.
#[derive(Debug, Clone, Default)]
pub struct TermIndex {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    terms: Vec<Term>,
    lexicon: HashSet<String>,
}

impl TermIndex {
    /// The index used before the loader has delivered anything.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build an index, preserving term order.
    pub fn new(terms: Vec<Term>) -> Self {
        let mut lexicon = HashSet::new();
        for term in &terms {
            add_runs(&mut lexicon, &term.text);
            if let TermKind::Template { body } = &term.kind {
                add_runs(&mut lexicon, body);
            }
        }
        Self {
            inner: Arc::new(Inner { terms, lexicon }),
        }
    }

    /// All terms, in load order.
    pub fn terms(&self) -> &[Term] {
        &self.inner.terms
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.inner.terms.len()
    }

    /// Whether the index has no terms.
    pub fn is_empty(&self) -> bool {
        self.inner.terms.is_empty()
    }

    /// Only [`TermKind::Word`] terms, in load order.
    pub fn words(&self) -> impl Iterator<Item = &Term> {
        self.inner.terms.iter().filter(|t| t.is_word())
    }

    /// Case-insensitive lexicon lookup.
    pub fn contains_word(&self, word: &str) -> bool {
        self.inner.lexicon.contains(&word.to_lowercase())
    }
}

impl SpellPredicate for TermIndex {
    fn check_word(&self, word: &str) -> bool {
        self.contains_word(word)
    }
}

fn add_runs(lexicon: &mut HashSet<String>, text: &str) {
    for run in text.split(|c: char| !c.is_alphabetic()) {
        if !run.is_empty() {
            lexicon.insert(run.to_lowercase());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_text_dispatches_on_kind() {
        let word = Term::word("fracture", "ortho");
        let template = Term::template("Discharge Summary", "discharge", "Discharge summary: ...");
        assert_eq!(word.insert_text(), "fracture");
        assert_eq!(template.insert_text(), "Discharge summary: ...");
    }

    #[test]
    fn test_lexicon_covers_multi_word_terms_and_bodies() {
        let index = TermIndex::new(vec![
            Term::word("CT scan", "imaging"),
            Term::template("Referral (X-ray)", "referral", "Please perform imaging."),
        ]);
        assert!(index.contains_word("ct"));
        assert!(index.contains_word("SCAN"));
        assert!(index.contains_word("ray"));
        assert!(index.contains_word("imaging"));
        assert!(!index.contains_word("fever"));
        assert_eq!(index.words().count(), 1);
    }

    #[test]
    fn test_clone_shares_storage() {
        let index = TermIndex::new(vec![Term::word("MRI", "imaging")]);
        let clone = index.clone();
        assert!(Arc::ptr_eq(&index.inner, &clone.inner));
    }
}
