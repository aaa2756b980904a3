//! Spell predicate capability.

/// Decides whether a word is spelled correctly.
///
/// Implementations must be synchronous and side-effect free from the engine's point of view.
/// [`TermIndex`](crate::TermIndex) implements this with a lexicon lookup; any
/// `Fn(&str) -> bool` closure works too.
pub trait SpellPredicate: Send + Sync {
    /// Returns `true` if `word` is known.
    fn check_word(&self, word: &str) -> bool;
}

impl<F> SpellPredicate for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn check_word(&self, word: &str) -> bool {
        self(word)
    }
}
