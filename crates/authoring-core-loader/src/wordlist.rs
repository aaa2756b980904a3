use crate::error::LoaderError;
use authoring_core::Term;
use std::path::Path;

/// Parse a plain word list: one word per line, blank lines and `#` comments skipped.
///
/// Every word gets `category`. Surrounding whitespace is trimmed.
pub fn parse_word_list(source: &str, category: &str) -> Vec<Term> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|word| Term::word(word, category))
        .collect()
}

/// Load a plain word list from disk.
pub fn load_word_list(path: impl AsRef<Path>, category: &str) -> Result<Vec<Term>, LoaderError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)?;
    let terms = parse_word_list(&source, category);
    tracing::debug!(path = %path.display(), category, words = terms.len(), "loaded word list");
    Ok(terms)
}
