//! Term catalogs.
//!
//! ```yaml
//! words:
//!   - fever
//!   - { text: pneumothorax, category: chest }
//! templates:
//!   - name: Discharge Summary
//!     category: discharge
//!     body: "Discharge summary:\n"
//! ```

use crate::error::LoaderError;
use authoring_core::Term;
use serde::Deserialize;
use std::path::Path;

/// Category given to words listed as bare strings.
pub const DEFAULT_WORD_CATEGORY: &str = "dictionary";

/// Serialization format of a catalog file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    /// `.yaml` / `.yml`
    Yaml,
    /// `.json`
    Json,
}

impl CatalogFormat {
    /// Pick a format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
/// A `words:` entry.
pub enum WordEntry {
    /// A bare word in [`DEFAULT_WORD_CATEGORY`].
    Plain(String),
    /// A word with an explicit category.
    Categorized {
        /// The word.
        text: String,
        /// Category label.
        category: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// A `templates:` entry.
pub struct TemplateEntry {
    /// Display name, also the ranking key.
    pub name: String,
    #[serde(default)]
    /// Category label.
    pub category: String,
    /// Inserted text.
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
/// Raw catalog file contents.
pub struct CatalogFile {
    /// Dictionary words.
    pub words: Vec<WordEntry>,
    /// Snippet templates.
    pub templates: Vec<TemplateEntry>,
}

impl CatalogFile {
    /// Convert to terms: words first, then templates, each in file order.
    pub fn into_terms(self) -> Vec<Term> {
        let words = self
            .words
            .into_iter()
            .map(|entry| match entry {
                WordEntry::Plain(text) => Term::word(text, DEFAULT_WORD_CATEGORY),
                WordEntry::Categorized { text, category } => Term::word(text, category),
            })
            .filter(|term| !term.text.trim().is_empty());
        let templates = self
            .templates
            .into_iter()
            .map(|t| Term::template(t.name, t.category, t.body));
        words.chain(templates).collect()
    }
}

/// Parse catalog text in the given format.
pub fn parse_catalog(source: &str, format: CatalogFormat) -> Result<Vec<Term>, LoaderError> {
    let file: CatalogFile = match format {
        CatalogFormat::Yaml => {
            // An empty YAML document deserializes as unit, not as an empty mapping.
            if source.trim().is_empty() {
                CatalogFile::default()
            } else {
                serde_yaml::from_str(source)?
            }
        }
        CatalogFormat::Json => serde_json::from_str(source)?,
    };
    Ok(file.into_terms())
}

/// Load a catalog file, choosing the format from its extension.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<Term>, LoaderError> {
    let path = path.as_ref();
    let format = CatalogFormat::from_path(path)
        .ok_or_else(|| LoaderError::UnsupportedFormat(path.to_path_buf()))?;
    let source = std::fs::read_to_string(path)?;
    let terms = parse_catalog(&source, format)?;
    tracing::debug!(path = %path.display(), ?format, terms = terms.len(), "loaded term catalog");
    Ok(terms)
}
