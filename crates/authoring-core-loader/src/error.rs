use authoring_core::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while loading catalogs, word lists, or configuration.
pub enum LoaderError {
    #[error("I/O error: {0}")]
    /// Filesystem I/O failed.
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    /// YAML parsing failed.
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    /// JSON parsing failed.
    Json(#[from] serde_json::Error),

    #[error("unsupported catalog format: {}", .0.display())]
    /// The file extension is not one of `yaml`, `yml`, or `json`.
    UnsupportedFormat(PathBuf),

    #[error("invalid configuration: {0}")]
    /// The configuration parsed but failed validation.
    Config(#[from] ConfigError),
}
