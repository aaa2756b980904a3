use crate::error::LoaderError;
use authoring_core::EngineConfig;
use std::path::Path;

/// Parse and validate a YAML engine configuration. Missing sections take their defaults.
pub fn parse_engine_config(yaml: &str) -> Result<EngineConfig, LoaderError> {
    let config: EngineConfig = if yaml.trim().is_empty() {
        EngineConfig::default()
    } else {
        serde_yaml::from_str(yaml)?
    };
    config.validate()?;
    Ok(config)
}

/// Load and validate a YAML engine configuration file.
pub fn load_engine_config(path: impl AsRef<Path>) -> Result<EngineConfig, LoaderError> {
    let path = path.as_ref();
    let yaml = std::fs::read_to_string(path)?;
    let config = parse_engine_config(&yaml)?;
    tracing::debug!(path = %path.display(), "loaded engine configuration");
    Ok(config)
}
