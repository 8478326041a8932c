use anyhow::Context;
use serde::de::DeserializeOwned;
use std::path::Path;

use super::AppConfig;

/// Load a YAML configuration file from disk
pub fn load_yaml<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)?;
    let config: T = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Parse YAML from string
pub fn parse_yaml<T: DeserializeOwned>(content: &str) -> anyhow::Result<T> {
    let config: T = serde_yaml::from_str(content)?;
    Ok(config)
}

/// Load the app config from `path`.
/// A missing file yields defaults; an unreadable or invalid one is an error
pub fn load_config(path: &Path) -> anyhow::Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    load_yaml::<AppConfig>(path).with_context(|| format!("failed to load config {:?}", path))
}
