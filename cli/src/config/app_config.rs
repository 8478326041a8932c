use std::path::PathBuf;

use huepick_core::DEFAULT_LOG_FILE;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log: PickLogConfig,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
    pub host: HostConfig,
}

/// Where saved picks go.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickLogConfig {
    /// Leave empty to use `picked-colors.txt` in the working directory
    pub file: String,
}

impl PickLogConfig {
    pub fn effective_path(&self) -> PathBuf {
        if self.file.is_empty() {
            PathBuf::from(DEFAULT_LOG_FILE)
        } else {
            PathBuf::from(&self.file)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is not set
    pub level: String,
    /// Also write a daily rotating log file under the config directory
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            file: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub json: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Use native dialogs and the system clipboard (needs the `desktop` feature)
    pub desktop: bool,
}
