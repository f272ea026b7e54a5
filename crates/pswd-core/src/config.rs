use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::PswdResult;

/// Top-level configuration (loaded from pswd.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PswdConfig {
    pub log: LogConfig,
    pub store: StoreConfig,
}

impl PswdConfig {
    /// Parse a TOML document; missing sections and keys take their defaults.
    pub fn from_toml_str(content: &str) -> PswdResult<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (default: info)
    pub level: String,
    /// Log format: "text", "json" or "bare"
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines with timestamp, level and target
    #[default]
    Text,
    /// One JSON object per event
    Json,
    /// Message only: no timestamp, level or target
    Bare,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            "bare" => Ok(LogFormat::Bare),
            other => Err(format!("unknown log format: {other} (expected text, json or bare)")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Explicit password store file (overrides the derived store name)
    pub path: Option<PathBuf>,
    /// Directory searched for the derived `<hmac>.pswd` store file
    pub dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            dir: PathBuf::from("."),
        }
    }
}
