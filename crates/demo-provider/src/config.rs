use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, Result};

/// Provider configuration. Exactly one backend block must be set.
///
/// ```toml
/// [filesystem]
/// workdir = "/tmp/demo"
/// ```
///
/// ```toml
/// [jsonserver]
/// url = "http://localhost:3000/posts"
/// timeout_secs = 10
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Use the filesystem as the backend service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filesystem: Option<FilesystemConfig>,
    /// Use a json-server as the backend service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonserver: Option<JsonServerConfig>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilesystemConfig {
    /// The directory to store the json files.
    pub workdir: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JsonServerConfig {
    /// The URL of the json-server collection.
    pub url: String,
    /// Per-request transport timeout. No timeout when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl JsonServerConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl ProviderConfig {
    pub fn filesystem(workdir: impl Into<PathBuf>) -> Self {
        Self {
            filesystem: Some(FilesystemConfig {
                workdir: workdir.into(),
            }),
            jsonserver: None,
        }
    }

    pub fn jsonserver(url: impl Into<String>) -> Self {
        Self {
            filesystem: None,
            jsonserver: Some(JsonServerConfig {
                url: url.into(),
                timeout_secs: None,
            }),
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| ProviderError::Serialization(e.to_string()))
    }

    /// Configuration as handed over by the configuration engine.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ProviderError::Serialization(e.to_string()))
    }

    /// Load a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Check that exactly one backend block is present.
    pub fn validate(&self) -> Result<()> {
        match (&self.filesystem, &self.jsonserver) {
            (None, None) => Err(ProviderError::Config(
                r#"None of "filesystem" and "jsonserver" is specified"#.into(),
            )),
            (Some(_), Some(_)) => Err(ProviderError::Config(
                r#"Only one of "filesystem" and "jsonserver" can be specified"#.into(),
            )),
            _ => Ok(()),
        }
    }
}
