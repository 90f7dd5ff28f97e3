//! Host configuration
//!
//! Names the guest ABI surface: the import module the handlers are
//! registered under and the exports the driver looks up. Every field has
//! the Go toolchain's default, so an empty document is a valid config.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors loading a [`HostConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("cannot read config {path}: {source}")]
    Read {
        /// File that was requested
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The document is not a valid configuration
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Guest ABI names.
///
/// # Examples
///
/// ```
/// use abi_bridge::HostConfig;
///
/// let config = HostConfig::from_json_str(r#"{"import_module": "gojs"}"#).unwrap();
/// assert_eq!(config.import_module, "gojs");
/// assert_eq!(config.run_export, "run");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    /// Module every import is resolved against
    pub import_module: String,
    /// Exported linear memory
    pub memory_export: String,
    /// Entry export, invoked once as `run(0, 0)`
    pub run_export: String,
    /// Export re-invoked until the guest exits
    pub resume_export: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        HostConfig {
            import_module: "go".to_string(),
            memory_export: "mem".to_string(),
            run_export: "run".to_string(),
            resume_export: "resume".to_string(),
        }
    }
}

impl HostConfig {
    /// Parses a JSON document.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Reads and parses the JSON file at `path`.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&source)
    }
}
