//! Processor configuration loaded from JSON.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Where uploads and results live, and which uploads are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Directory holding uploaded originals.
    pub upload_dir: PathBuf,
    /// Directory receiving PNG results.
    pub result_dir: PathBuf,
    /// Accepted upload extensions, compared case-insensitively.
    pub allowed_extensions: Vec<String>,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("static").join("uploads"),
            result_dir: PathBuf::from("static").join("results"),
            allowed_extensions: ["png", "jpg", "jpeg"].map(String::from).to_vec(),
        }
    }
}

impl ProcessorConfig {
    /// Whether an upload named `filename` is accepted.
    pub fn accepts(&self, filename: &str) -> bool {
        crate::io::is_allowed_file(filename, &self.allowed_extensions)
    }
}

/// Load a [`ProcessorConfig`] from a JSON file. Missing keys take defaults.
pub fn load_config(path: &Path) -> Result<ProcessorConfig, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProcessorConfig::default();
        assert_eq!(config.result_dir, Path::new("static/results"));
        assert!(config.accepts("a.jpeg"));
        assert!(!config.accepts("a.bmp"));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: ProcessorConfig = serde_json::from_str(r#"{"result_dir": "out"}"#).unwrap();
        assert_eq!(config.result_dir, Path::new("out"));
        assert_eq!(config.upload_dir, Path::new("static/uploads"));
        assert_eq!(config.allowed_extensions.len(), 3);
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cvops.json");
        fs::write(&path, r#"{"allowed_extensions": ["png"]}"#).unwrap();
        let config = load_config(&path).unwrap();
        assert!(config.accepts("x.PNG"));
        assert!(!config.accepts("x.jpg"));
    }

    #[test]
    fn test_load_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(load_config(&missing), Err(ConfigError::Io { .. })));

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{ not json").unwrap();
        assert!(matches!(load_config(&bad), Err(ConfigError::Parse { .. })));
    }
}
