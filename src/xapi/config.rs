//! Select configuration
//!
//! Loaded from a JSON file; every field has a default.
//!
//! ```json
//! { "concurrency": 8, "log_level": "trace", "keep_order": true }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{XapiError, XapiResult};
use crate::observability::{Logger, Severity};

/// Select configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectConfig {
    /// Concurrency hint passed to the transport (default: 10)
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Minimum log severity (default: "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Ask the transport to return chunks in key order (default: false)
    #[serde(default)]
    pub keep_order: bool,
}

fn default_concurrency() -> usize {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            log_level: default_log_level(),
            keep_order: false,
        }
    }
}

impl SelectConfig {
    /// Config with the given concurrency and defaults elsewhere
    pub fn with_concurrency(concurrency: usize) -> Self {
        Self {
            concurrency,
            ..Default::default()
        }
    }

    /// Parses and validates a JSON config
    pub fn from_json(json: &str) -> XapiResult<Self> {
        let config: SelectConfig = serde_json::from_str(json)
            .map_err(|e| XapiError::Config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a JSON config file
    pub fn load(path: &Path) -> XapiResult<Self> {
        let json = fs::read_to_string(path).map_err(|e| {
            XapiError::Config(format!(
                "failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&json)
    }

    /// Checks field constraints
    pub fn validate(&self) -> XapiResult<()> {
        if self.concurrency == 0 {
            return Err(XapiError::Config("concurrency must be at least 1".into()));
        }
        self.severity()?;
        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> XapiResult<Severity> {
        self.log_level.parse().map_err(XapiError::Config)
    }

    /// Applies `log_level` to the process-wide logger
    pub fn apply_logging(&self) -> XapiResult<()> {
        Logger::set_min_severity(self.severity()?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = SelectConfig::default();
        assert_eq!(config.concurrency, 10);
        assert_eq!(config.log_level, "info");
        assert!(!config.keep_order);
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        assert_eq!(SelectConfig::from_json("{}").unwrap(), SelectConfig::default());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let err = SelectConfig::from_json(r#"{"concurrency": 0}"#).unwrap_err();
        assert!(err.to_string().contains("concurrency"));
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        let err = SelectConfig::from_json(r#"{"log_level": "chatty"}"#).unwrap_err();
        assert!(err.to_string().contains("chatty"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"concurrency": 4, "keep_order": true}}"#).unwrap();

        let config = SelectConfig::load(file.path()).unwrap();
        assert_eq!(config.concurrency, 4);
        assert!(config.keep_order);
        assert_eq!(config.severity().unwrap(), Severity::Info);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = SelectConfig::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
