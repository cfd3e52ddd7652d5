//! Application configuration.
//!
//! Loads settings from a `config.json` next to the executable at startup,
//! falling back to defaults for anything missing or unparsable.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Tesseract language code passed with `-l`.
    #[serde(default = "default_language")]
    pub ocr_language: String,

    /// Explicit path to the tesseract executable. When unset the engine
    /// probes PATH and common install locations.
    #[serde(default)]
    pub tesseract_path: Option<PathBuf>,

    /// Whether to register the global Ctrl+Shift+S hotkey.
    #[serde(default = "default_true")]
    pub hotkey_enabled: bool,
}

fn default_language() -> String {
    "eng".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ocr_language: default_language(),
            tesseract_path: None,
            hotkey_enabled: true,
        }
    }
}

impl AppConfig {
    /// Loads configuration from `config.json` in the executable's
    /// directory, or returns defaults when absent or invalid.
    pub fn load() -> Self {
        let config_path = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|p| p.join("config.json")))
            .unwrap_or_else(|| Path::new("config.json").to_path_buf());

        Self::load_from(&config_path)
    }

    fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::info!("no config.json found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("config loaded from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("failed to parse {}: {e}, using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("failed to read {}: {e}, using defaults", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.ocr_language, "eng");
        assert!(config.tesseract_path.is_none());
        assert!(config.hotkey_enabled);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"ocr_language": "deu"}"#).unwrap();
        assert_eq!(config.ocr_language, "deu");
        assert!(config.tesseract_path.is_none());
        assert!(config.hotkey_enabled);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.json"));
        assert_eq!(config.ocr_language, "eng");
    }

    #[test]
    fn test_invalid_json_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();
        let config = AppConfig::load_from(&path);
        assert_eq!(config.ocr_language, "eng");
    }
}
