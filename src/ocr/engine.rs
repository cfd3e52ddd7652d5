//! Tesseract-backed OCR engine.
//!
//! Writes the captured region to a temporary PNG and runs the external
//! `tesseract` binary with stdout output. The binary is located at
//! startup (config override first, then PATH, then common install
//! locations); a missing binary is not fatal until an extraction
//! actually runs, where it surfaces as a recoverable OCR error.

use std::path::{Path, PathBuf};
use std::process::Command;

use image::RgbaImage;
use tempfile::NamedTempFile;

use crate::config::AppConfig;
use crate::error::SnipError;

use super::TextRecognizer;

/// Well-known install locations probed after PATH.
const COMMON_PATHS: &[&str] = &[
    r"C:\Program Files\Tesseract-OCR\tesseract.exe",
    r"C:\Program Files (x86)\Tesseract-OCR\tesseract.exe",
    "/usr/bin/tesseract",
    "/usr/local/bin/tesseract",
    "/opt/homebrew/bin/tesseract",
];

pub struct TesseractEngine {
    executable: Option<PathBuf>,
    language: String,
}

impl TesseractEngine {
    /// Locates the tesseract binary and prepares the engine. A binary
    /// that cannot be found is reported per extraction, not at startup.
    pub fn new(config: &AppConfig) -> Self {
        let executable = match locate_tesseract(config.tesseract_path.as_deref()) {
            Ok(path) => {
                tracing::info!("using tesseract at {}", path.display());
                Some(path)
            }
            Err(e) => {
                tracing::warn!("{e}; OCR will fail until tesseract is available");
                None
            }
        };

        Self {
            executable,
            language: config.ocr_language.clone(),
        }
    }
}

impl TextRecognizer for TesseractEngine {
    fn recognize(&self, image: &RgbaImage) -> Result<String, SnipError> {
        let Some(executable) = &self.executable else {
            return Err(SnipError::Ocr(
                "tesseract not found; install Tesseract-OCR or set tesseract_path in config.json"
                    .to_string(),
            ));
        };

        let temp_input = NamedTempFile::with_suffix(".png")
            .map_err(|e| SnipError::Ocr(format!("failed to create temp file: {e}")))?;
        image
            .save(temp_input.path())
            .map_err(|e| SnipError::Ocr(format!("failed to write temp image: {e}")))?;

        let output = Command::new(executable)
            .arg(temp_input.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .arg("--psm")
            .arg("6") // Assume single uniform block of text
            .output()
            .map_err(|e| SnipError::Ocr(format!("failed to run tesseract: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SnipError::Ocr(format!("tesseract failed: {stderr}")));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// Finds the tesseract executable: explicit override, then PATH, then
/// common install paths.
fn locate_tesseract(override_path: Option<&Path>) -> Result<PathBuf, SnipError> {
    if let Some(path) = override_path {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        return Err(SnipError::Ocr(format!(
            "configured tesseract path does not exist: {}",
            path.display()
        )));
    }

    if let Ok(output) = Command::new("tesseract").arg("--version").output() {
        if output.status.success() {
            return Ok(PathBuf::from("tesseract"));
        }
    }

    for path in COMMON_PATHS {
        let p = PathBuf::from(path);
        if p.exists() {
            return Ok(p);
        }
    }

    Err(SnipError::Ocr("tesseract not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_override_path_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-tesseract");

        let err = locate_tesseract(Some(&missing)).unwrap_err();
        assert!(matches!(err, SnipError::Ocr(_)));
        assert!(err.to_string().contains("no-such-tesseract"));
    }

    #[test]
    fn test_existing_override_path_wins() {
        let file = NamedTempFile::new().unwrap();
        let found = locate_tesseract(Some(file.path())).unwrap();
        assert_eq!(found, file.path());
    }

    #[test]
    fn test_engine_without_binary_fails_per_extraction() {
        let engine = TesseractEngine {
            executable: None,
            language: "eng".to_string(),
        };
        let image = RgbaImage::new(4, 4);

        let err = engine.recognize(&image).unwrap_err();
        assert!(matches!(err, SnipError::Ocr(_)));
    }
}
