//! Text recognition.
//!
//! The pipeline treats OCR as a black box behind [`TextRecognizer`]: one
//! call, no retries. The production engine shells out to an external
//! tesseract binary; tests substitute a canned recognizer.

pub mod engine;

pub use engine::TesseractEngine;

use image::RgbaImage;

use crate::error::SnipError;

/// Seam between the extraction pipeline and the OCR engine.
pub trait TextRecognizer {
    /// Recognizes text in the image. The returned string may be empty;
    /// any engine failure surfaces as [`SnipError::Ocr`].
    fn recognize(&self, image: &RgbaImage) -> Result<String, SnipError>;
}
