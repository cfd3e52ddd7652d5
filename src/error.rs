//! Error taxonomy for the capture/OCR pipeline.
//!
//! All three variants are recoverable: the pipeline reports them to the
//! user and resets to Idle. User cancellation is not an error and never
//! produces one of these.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnipError {
    /// No monitors reported by the platform.
    #[error("no display attached")]
    NoDisplay,

    /// The platform denied or failed a screen capture.
    #[error("screen capture failed: {0}")]
    Capture(String),

    /// The OCR engine is unavailable or failed on the given image.
    #[error("text recognition failed: {0}")]
    Ocr(String),
}
