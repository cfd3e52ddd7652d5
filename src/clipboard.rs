//! System clipboard output.

use anyhow::{Context, Result};

/// Seam for clipboard writes, so the pipeline is testable without a
/// window system.
pub trait TextSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The real clipboard, backed by arboard. Construction is lazy: some
/// environments (headless CI) have no clipboard, and a capture tool
/// should still start there.
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        let inner = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                tracing::warn!("clipboard unavailable: {e}");
                None
            }
        };
        Self { inner }
    }
}

impl TextSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let clipboard = self
            .inner
            .as_mut()
            .context("clipboard was not available at startup")?;
        clipboard
            .set_text(text.to_string())
            .context("failed to write clipboard")
    }
}
