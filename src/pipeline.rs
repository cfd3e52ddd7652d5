//! The extraction pipeline: Selector → Capturer → OCR → history/output.
//!
//! State machine: Idle → Selecting → (cancel → Idle | PreviewConfirm)
//! → (discard → Idle | Extracting) → Idle. Exactly one pipeline exists
//! and all transitions happen on the GUI thread, so the Idle guard in
//! [`ExtractionPipeline::request_capture`] is the only synchronization
//! point between the button, hotkey, and tray triggers.

use image::RgbaImage;

use crate::capture::ScreenSource;
use crate::clipboard::TextSink;
use crate::error::SnipError;
use crate::geometry::SelectionRect;
use crate::history::HistoryStore;
use crate::ocr::TextRecognizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// No capture flow in flight.
    Idle,
    /// Selection overlay is open, waiting for a drag or cancel.
    Selecting,
    /// A cropped capture is held, waiting for confirm or discard.
    PreviewConfirm,
    /// OCR is running; not cancellable.
    Extracting,
}

/// Orchestrates one capture flow at a time over the three seams.
pub struct ExtractionPipeline<S, R, C> {
    screen: S,
    ocr: R,
    clipboard: C,
    state: PipelineState,
    /// The cropped capture, held only between PreviewConfirm and
    /// confirm/discard.
    pending: Option<RgbaImage>,
    output: String,
    history: HistoryStore,
    last_error: Option<String>,
}

impl<S, R, C> ExtractionPipeline<S, R, C>
where
    S: ScreenSource,
    R: TextRecognizer,
    C: TextSink,
{
    pub fn new(screen: S, ocr: R, clipboard: C) -> Self {
        Self {
            screen,
            ocr,
            clipboard,
            state: PipelineState::Idle,
            pending: None,
            output: String::new(),
            history: HistoryStore::new(),
            last_error: None,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// The capture awaiting confirm/discard, if any.
    pub fn pending_image(&self) -> Option<&RgbaImage> {
        self.pending.as_ref()
    }

    /// The most recent unreported error, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    /// Starts a capture flow. All three triggers (button, hotkey, tray)
    /// call this with no arguments; a call while a flow is already in
    /// flight is ignored, not queued.
    ///
    /// Returns whether a new flow was started.
    pub fn request_capture(&mut self) -> bool {
        if self.state != PipelineState::Idle {
            tracing::debug!("capture requested while {:?}, ignoring", self.state);
            return false;
        }
        tracing::info!("capture flow started");
        self.state = PipelineState::Selecting;
        true
    }

    /// User cancelled the selection overlay (Escape or window close).
    /// Not an error: no message, no side effects.
    pub fn cancel_selection(&mut self) {
        if self.state == PipelineState::Selecting {
            tracing::info!("selection cancelled");
            self.state = PipelineState::Idle;
        }
    }

    /// The selection could not even start (e.g. no display to place the
    /// overlay on). Reported like any other pipeline error.
    pub fn abort_selection(&mut self, error: SnipError) {
        if self.state == PipelineState::Selecting {
            self.report(error);
            self.state = PipelineState::Idle;
        }
    }

    /// The overlay finished with a rectangle. A degenerate (zero-area)
    /// rectangle is treated as a cancellation: it never reaches the
    /// capturer or the OCR engine.
    pub fn finish_selection(&mut self, rect: SelectionRect) {
        if self.state != PipelineState::Selecting {
            return;
        }

        if rect.is_degenerate() {
            tracing::info!("zero-area selection, treating as cancel");
            self.state = PipelineState::Idle;
            return;
        }

        // Bounds are re-queried per capture; monitors may have changed.
        let captured = self
            .screen
            .desktop_bounds()
            .and_then(|bounds| self.screen.capture_region(bounds, rect));

        match captured {
            Ok(image) => {
                tracing::info!("captured {}x{} region", image.width(), image.height());
                self.pending = Some(image);
                self.state = PipelineState::PreviewConfirm;
            }
            Err(e) => {
                self.report(e);
                self.state = PipelineState::Idle;
            }
        }
    }

    /// User discarded the preview; the capture is released, no OCR runs.
    pub fn discard_preview(&mut self) {
        if self.state == PipelineState::PreviewConfirm {
            tracing::info!("preview discarded");
            self.pending = None;
            self.state = PipelineState::Idle;
        }
    }

    /// User confirmed the preview: run OCR, then update output, history,
    /// and the clipboard. On OCR failure the prior output and history are
    /// left untouched.
    pub fn confirm_extract(&mut self) {
        if self.state != PipelineState::PreviewConfirm {
            return;
        }
        let Some(image) = self.pending.take() else {
            self.state = PipelineState::Idle;
            return;
        };

        self.state = PipelineState::Extracting;

        match self.ocr.recognize(&image) {
            Ok(text) => {
                let text = text.trim().to_string();
                tracing::info!("extracted {} chars", text.len());

                // Archive the previous output before overwriting, so the
                // history holds exactly one record per completed prior
                // session and never the just-produced text.
                if !self.output.trim().is_empty() {
                    self.history.archive(self.output.trim());
                }
                self.output = text;

                if let Err(e) = self.clipboard.set_text(&self.output) {
                    tracing::warn!("clipboard write failed: {e}");
                }
            }
            Err(e) => self.report(e),
        }

        self.state = PipelineState::Idle;
    }

    /// Copies the current output to the clipboard (the GUI copy button).
    pub fn copy_output(&mut self) {
        if self.output.is_empty() {
            return;
        }
        let text = self.output.clone();
        if let Err(e) = self.clipboard.set_text(&text) {
            tracing::warn!("clipboard write failed: {e}");
        }
    }

    fn report(&mut self, error: SnipError) {
        tracing::error!("{error}");
        self.last_error = Some(error.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::DesktopBounds;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct FakeScreen {
        bounds: Result<DesktopBounds, ()>,
        capture_fails: bool,
        captures: Rc<RefCell<u32>>,
    }

    impl FakeScreen {
        fn new() -> Self {
            Self {
                bounds: Ok(DesktopBounds {
                    min_x: 0,
                    min_y: 0,
                    max_x: 1920,
                    max_y: 1080,
                }),
                capture_fails: false,
                captures: Rc::new(RefCell::new(0)),
            }
        }
    }

    impl ScreenSource for FakeScreen {
        fn desktop_bounds(&self) -> Result<DesktopBounds, SnipError> {
            self.bounds.map_err(|_| SnipError::NoDisplay)
        }

        fn capture_region(
            &self,
            bounds: DesktopBounds,
            rect: SelectionRect,
        ) -> Result<RgbaImage, SnipError> {
            *self.captures.borrow_mut() += 1;
            if self.capture_fails {
                return Err(SnipError::Capture("denied".to_string()));
            }
            let x = (rect.x1 - bounds.min_x) as u32;
            let y = (rect.y1 - bounds.min_y) as u32;
            assert!(x + rect.width() <= bounds.width());
            assert!(y + rect.height() <= bounds.height());
            Ok(RgbaImage::new(rect.width(), rect.height()))
        }
    }

    struct FakeOcr {
        result: Result<String, String>,
        calls: Rc<RefCell<u32>>,
    }

    impl FakeOcr {
        fn returning(text: &str) -> Self {
            Self {
                result: Ok(text.to_string()),
                calls: Rc::new(RefCell::new(0)),
            }
        }

        fn failing(msg: &str) -> Self {
            Self {
                result: Err(msg.to_string()),
                calls: Rc::new(RefCell::new(0)),
            }
        }
    }

    impl TextRecognizer for FakeOcr {
        fn recognize(&self, _image: &RgbaImage) -> Result<String, SnipError> {
            *self.calls.borrow_mut() += 1;
            self.result
                .clone()
                .map_err(|e| SnipError::Ocr(e.to_string()))
        }
    }

    #[derive(Default)]
    struct FakeClipboard {
        contents: Rc<RefCell<Option<String>>>,
    }

    impl TextSink for FakeClipboard {
        fn set_text(&mut self, text: &str) -> anyhow::Result<()> {
            *self.contents.borrow_mut() = Some(text.to_string());
            Ok(())
        }
    }

    fn pipeline_with(
        ocr: FakeOcr,
    ) -> (
        ExtractionPipeline<FakeScreen, FakeOcr, FakeClipboard>,
        Rc<RefCell<Option<String>>>,
        Rc<RefCell<u32>>,
    ) {
        let clipboard = FakeClipboard::default();
        let contents = clipboard.contents.clone();
        let ocr_calls = ocr.calls.clone();
        (
            ExtractionPipeline::new(FakeScreen::new(), ocr, clipboard),
            contents,
            ocr_calls,
        )
    }

    fn run_full_extraction(
        pipeline: &mut ExtractionPipeline<FakeScreen, FakeOcr, FakeClipboard>,
        rect: SelectionRect,
    ) {
        assert!(pipeline.request_capture());
        pipeline.finish_selection(rect);
        pipeline.confirm_extract();
    }

    #[test]
    fn test_successful_extraction_updates_output_and_clipboard() {
        let (mut pipeline, clipboard, _) = pipeline_with(FakeOcr::returning("Hello World\n"));

        run_full_extraction(&mut pipeline, SelectionRect::from_drag((100, 100), (400, 250)));

        assert_eq!(pipeline.state(), PipelineState::Idle);
        assert_eq!(pipeline.output(), "Hello World");
        assert_eq!(clipboard.borrow().as_deref(), Some("Hello World"));
        // Prior output was empty: no history record.
        assert!(pipeline.history().is_empty());
        assert!(pipeline.last_error().is_none());
    }

    #[test]
    fn test_capture_has_selection_dimensions() {
        let (mut pipeline, _, _) = pipeline_with(FakeOcr::returning("x"));

        assert!(pipeline.request_capture());
        pipeline.finish_selection(SelectionRect::from_drag((100, 100), (400, 250)));

        let image = pipeline.pending_image().expect("capture should be held");
        assert_eq!(image.dimensions(), (300, 150));
    }

    #[test]
    fn test_old_output_archived_before_overwrite() {
        let (mut pipeline, _, _) = pipeline_with(FakeOcr::returning("A"));
        run_full_extraction(&mut pipeline, SelectionRect::from_drag((0, 0), (10, 10)));
        assert_eq!(pipeline.output(), "A");
        assert!(pipeline.history().is_empty());

        pipeline.ocr = FakeOcr::returning("B");
        run_full_extraction(&mut pipeline, SelectionRect::from_drag((0, 0), (10, 10)));

        assert_eq!(pipeline.output(), "B");
        assert_eq!(pipeline.history().len(), 1);
        let last = pipeline.history().records().last().unwrap();
        assert_eq!(last.text, "A");
    }

    #[test]
    fn test_zero_area_selection_is_a_no_op() {
        let (mut pipeline, clipboard, ocr_calls) = pipeline_with(FakeOcr::returning("x"));
        let captures = pipeline.screen.captures.clone();

        assert!(pipeline.request_capture());
        pipeline.finish_selection(SelectionRect::from_drag((50, 50), (50, 50)));

        assert_eq!(pipeline.state(), PipelineState::Idle);
        assert_eq!(*captures.borrow(), 0, "capturer must not run");
        assert_eq!(*ocr_calls.borrow(), 0, "OCR must not run");
        assert!(pipeline.history().is_empty());
        assert!(clipboard.borrow().is_none());
        assert!(pipeline.last_error().is_none());
    }

    #[test]
    fn test_reentrant_capture_request_is_ignored() {
        let (mut pipeline, _, _) = pipeline_with(FakeOcr::returning("x"));

        assert!(pipeline.request_capture());
        assert_eq!(pipeline.state(), PipelineState::Selecting);

        // Second trigger while selecting: no-op, state unchanged.
        assert!(!pipeline.request_capture());
        assert_eq!(pipeline.state(), PipelineState::Selecting);

        pipeline.finish_selection(SelectionRect::from_drag((0, 0), (10, 10)));
        assert_eq!(pipeline.state(), PipelineState::PreviewConfirm);
        assert!(!pipeline.request_capture());
        assert_eq!(pipeline.state(), PipelineState::PreviewConfirm);
        assert!(pipeline.pending_image().is_some());
    }

    #[test]
    fn test_cancel_during_selection_has_no_side_effects() {
        let (mut pipeline, clipboard, ocr_calls) = pipeline_with(FakeOcr::returning("x"));
        let captures = pipeline.screen.captures.clone();

        assert!(pipeline.request_capture());
        pipeline.cancel_selection();

        assert_eq!(pipeline.state(), PipelineState::Idle);
        assert_eq!(*captures.borrow(), 0);
        assert_eq!(*ocr_calls.borrow(), 0);
        assert_eq!(pipeline.output(), "");
        assert!(pipeline.history().is_empty());
        assert!(clipboard.borrow().is_none());
    }

    #[test]
    fn test_discard_preview_skips_ocr() {
        let (mut pipeline, clipboard, ocr_calls) = pipeline_with(FakeOcr::returning("x"));

        assert!(pipeline.request_capture());
        pipeline.finish_selection(SelectionRect::from_drag((0, 0), (20, 20)));
        assert_eq!(pipeline.state(), PipelineState::PreviewConfirm);

        pipeline.discard_preview();

        assert_eq!(pipeline.state(), PipelineState::Idle);
        assert!(pipeline.pending_image().is_none(), "capture released");
        assert_eq!(*ocr_calls.borrow(), 0);
        assert!(clipboard.borrow().is_none());
    }

    #[test]
    fn test_ocr_failure_leaves_output_and_history_untouched() {
        let mut pipeline = ExtractionPipeline {
            screen: FakeScreen::new(),
            ocr: FakeOcr::failing("engine unavailable"),
            clipboard: FakeClipboard::default(),
            state: PipelineState::Idle,
            pending: None,
            output: "previous".to_string(),
            history: HistoryStore::new(),
            last_error: None,
        };

        run_full_extraction(&mut pipeline, SelectionRect::from_drag((0, 0), (10, 10)));

        assert_eq!(pipeline.state(), PipelineState::Idle);
        assert_eq!(pipeline.output(), "previous");
        assert!(pipeline.history().is_empty());

        // Reported exactly once; dismissing clears it.
        assert!(pipeline.last_error().unwrap().contains("engine unavailable"));
        pipeline.dismiss_error();
        assert!(pipeline.last_error().is_none());
    }

    #[test]
    fn test_capture_failure_resets_to_idle() {
        let mut screen = FakeScreen::new();
        screen.capture_fails = true;
        let mut pipeline =
            ExtractionPipeline::new(screen, FakeOcr::returning("x"), FakeClipboard::default());

        assert!(pipeline.request_capture());
        pipeline.finish_selection(SelectionRect::from_drag((0, 0), (10, 10)));

        assert_eq!(pipeline.state(), PipelineState::Idle);
        assert!(pipeline.pending_image().is_none());
        assert!(pipeline.last_error().unwrap().contains("denied"));
    }

    #[test]
    fn test_abort_selection_reports_and_resets() {
        let (mut pipeline, _, _) = pipeline_with(FakeOcr::returning("x"));

        assert!(pipeline.request_capture());
        pipeline.abort_selection(SnipError::NoDisplay);

        assert_eq!(pipeline.state(), PipelineState::Idle);
        assert_eq!(pipeline.last_error(), Some("no display attached"));

        // Outside Selecting the call is a no-op.
        pipeline.dismiss_error();
        pipeline.abort_selection(SnipError::NoDisplay);
        assert!(pipeline.last_error().is_none());
    }

    #[test]
    fn test_no_display_is_reported() {
        let mut screen = FakeScreen::new();
        screen.bounds = Err(());
        let mut pipeline =
            ExtractionPipeline::new(screen, FakeOcr::returning("x"), FakeClipboard::default());

        assert!(pipeline.request_capture());
        pipeline.finish_selection(SelectionRect::from_drag((0, 0), (10, 10)));

        assert_eq!(pipeline.state(), PipelineState::Idle);
        assert_eq!(pipeline.last_error(), Some("no display attached"));
    }

    #[test]
    fn test_whitespace_only_ocr_result_is_not_archived_later() {
        // A run yielding only whitespace leaves an empty output, which
        // must not create a history record on the next extraction.
        let (mut pipeline, _, _) = pipeline_with(FakeOcr::returning("   \n\t"));
        run_full_extraction(&mut pipeline, SelectionRect::from_drag((0, 0), (10, 10)));
        assert_eq!(pipeline.output(), "");

        pipeline.ocr = FakeOcr::returning("C");
        run_full_extraction(&mut pipeline, SelectionRect::from_drag((0, 0), (10, 10)));

        assert_eq!(pipeline.output(), "C");
        assert!(pipeline.history().is_empty());
    }

    #[test]
    fn test_copy_output_writes_clipboard_only_when_nonempty() {
        let (mut pipeline, clipboard, _) = pipeline_with(FakeOcr::returning("x"));

        pipeline.copy_output();
        assert!(clipboard.borrow().is_none());

        run_full_extraction(&mut pipeline, SelectionRect::from_drag((0, 0), (10, 10)));
        *clipboard.borrow_mut() = None;

        pipeline.copy_output();
        assert_eq!(clipboard.borrow().as_deref(), Some("x"));
    }
}
