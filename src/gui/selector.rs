//! Region-selection drag state.
//!
//! The drag anchor and cursor live in an explicit struct with
//! pointer-event methods, so the overlay's behavior is a reviewable
//! state machine rather than mutable locals captured by closures. All
//! coordinates here are virtual-desktop pixels; the overlay viewport
//! converts egui points before calling in.

use crate::geometry::SelectionRect;

#[derive(Debug, Default)]
pub struct RegionSelector {
    /// Where the primary button went down, if a drag is active.
    anchor: Option<(i32, i32)>,
    /// Latest pointer position while dragging.
    cursor: Option<(i32, i32)>,
}

impl RegionSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the drag anchor.
    pub fn pointer_down(&mut self, x: i32, y: i32) {
        self.anchor = Some((x, y));
        self.cursor = Some((x, y));
    }

    /// Updates the live outline; no state transition.
    pub fn pointer_move(&mut self, x: i32, y: i32) {
        if self.anchor.is_some() {
            self.cursor = Some((x, y));
        }
    }

    /// Finalizes the drag into a normalized rectangle, or `None` when no
    /// drag was active (a stray release). Resets the selector either way.
    pub fn pointer_up(&mut self, x: i32, y: i32) -> Option<SelectionRect> {
        let anchor = self.anchor.take()?;
        self.cursor = None;
        Some(SelectionRect::from_drag(anchor, (x, y)))
    }

    /// The rectangle to outline while the drag is in progress.
    pub fn drag_rect(&self) -> Option<SelectionRect> {
        Some(SelectionRect::from_drag(self.anchor?, self.cursor?))
    }

    /// Discards any in-progress drag (cancellation).
    pub fn reset(&mut self) {
        self.anchor = None;
        self.cursor = None;
    }
}
