//! Full-desktop snapshot capture and cropping via xcap.

use image::{RgbaImage, imageops};
use xcap::Monitor;

use crate::error::SnipError;
use crate::geometry::{DesktopBounds, SelectionRect};

use super::ScreenSource;

/// Captures screen regions by compositing per-monitor frames into one
/// virtual-desktop snapshot, then cropping to the selection.
pub struct DesktopCapturer;

impl ScreenSource for DesktopCapturer {
    fn desktop_bounds(&self) -> Result<DesktopBounds, SnipError> {
        let monitors = Monitor::all().map_err(|e| SnipError::Capture(e.to_string()))?;

        DesktopBounds::from_monitors(
            monitors
                .iter()
                .map(|m| (m.x(), m.y(), m.width(), m.height())),
        )
        .ok_or(SnipError::NoDisplay)
    }

    fn capture_region(
        &self,
        bounds: DesktopBounds,
        rect: SelectionRect,
    ) -> Result<RgbaImage, SnipError> {
        let monitors = Monitor::all().map_err(|e| SnipError::Capture(e.to_string()))?;
        if monitors.is_empty() {
            return Err(SnipError::NoDisplay);
        }

        // Composite every monitor frame into a snapshot covering the
        // whole virtual desktop, offset so that (min_x, min_y) lands at
        // the snapshot origin.
        let mut snapshot = RgbaImage::new(bounds.width(), bounds.height());
        for monitor in &monitors {
            let frame = monitor
                .capture_image()
                .map_err(|e| SnipError::Capture(e.to_string()))?;
            imageops::overlay(
                &mut snapshot,
                &frame,
                (monitor.x() - bounds.min_x) as i64,
                (monitor.y() - bounds.min_y) as i64,
            );
        }

        tracing::debug!(
            "captured {}x{} desktop snapshot, cropping to {}x{}",
            snapshot.width(),
            snapshot.height(),
            rect.width(),
            rect.height()
        );

        // The snapshot drops here; only the crop survives, bounding peak
        // memory to one full-desktop image per capture.
        Ok(crop_snapshot(&snapshot, bounds, rect))
    }
}

/// Crops a virtual-desktop snapshot to a selection rectangle.
///
/// The rectangle is translated into snapshot-local coordinates by
/// subtracting the bounds origin, then clamped to the snapshot so a
/// selection that overhangs the desktop edge cannot panic.
pub fn crop_snapshot(
    snapshot: &RgbaImage,
    bounds: DesktopBounds,
    rect: SelectionRect,
) -> RgbaImage {
    let x = (rect.x1 - bounds.min_x).max(0) as u32;
    let y = (rect.y1 - bounds.min_y).max(0) as u32;
    let w = rect.width().min(snapshot.width().saturating_sub(x));
    let h = rect.height().min(snapshot.height().saturating_sub(y));

    imageops::crop_imm(snapshot, x, y, w, h).to_image()
}
