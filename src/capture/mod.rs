//! Screen geometry and capture.
//!
//! This module provides:
//! - Virtual-desktop bounds enumeration (`ScreenSource::desktop_bounds`)
//! - Region capture with snapshot compositing and cropping
//!   (`ScreenSource::capture_region`)

pub mod screenshot;

pub use screenshot::{DesktopCapturer, crop_snapshot};

use image::RgbaImage;

use crate::error::SnipError;
use crate::geometry::{DesktopBounds, SelectionRect};

/// Seam between the extraction pipeline and the platform screen.
///
/// The production implementation is [`DesktopCapturer`]; tests substitute
/// a synthetic source so the pipeline runs without a display.
pub trait ScreenSource {
    /// Bounding box of the virtual desktop across all attached displays.
    /// Must enumerate fresh on every call; monitor layout is not cached.
    fn desktop_bounds(&self) -> Result<DesktopBounds, SnipError>;

    /// Captures `rect` (expressed in the same coordinate space as
    /// `bounds`) and returns exactly that region as an image.
    fn capture_region(
        &self,
        bounds: DesktopBounds,
        rect: SelectionRect,
    ) -> Result<RgbaImage, SnipError>;
}
