//! Virtual-desktop geometry types.
//!
//! All coordinates are physical pixels in the shared virtual-desktop
//! space, where each monitor contributes its own origin offset and the
//! overall origin may be negative (e.g. a monitor left of the primary).

/// A normalized selection rectangle in virtual-desktop pixels.
///
/// Invariant: `x1 <= x2` and `y1 <= y2`, enforced by [`from_drag`].
/// A zero-area rectangle (a click with no drag) is representable and is
/// treated by the pipeline as a cancellation.
///
/// [`from_drag`]: SelectionRect::from_drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl SelectionRect {
    /// Builds a normalized rectangle from a drag anchor and release point,
    /// swapping coordinates as needed so the min/max invariant holds.
    pub fn from_drag(anchor: (i32, i32), release: (i32, i32)) -> Self {
        Self {
            x1: anchor.0.min(release.0),
            y1: anchor.1.min(release.1),
            x2: anchor.0.max(release.0),
            y2: anchor.1.max(release.1),
        }
    }

    pub fn width(&self) -> u32 {
        (self.x2 - self.x1) as u32
    }

    pub fn height(&self) -> u32 {
        (self.y2 - self.y1) as u32
    }

    /// True for rectangles with no area (x1 == x2 or y1 == y2).
    /// These must never reach the capturer or the OCR engine.
    pub fn is_degenerate(&self) -> bool {
        self.x1 == self.x2 || self.y1 == self.y2
    }
}

/// The union bounding box of all attached monitors.
///
/// Recomputed on every capture: monitors can be attached or detached
/// between runs, so this is never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesktopBounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl DesktopBounds {
    /// Computes the union box from `(x, y, width, height)` monitor tuples.
    /// Returns `None` when the iterator is empty (no displays).
    pub fn from_monitors(monitors: impl IntoIterator<Item = (i32, i32, u32, u32)>) -> Option<Self> {
        let mut bounds: Option<Self> = None;
        for (x, y, w, h) in monitors {
            let (right, bottom) = (x + w as i32, y + h as i32);
            bounds = Some(match bounds {
                None => Self {
                    min_x: x,
                    min_y: y,
                    max_x: right,
                    max_y: bottom,
                },
                Some(b) => Self {
                    min_x: b.min_x.min(x),
                    min_y: b.min_y.min(y),
                    max_x: b.max_x.max(right),
                    max_y: b.max_y.max(bottom),
                },
            });
        }
        bounds
    }

    pub fn width(&self) -> u32 {
        (self.max_x - self.min_x) as u32
    }

    pub fn height(&self) -> u32 {
        (self.max_y - self.min_y) as u32
    }
}
