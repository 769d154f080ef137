use serde::{Deserialize, Serialize};

use crate::core::types::WindowRect;

/// Smallest selection-window width the preview will produce, in css pixels.
pub const MIN_WINDOW_WIDTH: f64 = 50.0;

/// Index range currently shown by the zoomed chart, together with the pixel
/// window that produced it.
///
/// Invariant: `from_index <= to_index <= dataset length`. Consumers use the
/// window rect to derive proportional x/y scaling, so the two always travel
/// together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibleBounds {
    pub from_index: usize,
    pub to_index: usize,
    pub window: WindowRect,
}

impl VisibleBounds {
    #[must_use]
    pub const fn new(from_index: usize, to_index: usize, window: WindowRect) -> Self {
        Self {
            from_index,
            to_index,
            window,
        }
    }

    /// Bounds covering the whole dataset.
    #[must_use]
    pub const fn full_range(len: usize, window: WindowRect) -> Self {
        Self {
            from_index: 0,
            to_index: len,
            window,
        }
    }

    #[must_use]
    pub fn index_len(self) -> usize {
        self.to_index.saturating_sub(self.from_index)
    }
}
