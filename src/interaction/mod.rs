//! Pointer input model: hover classification, drag transforms and the
//! window-geometry math behind the preview's selection window.

use serde::{Deserialize, Serialize};

use crate::core::{Point, WindowRect};

/// Distance from a window border, in css pixels, that still counts as
/// hovering that border. Scaled by the device pixel ratio at the call site.
pub const BORDER_THRESHOLD: f64 = 10.0;

/// Minimum interval between processed pointer-move events.
pub const POINTER_THROTTLE_MS: u64 = 10;

/// Input kinds a layer can bind. Touch input maps onto the same kinds
/// (touch-start -> `Down`, touch-move -> `Move`, touch-end/cancel -> `Up`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerEventKind {
    Move,
    Down,
    Up,
    Enter,
    Leave,
}

/// One pointer sample in surface-local css pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn position(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Pointer position relative to the selection window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HoverZone {
    #[default]
    None,
    LeftBorder,
    RightBorder,
    Inner,
}

/// Active drag mode while the pointer is down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragTransform {
    Move,
    ResizeLeft,
    ResizeRight,
}

/// Cursor shape the host should apply over the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorStyle {
    #[default]
    Default,
    ResizeEw,
    Grab,
}

impl CursorStyle {
    #[must_use]
    pub fn for_zone(zone: HoverZone) -> Self {
        match zone {
            HoverZone::LeftBorder | HoverZone::RightBorder => CursorStyle::ResizeEw,
            HoverZone::Inner => CursorStyle::Grab,
            HoverZone::None => CursorStyle::Default,
        }
    }
}

/// Mutable pointer-interaction state owned by the preview view.
///
/// Reset to idle on pointer-up or pointer-leave.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub mouse_down: bool,
    pub hover: HoverZone,
    pub transform: Option<DragTransform>,
    pub position: Point,
    pub prev_position: Point,
}

impl PointerState {
    #[must_use]
    pub fn mouse_delta(&self) -> f64 {
        self.position.x - self.prev_position.x
    }

    pub fn reset(&mut self) {
        self.mouse_down = false;
        self.hover = HoverZone::None;
        self.transform = None;
    }
}

/// Classifies the pointer against the window edges.
///
/// Precedence when zones overlap on a narrow window: right border, then
/// left border, then inner.
#[must_use]
pub fn classify_hover(pointer_x: f64, window: WindowRect, border_threshold: f64) -> HoverZone {
    let right = window.right();
    if (right - border_threshold..=right + border_threshold).contains(&pointer_x) {
        HoverZone::RightBorder
    } else if (window.x - border_threshold..=window.x + border_threshold).contains(&pointer_x) {
        HoverZone::LeftBorder
    } else if pointer_x > window.x && pointer_x < right {
        HoverZone::Inner
    } else {
        HoverZone::None
    }
}

#[must_use]
pub fn transform_for(zone: HoverZone) -> Option<DragTransform> {
    match zone {
        HoverZone::LeftBorder => Some(DragTransform::ResizeLeft),
        HoverZone::RightBorder => Some(DragTransform::ResizeRight),
        HoverZone::Inner => Some(DragTransform::Move),
        HoverZone::None => None,
    }
}

/// Translates the window, clamped so it never leaves the surface.
#[must_use]
pub fn translate_window(window: WindowRect, delta_x: f64, surface_width: f64) -> WindowRect {
    let max_x = (surface_width - window.width).max(0.0);
    WindowRect {
        x: (window.x + delta_x).clamp(0.0, max_x),
        ..window
    }
}

/// Drags the left border: the right edge stays fixed, the width clamps at
/// `min_width` and the left edge never leaves the surface.
#[must_use]
pub fn resize_window_left(window: WindowRect, delta_x: f64, min_width: f64) -> WindowRect {
    let right = window.right();
    let x = (window.x + delta_x).clamp(0.0, right - min_width);
    WindowRect {
        x,
        width: right - x,
        ..window
    }
}

/// Drags the right border: the left edge stays fixed, the width clamps at
/// `min_width` and the right edge never passes the surface edge.
#[must_use]
pub fn resize_window_right(
    window: WindowRect,
    delta_x: f64,
    surface_width: f64,
    min_width: f64,
) -> WindowRect {
    let max_width = (surface_width - window.x).max(min_width);
    WindowRect {
        width: (window.width + delta_x).clamp(min_width, max_width),
        ..window
    }
}
