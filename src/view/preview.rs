//! Miniature full-range chart with the draggable selection window.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::animation::{AnimationChannel, ChannelAnimator, blend_series};
use crate::core::{
    ActiveSeries, ChartId, GeometrySnapshot, MIN_WINDOW_WIDTH, SeriesDataset, VisibleBounds,
    WindowRect, active_columns, max_across_series, to_points, x_coordinates,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{
    BORDER_THRESHOLD, CursorStyle, DragTransform, HoverZone, POINTER_THROTTLE_MS, PointerEvent,
    PointerEventKind, PointerState, classify_hover, resize_window_left, resize_window_right,
    transform_for, translate_window,
};
use crate::platform::{Clock, FrameScheduler, SurfaceMetrics, Throttle};
use crate::render::{
    CompositeMode, LayerKind, LayeredSurface, LinePrimitive, Primitive, RectPrimitive,
};
use crate::state::{Action, SharedState, StateEvent};
use crate::view::theme::palette_for;

/// Stroke width of the selection-window border; also defines the grab pad.
const BORDER_WIDTH: f64 = 10.0;
/// Initial left inset keeps the border's outer half on the surface.
pub const WINDOW_PADDING: f64 = BORDER_WIDTH / 2.0;
const BACKDROP_STROKE_WIDTH: f64 = 1.0;

/// Full-range overview chart plus the pointer state machine that drives the
/// zoomed chart's visible bounds.
pub struct PreviewView {
    chart_id: ChartId,
    dataset: Rc<SeriesDataset>,
    surface: LayeredSurface,
    clock: Rc<dyn Clock>,
    width: f64,
    height: f64,
    window: WindowRect,
    pointer: PointerState,
    active: ActiveSeries,
    night_mode: bool,
    is_moving: bool,
    current: GeometrySnapshot,
    previous: Option<GeometrySnapshot>,
    window_animator: ChannelAnimator,
    pointer_throttle: Throttle,
    border_threshold: f64,
}

impl PreviewView {
    pub fn new(
        metrics: &dyn SurfaceMetrics,
        dataset: Rc<SeriesDataset>,
        scheduler: Rc<RefCell<dyn FrameScheduler>>,
        clock: Rc<dyn Clock>,
        chart_id: ChartId,
        state: &SharedState,
        initial_window_width: f64,
    ) -> ChartResult<Self> {
        let bounds = metrics.bounding_box();
        if !bounds.is_valid() {
            return Err(ChartError::InvalidData(format!(
                "preview host bounds must be positive, got {}x{}",
                bounds.width, bounds.height
            )));
        }
        if initial_window_width < MIN_WINDOW_WIDTH {
            return Err(ChartError::InvalidData(format!(
                "initial window width {initial_window_width} is below the minimum {MIN_WINDOW_WIDTH}"
            )));
        }

        let ui = state.chart(chart_id).ok_or_else(|| {
            ChartError::InvalidData(format!(
                "chart {} is not registered on the state channel",
                chart_id.value()
            ))
        })?;

        let mut surface = LayeredSurface::new(metrics, scheduler);
        surface.create_layer(LayerKind::Backdrop);
        surface.create_layer(LayerKind::Window);
        surface.set_layer_composite(LayerKind::Window, CompositeMode::DestinationOver);
        for event in [
            PointerEventKind::Move,
            PointerEventKind::Down,
            PointerEventKind::Up,
            PointerEventKind::Leave,
        ] {
            surface.bind_handler(LayerKind::Window, event);
        }

        let border_threshold = BORDER_THRESHOLD * surface.device_pixel_ratio();
        let mut view = Self {
            chart_id,
            dataset,
            surface,
            clock,
            width: bounds.width,
            height: bounds.height,
            window: WindowRect::new(WINDOW_PADDING, 0.0, initial_window_width, bounds.height),
            pointer: PointerState::default(),
            active: ui.active.clone(),
            night_mode: state.night_mode,
            is_moving: ui.is_moving,
            current: GeometrySnapshot::default(),
            previous: None,
            window_animator: ChannelAnimator::new(),
            pointer_throttle: Throttle::new(POINTER_THROTTLE_MS),
            border_threshold,
        };

        view.recompute_geometry();
        view.previous = None;
        view.surface.schedule_frame(AnimationChannel::WindowScene);
        Ok(view)
    }

    /// Bounds derived from the freshly constructed window; the runtime
    /// commits these before the main chart first paints.
    #[must_use]
    pub fn initial_visible_bounds(&self) -> VisibleBounds {
        self.slice_visible_part()
    }

    /// State-channel callback; events for other charts are ignored.
    pub fn on_state_change(&mut self, event: &StateEvent, state: &SharedState) {
        if !event.target.matches(self.chart_id) {
            return;
        }
        let Some(ui) = state.chart(self.chart_id) else {
            return;
        };

        self.active = ui.active.clone();
        self.night_mode = state.night_mode;
        self.is_moving = ui.is_moving;

        self.recompute_geometry();
        self.window_animator.reset();

        // One fresh frame replaces whatever transition was in flight; while
        // dragging, that frame snaps and never reschedules.
        self.surface.cancel_all_animations();
        self.surface.schedule_frame(AnimationChannel::WindowScene);
    }

    /// Advances the window-scene channel by one frame.
    pub fn advance_channel(&mut self, channel: AnimationChannel) {
        if channel != AnimationChannel::WindowScene {
            return;
        }

        let snap = self.is_moving;
        let progress = if snap {
            1.0
        } else {
            self.window_animator.progress()
        };
        self.draw_backdrop(progress, snap);
        self.draw_window();
        if !snap && self.window_animator.advance() {
            self.surface.schedule_frame(AnimationChannel::WindowScene);
        }
    }

    /// Pointer-move over the window layer.
    ///
    /// Returns the actions to dispatch; the runtime owns the bus.
    pub fn on_pointer_move(&mut self, event: PointerEvent) -> Vec<Action> {
        if !self.pointer_throttle.allow(self.clock.now_millis()) {
            return Vec::new();
        }

        // The zone is frozen while the button is held so a fast drag cannot
        // slip off a border mid-gesture.
        if !self.pointer.mouse_down || self.pointer.hover == HoverZone::None {
            self.pointer.hover = classify_hover(event.x, self.window, self.border_threshold);
        }
        self.pointer.transform = transform_for(self.pointer.hover);

        if !self.pointer.mouse_down {
            return Vec::new();
        }

        self.pointer.prev_position = self.pointer.position;
        self.pointer.position = event.position();
        let delta = self.pointer.mouse_delta();

        let previous_window = self.window;
        self.window = match self.pointer.transform {
            Some(DragTransform::Move) => translate_window(self.window, delta, self.width),
            Some(DragTransform::ResizeLeft) => {
                resize_window_left(self.window, delta, MIN_WINDOW_WIDTH)
            }
            Some(DragTransform::ResizeRight) => {
                resize_window_right(self.window, delta, self.width, MIN_WINDOW_WIDTH)
            }
            None => self.window,
        };

        if self.window == previous_window {
            return Vec::new();
        }

        trace!(
            x = self.window.x,
            width = self.window.width,
            "selection window dragged"
        );
        vec![Action::SetVisibleBounds {
            chart: self.chart_id,
            bounds: self.slice_visible_part(),
        }]
    }

    pub fn on_pointer_down(&mut self, event: PointerEvent) -> Vec<Action> {
        self.pointer.mouse_down = true;
        self.pointer.position = event.position();
        self.pointer.prev_position = event.position();
        self.pointer.hover = classify_hover(event.x, self.window, self.border_threshold);
        self.pointer.transform = transform_for(self.pointer.hover);
        self.toggle_moving(true)
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.pointer.reset();
        self.toggle_moving(false)
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.pointer.reset();
        self.toggle_moving(false)
    }

    /// Cursor the host should show for the current hover zone.
    #[must_use]
    pub fn cursor(&self) -> CursorStyle {
        CursorStyle::for_zone(self.pointer.hover)
    }

    #[must_use]
    pub fn window(&self) -> WindowRect {
        self.window
    }

    #[must_use]
    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    #[must_use]
    pub fn surface(&self) -> &LayeredSurface {
        &self.surface
    }

    #[must_use]
    pub fn geometry(&self) -> &GeometrySnapshot {
        &self.current
    }

    /// Maps the window's pixel range back into dataset indices using the
    /// preview's own coordinate table.
    #[must_use]
    pub fn slice_visible_part(&self) -> VisibleBounds {
        let coords = &self.current.x_coords;
        let len = self.dataset.len();
        let from_index = coords
            .iter()
            .position(|x| *x >= self.window.x)
            .unwrap_or(len);
        let to_index = coords
            .iter()
            .position(|x| *x >= self.window.right())
            .unwrap_or(len);

        VisibleBounds::new(from_index, to_index, self.window)
    }

    /// Emits a moving-state action only on edge transitions, never on every
    /// pointer event while already in that state.
    fn toggle_moving(&self, moving: bool) -> Vec<Action> {
        if moving == self.is_moving {
            return Vec::new();
        }
        debug!(chart = self.chart_id.value(), moving, "moving state edge");
        vec![Action::ToggleMovingState {
            chart: self.chart_id,
            moving,
        }]
    }

    /// Full-range geometry: identity x scale, global max.
    fn recompute_geometry(&mut self) {
        let timestamps = self.dataset.timestamps();
        let x_coords = x_coordinates(self.width, timestamps, 1.0, 0.0);

        let columns = active_columns(&self.active, self.dataset.columns());
        let full: Vec<&[f64]> = columns.iter().map(|(_, values)| *values).collect();
        let max_value = max_across_series(&full);

        let points = columns
            .iter()
            .map(|(id, values)| {
                (
                    (*id).clone(),
                    to_points(&x_coords, self.height, max_value, values),
                )
            })
            .collect();

        let next = GeometrySnapshot {
            x_coords,
            points,
            max_value,
            local_max_value: max_value,
            y_coords: Vec::new(),
        };
        self.previous = Some(std::mem::replace(&mut self.current, next));
    }

    fn draw_backdrop(&mut self, progress: f64, snap: bool) {
        self.surface.clear_layer(LayerKind::Backdrop);

        let baseline = self.height;
        for (id, points) in &self.current.points {
            let Some(color) = self.dataset.color(id) else {
                continue;
            };
            let prev = self
                .previous
                .as_ref()
                .and_then(|snapshot| snapshot.points.get(id))
                .map(Vec::as_slice);
            let blended = blend_series(prev, points, baseline, progress, snap);

            for pair in blended.windows(2) {
                self.surface.push(
                    LayerKind::Backdrop,
                    Primitive::Line(LinePrimitive::new(
                        pair[0].x,
                        pair[0].y,
                        pair[1].x,
                        pair[1].y,
                        BACKDROP_STROKE_WIDTH,
                        color,
                    )),
                );
            }
        }
    }

    /// Window border first, side overlays after; the layer composites
    /// destination-over so the overlays render beneath the border.
    fn draw_window(&mut self) {
        self.surface.clear_layer(LayerKind::Window);
        let palette = palette_for(self.night_mode);

        self.surface.push(
            LayerKind::Window,
            Primitive::Rect(
                RectPrimitive::filled(
                    self.window.x,
                    self.window.y,
                    self.window.width,
                    self.window.height,
                    crate::render::Color::transparent(),
                )
                .with_border(palette.window_border, BORDER_WIDTH),
            ),
        );

        let left_width = self.window.x.max(0.0);
        if left_width > 0.0 {
            self.surface.push(
                LayerKind::Window,
                Primitive::Rect(RectPrimitive::filled(
                    0.0,
                    0.0,
                    left_width,
                    self.height,
                    palette.overlay,
                )),
            );
        }

        let right_start = self.window.right();
        let right_width = (self.width - right_start).max(0.0);
        if right_width > 0.0 {
            self.surface.push(
                LayerKind::Window,
                Primitive::Rect(RectPrimitive::filled(
                    right_start,
                    0.0,
                    right_width,
                    self.height,
                    palette.overlay,
                )),
            );
        }
    }
}
