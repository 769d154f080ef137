//! Main chart view: animated series strokes, axes, hover crosshair and
//! tooltip.

use std::cell::RefCell;
use std::rc::Rc;

use ordered_float::OrderedFloat;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::animation::{AnimationChannel, ChannelAnimator, blend, blend_series};
use crate::core::labels::{
    abbreviate_number, average_label_width, date_label, date_label_with_weekday,
    estimate_label_width, label_step,
};
use crate::core::{
    ActiveSeries, ChartId, GeometrySnapshot, SeriesDataset, VisibleBounds, active_columns,
    max_across_series, to_points, x_coordinates, y_coordinates,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{POINTER_THROTTLE_MS, PointerEvent, PointerEventKind};
use crate::platform::{Clock, FrameScheduler, SurfaceMetrics, Throttle};
use crate::render::{
    CirclePrimitive, LayerKind, LayeredSurface, LinePrimitive, Primitive, RectPrimitive,
    TextHAlign, TextPrimitive,
};
use crate::state::{SharedState, StateEvent};
use crate::view::theme::{Palette, palette_for};

/// Vertical space reserved under the plot for x-axis labels.
const TICK_RESERVED_HEIGHT: f64 = 15.0;
const TICK_FONT_SIZE: f64 = 11.0;
const Y_FONT_SIZE: f64 = 9.0;
/// Gap between a grid line and its value label.
const GRID_LABEL_PADDING: f64 = 7.0;

const HOVER_THRESHOLD: f64 = 10.0;
const HOVER_DOT_RADIUS: f64 = 4.0;

const TOOLTIP_FONT_SIZE: f64 = 15.0;
const TOOLTIP_PADDING: f64 = 5.0;
const MIN_TOOLTIP_WIDTH: f64 = 100.0;
const TOOLTIP_HEIGHT: f64 = 80.0;
const TOOLTIP_TOP: f64 = 20.0;
const TOOLTIP_CORNER_RADIUS: f64 = 6.0;
/// Horizontal gap between the crosshair and the tooltip's near edge.
const TOOLTIP_OFFSET: f64 = 20.0;
/// Extra clearance applied when the tooltip flips to the left side.
const TOOLTIP_FLIP_GUTTER: f64 = 40.0;

const SERIES_STROKE_WIDTH: f64 = 2.0;
const AXIS_STROKE_WIDTH: f64 = 1.0;

/// Zoomed main chart bound to one dataset and one chart id on the bus.
pub struct ChartView {
    chart_id: ChartId,
    dataset: Rc<SeriesDataset>,
    surface: LayeredSurface,
    clock: Rc<dyn Clock>,
    width: f64,
    chart_height: f64,
    visible_bounds: VisibleBounds,
    active: ActiveSeries,
    night_mode: bool,
    is_moving: bool,
    current: GeometrySnapshot,
    previous: Option<GeometrySnapshot>,
    scene_animator: ChannelAnimator,
    x_axis_animator: ChannelAnimator,
    y_axis_animator: ChannelAnimator,
    hover_index: Option<usize>,
    pointer_throttle: Throttle,
    average_label_width: f64,
}

impl ChartView {
    pub fn new(
        metrics: &dyn SurfaceMetrics,
        dataset: Rc<SeriesDataset>,
        scheduler: Rc<RefCell<dyn FrameScheduler>>,
        clock: Rc<dyn Clock>,
        chart_id: ChartId,
        state: &SharedState,
    ) -> ChartResult<Self> {
        let bounds = metrics.bounding_box();
        if !bounds.is_valid() {
            return Err(ChartError::InvalidData(format!(
                "chart host bounds must be positive, got {}x{}",
                bounds.width, bounds.height
            )));
        }

        let ui = state.chart(chart_id).ok_or_else(|| {
            ChartError::InvalidData(format!(
                "chart {} is not registered on the state channel",
                chart_id.value()
            ))
        })?;

        let mut surface = LayeredSurface::new(metrics, scheduler);
        for kind in [
            LayerKind::Grid,
            LayerKind::Series,
            LayerKind::XAxis,
            LayerKind::Hover,
            LayerKind::Tooltip,
        ] {
            surface.create_layer(kind);
        }
        surface.bind_handler(LayerKind::Tooltip, PointerEventKind::Move);
        surface.bind_handler(LayerKind::Tooltip, PointerEventKind::Leave);

        let mut view = Self {
            chart_id,
            average_label_width: average_label_width(dataset.timestamps(), TICK_FONT_SIZE),
            dataset,
            surface,
            clock,
            width: bounds.width,
            chart_height: bounds.height - TICK_RESERVED_HEIGHT,
            visible_bounds: ui.visible_bounds,
            active: ui.active.clone(),
            night_mode: state.night_mode,
            is_moving: ui.is_moving,
            current: GeometrySnapshot::default(),
            previous: None,
            scene_animator: ChannelAnimator::new(),
            x_axis_animator: ChannelAnimator::new(),
            y_axis_animator: ChannelAnimator::new(),
            hover_index: None,
            pointer_throttle: Throttle::new(POINTER_THROTTLE_MS),
        };

        view.recompute_geometry();
        view.previous = None;
        view.schedule_transition();
        Ok(view)
    }

    /// State-channel callback; events for other charts are ignored.
    pub fn on_state_change(&mut self, event: &StateEvent, state: &SharedState) {
        if !event.target.matches(self.chart_id) {
            return;
        }
        let Some(ui) = state.chart(self.chart_id) else {
            return;
        };

        self.visible_bounds = ui.visible_bounds;
        self.active = ui.active.clone();
        self.night_mode = state.night_mode;

        self.recompute_geometry();
        self.scene_animator.reset();
        self.x_axis_animator.reset();
        self.y_axis_animator.reset();

        let was_moving = self.is_moving;
        let now_moving = ui.is_moving;
        self.is_moving = now_moving;

        if now_moving || was_moving {
            // Continuous drag (or its final frame): geometry changes every
            // event, so a competing eased transition would only tear.
            self.surface.cancel_all_animations();
            self.draw_chart_lines(1.0, true);
            self.draw_x_axis(1.0);
            self.draw_y_grid(1.0);
        } else {
            self.schedule_transition();
        }
    }

    /// Advances one animation channel by one frame.
    pub fn advance_channel(&mut self, channel: AnimationChannel) {
        match channel {
            AnimationChannel::ChartScene => {
                let progress = self.scene_animator.progress();
                self.draw_chart_lines(progress, false);
                if self.scene_animator.advance() {
                    self.surface.schedule_frame(AnimationChannel::ChartScene);
                }
            }
            AnimationChannel::XAxis => {
                let progress = self.x_axis_animator.progress();
                self.draw_x_axis(progress);
                if self.x_axis_animator.advance() {
                    self.surface.schedule_frame(AnimationChannel::XAxis);
                }
            }
            AnimationChannel::YAxis => {
                let progress = self.y_axis_animator.progress();
                self.draw_y_grid(progress);
                if self.y_axis_animator.advance() {
                    self.surface.schedule_frame(AnimationChannel::YAxis);
                }
            }
            AnimationChannel::WindowScene => {}
        }
    }

    /// Pointer-move over the tooltip layer: locate the hovered sample and
    /// redraw crosshair + tooltip.
    pub fn on_pointer_move(&mut self, event: PointerEvent) {
        if !self.pointer_throttle.allow(self.clock.now_millis()) {
            return;
        }

        let threshold = HOVER_THRESHOLD * self.surface.device_pixel_ratio();
        let candidates: SmallVec<[(OrderedFloat<f64>, usize); 4]> = self
            .current
            .x_coords
            .iter()
            .enumerate()
            .filter_map(|(index, x)| {
                let distance = (x - event.x).abs();
                (distance <= threshold).then_some((OrderedFloat(distance), index))
            })
            .collect();

        self.hover_index = candidates
            .iter()
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, index)| *index);

        trace!(index = ?self.hover_index, x = event.x, "hover sample resolved");
        self.draw_hover();
    }

    /// Pointer left the chart: hover chrome goes away, the scene stays.
    pub fn on_pointer_leave(&mut self) {
        self.hover_index = None;
        self.surface.clear_layer(LayerKind::Hover);
        self.surface.clear_layer(LayerKind::Tooltip);
    }

    #[must_use]
    pub fn geometry(&self) -> &GeometrySnapshot {
        &self.current
    }

    #[must_use]
    pub fn hover_index(&self) -> Option<usize> {
        self.hover_index
    }

    #[must_use]
    pub fn surface(&self) -> &LayeredSurface {
        &self.surface
    }

    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.is_moving
    }

    #[must_use]
    pub fn chart_height(&self) -> f64 {
        self.chart_height
    }

    fn palette(&self) -> Palette {
        palette_for(self.night_mode)
    }

    fn bounded_height(&self) -> f64 {
        self.chart_height - TICK_FONT_SIZE
    }

    fn schedule_transition(&mut self) {
        self.surface.schedule_frame(AnimationChannel::ChartScene);
        self.surface.schedule_frame(AnimationChannel::XAxis);
        self.surface.schedule_frame(AnimationChannel::YAxis);
    }

    /// Recomputes geometry for the current bounds and active set; the old
    /// snapshot becomes the interpolation source.
    fn recompute_geometry(&mut self) {
        let window = self.visible_bounds.window;
        let scale = if window.width > 0.0 {
            self.width / window.width
        } else {
            1.0
        };

        let timestamps = self.dataset.timestamps();
        let x_coords = x_coordinates(self.width, timestamps, scale, window.x);

        let columns = active_columns(&self.active, self.dataset.columns());
        let full: Vec<&[f64]> = columns.iter().map(|(_, values)| *values).collect();
        let max_value = max_across_series(&full);

        let from = self.visible_bounds.from_index.min(timestamps.len());
        let to = self.visible_bounds.to_index.min(timestamps.len());
        let visible: Vec<&[f64]> = columns
            .iter()
            .map(|(_, values)| &values[from..to.max(from)])
            .collect();
        let local_max = max_across_series(&visible);
        let local_max_value = if local_max > 0.0 { local_max } else { max_value };

        let points = columns
            .iter()
            .map(|(id, values)| {
                (
                    (*id).clone(),
                    to_points(&x_coords, self.chart_height, local_max_value, values),
                )
            })
            .collect();

        let next = GeometrySnapshot {
            x_coords,
            points,
            max_value,
            local_max_value,
            y_coords: y_coordinates(self.bounded_height(), window.height),
        };

        debug!(
            chart = self.chart_id.value(),
            from,
            to,
            max = next.max_value,
            local_max = next.local_max_value,
            "chart geometry recomputed"
        );
        self.previous = Some(std::mem::replace(&mut self.current, next));
    }

    fn draw_chart_lines(&mut self, progress: f64, snap: bool) {
        self.surface.clear_layer(LayerKind::Series);

        let baseline = self.chart_height;
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
                    LayerKind::Series,
                    Primitive::Line(LinePrimitive::new(
                        pair[0].x,
                        pair[0].y,
                        pair[1].x,
                        pair[1].y,
                        SERIES_STROKE_WIDTH,
                        color,
                    )),
                );
            }
        }
    }

    fn draw_x_axis(&mut self, progress: f64) {
        self.surface.clear_layer(LayerKind::XAxis);
        let palette = self.palette();
        let axis_y = self.chart_height - TICK_FONT_SIZE;

        self.surface.push(
            LayerKind::XAxis,
            Primitive::Line(LinePrimitive::new(
                0.0,
                axis_y,
                self.width,
                axis_y,
                AXIS_STROKE_WIDTH,
                palette.axis,
            )),
        );

        let step = label_step(
            self.visible_bounds.index_len().max(1),
            self.width,
            self.average_label_width,
        );
        let timestamps = self.dataset.timestamps();
        let prev_coords = self.previous.as_ref().map(|snapshot| &snapshot.x_coords);

        let mut index = 0;
        while index < self.current.x_coords.len() {
            let target_x = self.current.x_coords[index];
            let x = match prev_coords.and_then(|coords| coords.get(index)) {
                Some(prev_x) => blend(*prev_x, target_x, progress),
                None => target_x,
            };

            // Cull labels that cannot intersect the layer.
            if x > -self.average_label_width && x < self.width + self.average_label_width {
                self.surface.push(
                    LayerKind::XAxis,
                    Primitive::Text(TextPrimitive::new(
                        date_label(timestamps[index]),
                        x,
                        self.chart_height,
                        TICK_FONT_SIZE,
                        palette.font,
                        TextHAlign::Left,
                    )),
                );
            }
            index += step;
        }
    }

    fn draw_y_grid(&mut self, progress: f64) {
        self.surface.clear_layer(LayerKind::Grid);
        let palette = self.palette();
        let steps = self.current.y_coords.len().saturating_sub(1);
        if steps == 0 {
            return;
        }

        let value_step = self.current.local_max_value / steps as f64;
        let prev_coords = self.previous.as_ref().map(|snapshot| &snapshot.y_coords);

        for (index, target_y) in self.current.y_coords.iter().enumerate() {
            let y = match prev_coords.and_then(|coords| coords.get(index)) {
                Some(prev_y) => blend(*prev_y, *target_y, progress),
                None => *target_y,
            };

            self.surface.push(
                LayerKind::Grid,
                Primitive::Line(LinePrimitive::new(
                    0.0,
                    y,
                    self.width,
                    y,
                    AXIS_STROKE_WIDTH,
                    palette.grid_line,
                )),
            );
            self.surface.push(
                LayerKind::Grid,
                Primitive::Text(TextPrimitive::new(
                    abbreviate_number(value_step * index as f64),
                    0.0,
                    y - GRID_LABEL_PADDING,
                    Y_FONT_SIZE,
                    palette.font,
                    TextHAlign::Left,
                )),
            );
        }
    }

    fn draw_hover(&mut self) {
        self.surface.clear_layer(LayerKind::Hover);

        let Some(index) = self.hover_index else {
            self.surface.clear_layer(LayerKind::Tooltip);
            return;
        };
        let Some(x) = self.current.x_coords.get(index).copied() else {
            self.surface.clear_layer(LayerKind::Tooltip);
            return;
        };

        let palette = self.palette();
        self.surface.push(
            LayerKind::Hover,
            Primitive::Line(LinePrimitive::new(
                x,
                0.0,
                x,
                self.chart_height - TICK_FONT_SIZE,
                AXIS_STROKE_WIDTH,
                palette.hover_line,
            )),
        );

        for (id, points) in &self.current.points {
            let Some(point) = points.get(index) else {
                continue;
            };
            let Some(color) = self.dataset.color(id) else {
                continue;
            };
            self.surface.push(
                LayerKind::Hover,
                Primitive::Circle(CirclePrimitive::new(
                    x,
                    point.y,
                    HOVER_DOT_RADIUS,
                    HOVER_DOT_RADIUS,
                    color,
                    palette.dot_fill,
                )),
            );
        }

        self.draw_tooltip(index, x);
    }

    fn draw_tooltip(&mut self, index: usize, anchor_x: f64) {
        self.surface.clear_layer(LayerKind::Tooltip);
        let palette = self.palette();

        let tooltip_width = self.tooltip_width(index);
        let mut x = anchor_x + TOOLTIP_OFFSET;
        if x + tooltip_width > self.width {
            x -= tooltip_width + TOOLTIP_FLIP_GUTTER;
        }
        let y = TOOLTIP_TOP;

        self.surface.push(
            LayerKind::Tooltip,
            Primitive::Rect(
                RectPrimitive::filled(x, y, tooltip_width, TOOLTIP_HEIGHT, palette.tooltip_background)
                    .with_border(palette.tooltip_border, 1.0)
                    .with_corner_radius(TOOLTIP_CORNER_RADIUS),
            ),
        );

        let timestamps = self.dataset.timestamps();
        if let Some(timestamp) = timestamps.get(index) {
            self.surface.push(
                LayerKind::Tooltip,
                Primitive::Text(TextPrimitive::new(
                    date_label_with_weekday(*timestamp),
                    x + TOOLTIP_PADDING,
                    y + 25.0,
                    TOOLTIP_FONT_SIZE,
                    palette.tooltip_text,
                    TextHAlign::Left,
                )),
            );
        }

        let mut offset = TOOLTIP_PADDING;
        for (id, values) in self.dataset.columns() {
            if !self.active.is_active(id) {
                continue;
            }
            let (Some(value), Some(color), Some(name)) = (
                values.get(index),
                self.dataset.color(id),
                self.dataset.name(id),
            ) else {
                continue;
            };

            let value_text = abbreviate_number(*value);
            let advance = estimate_label_width(&value_text, TOOLTIP_FONT_SIZE);
            self.surface.push(
                LayerKind::Tooltip,
                Primitive::Text(TextPrimitive::new(
                    value_text,
                    x + offset,
                    y + 50.0,
                    TOOLTIP_FONT_SIZE,
                    color,
                    TextHAlign::Left,
                )),
            );
            self.surface.push(
                LayerKind::Tooltip,
                Primitive::Text(TextPrimitive::new(
                    name,
                    x + offset,
                    y + 70.0,
                    TOOLTIP_FONT_SIZE,
                    color,
                    TextHAlign::Left,
                )),
            );
            offset += advance + TOOLTIP_PADDING;
        }
    }

    /// Tooltip width sized to the rendered value labels, floored at the
    /// minimum.
    fn tooltip_width(&self, index: usize) -> f64 {
        let mut width = 0.0;
        let mut count = 0;
        for (id, values) in self.dataset.columns() {
            if !self.active.is_active(id) {
                continue;
            }
            if let Some(value) = values.get(index) {
                width += estimate_label_width(&abbreviate_number(*value), TOOLTIP_FONT_SIZE);
                count += 1;
            }
        }

        let total = width.round() + TOOLTIP_PADDING * (count + 1) as f64;
        total.max(MIN_TOOLTIP_WIDTH)
    }
}
