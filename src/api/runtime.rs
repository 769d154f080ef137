//! Host-facing orchestration facade.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::animation::AnimationChannel;
use crate::api::ChartWidgetConfig;
use crate::core::{ActiveSeries, ChartId, SeriesDataset, SeriesId, VisibleBounds, WindowRect};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{CursorStyle, PointerEvent, PointerEventKind};
use crate::platform::{Clock, FixedMetrics, FrameScheduler, ManualScheduler, SystemClock};
use crate::render::Renderer;
use crate::state::{Action, ChartUiState, SharedState, StateChannel, StateEvent};
use crate::view::preview::WINDOW_PADDING;
use crate::view::{ChartView, PreviewView};

/// One chart+preview pair wired to a shared state channel.
///
/// The widget owns both views and the bus, routes pointer input, dispatches
/// the actions the views emit, and pumps scheduled animation frames. All of
/// it is single-threaded and cooperative; hosts drive it from their own
/// frame tick.
pub struct ChartWidget {
    chart_id: ChartId,
    store: StateChannel,
    chart: ChartView,
    preview: PreviewView,
    scheduler: Rc<RefCell<dyn FrameScheduler>>,
}

impl ChartWidget {
    /// Builds a widget on a wall clock and a manual scheduler drained via
    /// [`ChartWidget::pump_frames`].
    pub fn new(config: ChartWidgetConfig, dataset: SeriesDataset) -> ChartResult<Self> {
        Self::with_platform(
            config,
            dataset,
            Rc::new(RefCell::new(ManualScheduler::new())),
            Rc::new(SystemClock::new()),
        )
    }

    /// Builds a widget on injected platform services; tests pass a manual
    /// clock so throttling is deterministic.
    pub fn with_platform(
        config: ChartWidgetConfig,
        dataset: SeriesDataset,
        scheduler: Rc<RefCell<dyn FrameScheduler>>,
        clock: Rc<dyn Clock>,
    ) -> ChartResult<Self> {
        let config = config.validate()?;
        let dataset = Rc::new(dataset);
        let chart_id = config.chart_id;

        let mut store = StateChannel::new(config.night_mode);
        let placeholder = WindowRect::new(
            WINDOW_PADDING,
            0.0,
            config.initial_window_width,
            config.preview_bounds.height,
        );
        store.register_chart(
            chart_id,
            ChartUiState::new(
                VisibleBounds::full_range(dataset.len(), placeholder),
                ActiveSeries::all_active(&dataset),
            ),
        );

        let preview_metrics = FixedMetrics::new(config.preview_bounds)
            .with_device_pixel_ratio(config.device_pixel_ratio);
        let preview = PreviewView::new(
            &preview_metrics,
            dataset.clone(),
            scheduler.clone(),
            clock.clone(),
            chart_id,
            store.state(),
            config.initial_window_width,
        )?;

        // Commit the window-derived bounds before the chart measures itself
        // so the first paint already shows the selected slice.
        let initial_bounds = preview.initial_visible_bounds();
        store.dispatch(Action::SetVisibleBounds {
            chart: chart_id,
            bounds: initial_bounds,
        });

        let chart_metrics = FixedMetrics::new(config.chart_bounds)
            .with_device_pixel_ratio(config.device_pixel_ratio);
        let chart = ChartView::new(
            &chart_metrics,
            dataset,
            scheduler.clone(),
            clock,
            chart_id,
            store.state(),
        )?;

        debug!(chart = chart_id.value(), "chart widget constructed");
        Ok(Self {
            chart_id,
            store,
            chart,
            preview,
            scheduler,
        })
    }

    /// Commits an action and delivers the event to both views and every
    /// external subscriber, synchronously.
    pub fn dispatch(&mut self, action: Action) {
        let Some(event) = self.store.dispatch(action) else {
            return;
        };
        self.deliver(&event);
    }

    /// Registers an external observer on the state channel.
    pub fn subscribe(&mut self, subscriber: Box<dyn FnMut(&StateEvent, &SharedState)>) {
        self.store.subscribe(subscriber);
    }

    /// Fires every due animation frame; returns how many fired.
    pub fn pump_frames(&mut self) -> usize {
        let due = self.scheduler.borrow_mut().take_due();
        for frame in &due {
            match frame.channel {
                AnimationChannel::ChartScene | AnimationChannel::XAxis | AnimationChannel::YAxis => {
                    self.chart.advance_channel(frame.channel);
                }
                AnimationChannel::WindowScene => {
                    self.preview.advance_channel(frame.channel);
                }
            }
        }
        due.len()
    }

    /// Pumps until no frames remain, bounded to stay responsive if a
    /// transition keeps rescheduling.
    pub fn pump_to_idle(&mut self, max_rounds: usize) -> usize {
        let mut total = 0;
        for _ in 0..max_rounds {
            let fired = self.pump_frames();
            if fired == 0 {
                break;
            }
            total += fired;
        }
        total
    }

    pub fn on_chart_pointer_move(&mut self, event: PointerEvent) {
        if self
            .chart
            .surface()
            .hit_layer(PointerEventKind::Move)
            .is_none()
        {
            return;
        }
        self.chart.on_pointer_move(event);
    }

    pub fn on_chart_pointer_leave(&mut self) {
        self.chart.on_pointer_leave();
    }

    pub fn on_preview_pointer_down(&mut self, event: PointerEvent) {
        if self
            .preview
            .surface()
            .hit_layer(PointerEventKind::Down)
            .is_none()
        {
            return;
        }
        let actions = self.preview.on_pointer_down(event);
        self.dispatch_all(actions);
    }

    pub fn on_preview_pointer_move(&mut self, event: PointerEvent) {
        if self
            .preview
            .surface()
            .hit_layer(PointerEventKind::Move)
            .is_none()
        {
            return;
        }
        let actions = self.preview.on_pointer_move(event);
        self.dispatch_all(actions);
    }

    pub fn on_preview_pointer_up(&mut self) {
        let actions = self.preview.on_pointer_up();
        self.dispatch_all(actions);
    }

    pub fn on_preview_pointer_leave(&mut self) {
        let actions = self.preview.on_pointer_leave();
        self.dispatch_all(actions);
    }

    /// Enables or disables one series across chart, preview and tooltip.
    pub fn toggle_series(&mut self, series: SeriesId, active: bool) {
        self.dispatch(Action::ToggleActiveSeries {
            chart: self.chart_id,
            series,
            active,
        });
    }

    pub fn set_night_mode(&mut self, night: bool) {
        self.dispatch(Action::ToggleNightMode { night });
    }

    pub fn render_chart(&self, renderer: &mut dyn Renderer) -> ChartResult<()> {
        renderer.render(&self.chart.surface().flatten())
    }

    pub fn render_preview(&self, renderer: &mut dyn Renderer) -> ChartResult<()> {
        renderer.render(&self.preview.surface().flatten())
    }

    #[must_use]
    pub fn state(&self) -> &SharedState {
        self.store.state()
    }

    #[must_use]
    pub fn chart(&self) -> &ChartView {
        &self.chart
    }

    #[must_use]
    pub fn preview(&self) -> &PreviewView {
        &self.preview
    }

    #[must_use]
    pub fn preview_cursor(&self) -> CursorStyle {
        self.preview.cursor()
    }

    /// Pretty JSON snapshot of the shared UI state, for debugging and
    /// persistence layers.
    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self.store.state())
            .map_err(|err| ChartError::InvalidData(format!("state snapshot failed: {err}")))
    }

    fn dispatch_all(&mut self, actions: Vec<Action>) {
        for action in actions {
            self.dispatch(action);
        }
    }

    fn deliver(&mut self, event: &StateEvent) {
        self.chart.on_state_change(event, self.store.state());
        self.preview.on_state_change(event, self.store.state());
    }
}
