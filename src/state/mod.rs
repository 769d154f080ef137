//! Shared UI state bus: a closed action set with dispatch/commit semantics
//! and synchronous publish/subscribe delivery.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{ActiveSeries, ChartId, SeriesId, VisibleBounds};

/// Addressee of one state event: a specific chart or every chart on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventTarget {
    Chart(ChartId),
    All,
}

impl EventTarget {
    #[must_use]
    pub fn matches(self, chart: ChartId) -> bool {
        match self {
            EventTarget::Chart(id) => id == chart,
            EventTarget::All => true,
        }
    }
}

/// Every mutation the bus accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    SetVisibleBounds {
        chart: ChartId,
        bounds: VisibleBounds,
    },
    ToggleActiveSeries {
        chart: ChartId,
        series: SeriesId,
        active: bool,
    },
    ToggleMovingState {
        chart: ChartId,
        moving: bool,
    },
    ToggleNightMode {
        night: bool,
    },
}

impl Action {
    #[must_use]
    pub fn target(&self) -> EventTarget {
        match self {
            Action::SetVisibleBounds { chart, .. }
            | Action::ToggleActiveSeries { chart, .. }
            | Action::ToggleMovingState { chart, .. } => EventTarget::Chart(*chart),
            Action::ToggleNightMode { .. } => EventTarget::All,
        }
    }
}

/// Published to every subscriber after a successful commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateEvent {
    pub target: EventTarget,
    pub action: Action,
}

/// Per-chart UI state slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartUiState {
    pub visible_bounds: VisibleBounds,
    pub active: ActiveSeries,
    pub is_moving: bool,
}

impl ChartUiState {
    #[must_use]
    pub fn new(visible_bounds: VisibleBounds, active: ActiveSeries) -> Self {
        Self {
            visible_bounds,
            active,
            is_moving: false,
        }
    }
}

/// State shared by every view on the bus.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SharedState {
    pub night_mode: bool,
    charts: IndexMap<ChartId, ChartUiState>,
}

impl SharedState {
    #[must_use]
    pub fn chart(&self, id: ChartId) -> Option<&ChartUiState> {
        self.charts.get(&id)
    }
}

type Subscriber = Box<dyn FnMut(&StateEvent, &SharedState)>;

/// Dispatch/commit store with synchronous publish/subscribe.
///
/// Subscribers run on every commit, in subscription order; id filtering is
/// each subscriber's own concern. Views never mutate the state directly —
/// everything goes through `dispatch`.
pub struct StateChannel {
    state: SharedState,
    subscribers: Vec<Subscriber>,
}

impl StateChannel {
    #[must_use]
    pub fn new(night_mode: bool) -> Self {
        Self {
            state: SharedState {
                night_mode,
                charts: IndexMap::new(),
            },
            subscribers: Vec::new(),
        }
    }

    pub fn register_chart(&mut self, id: ChartId, ui: ChartUiState) {
        self.state.charts.insert(id, ui);
    }

    #[must_use]
    pub fn state(&self) -> &SharedState {
        &self.state
    }

    pub fn subscribe(&mut self, subscriber: Subscriber) {
        self.subscribers.push(subscriber);
    }

    /// Commits the action and publishes the resulting event synchronously.
    ///
    /// Actions for unregistered charts are dropped: a stale event for a
    /// removed chart is not an error.
    pub fn dispatch(&mut self, action: Action) -> Option<StateEvent> {
        if !self.commit(&action) {
            return None;
        }

        let event = StateEvent {
            target: action.target(),
            action,
        };

        let state = &self.state;
        for subscriber in &mut self.subscribers {
            subscriber(&event, state);
        }
        Some(event)
    }

    fn commit(&mut self, action: &Action) -> bool {
        match action {
            Action::SetVisibleBounds { chart, bounds } => {
                let Some(ui) = self.state.charts.get_mut(chart) else {
                    warn!(chart = chart.value(), "set-visible-bounds for unknown chart");
                    return false;
                };
                debug!(
                    chart = chart.value(),
                    from = bounds.from_index,
                    to = bounds.to_index,
                    "set visible bounds"
                );
                ui.visible_bounds = *bounds;
            }
            Action::ToggleActiveSeries {
                chart,
                series,
                active,
            } => {
                let Some(ui) = self.state.charts.get_mut(chart) else {
                    warn!(chart = chart.value(), "toggle-series for unknown chart");
                    return false;
                };
                debug!(chart = chart.value(), series = %series, active, "toggle series");
                ui.active.set(series.clone(), *active);
            }
            Action::ToggleMovingState { chart, moving } => {
                let Some(ui) = self.state.charts.get_mut(chart) else {
                    warn!(chart = chart.value(), "toggle-moving for unknown chart");
                    return false;
                };
                debug!(chart = chart.value(), moving, "toggle moving state");
                ui.is_moving = *moving;
            }
            Action::ToggleNightMode { night } => {
                debug!(night, "toggle night mode");
                self.state.night_mode = *night;
            }
        }
        true
    }
}
