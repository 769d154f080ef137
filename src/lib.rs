//! minichart-rs: interactive time-series chart engine.
//!
//! This crate implements the rendering and interaction core of a lightweight
//! chart widget: a layered drawing surface, a pure coordinate-mapping
//! pipeline, a tick-driven animation driver, and the pointer state machine
//! behind a draggable overview window that controls the zoomed main chart.
//! Host integrations supply a frame scheduler, a clock and surface metrics,
//! and consume backend-agnostic render frames.

pub mod animation;
pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod platform;
pub mod render;
pub mod state;
pub mod telemetry;
pub mod view;

pub use api::{ChartWidget, ChartWidgetConfig};
pub use error::{ChartError, ChartResult};
