use serde::{Deserialize, Serialize};

use crate::core::{ChartId, HostBounds, MIN_WINDOW_WIDTH};
use crate::error::{ChartError, ChartResult};

const DEFAULT_WINDOW_WIDTH: f64 = 120.0;

/// Construction parameters for one chart+preview widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartWidgetConfig {
    pub chart_id: ChartId,
    pub chart_bounds: HostBounds,
    pub preview_bounds: HostBounds,
    pub device_pixel_ratio: f64,
    pub initial_window_width: f64,
    pub night_mode: bool,
}

impl ChartWidgetConfig {
    #[must_use]
    pub fn new(chart_id: ChartId, chart_bounds: HostBounds, preview_bounds: HostBounds) -> Self {
        Self {
            chart_id,
            chart_bounds,
            preview_bounds,
            device_pixel_ratio: 1.0,
            initial_window_width: DEFAULT_WINDOW_WIDTH,
            night_mode: false,
        }
    }

    #[must_use]
    pub fn with_device_pixel_ratio(mut self, ratio: f64) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_initial_window_width(mut self, width: f64) -> Self {
        self.initial_window_width = width;
        self
    }

    #[must_use]
    pub fn with_night_mode(mut self, night_mode: bool) -> Self {
        self.night_mode = night_mode;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.chart_bounds.is_valid() {
            return Err(ChartError::InvalidData(
                "chart bounds must be positive".to_owned(),
            ));
        }
        if !self.preview_bounds.is_valid() {
            return Err(ChartError::InvalidData(
                "preview bounds must be positive".to_owned(),
            ));
        }
        if !self.device_pixel_ratio.is_finite() || self.device_pixel_ratio <= 0.0 {
            return Err(ChartError::InvalidData(
                "device pixel ratio must be finite and > 0".to_owned(),
            ));
        }
        if !self.initial_window_width.is_finite() || self.initial_window_width < MIN_WINDOW_WIDTH {
            return Err(ChartError::InvalidData(format!(
                "initial window width must be >= {MIN_WINDOW_WIDTH}"
            )));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::ChartWidgetConfig;
    use crate::core::{ChartId, HostBounds};

    #[test]
    fn narrow_initial_window_is_rejected() {
        let config = ChartWidgetConfig::new(
            ChartId::new(0),
            HostBounds::new(0.0, 0.0, 500.0, 300.0),
            HostBounds::new(0.0, 0.0, 500.0, 80.0),
        )
        .with_initial_window_width(10.0);

        assert!(config.validate().is_err());
    }
}
