//! Pure pixel-mapping pipeline.
//!
//! Everything in this module is a stateless transform from raw columnar data
//! to css-pixel geometry. Degenerate inputs (no active series, zero max,
//! zero-span timestamps) produce safe defaults instead of errors so a bad
//! frame can never take down the render loop.

use indexmap::IndexMap;

use crate::core::dataset::ActiveSeries;
use crate::core::types::{Point, SeriesId};

/// Number of horizontal grid intervals on the y axis.
pub const GRID_STEPS: usize = 8;

/// Keeps series strokes off the top edge of the layer.
pub const STROKE_TOP_PADDING: f64 = 5.0;

/// Geometry computed for one (active-series, visible-bounds) pair.
///
/// Each view owns its own `current` and `previous` snapshot; snapshots are
/// never shared between views.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeometrySnapshot {
    pub x_coords: Vec<f64>,
    pub points: IndexMap<SeriesId, Vec<Point>>,
    pub max_value: f64,
    pub local_max_value: f64,
    pub y_coords: Vec<f64>,
}

/// Order-preserving filter of the columns marked active.
#[must_use]
pub fn active_columns<'a>(
    active: &ActiveSeries,
    columns: &'a IndexMap<SeriesId, Vec<f64>>,
) -> Vec<(&'a SeriesId, &'a [f64])> {
    columns
        .iter()
        .filter(|(id, _)| active.is_active(id))
        .map(|(id, values)| (id, values.as_slice()))
        .collect()
}

/// Maximum scalar across the provided series; 0 when none are active.
#[must_use]
pub fn max_across_series(series: &[&[f64]]) -> f64 {
    series
        .iter()
        .flat_map(|values| values.iter().copied())
        .fold(0.0_f64, f64::max)
}

/// Maps timestamps to x pixel positions.
///
/// The pixel base is derived once from the full dataset span, so spacing is
/// visually consistent between the full-range preview and a zoomed window.
/// Zooming is expressed through `scale` (chart width / window width) and
/// `offset` (window left edge on the unscaled table): the first timestamp
/// lands at `-offset * scale` and each step advances proportionally to its
/// timestamp delta. Values are rounded to 2 decimal places.
#[must_use]
pub fn x_coordinates(layer_width: f64, timestamps: &[i64], scale: f64, offset: f64) -> Vec<f64> {
    let Some((&first, &last)) = timestamps.first().zip(timestamps.last()) else {
        return Vec::new();
    };

    let span = (last - first) as f64;
    let base = if span > 0.0 { layer_width / span } else { 0.0 };

    let mut coords = Vec::with_capacity(timestamps.len());
    let mut x = -offset * scale;
    coords.push(round2(x));
    for pair in timestamps.windows(2) {
        let delta = (pair[1] - pair[0]) as f64;
        x += scale * base * delta;
        coords.push(round2(x));
    }
    coords
}

/// Horizontal grid line positions, numerically descending from
/// `chart_height`.
///
/// When the selection window is shorter than the chart, positions compress
/// by the `window_height / chart_height` ratio; grid labels are derived from
/// the local max at draw time and do not affect line placement.
#[must_use]
pub fn y_coordinates(chart_height: f64, window_height: f64) -> Vec<f64> {
    let ratio = if window_height > 0.0 && window_height < chart_height {
        window_height / chart_height
    } else {
        1.0
    };

    let step = chart_height / GRID_STEPS as f64;
    (0..=GRID_STEPS)
        .map(|index| round2(chart_height - index as f64 * step * ratio))
        .collect()
}

/// Converts one value column into pixel points against the given maximum.
///
/// `value == max_value` maps to the top boundary (`STROKE_TOP_PADDING`) and
/// `value == 0` maps to `layer_height`. A zero or negative max is treated as
/// 1 so an all-zero dataset still renders a flat baseline.
#[must_use]
pub fn to_points(
    x_coords: &[f64],
    layer_height: f64,
    max_value: f64,
    values: &[f64],
) -> Vec<Point> {
    let max = if max_value > 0.0 { max_value } else { 1.0 };
    let usable_height = layer_height - STROKE_TOP_PADDING;

    values
        .iter()
        .zip(x_coords)
        .map(|(value, x)| Point::new(*x, round2(layer_height - value * usable_height / max)))
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::{
        GRID_STEPS, STROKE_TOP_PADDING, max_across_series, to_points, x_coordinates,
        y_coordinates,
    };

    #[test]
    fn x_coordinates_span_layer_width_at_identity() {
        let coords = x_coordinates(500.0, &[0, 1, 2, 3, 4], 1.0, 0.0);
        assert_eq!(coords, vec![0.0, 125.0, 250.0, 375.0, 500.0]);
    }

    #[test]
    fn x_coordinates_keep_irregular_spacing_proportional() {
        let coords = x_coordinates(100.0, &[0, 10, 40], 1.0, 0.0);
        assert_eq!(coords, vec![0.0, 25.0, 100.0]);
    }

    #[test]
    fn x_coordinates_apply_zoom_offset() {
        let coords = x_coordinates(100.0, &[0, 1], 2.0, 25.0);
        assert_eq!(coords[0], -50.0);
        assert_eq!(coords[1], 150.0);
    }

    #[test]
    fn x_coordinates_collapse_zero_span() {
        let coords = x_coordinates(100.0, &[7, 7, 7], 1.0, 0.0);
        assert_eq!(coords, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn to_points_maps_extremes_to_boundaries() {
        let points = to_points(&[0.0, 10.0], 200.0, 10.0, &[0.0, 10.0]);
        assert_eq!(points[0].y, 200.0);
        assert_eq!(points[1].y, STROKE_TOP_PADDING);
    }

    #[test]
    fn to_points_guard_zero_max() {
        let points = to_points(&[0.0], 200.0, 0.0, &[0.0]);
        assert!(points[0].y.is_finite());
        assert_eq!(points[0].y, 200.0);
    }

    #[test]
    fn y_coordinates_cover_full_height_unzoomed() {
        let coords = y_coordinates(240.0, 240.0);
        assert_eq!(coords.len(), GRID_STEPS + 1);
        assert_eq!(coords[0], 240.0);
        assert_eq!(coords[GRID_STEPS], 0.0);
        assert!(coords.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn y_coordinates_compress_when_zoomed() {
        let coords = y_coordinates(240.0, 120.0);
        assert_eq!(coords[0], 240.0);
        assert_eq!(coords[GRID_STEPS], 120.0);
    }

    #[test]
    fn max_across_series_defaults_to_zero() {
        assert_eq!(max_across_series(&[]), 0.0);
        assert_eq!(max_across_series(&[&[1.0, 9.0][..], &[4.0][..]]), 9.0);
    }
}
