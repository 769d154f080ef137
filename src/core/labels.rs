//! Axis and tooltip label helpers.

use chrono::{DateTime, Utc};

/// Gap kept between adjacent x-axis labels when computing density.
pub const LABEL_GUTTER: f64 = 40.0;

/// Short date label for x-axis ticks, e.g. `Mar 4`.
#[must_use]
pub fn date_label(unix_millis: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(unix_millis) {
        Some(date) => date.format("%b %-d").to_string(),
        None => String::new(),
    }
}

/// Tooltip date label with weekday, e.g. `Wed, Mar 4`.
#[must_use]
pub fn date_label_with_weekday(unix_millis: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(unix_millis) {
        Some(date) => date.format("%a, %b %-d").to_string(),
        None => String::new(),
    }
}

/// Abbreviates large values for grid and tooltip labels (`1.2K`, `3.4M`).
#[must_use]
pub fn abbreviate_number(value: f64) -> String {
    let abs = value.abs();
    let (scaled, suffix) = if abs >= 1_000_000_000.0 {
        (value / 1_000_000_000.0, "B")
    } else if abs >= 1_000_000.0 {
        (value / 1_000_000.0, "M")
    } else if abs >= 1_000.0 {
        (value / 1_000.0, "K")
    } else {
        return trim_decimal(value);
    };

    format!("{}{suffix}", trim_decimal((scaled * 10.0).round() / 10.0))
}

fn trim_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

/// Deterministic, backend-independent text width estimate.
///
/// Per-character advance classes keep label layout stable across renderer
/// backends; the floor guards degenerate one-character labels.
#[must_use]
pub fn estimate_label_width(text: &str, font_size_px: f64) -> f64 {
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' => 0.34,
            '-' | '+' | '%' => 0.42,
            ' ' => 0.33,
            _ => 0.58,
        }
    });
    (units * font_size_px).max(font_size_px)
}

/// Mean rendered width of every date label in the dataset.
///
/// Computed once at view construction and reused for label thinning.
#[must_use]
pub fn average_label_width(timestamps: &[i64], font_size_px: f64) -> f64 {
    if timestamps.is_empty() {
        return font_size_px;
    }

    let total: f64 = timestamps
        .iter()
        .map(|ts| estimate_label_width(&date_label(*ts), font_size_px))
        .sum();
    (total / timestamps.len() as f64).round()
}

/// Index stride so at most the number of labels that fit are drawn.
#[must_use]
pub fn label_step(visible_len: usize, layer_width: f64, average_width: f64) -> usize {
    let max_per_axis = (layer_width / (average_width + LABEL_GUTTER)).round();
    if max_per_axis < 1.0 {
        return visible_len.max(1);
    }

    ((visible_len as f64 / max_per_axis).round() as usize).max(1)
}
