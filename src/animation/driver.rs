//! Tick-counted interpolation between geometry snapshots.

use crate::animation::easing::ease_out_quart;
use crate::core::Point;

/// Frames per discrete transition.
pub const TICK_COUNT: u32 = 30;

/// Per-channel tick state: Idle -> Running(0..=TICK_COUNT) -> Idle.
///
/// The animator only tracks progress; frame scheduling and the
/// single-live-handle invariant live in the layered surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelAnimator {
    iteration: u32,
}

impl ChannelAnimator {
    #[must_use]
    pub const fn new() -> Self {
        Self { iteration: 0 }
    }

    /// Eased progress for the current iteration, in `[0, 1]`.
    #[must_use]
    pub fn progress(self) -> f64 {
        ease_out_quart(f64::from(self.iteration) / f64::from(TICK_COUNT))
    }

    /// Steps to the next iteration.
    ///
    /// Returns `true` while another frame should be scheduled; once the tick
    /// budget is exhausted the counter resets to 0 and `false` is returned.
    pub fn advance(&mut self) -> bool {
        self.iteration += 1;
        if self.iteration <= TICK_COUNT {
            true
        } else {
            self.iteration = 0;
            false
        }
    }

    pub fn reset(&mut self) {
        self.iteration = 0;
    }

    #[must_use]
    pub fn iteration(self) -> u32 {
        self.iteration
    }
}

/// Linear blend between a previous and a next scalar.
#[must_use]
pub fn blend(prev: f64, next: f64, progress: f64) -> f64 {
    prev + (next - prev) * progress
}

/// Blends one point, growing in from the baseline when no previous point
/// exists (first paint, or a series that was just activated).
#[must_use]
pub fn blend_point(prev: Option<Point>, next: Point, baseline: f64, progress: f64) -> Point {
    match prev {
        Some(prev) => Point::new(
            blend(prev.x, next.x, progress),
            blend(prev.y, next.y, progress),
        ),
        None => Point::new(next.x, baseline - (baseline - next.y) * progress),
    }
}

/// Blends a whole series against its previous rendition.
///
/// Points are matched by index; indices past the previous length grow in.
/// `snap` bypasses interpolation entirely — continuous drags must track the
/// pointer 1:1, not eased.
#[must_use]
pub fn blend_series(
    prev: Option<&[Point]>,
    next: &[Point],
    baseline: f64,
    progress: f64,
    snap: bool,
) -> Vec<Point> {
    if snap {
        return next.to_vec();
    }

    next.iter()
        .enumerate()
        .map(|(index, point)| {
            let previous = prev.and_then(|points| points.get(index)).copied();
            blend_point(previous, *point, baseline, progress)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{ChannelAnimator, TICK_COUNT, blend_point, blend_series};
    use crate::core::Point;

    #[test]
    fn animator_runs_for_tick_count_frames_then_resets() {
        let mut animator = ChannelAnimator::new();
        assert_eq!(animator.progress(), 0.0);

        let mut reschedules = 0;
        while animator.advance() {
            reschedules += 1;
        }
        assert_eq!(reschedules, TICK_COUNT);
        assert_eq!(animator.iteration(), 0);
    }

    #[test]
    fn grow_in_starts_at_baseline_and_ends_at_target() {
        let target = Point::new(10.0, 40.0);
        let start = blend_point(None, target, 200.0, 0.0);
        let end = blend_point(None, target, 200.0, 1.0);
        assert_eq!(start.y, 200.0);
        assert_eq!(end.y, 40.0);
        assert_eq!(start.x, 10.0);
    }

    #[test]
    fn snap_ignores_previous_points() {
        let prev = vec![Point::new(0.0, 0.0)];
        let next = vec![Point::new(5.0, 50.0)];
        let blended = blend_series(Some(&prev), &next, 100.0, 0.0, true);
        assert_eq!(blended, next);
    }

    #[test]
    fn midpoint_blend_is_halfway() {
        let prev = vec![Point::new(0.0, 0.0)];
        let next = vec![Point::new(10.0, 20.0)];
        let blended = blend_series(Some(&prev), &next, 100.0, 0.5, false);
        assert_eq!(blended[0], Point::new(5.0, 10.0));
    }
}
