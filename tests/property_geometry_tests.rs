use approx::assert_relative_eq;
use minichart_rs::animation::ease_out_quart;
use minichart_rs::core::{STROKE_TOP_PADDING, WindowRect, to_points, x_coordinates};
use minichart_rs::interaction::{resize_window_left, resize_window_right, translate_window};
use proptest::prelude::*;

fn ascending_timestamps() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(0i64..1_000_000_000, 1..64).prop_map(|mut raw| {
        raw.sort_unstable();
        raw
    })
}

proptest! {
    #[test]
    fn x_coordinates_are_non_decreasing(
        timestamps in ascending_timestamps(),
        layer_width in 10.0f64..4000.0,
    ) {
        let coords = x_coordinates(layer_width, &timestamps, 1.0, 0.0);
        prop_assert_eq!(coords.len(), timestamps.len());
        prop_assert!(coords.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn x_coordinates_stay_non_decreasing_under_zoom(
        timestamps in ascending_timestamps(),
        scale in 1.0f64..20.0,
        offset in 0.0f64..500.0,
    ) {
        let coords = x_coordinates(800.0, &timestamps, scale, offset);
        prop_assert!(coords.windows(2).all(|pair| pair[0] <= pair[1]));
        prop_assert_relative_eq(coords[0], -offset * scale);
    }

    #[test]
    fn points_stay_inside_the_layer(
        values in prop::collection::vec(0.0f64..10_000.0, 1..64),
        layer_height in 50.0f64..2000.0,
    ) {
        let max = values.iter().copied().fold(0.0_f64, f64::max);
        let x_coords: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();
        let points = to_points(&x_coords, layer_height, max, &values);

        for point in points {
            prop_assert!(point.y >= STROKE_TOP_PADDING - 0.01);
            prop_assert!(point.y <= layer_height + 0.01);
        }
    }

    #[test]
    fn to_points_is_pure(
        values in prop::collection::vec(0.0f64..10_000.0, 1..32),
    ) {
        let x_coords: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();
        let first = to_points(&x_coords, 300.0, 10_000.0, &values);
        let second = to_points(&x_coords, 300.0, 10_000.0, &values);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn window_transforms_respect_every_clamp(
        x in 0.0f64..450.0,
        width in 50.0f64..400.0,
        delta in -2000.0f64..2000.0,
    ) {
        let surface_width = 500.0;
        let window = WindowRect::new(x.min(surface_width - width), 0.0, width, 80.0);

        let moved = translate_window(window, delta, surface_width);
        prop_assert!(moved.x >= 0.0);
        prop_assert!(moved.right() <= surface_width + 1e-9);
        prop_assert_eq!(moved.width, window.width);

        let left = resize_window_left(window, delta, 50.0);
        prop_assert!(left.width >= 50.0 - 1e-9);
        prop_assert!(left.x >= 0.0);
        prop_assert_relative_eq(left.right(), window.right());

        let right = resize_window_right(window, delta, surface_width, 50.0);
        prop_assert!(right.width >= 50.0 - 1e-9);
        prop_assert!(right.right() <= surface_width + 1e-9);
        prop_assert_eq!(right.x, window.x);
    }

    #[test]
    fn easing_stays_inside_the_unit_interval(t in -2.0f64..3.0) {
        let eased = ease_out_quart(t);
        prop_assert!((0.0..=1.0).contains(&eased));
    }
}

fn prop_assert_relative_eq(left: f64, right: f64) {
    // Coordinate tables round to 2 decimal places, so allow that much slack.
    assert_relative_eq!(left, right, epsilon = 0.01);
}
