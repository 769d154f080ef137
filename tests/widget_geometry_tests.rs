use minichart_rs::api::{ChartWidget, ChartWidgetConfig};
use minichart_rs::core::{
    ChartId, HostBounds, STROKE_TOP_PADDING, SeriesDataset, SeriesSpec, VisibleBounds, WindowRect,
};
use minichart_rs::render::Color;
use minichart_rs::state::Action;

fn dataset() -> SeriesDataset {
    SeriesDataset::new(
        vec![0, 1, 2, 3, 4],
        vec![SeriesSpec::new(
            "a",
            "Joined",
            Color::from_rgb8(63, 151, 231),
            vec![0.0, 10.0, 5.0, 10.0, 0.0],
        )],
    )
    .expect("valid dataset")
}

fn widget() -> ChartWidget {
    let config = ChartWidgetConfig::new(
        ChartId::new(1),
        HostBounds::new(0.0, 0.0, 500.0, 300.0),
        HostBounds::new(0.0, 0.0, 500.0, 80.0),
    );
    ChartWidget::new(config, dataset()).expect("widget init")
}

fn show_full_range(widget: &mut ChartWidget) {
    widget.dispatch(Action::SetVisibleBounds {
        chart: ChartId::new(1),
        bounds: VisibleBounds::new(0, 5, WindowRect::new(0.0, 0.0, 500.0, 80.0)),
    });
}

#[test]
fn full_range_geometry_spans_the_chart_width() {
    let mut widget = widget();
    show_full_range(&mut widget);

    let geometry = widget.chart().geometry();
    assert_eq!(geometry.max_value, 10.0);
    assert_eq!(geometry.local_max_value, 10.0);
    assert_eq!(geometry.x_coords, vec![0.0, 125.0, 250.0, 375.0, 500.0]);
    assert!(
        geometry
            .x_coords
            .windows(2)
            .all(|pair| pair[0] < pair[1])
    );
}

#[test]
fn max_value_sample_touches_the_top_boundary() {
    let mut widget = widget();
    show_full_range(&mut widget);

    let geometry = widget.chart().geometry();
    let points = geometry
        .points
        .get(&minichart_rs::core::SeriesId::new("a"))
        .expect("active series projected");
    assert_eq!(points[1].y, STROKE_TOP_PADDING);
    assert_eq!(points[0].y, widget.chart().chart_height());
}

#[test]
fn zoomed_window_stretches_the_coordinate_table() {
    let mut widget = widget();
    widget.dispatch(Action::SetVisibleBounds {
        chart: ChartId::new(1),
        bounds: VisibleBounds::new(1, 3, WindowRect::new(125.0, 0.0, 125.0, 80.0)),
    });

    let geometry = widget.chart().geometry();
    // scale = 500 / 125 = 4: the table spans four chart widths.
    assert_eq!(geometry.x_coords[0], -500.0);
    assert_eq!(geometry.x_coords[4], 1500.0);
    // Local max comes from the visible slice only.
    assert_eq!(geometry.local_max_value, 10.0);
}

#[test]
fn toggling_all_series_off_yields_an_empty_chart() {
    let mut widget = widget();
    widget.toggle_series(minichart_rs::core::SeriesId::new("a"), false);

    let geometry = widget.chart().geometry();
    assert!(geometry.points.is_empty());
    assert_eq!(geometry.max_value, 0.0);

    // Re-enabling grows the series back in from the baseline.
    widget.toggle_series(minichart_rs::core::SeriesId::new("a"), true);
    assert_eq!(widget.chart().geometry().points.len(), 1);
}

#[test]
fn preview_projects_against_the_global_maximum() {
    let widget = widget();
    let geometry = widget.preview().geometry();
    assert_eq!(geometry.max_value, 10.0);
    assert_eq!(geometry.x_coords.len(), 5);
    assert_eq!(geometry.x_coords[0], 0.0);
    assert_eq!(geometry.x_coords[4], 500.0);
}
