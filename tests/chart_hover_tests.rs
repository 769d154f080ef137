use std::cell::RefCell;
use std::rc::Rc;

use minichart_rs::api::{ChartWidget, ChartWidgetConfig};
use minichart_rs::core::{
    ChartId, HostBounds, SeriesDataset, SeriesSpec, VisibleBounds, WindowRect,
};
use minichart_rs::interaction::PointerEvent;
use minichart_rs::platform::{Clock, ManualClock, ManualScheduler};
use minichart_rs::render::{Color, LayerKind, Primitive};
use minichart_rs::state::Action;

struct Fixture {
    widget: ChartWidget,
    clock: Rc<ManualClock>,
}

fn fixture() -> Fixture {
    let dataset = SeriesDataset::new(
        vec![0, 1, 2, 3, 4],
        vec![
            SeriesSpec::new(
                "a",
                "Joined",
                Color::from_rgb8(63, 151, 231),
                vec![0.0, 10.0, 5.0, 10.0, 0.0],
            ),
            SeriesSpec::new(
                "b",
                "Left",
                Color::from_rgb8(231, 100, 63),
                vec![2.0, 4.0, 6.0, 4.0, 2.0],
            ),
        ],
    )
    .expect("valid dataset");

    let config = ChartWidgetConfig::new(
        ChartId::new(1),
        HostBounds::new(0.0, 0.0, 500.0, 300.0),
        HostBounds::new(0.0, 0.0, 500.0, 80.0),
    );
    let clock = Rc::new(ManualClock::new());
    let mut widget = ChartWidget::with_platform(
        config,
        dataset,
        Rc::new(RefCell::new(ManualScheduler::new())),
        clock.clone() as Rc<dyn Clock>,
    )
    .expect("widget init");

    // Show the full range so chart coordinates land on 125px multiples.
    widget.dispatch(Action::SetVisibleBounds {
        chart: ChartId::new(1),
        bounds: VisibleBounds::new(0, 5, WindowRect::new(0.0, 0.0, 500.0, 80.0)),
    });

    Fixture { widget, clock }
}

fn tooltip_rect(widget: &ChartWidget) -> Option<(f64, f64)> {
    widget
        .chart()
        .surface()
        .layer_scene(LayerKind::Tooltip)
        .and_then(|scene| {
            scene.iter().find_map(|primitive| match primitive {
                Primitive::Rect(rect) => Some((rect.x, rect.width)),
                _ => None,
            })
        })
}

#[test]
fn pointer_near_a_sample_selects_its_index() {
    let mut fixture = fixture();
    fixture.clock.advance(16);
    fixture
        .widget
        .on_chart_pointer_move(PointerEvent::new(252.0, 100.0));

    assert_eq!(fixture.widget.chart().hover_index(), Some(2));

    let hover_scene = fixture
        .widget
        .chart()
        .surface()
        .layer_scene(LayerKind::Hover)
        .expect("hover layer exists");
    // Crosshair line plus one dot per active series.
    let circles = hover_scene
        .iter()
        .filter(|primitive| matches!(primitive, Primitive::Circle(_)))
        .count();
    assert_eq!(circles, 2);
}

#[test]
fn pointer_far_from_every_sample_clears_the_hover() {
    let mut fixture = fixture();
    fixture.clock.advance(16);
    fixture
        .widget
        .on_chart_pointer_move(PointerEvent::new(60.0, 100.0));

    assert_eq!(fixture.widget.chart().hover_index(), None);
    assert_eq!(tooltip_rect(&fixture.widget), None);
}

#[test]
fn tooltip_flips_left_at_the_chart_edge() {
    let mut fixture = fixture();
    fixture.clock.advance(16);
    fixture
        .widget
        .on_chart_pointer_move(PointerEvent::new(498.0, 100.0));

    assert_eq!(fixture.widget.chart().hover_index(), Some(4));
    let (x, width) = tooltip_rect(&fixture.widget).expect("tooltip drawn");
    assert!(x + width <= 500.0);
    assert!(width >= 100.0);
}

#[test]
fn pointer_leave_clears_hover_layers_only() {
    let mut fixture = fixture();
    fixture.widget.pump_to_idle(64);
    fixture.clock.advance(16);
    fixture
        .widget
        .on_chart_pointer_move(PointerEvent::new(252.0, 100.0));
    fixture.widget.on_chart_pointer_leave();

    let chart = fixture.widget.chart();
    assert_eq!(
        chart.surface().layer_scene(LayerKind::Hover),
        Some(&[][..])
    );
    assert_eq!(
        chart.surface().layer_scene(LayerKind::Tooltip),
        Some(&[][..])
    );
    // The series scene survives the pointer leaving.
    assert!(
        !chart
            .surface()
            .layer_scene(LayerKind::Series)
            .expect("series layer exists")
            .is_empty()
    );
}

#[test]
fn nearest_candidate_wins_inside_the_threshold() {
    let mut fixture = fixture();
    fixture.clock.advance(16);
    // 130 is 5px from coordinate 125 only; index 1 must win.
    fixture
        .widget
        .on_chart_pointer_move(PointerEvent::new(130.0, 100.0));
    assert_eq!(fixture.widget.chart().hover_index(), Some(1));
}
