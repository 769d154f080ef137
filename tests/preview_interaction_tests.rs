use std::cell::RefCell;
use std::rc::Rc;

use minichart_rs::api::{ChartWidget, ChartWidgetConfig};
use minichart_rs::core::{ChartId, HostBounds, MIN_WINDOW_WIDTH, SeriesDataset, SeriesSpec};
use minichart_rs::interaction::{CursorStyle, PointerEvent};
use minichart_rs::platform::{Clock, ManualClock, ManualScheduler};
use minichart_rs::render::Color;
use minichart_rs::state::Action;

struct Fixture {
    widget: ChartWidget,
    clock: Rc<ManualClock>,
    scheduler: Rc<RefCell<ManualScheduler>>,
}

fn fixture() -> Fixture {
    let dataset = SeriesDataset::new(
        vec![0, 1, 2, 3, 4],
        vec![SeriesSpec::new(
            "a",
            "Joined",
            Color::from_rgb8(63, 151, 231),
            vec![0.0, 10.0, 5.0, 10.0, 0.0],
        )],
    )
    .expect("valid dataset");

    let config = ChartWidgetConfig::new(
        ChartId::new(1),
        HostBounds::new(0.0, 0.0, 500.0, 300.0),
        HostBounds::new(0.0, 0.0, 500.0, 80.0),
    );

    let clock = Rc::new(ManualClock::new());
    let scheduler = Rc::new(RefCell::new(ManualScheduler::new()));
    let widget = ChartWidget::with_platform(
        config,
        dataset,
        scheduler.clone(),
        clock.clone() as Rc<dyn Clock>,
    )
    .expect("widget init");

    Fixture {
        widget,
        clock,
        scheduler,
    }
}

fn drag(fixture: &mut Fixture, from_x: f64, positions: &[f64]) {
    fixture
        .widget
        .on_preview_pointer_down(PointerEvent::new(from_x, 40.0));
    for x in positions {
        fixture.clock.advance(16);
        fixture
            .widget
            .on_preview_pointer_move(PointerEvent::new(*x, 40.0));
    }
    fixture.widget.on_preview_pointer_up();
}

#[test]
fn right_border_drag_widens_without_moving_the_left_edge() {
    let mut fixture = fixture();
    // Initial window: x = 5, width = 120, right border at 125.
    drag(&mut fixture, 125.0, &[175.0]);

    let window = fixture.widget.preview().window();
    assert_eq!(window.width, 170.0);
    assert_eq!(window.x, 5.0);
}

#[test]
fn left_border_drag_past_minimum_clamps_the_width() {
    let mut fixture = fixture();
    drag(&mut fixture, 125.0, &[175.0]);
    // Push the left border far past the right one.
    drag(&mut fixture, 5.0, &[325.0]);

    let window = fixture.widget.preview().window();
    assert_eq!(window.width, MIN_WINDOW_WIDTH);
    assert_eq!(window.right(), 175.0);
}

#[test]
fn move_drag_never_leaves_the_surface() {
    let mut fixture = fixture();
    drag(&mut fixture, 60.0, &[-400.0]);
    assert_eq!(fixture.widget.preview().window().x, 0.0);

    drag(&mut fixture, 60.0, &[900.0]);
    let window = fixture.widget.preview().window();
    assert_eq!(window.right(), 500.0);
    assert_eq!(window.width, 120.0);
}

#[test]
fn moving_state_publishes_only_on_edges() {
    let mut fixture = fixture();
    let toggles = Rc::new(RefCell::new(Vec::new()));
    {
        let toggles = toggles.clone();
        fixture.widget.subscribe(Box::new(move |event, _| {
            if let Action::ToggleMovingState { moving, .. } = event.action {
                toggles.borrow_mut().push(moving);
            }
        }));
    }

    fixture
        .widget
        .on_preview_pointer_down(PointerEvent::new(60.0, 40.0));
    for step in 0..50 {
        fixture.clock.advance(16);
        fixture
            .widget
            .on_preview_pointer_move(PointerEvent::new(61.0 + f64::from(step), 40.0));
    }
    fixture.widget.on_preview_pointer_up();
    // A second release without a press publishes nothing.
    fixture.widget.on_preview_pointer_up();

    assert_eq!(toggles.borrow().as_slice(), &[true, false]);
}

#[test]
fn drag_publishes_visible_bounds_derived_from_the_window() {
    let mut fixture = fixture();
    drag(&mut fixture, 125.0, &[175.0]);

    let state = fixture.widget.state();
    let bounds = state
        .chart(ChartId::new(1))
        .expect("chart registered")
        .visible_bounds;
    // Preview coordinates: [0, 125, 250, 375, 500]; window right edge 175.
    assert_eq!(bounds.from_index, 1);
    assert_eq!(bounds.to_index, 2);
    assert_eq!(bounds.window.width, 170.0);
}

#[test]
fn throttled_moves_are_dropped_not_queued() {
    let mut fixture = fixture();
    fixture
        .widget
        .on_preview_pointer_down(PointerEvent::new(60.0, 40.0));

    fixture.clock.advance(16);
    fixture
        .widget
        .on_preview_pointer_move(PointerEvent::new(80.0, 40.0));
    // Within the 10ms budget: this sample must be ignored entirely.
    fixture.clock.advance(2);
    fixture
        .widget
        .on_preview_pointer_move(PointerEvent::new(400.0, 40.0));

    assert_eq!(fixture.widget.preview().window().x, 25.0);
}

#[test]
fn hover_zones_map_to_cursor_styles() {
    let mut fixture = fixture();
    fixture.clock.advance(16);
    fixture
        .widget
        .on_preview_pointer_move(PointerEvent::new(5.0, 40.0));
    assert_eq!(fixture.widget.preview_cursor(), CursorStyle::ResizeEw);

    fixture.clock.advance(16);
    fixture
        .widget
        .on_preview_pointer_move(PointerEvent::new(60.0, 40.0));
    assert_eq!(fixture.widget.preview_cursor(), CursorStyle::Grab);

    fixture.clock.advance(16);
    fixture
        .widget
        .on_preview_pointer_move(PointerEvent::new(400.0, 40.0));
    assert_eq!(fixture.widget.preview_cursor(), CursorStyle::Default);
}

#[test]
fn drag_keeps_at_most_one_window_frame_pending() {
    let mut fixture = fixture();
    fixture
        .widget
        .on_preview_pointer_down(PointerEvent::new(60.0, 40.0));
    for step in 0..10 {
        fixture.clock.advance(16);
        fixture
            .widget
            .on_preview_pointer_move(PointerEvent::new(70.0 + f64::from(step) * 5.0, 40.0));
    }

    use minichart_rs::animation::AnimationChannel;
    assert!(
        fixture
            .scheduler
            .borrow()
            .pending_for(AnimationChannel::WindowScene)
            <= 1
    );
}
