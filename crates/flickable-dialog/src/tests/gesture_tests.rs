use super::*;
use flickable_core::Size;

fn surface_at(origin: Point) -> Rect {
    Rect::from_origin_size(origin, Size::new(300.0, 200.0))
}

fn begin(raw: Point) -> GestureState {
    let origin = Point::new(100.0, 100.0);
    GestureState::begin(origin, origin, surface_at(origin), raw)
}

#[test]
fn touch_half_is_taken_from_on_screen_center() {
    // center_y = 100 + 200 / 2 = 200
    assert!(begin(Point::new(150.0, 150.0)).touched_top_half);
    assert!(!begin(Point::new(150.0, 250.0)).touched_top_half);
    assert!(!begin(Point::new(150.0, 200.0)).touched_top_half);
}

#[test]
fn surface_follows_pointer_delta() {
    let tracker = GestureTracker::new(30.0, 700.0);
    let mut state = begin(Point::new(150.0, 250.0));

    let update = tracker.track_move(&mut state, Point::new(210.0, 230.0));
    assert_eq!(update.position, Point::new(160.0, 80.0));
    assert_eq!(update.delta, Point::new(-60.0, 20.0));
    assert_eq!(state.current_position, update.position);
    assert_eq!(state.previous_pointer, Point::new(210.0, 230.0));

    let update = tracker.track_move(&mut state, Point::new(220.0, 230.0));
    assert_eq!(update.position, Point::new(170.0, 80.0));
}

#[test]
fn rotation_uses_gap_before_the_move() {
    let tracker = GestureTracker::new(30.0, 700.0);
    let mut state = begin(Point::new(150.0, 250.0));

    let first = tracker.track_move(&mut state, Point::new(210.0, 250.0));
    assert_eq!(first.rotation, 0.0);

    let second = tracker.track_move(&mut state, Point::new(270.0, 250.0));
    assert_eq!(second.rotation, 2.0);
}

#[test]
fn top_half_touch_tilts_the_other_way() {
    assert_eq!(drag_rotation(60.0, false, 30.0), 2.0);
    assert_eq!(drag_rotation(60.0, true, 30.0), -2.0);
    assert_eq!(drag_rotation(-90.0, true, 30.0), 3.0);
}

#[test]
fn rotation_sign_is_fixed_for_the_whole_gesture() {
    let tracker = GestureTracker::new(30.0, 700.0);
    let mut state = begin(Point::new(150.0, 150.0));
    assert!(state.touched_top_half);

    // Drag far below the surface center; the tilt still uses the top-half sign.
    tracker.track_move(&mut state, Point::new(210.0, 900.0));
    let update = tracker.track_move(&mut state, Point::new(210.0, 950.0));
    assert!(state.touched_top_half);
    assert_eq!(update.rotation, -2.0);
}

#[test]
fn flicking_progress_is_relative_to_threshold() {
    let tracker = GestureTracker::new(30.0, 700.0);
    let (horizontal, vertical) = tracker.flicking_progress(Point::new(-350.0, 1400.0));
    assert_eq!(horizontal, 0.5);
    assert_eq!(vertical, 2.0);
}
