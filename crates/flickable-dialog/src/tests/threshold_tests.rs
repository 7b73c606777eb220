use super::*;

#[test]
fn short_drag_returns() {
    assert_eq!(
        evaluate(Point::new(100.0, -50.0), 700.0),
        ReleaseOutcome::Return
    );
}

#[test]
fn either_axis_past_threshold_dismisses() {
    assert_eq!(
        evaluate(Point::new(701.0, 0.0), 700.0),
        ReleaseOutcome::Dismiss
    );
    assert_eq!(
        evaluate(Point::new(0.0, -701.0), 700.0),
        ReleaseOutcome::Dismiss
    );
    assert_eq!(
        evaluate(Point::new(-5.0, 900.0), 700.0),
        ReleaseOutcome::Dismiss
    );
}

#[test]
fn exactly_at_threshold_returns() {
    assert_eq!(
        evaluate(Point::new(700.0, -700.0), 700.0),
        ReleaseOutcome::Return
    );
}

#[test]
fn diagonal_distance_is_not_combined() {
    // |(600, 600)| is about 848 but neither axis crosses 700.
    assert_eq!(
        evaluate(Point::new(600.0, 600.0), 700.0),
        ReleaseOutcome::Return
    );
}

#[test]
fn zero_threshold_dismisses_any_movement() {
    assert_eq!(evaluate(Point::new(0.5, 0.0), 0.0), ReleaseOutcome::Dismiss);
    assert_eq!(evaluate(Point::ZERO, 0.0), ReleaseOutcome::Return);
}

#[test]
fn zero_displacement_always_returns() {
    for threshold in [1.0, 700.0, 10_000.0] {
        assert_eq!(evaluate(Point::ZERO, threshold), ReleaseOutcome::Return);
    }
}

#[test]
fn small_right_drag_returns_and_long_left_drag_dismisses() {
    assert_eq!(
        evaluate(Point::new(50.0, -10.0), 700.0),
        ReleaseOutcome::Return
    );
    assert_eq!(
        evaluate(Point::new(800.0, -10.0), 700.0),
        ReleaseOutcome::Dismiss
    );
}
