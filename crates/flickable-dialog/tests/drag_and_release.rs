use flickable_animation::AnimatedProperty;
use flickable_core::{Color, Point};
use flickable_dialog::{
    ContentDescriptor, DialogError, DialogPhase, FlickDirection, FlickableConfig, FlickableDialog,
};
use flickable_testing::robot_assertions::{assert_approx_eq, assert_point_approx_eq};
use flickable_testing::{DialogRobot, ListenerEvent, SURFACE_ORIGIN};

fn config() -> FlickableConfig {
    FlickableDialog::builder()
        .content(ContentDescriptor::new("card"))
        .build()
        .expect("valid config")
}

fn shown_robot() -> DialogRobot {
    let mut robot = DialogRobot::new(config());
    robot.show();
    robot.wait_for_idle();
    robot
}

#[test]
fn show_applies_backdrop_and_waits_for_touch() {
    let robot = shown_robot();

    assert_eq!(robot.phase(), DialogPhase::AwaitingTouch);
    assert_eq!(
        robot.host().backdrop.color(),
        Some(Color::from_argb8(100, 0, 0, 0))
    );
    assert_eq!(robot.host().backdrop.alpha(), 1.0);
    let recorded = robot.animations().recorded();
    let fade_in = &recorded[0];
    assert_eq!(fade_in.spec.duration_millis, 200);
    assert_eq!(fade_in.target_of(AnimatedProperty::Alpha), Some(1.0));
}

#[test]
fn show_twice_is_rejected() {
    let mut robot = shown_robot();
    assert_eq!(robot.try_show(), Err(DialogError::AlreadyShown));

    robot.dialog().dismiss();
    assert_eq!(robot.try_show(), Err(DialogError::Dismissed));
}

#[test]
fn short_drag_snaps_back_to_origin() {
    let mut robot = shown_robot();

    robot.drag_by(200.0, 200.0, 100.0, 50.0);
    assert_eq!(robot.phase(), DialogPhase::Returning);

    let snap_back = robot.animations().recorded().last().cloned().expect("return");
    assert_eq!(snap_back.spec.duration_millis, 300);
    assert_approx_eq(
        snap_back.target_of(AnimatedProperty::TranslationX).unwrap_or(f32::NAN),
        -100.0,
        0.01,
        "return translation x",
    );
    assert_approx_eq(
        snap_back.target_of(AnimatedProperty::TranslationY).unwrap_or(f32::NAN),
        -50.0,
        0.01,
        "return translation y",
    );

    robot.wait_for_idle();

    assert_eq!(robot.phase(), DialogPhase::AwaitingTouch);
    let surface = &robot.host().surface;
    assert_eq!(surface.drawn_at(), SURFACE_ORIGIN);
    assert_eq!(surface.translation(), Point::ZERO);
    assert_eq!(surface.rotation(), 0.0);
    assert_eq!(
        robot.listener().count(|event| *event == ListenerEvent::OriginBack),
        1
    );
    assert_eq!(robot.host().dismissals(), 0);
}

#[test]
fn dialog_can_be_dragged_again_after_returning() {
    let mut robot = shown_robot();

    robot.drag_by(200.0, 200.0, -150.0, 30.0);
    robot.wait_for_idle();
    robot.drag_by(200.0, 200.0, -150.0, 30.0);
    robot.wait_for_idle();

    assert_eq!(
        robot.listener().count(|event| *event == ListenerEvent::OriginBack),
        2
    );
    assert_eq!(robot.dialog().origin(), Some(SURFACE_ORIGIN));
    assert_eq!(robot.host().surface.drawn_at(), SURFACE_ORIGIN);
}

#[test]
fn drag_past_threshold_and_back_returns() {
    let mut robot = shown_robot();

    robot.touch_down(300.0, 500.0);
    robot.move_by(900.0, 0.0);
    robot.move_by(-900.0, 0.0);
    robot.release();
    assert_eq!(robot.phase(), DialogPhase::Returning);

    robot.wait_for_idle();
    assert_eq!(robot.phase(), DialogPhase::AwaitingTouch);
    assert_eq!(
        robot.listener().count(|event| *event == ListenerEvent::OriginBack),
        1
    );
    assert!(robot.listener().flicked().is_empty());
    assert_eq!(robot.host().dismissals(), 0);
    assert_eq!(robot.host().surface.drawn_at(), SURFACE_ORIGIN);
}

#[test]
fn long_drag_right_throws_and_dismisses() {
    let mut robot = shown_robot();

    robot.drag_by(200.0, 200.0, 800.0, 0.0);
    assert_eq!(robot.phase(), DialogPhase::Throwing);
    robot.wait_for_idle();

    assert_eq!(robot.listener().flicked(), vec![FlickDirection::RightTop]);
    assert_eq!(robot.host().dismissals(), 1);
    assert_eq!(robot.phase(), DialogPhase::Dismissed);
    assert_eq!(robot.host().root.alpha(), 0.0);

    // Bottom-half touch, released 800 to the right of a 700 threshold.
    assert_approx_eq(
        robot.host().surface.rotation(),
        800.0 / 700.0 * 540.0,
        0.01,
        "throw rotation",
    );
    assert_approx_eq(
        robot.host().surface.translation().x,
        8000.0,
        0.1,
        "throw travel",
    );
}

#[test]
fn throw_spin_reverses_for_top_half_touch() {
    let mut robot = shown_robot();

    robot.drag_by(200.0, 50.0, 800.0, 0.0);
    robot.wait_for_idle();

    assert_approx_eq(
        robot.host().surface.rotation(),
        -800.0 / 700.0 * 540.0,
        0.01,
        "throw rotation",
    );
}

#[test]
fn throw_spin_keeps_the_drag_tilt() {
    for (from_y, dx) in [(50.0, 800.0), (250.0, 800.0), (50.0, -800.0), (250.0, -800.0)] {
        let mut robot = shown_robot();

        robot.touch_down(SURFACE_ORIGIN.x + 200.0, SURFACE_ORIGIN.y + from_y);
        robot.move_by(dx, 0.0);
        let tilt = robot.host().surface.rotation();
        assert!(tilt != 0.0, "no tilt for ({from_y}, {dx})");

        robot.release();
        robot.wait_for_idle();
        let spin = robot.host().surface.rotation();
        assert!(tilt * spin > 0.0, "({from_y}, {dx}): tilt {tilt} but spin {spin}");
        let history = robot.host().surface.rotation_history();
        assert!(
            history.iter().all(|rotation| rotation * tilt >= 0.0),
            "({from_y}, {dx}) crossed zero: {history:?}"
        );
    }
}

#[test]
fn flick_direction_follows_release_quadrant() {
    let cases = [
        ((-800.0, -20.0), FlickDirection::LeftTop),
        ((-800.0, 20.0), FlickDirection::LeftBottom),
        ((30.0, 900.0), FlickDirection::RightBottom),
        ((30.0, -900.0), FlickDirection::RightTop),
    ];
    for ((dx, dy), expected) in cases {
        let mut robot = shown_robot();
        robot.drag_by(200.0, 200.0, dx, dy);
        robot.wait_for_idle();
        assert_eq!(
            robot.listener().flicked(),
            vec![expected],
            "drag by ({dx}, {dy})"
        );
    }
}

#[test]
fn sixty_pixel_gap_tilts_two_degrees() {
    let mut robot = shown_robot();

    robot.touch_down(300.0, 500.0);
    robot.move_to(360.0, 500.0);
    assert_eq!(robot.host().surface.rotation(), 0.0);
    robot.move_to(420.0, 500.0);
    assert_eq!(robot.host().surface.rotation(), 2.0);

    robot.touch_down(300.0, 500.0);
    assert_eq!(robot.phase(), DialogPhase::Dragging);
}

#[test]
fn rotation_sign_is_fixed_by_touch_down_half() {
    let mut robot = shown_robot();

    // Top half of a surface centred at y = 450, then dragged well below it.
    robot.touch_down(300.0, 350.0);
    robot.move_by(120.0, 250.0);
    let history = robot.host().surface.rotation_history();
    assert!(history.iter().all(|rotation| *rotation <= 0.0), "{history:?}");
    assert!(robot.host().surface.rotation() < 0.0);
    robot.release();
    robot.wait_for_idle();

    robot.touch_down(300.0, 550.0);
    robot.move_by(120.0, -250.0);
    assert!(robot.host().surface.rotation() > 0.0);
}

#[test]
fn flicking_reports_progress_towards_threshold() {
    let mut robot = shown_robot();

    robot.touch_down(300.0, 500.0);
    robot.move_to(650.0, 150.0);

    let (horizontal, vertical) = robot.listener().last_flicking().expect("flicking");
    assert_approx_eq(horizontal, 0.5, 1e-4, "horizontal");
    assert_approx_eq(vertical, 0.5, 1e-4, "vertical");
}

#[test]
fn touches_while_returning_are_ignored() {
    let mut robot = shown_robot();

    robot.drag_by(200.0, 200.0, 100.0, 0.0);
    assert_eq!(robot.phase(), DialogPhase::Returning);
    let flicking_before = robot
        .listener()
        .count(|event| matches!(event, ListenerEvent::Flicking { .. }));

    robot.touch_down(300.0, 500.0);
    robot.move_to(500.0, 500.0);
    robot.release();

    assert_eq!(robot.phase(), DialogPhase::Returning);
    assert_eq!(
        robot
            .listener()
            .count(|event| matches!(event, ListenerEvent::Flicking { .. })),
        flicking_before
    );
    robot.wait_for_idle();
    assert_eq!(robot.phase(), DialogPhase::AwaitingTouch);
}

#[test]
fn host_cancelled_touch_snaps_back() {
    let mut robot = shown_robot();

    robot.touch_down(300.0, 500.0);
    robot.move_by(900.0, 0.0);
    robot.cancel_touch();
    assert_eq!(robot.phase(), DialogPhase::Returning);

    robot.wait_for_idle();
    assert!(robot.listener().flicked().is_empty());
    assert_eq!(robot.host().surface.drawn_at(), SURFACE_ORIGIN);
}

#[test]
fn fallback_timer_finishes_throw_without_completion_reports() {
    let mut robot = DialogRobot::with_completion_reports(config(), false);
    robot.show();
    robot.wait_for_idle();

    robot.drag_by(200.0, 200.0, 800.0, 0.0);
    robot.advance_millis(390);
    assert_eq!(robot.host().dismissals(), 0);
    assert!(robot.listener().flicked().is_empty());

    robot.advance_millis(20);
    assert_eq!(robot.listener().flicked(), vec![FlickDirection::RightTop]);
    assert_eq!(robot.host().dismissals(), 1);
}

#[test]
fn fallback_timer_finishes_return_without_completion_reports() {
    let mut robot = DialogRobot::with_completion_reports(config(), false);
    robot.show();
    robot.wait_for_idle();

    robot.drag_by(200.0, 200.0, 100.0, 100.0);
    robot.advance_millis(310);

    assert_eq!(robot.phase(), DialogPhase::AwaitingTouch);
    assert_point_approx_eq(
        robot.host().surface.drawn_at(),
        SURFACE_ORIGIN,
        0.0,
        "surface after return",
    );
}

#[test]
fn listener_may_dismiss_from_flick_callback() {
    let mut robot = shown_robot();
    let handle = robot.dialog().clone();
    robot.dialog().set_on_flick(move |_| handle.dismiss());

    robot.drag_by(200.0, 200.0, 0.0, 900.0);
    robot.wait_for_idle();

    assert_eq!(robot.host().dismissals(), 1);
    assert_eq!(robot.phase(), DialogPhase::Dismissed);
}
