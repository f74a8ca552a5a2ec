// Host-side tests for the per-card interaction state machine.

use tilt_core::*;

const FRAME: f32 = 1.0 / 60.0;

fn bounds() -> Option<SurfaceBounds> {
    Some(SurfaceBounds::new(0.0, 0.0, 200.0, 100.0))
}

fn run_until_settled(card: &mut TiltCard, cap: usize) -> Option<TickOutcome> {
    for _ in 0..cap {
        let out = card.tick(FRAME);
        if out.settled {
            return Some(out);
        }
    }
    None
}

#[test]
fn starts_idle_and_neutral() {
    let card = TiltCard::new(TiltConfig::default());
    assert_eq!(card.phase(), Phase::Idle);
    assert!(!card.needs_frame());
    assert!(card.transform().is_within(0.0));
}

#[test]
fn move_leave_settle_cycle() {
    let mut card = TiltCard::new(TiltConfig::default());

    assert!(card.pointer_move(200.0, 0.0, bounds()));
    assert_eq!(card.phase(), Phase::Tracking);
    assert_eq!(card.target(), NormalizedOffset { x: 0.5, y: -0.5 });

    // Rotation lags the target rather than snapping
    let first = card.tick(FRAME);
    assert!(first.transform.rotate_x_deg > 0.0 && first.transform.rotate_x_deg < 15.0);

    let settled = run_until_settled(&mut card, 600).expect("never settled while tracking");
    assert_eq!(settled.phase, Phase::Tracking);
    assert_eq!(settled.transform.rotate_x_deg, 15.0);
    assert_eq!(settled.transform.rotate_y_deg, 15.0);
    assert!(!card.needs_frame());

    assert!(card.pointer_leave());
    assert_eq!(card.phase(), Phase::Returning);
    let back = run_until_settled(&mut card, 600).expect("never returned to rest");
    assert_eq!(back.phase, Phase::Idle);
    assert!(back.transform.is_within(1e-3));
    assert_eq!(card.phase(), Phase::Idle);
}

#[test]
fn leave_from_any_offset_returns_to_neutral() {
    let positions = [(0.0, 0.0), (200.0, 100.0), (37.0, 91.0), (199.0, 1.0)];
    for preset in [SpringPreset::Gentle, SpringPreset::Snappy] {
        for (x, y) in positions {
            let mut card = TiltCard::new(TiltConfig::from_preset(preset));
            card.pointer_move(x, y, bounds());
            for _ in 0..7 {
                card.tick(FRAME);
            }
            card.pointer_leave();
            let out = run_until_settled(&mut card, 600).expect("no rest after leave");
            assert!(out.transform.is_within(1e-3), "{:?} from ({x},{y})", out.transform);
            assert_eq!(card.phase(), Phase::Idle);
        }
    }
}

#[test]
fn center_pointer_gives_neutral_target() {
    let mut card = TiltCard::new(TiltConfig::default());
    card.pointer_move(100.0, 50.0, bounds());
    assert_eq!(card.phase(), Phase::Tracking);
    assert_eq!(card.target(), NormalizedOffset::ZERO);
    assert!(!card.needs_frame());
    assert!(card.transform().is_within(0.0));
}

#[test]
fn zero_width_surface_leaves_state_unchanged() {
    let mut card = TiltCard::new(TiltConfig::default());
    card.pointer_move(150.0, 20.0, bounds());
    card.tick(FRAME);
    let before = card.clone();

    let hidden = Some(SurfaceBounds::new(0.0, 0.0, 0.0, 100.0));
    card.pointer_move(10.0, 10.0, hidden);
    assert_eq!(card.phase(), before.phase());
    assert_eq!(card.target(), before.target());
    assert_eq!(card.offset(), before.offset());
    assert!(!card.offset().x.is_nan() && !card.offset().y.is_nan());

    // An idle card stays idle too
    let mut idle = TiltCard::new(TiltConfig::default());
    assert!(!idle.pointer_move(10.0, 10.0, hidden));
    assert_eq!(idle.phase(), Phase::Idle);
}

#[test]
fn unmounted_surface_is_a_no_op() {
    let mut card = TiltCard::new(TiltConfig::default());
    assert!(!card.pointer_move(10.0, 10.0, None));
    assert_eq!(card.phase(), Phase::Idle);
}

#[test]
fn double_reset_matches_single_reset() {
    let mut once = TiltCard::new(TiltConfig::default());
    once.pointer_move(30.0, 80.0, bounds());
    for _ in 0..12 {
        once.tick(FRAME);
    }
    let mut twice = once.clone();

    once.pointer_leave();
    twice.pointer_leave();
    twice.pointer_leave();
    assert_eq!(once.phase(), twice.phase());

    for _ in 0..300 {
        let a = once.tick(FRAME);
        let b = twice.tick(FRAME);
        assert_eq!(a, b);
    }
}

#[test]
fn leave_while_idle_stays_idle() {
    let mut card = TiltCard::new(TiltConfig::default());
    assert!(!card.pointer_leave());
    assert_eq!(card.phase(), Phase::Idle);
}

#[test]
fn move_while_returning_resumes_tracking() {
    let mut card = TiltCard::new(TiltConfig::default());
    card.pointer_move(0.0, 0.0, bounds());
    for _ in 0..10 {
        card.tick(FRAME);
    }
    card.pointer_leave();
    card.tick(FRAME);
    assert_eq!(card.phase(), Phase::Returning);

    card.pointer_move(200.0, 100.0, bounds());
    assert_eq!(card.phase(), Phase::Tracking);
    assert_eq!(card.target(), NormalizedOffset { x: 0.5, y: 0.5 });
}

#[test]
fn irregular_samples_only_retarget() {
    // Many samples between frames do not advance the animation
    let mut card = TiltCard::new(TiltConfig::default());
    for i in 0..50 {
        card.pointer_move(i as f32 * 4.0, 20.0, bounds());
    }
    assert_eq!(card.offset(), NormalizedOffset::ZERO);
    assert!((card.target().x - (196.0 / 200.0 - 0.5)).abs() < 1e-6);
}

#[test]
fn layer_transforms_follow_configured_layers() {
    let cfg = TiltConfig::default()
        .with_layer(DepthLayer::new(75.0))
        .with_layer(DepthLayer::new(50.0))
        .with_layer_shift(0.1);
    let mut card = TiltCard::new(cfg);
    card.pointer_move(200.0, 50.0, bounds());
    run_until_settled(&mut card, 600).unwrap();

    let layers: Vec<_> = card.layer_transforms().collect();
    assert_eq!(layers.len(), 2);
    assert_eq!(layers[0].translate_z_px, 75.0);
    assert_eq!(layers[1].translate_z_px, 50.0);
    assert!(layers[0].shift_x_px > layers[1].shift_x_px);
}

#[test]
fn custom_max_angle_scales_rotation() {
    let mut card = TiltCard::new(TiltConfig::default().with_max_deg(10.0));
    card.pointer_move(200.0, 0.0, bounds());
    let out = run_until_settled(&mut card, 600).unwrap();
    assert_eq!(out.transform.rotate_x_deg, 10.0);
    assert_eq!(out.transform.rotate_y_deg, 10.0);
}

#[test]
fn smoothed_offset_never_leaves_the_range() {
    let mut card = TiltCard::new(TiltConfig::default());
    card.pointer_move(200.0, 100.0, bounds());
    for _ in 0..120 {
        let out = card.tick(FRAME);
        assert!(out.offset.x <= 0.5 && out.offset.y <= 0.5);
        assert!(out.transform.rotate_y_deg <= 15.0);
    }
}
