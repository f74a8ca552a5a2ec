// Host-side tests for card configuration and attribute parsing.

use std::collections::HashMap;
use tilt_core::*;

fn attrs(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name: &str| map.get(name).cloned()
}

#[test]
fn defaults_are_valid() {
    let cfg = TiltConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.max_deg, DEFAULT_MAX_TILT_DEG);
    assert_eq!(cfg.spring, SpringConfig::GENTLE);
    assert_eq!(cfg.perspective_px, Some(DEFAULT_PERSPECTIVE_PX));
    assert_eq!(cfg.normalization, Normalization::Fraction);
    assert!(cfg.layers.is_empty());
}

#[test]
fn no_attributes_gives_defaults() {
    let cfg = TiltConfig::from_attributes(attrs(&[])).unwrap();
    assert_eq!(cfg, TiltConfig::default());
}

#[test]
fn preset_then_overrides() {
    let cfg = TiltConfig::from_attributes(attrs(&[
        (ATTR_PRESET, "Snappy"),
        (ATTR_DAMPING, "24"),
        (ATTR_MAX_DEG, "10deg"),
    ]))
    .unwrap();
    assert_eq!(cfg.spring.stiffness, SNAPPY_STIFFNESS);
    assert_eq!(cfg.spring.damping, 24.0);
    assert_eq!(cfg.max_deg, 10.0);
}

#[test]
fn perspective_range_shift_and_epsilon() {
    let cfg = TiltConfig::from_attributes(attrs(&[
        (ATTR_PERSPECTIVE, "none"),
        (ATTR_RANGE, "300px"),
        (ATTR_SHIFT, "0.05"),
        (ATTR_EPSILON, "0.002"),
        (ATTR_MASS, "2"),
    ]))
    .unwrap();
    assert_eq!(cfg.perspective_px, None);
    assert_eq!(
        cfg.normalization,
        Normalization::PixelRange { half_range_px: 300.0 }
    );
    assert_eq!(cfg.layer_shift, 0.05);
    assert_eq!(cfg.spring.rest_delta, 0.002);
    assert_eq!(cfg.spring.mass, 2.0);

    let cfg = TiltConfig::from_attributes(attrs(&[(ATTR_PERSPECTIVE, " 800px ")])).unwrap();
    assert_eq!(cfg.perspective_px, Some(800.0));
}

#[test]
fn rejects_garbage_numbers() {
    let err = TiltConfig::from_attributes(attrs(&[(ATTR_STIFFNESS, "stiff")])).unwrap_err();
    assert_eq!(
        err,
        ConfigError::NotANumber {
            attr: ATTR_STIFFNESS,
            value: "stiff".to_string()
        }
    );
    // "NaN" parses as a float but is not a usable number
    let err = TiltConfig::from_attributes(attrs(&[(ATTR_MAX_DEG, "NaN")])).unwrap_err();
    assert!(matches!(err, ConfigError::NotANumber { .. }));
}

#[test]
fn rejects_out_of_range_values() {
    let err = TiltConfig::from_attributes(attrs(&[(ATTR_STIFFNESS, "0")])).unwrap_err();
    assert!(matches!(err, ConfigError::NotPositive { field: "stiffness", .. }));

    let err = TiltConfig::from_attributes(attrs(&[(ATTR_DAMPING, "-1")])).unwrap_err();
    assert!(matches!(err, ConfigError::NotPositive { field: "damping", .. }));

    let err = TiltConfig::from_attributes(attrs(&[(ATTR_MAX_DEG, "-5")])).unwrap_err();
    assert!(matches!(err, ConfigError::Negative { field: "max_deg", .. }));

    let err = TiltConfig::from_attributes(attrs(&[(ATTR_RANGE, "0")])).unwrap_err();
    assert!(matches!(err, ConfigError::NotPositive { field: "range", .. }));

    let err = TiltConfig::from_attributes(attrs(&[(ATTR_EPSILON, "0")])).unwrap_err();
    assert!(matches!(err, ConfigError::NotPositive { field: "rest_delta", .. }));
}

#[test]
fn rejects_unknown_preset() {
    let err = TiltConfig::from_attributes(attrs(&[(ATTR_PRESET, "wobbly")])).unwrap_err();
    assert_eq!(err, ConfigError::UnknownPreset("wobbly".to_string()));
    assert!(err.to_string().contains("wobbly"));
}

#[test]
fn zero_damping_is_rejected() {
    // An undamped spring oscillates forever and the card would never idle
    let err = TiltConfig::from_attributes(attrs(&[(ATTR_DAMPING, "0")])).unwrap_err();
    assert!(matches!(err, ConfigError::NotPositive { field: "damping", .. }));
}

#[test]
fn rejects_springs_too_stiff_for_the_substep() {
    let err = TiltConfig::from_attributes(attrs(&[(ATTR_MASS, "0.001")])).unwrap_err();
    assert!(
        matches!(err, ConfigError::Unstable { field: "natural_frequency", .. }),
        "{err:?}"
    );

    let err = TiltConfig::from_attributes(attrs(&[(ATTR_STIFFNESS, "300000")])).unwrap_err();
    assert!(matches!(err, ConfigError::Unstable { field: "natural_frequency", .. }));

    let err = TiltConfig::from_attributes(attrs(&[(ATTR_DAMPING, "500")])).unwrap_err();
    assert!(matches!(err, ConfigError::Unstable { field: "damping_rate", .. }));

    // Both presets sit well inside the limits
    assert!(SpringConfig::GENTLE.is_stable());
    assert!(SpringConfig::SNAPPY.is_stable());
}

#[test]
fn accepted_spring_settings_bring_the_card_back_to_idle() {
    for pairs in [
        &[(ATTR_MASS, "0.1")][..],
        &[(ATTR_STIFFNESS, "50000"), (ATTR_DAMPING, "200")][..],
        &[(ATTR_DAMPING, "0.5")][..],
    ] {
        let cfg = TiltConfig::from_attributes(attrs(pairs)).unwrap();
        let mut card = TiltCard::new(cfg);
        card.track(NormalizedOffset::clamped(0.5, -0.5));
        for _ in 0..60 {
            card.tick(1.0 / 60.0);
        }
        card.pointer_leave();
        let mut frames = 0;
        while card.needs_frame() {
            card.tick(1.0 / 60.0);
            frames += 1;
            assert!(frames < 10_000, "{pairs:?} never settled");
        }
        assert_eq!(card.phase(), Phase::Idle);
        assert_eq!(card.springs().value(), glam::Vec2::ZERO);
    }
}

#[test]
fn depth_values_parse_with_or_without_unit() {
    assert_eq!(parse_depth("75").unwrap(), DepthLayer::new(75.0));
    assert_eq!(parse_depth(" 50px").unwrap(), DepthLayer::new(50.0));
    assert_eq!(parse_depth("-10px").unwrap(), DepthLayer::new(-10.0));
    assert!(parse_depth("deep").is_err());
}

#[test]
fn builder_layers_are_validated() {
    let cfg = TiltConfig::default().with_layer(DepthLayer::new(f32::INFINITY));
    assert_eq!(cfg.validate(), Err(ConfigError::NotFinite { field: "depth" }));

    let cfg = TiltConfig::default().with_perspective(Some(-5.0));
    assert!(cfg.validate().is_err());
}
