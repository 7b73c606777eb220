use super::*;

fn content() -> ContentDescriptor {
    ContentDescriptor::new("confirm_delete")
}

#[test]
fn defaults_match_documented_tuning() {
    let config = FlickableConfigBuilder::new()
        .content(content())
        .build()
        .expect("valid config");

    assert_eq!(config.dismiss_threshold, 700.0);
    assert_eq!(config.rotation_exponent, 30.0);
    assert_eq!(config.background_color, Color::from_argb8(100, 0, 0, 0));
    assert!(!config.cancelable);
    assert!(config.dismiss_on_outside_touch);
    assert_eq!(config.content.as_str(), "confirm_delete");
}

#[test]
fn overrides_are_kept() {
    let config = FlickableConfigBuilder::new()
        .content(content())
        .dismiss_threshold(250.0)
        .rotation_exponent(12.0)
        .background_color(Color::BLACK)
        .cancelable(true)
        .dismiss_on_outside_touch(false)
        .build()
        .expect("valid config");

    assert_eq!(config.dismiss_threshold, 250.0);
    assert_eq!(config.rotation_exponent, 12.0);
    assert_eq!(config.background_color, Color::BLACK);
    assert!(config.cancelable);
    assert!(!config.dismiss_on_outside_touch);
}

#[test]
fn content_is_required() {
    assert_eq!(
        FlickableConfigBuilder::new().build(),
        Err(ConfigError::MissingContent)
    );
    assert_eq!(
        FlickableConfigBuilder::new()
            .content(ContentDescriptor::new(""))
            .build(),
        Err(ConfigError::MissingContent)
    );
}

#[test]
fn non_finite_values_are_rejected() {
    let err = FlickableConfigBuilder::new()
        .content(content())
        .dismiss_threshold(f32::INFINITY)
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::NonFinite {
            field: "dismiss_threshold",
            ..
        }
    ));

    let err = FlickableConfigBuilder::new()
        .content(content())
        .rotation_exponent(f32::NAN)
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::NonFinite {
            field: "rotation_exponent",
            ..
        }
    ));
}

#[test]
fn zero_rotation_exponent_is_rejected() {
    let err = FlickableConfigBuilder::new()
        .content(content())
        .rotation_exponent(0.0)
        .build()
        .unwrap_err();
    assert_eq!(err, ConfigError::ZeroRotationExponent);
    assert_eq!(err.to_string(), "rotation exponent must not be zero");
}

#[test]
fn non_positive_threshold_is_accepted() {
    let config = FlickableConfigBuilder::new()
        .content(content())
        .dismiss_threshold(0.0)
        .build()
        .expect("zero threshold only warns");
    assert_eq!(config.dismiss_threshold, 0.0);
}
