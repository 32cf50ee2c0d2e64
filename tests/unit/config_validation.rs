//! Unit tests for configuration validation.

use motor_controller::config::{validate_config, AxisSettings, ControllerConfig, Degrees, MicrosteppingMode};
use motor_controller::error::ConfigError;
use motor_controller::Error;

fn make_config() -> ControllerConfig {
    let axis = AxisSettings::new(
        Degrees(1.8),
        2000.0,
        MicrosteppingMode::EIGHTH,
        1.0e7,
        300.0,
        600.0,
    );
    ControllerConfig::new(axis, axis)
}

#[test]
fn test_valid_config() {
    assert!(validate_config(&make_config()).is_ok());
}

#[test]
fn test_negative_max_jerk_on_r_axis() {
    let mut config = make_config();
    config.r_axis.max_jerk = -1.0;

    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidMaxJerk(_)))
    ));
}

#[test]
fn test_infinite_speed() {
    let mut config = make_config();
    config.z_axis.speed = f32::INFINITY;

    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidSpeed(_)))
    ));
}

#[test]
fn test_speed_may_equal_max() {
    let mut config = make_config();
    config.z_axis.speed = config.z_axis.max_speed;

    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_zero_min_distance() {
    let mut config = make_config();
    config.motion.min_distance = 0;

    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidMinDistance(0)))
    ));
}

#[test]
fn test_timeout_accepted() {
    let mut config = make_config();
    config.homing.timeout_ms = Some(1);

    assert!(validate_config(&config).is_ok());
}
