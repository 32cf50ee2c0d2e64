//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{AxisSettings, ControllerConfig};

/// Validate a controller configuration.
///
/// Checks:
/// - Both axes have positive, finite calibration and speed values
/// - Speed does not exceed max speed
/// - Host pulse width, homing timeout and minimum distance are non-zero
pub fn validate_config(config: &ControllerConfig) -> Result<()> {
    validate_axis(&config.z_axis)?;
    validate_axis(&config.r_axis)?;

    if config.host.interrupt_pulse_ms == 0 {
        return Err(Error::Config(ConfigError::InvalidPulseWidth(0)));
    }

    if let Some(timeout) = config.homing.timeout_ms {
        if timeout == 0 {
            return Err(Error::Config(ConfigError::InvalidHomingTimeout(timeout)));
        }
    }

    if config.motion.min_distance == 0 {
        return Err(Error::Config(ConfigError::InvalidMinDistance(0)));
    }

    Ok(())
}

#[inline]
fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn validate_axis(settings: &AxisSettings) -> Result<()> {
    if !positive(settings.step_angle.0) {
        return Err(Error::Config(ConfigError::InvalidStepAngle(settings.step_angle.0)));
    }

    if !positive(settings.units_per_revolution) {
        return Err(Error::Config(ConfigError::InvalidUnitsPerRevolution(
            settings.units_per_revolution,
        )));
    }

    if !positive(settings.max_jerk) {
        return Err(Error::Config(ConfigError::InvalidMaxJerk(settings.max_jerk)));
    }

    if !positive(settings.speed) {
        return Err(Error::Config(ConfigError::InvalidSpeed(settings.speed)));
    }

    if !positive(settings.max_speed) {
        return Err(Error::Config(ConfigError::InvalidMaxSpeed(settings.max_speed)));
    }

    if settings.speed > settings.max_speed {
        return Err(Error::Config(ConfigError::SpeedExceedsMax {
            speed: settings.speed,
            max: settings.max_speed,
        }));
    }

    Ok(())
}
