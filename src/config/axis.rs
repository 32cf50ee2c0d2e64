//! Per-axis calibration settings.

use serde::Deserialize;

use super::units::{Degrees, MicrosteppingMode};

/// Calibration and motion limits for one axis.
///
/// Created once per axis at startup and afterwards changed only through the
/// settings commands.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AxisSettings {
    /// Full-step angle of the motor in degrees.
    pub step_angle: Degrees,

    /// Axis travel (mm, or millidegrees for rotation) per motor revolution.
    pub units_per_revolution: f32,

    /// Driver microstepping mode.
    #[serde(default)]
    pub microstepping_mode: MicrosteppingMode,

    /// Maximum jerk in units per minute cubed.
    pub max_jerk: f32,

    /// Feed speed in units per minute.
    pub speed: f32,

    /// Maximum speed in units per minute.
    pub max_speed: f32,
}

impl AxisSettings {
    /// Create settings with every field supplied.
    pub const fn new(
        step_angle: Degrees,
        units_per_revolution: f32,
        microstepping_mode: MicrosteppingMode,
        max_jerk: f32,
        speed: f32,
        max_speed: f32,
    ) -> Self {
        Self {
            step_angle,
            units_per_revolution,
            microstepping_mode,
            max_jerk,
            speed,
            max_speed,
        }
    }

    /// Set the full-step angle in degrees.
    #[inline]
    pub fn set_step_angle(&mut self, degrees: f32) {
        self.step_angle = Degrees(degrees);
    }

    /// Set the axis travel per motor revolution.
    #[inline]
    pub fn set_units_per_revolution(&mut self, units: f32) {
        self.units_per_revolution = units;
    }

    /// Set the microstepping mode.
    #[inline]
    pub fn set_microstepping_mode(&mut self, mode: MicrosteppingMode) {
        self.microstepping_mode = mode;
    }

    /// Set the maximum jerk.
    #[inline]
    pub fn set_max_jerk(&mut self, jerk: f32) {
        self.max_jerk = jerk;
    }

    /// Set the feed speed.
    #[inline]
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Set the maximum speed.
    #[inline]
    pub fn set_max_speed(&mut self, max_speed: f32) {
        self.max_speed = max_speed;
    }

    /// Step pulses per unit of axis travel.
    ///
    /// `(360 / step_angle) * microstep_factor / units_per_revolution`
    pub fn pulses_per_unit(&self) -> f32 {
        self.step_angle.steps_per_revolution() * self.microstepping_mode.factor() as f32
            / self.units_per_revolution
    }
}
