//! Controller configuration - root configuration structure.

use serde::Deserialize;

use crate::axis::Axis;

use super::axis::AxisSettings;

/// Default width of the host interrupt pulse.
pub const DEFAULT_INTERRUPT_PULSE_MS: u32 = 50;

/// Default minimum move magnitude in units.
pub const DEFAULT_MIN_DISTANCE: u32 = 1;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct ControllerConfig {
    /// Z axis calibration.
    pub z_axis: AxisSettings,

    /// R axis calibration.
    pub r_axis: AxisSettings,

    /// Host notification line.
    #[serde(default)]
    pub host: HostConfig,

    /// Homing behaviour.
    #[serde(default)]
    pub homing: HomingConfig,

    /// Move request limits.
    #[serde(default)]
    pub motion: MotionConfig,
}

/// Host interrupt line settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HostConfig {
    /// Low pulse width in milliseconds.
    #[serde(default = "default_pulse_ms")]
    pub interrupt_pulse_ms: u32,
}

/// Homing settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct HomingConfig {
    /// Give up seeking the limit switch after this many milliseconds.
    ///
    /// `None` seeks until the switch trips or an operator intervenes.
    #[serde(default)]
    pub timeout_ms: Option<u32>,
}

/// Move request limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MotionConfig {
    /// Smallest accepted move magnitude in units.
    #[serde(default = "default_min_distance")]
    pub min_distance: u32,
}

fn default_pulse_ms() -> u32 {
    DEFAULT_INTERRUPT_PULSE_MS
}

fn default_min_distance() -> u32 {
    DEFAULT_MIN_DISTANCE
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            interrupt_pulse_ms: DEFAULT_INTERRUPT_PULSE_MS,
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            min_distance: DEFAULT_MIN_DISTANCE,
        }
    }
}

impl ControllerConfig {
    /// Create a configuration with default host, homing and motion sections.
    pub fn new(z_axis: AxisSettings, r_axis: AxisSettings) -> Self {
        Self {
            z_axis,
            r_axis,
            host: HostConfig::default(),
            homing: HomingConfig::default(),
            motion: MotionConfig::default(),
        }
    }

    /// Get the settings for an axis.
    pub fn axis(&self, axis: Axis) -> &AxisSettings {
        match axis {
            Axis::Z => &self.z_axis,
            Axis::R => &self.r_axis,
        }
    }
}
