//! Unit types for axis calibration.
//!
//! Keeps the driver's microstepping mode and the step angle apart from plain
//! floats so calibration values cannot be swapped by accident.

use serde::Deserialize;

use crate::error::ConfigError;

/// Full-step motor angle in degrees.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f32);

impl Degrees {
    /// Create a new Degrees value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Full steps in one motor revolution for this step angle.
    #[inline]
    pub fn steps_per_revolution(self) -> f32 {
        360.0 / self.0
    }
}

/// Driver microstepping mode.
///
/// Modes 1 through 6 select division factors 1, 2, 4, 8, 16 and 32.
/// Validated at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MicrosteppingMode(u8);

impl MicrosteppingMode {
    /// Full step (no microstepping).
    pub const FULL: Self = Self(1);
    /// Half step.
    pub const HALF: Self = Self(2);
    /// Quarter step.
    pub const QUARTER: Self = Self(3);
    /// Eighth step.
    pub const EIGHTH: Self = Self(4);
    /// Sixteenth step.
    pub const SIXTEENTH: Self = Self(5);
    /// Thirty-second step (maximum resolution).
    pub const THIRTY_SECOND: Self = Self(6);

    const MIN: u8 = 1;
    const MAX: u8 = 6;

    /// Create a new mode with validation.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidMicrosteppingMode` if the driver does not support it.
    pub fn new(mode: u8) -> Result<Self, ConfigError> {
        if Self::is_valid(mode) {
            Ok(Self(mode))
        } else {
            Err(ConfigError::InvalidMicrosteppingMode(mode))
        }
    }

    /// Get the raw mode number written to the driver.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Microsteps per full step.
    #[inline]
    pub const fn factor(self) -> u16 {
        1 << (self.0 - 1)
    }

    /// Check if a mode number is supported.
    #[inline]
    pub fn is_valid(mode: u8) -> bool {
        (Self::MIN..=Self::MAX).contains(&mode)
    }
}

impl Default for MicrosteppingMode {
    fn default() -> Self {
        Self::FULL
    }
}

impl TryFrom<u8> for MicrosteppingMode {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for MicrosteppingMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use core::fmt::Write;
        let value = u8::deserialize(deserializer)?;
        MicrosteppingMode::new(value).map_err(|e| {
            let mut buf = heapless::String::<128>::new();
            let _ = write!(buf, "{}", e);
            serde::de::Error::custom(buf.as_str())
        })
    }
}
