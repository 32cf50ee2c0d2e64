//! Validated move requests.

use libm::{fabsf, roundf};

use crate::axis::Axis;
use crate::config::AxisSettings;
use crate::error::{MotionError, MotionParameter};

/// Direction of a requested move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Positive distance.
    Forward,
    /// Negative distance.
    Reverse,
}

impl Direction {
    /// Get direction from a signed distance.
    #[inline]
    pub fn from_distance(distance: i32) -> Self {
        if distance >= 0 {
            Direction::Forward
        } else {
            Direction::Reverse
        }
    }
}

/// A move that passed validation and is ready for the canonical machine.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MoveRequest {
    /// Axis to move.
    pub axis: Axis,

    /// Distance as requested, in units.
    pub distance: i32,

    /// Distance submitted to the canonical machine.
    ///
    /// Always the magnitude of `distance`: reverse travel is not yet
    /// distinguished on this path.
    pub magnitude: f32,

    /// Pulses per unit for the axis at request time.
    pub pulses_per_unit: f32,
}

impl MoveRequest {
    /// Check a move against the axis settings.
    ///
    /// # Errors
    ///
    /// Returns `MotionError::DegenerateParameter` if speed, max speed, max jerk
    /// or pulses per unit is zero, negative or not finite, and
    /// `MotionError::DistanceTooShort` if `|distance| < min_distance`.
    pub fn validate(
        axis: Axis,
        distance: i32,
        settings: &AxisSettings,
        min_distance: u32,
    ) -> Result<Self, MotionError> {
        let pulses_per_unit = settings.pulses_per_unit();

        let checks = [
            (MotionParameter::Speed, settings.speed),
            (MotionParameter::MaxSpeed, settings.max_speed),
            (MotionParameter::PulsesPerUnit, pulses_per_unit),
            (MotionParameter::MaxJerk, settings.max_jerk),
        ];

        for (parameter, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(MotionError::DegenerateParameter { parameter, value });
            }
        }

        if distance.unsigned_abs() < min_distance {
            return Err(MotionError::DistanceTooShort {
                distance,
                minimum: min_distance,
            });
        }

        Ok(Self {
            axis,
            distance,
            magnitude: fabsf(distance as f32),
            pulses_per_unit,
        })
    }

    /// Direction the caller asked for.
    #[inline]
    pub fn direction(&self) -> Direction {
        Direction::from_distance(self.distance)
    }

    /// Step pulses the move should produce.
    #[inline]
    pub fn expected_pulses(&self) -> u32 {
        roundf(self.magnitude * self.pulses_per_unit) as u32
    }
}
