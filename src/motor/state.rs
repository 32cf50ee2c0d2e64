//! Controller state.
//!
//! [`MotionSignals`] is the part shared between the command loop, the step
//! generator and the caller's state machine. It is meant to live in a
//! `static`. [`ControllerState`] holds the axis settings and belongs to the
//! controller alone.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::axis::Axis;
use crate::config::AxisSettings;

/// Atomics shared across execution contexts.
#[derive(Debug)]
pub struct MotionSignals {
    /// Set once per homing or move request when it resolves.
    motion_complete: AtomicBool,
    /// Step pulses issued for the in-flight move.
    step_count: AtomicU32,
    /// f32 bits of the in-flight move's pulses per unit; 0 until the first move.
    pulses_per_unit: AtomicU32,
}

impl Default for MotionSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionSignals {
    /// Create signals with nothing pending.
    pub const fn new() -> Self {
        Self {
            motion_complete: AtomicBool::new(false),
            step_count: AtomicU32::new(0),
            pulses_per_unit: AtomicU32::new(0),
        }
    }

    /// Whether the last homing or move request has resolved.
    #[inline]
    pub fn is_motion_complete(&self) -> bool {
        self.motion_complete.load(Ordering::Acquire)
    }

    /// Read and clear the completion flag.
    #[inline]
    pub fn take_motion_complete(&self) -> bool {
        self.motion_complete.swap(false, Ordering::AcqRel)
    }

    #[inline]
    pub(crate) fn set_motion_complete(&self) {
        self.motion_complete.store(true, Ordering::Release);
    }

    #[inline]
    pub(crate) fn clear_motion_complete(&self) {
        self.motion_complete.store(false, Ordering::Release);
    }

    /// Step pulses issued since the current move started.
    ///
    /// Informational only.
    #[inline]
    pub fn step_count(&self) -> u32 {
        self.step_count.load(Ordering::Relaxed)
    }

    /// Add pulses issued by the step generator.
    #[inline]
    pub fn record_steps(&self, pulses: u32) {
        self.step_count.fetch_add(pulses, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn reset_step_count(&self) {
        self.step_count.store(0, Ordering::Relaxed);
    }

    /// Pulses per unit of the current move, `None` before any move has started.
    #[inline]
    pub fn pulses_per_unit(&self) -> Option<f32> {
        match self.pulses_per_unit.load(Ordering::Acquire) {
            0 => None,
            bits => Some(f32::from_bits(bits)),
        }
    }

    #[inline]
    pub(crate) fn cache_pulses_per_unit(&self, pulses_per_unit: f32) {
        self.pulses_per_unit
            .store(pulses_per_unit.to_bits(), Ordering::Release);
    }
}

/// Settings for both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerState {
    /// Z axis settings.
    pub z_axis: AxisSettings,
    /// R axis settings.
    pub r_axis: AxisSettings,
}

impl ControllerState {
    /// Create from the two axis settings.
    pub fn new(z_axis: AxisSettings, r_axis: AxisSettings) -> Self {
        Self { z_axis, r_axis }
    }

    /// Get the settings for an axis.
    #[inline]
    pub fn axis(&self, axis: Axis) -> &AxisSettings {
        match axis {
            Axis::Z => &self.z_axis,
            Axis::R => &self.r_axis,
        }
    }

    /// Get the settings for an axis mutably.
    #[inline]
    pub fn axis_mut(&mut self, axis: Axis) -> &mut AxisSettings {
        match axis {
            Axis::Z => &mut self.z_axis,
            Axis::R => &mut self.r_axis,
        }
    }
}
