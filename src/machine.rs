//! Interfaces of the motion subsystems the controller drives.
//!
//! The segment planner, canonical machine and motors driver live outside this
//! crate; the controller only calls them through these traits.

use crate::axis::Axis;
use crate::config::{AxisSettings, MicrosteppingMode};

/// Stepper driver: pulse generation and microstepping.
pub trait Motors {
    /// Bring the drivers up.
    fn initialize(&mut self);

    /// Reset the drivers and clear driver fault state.
    fn reset(&mut self);

    /// Reconfigure the drivers' microstepping mode.
    fn set_microstepping_mode(&mut self, mode: MicrosteppingMode);
}

/// Segment planner owning the motion queue.
pub trait Planner {
    /// Initialise planner state.
    fn init(&mut self);

    /// Discard every queued segment.
    ///
    /// Must be safe on an empty queue.
    fn init_buffers(&mut self);

    /// Overwrite the tracked position of an axis.
    fn set_axis_position(&mut self, axis: Axis, position: f32);
}

/// Canonical machine owning the run/feedhold/idle cycle state.
///
/// The machine is process-wide and is reached both from the command loop and
/// from the limit-switch interrupt, so every method takes `&self`.
/// Implementations keep their state behind interior mutability.
pub trait CanonicalMachine {
    /// Initialise machine state.
    fn init(&self);

    /// Start (or resume) a cycle.
    fn cycle_start(&self);

    /// Queue a straight feed of `distance` units on `axis`.
    fn straight_feed(&self, axis: Axis, distance: f32, settings: &AxisSettings);

    /// End the current cycle. Must be safe when no cycle is running.
    fn cycle_end(&self);

    /// Request a feedhold.
    ///
    /// Called from interrupt context: must only set a flag or push to a queue.
    fn begin_feedhold(&self);
}
