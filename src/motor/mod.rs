//! Motor module for motor-controller.
//!
//! Provides the controller that sequences homing and moves, the limit-switch
//! interrupt handle and the state shared between contexts.

mod controller;
mod homing;
mod limit;
mod state;

pub use controller::{CommandOutcome, MotorController};
pub use homing::HomingOutcome;
pub use limit::AxisLimitHandler;
pub use state::{ControllerState, MotionSignals};
