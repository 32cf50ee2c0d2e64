//! # motor-controller
//!
//! Motion-control orchestration for a two-axis (Z and R) stepper printer
//! controller, with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Homing**: per-axis homing that arms the limit-switch interrupt before moving
//! - **Move lifecycle**: validated relative moves, end-of-motion teardown
//! - **Settings dispatch**: host settings commands with range checks
//! - **Host signalling**: active-low interrupt pulse to the host
//! - **Interrupt safety**: the limit-switch handler only requests a feedhold
//! - **no_std compatible**: Core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use motor_controller::{ControllerIo, MotionSignals, MotorController};
//!
//! static SIGNALS: MotionSignals = MotionSignals::new();
//!
//! let config = motor_controller::load_config("controller.toml")?;
//! let io = ControllerIo::new(port, z_switch, r_switch, interrupt_line, delay);
//! let mut controller = MotorController::new(&config, motors, planner, &MACHINE, io, &SIGNALS);
//!
//! controller.initialize()?;
//! controller.home_z_axis(-60_000)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Must come first: the logging macros are textually scoped
#[macro_use]
mod fmt;

// Core modules
pub mod axis;
pub mod command;
pub mod config;
pub mod error;
pub mod hal;
pub mod machine;
pub mod motion;
pub mod motor;

// Re-exports for ergonomic API
pub use axis::Axis;
pub use command::{Command, EventData, SettingsChange, SettingsTag};
pub use config::{validate_config, AxisSettings, ControllerConfig};
pub use error::{Error, Result};
pub use hal::{ControllerIo, IoLayer, PinChangePort, SwitchMask};
pub use machine::{CanonicalMachine, Motors, Planner};
pub use motion::{Direction, MoveRequest};
pub use motor::{
    AxisLimitHandler, CommandOutcome, ControllerState, HomingOutcome, MotionSignals,
    MotorController,
};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Degrees, MicrosteppingMode};
