//! Configuration module for motor-controller.
//!
//! Provides per-axis calibration settings and the controller configuration,
//! loaded from TOML files (with `std` feature) or built in code.

mod axis;
#[cfg(feature = "std")]
mod loader;
mod system;
pub mod units;
mod validation;

pub use axis::AxisSettings;
pub use system::{
    ControllerConfig, HomingConfig, HostConfig, MotionConfig, DEFAULT_INTERRUPT_PULSE_MS,
    DEFAULT_MIN_DISTANCE,
};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Degrees, MicrosteppingMode};
