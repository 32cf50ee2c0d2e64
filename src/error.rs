//! Error types for motor-controller.
//!
//! Provides unified error handling across configuration, host commands, motion
//! requests, homing and the I/O layer.

use core::fmt;

use crate::axis::Axis;
use crate::command::SettingsTag;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all motor-controller operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Host command decoding or parameter error
    Command(CommandError),
    /// Rejected motion request
    Motion(MotionError),
    /// Homing sequence error
    Homing(HomingError),
    /// Pin level read/write error
    Hardware(HardwareError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Microstepping mode not supported by the driver (valid: 1-6)
    InvalidMicrosteppingMode(u8),
    /// Invalid step angle (must be > 0)
    InvalidStepAngle(f32),
    /// Invalid units per revolution (must be > 0)
    InvalidUnitsPerRevolution(f32),
    /// Invalid max jerk (must be > 0)
    InvalidMaxJerk(f32),
    /// Invalid speed (must be > 0)
    InvalidSpeed(f32),
    /// Invalid max speed (must be > 0)
    InvalidMaxSpeed(f32),
    /// Speed is above the axis max speed
    SpeedExceedsMax {
        /// Configured speed
        speed: f32,
        /// Configured max speed
        max: f32,
    },
    /// Host interrupt pulse width must be > 0 ms
    InvalidPulseWidth(u32),
    /// Homing timeout must be > 0 ms when set
    InvalidHomingTimeout(u32),
    /// Minimum move distance must be > 0
    InvalidMinDistance(u32),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Host command errors.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    /// Command register not recognized
    UnknownRegister(u8),
    /// Command code not recognized for its register
    UnknownCommand {
        /// Register the command was sent to
        register: u8,
        /// Command code
        command: u8,
    },
    /// Settings tag not recognized
    UnknownSettingsTag(u8),
    /// Settings parameter out of range for its tag
    InvalidParameter {
        /// Settings field being written
        tag: SettingsTag,
        /// Rejected value
        value: f32,
    },
    /// Action parameter is not a whole distance in units
    InvalidDistance(f32),
}

/// Motion parameter named in a rejected move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionParameter {
    /// Axis speed
    Speed,
    /// Axis max speed
    MaxSpeed,
    /// Axis max jerk
    MaxJerk,
    /// Derived pulses per unit
    PulsesPerUnit,
}

/// Motion request errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionError {
    /// A motion parameter is zero, negative or not finite
    DegenerateParameter {
        /// Offending parameter
        parameter: MotionParameter,
        /// Its value
        value: f32,
    },
    /// Move distance below the configured minimum
    DistanceTooShort {
        /// Requested distance in units
        distance: i32,
        /// Minimum magnitude in units
        minimum: u32,
    },
}

/// Homing errors.
#[derive(Debug, Clone, PartialEq)]
pub enum HomingError {
    /// Limit switch did not trip before the configured timeout
    Timeout {
        /// Axis being homed
        axis: Axis,
        /// Time spent seeking in milliseconds
        elapsed_ms: u32,
    },
}

/// I/O layer errors.
#[derive(Debug, Clone, PartialEq)]
pub enum HardwareError {
    /// Pin operation failed
    PinError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Command(e) => write!(f, "Command error: {}", e),
            Error::Motion(e) => write!(f, "Motion error: {}", e),
            Error::Homing(e) => write!(f, "Homing error: {}", e),
            Error::Hardware(e) => write!(f, "Hardware error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidMicrosteppingMode(v) => {
                write!(f, "Invalid microstepping mode: {}. Valid modes: 1-6", v)
            }
            ConfigError::InvalidStepAngle(v) => write!(f, "Invalid step angle: {}. Must be > 0", v),
            ConfigError::InvalidUnitsPerRevolution(v) => {
                write!(f, "Invalid units per revolution: {}. Must be > 0", v)
            }
            ConfigError::InvalidMaxJerk(v) => write!(f, "Invalid max jerk: {}. Must be > 0", v),
            ConfigError::InvalidSpeed(v) => write!(f, "Invalid speed: {}. Must be > 0", v),
            ConfigError::InvalidMaxSpeed(v) => write!(f, "Invalid max speed: {}. Must be > 0", v),
            ConfigError::SpeedExceedsMax { speed, max } => {
                write!(f, "Speed {} exceeds max speed {}", speed, max)
            }
            ConfigError::InvalidPulseWidth(v) => {
                write!(f, "Invalid interrupt pulse width: {} ms. Must be > 0", v)
            }
            ConfigError::InvalidHomingTimeout(v) => {
                write!(f, "Invalid homing timeout: {} ms. Must be > 0", v)
            }
            ConfigError::InvalidMinDistance(v) => {
                write!(f, "Invalid minimum distance: {}. Must be > 0", v)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::UnknownRegister(r) => write!(f, "Unknown command register 0x{:02x}", r),
            CommandError::UnknownCommand { register, command } => {
                write!(f, "Unknown command {} for register 0x{:02x}", command, register)
            }
            CommandError::UnknownSettingsTag(t) => write!(f, "Unknown settings tag {}", t),
            CommandError::InvalidParameter { tag, value } => {
                write!(f, "Invalid value {} for {}", value, tag.name())
            }
            CommandError::InvalidDistance(v) => write!(f, "Invalid move distance {}", v),
        }
    }
}

impl fmt::Display for MotionParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MotionParameter::Speed => "speed",
            MotionParameter::MaxSpeed => "max speed",
            MotionParameter::MaxJerk => "max jerk",
            MotionParameter::PulsesPerUnit => "pulses per unit",
        };
        f.write_str(name)
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::DegenerateParameter { parameter, value } => {
                write!(f, "Invalid motion request: {} is {}", parameter, value)
            }
            MotionError::DistanceTooShort { distance, minimum } => {
                write!(f, "Invalid motion request: distance {} is below minimum {}", distance, minimum)
            }
        }
    }
}

impl fmt::Display for HomingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomingError::Timeout { axis, elapsed_ms } => {
                write!(f, "{} axis limit switch not reached after {} ms", axis.name(), elapsed_ms)
            }
        }
    }
}

impl fmt::Display for HardwareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HardwareError::PinError => write!(f, "GPIO pin operation failed"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<CommandError> for Error {
    fn from(e: CommandError) -> Self {
        Error::Command(e)
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Error::Motion(e)
    }
}

impl From<HomingError> for Error {
    fn from(e: HomingError) -> Self {
        Error::Homing(e)
    }
}

impl From<HardwareError> for Error {
    fn from(e: HardwareError) -> Self {
        Error::Hardware(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for CommandError {}

#[cfg(feature = "std")]
impl std::error::Error for MotionError {}

#[cfg(feature = "std")]
impl std::error::Error for HomingError {}

#[cfg(feature = "std")]
impl std::error::Error for HardwareError {}
