//! Host command decoding.
//!
//! Commands arrive as a register byte plus an [`EventData`] envelope (command
//! code and one numeric parameter). Decoding is total: every input maps to a
//! [`Command`] or a [`CommandError`].

use libm::truncf;

use crate::axis::Axis;
use crate::config::{AxisSettings, MicrosteppingMode};
use crate::error::CommandError;

/// Command envelope received from the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventData {
    /// Command code, interpreted per register.
    pub command: u8,
    /// Command parameter.
    pub parameter: f32,
}

impl EventData {
    /// Create an envelope.
    #[inline]
    pub const fn new(command: u8, parameter: f32) -> Self {
        Self { command, parameter }
    }
}

/// Command registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// Controller-wide commands.
    General = 0x20,
    /// R axis settings.
    RotationSettings = 0x21,
    /// R axis actions.
    RotationAction = 0x22,
    /// Z axis settings.
    ZSettings = 0x23,
    /// Z axis actions.
    ZAction = 0x24,
}

impl TryFrom<u8> for Register {
    type Error = CommandError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x20 => Ok(Register::General),
            0x21 => Ok(Register::RotationSettings),
            0x22 => Ok(Register::RotationAction),
            0x23 => Ok(Register::ZSettings),
            0x24 => Ok(Register::ZAction),
            other => Err(CommandError::UnknownRegister(other)),
        }
    }
}

/// Settings field selected by a settings command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SettingsTag {
    /// Full-step angle.
    StepAngle = 1,
    /// Travel per revolution.
    UnitsPerRevolution = 2,
    /// Driver microstepping mode.
    Microstepping = 3,
    /// Max jerk.
    MaxJerk = 4,
    /// Feed speed.
    Speed = 5,
    /// Max speed.
    MaxSpeed = 6,
}

impl SettingsTag {
    /// Field name for display.
    pub const fn name(self) -> &'static str {
        match self {
            SettingsTag::StepAngle => "step angle",
            SettingsTag::UnitsPerRevolution => "units per revolution",
            SettingsTag::Microstepping => "microstepping mode",
            SettingsTag::MaxJerk => "max jerk",
            SettingsTag::Speed => "speed",
            SettingsTag::MaxSpeed => "max speed",
        }
    }
}

impl TryFrom<u8> for SettingsTag {
    type Error = CommandError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SettingsTag::StepAngle),
            2 => Ok(SettingsTag::UnitsPerRevolution),
            3 => Ok(SettingsTag::Microstepping),
            4 => Ok(SettingsTag::MaxJerk),
            5 => Ok(SettingsTag::Speed),
            6 => Ok(SettingsTag::MaxSpeed),
            other => Err(CommandError::UnknownSettingsTag(other)),
        }
    }
}

/// A checked settings mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingsChange {
    /// New step angle in degrees.
    StepAngle(f32),
    /// New travel per revolution.
    UnitsPerRevolution(f32),
    /// New microstepping mode; also reconfigures the driver.
    Microstepping(MicrosteppingMode),
    /// New max jerk.
    MaxJerk(f32),
    /// New feed speed.
    Speed(f32),
    /// New max speed.
    MaxSpeed(f32),
}

impl SettingsChange {
    /// Decode and range-check a settings command.
    ///
    /// # Errors
    ///
    /// `UnknownSettingsTag` for an unrecognized tag, `InvalidParameter` for a
    /// value that is not finite and positive or not a supported mode.
    pub fn from_event(data: EventData) -> Result<Self, CommandError> {
        let tag = SettingsTag::try_from(data.command)?;
        let value = data.parameter;
        let invalid = CommandError::InvalidParameter { tag, value };

        if !(value.is_finite() && value > 0.0) {
            return Err(invalid);
        }

        let change = match tag {
            SettingsTag::StepAngle => SettingsChange::StepAngle(value),
            SettingsTag::UnitsPerRevolution => SettingsChange::UnitsPerRevolution(value),
            SettingsTag::Microstepping => {
                if truncf(value) != value || value > u8::MAX as f32 {
                    return Err(invalid);
                }
                let mode = MicrosteppingMode::new(value as u8).map_err(|_| invalid)?;
                SettingsChange::Microstepping(mode)
            }
            SettingsTag::MaxJerk => SettingsChange::MaxJerk(value),
            SettingsTag::Speed => SettingsChange::Speed(value),
            SettingsTag::MaxSpeed => SettingsChange::MaxSpeed(value),
        };

        Ok(change)
    }

    /// Tag this change writes.
    pub fn tag(&self) -> SettingsTag {
        match self {
            SettingsChange::StepAngle(_) => SettingsTag::StepAngle,
            SettingsChange::UnitsPerRevolution(_) => SettingsTag::UnitsPerRevolution,
            SettingsChange::Microstepping(_) => SettingsTag::Microstepping,
            SettingsChange::MaxJerk(_) => SettingsTag::MaxJerk,
            SettingsChange::Speed(_) => SettingsTag::Speed,
            SettingsChange::MaxSpeed(_) => SettingsTag::MaxSpeed,
        }
    }

    /// Write the change into one settings record.
    pub fn apply(&self, settings: &mut AxisSettings) {
        match *self {
            SettingsChange::StepAngle(v) => settings.set_step_angle(v),
            SettingsChange::UnitsPerRevolution(v) => settings.set_units_per_revolution(v),
            SettingsChange::Microstepping(mode) => settings.set_microstepping_mode(mode),
            SettingsChange::MaxJerk(v) => settings.set_max_jerk(v),
            SettingsChange::Speed(v) => settings.set_speed(v),
            SettingsChange::MaxSpeed(v) => settings.set_max_speed(v),
        }
    }
}

/// General register command codes.
pub mod general {
    /// Reset the motor drivers.
    pub const RESET: u8 = 1;
    /// Feedhold the current motion.
    pub const PAUSE: u8 = 2;
    /// Resume after a feedhold.
    pub const RESUME: u8 = 3;
    /// Finish the current motion and disarm the limit interrupts.
    pub const CLEAR_MOTION: u8 = 4;
    /// Pulse the host interrupt line.
    pub const INTERRUPT: u8 = 5;
}

/// Action register command codes.
pub mod action {
    /// Relative move.
    pub const MOVE: u8 = 1;
    /// Home the axis.
    pub const HOME: u8 = 2;
}

/// A decoded host command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Reset the motor drivers.
    Reset,
    /// Request a feedhold.
    Pause,
    /// Restart the cycle after a feedhold.
    Resume,
    /// Finish the current motion.
    ClearMotion,
    /// Pulse the host interrupt line.
    Interrupt,
    /// Update one axis setting.
    Settings {
        /// Target axis.
        axis: Axis,
        /// Raw tag and value.
        data: EventData,
    },
    /// Relative move.
    Move {
        /// Axis to move.
        axis: Axis,
        /// Signed distance in units.
        distance: i32,
    },
    /// Home an axis.
    Home {
        /// Axis to home.
        axis: Axis,
        /// Signed homing travel in units.
        distance: i32,
    },
}

impl Command {
    /// Decode a command written to `register`.
    ///
    /// Settings commands are passed through undecoded; their tag and value
    /// are checked when the command is applied.
    ///
    /// # Errors
    ///
    /// Returns a `CommandError` for unknown registers, unknown command codes
    /// and action distances that are not whole numbers in range.
    pub fn decode(register: u8, data: EventData) -> Result<Self, CommandError> {
        match Register::try_from(register)? {
            Register::General => match data.command {
                general::RESET => Ok(Command::Reset),
                general::PAUSE => Ok(Command::Pause),
                general::RESUME => Ok(Command::Resume),
                general::CLEAR_MOTION => Ok(Command::ClearMotion),
                general::INTERRUPT => Ok(Command::Interrupt),
                command => Err(CommandError::UnknownCommand { register, command }),
            },
            Register::ZSettings => Ok(Command::Settings { axis: Axis::Z, data }),
            Register::RotationSettings => Ok(Command::Settings { axis: Axis::R, data }),
            Register::ZAction => Self::decode_action(register, Axis::Z, data),
            Register::RotationAction => Self::decode_action(register, Axis::R, data),
        }
    }

    fn decode_action(register: u8, axis: Axis, data: EventData) -> Result<Self, CommandError> {
        let distance = whole_distance(data.parameter)?;
        match data.command {
            action::MOVE => Ok(Command::Move { axis, distance }),
            action::HOME => Ok(Command::Home { axis, distance }),
            command => Err(CommandError::UnknownCommand { register, command }),
        }
    }
}

fn whole_distance(value: f32) -> Result<i32, CommandError> {
    // i32::MAX is not representable as f32; 2^31 is the first value out of range
    const LIMIT: f32 = 2_147_483_648.0;

    if value.is_finite() && truncf(value) == value && (-LIMIT..LIMIT).contains(&value) {
        Ok(value as i32)
    } else {
        Err(CommandError::InvalidDistance(value))
    }
}
