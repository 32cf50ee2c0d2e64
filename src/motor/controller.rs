//! Motor controller: initialization, settings, move lifecycle and host signalling.

use crate::axis::Axis;
use crate::command::{Command, EventData, SettingsChange, SettingsTag};
use crate::config::{AxisSettings, ControllerConfig, HomingConfig, HostConfig, MotionConfig};
use crate::error::{Error, HomingError, Result};
use crate::hal::{IoLayer, SwitchMask};
use crate::machine::{CanonicalMachine, Motors, Planner};
use crate::motion::{Direction, MoveRequest};

use super::homing::HomingOutcome;
use super::limit::AxisLimitHandler;
use super::state::{ControllerState, MotionSignals};

/// Result of executing a decoded host command.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandOutcome {
    /// The command completed synchronously.
    Done,
    /// A settings field was written.
    SettingsApplied(SettingsTag),
    /// A move was queued.
    MoveStarted(MoveRequest),
    /// A homing request was resolved or started.
    Homing(HomingOutcome),
}

/// Orchestrates the motors driver, planner and canonical machine for the Z and R axes.
///
/// Generic over:
/// - `M`: motors driver
/// - `P`: segment planner
/// - `C`: canonical machine (shared with the limit-switch interrupt)
/// - `IO`: board I/O layer
///
/// All methods run in the command loop. The only entry point meant for
/// interrupt context is [`AxisLimitHandler`], obtained from [`Self::limit_handler`].
pub struct MotorController<'a, M, P, C, IO>
where
    M: Motors,
    P: Planner,
    C: CanonicalMachine,
    IO: IoLayer,
{
    motors: M,
    planner: P,
    machine: &'a C,
    io: IO,
    signals: &'a MotionSignals,
    state: ControllerState,
    host: HostConfig,
    homing: HomingConfig,
    motion: MotionConfig,
}

impl<'a, M, P, C, IO> MotorController<'a, M, P, C, IO>
where
    M: Motors,
    P: Planner,
    C: CanonicalMachine,
    IO: IoLayer,
{
    /// Create a controller. Nothing is touched until [`Self::initialize`].
    pub fn new(
        config: &ControllerConfig,
        motors: M,
        planner: P,
        machine: &'a C,
        io: IO,
        signals: &'a MotionSignals,
    ) -> Self {
        Self {
            motors,
            planner,
            machine,
            io,
            signals,
            state: ControllerState::new(config.z_axis, config.r_axis),
            host: config.host,
            homing: config.homing,
            motion: config.motion,
        }
    }

    /// Configure I/O, then initialize the motors driver, planner and canonical machine.
    ///
    /// Leaves the host line high, the pin-change group enabled and both
    /// limit-switch masks disabled.
    pub fn initialize(&mut self) -> Result<()> {
        self.io.configure()?;

        self.motors.initialize();
        self.planner.init();
        self.machine.init();

        info!("motor controller initialized");
        Ok(())
    }

    /// Reset the motors driver and clear its fault state.
    ///
    /// Planner and cycle state are left alone.
    pub fn reset(&mut self) {
        self.motors.reset();
    }

    /// Pulse the host interrupt line low for the configured width (50 ms by default).
    ///
    /// Blocks for the whole pulse. Never call from interrupt context.
    pub fn generate_interrupt(&mut self) -> Result<()> {
        self.io.pulse_host_interrupt(self.host.interrupt_pulse_ms)
    }

    /// Apply a settings command to one axis.
    ///
    /// The microstepping tag also reconfigures the motors driver. A rejected
    /// command changes nothing.
    pub fn handle_settings_command(&mut self, axis: Axis, data: EventData) -> Result<SettingsTag> {
        let change = SettingsChange::from_event(data).map_err(|e| {
            warn!("rejected settings command {} for {} axis", data.command, axis.name());
            Error::Command(e)
        })?;

        if let SettingsChange::Microstepping(mode) = change {
            self.motors.set_microstepping_mode(mode);
        }
        change.apply(self.state.axis_mut(axis));

        debug!("{} axis {} set to {}", axis.name(), change.tag().name(), data.parameter);
        Ok(change.tag())
    }

    /// Queue a relative move of `distance` units on `axis`.
    ///
    /// Every move starts from a momentary zero on both axes. The canonical
    /// machine receives the magnitude of `distance`; reverse travel is not
    /// distinguished on this path yet.
    ///
    /// # Errors
    ///
    /// Returns a `MotionError` for degenerate settings or a too-short
    /// distance, before any state is touched.
    pub fn move_axis(
        &mut self,
        axis: Axis,
        distance: i32,
        settings: &AxisSettings,
    ) -> Result<MoveRequest> {
        let request = MoveRequest::validate(axis, distance, settings, self.motion.min_distance)?;
        self.start_move(&request, settings);
        Ok(request)
    }

    pub(super) fn start_move(&mut self, request: &MoveRequest, settings: &AxisSettings) {
        self.signals.clear_motion_complete();
        self.signals.reset_step_count();
        self.signals.cache_pulses_per_unit(request.pulses_per_unit);

        // All moves are relative
        self.planner.set_axis_position(Axis::Z, 0.0);
        self.planner.set_axis_position(Axis::R, 0.0);

        debug!(
            "move {} axis: distance {}, pulses per unit {}, max jerk {}",
            request.axis.name(),
            request.distance,
            request.pulses_per_unit,
            settings.max_jerk
        );
        if request.direction() == Direction::Reverse {
            warn!("reverse move on {} axis submitted as forward travel", request.axis.name());
        }

        self.machine.cycle_start();
        self.machine
            .straight_feed(request.axis, request.magnitude, settings);
    }

    /// Reset the step counter, flush the planner and end the cycle.
    ///
    /// Safe to call repeatedly.
    pub fn end_motion(&mut self) {
        debug!("motion ended after {} step pulses", self.signals.step_count());

        self.signals.reset_step_count();
        self.planner.init_buffers();
        self.machine.cycle_end();
    }

    /// Complete the in-flight homing or move request.
    ///
    /// Disarms both limit-switch interrupts, runs [`Self::end_motion`] and
    /// then raises the motion-complete flag. Call from the command loop once
    /// the feedhold raised by a limit switch has settled, or when the planner
    /// drains on its own.
    pub fn finish_motion(&mut self) {
        for axis in Axis::ALL {
            self.io.disarm(axis);
        }
        self.end_motion();
        self.signals.set_motion_complete();
    }

    /// Give up on a homing move that has run for `elapsed_ms` without tripping its switch.
    ///
    /// Does nothing unless a timeout is configured, the axis's limit interrupt
    /// is armed and the timeout has been reached. Fires at most once per
    /// homing move since the timeout path disarms the axis.
    ///
    /// # Errors
    ///
    /// Returns `HomingError::Timeout` after holding the machine, disarming the
    /// axis and ending the motion. The motion-complete flag stays clear.
    pub fn check_homing_timeout(&mut self, axis: Axis, elapsed_ms: u32) -> Result<()> {
        let Some(timeout_ms) = self.homing.timeout_ms else {
            return Ok(());
        };

        let seeking = self.io.armed().contains(SwitchMask::for_axis(axis));
        if !seeking || self.signals.is_motion_complete() || elapsed_ms < timeout_ms {
            return Ok(());
        }

        warn!("{} axis homing timed out after {} ms", axis.name(), elapsed_ms);
        self.machine.begin_feedhold();
        self.io.disarm(axis);
        self.end_motion();

        Err(HomingError::Timeout { axis, elapsed_ms }.into())
    }

    /// Request a feedhold because a limit switch tripped.
    pub fn handle_axis_limit_reached(&self) {
        self.limit_handler().on_limit_reached();
    }

    /// Handle for the limit-switch pin-change interrupt.
    pub fn limit_handler(&self) -> AxisLimitHandler<'a, C> {
        AxisLimitHandler::new(self.machine)
    }

    /// Run a decoded host command.
    pub fn execute(&mut self, command: Command) -> Result<CommandOutcome> {
        match command {
            Command::Reset => {
                self.reset();
                Ok(CommandOutcome::Done)
            }
            Command::Pause => {
                self.machine.begin_feedhold();
                Ok(CommandOutcome::Done)
            }
            Command::Resume => {
                self.machine.cycle_start();
                Ok(CommandOutcome::Done)
            }
            Command::ClearMotion => {
                self.finish_motion();
                Ok(CommandOutcome::Done)
            }
            Command::Interrupt => {
                self.generate_interrupt()?;
                Ok(CommandOutcome::Done)
            }
            Command::Settings { axis, data } => self
                .handle_settings_command(axis, data)
                .map(CommandOutcome::SettingsApplied),
            Command::Move { axis, distance } => {
                let settings = *self.state.axis(axis);
                self.move_axis(axis, distance, &settings)
                    .map(CommandOutcome::MoveStarted)
            }
            Command::Home { axis, distance } => {
                self.home(axis, distance).map(CommandOutcome::Homing)
            }
        }
    }

    /// Get the settings for an axis.
    #[inline]
    pub fn settings(&self, axis: Axis) -> &AxisSettings {
        self.state.axis(axis)
    }

    /// Get both axes' settings.
    #[inline]
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Get the shared signals.
    #[inline]
    pub fn signals(&self) -> &'a MotionSignals {
        self.signals
    }

    /// Limit-switch interrupts currently armed.
    #[inline]
    pub fn armed_switches(&self) -> SwitchMask {
        self.io.armed()
    }

    pub(super) fn io_mut(&mut self) -> &mut IO {
        &mut self.io
    }

    pub(super) fn min_distance(&self) -> u32 {
        self.motion.min_distance
    }

    /// Give back the owned collaborators.
    pub fn release(self) -> (M, P, IO) {
        (self.motors, self.planner, self.io)
    }
}
