//! Per-axis homing.
//!
//! The homing state is re-derived from the switch level on every call; no
//! "homing in progress" marker is kept.

use crate::axis::Axis;
use crate::error::Result;
use crate::hal::IoLayer;
use crate::machine::{CanonicalMachine, Motors, Planner};
use crate::motion::MoveRequest;

use super::controller::MotorController;

/// How a homing request was resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingOutcome {
    /// The switch was already asserted. Motion is complete; nothing was armed or moved.
    AlreadyHome,
    /// The switch interrupt is armed and the homing move is queued.
    ///
    /// Completion arrives later through the limit handler and
    /// [`MotorController::finish_motion`].
    SeekingStarted(MoveRequest),
}

impl HomingOutcome {
    /// Whether homing finished within the call.
    #[inline]
    pub fn is_complete(&self) -> bool {
        matches!(self, HomingOutcome::AlreadyHome)
    }
}

impl<'a, M, P, C, IO> MotorController<'a, M, P, C, IO>
where
    M: Motors,
    P: Planner,
    C: CanonicalMachine,
    IO: IoLayer,
{
    /// Home an axis, moving up to `distance` units toward its limit switch.
    ///
    /// If the switch is asserted the motion-complete flag is raised at once.
    /// Otherwise the axis's pin-change interrupt is armed, the flag is cleared
    /// and only then is the homing move queued, so a switch tripping early in the move is not
    /// missed. There is no timeout unless one is configured and polled with
    /// [`MotorController::check_homing_timeout`].
    ///
    /// # Errors
    ///
    /// Pin read failures, and a `MotionError` if the axis settings cannot
    /// drive a move. A rejected request arms nothing and leaves the
    /// motion-complete flag as it was.
    pub fn home(&mut self, axis: Axis, distance: i32) -> Result<HomingOutcome> {
        if self.io_mut().limit_hit(axis)? {
            debug!("{} axis already home", axis.name());
            self.signals().set_motion_complete();
            return Ok(HomingOutcome::AlreadyHome);
        }

        let settings = *self.settings(axis);
        let request = MoveRequest::validate(axis, distance, &settings, self.min_distance())?;

        debug!("{} axis not home, arming limit interrupt and seeking", axis.name());
        self.io_mut().arm(axis);
        self.start_move(&request, &settings);

        Ok(HomingOutcome::SeekingStarted(request))
    }

    /// Home the Z axis.
    #[inline]
    pub fn home_z_axis(&mut self, distance: i32) -> Result<HomingOutcome> {
        self.home(Axis::Z, distance)
    }

    /// Home the R axis.
    #[inline]
    pub fn home_r_axis(&mut self, distance: i32) -> Result<HomingOutcome> {
        self.home(Axis::R, distance)
    }
}
