//! Hardware I/O layer.
//!
//! Covers the host interrupt line, the two limit-switch inputs and the
//! pin-change interrupt registers. Pins go through embedded-hal 1.0; the
//! pin-change registers have no embedded-hal equivalent and sit behind
//! [`PinChangePort`].

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::axis::Axis;
use crate::error::{HardwareError, Result};

bitflags::bitflags! {
    /// Per-pin mask bits of the limit-switch pin-change group.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SwitchMask: u8 {
        /// Z axis limit switch.
        const Z_AXIS = 1 << 0;
        /// R axis limit switch.
        const R_AXIS = 1 << 1;
    }
}

impl SwitchMask {
    /// Mask bit for an axis's limit switch.
    #[inline]
    pub const fn for_axis(axis: Axis) -> Self {
        match axis {
            Axis::Z => SwitchMask::Z_AXIS,
            Axis::R => SwitchMask::R_AXIS,
        }
    }
}

/// Register-level access to the limit-switch pin-change interrupt group.
///
/// Register writes cannot fail.
pub trait PinChangePort {
    /// Make both limit-switch pins inputs with the internal pull-up enabled.
    fn configure_switch_inputs(&mut self);

    /// Enable the pin-change interrupt for the limit-switch group.
    fn enable_group(&mut self);

    /// Current per-pin mask.
    fn mask(&self) -> SwitchMask;

    /// Write the per-pin mask.
    fn set_mask(&mut self, mask: SwitchMask);
}

/// Everything the controller needs from the board.
pub trait IoLayer {
    /// Bring the interrupt line, switch inputs and pin-change group to their idle state.
    ///
    /// On return the host line is high, the group is enabled and both masks are clear.
    fn configure(&mut self) -> Result<()>;

    /// Whether the axis's limit switch is asserted right now.
    fn limit_hit(&mut self, axis: Axis) -> Result<bool>;

    /// Enable the pin-change interrupt for an axis's switch.
    fn arm(&mut self, axis: Axis);

    /// Disable the pin-change interrupt for an axis's switch.
    fn disarm(&mut self, axis: Axis);

    /// Masks currently enabled.
    fn armed(&self) -> SwitchMask;

    /// Drive the host line low for `width_ms`, then high again. Blocks.
    fn pulse_host_interrupt(&mut self, width_ms: u32) -> Result<()>;
}

/// [`IoLayer`] over embedded-hal pins and a [`PinChangePort`].
///
/// Generic over:
/// - `PORT`: pin-change registers
/// - `ZSW`, `RSW`: limit-switch inputs (asserted when low)
/// - `INT`: host interrupt line (active low)
/// - `DELAY`: delay provider for the pulse width
pub struct ControllerIo<PORT, ZSW, RSW, INT, DELAY>
where
    PORT: PinChangePort,
    ZSW: InputPin,
    RSW: InputPin,
    INT: OutputPin,
    DELAY: DelayNs,
{
    port: PORT,
    z_switch: ZSW,
    r_switch: RSW,
    interrupt_line: INT,
    delay: DELAY,
}

impl<PORT, ZSW, RSW, INT, DELAY> ControllerIo<PORT, ZSW, RSW, INT, DELAY>
where
    PORT: PinChangePort,
    ZSW: InputPin,
    RSW: InputPin,
    INT: OutputPin,
    DELAY: DelayNs,
{
    /// Bundle the board resources.
    pub fn new(port: PORT, z_switch: ZSW, r_switch: RSW, interrupt_line: INT, delay: DELAY) -> Self {
        Self {
            port,
            z_switch,
            r_switch,
            interrupt_line,
            delay,
        }
    }

    /// Get the pin-change port.
    #[inline]
    pub fn port(&self) -> &PORT {
        &self.port
    }

    /// Give the resources back.
    pub fn release(self) -> (PORT, ZSW, RSW, INT, DELAY) {
        (
            self.port,
            self.z_switch,
            self.r_switch,
            self.interrupt_line,
            self.delay,
        )
    }
}

impl<PORT, ZSW, RSW, INT, DELAY> IoLayer for ControllerIo<PORT, ZSW, RSW, INT, DELAY>
where
    PORT: PinChangePort,
    ZSW: InputPin,
    RSW: InputPin,
    INT: OutputPin,
    DELAY: DelayNs,
{
    fn configure(&mut self) -> Result<()> {
        // Active low, idle high
        self.interrupt_line
            .set_high()
            .map_err(|_| HardwareError::PinError)?;

        self.port.configure_switch_inputs();
        self.port.enable_group();

        // Group enabled, individual pins stay masked until homing arms them
        let mask = self.port.mask();
        self.port.set_mask(mask.difference(SwitchMask::all()));

        Ok(())
    }

    fn limit_hit(&mut self, axis: Axis) -> Result<bool> {
        let low = match axis {
            Axis::Z => self.z_switch.is_low().map_err(|_| HardwareError::PinError),
            Axis::R => self.r_switch.is_low().map_err(|_| HardwareError::PinError),
        };
        Ok(low?)
    }

    fn arm(&mut self, axis: Axis) {
        let mask = self.port.mask();
        self.port.set_mask(mask | SwitchMask::for_axis(axis));
    }

    fn disarm(&mut self, axis: Axis) {
        let mask = self.port.mask();
        self.port.set_mask(mask.difference(SwitchMask::for_axis(axis)));
    }

    fn armed(&self) -> SwitchMask {
        self.port.mask().intersection(SwitchMask::all())
    }

    fn pulse_host_interrupt(&mut self, width_ms: u32) -> Result<()> {
        self.interrupt_line
            .set_low()
            .map_err(|_| HardwareError::PinError)?;
        self.delay.delay_ms(width_ms);
        self.interrupt_line
            .set_high()
            .map_err(|_| HardwareError::PinError)?;
        Ok(())
    }
}
