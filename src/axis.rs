//! Axis identifiers.

/// One of the two stepper-driven axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// Build platform (linear).
    Z,
    /// Tray rotation.
    R,
}

impl Axis {
    /// Both axes in motor index order.
    pub const ALL: [Axis; 2] = [Axis::Z, Axis::R];

    /// Motor index used by the kinematics and planner.
    #[inline]
    pub const fn index(self) -> u8 {
        match self {
            Axis::Z => 0,
            Axis::R => 1,
        }
    }

    /// Axis for a motor index.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Axis::Z),
            1 => Some(Axis::R),
            _ => None,
        }
    }

    /// Short name for display.
    pub const fn name(self) -> &'static str {
        match self {
            Axis::Z => "Z",
            Axis::R => "R",
        }
    }
}
