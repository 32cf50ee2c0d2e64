//! Limit-switch interrupt entry point.

use crate::machine::CanonicalMachine;

/// Handle installed in the limit-switch pin-change interrupt.
///
/// Holds only a reference to the canonical machine. Reaching a limit requests
/// a feedhold and nothing else: no logging, no blocking, no planner access.
/// Disarming and teardown happen in the command loop.
pub struct AxisLimitHandler<'a, C: CanonicalMachine + ?Sized> {
    machine: &'a C,
}

impl<'a, C: CanonicalMachine + ?Sized> AxisLimitHandler<'a, C> {
    /// Create a handler for a canonical machine.
    #[inline]
    pub fn new(machine: &'a C) -> Self {
        Self { machine }
    }

    /// A limit switch changed state. Idempotent.
    #[inline]
    pub fn on_limit_reached(&self) {
        self.machine.begin_feedhold();
    }
}

impl<C: CanonicalMachine + ?Sized> Clone for AxisLimitHandler<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: CanonicalMachine + ?Sized> Copy for AxisLimitHandler<'_, C> {}
