//! Unit tests for the embedded-hal I/O layer.

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::digital::{Mock as PinMock, State as PinState, Transaction as PinTransaction};

use motor_controller::{Axis, ControllerIo, IoLayer, PinChangePort, SwitchMask};

#[derive(Default)]
struct Port {
    mask: SwitchMask,
    group_enabled: bool,
}

impl PinChangePort for Port {
    fn configure_switch_inputs(&mut self) {}

    fn enable_group(&mut self) {
        self.group_enabled = true;
    }

    fn mask(&self) -> SwitchMask {
        self.mask
    }

    fn set_mask(&mut self, mask: SwitchMask) {
        self.mask = mask;
    }
}

#[test]
fn test_configure_and_read_switches() {
    let z_switch = PinMock::new(&[
        PinTransaction::get(PinState::Low),
        PinTransaction::get(PinState::High),
    ]);
    let r_switch = PinMock::new(&[PinTransaction::get(PinState::High)]);
    let line = PinMock::new(&[PinTransaction::set(PinState::High)]);
    let port = Port {
        mask: SwitchMask::all(),
        ..Default::default()
    };

    let mut io = ControllerIo::new(port, z_switch, r_switch, line, NoopDelay::new());
    io.configure().unwrap();

    assert!(io.port().group_enabled);
    assert!(io.armed().is_empty());
    assert!(io.limit_hit(Axis::Z).unwrap());
    assert!(!io.limit_hit(Axis::Z).unwrap());
    assert!(!io.limit_hit(Axis::R).unwrap());

    let (_, mut z_switch, mut r_switch, mut line, _) = io.release();
    z_switch.done();
    r_switch.done();
    line.done();
}

#[test]
fn test_pulse_drives_line_low_then_high() {
    let line = PinMock::new(&[
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ]);
    let z_switch = PinMock::new(&[]);
    let r_switch = PinMock::new(&[]);

    let mut io = ControllerIo::new(Port::default(), z_switch, r_switch, line, NoopDelay::new());
    io.pulse_host_interrupt(50).unwrap();

    let (_, mut z_switch, mut r_switch, mut line, _) = io.release();
    z_switch.done();
    r_switch.done();
    line.done();
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Trace {
    High,
    Low,
    DelayNs(u64),
}

struct TracedLine(Rc<RefCell<Vec<Trace>>>);

impl ErrorType for TracedLine {
    type Error = Infallible;
}

impl OutputPin for TracedLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().push(Trace::Low);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().push(Trace::High);
        Ok(())
    }
}

struct TracedDelay(Rc<RefCell<Vec<Trace>>>);

impl DelayNs for TracedDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().push(Trace::DelayNs(u64::from(ns)));
    }
}

/// Low for at least the requested width, high on entry and on exit.
#[test]
fn test_pulse_timing() {
    let trace = Rc::new(RefCell::new(Vec::new()));
    let mut io = ControllerIo::new(
        Port::default(),
        PinMock::new(&[]),
        PinMock::new(&[]),
        TracedLine(trace.clone()),
        TracedDelay(trace.clone()),
    );

    io.configure().unwrap();
    io.pulse_host_interrupt(50).unwrap();

    let (_, mut z_switch, mut r_switch, _, _) = io.release();
    z_switch.done();
    r_switch.done();

    let trace = trace.borrow();
    assert_eq!(trace.first(), Some(&Trace::High));
    assert_eq!(trace.get(1), Some(&Trace::Low));
    assert_eq!(trace.last(), Some(&Trace::High));

    let low_ns: u64 = trace
        .iter()
        .filter_map(|t| match t {
            Trace::DelayNs(ns) => Some(*ns),
            _ => None,
        })
        .sum();
    assert!(low_ns >= 50_000_000, "pulse was {} ns", low_ns);

    // Nothing but delays between the falling and rising edge
    let between = &trace[2..trace.len() - 1];
    assert!(between.iter().all(|t| matches!(t, Trace::DelayNs(_))));
}
