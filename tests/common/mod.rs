//! Recording mocks shared by the integration tests.
//!
//! Every mock appends to one event log so tests can assert call order across
//! the I/O layer, motors driver, planner and canonical machine.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use motor_controller::config::{ControllerConfig, Degrees, MicrosteppingMode};
use motor_controller::{
    Axis, AxisSettings, CanonicalMachine, IoLayer, MotionSignals, MotorController, Motors,
    Planner, Result, SwitchMask,
};

/// Observable side effect.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    IoConfigure,
    Arm(Axis),
    Disarm(Axis),
    Pulse(u32),
    MotorsInit,
    MotorsReset,
    Microstepping(u8),
    PlannerInit,
    InitBuffers,
    SetPosition(Axis, f32),
    MachineInit,
    CycleStart,
    StraightFeed(Axis, f32),
    CycleEnd,
    Feedhold,
}

pub type Log = Rc<RefCell<Vec<Event>>>;

pub fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn events(log: &Log) -> Vec<Event> {
    log.borrow().clone()
}

pub fn clear(log: &Log) {
    log.borrow_mut().clear();
}

pub fn position_of(log: &Log, event: &Event) -> Option<usize> {
    log.borrow().iter().position(|e| e == event)
}

pub struct MockMotors {
    log: Log,
}

impl Motors for MockMotors {
    fn initialize(&mut self) {
        self.log.borrow_mut().push(Event::MotorsInit);
    }

    fn reset(&mut self) {
        self.log.borrow_mut().push(Event::MotorsReset);
    }

    fn set_microstepping_mode(&mut self, mode: MicrosteppingMode) {
        self.log.borrow_mut().push(Event::Microstepping(mode.value()));
    }
}

pub struct MockPlanner {
    log: Log,
}

impl Planner for MockPlanner {
    fn init(&mut self) {
        self.log.borrow_mut().push(Event::PlannerInit);
    }

    fn init_buffers(&mut self) {
        self.log.borrow_mut().push(Event::InitBuffers);
    }

    fn set_axis_position(&mut self, axis: Axis, position: f32) {
        self.log.borrow_mut().push(Event::SetPosition(axis, position));
    }
}

pub struct MockMachine {
    log: Log,
}

impl MockMachine {
    pub fn new(log: &Log) -> Self {
        Self { log: log.clone() }
    }
}

impl CanonicalMachine for MockMachine {
    fn init(&self) {
        self.log.borrow_mut().push(Event::MachineInit);
    }

    fn cycle_start(&self) {
        self.log.borrow_mut().push(Event::CycleStart);
    }

    fn straight_feed(&self, axis: Axis, distance: f32, _settings: &AxisSettings) {
        self.log.borrow_mut().push(Event::StraightFeed(axis, distance));
    }

    fn cycle_end(&self) {
        self.log.borrow_mut().push(Event::CycleEnd);
    }

    fn begin_feedhold(&self) {
        self.log.borrow_mut().push(Event::Feedhold);
    }
}

/// Switch levels the test can flip while the controller owns the I/O.
#[derive(Clone, Default)]
pub struct Switches {
    pub z_hit: Rc<Cell<bool>>,
    pub r_hit: Rc<Cell<bool>>,
}

impl Switches {
    pub fn set(&self, axis: Axis, hit: bool) {
        match axis {
            Axis::Z => self.z_hit.set(hit),
            Axis::R => self.r_hit.set(hit),
        }
    }
}

pub struct MockIo {
    log: Log,
    switches: Switches,
    armed: SwitchMask,
}

impl IoLayer for MockIo {
    fn configure(&mut self) -> Result<()> {
        self.armed = SwitchMask::empty();
        self.log.borrow_mut().push(Event::IoConfigure);
        Ok(())
    }

    fn limit_hit(&mut self, axis: Axis) -> Result<bool> {
        Ok(match axis {
            Axis::Z => self.switches.z_hit.get(),
            Axis::R => self.switches.r_hit.get(),
        })
    }

    fn arm(&mut self, axis: Axis) {
        self.armed |= SwitchMask::for_axis(axis);
        self.log.borrow_mut().push(Event::Arm(axis));
    }

    fn disarm(&mut self, axis: Axis) {
        self.armed.remove(SwitchMask::for_axis(axis));
        self.log.borrow_mut().push(Event::Disarm(axis));
    }

    fn armed(&self) -> SwitchMask {
        self.armed
    }

    fn pulse_host_interrupt(&mut self, width_ms: u32) -> Result<()> {
        self.log.borrow_mut().push(Event::Pulse(width_ms));
        Ok(())
    }
}

pub type TestController<'a> = MotorController<'a, MockMotors, MockPlanner, MockMachine, MockIo>;

pub fn z_settings() -> AxisSettings {
    AxisSettings::new(
        Degrees(1.8),
        2000.0,
        MicrosteppingMode::SIXTEENTH,
        1.0e7,
        300.0,
        600.0,
    )
}

pub fn r_settings() -> AxisSettings {
    AxisSettings::new(
        Degrees(1.8),
        180_000.0,
        MicrosteppingMode::THIRTY_SECOND,
        5.0e8,
        60_000.0,
        90_000.0,
    )
}

pub fn test_config() -> ControllerConfig {
    ControllerConfig::new(z_settings(), r_settings())
}

/// Build a controller wired to recording mocks.
///
/// The I/O starts with both masks armed so tests can see `initialize` clear them.
pub fn build<'a>(
    config: &ControllerConfig,
    log: &Log,
    machine: &'a MockMachine,
    signals: &'a MotionSignals,
) -> (TestController<'a>, Switches) {
    let switches = Switches::default();
    let io = MockIo {
        log: log.clone(),
        switches: switches.clone(),
        armed: SwitchMask::all(),
    };
    let controller = MotorController::new(
        config,
        MockMotors { log: log.clone() },
        MockPlanner { log: log.clone() },
        machine,
        io,
        signals,
    );
    (controller, switches)
}
