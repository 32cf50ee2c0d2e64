//! Homing cycle example.
//!
//! Demonstrates initializing the controller, homing both axes, running a
//! relative move and signalling the host, with printing stand-ins for the
//! motors driver, planner and canonical machine.

use std::cell::Cell;

use motor_controller::command::{action, general, Register};
use motor_controller::config::parse_config;
use motor_controller::{
    Axis, AxisSettings, CanonicalMachine, Command, ControllerIo, EventData, HomingOutcome,
    IoLayer, MicrosteppingMode, MotionSignals, MotorController, Motors, PinChangePort, Planner,
    SettingsTag, SwitchMask,
};

const CONFIG: &str = r#"
[z_axis]
step_angle = 1.8
units_per_revolution = 2000.0
microstepping_mode = 5
max_jerk = 1.0e7
speed = 300.0
max_speed = 600.0

[r_axis]
step_angle = 1.8
units_per_revolution = 180000.0
microstepping_mode = 6
max_jerk = 5.0e8
speed = 60000.0
max_speed = 90000.0
"#;

static SIGNALS: MotionSignals = MotionSignals::new();

/// Mock delay provider for demonstration.
struct MockDelay;

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        // In real code, this would use hardware timer
        std::thread::sleep(std::time::Duration::from_nanos(ns as u64));
    }
}

/// Mock pin for demonstration. Doubles as a limit switch input.
struct MockPin {
    name: &'static str,
    high: bool,
}

impl MockPin {
    fn new(name: &'static str, high: bool) -> Self {
        Self { name, high }
    }
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for MockPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        println!("  [{}] high", self.name);
        self.high = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        println!("  [{}] low", self.name);
        self.high = false;
        Ok(())
    }
}

impl embedded_hal::digital::InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.high)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.high)
    }
}

#[derive(Default)]
struct MockPort {
    mask: SwitchMask,
}

impl PinChangePort for MockPort {
    fn configure_switch_inputs(&mut self) {}

    fn enable_group(&mut self) {}

    fn mask(&self) -> SwitchMask {
        self.mask
    }

    fn set_mask(&mut self, mask: SwitchMask) {
        self.mask = mask;
    }
}

struct PrintingMotors;

impl Motors for PrintingMotors {
    fn initialize(&mut self) {
        println!("  motors: initialize");
    }

    fn reset(&mut self) {
        println!("  motors: reset");
    }

    fn set_microstepping_mode(&mut self, mode: MicrosteppingMode) {
        println!("  motors: microstepping 1/{}", mode.factor());
    }
}

struct PrintingPlanner;

impl Planner for PrintingPlanner {
    fn init(&mut self) {
        println!("  planner: init");
    }

    fn init_buffers(&mut self) {
        println!("  planner: flush buffers");
    }

    fn set_axis_position(&mut self, axis: Axis, position: f32) {
        println!("  planner: {} axis position = {}", axis.name(), position);
    }
}

#[derive(Default)]
struct PrintingMachine {
    held: Cell<bool>,
}

impl CanonicalMachine for PrintingMachine {
    fn init(&self) {
        println!("  machine: init");
    }

    fn cycle_start(&self) {
        self.held.set(false);
        println!("  machine: cycle start");
    }

    fn straight_feed(&self, axis: Axis, distance: f32, settings: &AxisSettings) {
        println!(
            "  machine: feed {} axis {} units at {} units/min",
            axis.name(),
            distance,
            settings.speed
        );
    }

    fn cycle_end(&self) {
        println!("  machine: cycle end");
    }

    fn begin_feedhold(&self) {
        self.held.set(true);
        println!("  machine: feedhold");
    }
}

fn main() -> motor_controller::Result<()> {
    println!("=== Homing Cycle Example ===\n");

    let config = parse_config(CONFIG)?;
    let machine = PrintingMachine::default();

    // Z starts on its switch, R does not
    let io = ControllerIo::new(
        MockPort::default(),
        MockPin::new("z switch", false),
        MockPin::new("r switch", true),
        MockPin::new("host int", false),
        MockDelay,
    );

    let mut controller =
        MotorController::new(&config, PrintingMotors, PrintingPlanner, &machine, io, &SIGNALS);

    println!("Initializing:");
    controller.initialize()?;

    println!("\nHoming Z:");
    let outcome = controller.home_z_axis(-60_000)?;
    println!("  -> {:?}, motion complete = {}", outcome, SIGNALS.is_motion_complete());

    println!("\nHoming R:");
    if let HomingOutcome::SeekingStarted(request) = controller.home_r_axis(1000)? {
        println!(
            "  -> seeking, {} pulses expected, armed = {:?}",
            request.expected_pulses(),
            controller.armed_switches()
        );
    }

    // Pin-change interrupt fires partway through the move
    println!("\nR switch trips:");
    controller.limit_handler().on_limit_reached();
    SIGNALS.record_steps(12_000);
    controller.finish_motion();
    println!(
        "  -> held = {}, armed = {:?}, motion complete = {}",
        machine.held.get(),
        controller.armed_switches(),
        SIGNALS.take_motion_complete()
    );

    println!("\nHost commands:");
    let commands = [
        (
            Register::ZSettings as u8,
            EventData::new(SettingsTag::Microstepping as u8, 4.0),
        ),
        (Register::ZAction as u8, EventData::new(action::MOVE, 250.0)),
        (Register::General as u8, EventData::new(general::CLEAR_MOTION, 0.0)),
        (Register::General as u8, EventData::new(general::INTERRUPT, 0.0)),
    ];

    for (register, data) in commands {
        let command = Command::decode(register, data)?;
        let outcome = controller.execute(command)?;
        println!("  -> {:?}", outcome);
    }

    let (_, _, io) = controller.release();
    println!("\nFinal switch masks: {:?}", io.armed());

    println!("\n=== Example Complete ===");
    Ok(())
}
