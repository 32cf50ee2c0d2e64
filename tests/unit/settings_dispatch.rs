//! Property tests for settings dispatch and move submission.

use proptest::prelude::*;

use motor_controller::{Axis, AxisSettings, EventData, MotionSignals, SettingsTag};

use crate::common::*;

fn axis_strategy() -> impl Strategy<Value = Axis> {
    prop_oneof![Just(Axis::Z), Just(Axis::R)]
}

fn other(axis: Axis) -> Axis {
    match axis {
        Axis::Z => Axis::R,
        Axis::R => Axis::Z,
    }
}

/// Settings with the single field selected by `tag` replaced.
fn with_field(mut settings: AxisSettings, tag: SettingsTag, value: f32) -> AxisSettings {
    match tag {
        SettingsTag::StepAngle => settings.set_step_angle(value),
        SettingsTag::UnitsPerRevolution => settings.units_per_revolution = value,
        SettingsTag::MaxJerk => settings.max_jerk = value,
        SettingsTag::Speed => settings.speed = value,
        SettingsTag::MaxSpeed => settings.max_speed = value,
        SettingsTag::Microstepping => unreachable!("covered separately"),
    }
    settings
}

fn float_tag() -> impl Strategy<Value = SettingsTag> {
    prop_oneof![
        Just(SettingsTag::StepAngle),
        Just(SettingsTag::UnitsPerRevolution),
        Just(SettingsTag::MaxJerk),
        Just(SettingsTag::Speed),
        Just(SettingsTag::MaxSpeed),
    ]
}

proptest! {
    /// A float settings command writes one field of one axis and touches no hardware.
    #[test]
    fn float_setting_isolated(axis in axis_strategy(), tag in float_tag(), value in 0.001f32..1.0e9) {
        let log = new_log();
        let machine = MockMachine::new(&log);
        let signals = MotionSignals::new();
        let config = test_config();
        let (mut controller, _) = build(&config, &log, &machine, &signals);

        let before = *controller.settings(axis);
        let untouched = *controller.settings(other(axis));

        let applied = controller.handle_settings_command(axis, EventData::new(tag as u8, value));

        prop_assert_eq!(applied, Ok(tag));
        prop_assert_eq!(*controller.settings(axis), with_field(before, tag, value));
        prop_assert_eq!(*controller.settings(other(axis)), untouched);
        prop_assert!(events(&log).is_empty());
    }

    /// Only the microstepping tag reaches the motors driver.
    #[test]
    fn microstepping_reaches_driver(axis in axis_strategy(), mode in 1u8..=6) {
        let log = new_log();
        let machine = MockMachine::new(&log);
        let signals = MotionSignals::new();
        let config = test_config();
        let (mut controller, _) = build(&config, &log, &machine, &signals);
        let untouched = *controller.settings(other(axis));

        controller
            .handle_settings_command(axis, EventData::new(SettingsTag::Microstepping as u8, f32::from(mode)))
            .unwrap();

        prop_assert_eq!(events(&log), vec![Event::Microstepping(mode)]);
        prop_assert_eq!(controller.settings(axis).microstepping_mode.value(), mode);
        prop_assert_eq!(*controller.settings(other(axis)), untouched);
    }

    /// Rejected values leave both axes as they were.
    #[test]
    fn non_positive_values_rejected(axis in axis_strategy(), tag in 1u8..=6, value in -1.0e6f32..=0.0) {
        let log = new_log();
        let machine = MockMachine::new(&log);
        let signals = MotionSignals::new();
        let config = test_config();
        let (mut controller, _) = build(&config, &log, &machine, &signals);
        let before = *controller.state();

        prop_assert!(controller.handle_settings_command(axis, EventData::new(tag, value)).is_err());
        prop_assert_eq!(*controller.state(), before);
        prop_assert!(events(&log).is_empty());
    }

    /// The canonical machine always receives the magnitude of the requested distance.
    #[test]
    fn move_submits_magnitude(axis in axis_strategy(), distance in 1i32..1_000_000) {
        let log = new_log();
        let machine = MockMachine::new(&log);
        let signals = MotionSignals::new();
        let config = test_config();
        let (mut controller, _) = build(&config, &log, &machine, &signals);
        let settings = *controller.settings(axis);

        let forward = controller.move_axis(axis, distance, &settings).unwrap();
        let reverse = controller.move_axis(axis, -distance, &settings).unwrap();

        prop_assert_eq!(forward.magnitude, reverse.magnitude);
        prop_assert_eq!(forward.expected_pulses(), reverse.expected_pulses());

        let feeds: Vec<_> = events(&log)
            .into_iter()
            .filter(|e| matches!(e, Event::StraightFeed(..)))
            .collect();
        prop_assert_eq!(feeds, vec![Event::StraightFeed(axis, distance as f32); 2]);
    }
}
