mod common;

use std::time::Duration;

use ledlink::serial::channel::MIN_COMMAND_INTERVAL;
use ledlink::{DeviceError, LedController};

use common::{written_lines, MockTransport};

#[test]
fn test_mode_then_rgb_then_commit_byte_sequence() {
    let (transport, state) = MockTransport::new();
    let mut controller = LedController::from_transport(Box::new(transport));

    controller.set_mode(99).expect("set_mode");
    controller.set_rgb(255, 0, 0).expect("set_rgb");
    controller.write_rgb().expect("write_rgb");

    assert_eq!(
        written_lines(&state),
        vec!["MODE 99\n", "SETRGB 255 0 0\n", "WRITERGB\n"]
    );

    let writes = &state.lock().unwrap().writes;
    for pair in writes.windows(2) {
        assert!(pair[1].0.duration_since(pair[0].0) >= MIN_COMMAND_INTERVAL);
    }
}

#[test]
fn test_composite_setters_are_one_command() {
    let (transport, state) = MockTransport::new();
    let mut controller = LedController::from_transport(Box::new(transport));

    controller.set_hsl(10, 20, 30).expect("set_hsl");
    controller.set_rgb(1, 2, 3).expect("set_rgb");

    assert_eq!(written_lines(&state), vec!["SETHSL 10 20 30\n", "SETRGB 1 2 3\n"]);
}

#[test]
fn test_float_inputs_truncate_to_integers() {
    let (transport, state) = MockTransport::new();
    let mut controller = LedController::from_transport(Box::new(transport));

    controller.set_rgb(12.9f64, 0.0f64, 300.0f64).expect("set_rgb");
    controller.set_hue(359.9f32).expect("set_hue");

    assert_eq!(written_lines(&state), vec!["SETRGB 12 0 300\n", "HUE 359\n"]);
}

#[test]
fn test_per_channel_and_commit_verbs() {
    let (transport, state) = MockTransport::new();
    let mut controller = LedController::from_transport(Box::new(transport));

    controller.set_hue(120).expect("hue");
    controller.set_sat(80).expect("sat");
    controller.set_lum(40).expect("lum");
    controller.write_hsl().expect("write_hsl");
    controller.set_red(255).expect("red");
    controller.set_green(10).expect("green");
    controller.set_blue(0).expect("blue");
    controller.set_interval(16).expect("interval");
    controller.save().expect("save");

    assert_eq!(
        written_lines(&state),
        vec![
            "HUE 120\n",
            "SAT 80\n",
            "LUM 40\n",
            "WRITEHSL\n",
            "RED 255\n",
            "GRN 10\n",
            "BLU 0\n",
            "INTERVAL 16\n",
            "SAVE\n",
        ]
    );
}

#[test]
fn test_operations_after_close_fail_with_not_open() {
    let (transport, state) = MockTransport::new();
    let mut controller = LedController::from_transport(Box::new(transport));
    assert!(controller.is_open());

    controller.close();
    assert!(!controller.is_open());

    let err = controller.set_mode(1).expect_err("closed controller");
    assert!(matches!(err, DeviceError::NotOpen));
    let err = controller.current_state().expect_err("closed controller");
    assert!(matches!(err, DeviceError::NotOpen));

    // Idempotent: a second close must not release the port twice.
    controller.close();
    assert_eq!(state.lock().unwrap().close_calls, 1);
}

#[test]
fn test_read_timeout_is_configurable() {
    let (transport, _state) = MockTransport::new();
    let mut controller = LedController::from_transport(Box::new(transport));

    assert_eq!(controller.read_timeout(), Duration::from_millis(1000));
    controller.set_read_timeout(Duration::from_millis(250));
    assert_eq!(controller.read_timeout(), Duration::from_millis(250));
}
