//! Host-level tests for the per-phase countdown.

mod common;

use common::at;
use pomodoro_kit::countdown::{CountdownState, format_frame};
use pomodoro_kit::{CELL_COUNT, Countdown, CountdownStatus, DisplayBuffer};

fn cells(text: &str) -> [char; CELL_COUNT] {
    let mut cells = [' '; CELL_COUNT];
    for (cell, character) in cells.iter_mut().zip(text.chars()) {
        *cell = character;
    }
    cells
}

#[test]
fn frames_are_zero_padded_minutes_then_seconds() {
    for remaining_seconds in 0..=5_999_u32 {
        let expected = format!("{:02}{:02}", remaining_seconds / 60, remaining_seconds % 60);
        assert_eq!(format_frame(remaining_seconds).as_str(), expected);
    }
}

#[test]
fn frames_past_99_minutes_grow() {
    assert_eq!(format_frame(6_000).as_str(), "10000");
    assert_eq!(format_frame(u32::MAX).as_str(), "7158278815");
}

#[test]
fn start_state() {
    let countdown = Countdown::start(1_500, at(0));
    assert_eq!(
        countdown.state(),
        CountdownState {
            remaining_seconds: 1_500,
            paused: false,
            last_minute_triggered: false,
        }
    );
    assert_eq!(countdown.status(), CountdownStatus::Running);
    assert_eq!(countdown.frame().as_str(), "2500");
}

#[test]
fn ticks_from_125_seconds() {
    let mut countdown = Countdown::start(125, at(0));
    assert_eq!(countdown.frame().as_str(), "0205");

    for _ in 0..65 {
        assert_eq!(countdown.tick().status, CountdownStatus::Running);
    }
    assert_eq!(countdown.frame().as_str(), "0100");

    for _ in 65..124 {
        assert_eq!(countdown.tick().status, CountdownStatus::Running);
    }
    assert_eq!(countdown.tick().status, CountdownStatus::Done);
    assert_eq!(countdown.frame().as_str(), "0000");

    // Done is terminal.
    assert_eq!(countdown.tick().status, CountdownStatus::Done);
    assert_eq!(countdown.state().remaining_seconds, 0);
}

#[test]
fn zero_duration_is_done_at_once() {
    let display: DisplayBuffer<CELL_COUNT> = DisplayBuffer::new();
    let mut countdown = Countdown::start(0, at(0));
    assert_eq!(countdown.status(), CountdownStatus::Done);
    assert_eq!(countdown.poll(at(0), false, &display).status, CountdownStatus::Done);
    assert_eq!(display.cells(), cells("0000"));
}

#[test]
fn poll_advances_one_second_per_deadline() {
    let display: DisplayBuffer<CELL_COUNT> = DisplayBuffer::new();
    let mut countdown = Countdown::start(125, at(0));

    countdown.poll(at(40), false, &display);
    assert_eq!(display.cells(), cells("0205"));
    countdown.poll(at(999), false, &display);
    assert_eq!(display.cells(), cells("0205"));
    countdown.poll(at(1_000), false, &display);
    assert_eq!(display.cells(), cells("0204"));
}

#[test]
fn late_polls_catch_up_without_drift() {
    let display: DisplayBuffer<CELL_COUNT> = DisplayBuffer::new();
    let mut countdown = Countdown::start(10, at(0));

    countdown.poll(at(3_500), false, &display);
    assert_eq!(countdown.state().remaining_seconds, 7);
    countdown.poll(at(3_999), false, &display);
    assert_eq!(countdown.state().remaining_seconds, 7);
    countdown.poll(at(4_000), false, &display);
    assert_eq!(countdown.state().remaining_seconds, 6);

    let update = countdown.poll(at(60_000), false, &display);
    assert_eq!(update.status, CountdownStatus::Done);
    assert_eq!(display.cells(), cells("0000"));
}

#[test]
fn last_minute_fires_once() {
    let display: DisplayBuffer<CELL_COUNT> = DisplayBuffer::new();
    let mut countdown = Countdown::start(62, at(0));

    assert!(!countdown.poll(at(1_000), false, &display).last_minute);
    assert!(countdown.poll(at(2_000), false, &display).last_minute);
    assert!(countdown.state().last_minute_triggered);
    assert!(!countdown.poll(at(2_040), false, &display).last_minute);

    // Pausing and resuming while still at 60 does not fire again.
    assert!(!countdown.poll(at(2_100), true, &display).last_minute);
    assert!(!countdown.poll(at(2_600), false, &display).last_minute);
    assert!(!countdown.poll(at(2_700), true, &display).last_minute);
    assert_eq!(countdown.state().remaining_seconds, 60);

    for second in 3..=70 {
        assert!(!countdown.poll(at(second * 1_000), false, &display).last_minute);
    }
}

#[test]
fn last_minute_fires_when_a_late_poll_skips_past_60() {
    let display: DisplayBuffer<CELL_COUNT> = DisplayBuffer::new();
    let mut countdown = Countdown::start(61, at(0));
    assert!(countdown.poll(at(2_500), false, &display).last_minute);
    assert_eq!(countdown.state().remaining_seconds, 59);
}

#[test]
fn starting_at_60_fires_on_the_first_poll() {
    let display: DisplayBuffer<CELL_COUNT> = DisplayBuffer::new();
    let mut countdown = Countdown::start(60, at(0));
    assert!(countdown.poll(at(0), false, &display).last_minute);
    assert!(!countdown.poll(at(40), false, &display).last_minute);
}

#[test]
fn paused_frames_blink_and_hold_the_time() {
    let display: DisplayBuffer<CELL_COUNT> = DisplayBuffer::new();
    let mut countdown = Countdown::start(125, at(0));

    let update = countdown.poll(at(100), true, &display);
    assert_eq!(update.status, CountdownStatus::Paused);
    assert!(countdown.state().paused);
    assert_eq!(display.cells(), cells("0205"));

    countdown.poll(at(600), false, &display);
    assert_eq!(display.cells(), [' '; CELL_COUNT]);
    countdown.poll(at(1_000), false, &display);
    assert_eq!(display.cells(), cells("0205"));
    countdown.poll(at(1_500), false, &display);
    assert_eq!(display.cells(), [' '; CELL_COUNT]);

    countdown.poll(at(5_000), false, &display);
    assert_eq!(countdown.state().remaining_seconds, 125);

    // Resuming during the off half shows the frame again at once.
    let update = countdown.poll(at(5_600), true, &display);
    assert_eq!(update.status, CountdownStatus::Running);
    assert_eq!(countdown.state().remaining_seconds, 125);
    assert_eq!(display.cells(), cells("0205"));
}

#[test]
fn resume_keeps_the_rest_of_the_paused_second() {
    let display: DisplayBuffer<CELL_COUNT> = DisplayBuffer::new();
    let mut countdown = Countdown::start(125, at(0));

    // 900 ms were left in the first second.
    countdown.poll(at(100), true, &display);
    countdown.poll(at(5_100), true, &display);
    countdown.poll(at(5_999), false, &display);
    assert_eq!(countdown.state().remaining_seconds, 125);
    countdown.poll(at(6_000), false, &display);
    assert_eq!(countdown.state().remaining_seconds, 124);
}

#[test]
fn toggle_pause_does_nothing_once_done() {
    let mut countdown = Countdown::start(1, at(0));
    assert_eq!(countdown.tick().status, CountdownStatus::Done);
    countdown.toggle_pause(at(1_500));
    assert_eq!(countdown.status(), CountdownStatus::Done);
    assert!(!countdown.state().paused);
}
