//! Board and timing constants shared by the display, input, countdown, and melody code.

use embassy_time::Duration;

/// The number of cells (digits) in the display.
pub const CELL_COUNT_U8: u8 = 4;
pub const CELL_COUNT: usize = CELL_COUNT_U8 as usize;

/// The number of segment lines: seven segments plus the decimal point.
pub const SEGMENT_COUNT: usize = 8;

/// The number of push-buttons on the board.
pub const BUTTON_COUNT: usize = 4;

/// How many times per second each digit is lit.
pub const DIGIT_REFRESH_HZ: u64 = 70;

/// One refresh lights one digit, so the refresh task runs `CELL_COUNT` times faster.
#[expect(clippy::arithmetic_side_effects, reason = "Small constants")]
pub const REFRESH_PERIOD: Duration = Duration::from_hz(DIGIT_REFRESH_HZ * CELL_COUNT_U8 as u64);

/// Countdown resolution.
pub const ONE_SECOND: Duration = Duration::from_secs(1);

/// Half period of the pause and edit blink.
pub const BLINK_PERIOD: Duration = Duration::from_millis(500);

/// Minimum spacing between two accepted edges of the same button.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

/// Control loop poll interval.
pub const POLL_INTERVAL: Duration = Duration::from_millis(40);

/// Melody player cadence.
pub const MELODY_TICK: Duration = Duration::from_millis(40);

/// Step applied by the up/down buttons while editing a session length.
pub const MINUTES_STEP: u8 = 5;

/// Longest session length the configuration phase accepts.
pub const MAX_MINUTES: u8 = 95;
