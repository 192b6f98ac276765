//! Session lengths the configuration phase starts from.
//!
//! `build.rs` reads `POMODORO_STUDY_MINUTES` and `POMODORO_REST_MINUTES` from the
//! environment (or `.env`), defaulting to 25 and 5.

use crate::shared_constants::MAX_MINUTES;

/// Study and rest lengths, in minutes, each within `0..=MAX_MINUTES`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    study_minutes: u8,
    rest_minutes: u8,
}

impl Settings {
    /// Clamps both lengths into `0..=MAX_MINUTES`.
    #[must_use]
    pub const fn new(study_minutes: u8, rest_minutes: u8) -> Self {
        Self {
            study_minutes: clamp_minutes(study_minutes),
            rest_minutes: clamp_minutes(rest_minutes),
        }
    }

    #[must_use]
    pub const fn study_minutes(self) -> u8 {
        self.study_minutes
    }

    #[must_use]
    pub const fn rest_minutes(self) -> u8 {
        self.rest_minutes
    }

    /// Study countdown length in seconds.
    #[must_use]
    pub const fn study_seconds(self) -> u32 {
        minutes_to_seconds(self.study_minutes)
    }

    /// Rest countdown length in seconds.
    #[must_use]
    pub const fn rest_seconds(self) -> u32 {
        minutes_to_seconds(self.rest_minutes)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(BUILD_STUDY_MINUTES, BUILD_REST_MINUTES)
    }
}

const BUILD_STUDY_MINUTES: u8 = parse_minutes(env!("POMODORO_STUDY_MINUTES"), 25);
const BUILD_REST_MINUTES: u8 = parse_minutes(env!("POMODORO_REST_MINUTES"), 5);

const fn clamp_minutes(minutes: u8) -> u8 {
    if minutes > MAX_MINUTES {
        MAX_MINUTES
    } else {
        minutes
    }
}

#[expect(
    clippy::arithmetic_side_effects,
    clippy::cast_lossless,
    reason = "At most 255 * 60; `u32::from` is not const"
)]
const fn minutes_to_seconds(minutes: u8) -> u32 {
    minutes as u32 * 60
}

/// Parses a decimal minute count such as the build-time overrides.
///
/// Anything other than ASCII digits, including an empty string, gives
/// `default`. Values past `MAX_MINUTES` clamp to it.
#[must_use]
#[expect(
    clippy::arithmetic_side_effects,
    clippy::indexing_slicing,
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    reason = "Bounded by the loop condition and the saturation check"
)]
pub const fn parse_minutes(text: &str, default: u8) -> u8 {
    let bytes = text.as_bytes();
    if bytes.is_empty() {
        return default;
    }
    let mut value: u32 = 0;
    let mut index = 0;
    while index < bytes.len() {
        let byte = bytes[index];
        if !byte.is_ascii_digit() {
            return default;
        }
        value = value * 10 + (byte - b'0') as u32;
        if value > u8::MAX as u32 {
            value = u8::MAX as u32;
        }
        index += 1;
    }
    clamp_minutes(value as u8)
}
