//! Shared items for the Pomodoro timer.
//!
//! Everything except the `pico1` items is hardware independent and runs on the host.
#![no_std]

mod blink_state;
pub mod button;
pub mod config;
pub mod countdown;
mod display_buffer;
mod error;
#[cfg(feature = "pico1")]
mod hardware;
pub mod jingles;
pub mod melody;
pub mod multiplexer;
mod output_array;
pub mod pomodoro;
pub mod segments;
pub mod setup;
mod shared_constants;
pub mod status_led;

// Re-export commonly used items
pub use blink_state::BlinkState;
pub use button::{Button, ButtonArray, ButtonEvents, Debouncer};
pub use config::Settings;
pub use countdown::{Countdown, CountdownStatus, CountdownUpdate};
pub use display_buffer::DisplayBuffer;
pub use error::{Error, Result};
#[cfg(feature = "pico1")]
pub use hardware::Hardware;
pub use jingles::{Jingle, JingleSet};
pub use melody::{Melody, MelodyCommand, MelodyPlayer, Tone};
pub use multiplexer::Multiplexer;
pub use output_array::OutputArray;
pub use pomodoro::{Effects, Phase, Pomodoro};
pub use setup::Setup;
pub use shared_constants::*;
