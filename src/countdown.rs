//! The per-phase countdown: MM:SS frames, pause with blinking, and the last-minute cue.

use core::fmt::Write as _;

use embassy_time::{Duration, Instant};
use heapless::String;

use crate::blink_state::BlinkState;
use crate::display_buffer::DisplayBuffer;
use crate::shared_constants::{CELL_COUNT, ONE_SECOND};

/// Room for the largest `u32` minute count plus two second digits.
const FRAME_CAPACITY: usize = 12;

/// Remaining seconds at which the last-minute cue fires.
const LAST_MINUTE: u32 = 60;

/// Display text for one countdown second: `MMSS`.
pub type Frame = String<FRAME_CAPACITY>;

/// Formats `remaining_seconds` as zero-padded minutes followed by zero-padded seconds.
///
/// Minutes above 99 make the frame longer than the display; the display keeps
/// the first four characters.
#[must_use]
#[expect(
    clippy::integer_division_remainder_used,
    reason = "Dividing by a nonzero constant"
)]
pub fn format_frame(remaining_seconds: u32) -> Frame {
    let mut frame = Frame::new();
    // FRAME_CAPACITY holds every u32 input, so the write cannot fail.
    let _ = write!(
        frame,
        "{:02}{:02}",
        remaining_seconds / 60,
        remaining_seconds % 60
    );
    frame
}

/// Where a countdown is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CountdownStatus {
    Running,
    Paused,
    Done,
}

/// The state a countdown carries from second to second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CountdownState {
    pub remaining_seconds: u32,
    pub paused: bool,
    pub last_minute_triggered: bool,
}

/// What a tick or poll produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CountdownUpdate {
    pub status: CountdownStatus,
    /// Set exactly once per countdown, when 60 seconds remain.
    pub last_minute: bool,
}

/// Counts one phase (work or rest) down to zero.
///
/// Seconds follow deadlines spaced exactly [`ONE_SECOND`] apart, so however
/// late a poll arrives the countdown does not drift. Pausing keeps the unexpired
/// part of the current second and hands it back on resume.
#[derive(Debug, Clone)]
pub struct Countdown {
    state: CountdownState,
    done: bool,
    deadline: Instant,
    paused_with: Duration,
}

impl Countdown {
    /// Starts a running countdown at `now`. A zero duration is done at once.
    #[must_use]
    pub fn start(duration_seconds: u32, now: Instant) -> Self {
        Self {
            state: CountdownState {
                remaining_seconds: duration_seconds,
                paused: false,
                last_minute_triggered: false,
            },
            done: duration_seconds == 0,
            deadline: now + ONE_SECOND,
            paused_with: Duration::from_ticks(0),
        }
    }

    #[must_use]
    pub const fn state(&self) -> CountdownState {
        self.state
    }

    #[must_use]
    pub const fn status(&self) -> CountdownStatus {
        if self.done {
            CountdownStatus::Done
        } else if self.state.paused {
            CountdownStatus::Paused
        } else {
            CountdownStatus::Running
        }
    }

    /// The frame for the current remaining time.
    #[must_use]
    pub fn frame(&self) -> Frame {
        format_frame(self.state.remaining_seconds)
    }

    /// Advances one second. Does nothing unless running.
    pub fn tick(&mut self) -> CountdownUpdate {
        if self.status() == CountdownStatus::Running {
            self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
            self.done = self.state.remaining_seconds == 0;
        }
        self.update()
    }

    /// Pauses a running countdown or resumes a paused one.
    pub fn toggle_pause(&mut self, now: Instant) {
        match self.status() {
            CountdownStatus::Running => {
                self.paused_with = self.deadline.saturating_duration_since(now);
                self.state.paused = true;
            }
            CountdownStatus::Paused => {
                self.deadline = now + self.paused_with;
                self.state.paused = false;
            }
            CountdownStatus::Done => {}
        }
    }

    /// One control-loop pass: applies a confirm edge, catches up on elapsed
    /// seconds, and draws the result.
    ///
    /// While paused the frame blinks with the shared blink phase.
    pub fn poll(
        &mut self,
        now: Instant,
        confirm: bool,
        display: &DisplayBuffer<CELL_COUNT>,
    ) -> CountdownUpdate {
        if confirm {
            self.toggle_pause(now);
        }

        let mut last_minute = false;
        while self.status() == CountdownStatus::Running && now >= self.deadline {
            last_minute |= self.tick().last_minute;
            self.deadline += ONE_SECOND;
        }

        let mut update = self.update();
        update.last_minute |= last_minute;
        self.render(now, display);
        update
    }

    fn render(&self, now: Instant, display: &DisplayBuffer<CELL_COUNT>) {
        let blink_state = if self.state.paused {
            BlinkState::blinking(now)
        } else {
            BlinkState::Solid
        };
        if blink_state.is_visible() {
            #[cfg(feature = "display-trace")]
            defmt::info!("frame: {}", self.frame().as_str());
            display.write(&self.frame());
        } else {
            display.clear();
        }
    }

    fn update(&mut self) -> CountdownUpdate {
        let last_minute = self.state.remaining_seconds == LAST_MINUTE
            && !self.state.last_minute_triggered
            && !self.done;
        if last_minute {
            self.state.last_minute_triggered = true;
        }
        CountdownUpdate {
            status: self.status(),
            last_minute,
        }
    }
}
