//! The configuration phase: study and rest lengths edited with up, down and confirm.

use core::fmt::Write as _;

use embassy_time::Instant;
use heapless::String;

use crate::blink_state::BlinkState;
use crate::button::{Button, ButtonEvents};
use crate::config::Settings;
use crate::display_buffer::DisplayBuffer;
use crate::shared_constants::{CELL_COUNT, MAX_MINUTES, MINUTES_STEP};

/// The field the buttons currently edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetupField {
    Study,
    Rest,
}

/// Edits [`Settings`] on the display as `SSRR`.
///
/// The focused field blinks. Up and down step it by [`MINUTES_STEP`] within
/// `0..=MAX_MINUTES`; confirm moves from study to rest, then finishes.
#[derive(Debug, Clone)]
pub struct Setup {
    study_minutes: u8,
    rest_minutes: u8,
    field: SetupField,
}

impl Setup {
    #[must_use]
    pub const fn new(settings: Settings) -> Self {
        Self {
            study_minutes: settings.study_minutes(),
            rest_minutes: settings.rest_minutes(),
            field: SetupField::Study,
        }
    }

    #[must_use]
    pub const fn field(&self) -> SetupField {
        self.field
    }

    /// The lengths as currently edited.
    #[must_use]
    pub const fn settings(&self) -> Settings {
        Settings::new(self.study_minutes, self.rest_minutes)
    }

    /// Applies this poll's button edges and draws the result.
    ///
    /// Returns the chosen settings once confirm is pressed on the rest field.
    pub fn poll(
        &mut self,
        now: Instant,
        events: ButtonEvents,
        display: &DisplayBuffer<CELL_COUNT>,
    ) -> Option<Settings> {
        let minutes = match self.field {
            SetupField::Study => &mut self.study_minutes,
            SetupField::Rest => &mut self.rest_minutes,
        };
        if events.contains(Button::Up) {
            *minutes = minutes.saturating_add(MINUTES_STEP).min(MAX_MINUTES);
        }
        if events.contains(Button::Down) {
            *minutes = minutes.saturating_sub(MINUTES_STEP);
        }

        if events.contains(Button::Confirm) {
            match self.field {
                SetupField::Study => self.field = SetupField::Rest,
                SetupField::Rest => {
                    #[cfg(feature = "defmt")]
                    defmt::info!(
                        "Setup done: study {} min, rest {} min",
                        self.study_minutes,
                        self.rest_minutes
                    );
                    display.write(&self.frame(BlinkState::Solid));
                    return Some(self.settings());
                }
            }
        }

        display.write(&self.frame(BlinkState::blinking(now)));
        None
    }

    fn frame(&self, blink_state: BlinkState) -> String<CELL_COUNT> {
        let mut frame = String::new();
        let hide_study = self.field == SetupField::Study && !blink_state.is_visible();
        let hide_rest = self.field == SetupField::Rest && !blink_state.is_visible();
        // Both fields are at most two digits, so the frame fits.
        let _ = if hide_study {
            write!(frame, "  {:02}", self.rest_minutes)
        } else if hide_rest {
            write!(frame, "{:02}  ", self.study_minutes)
        } else {
            write!(frame, "{:02}{:02}", self.study_minutes, self.rest_minutes)
        };
        frame
    }
}
