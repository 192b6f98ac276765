use embassy_time::Instant;

use crate::shared_constants::BLINK_PERIOD;

/// Whether something on the display is steady or blinking, and if blinking, which half it is in.
///
/// Blinking follows the wall clock: it is on during even multiples of
/// [`BLINK_PERIOD`] since boot and off during odd ones, so every blinking
/// element on the display is in phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkState {
    #[default]
    Solid,
    BlinkingAndOn,
    BlinkingButOff,
}

impl BlinkState {
    /// The blink phase at `now`.
    #[must_use]
    #[expect(
        clippy::integer_division_remainder_used,
        reason = "BLINK_PERIOD is a nonzero constant"
    )]
    pub fn blinking(now: Instant) -> Self {
        if (now.as_millis() / BLINK_PERIOD.as_millis()) % 2 == 0 {
            Self::BlinkingAndOn
        } else {
            Self::BlinkingButOff
        }
    }

    /// Whether the blinking element should be drawn.
    #[must_use]
    pub const fn is_visible(self) -> bool {
        !matches!(self, Self::BlinkingButOff)
    }
}
