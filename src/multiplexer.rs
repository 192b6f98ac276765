//! Time-multiplexed refresh of a common-cathode 7-segment display.
//!
//! See [`Multiplexer`] for the refresh contract.

use core::convert::Infallible;

use embedded_hal::digital::{OutputPin, PinState};

use crate::display_buffer::DisplayBuffer;
use crate::output_array::OutputArray;
use crate::segments::{self, DECIMAL};
use crate::shared_constants::SEGMENT_COUNT;

/// Level that enables a digit's common line (active low).
pub const DIGIT_ON: PinState = PinState::Low;
/// Level that disables a digit's common line.
pub const DIGIT_OFF: PinState = PinState::High;

/// Lights one digit per call to [`refresh`](Self::refresh), cycling through all `N`.
///
/// # Hardware Requirements
///
/// - Cell pins select a digit (LOW = on, HIGH = off)
/// - Segment pins light segments a-g then the decimal point (HIGH = on, LOW = off)
///
/// Call `refresh` at `digit_refresh_hz * N`; see
/// [`REFRESH_PERIOD`](crate::REFRESH_PERIOD). A refresh never allocates, never
/// waits, and cannot fail.
pub struct Multiplexer<'a, P, const N: usize> {
    display: &'a DisplayBuffer<N>,
    cell_pins: OutputArray<P, N>,
    segment_pins: OutputArray<P, SEGMENT_COUNT>,
    current_digit: usize,
}

impl<'a, P, const N: usize> Multiplexer<'a, P, N>
where
    P: OutputPin<Error = Infallible>,
{
    /// Takes the pins and starts with every digit deselected and every segment off.
    pub fn new(
        display: &'a DisplayBuffer<N>,
        mut cell_pins: OutputArray<P, N>,
        mut segment_pins: OutputArray<P, SEGMENT_COUNT>,
    ) -> Self {
        cell_pins.set_all(DIGIT_OFF);
        segment_pins.set_from_bits(segments::BLANK);
        Self {
            display,
            cell_pins,
            segment_pins,
            current_digit: 0,
        }
    }

    /// Shows the next digit.
    ///
    /// The previous digit is turned off before the segment lines change so its
    /// pattern never bleeds onto the new digit.
    #[inline]
    pub fn refresh(&mut self) {
        let previous_digit = self.current_digit.checked_sub(1).unwrap_or(N.saturating_sub(1));
        self.cell_pins.set_state_at_index(previous_digit, DIGIT_OFF);

        let mut bits = segments::lookup(self.display.cell(self.current_digit));
        if self.display.dot(self.current_digit) {
            bits |= DECIMAL;
        }
        self.segment_pins.set_from_bits(bits);

        self.cell_pins.set_state_at_index(self.current_digit, DIGIT_ON);
        self.current_digit = self
            .current_digit
            .checked_add(1)
            .filter(|next| *next < N)
            .unwrap_or(0);
    }

    /// The digit the next refresh will light.
    #[must_use]
    pub const fn current_digit(&self) -> usize {
        self.current_digit
    }

    /// Gives the pins back.
    pub fn into_pins(self) -> (OutputArray<P, N>, OutputArray<P, SEGMENT_COUNT>) {
        (self.cell_pins, self.segment_pins)
    }
}

#[cfg(feature = "pico1")]
mod device {
    use embassy_executor::SendSpawner;
    use embassy_rp::gpio::Output;
    use embassy_time::Ticker;

    use super::Multiplexer;
    use crate::Result;
    use crate::shared_constants::{CELL_COUNT, REFRESH_PERIOD};

    /// The multiplexer as the firmware runs it.
    pub type DisplayMultiplexer = Multiplexer<'static, Output<'static>, CELL_COUNT>;

    impl Multiplexer<'static, Output<'static>, CELL_COUNT> {
        /// Spawns the refresh task, normally on a high-priority interrupt executor.
        ///
        /// # Errors
        ///
        /// Returns an error if the task cannot be spawned.
        pub fn spawn(self, spawner: SendSpawner) -> Result<()> {
            let token = refresh_loop(self)?;
            spawner.spawn(token);
            Ok(())
        }
    }

    #[embassy_executor::task]
    async fn refresh_loop(mut multiplexer: DisplayMultiplexer) -> ! {
        let mut ticker = Ticker::every(REFRESH_PERIOD);
        loop {
            multiplexer.refresh();
            ticker.next().await;
        }
    }
}

#[cfg(feature = "pico1")]
pub use device::DisplayMultiplexer;
