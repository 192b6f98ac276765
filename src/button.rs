//! Push-button sampling and debouncing.
//!
//! The buttons are active low with pull-ups. [`ButtonArray`] samples them and
//! [`Debouncer`] turns the levels into [`ButtonEvents`]: a pressed button yields
//! an edge when more than the debounce window has passed since its last accepted
//! edge. A held button therefore repeats once per window, which is fine for
//! human-speed input.

use core::convert::Infallible;

use embassy_time::{Duration, Instant};
use embedded_hal::digital::InputPin;

use crate::shared_constants::BUTTON_COUNT;

/// The four buttons on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Up,
    Down,
    Confirm,
    Reset,
}

impl Button {
    /// All buttons, in the order [`ButtonArray`] samples them.
    pub const ALL: [Self; BUTTON_COUNT] = [Self::Up, Self::Down, Self::Confirm, Self::Reset];

    const fn mask(self) -> u8 {
        match self {
            Self::Up => 0b0001,
            Self::Down => 0b0010,
            Self::Confirm => 0b0100,
            Self::Reset => 0b1000,
        }
    }
}

/// The debounced edges seen in one poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvents(u8);

impl ButtonEvents {
    /// No edges.
    pub const NONE: Self = Self(0);

    /// Events holding an edge for `button` only.
    #[must_use]
    pub const fn just(button: Button) -> Self {
        Self(button.mask())
    }

    /// Adds an edge for `button`.
    #[must_use]
    pub const fn with(self, button: Button) -> Self {
        Self(self.0 | button.mask())
    }

    /// Whether `button` produced an edge.
    #[must_use]
    pub const fn contains(self, button: Button) -> bool {
        self.0 & button.mask() != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Turns raw pressed levels into rate-limited edges, one slot per button.
pub struct Debouncer<const N: usize = BUTTON_COUNT> {
    window: Duration,
    last_edges: [Option<Instant>; N],
}

impl<const N: usize> Debouncer<N> {
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            last_edges: [None; N],
        }
    }

    /// Accepts an edge for every pressed slot whose window has expired.
    ///
    /// Returns one flag per slot.
    pub fn poll_slots(&mut self, now: Instant, pressed: [bool; N]) -> [bool; N] {
        let mut accepted = [false; N];
        for ((last_edge, is_pressed), edge) in self
            .last_edges
            .iter_mut()
            .zip(pressed)
            .zip(accepted.iter_mut())
        {
            let armed = last_edge.is_none_or(|last| now.saturating_duration_since(last) > self.window);
            if is_pressed && armed {
                *last_edge = Some(now);
                *edge = true;
            }
        }
        accepted
    }
}

impl Debouncer<BUTTON_COUNT> {
    /// Debounces the board's buttons, sampled in [`Button::ALL`] order.
    pub fn poll(&mut self, now: Instant, pressed: [bool; BUTTON_COUNT]) -> ButtonEvents {
        self.poll_slots(now, pressed)
            .into_iter()
            .zip(Button::ALL)
            .filter(|(edge, _)| *edge)
            .fold(ButtonEvents::NONE, |events, (_, button)| events.with(button))
    }
}

/// The button input pins, in [`Button::ALL`] order.
pub struct ButtonArray<P, const N: usize = BUTTON_COUNT>([P; N]);

impl<P, const N: usize> ButtonArray<P, N>
where
    P: InputPin<Error = Infallible>,
{
    pub const fn new(inputs: [P; N]) -> Self {
        Self(inputs)
    }

    /// Samples every button. A low level means pressed.
    pub fn pressed(&mut self) -> [bool; N] {
        let mut pressed = [false; N];
        for (input, is_pressed) in self.0.iter_mut().zip(pressed.iter_mut()) {
            let Ok(low) = input.is_low();
            *is_pressed = low;
        }
        pressed
    }
}
