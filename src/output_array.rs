use core::convert::Infallible;

use embedded_hal::digital::{OutputPin, PinState};

/// Array of output pins driven together: the digit commons or the segment lines.
///
/// Pins must be infallible (as on the RP2040), so driving them has no error path.
pub struct OutputArray<P, const N: usize>([P; N]);

impl<P, const N: usize> OutputArray<P, N>
where
    P: OutputPin<Error = Infallible>,
{
    pub const fn new(outputs: [P; N]) -> Self {
        Self(outputs)
    }

    /// Drives every pin to `state`.
    #[inline]
    pub fn set_all(&mut self, state: PinState) {
        for output in &mut self.0 {
            let Ok(()) = output.set_state(state);
        }
    }

    /// Drives the pin at `index` to `state`. Out-of-range indexes are ignored.
    #[inline]
    pub fn set_state_at_index(&mut self, index: usize, state: PinState) {
        if let Some(output) = self.0.get_mut(index) {
            let Ok(()) = output.set_state(state);
        }
    }

    /// Gives the pins back, e.g. to inspect test doubles.
    pub fn into_inner(self) -> [P; N] {
        self.0
    }
}

impl<P> OutputArray<P, { u8::BITS as usize }>
where
    P: OutputPin<Error = Infallible>,
{
    /// Drives pin `i` high when bit `i` of `bits` is set.
    #[inline]
    pub fn set_from_bits(&mut self, mut bits: u8) {
        for output in &mut self.0 {
            let Ok(()) = output.set_state(PinState::from((bits & 1) == 1));
            bits >>= 1;
        }
    }
}
