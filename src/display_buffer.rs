//! The characters and decimal points the multiplexer shows.
//!
//! A [`DisplayBuffer`] is the only state shared between the control loop, which
//! writes whole frames, and the refresh task, which reads one cell per refresh.
//! Every slot is an atomic, so neither side locks or blocks. A frame written while
//! a refresh cycle is in progress can show half old and half new cells for less
//! than one refresh period; that tearing is accepted.

use portable_atomic::{AtomicBool, AtomicU8, Ordering};

/// Stored for cells that have not been written.
const BLANK_CELL: u8 = b' ';

/// Fixed-size display memory: one character and one decimal point per digit.
///
/// Usually placed in a `static` so the refresh task can hold a `&'static` reference:
///
/// ```
/// use pomodoro_kit::{CELL_COUNT, DisplayBuffer};
///
/// static DISPLAY: DisplayBuffer<CELL_COUNT> = DisplayBuffer::new();
///
/// DISPLAY.write("12");
/// assert_eq!(DISPLAY.cells(), ['1', '2', ' ', ' ']);
/// ```
pub struct DisplayBuffer<const N: usize> {
    cells: [AtomicU8; N],
    dots: [AtomicBool; N],
}

impl<const N: usize> DisplayBuffer<N> {
    /// Creates a blank buffer with every decimal point off.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: [const { AtomicU8::new(BLANK_CELL) }; N],
            dots: [const { AtomicBool::new(false) }; N],
        }
    }

    /// Blanks every cell and turns off every decimal point.
    ///
    /// The refresh task picks the change up on its next cycle.
    pub fn clear(&self) {
        for cell in &self.cells {
            cell.store(BLANK_CELL, Ordering::Relaxed);
        }
        for dot in &self.dots {
            dot.store(false, Ordering::Relaxed);
        }
    }

    /// Copies `text` into the cells left to right.
    ///
    /// Shorter text is padded with blanks and longer text is truncated to `N`
    /// characters. Characters outside ASCII are stored as blanks. Decimal points
    /// are left alone.
    pub fn write(&self, text: &str) {
        let mut chars = text.chars();
        for cell in &self.cells {
            let byte = chars.next().map_or(BLANK_CELL, |character| {
                u8::try_from(character)
                    .ok()
                    .filter(u8::is_ascii)
                    .unwrap_or(BLANK_CELL)
            });
            cell.store(byte, Ordering::Relaxed);
        }
    }

    /// Turns the decimal point at `position` on or off. Out-of-range positions are ignored.
    pub fn set_dot(&self, position: usize, state: bool) {
        if let Some(dot) = self.dots.get(position) {
            dot.store(state, Ordering::Relaxed);
        }
    }

    /// The character at `index`, or a blank if `index` is out of range.
    #[must_use]
    #[inline]
    pub fn cell(&self, index: usize) -> char {
        self.cells
            .get(index)
            .map_or(char::from(BLANK_CELL), |cell| {
                char::from(cell.load(Ordering::Relaxed))
            })
    }

    /// Whether the decimal point at `index` is lit.
    #[must_use]
    #[inline]
    pub fn dot(&self, index: usize) -> bool {
        self.dots
            .get(index)
            .is_some_and(|dot| dot.load(Ordering::Relaxed))
    }

    /// A snapshot of all cells.
    #[must_use]
    pub fn cells(&self) -> [char; N] {
        core::array::from_fn(|index| self.cell(index))
    }

    /// A snapshot of all decimal points.
    #[must_use]
    pub fn dots(&self) -> [bool; N] {
        core::array::from_fn(|index| self.dot(index))
    }
}

impl<const N: usize> Default for DisplayBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
