//! Character to 7-segment pattern lookup.
//!
//! Bit `i` of a pattern drives segment `i` in the order `[a, b, c, d, e, f, g]`:
//!
//! ```text
//!      -- a --
//!     |       |
//!     f       b
//!      -- g --
//!     e       c
//!     |       |
//!      -- d --
//! ```
//!
//! The decimal point is not part of a character pattern; see [`DECIMAL`].

/// Segment A of the 7-segment display.
pub const SEG_A: u8 = 0b_0000_0001;
/// Segment B of the 7-segment display.
pub const SEG_B: u8 = 0b_0000_0010;
/// Segment C of the 7-segment display.
pub const SEG_C: u8 = 0b_0000_0100;
/// Segment D of the 7-segment display.
pub const SEG_D: u8 = 0b_0000_1000;
/// Segment E of the 7-segment display.
pub const SEG_E: u8 = 0b_0001_0000;
/// Segment F of the 7-segment display.
pub const SEG_F: u8 = 0b_0010_0000;
/// Segment G of the 7-segment display.
pub const SEG_G: u8 = 0b_0100_0000;
/// Decimal point, the eighth segment line.
pub const DECIMAL: u8 = 0b_1000_0000;

/// All segments off.
pub const BLANK: u8 = 0;

const DIGITS: [u8; 10] = [
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F,         // 0
    SEG_B | SEG_C,                                         // 1
    SEG_A | SEG_B | SEG_D | SEG_E | SEG_G,                 // 2
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_G,                 // 3
    SEG_B | SEG_C | SEG_F | SEG_G,                         // 4
    SEG_A | SEG_C | SEG_D | SEG_F | SEG_G,                 // 5
    SEG_A | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,         // 6
    SEG_A | SEG_B | SEG_C,                                 // 7
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G, // 8
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_F | SEG_G,         // 9
];

// Letters render the same whatever their case.
const LETTERS: [u8; 26] = [
    0b_0111_0111, // A
    0b_0111_1100, // b
    0b_0011_1001, // C
    0b_0101_1110, // d
    0b_0111_1001, // E
    0b_0111_0001, // F
    0b_0011_1101, // G
    0b_0111_0110, // H
    0b_0000_0110, // I
    0b_0001_1110, // J
    0b_0111_0110, // K
    0b_0011_1000, // L
    0b_0001_0101, // M
    0b_0101_0100, // n
    0b_0011_1111, // O
    0b_0111_0011, // P
    0b_0110_0111, // q
    0b_0101_0000, // r
    0b_0110_1101, // S
    0b_0111_1000, // t
    0b_0011_1110, // U
    0b_0010_1010, // V
    0b_0001_1101, // W
    0b_0111_0110, // X
    0b_0110_1110, // y
    0b_0101_1011, // Z
];

/// Patterns for the 7-bit ASCII range. Everything not listed is blank.
const ASCII_TABLE: [u8; 128] = {
    let mut table = [BLANK; 128];
    let mut index = 0;
    while index < DIGITS.len() {
        table[b'0' as usize + index] = DIGITS[index];
        index += 1;
    }
    index = 0;
    while index < LETTERS.len() {
        table[b'A' as usize + index] = LETTERS[index];
        table[b'a' as usize + index] = LETTERS[index];
        index += 1;
    }
    table[b'-' as usize] = SEG_G;
    table[b'_' as usize] = SEG_D;
    table[b'~' as usize] = SEG_A;
    table[b'\'' as usize] = SEG_B;
    table[b'"' as usize] = SEG_B | SEG_F;
    table[b'(' as usize] = SEG_A | SEG_D | SEG_E | SEG_F;
    table[b'[' as usize] = SEG_A | SEG_D | SEG_E | SEG_F;
    table[b')' as usize] = SEG_A | SEG_B | SEG_C | SEG_D;
    table[b']' as usize] = SEG_A | SEG_B | SEG_C | SEG_D;
    table[b'=' as usize] = SEG_D | SEG_G;
    table[b'|' as usize] = SEG_B | SEG_C;
    table
};

/// Returns the segment pattern for `character`.
///
/// Total and allocation free: characters without a pattern map to [`BLANK`].
#[must_use]
#[inline]
pub fn lookup(character: char) -> u8 {
    ASCII_TABLE
        .get(character as usize)
        .copied()
        .unwrap_or(BLANK)
}
