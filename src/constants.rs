//! Internal constants for the nibble code table.

/// Largest |delta| carried by a single nibble
pub(crate) const SHORT_MAX: i16 = 6;

/// Largest |delta| carried by a sign + magnitude pair
pub(crate) const MID_MAX: i16 = 19;

/// Largest |delta| between two 8-bit samples
pub(crate) const DELTA_MAX: i16 = 255;

/// Highest lead nibble of a short code (`SHORT_MAX * 2`)
pub(crate) const SHORT_LEAD_MAX: u8 = 0xC;

/// Sign nibble for negative deltas
pub(crate) const SIGN_NEG: u8 = 0xD;

/// Sign nibble for positive deltas
pub(crate) const SIGN_POS: u8 = 0xE;

/// Escape marker introducing a full 8-bit magnitude
pub(crate) const ESCAPE: u8 = 0xF;

/// Nibble slots needed by the widest code word
pub(crate) const MAX_CODE_NIBBLES: usize = 4;

/// Sign nibble for a delta
#[inline]
pub(crate) const fn sign_nibble(negative: bool) -> u8 {
    if negative {
        SIGN_NEG
    } else {
        SIGN_POS
    }
}
