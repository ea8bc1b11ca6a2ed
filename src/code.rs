//! The nibble code table shared by encoder and decoder.
//!
//! Every delta the encoder emits and every delta the decoder reconstructs
//! goes through [`CodeWord`], so the two sides cannot drift apart.

use crate::constants::{
    sign_nibble, DELTA_MAX, ESCAPE, MID_MAX, SHORT_LEAD_MAX, SHORT_MAX, SIGN_NEG, SIGN_POS,
};
use crate::error::DecodeError;

/// One variable-length code word
///
/// | Variant | Nibbles | Layout |
/// |---------|---------|--------|
/// | `Short` | 1 | `delta + 6` |
/// | `Mid` | 2 | sign, `abs(delta) - 6` |
/// | `Escape` | 4 | `0xF`, sign, low nibble of `abs(delta)`, high nibble |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeWord {
    /// Delta in [-6, 6], stored biased by 6
    Short { nibble: u8 },
    /// Delta in [-19, 19], magnitude stored minus 6
    Mid { negative: bool, magnitude: u8 },
    /// Any delta in [-255, 255]
    Escape { negative: bool, magnitude: u8 },
}

impl CodeWord {
    /// Classify a delta, first match wins: short, then mid, then escape.
    #[inline]
    #[must_use]
    pub fn from_delta(delta: i16) -> Self {
        debug_assert!(
            (-DELTA_MAX..=DELTA_MAX).contains(&delta),
            "delta {delta} outside 8-bit sample range"
        );
        let negative = delta < 0;
        let abs = delta.unsigned_abs();
        if (-SHORT_MAX..=SHORT_MAX).contains(&delta) {
            Self::Short {
                nibble: (delta + SHORT_MAX) as u8,
            }
        } else if (-MID_MAX..=MID_MAX).contains(&delta) {
            Self::Mid {
                negative,
                magnitude: (abs - SHORT_MAX as u16) as u8,
            }
        } else {
            Self::Escape {
                negative,
                magnitude: abs as u8,
            }
        }
    }

    /// Signed delta carried by this code word
    #[inline]
    #[must_use]
    pub fn delta(self) -> i16 {
        match self {
            Self::Short { nibble } => i16::from(nibble) - SHORT_MAX,
            Self::Mid {
                negative,
                magnitude,
            } => signed(negative, i16::from(magnitude) + SHORT_MAX),
            Self::Escape {
                negative,
                magnitude,
            } => signed(negative, i16::from(magnitude)),
        }
    }

    /// Number of nibbles in the stream
    #[inline]
    #[must_use]
    pub const fn nibble_count(self) -> usize {
        match self {
            Self::Short { .. } => 1,
            Self::Mid { .. } => 2,
            Self::Escape { .. } => 4,
        }
    }

    /// Nibble values in emission order; only the first `nibble_count()` are meaningful
    #[inline]
    #[must_use]
    pub const fn nibbles(self) -> ([u8; 4], usize) {
        match self {
            Self::Short { nibble } => ([nibble, 0, 0, 0], 1),
            Self::Mid {
                negative,
                magnitude,
            } => ([sign_nibble(negative), magnitude, 0, 0], 2),
            Self::Escape {
                negative,
                magnitude,
            } => (
                [ESCAPE, sign_nibble(negative), magnitude & 0xF, magnitude >> 4],
                4,
            ),
        }
    }

    /// Rebuild a code word from its lead nibble and the nibbles that follow it.
    ///
    /// `rest` must hold exactly `code_len(lead) - 1` nibbles. `position` is the
    /// stream index of `lead` and is only used for error reporting.
    ///
    /// A mid code with magnitude 0 is accepted even though the encoder never
    /// produces one.
    ///
    /// # Errors
    /// Returns `DecodeError::InvalidEscapeSign` if an escape is not followed by 0xD or 0xE.
    #[inline]
    pub fn parse(lead: u8, rest: &[u8], position: usize) -> Result<Self, DecodeError> {
        debug_assert_eq!(rest.len() + 1, code_len(lead));
        match lead {
            0..=SHORT_LEAD_MAX => Ok(Self::Short { nibble: lead }),
            SIGN_NEG | SIGN_POS => Ok(Self::Mid {
                negative: lead == SIGN_NEG,
                magnitude: rest[0],
            }),
            _ => {
                let sign = rest[0];
                if sign != SIGN_NEG && sign != SIGN_POS {
                    return Err(DecodeError::InvalidEscapeSign {
                        nibble: sign,
                        position: position + 1,
                    });
                }
                Ok(Self::Escape {
                    negative: sign == SIGN_NEG,
                    magnitude: rest[1] | (rest[2] << 4),
                })
            }
        }
    }
}

/// Length in nibbles of the code word introduced by `lead`
#[inline]
#[must_use]
pub const fn code_len(lead: u8) -> usize {
    match lead & 0xF {
        0..=SHORT_LEAD_MAX => 1,
        SIGN_NEG | SIGN_POS => 2,
        _ => 4,
    }
}

#[inline]
const fn signed(negative: bool, value: i16) -> i16 {
    if negative {
        -value
    } else {
        value
    }
}
