//! `nibbledelta` - Lossless delta codec for low-gradient 8-bit grayscale rows
//!
//! Neighbouring pixels in smooth grayscale images rarely differ by much. This
//! crate stores the signed difference between consecutive samples as a
//! variable-length run of nibbles: small steps cost half a byte, moderate
//! steps a byte, and anything else two bytes.
//!
//! # Example
//! ```
//! use nibbledelta::{decode, encode, max_encoded_len};
//!
//! let row = [0x00u8, 0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0xFF];
//! let packed = encode(&row, max_encoded_len(row.len())).unwrap();
//!
//! // The sample count travels out of band
//! let restored = decode(&packed, row.len()).unwrap();
//! assert_eq!(restored, row);
//! ```
//!
//! # Stream Format
//!
//! For each sample, `delta = previous - sample` with `previous` starting at 0.
//! Code words, first match wins:
//!
//! | Delta | Nibbles | Encoding |
//! |-------|---------|----------|
//! | -6..=6 | 1 | `delta + 6` (0x0-0xC) |
//! | -19..=19 | 2 | `0xD` (negative) or `0xE` (positive), then `abs(delta) - 6` |
//! | -255..=255 | 4 | `0xF`, sign nibble, low nibble of `abs(delta)`, high nibble |
//!
//! Nibbles are packed two per byte, first nibble in the low half. An odd
//! nibble count leaves the last high half zero.
//!
//! ## Worst Case
//!
//! Every sample escaped: 4 nibbles per sample, so `max_encoded_len(n) == 2 * n`.
//!
//! ## Sample Count
//!
//! The stream does not record how many samples it holds. Callers pass the
//! count to the decoder, or use [`Frame`] which prefixes it.

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

mod code;
mod constants;
mod decoder;
mod encoder;
mod error;
mod frame;
mod nibbles;

#[cfg(test)]
mod tests;

// Re-export public API
pub use code::{code_len, CodeWord};
pub use decoder::{decode, decode_into};
pub use encoder::{
    code_stats, encode, encode_into, encode_to_vec, encoded_len, max_encoded_len, CodeStats,
};
pub use error::{DecodeError, EncodeError};
pub use frame::{Frame, FRAME_HEADER_SIZE};
