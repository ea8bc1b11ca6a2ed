//! Self-describing container: sample count plus packed stream.
//!
//! The nibble stream cannot tell where it ends (a padding nibble looks like a
//! valid short code), so anything that stores or ships packed data also needs
//! the original sample count. `Frame` carries both.
//!
//! ## Layout
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 4 | sample count, `u32` little-endian |
//! | 4 | n | packed nibble stream |

use serde::{Deserialize, Serialize};

use crate::decoder::decode;
use crate::encoder::encode_to_vec;
use crate::error::{DecodeError, EncodeError};

/// Frame header size in bytes
pub const FRAME_HEADER_SIZE: usize = 4;

/// Packed samples together with their count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Number of samples the stream decodes to
    pub len: u32,
    /// Packed nibble stream
    pub packed: Vec<u8>,
}

impl Frame {
    /// Pack `samples` into a frame
    ///
    /// # Errors
    /// Returns `EncodeError::TooManySamples` if the count does not fit in a `u32`.
    pub fn encode(samples: &[u8]) -> Result<Self, EncodeError> {
        let len = u32::try_from(samples.len())
            .map_err(|_| EncodeError::TooManySamples { len: samples.len() })?;
        Ok(Self {
            len,
            packed: encode_to_vec(samples),
        })
    }

    /// Unpack the frame back to samples
    ///
    /// # Errors
    /// Any stream error from [`decode`](crate::decode), or
    /// `DecodeError::LengthMismatch` if the stream ends early.
    pub fn decode(&self) -> Result<Vec<u8>, DecodeError> {
        let expected = self.len as usize;
        // Every code word takes at least one nibble
        let limit = expected.min(self.packed.len() * 2);
        let samples = decode(&self.packed, limit)?;
        if samples.len() != expected {
            return Err(DecodeError::LengthMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(samples)
    }

    /// Serialize header and stream
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(FRAME_HEADER_SIZE + self.packed.len());
        out.extend_from_slice(&self.len.to_le_bytes());
        out.extend_from_slice(&self.packed);
        out
    }

    /// Parse a buffer produced by [`to_bytes`](Self::to_bytes)
    ///
    /// # Errors
    /// Returns `DecodeError::BufferTooShort` if the header is incomplete.
    pub fn from_bytes(buf: &[u8]) -> Result<Self, DecodeError> {
        if buf.len() < FRAME_HEADER_SIZE {
            return Err(DecodeError::BufferTooShort {
                expected: FRAME_HEADER_SIZE,
                actual: buf.len(),
            });
        }
        let len = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
        Ok(Self {
            len,
            packed: buf[FRAME_HEADER_SIZE..].to_vec(),
        })
    }

    /// Serialized size relative to the raw sample count
    #[must_use]
    pub fn ratio(&self) -> f64 {
        if self.len == 0 {
            return 0.0;
        }
        (FRAME_HEADER_SIZE + self.packed.len()) as f64 / f64::from(self.len)
    }
}
