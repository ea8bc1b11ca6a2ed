//! Error types for nibbledelta encoding and decoding operations.

use std::fmt;

/// Error returned when encoding fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// Output buffer cannot hold the next code word
    Overflow {
        /// Nibble slots the stream needed when the failing code word was reached
        needed: usize,
        /// Output capacity in bytes
        capacity: usize,
        /// Input samples fully encoded before the failure
        consumed: usize,
    },
    /// Too many samples to record in a frame header (max `u32::MAX`)
    TooManySamples { len: usize },
}

/// Error returned when decoding fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Escape nibble (0xF) followed by something other than a sign nibble
    InvalidEscapeSign { nibble: u8, position: usize },
    /// Nibble stream ends inside a code word
    Truncated {
        needed: usize,
        available: usize,
        position: usize,
    },
    /// Reconstructed sample falls outside [0, 255]
    SampleOutOfRange { value: i32, index: usize },
    /// Buffer is too short to contain a frame header
    BufferTooShort { expected: usize, actual: usize },
    /// Stream yielded fewer samples than the frame header records
    LengthMismatch { expected: usize, actual: usize },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overflow {
                needed,
                capacity,
                consumed,
            } => {
                write!(
                    f,
                    "output overflow after {consumed} samples: need {needed} nibbles, capacity is {capacity} bytes"
                )
            }
            Self::TooManySamples { len } => {
                write!(f, "too many samples ({len}), max is {}", u32::MAX)
            }
        }
    }
}

impl std::error::Error for EncodeError {}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEscapeSign { nibble, position } => {
                write!(
                    f,
                    "escape at nibble {position} followed by {nibble:#X}, expected 0xD or 0xE"
                )
            }
            Self::Truncated {
                needed,
                available,
                position,
            } => {
                write!(
                    f,
                    "stream truncated at nibble {position}: code word needs {needed} nibbles, {available} left"
                )
            }
            Self::SampleOutOfRange { value, index } => {
                write!(f, "sample {index} decoded to {value}, outside [0, 255]")
            }
            Self::BufferTooShort { expected, actual } => {
                write!(f, "buffer too short: expected at least {expected} bytes, got {actual}")
            }
            Self::LengthMismatch { expected, actual } => {
                write!(f, "stream decoded to {actual} samples, header records {expected}")
            }
        }
    }
}

impl std::error::Error for DecodeError {}
