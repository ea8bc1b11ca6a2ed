//! Encoder for nibbledelta compression.

use crate::code::CodeWord;
use crate::error::EncodeError;
use crate::nibbles::NibbleWriter;

/// Code words for `input`, with the previous sample seeded at 0
fn codes(input: &[u8]) -> impl Iterator<Item = CodeWord> + '_ {
    input.iter().scan(0i16, |prev, &sample| {
        let sample = i16::from(sample);
        let delta = *prev - sample;
        *prev = sample;
        Some(CodeWord::from_delta(delta))
    })
}

/// Encode `input` into `out`, returning the number of packed bytes written
///
/// The running "previous" sample starts at 0, so the first code word carries
/// `0 - input[0]`. Capacity is `out.len()` bytes; a stream that fills it
/// exactly succeeds.
///
/// # Errors
/// Returns `EncodeError::Overflow` as soon as a code word does not fit. None of
/// its nibbles are written and no further input is read. Code words already
/// written stay in `out`.
///
/// # Example
/// ```
/// use nibbledelta::{encode_into, max_encoded_len};
///
/// let row = [10u8, 12, 11, 40];
/// let mut out = vec![0u8; max_encoded_len(row.len())];
/// let n = encode_into(&row, &mut out).unwrap();
/// assert_eq!(n, 4);
/// ```
pub fn encode_into(input: &[u8], out: &mut [u8]) -> Result<usize, EncodeError> {
    let mut writer = NibbleWriter::new(out);

    for (i, code) in codes(input).enumerate() {
        let (nibbles, len) = code.nibbles();
        if !writer.fits(len) {
            let err = EncodeError::Overflow {
                needed: writer.position() + len,
                capacity: writer.capacity() / 2,
                consumed: i,
            };
            log::debug!("encode aborted: {err}");
            return Err(err);
        }
        for &n in &nibbles[..len] {
            writer.put(n);
        }
    }

    log::trace!(
        "encoded {} samples into {} nibbles",
        input.len(),
        writer.position()
    );
    Ok(writer.bytes_written())
}

/// Encode into a freshly allocated buffer of at most `capacity` bytes
///
/// # Errors
/// Returns `EncodeError::Overflow` if the packed stream needs more than `capacity` bytes.
pub fn encode(input: &[u8], capacity: usize) -> Result<Vec<u8>, EncodeError> {
    let mut out = vec![0u8; capacity];
    let n = encode_into(input, &mut out)?;
    out.truncate(n);
    Ok(out)
}

/// Encode into a buffer sized exactly for `input`
#[must_use]
pub fn encode_to_vec(input: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; encoded_len(input)];
    let mut writer = NibbleWriter::new(&mut out);
    for code in codes(input) {
        let (nibbles, len) = code.nibbles();
        for &n in &nibbles[..len] {
            writer.put(n);
        }
    }
    out
}

/// Worst-case packed size for `n` samples (every sample escaped)
#[inline]
#[must_use]
pub const fn max_encoded_len(n: usize) -> usize {
    n * 2
}

/// Exact packed size of `input` without writing anything
#[must_use]
pub fn encoded_len(input: &[u8]) -> usize {
    code_stats(input).packed_len()
}

/// Histogram of code word classes for an input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodeStats {
    pub samples: usize,
    /// 1-nibble codes
    pub short: usize,
    /// 2-nibble codes
    pub mid: usize,
    /// 4-nibble codes
    pub escape: usize,
}

impl CodeStats {
    /// Nibbles the stream occupies
    #[must_use]
    pub const fn nibbles(&self) -> usize {
        self.short + self.mid * 2 + self.escape * 4
    }

    /// Packed bytes, with a trailing half-byte rounded up
    #[must_use]
    pub const fn packed_len(&self) -> usize {
        self.nibbles().div_ceil(2)
    }

    /// Packed size relative to input size
    #[must_use]
    pub fn ratio(&self) -> f64 {
        if self.samples == 0 {
            return 0.0;
        }
        self.packed_len() as f64 / self.samples as f64
    }
}

/// Classify every delta of `input` without packing it
#[must_use]
pub fn code_stats(input: &[u8]) -> CodeStats {
    let mut stats = CodeStats {
        samples: input.len(),
        ..CodeStats::default()
    };
    for code in codes(input) {
        match code {
            CodeWord::Short { .. } => stats.short += 1,
            CodeWord::Mid { .. } => stats.mid += 1,
            CodeWord::Escape { .. } => stats.escape += 1,
        }
    }
    stats
}
