//! Decoding functionality for nibbledelta packed streams.

use crate::code::{code_len, CodeWord};
use crate::constants::MAX_CODE_NIBBLES;
use crate::error::DecodeError;
use crate::nibbles::NibbleReader;

/// Decode `packed` into `out`, returning the number of samples produced
///
/// Decoding stops once `out` is full or the nibble stream is exhausted on a
/// code-word boundary. The stream does not record its own sample count: a
/// padding nibble left by an odd-length stream decodes as a sample if `out`
/// is longer than the original input.
///
/// # Errors
/// * `DecodeError::InvalidEscapeSign` - escape not followed by a sign nibble
/// * `DecodeError::Truncated` - stream ends inside a code word
/// * `DecodeError::SampleOutOfRange` - reconstructed sample outside [0, 255]
///
/// # Example
/// ```
/// use nibbledelta::{decode_into, encode_to_vec};
///
/// let row = [10u8, 12, 11, 40];
/// let packed = encode_to_vec(&row);
/// let mut out = [0u8; 4];
/// assert_eq!(decode_into(&packed, &mut out).unwrap(), 4);
/// assert_eq!(out, row);
/// ```
pub fn decode_into(packed: &[u8], out: &mut [u8]) -> Result<usize, DecodeError> {
    let mut reader = NibbleReader::new(packed);
    let mut prev = 0i32;
    let mut produced = 0;

    while produced < out.len() && reader.has_more() {
        let position = reader.position();
        let lead = reader.take();
        let len = code_len(lead);
        let rest_len = len - 1;
        if reader.remaining() < rest_len {
            let err = DecodeError::Truncated {
                needed: len,
                available: reader.remaining() + 1,
                position,
            };
            log::debug!("decode aborted: {err}");
            return Err(err);
        }

        let mut rest = [0u8; MAX_CODE_NIBBLES - 1];
        for slot in &mut rest[..rest_len] {
            *slot = reader.take();
        }
        let code = CodeWord::parse(lead, &rest[..rest_len], position).inspect_err(|err| {
            log::debug!("decode aborted: {err}");
        })?;

        let value = prev - i32::from(code.delta());
        let sample = u8::try_from(value).map_err(|_| {
            let err = DecodeError::SampleOutOfRange {
                value,
                index: produced,
            };
            log::debug!("decode aborted: {err}");
            err
        })?;
        out[produced] = sample;
        prev = value;
        produced += 1;
    }

    log::trace!(
        "decoded {produced} of {} samples from {} nibbles",
        out.len(),
        reader.position()
    );
    Ok(produced)
}

/// Decode up to `expected` samples into a new buffer
///
/// The returned buffer is shorter than `expected` when the stream runs out.
///
/// # Errors
/// Same as [`decode_into`].
pub fn decode(packed: &[u8], expected: usize) -> Result<Vec<u8>, DecodeError> {
    let mut out = vec![0u8; expected];
    let n = decode_into(packed, &mut out)?;
    out.truncate(n);
    Ok(out)
}
