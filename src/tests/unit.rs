use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{
    code_len, code_stats, decode, decode_into, encode, encode_into, encode_to_vec, encoded_len,
    max_encoded_len, CodeStats, CodeWord, DecodeError, EncodeError, Frame, FRAME_HEADER_SIZE,
};

/// Powers of two up to white and back down
const SAMPLE_ROW: [u8; 20] = [
    0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0xFF, 0xFF, 0x80, 0x40, 0x20, 0x10,
    0x08, 0x04, 0x02, 0x01, 0x00,
];

const SAMPLE_ROW_PACKED: [u8; 21] = [
    0x56, 0x45, 0xD2, 0xD2, 0xFA, 0x0D, 0xF2, 0x0D, 0xF4, 0xFD, 0x67, 0xEF, 0x7F, 0xEF, 0x40,
    0xEF, 0x20, 0xAE, 0x2E, 0x8A, 0x77,
];

/// 255 followed by every step from -255 to +255 (wrapping), padded to 513 samples
fn delta_ramp() -> Vec<u8> {
    let mut data = vec![0u8; 513];
    data[0] = 255;
    let mut i = 1;
    for delta in -255i32..=255 {
        data[i] = data[i - 1].wrapping_add(delta as u8);
        i += 1;
    }
    data
}

fn roundtrip(data: &[u8]) {
    let packed = encode(data, max_encoded_len(data.len())).unwrap();
    let decoded = decode(&packed, data.len()).unwrap();
    assert_eq!(decoded, data);
}

// ---------------------------------------------------------------------------
// Code table
// ---------------------------------------------------------------------------

#[test]
fn test_boundary_code_lengths() {
    for d in [-6, 6, 0] {
        assert_eq!(CodeWord::from_delta(d).nibble_count(), 1, "delta {d}");
    }
    for d in [-7, 7, -19, 19] {
        assert_eq!(CodeWord::from_delta(d).nibble_count(), 2, "delta {d}");
    }
    for d in [-20, 20, -255, 255] {
        assert_eq!(CodeWord::from_delta(d).nibble_count(), 4, "delta {d}");
    }
}

#[test]
fn test_code_nibble_values() {
    assert_eq!(CodeWord::from_delta(-6).nibbles(), ([0x0, 0, 0, 0], 1));
    assert_eq!(CodeWord::from_delta(0).nibbles(), ([0x6, 0, 0, 0], 1));
    assert_eq!(CodeWord::from_delta(6).nibbles(), ([0xC, 0, 0, 0], 1));
    assert_eq!(CodeWord::from_delta(-7).nibbles(), ([0xD, 0x1, 0, 0], 2));
    assert_eq!(CodeWord::from_delta(19).nibbles(), ([0xE, 0xD, 0, 0], 2));
    assert_eq!(CodeWord::from_delta(-20).nibbles(), ([0xF, 0xD, 0x4, 0x1], 4));
    assert_eq!(CodeWord::from_delta(255).nibbles(), ([0xF, 0xE, 0xF, 0xF], 4));
}

#[test]
fn test_code_table_inverts_for_every_delta() {
    for d in -255i16..=255 {
        let code = CodeWord::from_delta(d);
        assert_eq!(code.delta(), d);
        let (nibbles, len) = code.nibbles();
        assert_eq!(len, code.nibble_count());
        assert_eq!(code_len(nibbles[0]), len, "delta {d}");
        assert_eq!(CodeWord::parse(nibbles[0], &nibbles[1..len], 0), Ok(code));
    }
}

#[test]
fn test_code_len_by_lead() {
    for lead in 0x0..=0xC {
        assert_eq!(code_len(lead), 1);
    }
    assert_eq!(code_len(0xD), 2);
    assert_eq!(code_len(0xE), 2);
    assert_eq!(code_len(0xF), 4);
}

#[test]
fn test_mid_magnitude_zero_is_decodable_but_never_emitted() {
    let code = CodeWord::parse(0xD, &[0x0], 0).unwrap();
    assert_eq!(code.delta(), -6);
    for d in -255i16..=255 {
        if let CodeWord::Mid { magnitude, .. } = CodeWord::from_delta(d) {
            assert_ne!(magnitude, 0, "delta {d}");
        }
    }
    // Both spellings of -6 from a zero seed decode to 6
    assert_eq!(decode(&[0x0D], 1).unwrap(), [6]);
    assert_eq!(encode_to_vec(&[6]), [0x00]);
    assert_eq!(decode(&[0x00], 1).unwrap(), [6]);
}

// ---------------------------------------------------------------------------
// Encoder
// ---------------------------------------------------------------------------

#[test]
fn test_sample_row_roundtrip() {
    let packed = encode(&SAMPLE_ROW, SAMPLE_ROW.len() * 2).unwrap();
    assert_eq!(packed, SAMPLE_ROW_PACKED);
    let decoded = decode(&packed, SAMPLE_ROW.len()).unwrap();
    assert_eq!(decoded, SAMPLE_ROW);
}

#[test]
fn test_delta_ramp_roundtrip() {
    let data = delta_ramp();
    assert_eq!(data.len(), 513);
    let stats = code_stats(&data);
    assert!(stats.short > 0);
    assert!(stats.escape > 0);
    roundtrip(&data);
}

#[test]
fn test_empty_input() {
    assert_eq!(encode(&[], 0).unwrap(), Vec::<u8>::new());
    assert_eq!(encode_to_vec(&[]), Vec::<u8>::new());
    assert_eq!(decode(&[], 0).unwrap(), Vec::<u8>::new());
    assert_eq!(decode(&[], 10).unwrap(), Vec::<u8>::new());
}

#[test]
fn test_first_delta_is_from_zero() {
    // 0 - 200 = -200: escape, negative, 0xC8
    assert_eq!(encode_to_vec(&[200]), [0xDF, 0xC8]);
    // Seed resets on every call
    assert_eq!(encode_to_vec(&[200]), encode_to_vec(&[200]));
    assert_eq!(encode_to_vec(&[0]), [0x06]);
}

#[test]
fn test_odd_nibble_count_zero_pads() {
    // Three short codes: 6, 5, 5 then a zero high half
    assert_eq!(encode_to_vec(&[0, 1, 2]), [0x56, 0x05]);
}

#[test]
fn test_encode_into_ignores_stale_bytes() {
    let mut out = [0xAAu8; 4];
    let n = encode_into(&[0, 1, 2], &mut out).unwrap();
    assert_eq!(n, 2);
    assert_eq!(&out[..n], [0x56, 0x05]);
}

#[test]
fn test_exact_capacity_succeeds() {
    // Every delta is +-255: 4 nibbles per sample, 2 bytes per sample
    let data = [255u8, 0, 255, 0];
    let packed = encode(&data, 8).unwrap();
    assert_eq!(packed.len(), 8);
    assert_eq!(decode(&packed, 4).unwrap(), data);
}

#[test]
fn test_capacity_one_short_overflows() {
    let data = [255u8, 0, 255, 0];
    let err = encode(&data, 7).unwrap_err();
    assert_eq!(
        err,
        EncodeError::Overflow {
            needed: 16,
            capacity: 7,
            consumed: 3
        }
    );
}

#[test]
fn test_overflow_writes_nothing_of_failing_code_word() {
    let mut buf = [0xAAu8; 6];
    // short (1 nibble) then escape (4 nibbles) into 2 bytes
    let err = encode_into(&[0, 255], &mut buf[..2]).unwrap_err();
    assert_eq!(
        err,
        EncodeError::Overflow {
            needed: 5,
            capacity: 2,
            consumed: 1
        }
    );
    assert_eq!(buf[0], 0x06);
    assert_eq!(&buf[1..], [0xAA; 5]);
}

#[test]
fn test_zero_capacity_overflows_on_first_sample() {
    let err = encode(&[1], 0).unwrap_err();
    assert!(matches!(err, EncodeError::Overflow { consumed: 0, .. }));
}

#[test]
fn test_worst_case_bound() {
    let data: Vec<u8> = (0..1000).map(|i| if i % 2 == 0 { 0 } else { 255 }).collect();
    let packed = encode_to_vec(&data);
    assert!(packed.len() <= max_encoded_len(data.len()));
    assert_eq!(decode(&packed, data.len()).unwrap(), data);
}

#[test]
fn test_code_stats_sample_row() {
    let stats = code_stats(&SAMPLE_ROW);
    assert_eq!(
        stats,
        CodeStats {
            samples: 20,
            short: 10,
            mid: 4,
            escape: 6
        }
    );
    assert_eq!(stats.nibbles(), 42);
    assert_eq!(stats.packed_len(), 21);
    assert_eq!(encoded_len(&SAMPLE_ROW), 21);
    assert!((stats.ratio() - 1.05).abs() < 1e-9);
}

#[test]
fn test_smooth_gradient_compresses() {
    // Slow ramp: every step is 0 or 1
    let data: Vec<u8> = (0..4096u32).map(|i| (i / 16) as u8).collect();
    let packed = encode_to_vec(&data);
    assert_eq!(packed.len(), data.len() / 2);
    assert_eq!(decode(&packed, data.len()).unwrap(), data);
}

#[test]
fn test_random_buffers_roundtrip() {
    let mut rng = StdRng::seed_from_u64(0x0D_C0DE_4);
    let mut data = [0u8; 1024];
    for _ in 0..50 {
        rng.fill(&mut data[..]);
        for m in (data.len() - 16..=data.len()).rev() {
            roundtrip(&data[..m]);
        }
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

#[test]
fn test_decode_stops_at_expected_count() {
    let decoded = decode(&SAMPLE_ROW_PACKED, 5).unwrap();
    assert_eq!(decoded, SAMPLE_ROW[..5]);

    let mut out = [0u8; 9];
    assert_eq!(decode_into(&SAMPLE_ROW_PACKED, &mut out).unwrap(), 9);
    assert_eq!(out, SAMPLE_ROW[..9]);
}

#[test]
fn test_decode_does_not_read_past_expected_count() {
    // Sample 2 is followed by garbage: an escape with a bad sign nibble
    let mut packed = encode_to_vec(&[0, 1]);
    packed.push(0xAF);
    assert_eq!(decode(&packed, 2).unwrap(), [0, 1]);
    assert!(decode(&packed, 3).is_err());
}

#[test]
fn test_decode_short_stream_returns_fewer() {
    let packed = encode_to_vec(&[0, 1]);
    assert_eq!(decode(&packed, 10).unwrap(), [0, 1]);
}

#[test]
fn test_decode_padding_nibble_reads_as_sample() {
    // [6] packs as a single 0x0 nibble plus a 0x0 pad; the pad is a valid -6 step
    let packed = encode_to_vec(&[6]);
    assert_eq!(decode(&packed, 1).unwrap(), [6]);
    assert_eq!(decode(&packed, 5).unwrap(), [6, 12]);
}

#[test]
fn test_decode_invalid_escape_sign() {
    let err = decode(&[0xAF, 0x00], 1).unwrap_err();
    assert_eq!(
        err,
        DecodeError::InvalidEscapeSign {
            nibble: 0xA,
            position: 1
        }
    );
}

#[test]
fn test_decode_escape_followed_by_escape() {
    let err = decode(&[0xFF, 0x00], 1).unwrap_err();
    assert!(matches!(err, DecodeError::InvalidEscapeSign { nibble: 0xF, .. }));
}

#[test]
fn test_decode_truncated_escape() {
    let err = decode(&[0xDF], 1).unwrap_err();
    assert_eq!(
        err,
        DecodeError::Truncated {
            needed: 4,
            available: 2,
            position: 0
        }
    );
}

#[test]
fn test_decode_truncated_mid_code() {
    // 0x6 (sample 0), then a sign nibble with nothing after it
    let err = decode(&[0xD6], 2).unwrap_err();
    assert_eq!(
        err,
        DecodeError::Truncated {
            needed: 2,
            available: 1,
            position: 1
        }
    );
}

#[test]
fn test_decode_sample_below_zero() {
    // +6 step from the zero seed
    let err = decode(&[0x0C], 1).unwrap_err();
    assert_eq!(err, DecodeError::SampleOutOfRange { value: -6, index: 0 });
}

#[test]
fn test_decode_sample_above_255() {
    // -255 step to 255, then -6 step to 261
    let err = decode(&[0xDF, 0xFF, 0x00], 2).unwrap_err();
    assert_eq!(err, DecodeError::SampleOutOfRange { value: 261, index: 1 });
}

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

#[test]
fn test_frame_roundtrip() {
    let frame = Frame::encode(&SAMPLE_ROW).unwrap();
    assert_eq!(frame.len, 20);
    assert_eq!(frame.packed, SAMPLE_ROW_PACKED);

    let bytes = frame.to_bytes();
    assert_eq!(bytes.len(), FRAME_HEADER_SIZE + 21);
    assert_eq!(&bytes[..4], [20, 0, 0, 0]);

    let parsed = Frame::from_bytes(&bytes).unwrap();
    assert_eq!(parsed, frame);
    assert_eq!(parsed.decode().unwrap(), SAMPLE_ROW);
}

#[test]
fn test_frame_keeps_odd_stream_exact() {
    // Without the count the pad nibble would decode as an extra sample
    let frame = Frame::encode(&[6]).unwrap();
    assert_eq!(frame.decode().unwrap(), [6]);
}

#[test]
fn test_frame_from_short_buffer() {
    let err = Frame::from_bytes(&[1, 0, 0]).unwrap_err();
    assert_eq!(
        err,
        DecodeError::BufferTooShort {
            expected: 4,
            actual: 3
        }
    );
}

#[test]
fn test_frame_length_mismatch() {
    let frame = Frame {
        len: 10,
        packed: vec![0x56],
    };
    assert_eq!(
        frame.decode().unwrap_err(),
        DecodeError::LengthMismatch {
            expected: 10,
            actual: 2
        }
    );
}

#[test]
fn test_empty_frame() {
    let frame = Frame::encode(&[]).unwrap();
    assert_eq!(frame.to_bytes(), [0, 0, 0, 0]);
    assert!(frame.decode().unwrap().is_empty());
    assert!(frame.ratio().abs() < f64::EPSILON);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn test_error_messages() {
    let err = EncodeError::Overflow {
        needed: 5,
        capacity: 2,
        consumed: 1,
    };
    assert_eq!(
        err.to_string(),
        "output overflow after 1 samples: need 5 nibbles, capacity is 2 bytes"
    );
    let err = DecodeError::InvalidEscapeSign {
        nibble: 0xA,
        position: 1,
    };
    assert_eq!(
        err.to_string(),
        "escape at nibble 1 followed by 0xA, expected 0xD or 0xE"
    );
    let err = DecodeError::SampleOutOfRange { value: -6, index: 0 };
    assert_eq!(err.to_string(), "sample 0 decoded to -6, outside [0, 255]");
}
