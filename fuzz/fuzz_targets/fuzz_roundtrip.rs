#![no_main]

use libfuzzer_sys::fuzz_target;
use nibbledelta::{decode, encode, encode_into, encoded_len, max_encoded_len, EncodeError};

fuzz_target!(|data: &[u8]| {
    // Property 1: decode(encode(x)) == x
    let packed = encode(data, max_encoded_len(data.len())).expect("2N capacity must suffice");
    let decoded = decode(&packed, data.len()).expect("own output must decode");
    assert_eq!(decoded, data, "roundtrip mismatch");

    // Property 2: encoded_len() is exact
    assert_eq!(packed.len(), encoded_len(data), "size mismatch");

    // Property 3: one byte less overflows without touching the spare byte
    if !packed.is_empty() {
        let mut buf = vec![0xA5u8; packed.len()];
        let last = packed.len() - 1;
        let result = encode_into(data, &mut buf[..last]);
        assert!(matches!(result, Err(EncodeError::Overflow { .. })), "overflow not detected");
        assert_eq!(buf[last], 0xA5, "wrote past capacity");
    }
});
