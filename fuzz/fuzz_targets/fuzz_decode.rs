#![no_main]

use libfuzzer_sys::fuzz_target;
use nibbledelta::decode;

fuzz_target!(|data: &[u8]| {
    // First 2 bytes pick the expected sample count, the rest is the stream
    if data.len() < 2 {
        return;
    }
    let expected = usize::from(u16::from_le_bytes([data[0], data[1]]));

    // May return Err for malformed input, but should not crash
    if let Ok(samples) = decode(&data[2..], expected) {
        assert!(samples.len() <= expected, "decoded past expected count");
    }
});
