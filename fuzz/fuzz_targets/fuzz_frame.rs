#![no_main]

use libfuzzer_sys::fuzz_target;
use nibbledelta::Frame;

fuzz_target!(|data: &[u8]| {
    // Feed arbitrary bytes to Frame::from_bytes() - should never panic
    if let Ok(frame) = Frame::from_bytes(data) {
        assert_eq!(frame.to_bytes(), data, "frame bytes not preserved");
        if let Ok(samples) = frame.decode() {
            assert_eq!(samples.len(), frame.len as usize);
        }
    }
});
