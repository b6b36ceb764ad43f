#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    // Use the first two bytes as the requested output size (capped to 64KB
    // to avoid OOM), the rest as header + payload.
    let stop = u16::from_le_bytes([data[0], data[1]]) as usize;
    let _ = oodle1::decompress(&data[2..], &[stop]);
});
