#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 6 {
        return;
    }

    // Three substreams with fuzz-chosen stop offsets (capped to avoid OOM).
    let stop = |i: usize| u16::from_le_bytes([data[2 * i], data[2 * i + 1]]) as usize;
    let stops = [stop(0), stop(1), stop(2)];
    let _ = oodle1::decompress(&data[6..], &stops);
});
