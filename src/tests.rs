//! End-to-end decompression tests.
//!
//! The compressed sections here are hand-derived: the payload bits were
//! computed by running the decoder arithmetic forward, choosing each
//! decoded value. Fresh coders make this tractable — until the first
//! renormalization every decode lands in the escape slot, which consumes
//! nothing, so the payload is just the sequence of `get` reads. Each
//! fixture documents the token sequence it encodes.

use crate::{decompress, Bitstream, Oodle1Decoder, Oodle1Error, StreamHeader};

/// Header: window 16, literal alphabet 256 (all unique), no 1K pages,
/// two repeat codes in group 0.
const HEADER_W16: [u8; 12] = [
    0x00, 0x21, 0x00, 0x00, // word 0
    0x00, 0x01, 0x00, 0x00, // word 1
    0x00, 0x00, 0x00, 0x02, // word 2
];

/// Token sequence: literal 0x11, then a copy with code 1 (length 2) at
/// offset 1 — the copy overlaps its own output and replicates the byte.
const PAYLOAD_LIT_COPY: [u8; 8] = [0x00, 0x42, 0xFB, 0xEE, 0x00, 0x00, 0x00, 0x00];

fn section(headers: &[&[u8; 12]], payload: &[u8]) -> Vec<u8> {
    let mut section = Vec::new();
    for header in headers {
        section.extend_from_slice(*header);
    }
    section.extend_from_slice(payload);
    section
}

#[test]
fn test_literal_then_overlapping_copy() {
    let input = section(&[&HEADER_W16], &PAYLOAD_LIT_COPY);
    let out = decompress(&input, &[3]).unwrap();

    assert_eq!(out, [0x11, 0x11, 0x11]);
}

#[test]
fn test_decode_reports_bytes_per_unit() {
    let header = StreamHeader::parse(&HEADER_W16).unwrap();
    let mut decoder = Oodle1Decoder::new(&header);
    let mut bs = Bitstream::new(&PAYLOAD_LIT_COPY);
    let mut out = Vec::new();

    assert_eq!(decoder.decode(&mut bs, &mut out).unwrap(), 1);
    assert_eq!(out, [0x11]);
    assert_eq!(decoder.decode(&mut bs, &mut out).unwrap(), 2);
    assert_eq!(out, [0x11, 0x11, 0x11]);
}

#[test]
fn test_two_literals_with_tiny_window() {
    // Window 2: the 1-byte offset alphabet shrinks to 3. Tokens: literal
    // 0x41, then a second literal selected through the probationary band
    // of the length coder (escape, pick branch, band index 0 -> code 0).
    let header = [
        0x00, 0x05, 0x00, 0x00, // word 0: window 2, alphabet 256
        0x00, 0x01, 0x00, 0x00, // word 1
        0x00, 0x00, 0x00, 0x01, // word 2: one repeat code in group 0
    ];
    let payload = [0x01, 0x02, 0x79, 0xD4, 0xBC, 0x00, 0x00, 0x00];
    let input = section(&[&header], &payload);

    let out = decompress(&input, &[2]).unwrap();
    assert_eq!(out, [0x41, 0x42]);
}

#[test]
fn test_substream_handoff() {
    // Two substreams of one literal each. The second gets a fresh decoder
    // (its literal coder learns 0x42 from scratch) while the bitstream
    // carries straight on from where substream 0 stopped.
    let header = [
        0x00, 0x21, 0x00, 0x00, //
        0x00, 0x01, 0x00, 0x00, //
        0x00, 0x00, 0x00, 0x01, // one repeat code per group 0
    ];
    let payload = [0x01, 0x00, 0x03, 0xC4, 0x00, 0x00, 0x00, 0x00];
    let input = section(&[&header, &header], &payload);

    let out = decompress(&input, &[1, 2]).unwrap();
    assert_eq!(out, [0x41, 0x42]);
}

#[test]
fn test_empty_substream_is_skipped_unvalidated() {
    // Substream 0 covers zero bytes; its all-zero header would be invalid
    // but is never consulted.
    let zero_header = [0u8; 12];
    let input = section(&[&zero_header, &HEADER_W16], &PAYLOAD_LIT_COPY);

    let out = decompress(&input, &[0, 3]).unwrap();
    assert_eq!(out, [0x11, 0x11, 0x11]);
}

#[test]
fn test_no_substreams_yields_empty_output() {
    assert_eq!(decompress(&[], &[]).unwrap(), Vec::<u8>::new());
}

#[test]
fn test_unpadded_payload_is_accepted() {
    // Same stream as the literal+copy case with the zero pad sliced off;
    // the reader synthesizes the missing pad bytes.
    let input = section(&[&HEADER_W16], &PAYLOAD_LIT_COPY[..4]);

    let out = decompress(&input, &[3]).unwrap();
    assert_eq!(out, [0x11, 0x11, 0x11]);
}

#[test]
fn test_decompression_is_deterministic() {
    let input = section(&[&HEADER_W16], &PAYLOAD_LIT_COPY);

    let first = decompress(&input, &[3]).unwrap();
    let second = decompress(&input, &[3]).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_rejects_copy_before_any_output() {
    // First token is repeat code 1: the minimum representable offset is 1
    // but nothing has been written yet, so the effective window is 0.
    let payload = [0x03, 0xF0, 0x3F, 0x02];
    let input = section(&[&HEADER_W16], &payload);

    assert_eq!(
        decompress(&input, &[2]),
        Err(Oodle1Error::InvalidOffset {
            offset: 1,
            window: 0
        })
    );
}

#[test]
fn test_rejects_truncated_payload() {
    // Empty payload: the synthesized pad carries the first literal, after
    // which the reader refuses to invent more input.
    let input = section(&[&HEADER_W16], &[]);

    assert_eq!(decompress(&input, &[4]), Err(Oodle1Error::TruncatedStream));
}

#[test]
fn test_rejects_short_header_region() {
    assert_eq!(
        decompress(&[0u8; 20], &[1, 2]),
        Err(Oodle1Error::TruncatedStream)
    );
}

#[test]
fn test_rejects_invalid_header() {
    let zero_header = [0u8; 12];
    let input = section(&[&zero_header], &PAYLOAD_LIT_COPY);

    assert!(matches!(
        decompress(&input, &[3]),
        Err(Oodle1Error::InvalidHeader(_))
    ));
}
