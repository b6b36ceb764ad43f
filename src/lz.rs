//! LZ dictionary layer.
//!
//! Decodes the token stream into bytes. Every repeat unit starts with a
//! length code from one of 65 length coders — selected by the previous
//! code, giving a one-step context model. Code 0 is a literal, decoded by
//! one of 4 literal coders rotated on the low two bits of the output
//! position. Any other code is a window copy: the length comes from a
//! fixed table and the offset is assembled from three separately coded
//! fields (1-byte, 1 KiB page, 4-byte) decoded in that order.

use crate::bitstream::Bitstream;
use crate::coder::SymbolCoder;
use crate::error::{Oodle1Error, Result};
use crate::header::{StreamHeader, HEADER_SIZE};

/// Copy length for each repeat code; index 0 marks a literal.
const REPEAT_LENGTHS: [u32; 65] = [
    0, 2, 3, 4, 5, 6, 7, 8, //
    9, 10, 11, 12, 13, 14, 15, 16, //
    17, 18, 19, 20, 21, 22, 23, 24, //
    25, 26, 27, 28, 29, 30, 31, 32, //
    33, 34, 35, 36, 37, 38, 39, 40, //
    41, 42, 43, 44, 45, 46, 47, 48, //
    49, 50, 51, 52, 53, 54, 55, 56, //
    57, 58, 59, 60, 61, 128, 192, 256, 512,
];

/// Length coders per header group.
const LENGTH_GROUP_SIZE: usize = 16;

/// Decoder for one Oodle1 substream.
///
/// Owns its coder set; the bitstream is borrowed per call so several
/// consecutive substreams can share one reader.
pub struct Oodle1Decoder {
    window_size: u32,
    lit_alphabet_size: u32,
    offset1_alphabet_size: u32,
    /// Bytes this substream has produced so far.
    bytes_output: u32,
    /// Previous length code; selects the next length coder.
    last_length_code: u32,
    lit_coders: [SymbolCoder; 4],
    len_coders: Vec<SymbolCoder>,
    offset1_coder: SymbolCoder,
    offset4_coders: Vec<SymbolCoder>,
    offset1k_coder: SymbolCoder,
}

impl Oodle1Decoder {
    /// Create a decoder from a parsed substream header.
    pub fn new(header: &StreamHeader) -> Self {
        let las = header.lit_alphabet_size;
        let lits = header.unique_literals;
        let lit_coders = [
            SymbolCoder::new(las, lits),
            SymbolCoder::new(las, lits),
            SymbolCoder::new(las, lits),
            SymbolCoder::new(las, lits),
        ];

        let mut len_coders = Vec::with_capacity(REPEAT_LENGTHS.len());
        for &group_count in &header.unique_lengths {
            for _ in 0..LENGTH_GROUP_SIZE {
                len_coders.push(SymbolCoder::new(65, u32::from(group_count)));
            }
        }
        // Coder 64 shares the last group's count.
        len_coders.push(SymbolCoder::new(65, u32::from(header.unique_lengths[3])));

        let offset1_alphabet_size = (header.window_size + 1).min(4);
        let offset4_alphabet_size = (header.window_size / 4 + 1).min(256);
        let offset1k_alphabet_size = header.window_size / 1024 + 1;
        let offset4_coders = (0..256)
            .map(|_| SymbolCoder::new(offset4_alphabet_size, offset4_alphabet_size))
            .collect();

        Self {
            window_size: header.window_size,
            lit_alphabet_size: las,
            offset1_alphabet_size,
            bytes_output: 0,
            last_length_code: 0,
            lit_coders,
            len_coders,
            offset1_coder: SymbolCoder::new(offset1_alphabet_size, offset1_alphabet_size),
            offset4_coders,
            offset1k_coder: SymbolCoder::new(
                offset1k_alphabet_size,
                header.largest_1k_offset + 1,
            ),
        }
    }

    /// Decode one repeat unit, appending its bytes to `out`.
    ///
    /// Returns the number of bytes produced: 1 for a literal, the copy
    /// length otherwise. `out` must already hold everything this substream
    /// has decoded (plus any preceding substreams); copies read back from
    /// it.
    pub fn decode(&mut self, bs: &mut Bitstream<'_>, out: &mut Vec<u8>) -> Result<u32> {
        let code = self.len_coders[self.last_length_code as usize].decode(bs, 65)?;
        self.last_length_code = code;

        if code == 0 {
            let lit = self.lit_coders[(self.bytes_output & 3) as usize]
                .decode(bs, self.lit_alphabet_size)?;
            out.push(lit as u8);
            self.bytes_output += 1;
            return Ok(1);
        }

        let length = REPEAT_LENGTHS[code as usize];
        let window = self.window_size.min(self.bytes_output);
        let off1 = self.offset1_coder.decode(bs, self.offset1_alphabet_size)? + 1;
        let off1k = self.offset1k_coder.decode(bs, window / 1024 + 1)?;
        let off4_coder = self
            .offset4_coders
            .get_mut(off1k as usize)
            .ok_or(Oodle1Error::InvalidOffset {
                offset: off1k * 1024,
                window,
            })?;
        let off4 = off4_coder.decode(bs, (window / 4 + 1).min(256))?;

        let offset = off1k * 1024 + off4 * 4 + off1;
        if offset > window {
            return Err(Oodle1Error::InvalidOffset { offset, window });
        }

        // Strictly forward byte copy: with offset < length each written
        // byte is read again later in the same run.
        let start = out.len() - offset as usize;
        for i in 0..length as usize {
            let byte = out[start + i];
            out.push(byte);
        }
        self.bytes_output += length;
        Ok(length)
    }

    /// Decode repeat units until `out` reaches `target_len` bytes.
    ///
    /// The final copy of a substream may overshoot the target; the caller
    /// decides whether to truncate.
    pub fn decompress(
        &mut self,
        bs: &mut Bitstream<'_>,
        out: &mut Vec<u8>,
        target_len: usize,
    ) -> Result<()> {
        while out.len() < target_len {
            self.decode(bs, out)?;
        }
        Ok(())
    }
}

/// Decompress a complete Oodle1-encoded section.
///
/// `input` holds one 12-byte header per entry of `stream_stops`, back to
/// back, followed by the shared compressed payload. `stream_stops[i]` is
/// the absolute output length at which substream `i` ends; the last entry
/// is the total decompressed size. Each substream gets a fresh decoder
/// while the bitstream continues from its current position.
pub fn decompress(input: &[u8], stream_stops: &[usize]) -> Result<Vec<u8>> {
    let Some(&total) = stream_stops.last() else {
        return Ok(Vec::new());
    };
    let headers_len = stream_stops.len() * HEADER_SIZE;
    if input.len() < headers_len {
        return Err(Oodle1Error::TruncatedStream);
    }

    let mut bs = Bitstream::new(&input[headers_len..]);
    let mut out = Vec::with_capacity(total);
    for (index, &stop) in stream_stops.iter().enumerate() {
        if out.len() >= total {
            break;
        }
        // A substream whose stop has already been passed contributes no
        // bytes; its header is not even validated, matching files whose
        // unused substreams carry degenerate headers.
        if out.len() >= stop {
            continue;
        }
        let header = StreamHeader::parse(&input[index * HEADER_SIZE..])?;
        let mut decoder = Oodle1Decoder::new(&header);
        decoder.decompress(&mut bs, &mut out, stop)?;
    }
    out.truncate(total);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_header() -> StreamHeader {
        StreamHeader::from_words([(4096 << 9) | 256, (4 << 19) | 256, 0x0201_0102]).unwrap()
    }

    #[test]
    fn test_repeat_length_table() {
        assert_eq!(REPEAT_LENGTHS[1], 2);
        assert_eq!(REPEAT_LENGTHS[60], 61);
        assert_eq!(REPEAT_LENGTHS[61], 128);
        assert_eq!(REPEAT_LENGTHS[62], 192);
        assert_eq!(REPEAT_LENGTHS[63], 256);
        assert_eq!(REPEAT_LENGTHS[64], 512);
    }

    #[test]
    fn test_decoder_coder_counts() {
        let decoder = Oodle1Decoder::new(&test_header());

        assert_eq!(decoder.lit_coders.len(), 4);
        assert_eq!(decoder.len_coders.len(), 65);
        assert_eq!(decoder.offset4_coders.len(), 256);
    }

    #[test]
    fn test_decoder_initial_state() {
        let decoder = Oodle1Decoder::new(&test_header());

        assert_eq!(decoder.bytes_output, 0);
        assert_eq!(decoder.last_length_code, 0);
        assert_eq!(decoder.offset1_alphabet_size, 4);
    }

    #[test]
    fn test_tiny_window_offset_alphabet() {
        let header = StreamHeader::from_words([(2 << 9) | 256, 256, 0x0100_0000]).unwrap();
        let decoder = Oodle1Decoder::new(&header);

        assert_eq!(decoder.offset1_alphabet_size, 3);
    }
}
