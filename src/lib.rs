//! Oodle1 decompression library.
//!
//! Decoder for the Oodle1 compression scheme used by Granny2 game asset
//! containers (circa 2006). Oodle1 is an LZ77-style dictionary coder whose
//! tokens are entropy-coded by a few hundred adaptive symbol coders sharing
//! one arithmetic bitstream.
//!
//! ## Architecture
//!
//! The decompression pipeline:
//!
//! ```text
//! Compressed Data
//!       ↓
//! ┌──────────────┐
//! │ Bitstream    │ ← Fractional reads from the shared arithmetic stream
//! └──────────────┘
//!       ↓
//! ┌──────────────┐
//! │ SymbolCoder  │ ← Adaptive per-context symbol decoding (327 instances)
//! └──────────────┘
//!       ↓
//! ┌──────────────┐
//! │ Oodle1Decoder│ ← Literals and window copies from length/offset tokens
//! └──────────────┘
//!       ↓
//! Decompressed Data
//! ```
//!
//! A compressed Granny2 section carries up to three substreams. Their
//! 12-byte headers sit back to back at the start of the section, followed by
//! a single payload; each substream decompresses until the output reaches
//! its stop offset, and the next substream continues from the same bitstream
//! position with a fresh decoder.
//!
//! ## Example
//!
//! ```rust
//! // One substream: a literal 0x11 followed by a length-2 copy at offset 1.
//! let section = [
//!     0x00, 0x21, 0x00, 0x00, // header word 0: window 16, literal alphabet 256
//!     0x00, 0x01, 0x00, 0x00, // header word 1: 256 unique literals
//!     0x00, 0x00, 0x00, 0x02, // header word 2: two repeat codes in group 0
//!     0x00, 0x42, 0xFB, 0xEE, // payload
//!     0x00, 0x00, 0x00, 0x00,
//! ];
//! let out = oodle1::decompress(&section, &[3]).unwrap();
//! assert_eq!(out, [0x11, 0x11, 0x11]);
//! ```
//!
//! ## Scope
//!
//! The crate decodes section payloads. Parsing the surrounding Granny2
//! container (signatures, section tables, relocations) is the caller's job;
//! the `granny_sections` example shows a minimal container walk. There is no
//! end-of-stream marker in the format — callers must know the decompressed
//! size — and no encoder.

pub mod bitstream;
pub mod coder;
pub mod error;
pub mod header;
pub mod lz;

#[cfg(test)]
mod tests;

pub use bitstream::Bitstream;
pub use coder::SymbolCoder;
pub use error::{Oodle1Error, Result};
pub use header::{StreamHeader, HEADER_SIZE};
pub use lz::{decompress, Oodle1Decoder};
