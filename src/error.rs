//! Error types for Oodle1 decompression.
//!
//! All errors are fatal to the current decompression: the stream state is
//! unrecoverable once the arithmetic decoder diverges, so callers should
//! abandon the section. Partial output produced before the failure should
//! not be trusted.

use std::fmt;

/// Decompression errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Oodle1Error {
    /// The input ran out before the requested output length was produced.
    ///
    /// Well-formed payloads are zero-padded to a multiple of four bytes;
    /// the bitstream reader tolerates a missing pad but fails once it
    /// would have to invent data beyond it.
    TruncatedStream,

    /// A 12-byte substream header carries an out-of-bounds field.
    ///
    /// The message names the offending field.
    InvalidHeader(&'static str),

    /// A decoded copy offset points outside the effective window.
    ///
    /// `window` is `min(configured_window, bytes_output)` at the moment the
    /// offset was decoded; no valid stream produces `offset > window`.
    InvalidOffset {
        /// The decoded back-reference distance.
        offset: u32,
        /// The maximum legal distance at this point of the output.
        window: u32,
    },

    /// A symbol coder was asked to learn more symbols than its header
    /// declared; the stream and header disagree.
    AlphabetExhausted,
}

impl fmt::Display for Oodle1Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TruncatedStream => write!(f, "Compressed stream is truncated"),
            Self::InvalidHeader(field) => write!(f, "Invalid stream header: {}", field),
            Self::InvalidOffset { offset, window } => {
                write!(
                    f,
                    "Invalid copy offset: {} exceeds effective window {}",
                    offset, window
                )
            }
            Self::AlphabetExhausted => {
                write!(f, "Symbol coder alphabet exhausted (stream/header mismatch)")
            }
        }
    }
}

impl std::error::Error for Oodle1Error {}

pub type Result<T> = std::result::Result<T, Oodle1Error>;
