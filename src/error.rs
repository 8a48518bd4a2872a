//! Error types for the pzyp library.

use std::fmt;
use std::io;

/// Result type alias for pzyp operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during compression or decompression.
#[derive(Debug)]
pub enum Error {
    /// Compression level outside the supported 1-4 range.
    InvalidLevel(u8),
    /// Bit-width pair that no valid context can be built from.
    InvalidContext {
        /// Requested distance-field width in bits.
        offset_bits: u8,
        /// Requested length-field width in bits.
        len_bits: u8,
    },
    /// The leading header record could not be parsed.
    InvalidHeader(String),
    /// The token stream ended in the middle of a token.
    TruncatedStream,
    /// Non-zero bits were left unread when the reader was closed.
    UnreadData,
    /// The token stream decoded to something impossible.
    CorruptStream(String),
    /// Underlying I/O failure, propagated unchanged.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidLevel(level) => {
                write!(f, "Invalid compression level {}: must be 1-4", level)
            }
            Error::InvalidContext {
                offset_bits,
                len_bits,
            } => {
                write!(
                    f,
                    "Invalid context: offset_bits={}, len_bits={} (need 1-15 and 1-8)",
                    offset_bits, len_bits
                )
            }
            Error::InvalidHeader(msg) => write!(f, "Invalid header: {}", msg),
            Error::TruncatedStream => write!(f, "Compressed stream ended mid-token"),
            Error::UnreadData => write!(f, "Unread compressed data left in buffer"),
            Error::CorruptStream(msg) => write!(f, "Corrupt stream: {}", msg),
            Error::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}
