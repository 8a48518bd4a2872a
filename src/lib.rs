//! # pzyp
//!
//! A lossless LZSS file compressor/decompressor with configurable window
//! and length-field bit widths.
//!
//! Repeated byte sequences are replaced by back-references into a sliding
//! window of recent history; everything else is stored as literal bytes. A
//! one-line text header records the bit widths, a timestamp, and the
//! original file name, so the decoder needs no out-of-band configuration.
//!
//! ## Example
//!
//! ```rust
//! use pzyp::{compress, decompress, PzypContext};
//!
//! let ctx = PzypContext::from_level(2).unwrap();
//! let data = b"to be or not to be, that is the question";
//! let packed = compress(data, "quote.txt", &ctx).unwrap();
//! let (header, restored) = decompress(&packed).unwrap();
//! assert_eq!(restored, data);
//! assert_eq!(header.file_name, "quote.txt");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod bits;
pub mod context;
pub mod decode;
pub mod encode;
pub mod error;
pub mod header;
pub mod stream;
pub mod window;

pub use context::{PzypContext, DEFAULT_LEVEL, LEVELS};
pub use decode::{decode, Decoder};
pub use encode::{encode, Encoder};
pub use error::{Error, Result};
pub use header::Header;
pub use stream::{LzssReader, LzssWriter, Token};
pub use window::SlidingWindow;

/// Compress `input` into the full file layout: header line followed by the
/// packed token stream. `file_name` is recorded in the header for the
/// decompressor to report or restore.
pub fn compress(input: &[u8], file_name: &str, ctx: &PzypContext) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    Header::new(ctx, file_name)?.write_to(&mut out)?;
    encode::encode(input, out, ctx)
}

/// Decompress a full file produced by [`compress`]: parse the header,
/// rebuild the context it records, and decode the token stream.
pub fn decompress(data: &[u8]) -> Result<(Header, Vec<u8>)> {
    let mut input = data;
    let header = Header::read_from(&mut input)?;
    let ctx = header.context()?;
    let output = decode::decode(input, &ctx)?;
    Ok((header, output))
}
