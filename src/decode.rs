//! Decompression engine.
//!
//! Pulls tokens until the reader reports a clean end of stream. Reference
//! copies run strictly byte by byte so that self-overlapping references
//! (distance < length) replay bytes as they are produced.

use std::io::Read;

use crate::context::PzypContext;
use crate::error::{Error, Result};
use crate::stream::{LzssReader, Token};
use crate::window::SlidingWindow;

/// Reconstructs original bytes from a token stream.
#[derive(Debug)]
pub struct Decoder {
    window: SlidingWindow,
}

impl Decoder {
    /// Create a decoder with a fresh window sized by `ctx`.
    pub fn new(ctx: PzypContext) -> Self {
        Self {
            window: SlidingWindow::new(ctx.window_size()),
        }
    }

    /// Drain `reader` into `out`. The caller owns the reader and validates
    /// it with `finish()` afterwards.
    pub fn decode<R: Read>(&mut self, reader: &mut LzssReader<R>, out: &mut Vec<u8>) -> Result<()> {
        while let Some(token) = reader.read()? {
            match token {
                Token::Literal(byte) => {
                    out.push(byte);
                    self.window.extend(byte);
                }
                Token::Reference { distance, length } => {
                    for _ in 0..length {
                        let byte = self.window.nth_from_end(distance as usize).ok_or_else(|| {
                            Error::CorruptStream(format!(
                                "reference distance {} exceeds {} bytes of history",
                                distance,
                                self.window.len()
                            ))
                        })?;
                        out.push(byte);
                        self.window.extend(byte);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Decompress a whole token stream read from `input`, validating that no
/// unread data remains.
pub fn decode<R: Read>(input: R, ctx: &PzypContext) -> Result<Vec<u8>> {
    let mut reader = LzssReader::new(input, *ctx);
    let mut out = Vec::new();
    Decoder::new(*ctx).decode(&mut reader, &mut out)?;
    reader.finish()?;
    Ok(out)
}
