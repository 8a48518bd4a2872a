//! Token layer of the compressed stream.
//!
//! An [`LzssWriter`] turns tokens into the bit format the context
//! prescribes: a `0` flag bit followed by the 8 literal bits, or a `1` flag
//! bit followed by `encoded_offset_size` distance bits and
//! `encoded_len_size` bits holding `length - min_string_size`. The
//! [`LzssReader`] reverses it, one token per call.

use std::io::{Read, Write};

use crate::bits::{BitReader, BitWriter};
use crate::context::PzypContext;
use crate::error::Result;

/// One unit of compressed output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A raw byte that was not worth referencing.
    Literal(u8),
    /// A back-reference into the sliding window.
    Reference {
        /// Bytes back from the current position to the match start
        /// (1 ..= window_size - 1).
        distance: u16,
        /// Match length in bytes (min_string_size ..= max_string_size).
        length: u16,
    },
}

/// Writes tokens to a byte sink as a packed bit stream.
#[derive(Debug)]
pub struct LzssWriter<W: Write> {
    bits: BitWriter<W>,
    ctx: PzypContext,
}

impl<W: Write> LzssWriter<W> {
    /// Create a token writer over `out` using the given context.
    pub fn new(out: W, ctx: PzypContext) -> Self {
        Self {
            bits: BitWriter::new(out),
            ctx,
        }
    }

    /// Write one token.
    pub fn write(&mut self, token: &Token) -> Result<()> {
        match *token {
            Token::Literal(byte) => self.write_literal(byte),
            Token::Reference { distance, length } => {
                self.write_reference(distance as usize, length as usize)
            }
        }
    }

    /// Write a literal byte: flag bit 0 plus the byte itself.
    pub fn write_literal(&mut self, byte: u8) -> Result<()> {
        self.bits.write_bit(false)?;
        self.bits.write_bits(byte as u32, 8)
    }

    /// Write a back-reference: flag bit 1, the distance, then the length
    /// biased down by `min_string_size`.
    ///
    /// Out-of-range arguments are a bug in the match finder, never a
    /// consequence of user input.
    pub fn write_reference(&mut self, distance: usize, length: usize) -> Result<()> {
        let ctx = &self.ctx;
        debug_assert!(distance >= 1 && distance < ctx.window_size());
        debug_assert!((ctx.min_string_size()..=ctx.max_string_size()).contains(&length));

        self.bits.write_bit(true)?;
        self.bits
            .write_bits(distance as u32, ctx.encoded_offset_size())?;
        self.bits.write_bits(
            (length - ctx.min_string_size()) as u32,
            ctx.encoded_len_size(),
        )
    }

    /// Pad the trailing byte with zeros, flush, and return the sink.
    pub fn finish(self) -> Result<W> {
        self.bits.finish()
    }
}

/// Reads tokens back out of a packed bit stream.
#[derive(Debug)]
pub struct LzssReader<R: Read> {
    bits: BitReader<R>,
    ctx: PzypContext,
}

impl<R: Read> LzssReader<R> {
    /// Create a token reader over `input` using the given context.
    pub fn new(input: R, ctx: PzypContext) -> Self {
        Self {
            bits: BitReader::new(input),
            ctx,
        }
    }

    /// Read the next token, or `None` at clean end of stream.
    pub fn read(&mut self) -> Result<Option<Token>> {
        if self.bits.at_end()? {
            return Ok(None);
        }
        let encoded = self.bits.read_bits(1)? == 1;
        let token = if encoded {
            let distance = self.bits.read_bits(self.ctx.encoded_offset_size())? as u16;
            let mapped_len = self.bits.read_bits(self.ctx.encoded_len_size())? as usize;
            Token::Reference {
                distance,
                length: (mapped_len + self.ctx.min_string_size()) as u16,
            }
        } else {
            Token::Literal(self.bits.read_bits(8)? as u8)
        };
        Ok(Some(token))
    }

    /// Validate that only zero padding remains and return the source.
    pub fn finish(self) -> Result<R> {
        self.bits.finish()
    }
}
