//! Bit-level I/O for the LZSS token stream.
//!
//! Bits are packed MSB first within each byte. The writer accumulates whole
//! bytes and hands them to the sink in chunks rather than per token; the
//! reader refills a small accumulator from the source on demand and knows
//! how to tell trailing zero padding apart from real data.

use std::io::{self, Read, Write};

use crate::error::{Error, Result};

/// Buffered whole bytes before the writer pushes to its sink (32 768 bits).
const FLUSH_THRESHOLD: usize = 4096;

/// MSB-first bit writer over an arbitrary byte sink.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    out: W,
    buffer: Vec<u8>,
    current_byte: u8,
    bit_position: u8, // counts from 8 down to 0
}

impl<W: Write> BitWriter<W> {
    /// Create a bit writer wrapping `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            buffer: Vec::with_capacity(FLUSH_THRESHOLD),
            current_byte: 0,
            bit_position: 8,
        }
    }

    /// Write the low `num_bits` of `value`, most significant bit first.
    pub fn write_bits(&mut self, value: u32, num_bits: u8) -> Result<()> {
        debug_assert!(num_bits <= 24);

        let mut remaining = num_bits;
        while remaining > 0 {
            let space = self.bit_position;
            let to_write = remaining.min(space);

            // Take the top `to_write` of the still-unwritten bits and slot
            // them into the current byte.
            let shift = remaining - to_write;
            let mask = (1u32 << to_write) - 1;
            let bits = ((value >> shift) & mask) as u8;

            self.bit_position -= to_write;
            self.current_byte |= bits << self.bit_position;
            remaining -= to_write;

            if self.bit_position == 0 {
                self.push_byte()?;
            }
        }
        Ok(())
    }

    /// Write a single bit.
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.write_bits(bit as u32, 1)
    }

    fn push_byte(&mut self) -> Result<()> {
        self.buffer.push(self.current_byte);
        self.current_byte = 0;
        self.bit_position = 8;
        if self.buffer.len() >= FLUSH_THRESHOLD {
            self.out.write_all(&self.buffer)?;
            self.buffer.clear();
        }
        Ok(())
    }

    /// Zero-pad any partial trailing byte, flush everything to the sink,
    /// and hand the sink back.
    pub fn finish(mut self) -> Result<W> {
        if self.bit_position < 8 {
            // Low bits of current_byte are still zero, which is the padding.
            self.buffer.push(self.current_byte);
        }
        self.out.write_all(&self.buffer)?;
        self.out.flush()?;
        Ok(self.out)
    }
}

/// MSB-first bit reader over an arbitrary byte source.
///
/// Keeps a one-byte peek slot so end-of-source can be checked without
/// consuming token data.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    input: R,
    peeked: Option<u8>,
    source_eof: bool,
    bit_buf: u32,
    bits_in_buf: u8,
}

impl<R: Read> BitReader<R> {
    /// Create a bit reader wrapping `input`.
    pub fn new(input: R) -> Self {
        Self {
            input,
            peeked: None,
            source_eof: false,
            bit_buf: 0,
            bits_in_buf: 0,
        }
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        if let Some(byte) = self.peeked.take() {
            return Ok(Some(byte));
        }
        if self.source_eof {
            return Ok(None);
        }
        let mut byte = [0u8; 1];
        loop {
            match self.input.read(&mut byte) {
                Ok(0) => {
                    self.source_eof = true;
                    return Ok(None);
                }
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Ensure at least `n` bits are buffered.
    fn ensure(&mut self, n: u8) -> Result<()> {
        while self.bits_in_buf < n {
            match self.next_byte()? {
                Some(byte) => {
                    self.bit_buf = (self.bit_buf << 8) | byte as u32;
                    self.bits_in_buf += 8;
                }
                None => return Err(Error::TruncatedStream),
            }
        }
        Ok(())
    }

    /// Read `n` bits, most significant first. Errors with
    /// [`Error::TruncatedStream`] if the source runs dry mid-read.
    pub fn read_bits(&mut self, n: u8) -> Result<u32> {
        debug_assert!(n >= 1 && n <= 24);
        self.ensure(n)?;
        self.bits_in_buf -= n;
        let value = (self.bit_buf >> self.bits_in_buf) & ((1u32 << n) - 1);
        self.bit_buf &= (1u32 << self.bits_in_buf) - 1;
        Ok(value)
    }

    fn buffered(&self) -> u32 {
        self.bit_buf & ((1u32 << self.bits_in_buf) - 1)
    }

    /// True when the stream is cleanly exhausted: the source has no more
    /// bytes and whatever is still buffered is fewer than 8 bits, all zero,
    /// i.e. the writer's padding.
    pub fn at_end(&mut self) -> Result<bool> {
        if self.bits_in_buf >= 8 || self.buffered() != 0 {
            return Ok(false);
        }
        if self.peeked.is_some() {
            return Ok(false);
        }
        match self.next_byte()? {
            Some(byte) => {
                self.peeked = Some(byte);
                Ok(false)
            }
            None => Ok(true),
        }
    }

    /// Validate that nothing but zero padding is left and hand the source
    /// back. A non-zero remainder means the stream was truncated or the
    /// caller stopped early.
    pub fn finish(self) -> Result<R> {
        if self.buffered() != 0 {
            return Err(Error::UnreadData);
        }
        Ok(self.input)
    }
}
