//! LZSS bit-width configuration.
//!
//! A [`PzypContext`] ties together the field widths that determine the
//! sliding-window capacity and the representable match lengths. Both sides
//! of a transfer must use the same context; the compressed-file header
//! records it so the decoder can rebuild it.

use crate::error::{Error, Result};

/// Width of an unencoded literal, in bits. Always one byte.
pub const UNENCODED_STRING_SIZE: u8 = 8;

/// Compression level table: level 1-4 mapped to (offset_bits, len_bits).
pub const LEVELS: [(u8, u8); 4] = [(10, 4), (12, 4), (14, 5), (15, 5)];

/// Default compression level.
pub const DEFAULT_LEVEL: u8 = 2;

/// Immutable LZSS parameter set.
///
/// `encoded_offset_size` is the bit width of a back-reference distance,
/// `encoded_len_size` the bit width of its length field. Everything else
/// is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PzypContext {
    encoded_offset_size: u8,
    encoded_len_size: u8,
}

impl PzypContext {
    /// Create a context from explicit bit widths.
    ///
    /// Offset widths above 15 are rejected: the naive window scan is only
    /// acceptable for windows up to 32 KB.
    pub fn new(encoded_offset_size: u8, encoded_len_size: u8) -> Result<Self> {
        if !(1..=15).contains(&encoded_offset_size) || !(1..=8).contains(&encoded_len_size) {
            return Err(Error::InvalidContext {
                offset_bits: encoded_offset_size,
                len_bits: encoded_len_size,
            });
        }
        Ok(Self {
            encoded_offset_size,
            encoded_len_size,
        })
    }

    /// Create a context from a compression level (1-4).
    pub fn from_level(level: u8) -> Result<Self> {
        let (offset_bits, len_bits) = *LEVELS
            .get(level.wrapping_sub(1) as usize)
            .ok_or(Error::InvalidLevel(level))?;
        Self::new(offset_bits, len_bits)
    }

    /// Bit width of the back-reference distance field.
    pub fn encoded_offset_size(&self) -> u8 {
        self.encoded_offset_size
    }

    /// Bit width of the back-reference length field.
    pub fn encoded_len_size(&self) -> u8 {
        self.encoded_len_size
    }

    /// Total bits of one back-reference payload, excluding its flag bit.
    pub fn encoded_string_size(&self) -> u8 {
        self.encoded_offset_size + self.encoded_len_size
    }

    /// Sliding-window capacity in bytes; also the largest span a distance
    /// may cover.
    pub fn window_size(&self) -> usize {
        1 << self.encoded_offset_size
    }

    /// Match length (in bytes) at which a reference costs the same as
    /// literals. Only strictly longer matches are worth encoding.
    pub fn break_even_point(&self) -> usize {
        self.encoded_string_size() as usize / 8
    }

    /// Shortest match length ever emitted as a reference.
    pub fn min_string_size(&self) -> usize {
        self.break_even_point() + 1
    }

    /// Longest match length representable in the length field.
    pub fn max_string_size(&self) -> usize {
        (1 << self.encoded_len_size) - 1 + self.min_string_size()
    }
}

impl Default for PzypContext {
    fn default() -> Self {
        // Level 2: 12-bit offsets, 4-bit lengths.
        Self {
            encoded_offset_size: 12,
            encoded_len_size: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_sizes_level2() {
        let ctx = PzypContext::new(12, 4).unwrap();
        assert_eq!(ctx.encoded_string_size(), 16);
        assert_eq!(ctx.window_size(), 4096);
        assert_eq!(ctx.break_even_point(), 2);
        assert_eq!(ctx.min_string_size(), 3);
        assert_eq!(ctx.max_string_size(), 18);
    }

    #[test]
    fn test_derived_sizes_all_levels() {
        // (window, min, max) per level
        let expected = [(1024, 2, 17), (4096, 3, 18), (16384, 3, 34), (32768, 3, 34)];
        for (level, (window, min, max)) in (1u8..=4).zip(expected) {
            let ctx = PzypContext::from_level(level).unwrap();
            assert_eq!(ctx.window_size(), window, "level {}", level);
            assert_eq!(ctx.min_string_size(), min, "level {}", level);
            assert_eq!(ctx.max_string_size(), max, "level {}", level);
        }
    }

    #[test]
    fn test_tiny_context() {
        let ctx = PzypContext::new(4, 3).unwrap();
        assert_eq!(ctx.window_size(), 16);
        assert_eq!(ctx.break_even_point(), 0);
        assert_eq!(ctx.min_string_size(), 1);
        assert_eq!(ctx.max_string_size(), 8);
    }

    #[test]
    fn test_invalid_level() {
        assert!(matches!(
            PzypContext::from_level(0),
            Err(Error::InvalidLevel(0))
        ));
        assert!(matches!(
            PzypContext::from_level(5),
            Err(Error::InvalidLevel(5))
        ));
    }

    #[test]
    fn test_invalid_bit_widths() {
        assert!(PzypContext::new(0, 4).is_err());
        assert!(PzypContext::new(16, 4).is_err());
        assert!(PzypContext::new(12, 0).is_err());
        assert!(PzypContext::new(12, 9).is_err());
    }

    #[test]
    fn test_default_is_level2() {
        assert_eq!(
            PzypContext::default(),
            PzypContext::from_level(DEFAULT_LEVEL).unwrap()
        );
    }
}
