//! Bounded history buffer that back-references point into.

use std::collections::VecDeque;

/// FIFO byte buffer holding the most recent `capacity` bytes seen.
///
/// The match search is a naive single-pass scan, not a hash chain; windows
/// are capped at 32 KB by the context's offset width, which keeps the scan
/// affordable.
#[derive(Debug)]
pub struct SlidingWindow {
    buf: VecDeque<u8>,
    capacity: usize,
}

impl SlidingWindow {
    /// Create an empty window with the given capacity in bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append one byte, evicting the oldest byte when at capacity.
    pub fn extend(&mut self, byte: u8) {
        if self.buf.len() == self.capacity {
            self.buf.pop_front();
        }
        self.buf.push_back(byte);
    }

    /// Number of bytes currently held.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True when no bytes have been appended yet.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Byte `distance` positions back from the newest entry (1 = newest).
    /// `None` when `distance` is zero or reaches past the oldest byte.
    pub fn nth_from_end(&self, distance: usize) -> Option<u8> {
        if distance == 0 || distance > self.buf.len() {
            return None;
        }
        Some(self.buf[self.buf.len() - distance])
    }

    /// Locate `needle` with a single left-to-right pass: the cursor advances
    /// on each matching byte and resets to zero on a mismatch, without
    /// backtracking. Returns elements consumed minus the needle length, i.e.
    /// the start index of the occurrence found, or `None` if the cursor
    /// never reaches the full needle length.
    ///
    /// The no-backtracking reset means some genuine occurrences are missed
    /// (e.g. `ab` inside `aab`); the encoder only ever loses compression
    /// opportunities from that, never correctness.
    pub fn find(&self, needle: &[u8]) -> Option<usize> {
        if needle.is_empty() {
            return None;
        }
        let mut cursor = 0;
        for (consumed, &byte) in self.buf.iter().enumerate() {
            if byte == needle[cursor] {
                cursor += 1;
                if cursor == needle.len() {
                    return Some(consumed + 1 - needle.len());
                }
            } else {
                cursor = 0;
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_from(capacity: usize, bytes: &[u8]) -> SlidingWindow {
        let mut w = SlidingWindow::new(capacity);
        for &b in bytes {
            w.extend(b);
        }
        w
    }

    #[test]
    fn test_extend_evicts_oldest() {
        let mut w = SlidingWindow::new(3);
        for &b in b"abcd" {
            w.extend(b);
        }
        assert_eq!(w.len(), 3);
        assert_eq!(w.nth_from_end(3), Some(b'b'));
        assert_eq!(w.nth_from_end(1), Some(b'd'));
    }

    #[test]
    fn test_nth_from_end_bounds() {
        let w = window_from(8, b"xyz");
        assert_eq!(w.nth_from_end(0), None);
        assert_eq!(w.nth_from_end(4), None);
        assert_eq!(w.nth_from_end(3), Some(b'x'));
    }

    #[test]
    fn test_find_basic() {
        let w = window_from(16, b"abcdef");
        assert_eq!(w.find(b"abc"), Some(0));
        assert_eq!(w.find(b"cde"), Some(2));
        assert_eq!(w.find(b"f"), Some(5));
        assert_eq!(w.find(b"xyz"), None);
    }

    #[test]
    fn test_find_completion_at_last_element() {
        let w = window_from(16, b"abcdef");
        assert_eq!(w.find(b"def"), Some(3));
    }

    #[test]
    fn test_find_single_pass_no_backtrack() {
        // The cursor consumed the second 'a' while matching "ab", resets on
        // mismatch, and never revisits it, so the occurrence is missed.
        let w = window_from(16, b"aab");
        assert_eq!(w.find(b"ab"), None);
        // With a fresh restart byte available the scan does succeed.
        let w = window_from(16, b"axab");
        assert_eq!(w.find(b"ab"), Some(2));
    }

    #[test]
    fn test_find_longer_than_window() {
        let w = window_from(16, b"ab");
        assert_eq!(w.find(b"abc"), None);
        assert_eq!(w.find(b""), None);
    }

    #[test]
    fn test_find_after_eviction() {
        let mut w = window_from(4, b"abcd");
        w.extend(b'e'); // window now "bcde"
        assert_eq!(w.find(b"a"), None);
        assert_eq!(w.find(b"bcd"), Some(0));
        assert_eq!(w.find(b"de"), Some(2));
    }

    #[test]
    fn test_find_repeated_run() {
        let w = window_from(8, b"aaaa");
        assert_eq!(w.find(b"aa"), Some(0));
        assert_eq!(w.find(b"aaaa"), Some(0));
    }
}
