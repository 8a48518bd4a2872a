//! Compression engine.
//!
//! Greedy LZSS with one token of lookahead: bytes accumulate in `pending`
//! while the window still contains the accumulated sequence, and the first
//! failed probe (or end of input, or hitting the maximum representable
//! length) finalizes a token. This is deliberately not optimal parsing.

use std::io::Write;

use crate::context::PzypContext;
use crate::error::Result;
use crate::stream::LzssWriter;
use crate::window::SlidingWindow;

/// Drives a sliding window over the input and emits tokens into an
/// [`LzssWriter`].
#[derive(Debug)]
pub struct Encoder {
    ctx: PzypContext,
    window: SlidingWindow,
}

impl Encoder {
    /// Create an encoder with a fresh window sized by `ctx`.
    pub fn new(ctx: PzypContext) -> Self {
        let window = SlidingWindow::new(ctx.window_size());
        Self { ctx, window }
    }

    /// Compress `input` into `writer` as a token stream.
    ///
    /// The caller owns the writer and is responsible for `finish()`ing it;
    /// that keeps the codec injectable and lets several inputs share one
    /// stream if needed.
    pub fn encode<W: Write>(&mut self, input: &[u8], writer: &mut LzssWriter<W>) -> Result<()> {
        let max_string = self.ctx.max_string_size();
        let mut pending: Vec<u8> = Vec::with_capacity(max_string);

        for (i, &byte) in input.iter().enumerate() {
            pending.push(byte);
            let found = self.window.find(&pending);
            let at_last = i + 1 == input.len();
            let at_cap = pending.len() >= max_string;

            match found {
                // Still matching and still extendable: keep accumulating.
                Some(_) if !at_last && !at_cap => {}
                // End of input or maximum length: the whole of `pending`
                // is a verified match.
                Some(pos) => {
                    self.emit(&pending, pending.len(), Some(pos), writer)?;
                    pending.clear();
                }
                // The probe byte broke the match. Everything before it was
                // verified on the previous iteration; re-locate it and emit,
                // then let the probe byte seed the next accumulation.
                None => {
                    if pending.len() == 1 {
                        writer.write_literal(pending[0])?;
                        pending.clear();
                    } else {
                        let (verified, probe) = pending.split_at(pending.len() - 1);
                        let pos = self.window.find(verified);
                        self.emit(verified, pending.len(), pos, writer)?;
                        let carry = probe[0];
                        pending.clear();
                        if at_last {
                            writer.write_literal(carry)?;
                        } else {
                            pending.push(carry);
                        }
                    }
                }
            }

            self.window.extend(byte);
        }
        Ok(())
    }

    /// Emit `seq` as a reference when that is strictly cheaper than
    /// literals, as literals otherwise. `consumed` is the number of input
    /// bytes held in `pending` when the match was located, which together
    /// with the live window length fixes the distance; `pos` is the window
    /// index `find` reported.
    fn emit<W: Write>(
        &self,
        seq: &[u8],
        consumed: usize,
        pos: Option<usize>,
        writer: &mut LzssWriter<W>,
    ) -> Result<()> {
        if let Some(pos) = pos {
            if seq.len() >= self.ctx.min_string_size() {
                let distance = self.window.len() + 1 - consumed - pos;
                // Degenerate contexts can produce a self-match (distance 0)
                // or a full-window distance that the offset field cannot
                // hold; both fall back to literals.
                if distance >= 1 && distance < self.ctx.window_size() {
                    writer.write_reference(distance, seq.len())?;
                    return Ok(());
                }
            }
        }
        for &byte in seq {
            writer.write_literal(byte)?;
        }
        Ok(())
    }
}

/// Compress `input` with a default writer over `out`; returns the sink
/// after flushing.
pub fn encode<W: Write>(input: &[u8], out: W, ctx: &PzypContext) -> Result<W> {
    let mut writer = LzssWriter::new(out, *ctx);
    Encoder::new(*ctx).encode(input, &mut writer)?;
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::{LzssReader, Token};

    fn tokens_for(input: &[u8], ctx: &PzypContext) -> Vec<Token> {
        let out = encode(input, Vec::new(), ctx).unwrap();
        let mut reader = LzssReader::new(out.as_slice(), *ctx);
        let mut tokens = Vec::new();
        while let Some(token) = reader.read().unwrap() {
            tokens.push(token);
        }
        reader.finish().unwrap();
        tokens
    }

    #[test]
    fn test_empty_input_emits_nothing() {
        let ctx = PzypContext::default();
        let out = encode(&[], Vec::new(), &ctx).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_unique_bytes_are_literals() {
        let ctx = PzypContext::default();
        let tokens = tokens_for(b"abcdefgh", &ctx);
        assert_eq!(
            tokens,
            b"abcdefgh".iter().map(|&b| Token::Literal(b)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_repeat_becomes_reference() {
        let ctx = PzypContext::default();
        let tokens = tokens_for(b"abcabc", &ctx);
        assert_eq!(
            tokens,
            vec![
                Token::Literal(b'a'),
                Token::Literal(b'b'),
                Token::Literal(b'c'),
                Token::Reference {
                    distance: 3,
                    length: 3
                },
            ]
        );
    }

    #[test]
    fn test_short_repeat_stays_literal() {
        // "ab" repeats but 2 < min_string_size (3) under the default context.
        let ctx = PzypContext::default();
        let tokens = tokens_for(b"abab", &ctx);
        assert_eq!(tokens.len(), 4);
        assert!(tokens.iter().all(|t| matches!(t, Token::Literal(_))));
    }

    #[test]
    fn test_mismatch_tail_carries_over() {
        let ctx = PzypContext::default();
        let tokens = tokens_for(b"abcdabcx", &ctx);
        assert_eq!(
            tokens,
            vec![
                Token::Literal(b'a'),
                Token::Literal(b'b'),
                Token::Literal(b'c'),
                Token::Literal(b'd'),
                Token::Reference {
                    distance: 4,
                    length: 3
                },
                Token::Literal(b'x'),
            ]
        );
    }

    #[test]
    fn test_match_length_capped() {
        let ctx = PzypContext::default();
        let run = vec![b'a'; 100];
        let tokens = tokens_for(&run, &ctx);
        let max = ctx.max_string_size() as u16;
        let mut produced = 0usize;
        for token in &tokens {
            match *token {
                Token::Literal(b) => {
                    assert_eq!(b, b'a');
                    produced += 1;
                }
                Token::Reference { distance, length } => {
                    assert!(length <= max, "length {} over cap", length);
                    assert!(distance as usize <= produced);
                    produced += length as usize;
                }
            }
        }
        assert_eq!(produced, 100);
    }

    #[test]
    fn test_window_bound_invariant() {
        let ctx = PzypContext::from_level(1).unwrap();
        // Cycle long enough to roll the 1 KB window several times over.
        let data: Vec<u8> = (0..5000u32).map(|i| (i % 251) as u8).collect();
        for token in tokens_for(&data, &ctx) {
            if let Token::Reference { distance, length } = token {
                assert!((distance as usize) < ctx.window_size());
                assert!((length as usize) >= ctx.min_string_size());
                assert!((length as usize) <= ctx.max_string_size());
            }
        }
    }
}
