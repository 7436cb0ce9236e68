//! Greedy suffix-array engine (§4.8 of SPEC_FULL.md).
//!
//! Where the hash engines chase one or two most-recent-wins candidates,
//! GSAP asks the suffix array for the two lexicographically nearest
//! history suffixes and greedily takes whichever is longer. Grounded on
//! [`crate::bitset::SortedBitset`]'s `member_before`/`member_after`
//! contract (built for exactly this query) and [`crate::suffix`] for the
//! array itself.

use crate::bitset::SortedBitset;
use crate::buffer::Buf;
use crate::config::GsapConfig;
use crate::error::{Error, Result};
use crate::mem::count_matching;
use crate::seq::{Block, Flags, Seq};
use crate::suffix;

use super::Engine;

pub struct Gsap {
    config: GsapConfig,
    sa: Vec<u32>,
    isa: Vec<u32>,
    bitset: SortedBitset,
    /// Length of the `Data` prefix the current `sa`/`isa` were built over.
    covered_len: usize,
}

impl Gsap {
    pub fn new(config: GsapConfig) -> Result<Self> {
        config.verify()?;
        Ok(Gsap { config, sa: Vec::new(), isa: Vec::new(), bitset: SortedBitset::new(0), covered_len: 0 })
    }

    fn invalidate(&mut self) {
        self.sa.clear();
        self.isa.clear();
        self.bitset = SortedBitset::new(0);
        self.covered_len = 0;
    }

    /// Rebuild `sa`/`isa`/`bitset` over all of `data` if they don't already
    /// cover it, then mark every history position `< w` as usable.
    fn ensure_built(&mut self, data: &[u8], w: usize) {
        if self.covered_len == data.len() {
            return;
        }
        self.sa = suffix::build(data);
        self.isa = suffix::inverse(&self.sa);
        self.covered_len = data.len();
        self.bitset = SortedBitset::new(self.sa.len());
        for i in 0..w {
            self.bitset.insert(self.isa[i] as usize);
        }
    }

    /// Best of the two SA-neighbours of rank `r`: longer match wins, ties
    /// prefer the candidate with the larger source position (the more
    /// recent, closer occurrence).
    fn best_neighbour(&self, data: &[u8], i: usize, end: usize, r: usize) -> Option<(usize, usize)> {
        let limit = end - i;
        let candidate = |rank: Option<usize>| -> Option<(usize, usize)> {
            let rank = rank?;
            let pos = self.sa[rank] as usize;
            if pos >= i {
                return None;
            }
            let len = count_matching(data, pos, data, i, limit);
            Some((pos, len))
        };
        let before = candidate(self.bitset.member_before(r));
        let after = candidate(self.bitset.member_after(r));
        match (before, after) {
            (Some(a), Some(b)) => {
                if b.1 > a.1 || (b.1 == a.1 && b.0 > a.0) {
                    Some(b)
                } else {
                    Some(a)
                }
            }
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        }
    }
}

impl Engine for Gsap {
    fn parse(&mut self, buf: &mut Buf, blk: Option<&mut Block>, flags: Flags) -> Result<usize> {
        let n = buf.pending_len().min(self.config.common.block_size as usize);
        if n == 0 {
            return Err(Error::EmptyBuffer);
        }
        let w = buf.window_head();
        let end = w + n;
        let min_match_len = self.config.min_match_len as usize;
        let window_size = self.config.common.window_size as usize;

        let data = buf.data();
        self.ensure_built(data, w);

        let blk = match blk {
            None => {
                for i in w..end {
                    let r = self.isa[i] as usize;
                    self.bitset.insert(r);
                }
                drop(data);
                buf.advance_window(n);
                return Ok(n);
            }
            Some(blk) => blk,
        };
        blk.clear();

        let mut i = w;
        let mut lit_index = w;
        while i < end {
            let r = self.isa[i] as usize;
            self.bitset.insert(r);
            if let Some((pos, len)) = self.best_neighbour(data, i, end, r) {
                let offset = i - pos;
                if len >= min_match_len && offset > 0 && offset <= window_size {
                    blk.sequences.push(Seq::new((i - lit_index) as u32, len as u32, offset as u32));
                    blk.literals.extend_from_slice(&data[lit_index..i]);
                    let mut j = i + 1;
                    while j < i + len && j < end {
                        let rj = self.isa[j] as usize;
                        self.bitset.insert(rj);
                        j += 1;
                    }
                    lit_index = i + len;
                    i = lit_index;
                    continue;
                }
            }
            i += 1;
        }

        if flags.contains(Flags::NO_TRAILING_LITERALS) && !blk.sequences.is_empty() {
            drop(data);
            buf.advance_window(lit_index - w);
            Ok(lit_index - w)
        } else {
            blk.literals.extend_from_slice(&data[lit_index..end]);
            drop(data);
            buf.advance_window(n);
            Ok(n)
        }
    }

    fn shrink(&mut self, buf: &mut Buf) {
        let delta = buf.shrink(self.config.common.shrink_size as usize);
        if delta > 0 {
            // Shrinking rebases every text position; the array and bitset
            // are cheap enough to just rebuild on the next `parse`.
            self.invalidate();
        }
    }

    fn reset(&mut self, buf: &mut Buf, data: Option<&[u8]>) {
        buf.reset(data);
        self.invalidate();
    }

    fn window_size(&self) -> u32 {
        self.config.common.window_size
    }

    fn block_size(&self) -> u32 {
        self.config.common.block_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Common;

    fn engine(window_size: u32, block_size: u32) -> Gsap {
        let config = GsapConfig {
            common: Common { window_size, buffer_size: window_size.max(4096), shrink_size: 0, block_size },
            min_match_len: 3,
        };
        Gsap::new(config).unwrap()
    }

    fn decode(blk: &Block) -> Vec<u8> {
        let mut out = Vec::new();
        let mut lit_pos = 0usize;
        for s in &blk.sequences {
            out.extend_from_slice(&blk.literals[lit_pos..lit_pos + s.lit_len as usize]);
            lit_pos += s.lit_len as usize;
            let start = out.len() - s.offset as usize;
            for k in 0..s.match_len as usize {
                let b = out[start + k];
                out.push(b);
            }
        }
        out.extend_from_slice(&blk.literals[lit_pos..]);
        out
    }

    #[test]
    fn to_be_or_not_to_be_round_trips_and_compresses() {
        let text = b"To be, or not to be, that is the question";
        let mut e = engine(1024, 1024);
        let mut buf = Buf::new(1024);
        buf.write(text).unwrap();
        let mut blk = Block::new();
        e.parse(&mut buf, Some(&mut blk), Flags::NONE).unwrap();
        assert_eq!(decode(&blk), text.to_vec());
        assert!(!blk.sequences.is_empty());
        assert!(blk.literals.len() < text.len());
    }

    #[test]
    fn empty_buffer_errors() {
        let mut e = engine(1024, 512);
        let mut buf = Buf::new(1024);
        let mut blk = Block::new();
        assert!(matches!(e.parse(&mut buf, Some(&mut blk), Flags::NONE), Err(Error::EmptyBuffer)));
    }

    #[test]
    fn no_repeats_yields_all_literals() {
        let text = b"abcdefghijklmnop";
        let mut e = engine(1024, 1024);
        let mut buf = Buf::new(1024);
        buf.write(text).unwrap();
        let mut blk = Block::new();
        e.parse(&mut buf, Some(&mut blk), Flags::NONE).unwrap();
        assert!(blk.sequences.is_empty());
        assert_eq!(blk.literals, text.to_vec());
    }

    #[test]
    fn offset_beyond_window_size_is_rejected() {
        let mut e = engine(4, 64);
        let mut buf = Buf::new(1024);
        buf.write(b"abcXYZabc").unwrap();
        let mut blk = Block::new();
        e.parse(&mut buf, Some(&mut blk), Flags::NONE).unwrap();
        assert_eq!(decode(&blk), b"abcXYZabc".to_vec());
        for s in &blk.sequences {
            assert!(s.offset == 0 || s.offset <= 4);
        }
    }

    fn decode_into(out: &mut Vec<u8>, blk: &Block) {
        let mut lit_pos = 0usize;
        for s in &blk.sequences {
            out.extend_from_slice(&blk.literals[lit_pos..lit_pos + s.lit_len as usize]);
            lit_pos += s.lit_len as usize;
            let start = out.len() - s.offset as usize;
            for k in 0..s.match_len as usize {
                let b = out[start + k];
                out.push(b);
            }
        }
        out.extend_from_slice(&blk.literals[lit_pos..]);
    }

    #[test]
    fn multi_call_round_trip_rebuilds_across_blocks() {
        let text = b"the quick brown fox jumps over the lazy dog the quick brown fox";
        let mut e = engine(1024, 16);
        let mut buf = Buf::new(1024);
        buf.write(text).unwrap();
        let mut decoded = Vec::new();
        let mut blk = Block::new();
        loop {
            match e.parse(&mut buf, Some(&mut blk), Flags::NONE) {
                Ok(0) => break,
                Ok(_) => {
                    decode_into(&mut decoded, &blk);
                    if buf.pending_len() == 0 {
                        break;
                    }
                }
                Err(Error::EmptyBuffer) => break,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!(decoded, text.to_vec());
    }
}
