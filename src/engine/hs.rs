//! Single-hash greedy engine (§4.4 of SPEC_FULL.md).
//!
//! Grounded on the `hc::compress_hc` outer loop structure found in LZ4-HC
//! (warm-the-table / scan-and-emit / skip-hash-the-match-interior), with the
//! hash-chain walk collapsed to the single most-recent-wins lookup of
//! [`crate::hash::HashTable`].

use crate::buffer::Buf;
use crate::config::HsConfig;
use crate::error::{Error, Result};
use crate::hash::HashTable;
use crate::mem::count_matching;
use crate::seq::{Block, Flags, Seq};

use super::Engine;

pub struct Hs {
    config: HsConfig,
    table: HashTable,
}

impl Hs {
    pub fn new(config: HsConfig) -> Result<Self> {
        config.verify()?;
        let table = HashTable::new(config.input_len, config.hash_bits);
        Ok(Hs { config, table })
    }
}

impl Engine for Hs {
    fn parse(&mut self, buf: &mut Buf, blk: Option<&mut Block>, flags: Flags) -> Result<usize> {
        let n = buf.pending_len().min(self.config.common.block_size as usize);
        if n == 0 {
            return Err(Error::EmptyBuffer);
        }
        let w = buf.window_head();
        let end = w + n;
        let input_len = self.config.input_len;
        let min_match_len = self.config.min_match_len as usize;
        let window_size = self.config.common.window_size as usize;
        let warm_from = w.saturating_sub(input_len - 1);

        let data = buf.data();

        let blk = match blk {
            None => {
                let mut i = warm_from;
                while i < end {
                    self.table.insert(data, i);
                    i += 1;
                }
                drop(data);
                buf.advance_window(n);
                return Ok(n);
            }
            Some(blk) => blk,
        };
        blk.clear();

        let mut i = warm_from;
        while i < w {
            self.table.insert(data, i);
            i += 1;
        }

        let mut i = w;
        let mut lit_index = w;
        let scan_end = end.saturating_sub(input_len - 1);
        while i < scan_end {
            if let Some(j) = self.table.replace(data, i) {
                let j = j as usize;
                let offset = i - j;
                if offset > 0 && offset <= window_size {
                    let limit = end - i;
                    let k = count_matching(data, j, data, i, limit);
                    if k >= min_match_len {
                        blk.sequences.push(Seq::new((i - lit_index) as u32, k as u32, offset as u32));
                        blk.literals.extend_from_slice(&data[lit_index..i]);
                        let mut p = i + 1;
                        while p < i + k && p < end {
                            self.table.insert(data, p);
                            p += 1;
                        }
                        lit_index = i + k;
                        i = lit_index;
                        continue;
                    }
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
            self.table.shift_offsets(delta as u32);
        }
    }

    fn reset(&mut self, buf: &mut Buf, data: Option<&[u8]>) {
        buf.reset(data);
        self.table = HashTable::new(self.config.input_len, self.config.hash_bits);
    }

    fn window_size(&self) -> u32 {
        self.config.common.window_size
    }

    fn block_size(&self) -> u32 {
        self.config.common.block_size
    }
}
