//! Double-hash greedy engine (§4.5 of SPEC_FULL.md).
//!
//! Same outer shape as [`super::hs::Hs`], generalised to prefer the
//! long-prefix table's rarer, higher-confidence hits over the short-prefix
//! table's wider reach — grounded on [`crate::hash::DoubleHashTable`]'s own
//! `h2`-first, `h1`-fallback contract.

use crate::buffer::Buf;
use crate::config::DhsConfig;
use crate::error::{Error, Result};
use crate::hash::DoubleHashTable;
use crate::mem::count_matching;
use crate::seq::{Block, Flags, Seq};

use super::Engine;

pub struct Dhs {
    config: DhsConfig,
    table: DoubleHashTable,
}

impl Dhs {
    pub fn new(config: DhsConfig) -> Result<Self> {
        config.verify()?;
        let table = DoubleHashTable::new(
            config.input_len1,
            config.hash_bits1,
            config.input_len2,
            config.hash_bits2,
        );
        Ok(Dhs { config, table })
    }
}

impl Engine for Dhs {
    fn parse(&mut self, buf: &mut Buf, blk: Option<&mut Block>, flags: Flags) -> Result<usize> {
        let n = buf.pending_len().min(self.config.common.block_size as usize);
        if n == 0 {
            return Err(Error::EmptyBuffer);
        }
        let w = buf.window_head();
        let end = w + n;
        let input_len1 = self.config.input_len1;
        let input_len2 = self.config.input_len2;
        let min_match_len = self.config.min_match_len as usize;
        let window_size = self.config.common.window_size as usize;
        let warm_from = w.saturating_sub(input_len1 - 1);

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
        // Pass A can use the long table; pass B (too close to `end` for a
        // full long-prefix load) falls back to the short table only.
        let pass_a_end = end.saturating_sub(input_len2 - 1);
        let pass_b_end = end.saturating_sub(input_len1 - 1);

        while i < pass_b_end {
            let candidate = if i < pass_a_end {
                self.table.replace(data, i)
            } else {
                self.table.replace_short_only(data, i)
            };
            if let Some(j) = candidate {
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
                            if p < pass_a_end {
                                self.table.insert(data, p);
                            } else {
                                self.table.insert_h1_only(data, p);
                            }
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
        self.table = DoubleHashTable::new(
            self.config.input_len1,
            self.config.hash_bits1,
            self.config.input_len2,
            self.config.hash_bits2,
        );
    }

    fn window_size(&self) -> u32 {
        self.config.common.window_size
    }

    fn block_size(&self) -> u32 {
        self.config.common.block_size
    }
}
