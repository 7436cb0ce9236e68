//! Backward-extended double-hash engine (§4.6 of SPEC_FULL.md).
//!
//! Same scan as [`super::dhs::Dhs`], plus a backward-extension step before
//! emitting each sequence: literals just scanned may equal the bytes
//! immediately preceding the candidate match source, so pulling them into
//! the match shortens the encoding. Grounded on
//! [`crate::mem::backward_match_len`] — explicitly the longest-common-suffix
//! routine, not a general LCS, per the Open Question resolution recorded in
//! DESIGN.md.

use crate::buffer::Buf;
use crate::config::DhsConfig;
use crate::error::{Error, Result};
use crate::hash::DoubleHashTable;
use crate::mem::{backward_match_len, count_matching};
use crate::seq::{Block, Flags, Seq};

use super::Engine;

pub struct Bdhs {
    config: DhsConfig,
    table: DoubleHashTable,
}

impl Bdhs {
    pub fn new(config: DhsConfig) -> Result<Self> {
        config.verify()?;
        let table = DoubleHashTable::new(
            config.input_len1,
            config.hash_bits1,
            config.input_len2,
            config.hash_bits2,
        );
        Ok(Bdhs { config, table })
    }
}

impl Engine for Bdhs {
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
        let pass_a_end = end.saturating_sub(input_len2 - 1);
        let pass_b_end = end.saturating_sub(input_len1 - 1);

        while i < pass_b_end {
            let candidate = if i < pass_a_end {
                self.table.replace(data, i)
            } else {
                self.table.replace_short_only(data, i)
            };
            if let Some(j) = candidate {
                let mut j = j as usize;
                let mut offset = i - j;
                if offset > 0 && offset <= window_size {
                    let limit = end - i;
                    let mut k = count_matching(data, j, data, i, limit);
                    if k >= min_match_len {
                        // Backward extension: pull matching literal bytes
                        // just before `i` into the match if they equal the
                        // bytes immediately preceding the match source.
                        let back_limit = (i - lit_index).min(j);
                        let back = backward_match_len(data, i, data, j, back_limit);
                        let mut match_start = i;
                        if back > 0 {
                            match_start -= back;
                            j -= back;
                            k += back;
                            offset = match_start - j;
                        }
                        blk.sequences.push(Seq::new(
                            (match_start - lit_index) as u32,
                            k as u32,
                            offset as u32,
                        ));
                        blk.literals.extend_from_slice(&data[lit_index..match_start]);
                        let mut p = i + 1;
                        while p < i + (k - back) && p < end {
                            if p < pass_a_end {
                                self.table.insert(data, p);
                            } else {
                                self.table.insert_h1_only(data, p);
                            }
                            p += 1;
                        }
                        lit_index = i + (k - back);
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
