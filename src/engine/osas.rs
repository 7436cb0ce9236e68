//! Optimal suffix-array engine (§4.9 of SPEC_FULL.md).
//!
//! Where GSAP commits to the longer of two neighbours as soon as it sees
//! them, OSAS collects every admissible match edge the suffix array offers
//! for the current block and solves a shortest-path DP over the resulting
//! DAG, picking whichever mix of literals and matches the cost function
//! actually minimises. Grounded on [`crate::suffix`] and
//! [`crate::suffix::lcp::segments`] for edge discovery; the DP itself has no
//! direct analogue elsewhere in the corpus and is a direct expression of
//! SPEC_FULL.md's own `d[0]=0` / forward-relaxation description.

use std::collections::HashMap;

use crate::buffer::Buf;
use crate::config::OsasConfig;
use crate::error::{Error, Result};
use crate::seq::{Block, Flags, Seq};
use crate::suffix::{self, lcp};

use super::Engine;

/// The XZ/LZMA-flavoured default cost: literals at 9 bits each; matches at
/// roughly 4/5/10 bits depending on length bucket, plus an offset term (4
/// bits for `offset <= 4`, else `2 + bit_length(offset - 1)`).
pub fn xz_cost(length: u32, offset: u32) -> u32 {
    if offset == 0 {
        return 9 * length;
    }
    let len_bits = match length {
        2 => 4,
        3..=9 => 5,
        _ => 10,
    };
    let off_bits = if offset <= 4 { 4 } else { 2 + (32 - (offset - 1).leading_zeros()) };
    len_bits + off_bits
}

#[derive(Clone, Copy)]
enum EdgeKind {
    Literal,
    Match { len: u32, offset: u32 },
}

pub struct Osas {
    config: OsasConfig,
}

impl Osas {
    pub fn new(config: OsasConfig) -> Result<Self> {
        config.verify()?;
        Ok(Osas { config })
    }

    /// All admissible match edges keyed by absolute text position, pruned to
    /// a Pareto frontier of strictly-decreasing offset as depth increases
    /// (an edge dominated by a shallower-but-no-worse-offset edge is
    /// discarded, since it can never improve on it in the DP).
    fn collect_edges(
        &self,
        data: &[u8],
        win_start: usize,
        w: usize,
        end: usize,
    ) -> HashMap<usize, Vec<(u32, u32)>> {
        let window_size = self.config.common.window_size as usize;
        let slice = &data[win_start..end];
        let mut sa = suffix::build(slice);
        let isa = suffix::inverse(&sa);
        let lcp = lcp::kasai(slice, &sa, &isa);

        let mut raw: HashMap<usize, Vec<(u32, u32)>> = HashMap::new();
        lcp::segments(
            &mut sa,
            &lcp,
            self.config.min_match_len,
            self.config.max_match_len,
            &mut |depth, range| {
                range.sort_unstable();
                for i in (1..range.len()).rev() {
                    let a = range[i - 1] as usize;
                    let b = range[i] as usize;
                    let o = (b - a) as u32;
                    if o as usize > window_size {
                        continue;
                    }
                    let key_abs = win_start + b;
                    if key_abs >= w && key_abs < end {
                        raw.entry(key_abs).or_default().push((depth, o));
                    }
                }
            },
        );

        for edges in raw.values_mut() {
            edges.sort_by_key(|&(d, _)| d);
            let mut best_offset = u32::MAX;
            edges.retain(|&(_, o)| {
                if o < best_offset {
                    best_offset = o;
                    true
                } else {
                    false
                }
            });
        }
        raw
    }
}

impl Engine for Osas {
    fn parse(&mut self, buf: &mut Buf, blk: Option<&mut Block>, flags: Flags) -> Result<usize> {
        let n = buf.pending_len().min(self.config.common.block_size as usize);
        if n == 0 {
            return Err(Error::EmptyBuffer);
        }
        let w = buf.window_head();
        let end = w + n;

        let blk = match blk {
            None => {
                buf.advance_window(n);
                return Ok(n);
            }
            Some(blk) => blk,
        };
        blk.clear();

        let window_size = self.config.common.window_size as usize;
        let win_start = w.saturating_sub(window_size);
        let min_match_len = self.config.min_match_len as usize;

        let data = buf.data();
        let edges = self.collect_edges(data, win_start, w, end);

        const UNREACHABLE: u32 = u32::MAX;
        let mut d = vec![UNREACHABLE; n + 1];
        let mut pred: Vec<Option<(usize, EdgeKind)>> = vec![None; n + 1];
        d[0] = 0;

        for i in 0..n {
            if d[i] == UNREACHABLE {
                continue;
            }
            let lit_cost = d[i] + (self.config.cost)(1, 0);
            if lit_cost < d[i + 1] {
                d[i + 1] = lit_cost;
                pred[i + 1] = Some((i, EdgeKind::Literal));
            }
            if let Some(local) = edges.get(&(w + i)) {
                for &(depth, offset) in local {
                    let max_len = (depth as usize).min(n - i);
                    for len in min_match_len..=max_len {
                        let cost = d[i] + (self.config.cost)(len as u32, offset);
                        if cost < d[i + len] {
                            d[i + len] = cost;
                            pred[i + len] = Some((i, EdgeKind::Match { len: len as u32, offset }));
                        }
                    }
                }
            }
        }

        let mut path = Vec::new();
        let mut node = n;
        while node > 0 {
            let (from, kind) = pred[node].expect("every node is reachable via the literal chain");
            path.push(kind);
            node = from;
        }
        path.reverse();

        let mut lit_run_start = w;
        let mut cursor = w;
        let mut last_match_end = w;
        for edge in path {
            match edge {
                EdgeKind::Literal => cursor += 1,
                EdgeKind::Match { len, offset } => {
                    blk.sequences.push(Seq::new(
                        (cursor - lit_run_start) as u32,
                        len,
                        offset,
                    ));
                    blk.literals.extend_from_slice(&data[lit_run_start..cursor]);
                    cursor += len as usize;
                    lit_run_start = cursor;
                    last_match_end = cursor;
                }
            }
        }

        if flags.contains(Flags::NO_TRAILING_LITERALS) && !blk.sequences.is_empty() {
            drop(data);
            buf.advance_window(last_match_end - w);
            Ok(last_match_end - w)
        } else {
            blk.literals.extend_from_slice(&data[lit_run_start..end]);
            drop(data);
            buf.advance_window(n);
            Ok(n)
        }
    }

    fn shrink(&mut self, buf: &mut Buf) {
        buf.shrink(self.config.common.shrink_size as usize);
    }

    fn reset(&mut self, buf: &mut Buf, data: Option<&[u8]>) {
        buf.reset(data);
    }

    fn window_size(&self) -> u32 {
        self.config.common.window_size
    }

    fn block_size(&self) -> u32 {
        self.config.common.block_size
    }
}
