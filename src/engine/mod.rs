//! Parsing engines (§4.4-4.9, §9 "Polymorphic parser choice" of
//! SPEC_FULL.md).
//!
//! The five engines share one capability interface — `parse`, `shrink`,
//! `reset`, config introspection — rather than a class hierarchy, per
//! SPEC_FULL.md's explicit design note. Grounded on the `hc::search` +
//! `hc::compress_hc` split between match-finding state and the outer
//! compress loop found in LZ4-HC, generalised from LZ4's single hash-chain
//! finder to five independent finder/search strategies behind one trait.

pub mod bdhs;
pub mod dhs;
pub mod gsap;
pub mod hs;
pub mod osas;

use crate::buffer::Buf;
use crate::error::Result;
use crate::seq::{Block, Flags};

/// Shared contract every parsing engine implements.
///
/// `parse` advances `buf`'s window head by the number of bytes it consumed
/// and returns that count. When `blk` is `None` the engine runs in
/// skip-ahead mode: it updates its match-finding structures for the
/// upcoming bytes without emitting sequences, advancing the window exactly
/// as far as a normal call would.
pub trait Engine {
    fn parse(&mut self, buf: &mut Buf, blk: Option<&mut Block>, flags: Flags) -> Result<usize>;

    /// Shrink `buf`'s history to this engine's configured `shrink_size`,
    /// rebasing any position-indexed search structures by the discarded
    /// delta.
    fn shrink(&mut self, buf: &mut Buf);

    /// Reset all engine-internal state and clear `buf`, optionally loading
    /// new history.
    fn reset(&mut self, buf: &mut Buf, data: Option<&[u8]>);

    fn window_size(&self) -> u32;
    fn block_size(&self) -> u32;
}
