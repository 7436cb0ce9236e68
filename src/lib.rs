//! A library of LZ77-family parsers: turn a byte stream into a sequence of
//! literal runs and back-references, with no framing, entropy stage, or
//! checksum opinions of its own.
//!
//! Five [`Engine`] implementations trade match quality for state and speed:
//! [`engine::hs::Hs`] and [`engine::dhs::Dhs`] are greedy single/double-hash
//! finders in an LZ4-HC-style hash-chain idiom; [`engine::bdhs::Bdhs`]
//! adds backward extension on top of [`engine::dhs::Dhs`]; and
//! [`engine::gsap::Gsap`]/[`engine::osas::Osas`] replace the hash table with
//! a suffix array, trading greedy-nearest-neighbour for an exact
//! shortest-path optimum. [`driver::Driver`] wraps any engine around a
//! `std::io::Read` source so callers don't have to manage buffer refills
//! themselves.

pub mod bitset;
pub mod buffer;
pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod hash;
pub mod mem;
pub mod seq;
pub mod suffix;

pub use buffer::Buf;
pub use config::{Common, DhsConfig, GsapConfig, HsConfig, OsasConfig};
pub use driver::Driver;
pub use engine::bdhs::Bdhs;
pub use engine::dhs::Dhs;
pub use engine::gsap::Gsap;
pub use engine::hs::Hs;
pub use engine::osas::{xz_cost, Osas};
pub use engine::Engine;
pub use error::{Error, Result};
pub use seq::{Block, Flags, Seq};
