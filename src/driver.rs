//! Reader-wrapped driver (§4.10 of SPEC_FULL.md).
//!
//! Owns an [`Engine`] and a `std::io::Read` source, and turns the engine's
//! buffer-management contract (`EmptyBuffer` / `FullBuffer` as plumbing
//! signals rather than real failures) into a plain `Ok(0)`-on-exhaustion
//! iterator-style API. Grounded on the fill-then-drive loop structure of
//! `io::file_io`'s buffered `Read` wrapping in an LZ4-style CLI, adapted to
//! drive one [`Engine`] instead of a fixed frame encoder.

use std::io::Read;

use crate::buffer::Buf;
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::seq::{Block, Flags};

/// Drives an [`Engine`] over bytes pulled from a `Read` source, refilling
/// and shrinking the underlying [`Buf`] as needed between calls.
pub struct Driver<E: Engine, R: Read> {
    engine: E,
    reader: R,
    buf: Buf,
    eof: bool,
}

impl<E: Engine, R: Read> Driver<E, R> {
    pub fn new(engine: E, reader: R, buffer_size: usize) -> Self {
        Driver { engine, reader, buf: Buf::new(buffer_size), eof: false }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Produce the next block of sequences. Returns `Ok(0)` once the reader
    /// is exhausted and every pending byte has been parsed; otherwise the
    /// number of bytes consumed into `blk`.
    pub fn sequence(&mut self, blk: &mut Block, flags: Flags) -> Result<usize> {
        let block_size = self.engine.block_size() as usize;
        if self.buf.pending_len() < block_size && !self.eof {
            self.engine.shrink(&mut self.buf);
            match self.buf.read_from(&mut self.reader) {
                Ok(0) => self.eof = true,
                Ok(_) => {}
                Err(Error::FullBuffer) => {}
                Err(e) => return Err(e),
            }
        }

        match self.engine.parse(&mut self.buf, Some(blk), flags) {
            Ok(n) => Ok(n),
            Err(Error::EmptyBuffer) if self.eof => Ok(0),
            Err(e) => Err(e),
        }
    }

    /// Reset the driver's buffer and engine state, replacing the reader.
    pub fn reset(&mut self, reader: R, data: Option<&[u8]>) {
        self.reader = reader;
        self.engine.reset(&mut self.buf, data);
        self.eof = false;
    }
}
