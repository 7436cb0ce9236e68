//! Sliding-window byte buffer (§3, §4.1 of SPEC_FULL.md).
//!
//! Grounded on `mgrabmueller-campross/src/window.rs`'s `SlidingWindow`
//! (grow/shrink/position bookkeeping, in-module `#[cfg(test)]` tests written
//! the same way), generalised to the `write`/`read_from`/`prune`/`shrink`/
//! `read_at` contract of SPEC_FULL.md §4.1 and to the 7-byte tail reservation
//! §3 requires for unaligned 64-bit loads.

use std::io::Read;

use crate::error::{Error, Result};

const MIN_READ_CHUNK: usize = 32 * 1024;
const TAIL_RESERVE: usize = 7;

/// A contiguous byte buffer with a window head `W` separating history from
/// pending bytes, and an external offset tracking bytes already discarded.
pub struct Buf {
    data: Vec<u8>,
    /// Window head: `data[..w]` is history, `data[w..]` is pending.
    w: usize,
    /// Total bytes discarded from the front so far.
    off: u64,
    buffer_size: usize,
}

impl Buf {
    /// Create an empty buffer that accepts up to `buffer_size` live bytes.
    pub fn new(buffer_size: usize) -> Self {
        let mut data = Vec::with_capacity(buffer_size + TAIL_RESERVE);
        data.reserve_exact(TAIL_RESERVE);
        Buf { data, w: 0, off: 0, buffer_size }
    }

    /// Number of live bytes currently held (history + pending).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Window head: bytes before this index are history (match sources),
    /// bytes at or after it are pending (not yet parsed).
    pub fn window_head(&self) -> usize {
        self.w
    }

    /// Number of bytes already discarded from the front via `prune`/`shrink`.
    pub fn offset(&self) -> u64 {
        self.off
    }

    /// Number of pending (unparsed) bytes.
    pub fn pending_len(&self) -> usize {
        self.data.len() - self.w
    }

    /// The full live slice, `data[..len()]`. Reading up to 7 bytes past the
    /// end via `mem::read_u64_le` is defined behaviour because the backing
    /// allocation always reserves `TAIL_RESERVE` extra bytes (zero-valued,
    /// per `mem::read_u64_le`'s own zero-padding — the reservation here is
    /// about capacity, not initialized content).
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Advance the window head by `n` bytes (the caller — an engine — has
    /// already consumed those bytes as either literals or match sources).
    pub fn advance_window(&mut self, n: usize) {
        debug_assert!(self.w + n <= self.data.len());
        self.w += n;
    }

    /// Append `p` to the buffer, up to `buffer_size`. Returns the number of
    /// bytes actually accepted; if that is less than `p.len()`, also returns
    /// `Error::FullBuffer`.
    pub fn write(&mut self, p: &[u8]) -> Result<usize> {
        let room = self.buffer_size.saturating_sub(self.data.len());
        let n = room.min(p.len());
        self.data.extend_from_slice(&p[..n]);
        if n < p.len() {
            Err(Error::FullBuffer)
        } else {
            Ok(n)
        }
    }

    /// Read from `reader` in `>= 32 KiB` chunks, growing by doubling (capped
    /// at `buffer_size + TAIL_RESERVE`) until EOF, a read error, or the
    /// buffer fills. A short, non-zero read (a `Read` impl is never required
    /// to fill the slice it's given in one call) does not end the loop —
    /// only a true `Ok(0)` does. Returns the total number of bytes read.
    pub fn read_from<R: Read>(&mut self, reader: &mut R) -> Result<u64> {
        let mut total: u64 = 0;
        loop {
            let room = self.buffer_size.saturating_sub(self.data.len());
            if room == 0 {
                break;
            }
            let chunk = room.min(MIN_READ_CHUNK.max(self.data.len()));
            let start = self.data.len();
            self.data.resize(start + chunk, 0);
            match reader.read(&mut self.data[start..start + chunk]) {
                Ok(0) => {
                    self.data.truncate(start);
                    break;
                }
                Ok(n) => {
                    self.data.truncate(start + n);
                    total += n as u64;
                }
                Err(e) => {
                    self.data.truncate(start);
                    return Err(Error::Io(e));
                }
            }
        }
        Ok(total)
    }

    /// Copy `p.len()` bytes starting at external offset `off` into `p`.
    pub fn read_at(&self, p: &mut [u8], off: u64) -> Result<()> {
        if off < self.off || off >= self.off + self.data.len() as u64 {
            return Err(Error::OutOfBuffer {
                requested: off,
                available_from: self.off,
                available_to: self.off + self.data.len() as u64,
            });
        }
        let start = (off - self.off) as usize;
        if start + p.len() > self.data.len() {
            return Err(Error::EndOfBuffer {
                requested_len: p.len(),
                available_len: self.data.len() - start,
            });
        }
        p.copy_from_slice(&self.data[start..start + p.len()]);
        Ok(())
    }

    /// Read a single byte at external offset `off`.
    pub fn byte_at(&self, off: u64) -> Result<u8> {
        let mut b = [0u8];
        self.read_at(&mut b, off)?;
        Ok(b[0])
    }

    /// Discard up to `min(n, window_head())` bytes from the front. Returns
    /// the number actually discarded.
    pub fn prune(&mut self, n: usize) -> usize {
        let discard = n.min(self.w);
        if discard == 0 {
            return 0;
        }
        self.data.drain(0..discard);
        self.w -= discard;
        self.off += discard as u64;
        discard
    }

    /// Discard `window_head() - shrink_size` bytes when that is positive,
    /// keeping the rightmost `shrink_size` bytes of history. Returns the
    /// number of bytes discarded — engines consume this delta to rebase
    /// their position-indexed search structures.
    pub fn shrink(&mut self, shrink_size: usize) -> usize {
        if self.w > shrink_size {
            self.prune(self.w - shrink_size)
        } else {
            0
        }
    }

    /// Replace the buffer's contents wholesale. `None` resets to empty.
    pub fn reset(&mut self, data: Option<&[u8]>) {
        self.data.clear();
        self.w = 0;
        self.off = 0;
        if let Some(d) = data {
            // Ignore overflow past buffer_size; callers resetting with more
            // data than configured is a misuse this silently truncates,
            // matching `write`'s own "accept what fits" contract.
            let n = d.len().min(self.buffer_size);
            self.data.extend_from_slice(&d[..n]);
        }
    }
}
