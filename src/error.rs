//! Crate-wide error type.
//!
//! A plain enum with hand-written `Display` and `std::error::Error` impls,
//! the same shape as `Lz4FError` (`frame/types.rs`) in an LZ4-style frame
//! codec: no `thiserror`, one error name per failure mode, each carrying the
//! context a caller needs to react (the offending field, the requested vs.
//! available byte count, ...).

use core::fmt;

/// Errors produced by buffer, config, and engine operations.
#[derive(Debug)]
pub enum Error {
    /// `parse` was called but no pending bytes are available.
    EmptyBuffer,
    /// `write` could not accept all of its input because the buffer is at
    /// `buffer_size`. The number of bytes actually accepted is carried
    /// alongside this error at the call site, not in the variant itself.
    FullBuffer,
    /// `read_at`/`byte_at` addressed a byte outside `[off, off+len(data))`.
    OutOfBuffer { requested: u64, available_from: u64, available_to: u64 },
    /// `read_at` addressed a range that starts in bounds but extends past
    /// the end of the buffered data.
    EndOfBuffer { requested_len: usize, available_len: usize },
    /// A config field failed `verify()`.
    InvalidConfig { field: &'static str, message: String },
    /// A position or segment size grew past the `u32`/`i32` limit the
    /// match-finding structures are built on. Only possible with a
    /// misconfigured `buffer_size`.
    Overflow(&'static str),
    /// Propagated unchanged from a wrapped `Read` source.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyBuffer => write!(f, "no pending bytes to parse"),
            Error::FullBuffer => write!(f, "buffer is full"),
            Error::OutOfBuffer { requested, available_from, available_to } => write!(
                f,
                "offset {requested} is outside the buffered range [{available_from}, {available_to})"
            ),
            Error::EndOfBuffer { requested_len, available_len } => write!(
                f,
                "requested {requested_len} bytes but only {available_len} are buffered"
            ),
            Error::InvalidConfig { field, message } => {
                write!(f, "invalid config field `{field}`: {message}")
            }
            Error::Overflow(what) => write!(f, "{what} overflowed its 32-bit bound"),
            Error::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
