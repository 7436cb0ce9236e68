//! Per-engine configuration (§6 of SPEC_FULL.md).
//!
//! Grounded on the `frame::types::Prefs` frame-preferences shape found in
//! LZ4-style frame codecs: a plain struct with a `Default` impl encoding the
//! documented defaults, plus a `verify()` that rejects an inconsistent
//! combination with a human-readable `Error::InvalidConfig` rather than
//! panicking. No serde: `Prefs` itself is not (de)serialised either, since
//! it is always constructed in-process, never read off the wire.

use crate::error::{Error, Result};

const DEFAULT_WINDOW_SIZE: u32 = 8 * 1024 * 1024;
const DEFAULT_BLOCK_SIZE: u32 = 128 * 1024;
const SHRINK_THRESHOLD: u32 = 64 * 1024;
const DEFAULT_SHRINK_SIZE_LARGE: u32 = 32 * 1024;

fn default_shrink_size(buffer_size: u32) -> u32 {
    if buffer_size >= SHRINK_THRESHOLD {
        DEFAULT_SHRINK_SIZE_LARGE
    } else {
        buffer_size / 2
    }
}

fn verify_common(window_size: u32, buffer_size: u32, shrink_size: u32, block_size: u32) -> Result<()> {
    if buffer_size == 0 || buffer_size > u32::MAX - 7 {
        return Err(Error::InvalidConfig {
            field: "buffer_size",
            message: format!("must be in [1, {}], got {buffer_size}", u32::MAX - 7),
        });
    }
    if shrink_size > buffer_size {
        return Err(Error::InvalidConfig {
            field: "shrink_size",
            message: format!("must be <= buffer_size ({buffer_size}), got {shrink_size}"),
        });
    }
    if window_size > u32::MAX - 7 {
        return Err(Error::InvalidConfig {
            field: "window_size",
            message: format!("must be <= {}, got {window_size}", u32::MAX - 7),
        });
    }
    if block_size == 0 {
        return Err(Error::InvalidConfig {
            field: "block_size",
            message: "must be nonzero".to_string(),
        });
    }
    Ok(())
}

fn verify_input_len(field: &'static str, input_len: usize) -> Result<()> {
    if !(2..=8).contains(&input_len) {
        return Err(Error::InvalidConfig {
            field,
            message: format!("must be in [2, 8], got {input_len}"),
        });
    }
    Ok(())
}

fn verify_hash_bits(field: &'static str, hash_bits: u32, input_len: usize) -> Result<()> {
    let max = (8 * input_len as u32).min(24);
    if hash_bits > max {
        return Err(Error::InvalidConfig {
            field,
            message: format!("must be <= {max} for input_len={input_len}, got {hash_bits}"),
        });
    }
    Ok(())
}

fn verify_match_len(min_match_len: u32, max_match_len: u32) -> Result<()> {
    if min_match_len < 2 || min_match_len > max_match_len {
        return Err(Error::InvalidConfig {
            field: "min_match_len",
            message: format!(
                "must satisfy 2 <= min_match_len <= max_match_len ({max_match_len}), got {min_match_len}"
            ),
        });
    }
    Ok(())
}

/// Shared fields every engine's config carries.
#[derive(Debug, Clone, Copy)]
pub struct Common {
    pub window_size: u32,
    pub buffer_size: u32,
    pub shrink_size: u32,
    pub block_size: u32,
}

impl Default for Common {
    fn default() -> Self {
        let buffer_size = DEFAULT_WINDOW_SIZE;
        Common {
            window_size: DEFAULT_WINDOW_SIZE,
            buffer_size,
            shrink_size: default_shrink_size(buffer_size),
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl Common {
    pub fn verify(&self) -> Result<()> {
        verify_common(self.window_size, self.buffer_size, self.shrink_size, self.block_size)
    }
}

/// Config for the single-hash greedy engine (HS).
#[derive(Debug, Clone, Copy)]
pub struct HsConfig {
    pub common: Common,
    pub input_len: usize,
    pub hash_bits: u32,
    pub min_match_len: u32,
}

impl Default for HsConfig {
    fn default() -> Self {
        HsConfig { common: Common::default(), input_len: 3, hash_bits: 18, min_match_len: 3 }
    }
}

impl HsConfig {
    pub fn verify(&self) -> Result<()> {
        self.common.verify()?;
        verify_input_len("input_len", self.input_len)?;
        verify_hash_bits("hash_bits", self.hash_bits, self.input_len)?;
        if self.min_match_len < 2 {
            return Err(Error::InvalidConfig {
                field: "min_match_len",
                message: format!("must be >= 2, got {}", self.min_match_len),
            });
        }
        Ok(())
    }
}

/// Config for the double-hash engines (DHS, BDHS).
#[derive(Debug, Clone, Copy)]
pub struct DhsConfig {
    pub common: Common,
    pub input_len1: usize,
    pub hash_bits1: u32,
    pub input_len2: usize,
    pub hash_bits2: u32,
    pub min_match_len: u32,
}

impl Default for DhsConfig {
    fn default() -> Self {
        DhsConfig {
            common: Common::default(),
            input_len1: 3,
            hash_bits1: 11,
            input_len2: 7,
            hash_bits2: 11,
            min_match_len: 3,
        }
    }
}

impl DhsConfig {
    pub fn verify(&self) -> Result<()> {
        self.common.verify()?;
        verify_input_len("input_len1", self.input_len1)?;
        verify_input_len("input_len2", self.input_len2)?;
        verify_hash_bits("hash_bits1", self.hash_bits1, self.input_len1)?;
        verify_hash_bits("hash_bits2", self.hash_bits2, self.input_len2)?;
        if self.input_len1 >= self.input_len2 {
            return Err(Error::InvalidConfig {
                field: "input_len2",
                message: format!(
                    "must be > input_len1 ({}), got {}",
                    self.input_len1, self.input_len2
                ),
            });
        }
        if self.min_match_len < 2 {
            return Err(Error::InvalidConfig {
                field: "min_match_len",
                message: format!("must be >= 2, got {}", self.min_match_len),
            });
        }
        Ok(())
    }
}

/// Config for the greedy suffix-array engine (GSAP).
#[derive(Debug, Clone, Copy)]
pub struct GsapConfig {
    pub common: Common,
    pub min_match_len: u32,
}

impl Default for GsapConfig {
    fn default() -> Self {
        GsapConfig { common: Common::default(), min_match_len: 3 }
    }
}

impl GsapConfig {
    pub fn verify(&self) -> Result<()> {
        self.common.verify()?;
        if self.min_match_len < 2 {
            return Err(Error::InvalidConfig {
                field: "min_match_len",
                message: format!("must be >= 2, got {}", self.min_match_len),
            });
        }
        Ok(())
    }
}

/// Config for the optimal suffix-array engine (OSAS). `cost` is not
/// `Clone`/`Copy` (it is a boxed closure), so this type deliberately is not
/// either — callers build one `OsasConfig` per engine instance.
pub struct OsasConfig {
    pub common: Common,
    pub min_match_len: u32,
    pub max_match_len: u32,
    pub cost: Box<dyn Fn(u32, u32) -> u32>,
}

impl Default for OsasConfig {
    fn default() -> Self {
        OsasConfig {
            common: Common::default(),
            min_match_len: 3,
            max_match_len: 273,
            cost: Box::new(crate::engine::osas::xz_cost),
        }
    }
}

impl OsasConfig {
    pub fn verify(&self) -> Result<()> {
        self.common.verify()?;
        verify_match_len(self.min_match_len, self.max_match_len)
    }
}
