//! Single- and double-hash match finders (§4.2, §4.3 of SPEC_FULL.md).
//!
//! Grounded on the `block::types` hash-table fill/lookup style found in
//! LZ4's block codec (`hash4`/`hash5`, `put_position_on_hash`,
//! `get_position_on_hash`), generalised from the LZ4-fixed 4/5-byte
//! prefixes to configurable `{pos, value}` entries and an `input_len`/
//! `hash_bits` pair per table.

use crate::mem::{mask_low_bytes, read_u64_le};

/// A Knuth-style multiplicative hash constant (odd, no small factors).
const MULTIPLIER: u64 = 9_920_624_304_325_388_887;

/// One `{pos, value}` slot. `value` is the low 32 bits of the hashed key, a
/// cheap false-positive filter checked before touching the input bytes.
#[derive(Clone, Copy, Default)]
struct Entry {
    pos: u32,
    value: u32,
}

/// A single fixed-size hash table keyed by an `input_len`-byte prefix.
pub struct HashTable {
    input_len: usize,
    hash_bits: u32,
    table: Vec<Entry>,
}

impl HashTable {
    pub fn new(input_len: usize, hash_bits: u32) -> Self {
        assert!((2..=8).contains(&input_len));
        assert!(hash_bits <= 24 && hash_bits <= 8 * input_len as u32);
        HashTable {
            input_len,
            hash_bits,
            table: vec![Entry::default(); 1usize << hash_bits],
        }
    }

    pub fn input_len(&self) -> usize {
        self.input_len
    }

    #[inline]
    fn hash_of(&self, x: u64) -> usize {
        if self.hash_bits == 0 {
            return 0;
        }
        ((x.wrapping_mul(MULTIPLIER)) >> (64 - self.hash_bits)) as usize
    }

    #[inline]
    fn key_at(&self, data: &[u8], i: usize) -> u64 {
        mask_low_bytes(read_u64_le(data, i), self.input_len)
    }

    /// Overwrite the bucket for every position in `[max(a,0), min(b,
    /// len(data) - input_len + 1))` unconditionally (most-recent-wins, no
    /// chaining).
    pub fn process_segment(&mut self, data: &[u8], a: usize, b: usize) {
        if data.len() + 1 < self.input_len {
            return;
        }
        let limit = (data.len() - self.input_len + 1).min(b);
        let mut i = a;
        while i < limit {
            let x = self.key_at(data, i);
            let h = self.hash_of(x);
            self.table[h] = Entry { pos: i as u32, value: x as u32 };
            i += 1;
        }
    }

    /// Compute the hash at `i`; if the bucket's stored `value` matches, push
    /// its `pos` onto `out`. Always overwrites the bucket with the entry for
    /// `i` afterward.
    pub fn append_match_offsets(&mut self, data: &[u8], i: usize, out: &mut Vec<u32>) {
        let x = self.key_at(data, i);
        let v = x as u32;
        let h = self.hash_of(x);
        let entry = self.table[h];
        if entry.value == v {
            out.push(entry.pos);
        }
        self.table[h] = Entry { pos: i as u32, value: v };
    }

    /// Compute the hash at `i` once: read the bucket's prior candidate (if
    /// its `value` matches), then unconditionally overwrite it with `i`'s
    /// own entry. This is the single-hash-computation read-then-insert the
    /// greedy engines' inner loop relies on.
    pub fn replace(&mut self, data: &[u8], i: usize) -> Option<u32> {
        let x = self.key_at(data, i);
        let v = x as u32;
        let h = self.hash_of(x);
        let entry = self.table[h];
        self.table[h] = Entry { pos: i as u32, value: v };
        (entry.value == v).then_some(entry.pos)
    }

    /// Single-candidate lookup without mutating the table (used when the
    /// caller wants to update the bucket itself, e.g. after deciding how far
    /// to skip-hash).
    pub fn lookup(&self, data: &[u8], i: usize) -> Option<u32> {
        let x = self.key_at(data, i);
        let h = self.hash_of(x);
        let entry = self.table[h];
        (entry.value == x as u32).then_some(entry.pos)
    }

    /// Overwrite the bucket for position `i` with its own entry.
    pub fn insert(&mut self, data: &[u8], i: usize) {
        let x = self.key_at(data, i);
        let h = self.hash_of(x);
        self.table[h] = Entry { pos: i as u32, value: x as u32 };
    }

    /// Subtract `delta` from every stored `pos`, clearing entries that would
    /// underflow. Called when the sliding-window buffer is shrunk.
    pub fn shift_offsets(&mut self, delta: u32) {
        for e in self.table.iter_mut() {
            if e.pos < delta {
                *e = Entry::default();
            } else {
                e.pos -= delta;
            }
        }
    }
}

/// Two independent hash tables: `h1` (short prefix, wide reach) and `h2`
/// (long prefix, rarer but higher-confidence hits). `h1.input_len() <
/// h2.input_len()` is a precondition enforced by `Config::verify`.
pub struct DoubleHashTable {
    pub h1: HashTable,
    pub h2: HashTable,
}

impl DoubleHashTable {
    pub fn new(input_len1: usize, hash_bits1: u32, input_len2: usize, hash_bits2: u32) -> Self {
        assert!(input_len1 < input_len2);
        DoubleHashTable {
            h1: HashTable::new(input_len1, hash_bits1),
            h2: HashTable::new(input_len2, hash_bits2),
        }
    }

    /// Update both tables for position `i` from a single set of loads.
    pub fn insert(&mut self, data: &[u8], i: usize) {
        self.h1.insert(data, i);
        if i + self.h2.input_len() <= data.len() + 7 {
            self.h2.insert(data, i);
        }
    }

    /// `h2`'s candidate if its value matches, else `h1`'s, else `None`.
    pub fn lookup(&self, data: &[u8], i: usize) -> Option<u32> {
        self.h2.lookup(data, i).or_else(|| self.h1.lookup(data, i))
    }

    /// Read-then-insert on both tables from a single position, preferring
    /// `h2`'s candidate when both have one.
    pub fn replace(&mut self, data: &[u8], i: usize) -> Option<u32> {
        let c1 = self.h1.replace(data, i);
        let c2 = if i + self.h2.input_len() <= data.len() + 7 {
            self.h2.replace(data, i)
        } else {
            None
        };
        c2.or(c1)
    }

    /// `h1`-only read-then-insert, for the tail where not enough bytes
    /// remain for `h2`.
    pub fn replace_short_only(&mut self, data: &[u8], i: usize) -> Option<u32> {
        self.h1.replace(data, i)
    }

    /// `h1`-only insert, for skip-hashing positions past the point where a
    /// full `h2` prefix no longer fits before the end of the current block.
    pub fn insert_h1_only(&mut self, data: &[u8], i: usize) {
        self.h1.insert(data, i);
    }

    pub fn shift_offsets(&mut self, delta: u32) {
        self.h1.shift_offsets(delta);
        self.h2.shift_offsets(delta);
    }
}
