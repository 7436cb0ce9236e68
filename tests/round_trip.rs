//! Cross-engine round-trip checks (§8 Testable Property 1) — every engine,
//! driven to end of stream, must decode back to exactly its input.

use lz77_parse::{
    Bdhs, Block, Buf, Common, Dhs, DhsConfig, Driver, Engine, Flags, Gsap, GsapConfig, Hs,
    HsConfig, Osas, OsasConfig,
};

fn decode(blk: &Block) -> Vec<u8> {
    let mut out = Vec::new();
    let mut lit_pos = 0usize;
    for s in &blk.sequences {
        out.extend_from_slice(&blk.literals[lit_pos..lit_pos + s.lit_len as usize]);
        lit_pos += s.lit_len as usize;
        let start = out.len() - s.offset as usize;
        for k in 0..s.match_len as usize {
            let b = out[start + k];
            out.push(b);
        }
    }
    out.extend_from_slice(&blk.literals[lit_pos..]);
    out
}

const NATURAL_TEXT: &[u8] = b"The quick brown fox jumps over the lazy dog. \
    Pack my box with five dozen liquor jugs. How vexingly quick daft zebras jump! \
    The five boxing wizards jump quickly. Sphinx of black quartz, judge my vow. \
    The quick brown fox jumps over the lazy dog again and again, over and over.";

#[test]
fn hs_round_trips_on_natural_text() {
    let config = HsConfig {
        common: Common { window_size: 4096, buffer_size: 8192, shrink_size: 0, block_size: 64 },
        input_len: 3,
        hash_bits: 14,
        min_match_len: 3,
    };
    let mut e = Hs::new(config).unwrap();
    let mut buf = Buf::new(8192);
    buf.write(NATURAL_TEXT).unwrap();
    let mut decoded = Vec::new();
    let mut blk = Block::new();
    loop {
        match e.parse(&mut buf, Some(&mut blk), Flags::NONE) {
            Ok(0) => break,
            Ok(_) => {
                let mut lit_pos = 0usize;
                for s in &blk.sequences {
                    decoded.extend_from_slice(&blk.literals[lit_pos..lit_pos + s.lit_len as usize]);
                    lit_pos += s.lit_len as usize;
                    let start = decoded.len() - s.offset as usize;
                    for k in 0..s.match_len as usize {
                        let b = decoded[start + k];
                        decoded.push(b);
                    }
                }
                decoded.extend_from_slice(&blk.literals[lit_pos..]);
                if buf.pending_len() == 0 {
                    break;
                }
            }
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    assert_eq!(decoded, NATURAL_TEXT.to_vec());
}

#[test]
fn dhs_round_trips_on_natural_text() {
    let config = DhsConfig {
        common: Common { window_size: 4096, buffer_size: 8192, shrink_size: 0, block_size: 64 },
        input_len1: 3,
        hash_bits1: 11,
        input_len2: 7,
        hash_bits2: 11,
        min_match_len: 3,
    };
    let mut e = Dhs::new(config).unwrap();
    let mut buf = Buf::new(8192);
    buf.write(NATURAL_TEXT).unwrap();
    let mut decoded = Vec::new();
    let mut blk = Block::new();
    loop {
        match e.parse(&mut buf, Some(&mut blk), Flags::NONE) {
            Ok(0) => break,
            Ok(_) => {
                let mut lit_pos = 0usize;
                for s in &blk.sequences {
                    decoded.extend_from_slice(&blk.literals[lit_pos..lit_pos + s.lit_len as usize]);
                    lit_pos += s.lit_len as usize;
                    let start = decoded.len() - s.offset as usize;
                    for k in 0..s.match_len as usize {
                        let b = decoded[start + k];
                        decoded.push(b);
                    }
                }
                decoded.extend_from_slice(&blk.literals[lit_pos..]);
                if buf.pending_len() == 0 {
                    break;
                }
            }
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    assert_eq!(decoded, NATURAL_TEXT.to_vec());
}

#[test]
fn bdhs_round_trips_on_natural_text() {
    let config = DhsConfig {
        common: Common { window_size: 4096, buffer_size: 8192, shrink_size: 0, block_size: 4096 },
        input_len1: 3,
        hash_bits1: 11,
        input_len2: 7,
        hash_bits2: 11,
        min_match_len: 3,
    };
    let mut e = Bdhs::new(config).unwrap();
    let mut buf = Buf::new(8192);
    buf.write(NATURAL_TEXT).unwrap();
    let mut blk = Block::new();
    e.parse(&mut buf, Some(&mut blk), Flags::NONE).unwrap();
    assert_eq!(decode(&blk), NATURAL_TEXT.to_vec());
}

#[test]
fn gsap_round_trips_on_natural_text() {
    let config = GsapConfig {
        common: Common { window_size: 4096, buffer_size: 8192, shrink_size: 0, block_size: 4096 },
        min_match_len: 3,
    };
    let mut e = Gsap::new(config).unwrap();
    let mut buf = Buf::new(8192);
    buf.write(NATURAL_TEXT).unwrap();
    let mut blk = Block::new();
    e.parse(&mut buf, Some(&mut blk), Flags::NONE).unwrap();
    assert_eq!(decode(&blk), NATURAL_TEXT.to_vec());
}

#[test]
fn osas_round_trips_on_natural_text() {
    let config = OsasConfig {
        common: Common { window_size: 4096, buffer_size: 8192, shrink_size: 0, block_size: 4096 },
        min_match_len: 3,
        max_match_len: 273,
        cost: Box::new(lz77_parse::xz_cost),
    };
    let mut e = Osas::new(config).unwrap();
    let mut buf = Buf::new(8192);
    buf.write(NATURAL_TEXT).unwrap();
    let mut blk = Block::new();
    e.parse(&mut buf, Some(&mut blk), Flags::NONE).unwrap();
    assert_eq!(decode(&blk), NATURAL_TEXT.to_vec());
}

#[test]
fn driver_drains_hs_to_completion() {
    let config = HsConfig {
        common: Common { window_size: 4096, buffer_size: 8192, shrink_size: 0, block_size: 32 },
        input_len: 3,
        hash_bits: 14,
        min_match_len: 3,
    };
    let engine = Hs::new(config).unwrap();
    let mut driver = Driver::new(engine, NATURAL_TEXT, 8192);
    let mut decoded = Vec::new();
    let mut blk = Block::new();
    loop {
        match driver.sequence(&mut blk, Flags::NONE) {
            Ok(0) => break,
            Ok(_) => {
                let mut lit_pos = 0usize;
                for s in &blk.sequences {
                    decoded.extend_from_slice(&blk.literals[lit_pos..lit_pos + s.lit_len as usize]);
                    lit_pos += s.lit_len as usize;
                    let start = decoded.len() - s.offset as usize;
                    for k in 0..s.match_len as usize {
                        let b = decoded[start + k];
                        decoded.push(b);
                    }
                }
                decoded.extend_from_slice(&blk.literals[lit_pos..]);
            }
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    assert_eq!(decoded, NATURAL_TEXT.to_vec());
}
