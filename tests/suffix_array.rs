//! Suffix array / LCP array correctness (§8 Testable Properties 6-7).

use lz77_parse::suffix::{self, lcp};

/// Scenario 4: the exact fixture and expected suffix array from spec §8.
#[test]
fn abba_repeat_scenario() {
    let text = b"abbaabbaabbaabba";
    let sa = suffix::build(text);
    assert_eq!(sa, vec![12, 8, 4, 0, 13, 9, 5, 1, 15, 11, 7, 3, 14, 10, 6, 2]);
}

fn assert_valid_suffix_array(text: &[u8], sa: &[u32]) {
    let n = text.len();
    assert_eq!(sa.len(), n);
    let mut seen = vec![false; n];
    for &p in sa {
        assert!((p as usize) < n);
        assert!(!seen[p as usize], "duplicate position {p} in suffix array");
        seen[p as usize] = true;
    }
    for w in sa.windows(2) {
        let a = &text[w[0] as usize..];
        let b = &text[w[1] as usize..];
        assert!(a < b, "suffix array not sorted: {a:?} should be < {b:?}");
    }
}

#[test]
fn suffix_array_is_a_sorted_permutation_on_varied_inputs() {
    let samples: &[&[u8]] = &[
        b"",
        b"a",
        b"aaaaaaaaaa",
        b"banana",
        b"mississippi",
        b"the quick brown fox jumps over the lazy dog",
        b"\x00\x01\x00\x01\x00",
    ];
    for &text in samples {
        let sa = suffix::build(text);
        assert_valid_suffix_array(text, &sa);
    }
}

#[test]
fn inverse_suffix_array_round_trips() {
    let text = b"abbaabbaabbaabba";
    let sa = suffix::build(text);
    let isa = suffix::inverse(&sa);
    for (rank, &pos) in sa.iter().enumerate() {
        assert_eq!(isa[pos as usize], rank as u32);
    }
}

/// Property 7: `lcp[r]` is the longest common prefix of the suffixes at
/// ranks `r-1` and `r`; checked directly against the SA order, not just
/// against Kasai's own internal bookkeeping.
#[test]
fn kasai_lcp_matches_its_definition() {
    let text = b"abbaabbaabbaabba";
    let sa = suffix::build(text);
    let isa = suffix::inverse(&sa);
    let lcp_array = lcp::kasai(text, &sa, &isa);

    assert_eq!(lcp_array[0], 0);
    for rank in 1..sa.len() {
        let a = &text[sa[rank - 1] as usize..];
        let b = &text[sa[rank] as usize..];
        let expected = a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count();
        assert_eq!(lcp_array[rank] as usize, expected, "mismatch at rank {rank}");
    }
}

#[test]
fn kasai_lcp_on_empty_and_singleton_input() {
    assert!(lcp::kasai(b"", &[], &[]).is_empty());
    let text = b"a";
    let sa = suffix::build(text);
    let isa = suffix::inverse(&sa);
    let lcp_array = lcp::kasai(text, &sa, &isa);
    assert_eq!(lcp_array, vec![0]);
}

/// `segments` must only report depth-`d` groups within `[min, max]` and
/// every reported position must actually share that common prefix length.
#[test]
fn segments_reports_only_admissible_common_prefix_groups() {
    let text = b"abbaabbaabbaabba";
    let mut sa = suffix::build(text);
    let isa = suffix::inverse(&sa);
    let lcp_array = lcp::kasai(text, &sa, &isa);

    let mut reported = Vec::new();
    lcp::segments(&mut sa, &lcp_array, 3, 8, &mut |depth, range| {
        assert!((3..=8).contains(&depth), "depth {depth} outside [3, 8]");
        for &p in range.iter() {
            reported.push((depth, p));
        }
    });

    for (depth, p) in reported {
        let suffix_len = text.len() - p as usize;
        assert!(suffix_len as u32 >= depth, "suffix at {p} too short for depth {depth}");
    }
}
