// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for bounded Levenshtein matching (§4.5 Typo match mode).
//!
//! Cross-checks the early-exit `levenshtein_within` against a textbook DP
//! computed right here, over short strings so the textbook version stays
//! fast enough to run on every fuzz iteration.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use ferret::matcher::typo::levenshtein_within;

#[derive(Debug, Arbitrary)]
struct Input {
    a: String,
    b: String,
    max: u8,
}

fn naive_distance(a: &[char], b: &[char]) -> usize {
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, &ca) in a.iter().enumerate() {
        let mut prev_diag = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let tmp = row[j + 1];
            row[j + 1] = if ca == cb {
                prev_diag
            } else {
                1 + prev_diag.min(row[j]).min(row[j + 1])
            };
            prev_diag = tmp;
        }
    }
    row[b.len()]
}

fuzz_target!(|input: Input| {
    let a: String = input.a.chars().take(12).collect();
    let b: String = input.b.chars().take(12).collect();
    let max = (input.max % 4) as usize;

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let expected = naive_distance(&a_chars, &b_chars) <= max;
    let actual = levenshtein_within(&a, &b, max);
    assert_eq!(
        actual, expected,
        "levenshtein_within({a:?}, {b:?}, {max}) = {actual}, expected {expected}"
    );

    assert!(levenshtein_within(&a, &a, 0));
});
