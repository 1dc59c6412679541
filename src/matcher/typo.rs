//! Typo match mode: bounded edit distance, at most `max_typos` edits.
//!
//! The scan has no useful prefix seed either (an edit can touch the first
//! character), so it's a full-dictionary scan with per-key early exit in
//! the DP itself.

use super::{scan_collect, TermInfo};
use crate::dict::TermDictionary;
use crate::error::Result;

/// True iff the edit distance between `a` and `b` is at most `max`.
///
/// Two early exits on top of the textbook DP: a length-difference lower
/// bound (if `|a.len() - b.len()| > max`, no need to run the table at
/// all), and a per-row minimum abandon (once every entry in a row exceeds
/// `max`, no path through it can finish within budget).
pub fn levenshtein_within(a: &str, b: &str, max: usize) -> bool {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.len().abs_diff(b.len()) > max {
        return false;
    }
    if a.is_empty() || b.is_empty() {
        return a.len().max(b.len()) <= max;
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        let mut row_min = curr[0];
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
            row_min = row_min.min(curr[j]);
        }
        if row_min > max {
            return false;
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()] <= max
}

fn fold(s: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        s.to_string()
    } else {
        crate::utils::normalize(s)
    }
}

pub fn scan(
    dict: &TermDictionary,
    query: &str,
    max_typos: usize,
    case_sensitive: bool,
    field_bitmap: Option<u64>,
) -> Result<Vec<TermInfo>> {
    let folded_query = fold(query, case_sensitive);
    scan_collect(
        dict,
        "",
        field_bitmap,
        |_| true,
        |key| levenshtein_within(&fold(key, case_sensitive), &folded_query, max_typos),
    )
}
