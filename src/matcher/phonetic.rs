//! Phonetic match modes: Soundex, Phonix, Metaphone (§4.5).
//!
//! All three reduce a key to a short code; a key matches iff its code
//! equals the query's code. Since the transform can map wildly different
//! prefixes onto the same code, there's no useful literal scan seed — the
//! whole dictionary is the scan window, bounded only by dictionary size
//! (§5: long scans here are bounded by dictionary size, a documented
//! cost of the mode).

use super::{scan_collect, PhoneticAlgorithm, TermInfo};
use crate::dict::TermDictionary;
use crate::error::Result;

/// Classic Soundex (Odell-Russell 1918): first letter plus three digits
/// from a consonant-class encoding, vowels and duplicates dropped.
pub fn soundex(word: &str) -> String {
    let chars: Vec<char> = word.chars().filter(|c| c.is_ascii_alphabetic()).collect();
    if chars.is_empty() {
        return String::new();
    }
    let first = chars[0].to_ascii_uppercase();
    let mut code = String::new();
    code.push(first);
    let mut last_digit = soundex_digit(first);
    for &c in &chars[1..] {
        let digit = soundex_digit(c.to_ascii_uppercase());
        if digit != '0' && digit != last_digit {
            code.push(digit);
            if code.len() == 4 {
                break;
            }
        }
        if digit != '0' || !matches!(c.to_ascii_uppercase(), 'H' | 'W') {
            last_digit = digit;
        }
    }
    while code.len() < 4 {
        code.push('0');
    }
    code
}

fn soundex_digit(c: char) -> char {
    match c {
        'B' | 'F' | 'P' | 'V' => '1',
        'C' | 'G' | 'J' | 'K' | 'Q' | 'S' | 'X' | 'Z' => '2',
        'D' | 'T' => '3',
        'L' => '4',
        'M' | 'N' => '5',
        'R' => '6',
        _ => '0',
    }
}

/// Phonix: a Soundex variant with a handful of pre-transform digraph
/// rewrites before the same digit-class reduction. Implemented with the
/// most common English rewrites rather than the full published rule table.
pub fn phonix(word: &str) -> String {
    let mut w = word.to_ascii_uppercase();
    for (from, to) in [
        ("PH", "F"),
        ("WR", "R"),
        ("KN", "N"),
        ("GN", "N"),
        ("CK", "K"),
        ("SCH", "SK"),
    ] {
        w = w.replace(from, to);
    }
    soundex(&w)
}

/// Simplified Metaphone: a small set of the original rewrite rules
/// (silent letters, common digraphs) followed by vowel removal after the
/// first letter. Close enough for dictionary-bucketing purposes; not a
/// byte-for-byte port of the 1990 algorithm.
pub fn metaphone(word: &str) -> String {
    let mut w = word.to_ascii_uppercase();
    for (from, to) in [
        ("PH", "F"),
        ("WR", "R"),
        ("KN", "N"),
        ("GN", "N"),
        ("MB", "M"),
        ("CK", "K"),
        ("SCH", "SK"),
    ] {
        w = w.replace(from, to);
    }
    let chars: Vec<char> = w.chars().filter(|c| c.is_ascii_alphabetic()).collect();
    if chars.is_empty() {
        return String::new();
    }
    let mut code = String::new();
    code.push(chars[0]);
    for &c in &chars[1..] {
        if !matches!(c, 'A' | 'E' | 'I' | 'O' | 'U') {
            code.push(c);
        }
    }
    code.truncate(6);
    code
}

fn transform(algo: PhoneticAlgorithm, word: &str) -> String {
    match algo {
        PhoneticAlgorithm::Soundex => soundex(word),
        PhoneticAlgorithm::Phonix => phonix(word),
        PhoneticAlgorithm::Metaphone => metaphone(word),
    }
}

pub fn scan(
    dict: &TermDictionary,
    query: &str,
    algo: PhoneticAlgorithm,
    field_bitmap: Option<u64>,
) -> Result<Vec<TermInfo>> {
    let query_code = transform(algo, query);
    scan_collect(
        dict,
        "",
        field_bitmap,
        |_| true,
        |key| transform(algo, key) == query_code,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soundex_classic_examples() {
        assert_eq!(soundex("Robert"), "R163");
        assert_eq!(soundex("Rupert"), "R163");
        assert_eq!(soundex("Ashcraft"), soundex("Ashcroft"));
    }

    #[test]
    fn metaphone_strips_silent_letters() {
        assert_eq!(metaphone("knight"), metaphone("night"));
    }

    #[test]
    fn phonix_merges_ph_and_f() {
        assert_eq!(phonix("phone"), phonix("fone"));
    }
}
