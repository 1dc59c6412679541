//! Term-dictionary scanners for each match mode (§4.5).
//!
//! A match mode picks a scan seed into the term dictionary (a literal
//! prefix, a character class, or "scan everything") and a per-key
//! decision predicate. The central scan loop below is shared; only the
//! seed derivation and the predicate vary by mode.

pub mod phonetic;
pub mod range;
pub mod regex_match;
pub mod typo;
pub mod wildcard;

use crate::dict::term::ScanControl;
use crate::dict::TermDictionary;
use crate::error::{FerretError, Result};
use crate::posting::TermType;

pub use range::RangeComparator;

#[derive(Debug, Clone, PartialEq)]
pub struct TermInfo {
    pub term: String,
    pub term_type: TermType,
    pub term_count: u32,
    pub document_count: u32,
}

/// Case policy for a dictionary scan, chosen from the first character of
/// the query: digit → numeric, upper → upper-case, lower → lower-case,
/// non-ASCII → preserve-case. The character class iterated over the scan
/// inherits this policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasePolicy {
    Numeric,
    Upper,
    Lower,
    PreserveCase,
}

impl CasePolicy {
    pub fn from_query(query: &str) -> Self {
        match query.chars().next() {
            Some(c) if c.is_ascii_digit() => Self::Numeric,
            Some(c) if c.is_ascii_uppercase() => Self::Upper,
            Some(c) if c.is_ascii_lowercase() => Self::Lower,
            _ => Self::PreserveCase,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneticAlgorithm {
    Soundex,
    Phonix,
    Metaphone,
}

pub enum MatchMode {
    Regular,
    Stop,
    Wildcard {
        /// Whether a wildcard at position 0 is allowed (build-time policy).
        allow_leading_wildcard: bool,
    },
    Phonetic(PhoneticAlgorithm),
    Typo {
        max_typos: usize,
        case_sensitive: bool,
    },
    Regex,
    Range {
        start: String,
        end: String,
        comparator: RangeComparator,
        numeric: bool,
    },
}

/// Given a query term, a match mode, and an optional field-ID bitmap
/// filter, return every matching dictionary key consolidated into
/// [`TermInfo`].
pub fn match_terms(
    dict: &TermDictionary,
    query: &str,
    mode: &MatchMode,
    field_bitmap: Option<u64>,
) -> Result<Vec<TermInfo>> {
    match mode {
        MatchMode::Regular => lookup_exact(dict, query, TermType::Regular, field_bitmap),
        MatchMode::Stop => lookup_exact(dict, query, TermType::Stop, field_bitmap),
        MatchMode::Wildcard {
            allow_leading_wildcard,
        } => wildcard::scan(dict, query, *allow_leading_wildcard, field_bitmap),
        MatchMode::Phonetic(algo) => phonetic::scan(dict, query, *algo, field_bitmap),
        MatchMode::Typo {
            max_typos,
            case_sensitive,
        } => typo::scan(dict, query, *max_typos, *case_sensitive, field_bitmap),
        MatchMode::Regex => regex_match::scan(dict, query, field_bitmap),
        MatchMode::Range {
            start,
            end,
            comparator,
            numeric,
        } => range::scan(dict, start, end, *comparator, *numeric, field_bitmap),
    }
}

fn lookup_exact(
    dict: &TermDictionary,
    query: &str,
    expected_type: TermType,
    field_bitmap: Option<u64>,
) -> Result<Vec<TermInfo>> {
    let record = match dict.lookup_record(query) {
        Ok(r) => r,
        Err(FerretError::TermNotFound(_)) => return Err(FerretError::TermNotFound(query.to_string())),
        Err(e) => return Err(e),
    };
    if record.term_type != expected_type {
        return Err(FerretError::TermNotFound(query.to_string()));
    }
    if !record.occurs_in(field_bitmap) {
        return Err(FerretError::TermDoesNotOccur(query.to_string()));
    }
    Ok(vec![TermInfo {
        term: query.to_string(),
        term_type: record.term_type,
        term_count: record.term_count,
        document_count: record.document_count,
    }])
}

/// Shared scan helper: walk the dictionary from `seed`, invoking
/// `predicate` per key; keys accepted by `predicate` and occurring within
/// `field_bitmap` become [`TermInfo`] entries. `within_window` bounds how
/// far the scan continues past `seed` (a literal prefix, or a character
/// class upper bound) — returning `false` stops the scan early.
pub(crate) fn scan_collect<P, W>(
    dict: &TermDictionary,
    seed: &str,
    field_bitmap: Option<u64>,
    mut within_window: W,
    mut predicate: P,
) -> Result<Vec<TermInfo>>
where
    P: FnMut(&str) -> bool,
    W: FnMut(&str) -> bool,
{
    let mut out = Vec::new();
    dict.scan_from(seed, |key, value| {
        if !within_window(key) {
            return ScanControl::Stop;
        }
        if predicate(key) {
            if let Ok(record) = crate::dict::term::TermRecord::decode(value) {
                if record.occurs_in(field_bitmap) {
                    out.push(TermInfo {
                        term: key.to_string(),
                        term_type: record.term_type,
                        term_count: record.term_count,
                        document_count: record.document_count,
                    });
                }
            }
        }
        ScanControl::Continue
    });
    Ok(out)
}
