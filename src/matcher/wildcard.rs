//! Wildcard match mode: `*` (any run), `?` (single char), `@` (alpha),
//! `%` (numeric), everything else a literal run.
//!
//! The scan seed is the longest leading literal run. A wildcard at
//! position 0 degenerates the seed to the empty prefix — a full-dictionary
//! scan — which is why `allow_leading_wildcard` is a build-time policy
//! flag rather than always-on.

use super::{scan_collect, CasePolicy, TermInfo};
use crate::dict::TermDictionary;
use crate::error::{FerretError, Result};

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Star,
    Question,
    Alpha,
    Numeric,
}

fn compile(pattern: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    for c in pattern.chars() {
        match c {
            '*' => {
                flush_literal(&mut literal, &mut segments);
                segments.push(Segment::Star);
            }
            '?' => {
                flush_literal(&mut literal, &mut segments);
                segments.push(Segment::Question);
            }
            '@' => {
                flush_literal(&mut literal, &mut segments);
                segments.push(Segment::Alpha);
            }
            '%' => {
                flush_literal(&mut literal, &mut segments);
                segments.push(Segment::Numeric);
            }
            other => literal.push(other),
        }
    }
    flush_literal(&mut literal, &mut segments);
    segments
}

fn flush_literal(literal: &mut String, segments: &mut Vec<Segment>) {
    if !literal.is_empty() {
        segments.push(Segment::Literal(std::mem::take(literal)));
    }
}

fn leading_literal_prefix(pattern: &str) -> String {
    pattern
        .chars()
        .take_while(|c| !matches!(c, '*' | '?' | '@' | '%'))
        .collect()
}

fn fold(s: &str, policy: CasePolicy) -> String {
    match policy {
        CasePolicy::Upper => s.to_uppercase(),
        CasePolicy::Lower => s.to_lowercase(),
        CasePolicy::Numeric | CasePolicy::PreserveCase => s.to_string(),
    }
}

/// Recursive backtracking matcher over compiled segments.
fn matches(chars: &[char], segments: &[Segment]) -> bool {
    match segments.first() {
        None => chars.is_empty(),
        Some(Segment::Literal(lit)) => {
            let lit_chars: Vec<char> = lit.chars().collect();
            chars.len() >= lit_chars.len()
                && chars[..lit_chars.len()] == lit_chars[..]
                && matches(&chars[lit_chars.len()..], &segments[1..])
        }
        Some(Segment::Question) => {
            !chars.is_empty() && matches(&chars[1..], &segments[1..])
        }
        Some(Segment::Alpha) => {
            !chars.is_empty() && chars[0].is_alphabetic() && matches(&chars[1..], &segments[1..])
        }
        Some(Segment::Numeric) => {
            !chars.is_empty() && chars[0].is_ascii_digit() && matches(&chars[1..], &segments[1..])
        }
        Some(Segment::Star) => {
            for split in 0..=chars.len() {
                if matches(&chars[split..], &segments[1..]) {
                    return true;
                }
            }
            false
        }
    }
}

pub fn scan(
    dict: &TermDictionary,
    pattern: &str,
    allow_leading_wildcard: bool,
    field_bitmap: Option<u64>,
) -> Result<Vec<TermInfo>> {
    let starts_with_wildcard = matches!(pattern.chars().next(), Some('*' | '?' | '@' | '%'));
    if starts_with_wildcard && !allow_leading_wildcard {
        return Err(FerretError::BadWildCard(format!(
            "leading wildcard not permitted: {pattern}"
        )));
    }

    let case_policy = CasePolicy::from_query(pattern);
    let prefix = leading_literal_prefix(pattern);
    let folded_prefix = fold(&prefix, case_policy);
    let segments = compile(&fold(pattern, case_policy));

    scan_collect(
        dict,
        &folded_prefix,
        field_bitmap,
        |key| folded_prefix.is_empty() || key.starts_with(&folded_prefix),
        |key| {
            let folded_key = fold(key, case_policy);
            let chars: Vec<char> = folded_key.chars().collect();
            matches(&chars, &segments)
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dict::term::TermRecord;
    use crate::posting::TermType;

    fn build_dict(terms: &[&str]) -> TermDictionary {
        let mut dict = TermDictionary::new();
        for term in terms {
            let rec = TermRecord {
                term_type: TermType::Regular,
                term_count: 1,
                document_count: 1,
                index_block_id: 0,
                field_ids: vec![],
            };
            dict.insert(term, rec.encode()).unwrap();
        }
        dict
    }

    #[test]
    fn scenario_wildcard_ap_star() {
        let dict = build_dict(&["anvil", "apple", "apricot", "banana"]);
        let results = scan(&dict, "ap*", true, None).unwrap();
        let terms: Vec<&str> = results.iter().map(|r| r.term.as_str()).collect();
        assert_eq!(terms, vec!["apple", "apricot"]);
    }

    #[test]
    fn scenario_wildcard_a_star_e() {
        let dict = build_dict(&["anvil", "apple", "apricot", "banana"]);
        let results = scan(&dict, "a*e", true, None).unwrap();
        let terms: Vec<&str> = results.iter().map(|r| r.term.as_str()).collect();
        assert_eq!(terms, vec!["apple"]);
    }

    #[test]
    fn leading_wildcard_rejected_by_policy() {
        let dict = build_dict(&["anvil"]);
        assert!(scan(&dict, "*vil", false, None).is_err());
    }

    #[test]
    fn leading_wildcard_allowed_scans_full_dictionary() {
        let dict = build_dict(&["anvil", "apple"]);
        let results = scan(&dict, "*il", true, None).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].term, "anvil");
    }
}
