//! Range match mode: alpha or numeric key comparisons (§4.5).

use super::{scan_collect, TermInfo};
use crate::dict::TermDictionary;
use crate::error::{FerretError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeComparator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Between,
}

fn validate(start: &str, end: &str, comparator: RangeComparator, numeric: bool) -> Result<()> {
    if comparator == RangeComparator::Between && end < start {
        return Err(FerretError::BadRange(format!(
            "range end '{end}' precedes start '{start}'"
        )));
    }
    if comparator != RangeComparator::Eq
        && comparator != RangeComparator::Ne
        && comparator != RangeComparator::Between
        && !end.is_empty()
    {
        return Err(FerretError::BadRange(
            "non-equality comparator must not carry a range end".into(),
        ));
    }
    if !numeric {
        let mixed_case = start.chars().any(|c| c.is_uppercase())
            && start.chars().any(|c| c.is_lowercase())
            || end.chars().any(|c| c.is_uppercase()) && end.chars().any(|c| c.is_lowercase());
        if mixed_case {
            return Err(FerretError::BadRange(
                "mixed case in alpha range bound".into(),
            ));
        }
    }
    Ok(())
}

fn scan_seed(start: &str, numeric: bool) -> String {
    if numeric {
        // Numeric order and the dictionary's lexicographic key order only
        // agree within a fixed digit width ("10" sorts before "5"), so a
        // single-character prefix is not a sound lower bound here; scan
        // the whole dictionary and let `compare_numeric` filter.
        String::new()
    } else {
        start.chars().next().map(|c| c.to_string()).unwrap_or_default()
    }
}

fn compare_alpha(key: &str, start: &str, end: &str, comparator: RangeComparator) -> bool {
    match comparator {
        RangeComparator::Eq => key == start,
        RangeComparator::Ne => key != start,
        RangeComparator::Lt => key < start,
        RangeComparator::Le => key <= start,
        RangeComparator::Gt => key > start,
        RangeComparator::Ge => key >= start,
        RangeComparator::Between => key >= start && key <= end,
    }
}

fn compare_numeric(key: &str, start: &str, end: &str, comparator: RangeComparator) -> bool {
    let Ok(key_n) = key.parse::<i64>() else {
        return false;
    };
    let start_n = start.parse::<i64>().unwrap_or(i64::MIN);
    let end_n = end.parse::<i64>().unwrap_or(i64::MAX);
    match comparator {
        RangeComparator::Eq => key_n == start_n,
        RangeComparator::Ne => key_n != start_n,
        RangeComparator::Lt => key_n < start_n,
        RangeComparator::Le => key_n <= start_n,
        RangeComparator::Gt => key_n > start_n,
        RangeComparator::Ge => key_n >= start_n,
        RangeComparator::Between => key_n >= start_n && key_n <= end_n,
    }
}

pub fn scan(
    dict: &TermDictionary,
    start: &str,
    end: &str,
    comparator: RangeComparator,
    numeric: bool,
    field_bitmap: Option<u64>,
) -> Result<Vec<TermInfo>> {
    validate(start, end, comparator, numeric)?;
    let seed = scan_seed(start, numeric);
    let within_window = |key: &str| -> bool {
        match comparator {
            RangeComparator::Lt | RangeComparator::Le | RangeComparator::Eq => true,
            _ => key.starts_with(seed.chars().next().unwrap_or_default()) || numeric,
        }
    };
    scan_collect(dict, &seed, field_bitmap, within_window, |key| {
        if numeric {
            compare_numeric(key, start, end, comparator)
        } else {
            compare_alpha(key, start, end, comparator)
        }
    })
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
    fn alpha_between_is_inclusive() {
        let dict = build_dict(&["ant", "bee", "cat", "dog"]);
        let results = scan(&dict, "ant", "cat", RangeComparator::Between, false, None).unwrap();
        let terms: Vec<&str> = results.iter().map(|r| r.term.as_str()).collect();
        assert_eq!(terms, vec!["ant", "bee", "cat"]);
    }

    #[test]
    fn numeric_range_parses_keys() {
        // Keys must be inserted in strictly ascending *byte* order ("10" <
        // "20" < "5" lexicographically), not ascending numeric order.
        let dict = build_dict(&["1", "10", "20", "5"]);
        let results = scan(&dict, "5", "10", RangeComparator::Between, true, None).unwrap();
        let terms: Vec<&str> = results.iter().map(|r| r.term.as_str()).collect();
        assert_eq!(terms, vec!["10", "5"]);
    }

    #[test]
    fn end_before_start_is_bad_range() {
        let dict = build_dict(&["a"]);
        assert!(matches!(
            scan(&dict, "z", "a", RangeComparator::Between, false, None),
            Err(FerretError::BadRange(_))
        ));
    }

    #[test]
    fn mixed_case_alpha_bound_is_bad_range() {
        let dict = build_dict(&["a"]);
        assert!(scan(&dict, "aBc", "", RangeComparator::Eq, false, None).is_err());
    }
}
