//! Posting list algebra: merge operators over `(doc_id, term_pos, weight)`
//! streams (§4.6).
//!
//! Every operator takes a required primary list, an `Option`al secondary
//! list, and a [`BooleanPolicy`], and returns a freshly owned list; per the
//! build/query lifecycle in §3, operators never alias their inputs across
//! calls. Degenerate-operand handling (empty lists, stop terms,
//! non-required terms, and a missing/null secondary) is unified in
//! [`resolve_degenerate`] and [`resolve_missing_secondary`] so each merge
//! function only has to implement the non-degenerate case.

use crate::error::{FerretError, Result};
use crate::posting::{Posting, PostingList, TermType};

/// Constant multiplier applied when an emitted posting sits exactly one
/// position after the previous one in the same document (§9 open question:
/// hard-coded here, flagged as a future tunable).
pub const PROXIMITY_FACTOR: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanPolicy {
    Relaxed,
    Strict,
}

fn merged_term_type(a: TermType, b: TermType) -> TermType {
    if a == TermType::Stop && b == TermType::Stop {
        TermType::Stop
    } else {
        TermType::Unknown
    }
}

/// Collapse one non-empty / one-empty operand pair per the unified rule
/// in §4.6. Returns `None` when neither side should short-circuit (both
/// non-empty), meaning the caller should run the real merge.
fn resolve_degenerate(
    a: &PostingList,
    b: &PostingList,
    policy: BooleanPolicy,
) -> Option<PostingList> {
    match (a.is_empty(), b.is_empty()) {
        (false, false) => None,
        (false, true) => Some(resolve_one_empty(a, b, policy)),
        (true, false) => Some(resolve_one_empty(b, a, policy)),
        (true, true) => Some(PostingList::empty(
            merged_term_type(a.term_type, b.term_type),
            false,
        )),
    }
}

fn resolve_one_empty(non_empty: &PostingList, empty: &PostingList, policy: BooleanPolicy) -> PostingList {
    let keep_non_empty = match policy {
        BooleanPolicy::Strict => empty.term_type == TermType::Stop,
        BooleanPolicy::Relaxed => !empty.required,
    };
    if keep_non_empty {
        non_empty.clone()
    } else {
        PostingList::empty(merged_term_type(non_empty.term_type, empty.term_type), false)
    }
}

/// Resolve a missing ("null") secondary operand per the unified rule in
/// §4.6: under `Relaxed` a null peer behaves like a non-required empty
/// peer, returning `primary` untouched; under `Strict` there is no
/// exemption, so it falls back to the same empty-list rule every other
/// degenerate pair uses.
fn resolve_missing_secondary(primary: &PostingList, policy: BooleanPolicy) -> PostingList {
    match policy {
        BooleanPolicy::Relaxed => primary.clone(),
        BooleanPolicy::Strict => PostingList::empty(TermType::Unknown, false),
    }
}

/// Multiply the weight of every posting that lands exactly one position
/// after the previously emitted posting in the same document.
fn apply_proximity_reweight(postings: &mut [Posting]) {
    for i in 1..postings.len() {
        let (prev, cur) = (postings[i - 1], &mut postings[i]);
        if prev.doc_id == cur.doc_id && cur.term_pos == prev.term_pos + 1 {
            cur.weight *= PROXIMITY_FACTOR;
        }
    }
}

fn finish(term_type: TermType, required: bool, mut postings: Vec<Posting>) -> PostingList {
    postings.shrink_to_fit();
    let list = PostingList::new(term_type, required, postings);
    list.debug_assert_ordered();
    list
}

/// Document union: every posting from either side, weights untouched
/// except for proximity reweighting across the merged stream.
pub fn or(a: &PostingList, b: Option<&PostingList>, policy: BooleanPolicy) -> PostingList {
    let Some(b) = b else {
        return resolve_missing_secondary(a, policy);
    };
    if let Some(result) = resolve_degenerate(a, b, policy) {
        return result;
    }
    if a.required && b.required {
        return and(a, Some(b), policy);
    }
    if a.required != b.required {
        let (primary, secondary) = if a.required { (a, b) } else { (b, a) };
        return ior(primary, Some(secondary), policy);
    }
    let mut out = Vec::with_capacity(a.len() + b.len());
    merge_by_key(&a.postings, &b.postings, &mut out);
    apply_proximity_reweight(&mut out);
    finish(merged_term_type(a.term_type, b.term_type), false, out)
}

/// Inclusive OR restricted to `primary`'s document set.
pub fn ior(primary: &PostingList, secondary: Option<&PostingList>, policy: BooleanPolicy) -> PostingList {
    let Some(secondary) = secondary else {
        return resolve_missing_secondary(primary, policy);
    };
    if let Some(result) = resolve_degenerate(primary, secondary, policy) {
        return result;
    }
    let primary_docs: std::collections::HashSet<u32> =
        primary.postings.iter().map(|p| p.doc_id).collect();
    let filtered_secondary: Vec<Posting> = secondary
        .postings
        .iter()
        .copied()
        .filter(|p| primary_docs.contains(&p.doc_id))
        .collect();
    let mut out = Vec::with_capacity(primary.len() + filtered_secondary.len());
    merge_by_key(&primary.postings, &filtered_secondary, &mut out);
    apply_proximity_reweight(&mut out);
    finish(merged_term_type(primary.term_type, secondary.term_type), primary.required, out)
}

/// Postings whose `doc_id` occurs in exactly one of the two lists.
pub fn xor(a: &PostingList, b: Option<&PostingList>, policy: BooleanPolicy) -> PostingList {
    let Some(b) = b else {
        return resolve_missing_secondary(a, policy);
    };
    if let Some(result) = resolve_degenerate(a, b, policy) {
        return result;
    }
    let docs_a: std::collections::HashSet<u32> = a.postings.iter().map(|p| p.doc_id).collect();
    let docs_b: std::collections::HashSet<u32> = b.postings.iter().map(|p| p.doc_id).collect();
    let kept_a: Vec<Posting> = a
        .postings
        .iter()
        .copied()
        .filter(|p| !docs_b.contains(&p.doc_id))
        .collect();
    let kept_b: Vec<Posting> = b
        .postings
        .iter()
        .copied()
        .filter(|p| !docs_a.contains(&p.doc_id))
        .collect();
    let mut out = Vec::with_capacity(kept_a.len() + kept_b.len());
    merge_by_key(&kept_a, &kept_b, &mut out);
    apply_proximity_reweight(&mut out);
    finish(merged_term_type(a.term_type, b.term_type), false, out)
}

/// One posting per document present in both lists: `term_pos` is the last
/// matching position, weight is the sum of all participating postings'
/// weights, unconditionally boosted by the proximity factor when the last
/// two participating positions in that document are adjacent.
pub fn and(a: &PostingList, b: Option<&PostingList>, policy: BooleanPolicy) -> PostingList {
    let Some(b) = b else {
        return resolve_missing_secondary(a, policy);
    };
    if let Some(result) = resolve_degenerate(a, b, policy) {
        return result;
    }
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.postings.len() && j < b.postings.len() {
        let doc_id = a.postings[i].doc_id;
        if doc_id < b.postings[j].doc_id {
            i += 1;
            continue;
        }
        if doc_id > b.postings[j].doc_id {
            j += 1;
            continue;
        }
        // doc_id matches on both sides: gather every participating posting.
        let start_i = i;
        while i < a.postings.len() && a.postings[i].doc_id == doc_id {
            i += 1;
        }
        let start_j = j;
        while j < b.postings.len() && b.postings[j].doc_id == doc_id {
            j += 1;
        }
        let mut merged: Vec<Posting> = Vec::with_capacity((i - start_i) + (j - start_j));
        merged.extend_from_slice(&a.postings[start_i..i]);
        merged.extend_from_slice(&b.postings[start_j..j]);
        merged.sort_by_key(|p| p.term_pos);

        let total_weight: f32 = merged.iter().map(|p| p.weight).sum();
        let last_pos = merged.last().unwrap().term_pos;
        let adjacent = merged.len() >= 2 && {
            let second_last = merged[merged.len() - 2].term_pos;
            last_pos == second_last + 1
        };
        let weight = if adjacent {
            total_weight * PROXIMITY_FACTOR
        } else {
            total_weight
        };
        out.push(Posting::new(doc_id, last_pos, weight));
    }
    finish(merged_term_type(a.term_type, b.term_type), a.required || b.required, out)
}

/// Every posting of `primary` whose `doc_id` does not appear in `secondary`.
pub fn not(primary: &PostingList, secondary: Option<&PostingList>, policy: BooleanPolicy) -> PostingList {
    let Some(secondary) = secondary else {
        return resolve_missing_secondary(primary, policy);
    };
    if secondary.is_empty() {
        return primary.clone();
    }
    let docs_b: std::collections::HashSet<u32> = secondary.postings.iter().map(|p| p.doc_id).collect();
    let mut out: Vec<Posting> = primary
        .postings
        .iter()
        .copied()
        .filter(|p| !docs_b.contains(&p.doc_id))
        .collect();
    apply_proximity_reweight(&mut out);
    finish(primary.term_type, primary.required, out)
}

/// `B` immediately follows `A` at distance exactly `n` within the same
/// document (or either side is a positionless meta-match); emits `B`'s
/// posting with summed weight, unconditionally reweighted.
pub fn adj(a: &PostingList, b: Option<&PostingList>, n: u32, policy: BooleanPolicy) -> Result<PostingList> {
    if n == 0 {
        return Err(FerretError::InvalidTermDistance(0));
    }
    let Some(b) = b else {
        return Ok(resolve_missing_secondary(a, policy));
    };
    if let Some(result) = resolve_degenerate(a, b, policy) {
        return Ok(result);
    }
    let mut out = Vec::with_capacity(a.len().max(b.len()));
    for pa in &a.postings {
        for pb in &b.postings {
            if pb.doc_id != pa.doc_id {
                continue;
            }
            let matches = (pa.is_meta() || pb.is_meta())
                || pb.term_pos == pa.term_pos + n;
            if matches {
                let weight = (pa.weight + pb.weight) * PROXIMITY_FACTOR;
                out.push(Posting::new(pb.doc_id, pb.term_pos, weight));
            }
        }
    }
    out.sort_by_key(|p| (p.doc_id, p.term_pos));
    Ok(finish(merged_term_type(a.term_type, b.term_type), a.required || b.required, out))
}

/// `|pos(B) − pos(A)| ≤ |d|`; when `ordered`, the sign of `d` fixes which
/// side must come first. Emits the later posting in the satisfied order,
/// with summed, unconditionally reweighted weight.
pub fn near(a: &PostingList, b: Option<&PostingList>, d: i32, ordered: bool, policy: BooleanPolicy) -> Result<PostingList> {
    if d == 0 {
        return Err(FerretError::InvalidTermDistance(0));
    }
    let Some(b) = b else {
        return Ok(resolve_missing_secondary(a, policy));
    };
    if let Some(result) = resolve_degenerate(a, b, policy) {
        return Ok(result);
    }
    let max_dist = d.unsigned_abs();
    let mut out = Vec::with_capacity(a.len().max(b.len()));
    for pa in &a.postings {
        for pb in &b.postings {
            if pb.doc_id != pa.doc_id {
                continue;
            }
            let dist = (pb.term_pos as i64 - pa.term_pos as i64).unsigned_abs();
            if dist > max_dist as u64 {
                continue;
            }
            if ordered {
                let a_before_b = pa.term_pos < pb.term_pos;
                if d > 0 && !a_before_b {
                    continue;
                }
                if d < 0 && a_before_b {
                    continue;
                }
            }
            let later = if d < 0 && ordered { pa } else if pb.term_pos >= pa.term_pos { pb } else { pa };
            let weight = (pa.weight + pb.weight) * PROXIMITY_FACTOR;
            out.push(Posting::new(later.doc_id, later.term_pos, weight));
        }
    }
    out.sort_by_key(|p| (p.doc_id, p.term_pos));
    Ok(finish(merged_term_type(a.term_type, b.term_type), a.required || b.required, out))
}

/// Merge two already-sorted posting slices by `(doc_id, term_pos)`.
fn merge_by_key(a: &[Posting], b: &[Posting], out: &mut Vec<Posting>) {
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if (a[i].doc_id, a[i].term_pos) <= (b[j].doc_id, b[j].term_pos) {
            out.push(a[i]);
            i += 1;
        } else {
            out.push(b[j]);
            j += 1;
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(term_type: TermType, required: bool, postings: Vec<(u32, u32, f32)>) -> PostingList {
        PostingList::new(
            term_type,
            required,
            postings
                .into_iter()
                .map(|(d, p, w)| Posting::new(d, p, w))
                .collect(),
        )
    }

    #[test]
    fn scenario_or_relaxed() {
        let a = list(TermType::Regular, false, vec![(1, 1, 1.0), (2, 1, 1.0)]);
        let b = list(TermType::Regular, false, vec![(2, 2, 1.0), (3, 1, 1.0)]);
        let result = or(&a, Some(&b), BooleanPolicy::Relaxed);
        assert_eq!(result.document_count, 3);
        assert_eq!(result.term_count, 4);
        let boosted = result.postings.iter().find(|p| p.doc_id == 2 && p.term_pos == 2).unwrap();
        assert_eq!(boosted.weight, 3.0);
    }

    #[test]
    fn scenario_and_with_proximity() {
        let a = list(TermType::Regular, false, vec![(5, 10, 1.0)]);
        let b = list(TermType::Regular, false, vec![(5, 11, 1.0)]);
        let result = and(&a, Some(&b), BooleanPolicy::Relaxed);
        assert_eq!(result.postings, vec![Posting::new(5, 11, 6.0)]);
    }

    #[test]
    fn scenario_adj_one() {
        let a = list(TermType::Regular, false, vec![(1, 3, 1.0), (2, 7, 1.0)]);
        let b = list(TermType::Regular, false, vec![(1, 4, 1.0), (2, 9, 1.0)]);
        let result = adj(&a, Some(&b), 1, BooleanPolicy::Relaxed).unwrap();
        assert_eq!(result.postings, vec![Posting::new(1, 4, 6.0)]);
    }

    #[test]
    fn scenario_near_ordered() {
        let a = list(TermType::Regular, false, vec![(1, 10, 1.0)]);
        let b = list(TermType::Regular, false, vec![(1, 8, 1.0), (1, 12, 1.0)]);
        let result = near(&a, Some(&b), 2, true, BooleanPolicy::Relaxed).unwrap();
        assert_eq!(result.postings, vec![Posting::new(1, 12, 6.0)]);
    }

    #[test]
    fn not_with_empty_secondary_is_identity() {
        let a = list(TermType::Regular, false, vec![(1, 1, 1.0)]);
        let empty = PostingList::empty(TermType::Unknown, false);
        let result = not(&a, Some(&empty), BooleanPolicy::Strict);
        assert_eq!(result.postings, a.postings);
    }

    #[test]
    fn or_under_strict_with_empty_stop_is_identity() {
        let a = list(TermType::Regular, false, vec![(1, 1, 1.0)]);
        let stop = PostingList::empty(TermType::Stop, false);
        let result = or(&a, Some(&stop), BooleanPolicy::Strict);
        assert_eq!(result.postings, a.postings);
    }

    #[test]
    fn and_with_empty_non_required_under_relaxed_is_identity() {
        let a = list(TermType::Regular, false, vec![(1, 1, 1.0)]);
        let empty = PostingList::empty(TermType::Unknown, false);
        let result = and(&a, Some(&empty), BooleanPolicy::Relaxed);
        assert_eq!(result.postings, a.postings);
    }

    #[test]
    fn or_is_commutative_on_doc_term_pos_multiset() {
        let a = list(TermType::Regular, false, vec![(1, 1, 1.0), (3, 5, 2.0)]);
        let b = list(TermType::Regular, false, vec![(2, 2, 1.0)]);
        let ab = or(&a, Some(&b), BooleanPolicy::Relaxed);
        let ba = or(&b, Some(&a), BooleanPolicy::Relaxed);
        let keys = |l: &PostingList| l.postings.iter().map(|p| (p.doc_id, p.term_pos)).collect::<Vec<_>>();
        assert_eq!(keys(&ab), keys(&ba));
    }

    #[test]
    fn or_aliases_to_and_when_both_required() {
        let a = list(TermType::Regular, true, vec![(5, 10, 1.0)]);
        let b = list(TermType::Regular, true, vec![(5, 11, 1.0)]);
        let result = or(&a, Some(&b), BooleanPolicy::Relaxed);
        assert_eq!(result.postings, vec![Posting::new(5, 11, 6.0)]);
    }

    #[test]
    fn null_secondary_under_relaxed_is_identity_on_every_operator() {
        let a = list(TermType::Regular, false, vec![(1, 1, 1.0)]);
        assert_eq!(or(&a, None, BooleanPolicy::Relaxed).postings, a.postings);
        assert_eq!(ior(&a, None, BooleanPolicy::Relaxed).postings, a.postings);
        assert_eq!(xor(&a, None, BooleanPolicy::Relaxed).postings, a.postings);
        assert_eq!(and(&a, None, BooleanPolicy::Relaxed).postings, a.postings);
        assert_eq!(not(&a, None, BooleanPolicy::Relaxed).postings, a.postings);
        assert_eq!(adj(&a, None, 1, BooleanPolicy::Relaxed).unwrap().postings, a.postings);
        assert_eq!(near(&a, None, 1, false, BooleanPolicy::Relaxed).unwrap().postings, a.postings);
    }

    #[test]
    fn null_secondary_under_strict_is_empty_on_every_operator() {
        let a = list(TermType::Regular, false, vec![(1, 1, 1.0)]);
        assert!(or(&a, None, BooleanPolicy::Strict).is_empty());
        assert!(ior(&a, None, BooleanPolicy::Strict).is_empty());
        assert!(xor(&a, None, BooleanPolicy::Strict).is_empty());
        assert!(and(&a, None, BooleanPolicy::Strict).is_empty());
        assert!(not(&a, None, BooleanPolicy::Strict).is_empty());
        assert!(adj(&a, None, 1, BooleanPolicy::Strict).unwrap().is_empty());
        assert!(near(&a, None, 1, false, BooleanPolicy::Strict).unwrap().is_empty());
    }
}
