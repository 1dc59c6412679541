//! Posting-list algebra exercised through the crate's public API.

use ferret::{and, near, not, or, BooleanPolicy, Posting, PostingList, TermType};

fn list(postings: Vec<Posting>) -> PostingList {
    PostingList::new(TermType::Regular, true, postings)
}

#[test]
fn or_is_commutative_on_the_doc_term_pos_multiset() {
    let a = list(vec![Posting::new(1, 1, 1.0), Posting::new(2, 1, 1.0)]);
    let b = list(vec![Posting::new(2, 1, 1.0), Posting::new(3, 1, 1.0)]);

    let ab = or(&a, Some(&b), BooleanPolicy::Relaxed);
    let ba = or(&b, Some(&a), BooleanPolicy::Relaxed);

    let keys = |pl: &PostingList| -> Vec<(u32, u32)> {
        pl.postings.iter().map(|p| (p.doc_id, p.term_pos)).collect()
    };
    assert_eq!(keys(&ab), keys(&ba));
}

#[test]
fn and_only_keeps_documents_present_in_both_operands() {
    let a = list(vec![
        Posting::new(1, 1, 1.0),
        Posting::new(2, 1, 1.0),
        Posting::new(3, 1, 1.0),
    ]);
    let b = list(vec![Posting::new(2, 5, 1.0), Posting::new(3, 5, 1.0)]);

    let result = and(&a, Some(&b), BooleanPolicy::Relaxed);
    let docs: Vec<u32> = result.postings.iter().map(|p| p.doc_id).collect();
    assert_eq!(docs, vec![2, 3]);
}

#[test]
fn not_removes_documents_present_in_the_secondary() {
    let a = list(vec![
        Posting::new(1, 1, 1.0),
        Posting::new(2, 1, 1.0),
        Posting::new(3, 1, 1.0),
    ]);
    let b = list(vec![Posting::new(2, 1, 1.0)]);

    let result = not(&a, Some(&b), BooleanPolicy::Relaxed);
    let docs: Vec<u32> = result.postings.iter().map(|p| p.doc_id).collect();
    assert_eq!(docs, vec![1, 3]);
}

#[test]
fn not_with_no_secondary_is_the_identity() {
    let a = list(vec![Posting::new(1, 1, 1.0), Posting::new(2, 1, 1.0)]);
    let result = not(&a, None, BooleanPolicy::Relaxed);
    assert_eq!(result.postings, a.postings);
}

#[test]
fn near_requires_both_documents_within_distance() {
    let a = list(vec![Posting::new(1, 2, 1.0)]);
    let b = list(vec![Posting::new(1, 5, 1.0)]);

    let close = near(&a, Some(&b), 3, false, BooleanPolicy::Relaxed).unwrap();
    assert_eq!(close.postings.len(), 1);

    let far = near(&a, Some(&b), 1, false, BooleanPolicy::Relaxed).unwrap();
    assert!(far.postings.is_empty());
}
