//! Posting and posting-list types (§3 Data model).
//!
//! A [`Posting`] is one occurrence of a term. `term_pos == 0` denotes a
//! meta-term without a location — it cannot participate in `ADJ`/`NEAR`,
//! whose proximity tests are only meaningful between real positions.
//! Within a document, postings appear in non-decreasing `term_pos` order;
//! a [`PostingList`] is ordered first by `doc_id`, then by `term_pos`.

use serde::{Deserialize, Serialize};

use crate::codec::{read_u32_be, write_u32_be};
use crate::error::Result;

/// Classification of a posting list's source term, used to resolve
/// degenerate operands in the algebra (§4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TermType {
    Regular,
    Stop,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: u32,
    pub term_pos: u32,
    pub weight: f32,
}

impl Posting {
    pub fn new(doc_id: u32, term_pos: u32, weight: f32) -> Self {
        Self {
            doc_id,
            term_pos,
            weight,
        }
    }

    /// A positionless meta-term occurrence, ineligible for ADJ/NEAR.
    pub fn is_meta(&self) -> bool {
        self.term_pos == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostingList {
    pub term_type: TermType,
    pub term_count: u32,
    pub document_count: u32,
    pub required: bool,
    pub postings: Vec<Posting>,
}

impl PostingList {
    /// A non-empty list built from already-ordered postings.
    pub fn new(term_type: TermType, required: bool, postings: Vec<Posting>) -> Self {
        let term_count = postings.len() as u32;
        let document_count = count_distinct_docs(&postings);
        Self {
            term_type,
            term_count,
            document_count,
            required,
            postings,
        }
    }

    /// An empty list. Per §3, an empty `Stop` list is propagated
    /// (meaningful under `Strict`); any other empty list degenerates to
    /// `Unknown`.
    pub fn empty(term_type: TermType, required: bool) -> Self {
        let term_type = match term_type {
            TermType::Stop => TermType::Stop,
            _ => TermType::Unknown,
        };
        Self {
            term_type,
            term_count: 0,
            document_count: 0,
            required,
            postings: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    /// Recompute `term_count`/`document_count` from the current postings.
    /// Called after every algebra operator emits its final buffer (§4.6
    /// "invariants enforced on emit").
    pub fn recompute_counts(&mut self) {
        self.term_count = self.postings.len() as u32;
        self.document_count = count_distinct_docs(&self.postings);
    }

    /// Debug-only check that the ordering contract of §3 still holds:
    /// non-decreasing `(doc_id, term_pos)` across the whole list.
    pub fn debug_assert_ordered(&self) {
        debug_assert!(
            self.postings.windows(2).all(|w| {
                (w[0].doc_id, w[0].term_pos) <= (w[1].doc_id, w[1].term_pos)
            }),
            "posting list violated (doc_id, term_pos) ordering contract"
        );
    }
}

/// Encode postings for an index-data block: fixed-width fields, one
/// posting after another. Simple over clever — the on-disk record format
/// for posting blocks is not specified beyond "referenced by
/// `index_block_id`" (§6), so this just needs to round-trip.
pub fn encode_postings(postings: &[Posting]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(postings.len() * 12);
    for p in postings {
        write_u32_be(p.doc_id, &mut buf);
        write_u32_be(p.term_pos, &mut buf);
        write_u32_be(p.weight.to_bits(), &mut buf);
    }
    buf
}

pub fn decode_postings(bytes: &[u8]) -> Result<Vec<Posting>> {
    let mut out = Vec::with_capacity(bytes.len() / 12);
    let mut pos = 0;
    while pos < bytes.len() {
        let doc_id = read_u32_be(bytes, pos)?;
        let term_pos = read_u32_be(bytes, pos + 4)?;
        let weight = f32::from_bits(read_u32_be(bytes, pos + 8)?);
        out.push(Posting::new(doc_id, term_pos, weight));
        pos += 12;
    }
    Ok(out)
}

fn count_distinct_docs(postings: &[Posting]) -> u32 {
    let mut count = 0u32;
    let mut last: Option<u32> = None;
    for p in postings {
        if last != Some(p.doc_id) {
            count += 1;
            last = Some(p.doc_id);
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stop_list_stays_stop() {
        let l = PostingList::empty(TermType::Stop, false);
        assert_eq!(l.term_type, TermType::Stop);
        assert!(l.is_empty());
    }

    #[test]
    fn empty_regular_list_becomes_unknown() {
        let l = PostingList::empty(TermType::Regular, false);
        assert_eq!(l.term_type, TermType::Unknown);
    }

    #[test]
    fn posting_block_encode_decode_roundtrip() {
        let postings = vec![Posting::new(1, 1, 1.0), Posting::new(2, 5, 3.25)];
        let decoded = decode_postings(&encode_postings(&postings)).unwrap();
        assert_eq!(decoded, postings);
    }

    #[test]
    fn document_count_counts_distinct_docs() {
        let postings = vec![
            Posting::new(1, 1, 1.0),
            Posting::new(1, 2, 1.0),
            Posting::new(2, 1, 1.0),
        ];
        let list = PostingList::new(TermType::Regular, true, postings);
        assert_eq!(list.document_count, 2);
        assert_eq!(list.term_count, 3);
    }
}
