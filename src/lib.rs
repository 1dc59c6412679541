//! Inverted-index full-text search: posting-list algebra, term-dictionary
//! matching, on-disk record stores, and the short-result sort/splice
//! stage.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────┐   ┌────────────┐
//! │   ingest    │──▶│  build (E,F) │──▶│  document  │
//! │ (stream →   │   │ term dict +  │   │   store    │
//! │  documents) │   │ doc store    │   │  (B + C)   │
//! └─────────────┘   └──────────────┘   └────────────┘
//!                           │
//!                           ▼
//! ┌─────────────┐   ┌──────────────┐   ┌────────────┐
//! │   matcher   │──▶│   algebra    │──▶│ shortresult│
//! │ (dict scan) │   │ (AND/OR/...) │   │ (sort/    │
//! │             │   │              │   │  splice)  │
//! └─────────────┘   └──────────────┘   └────────────┘
//! ```
//!
//! Query time: a parsed term resolves to zero or more [`matcher::TermInfo`]
//! via the term dictionary, each of which expands into a [`posting::PostingList`];
//! [`algebra`] combines lists per the query tree, the final list is
//! projected into [`shortresult::ShortResult`]s and sorted/spliced for the
//! caller's result window. Build time: [`ingest`] drives [`build`], which
//! populates the term dictionary and the document store.
//!
//! Language tokenizers, stemmers, stop-list policy, the session/search
//! façade, report/cache stores, and CLI/packaging are external
//! collaborators — this crate only does the inverted-index core.

pub mod algebra;
pub mod arena;
pub mod build;
pub mod codec;
pub mod dict;
pub mod document;
pub mod error;
pub mod ingest;
pub mod matcher;
pub mod posting;
pub mod shortresult;
pub mod store;
mod utils;

pub use algebra::{adj, and, near, not, or, xor, BooleanPolicy};
pub use dict::{KeyDictionary, TermDictionary};
pub use document::{DocumentData, DocumentItem, DocumentStore};
pub use error::{FerretError, Result};
pub use matcher::{match_terms, MatchMode, TermInfo};
pub use posting::{Posting, PostingList, TermType};
pub use shortresult::{ShortResult, SortKey, SortType};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::build_from_stream;

    #[test]
    fn end_to_end_build_then_query() {
        let stream = "\
V 1 0
K doc1
T rust 1 1
T search 2 1
E
K doc2
T rust 1 1
E
Z";
        let index = build_from_stream(stream).unwrap();
        let info = match_terms(&index.term_dict, "rust", &MatchMode::Regular, None).unwrap();
        assert_eq!(info.len(), 1);
        assert_eq!(info[0].document_count, 2);
    }
}
