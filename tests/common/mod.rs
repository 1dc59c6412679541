//! Shared fixtures for integration tests.

#![allow(dead_code)]

use ferret::build::{build_from_stream, BuiltIndex};
use ferret::posting::Posting;

/// Build an index from an inline stream-ingest document, panicking on any
/// grammar or build error (tests want the assertion to fail loudly).
pub fn index_from_stream(stream: &str) -> BuiltIndex {
    build_from_stream(stream).expect("stream should build cleanly")
}

/// Decode the posting list stored for `term`, panicking if it is absent.
pub fn postings_for(index: &BuiltIndex, term: &str) -> Vec<Posting> {
    let record = index.term_dict.lookup_record(term).expect("term present");
    let bytes = index
        .index_data
        .read(record.index_block_id)
        .expect("index block present");
    ferret::posting::decode_postings(bytes).expect("postings decode")
}
