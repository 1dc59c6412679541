//! Build a small index from a stream and query it back out.

use ferret::{match_terms, MatchMode};

use crate::common::{index_from_stream, postings_for};

const STREAM: &str = "\
V 1 0
N demo-index
F title 1 text defaults
K doc1
H First document
R 10
T rust 1 1
T search 2 1
T engine 3 1
E
K doc2
H Second document
R 5
T rust 1 1
T index 2 1
E
K doc3
H Third document
R 1
T index 1 1
E
Z";

#[test]
fn regular_lookup_returns_document_count() {
    let index = index_from_stream(STREAM);

    let info = match_terms(&index.term_dict, "rust", &MatchMode::Regular, None).unwrap();
    assert_eq!(info.len(), 1);
    assert_eq!(info[0].document_count, 2);
    assert_eq!(info[0].term_count, 2);

    let postings = postings_for(&index, "rust");
    assert_eq!(postings.len(), 2);
    assert_eq!(postings[0].doc_id, 1);
    assert_eq!(postings[1].doc_id, 2);
}

#[test]
fn unknown_term_is_not_found() {
    let index = index_from_stream(STREAM);
    assert!(match_terms(&index.term_dict, "missing", &MatchMode::Regular, None).is_err());
}

#[test]
fn key_dictionary_resolves_document_ids() {
    let index = index_from_stream(STREAM);
    assert_eq!(index.key_dict.lookup("doc1").unwrap(), 1);
    assert_eq!(index.key_dict.lookup("doc2").unwrap(), 2);
    assert_eq!(index.key_dict.lookup("doc3").unwrap(), 3);
    assert!(index.key_dict.lookup("doc4").is_err());
}

#[test]
fn document_store_preserves_title_and_rank() {
    let index = index_from_stream(STREAM);
    let doc_id = index.key_dict.lookup("doc2").unwrap();
    let data = index.documents.data(doc_id).unwrap();
    assert_eq!(data.title, "Second document");
    let row = index.documents.row(doc_id).unwrap();
    assert_eq!(row.rank, 5);
}

#[test]
fn wildcard_scan_matches_prefix() {
    let index = index_from_stream(STREAM);
    let info = match_terms(
        &index.term_dict,
        "in*",
        &MatchMode::Wildcard {
            allow_leading_wildcard: false,
        },
        None,
    )
    .unwrap();
    assert_eq!(info.len(), 1);
    assert_eq!(info[0].term, "index");
}
