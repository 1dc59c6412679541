//! Writing an index to disk and reopening it yields the same data.

use ferret::{match_terms, MatchMode};

use crate::common::index_from_stream;

const STREAM: &str = "\
V 1 0
K doc1
H Alpha
T sun 1 1
T moon 2 1
E
K doc2
H Beta
T sun 1 1
E
Z";

#[test]
fn reopened_index_answers_the_same_query() {
    let index = index_from_stream(STREAM);
    let dir = tempfile::tempdir().unwrap();
    index.write_to_dir(dir.path()).unwrap();

    let reopened = ferret::build::BuiltIndex::open_from_dir(dir.path()).unwrap();
    let info = match_terms(&reopened.term_dict, "sun", &MatchMode::Regular, None).unwrap();
    assert_eq!(info[0].document_count, 2);

    let doc_id = reopened.key_dict.lookup("doc2").unwrap();
    assert_eq!(reopened.documents.data(doc_id).unwrap().title, "Beta");
}

#[test]
fn lock_file_is_removed_after_a_successful_write() {
    let index = index_from_stream(STREAM);
    let dir = tempfile::tempdir().unwrap();
    index.write_to_dir(dir.path()).unwrap();
    assert!(!dir.path().join("lock").exists());
}
