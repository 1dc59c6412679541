//! Index-build pipeline: drives a parsed stream into the on-disk stores
//! (§2 "data flow during build").
//!
//! One build owns stores B/C/E exclusively and appends only, per the
//! shared-resource policy in §5 — nothing here is safe to run
//! concurrently with a reader or another build over the same directory,
//! which is what the `lock` sentinel file is for.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use crate::arena;
use crate::dict::{KeyDictionary, TermDictionary};
use crate::dict::term::TermRecord;
use crate::document::{DocumentData, DocumentItem};
use crate::error::{FerretError, Result};
use crate::ingest::{IngestParser, ParsedDocument};
use crate::posting::{encode_postings, Posting, TermType};
use crate::store::BlobStore;

use crate::document::DocumentStore;

pub struct BuiltIndex {
    pub documents: DocumentStore,
    pub term_dict: TermDictionary,
    pub key_dict: KeyDictionary,
    pub index_data: BlobStore,
}

/// Parse `stream` (the §4.8 grammar, already fully materialized in
/// memory) and build an in-memory index. Errors abort the build
/// immediately, matching §4.8's "errors propagate immediately" rule.
pub fn build_from_stream(stream: &str) -> Result<BuiltIndex> {
    let mut parser = IngestParser::new();
    for line in stream.lines() {
        parser.feed_line(line)?;
    }
    if !parser.finished {
        return Err(FerretError::InvalidStreamEndTag);
    }
    build_from_documents(&parser.documents)
}

/// Build directly from already-parsed documents, bypassing the stream
/// grammar — used by tests and by embedders who already have structured
/// documents in hand.
pub fn build_from_documents(docs: &[ParsedDocument]) -> Result<BuiltIndex> {
    let mut documents = DocumentStore::new();
    let mut key_dict = KeyDictionary::new();
    let mut index_data = BlobStore::new();
    let mut term_dict = TermDictionary::new();

    // Invert: term -> postings, built as (doc_id, term_pos) pairs so the
    // final per-term lists satisfy the ordering contract of §3.
    let mut inverted: BTreeMap<String, Vec<Posting>> = BTreeMap::new();

    for doc in docs {
        let key = doc
            .key
            .clone()
            .ok_or_else(|| FerretError::InvalidDocumentKey("document missing K tag".into()))?;

        let data = DocumentData {
            title: doc.title.clone().unwrap_or_default(),
            doc_key: key.clone(),
            items: Vec::<DocumentItem>::new(),
        };
        let doc_id = documents.append(&data, doc.rank, doc.term_count, 0, 1);
        key_dict.insert(&key, doc_id)?;

        for (term, term_pos, _field_id) in &doc.terms {
            inverted
                .entry(term.clone())
                .or_default()
                .push(Posting::new(doc_id, *term_pos, 1.0));
        }
    }

    for (term, mut postings) in inverted {
        postings.sort_by_key(|p| (p.doc_id, p.term_pos));
        let document_count = {
            let mut count = 0u32;
            let mut last = None;
            for p in &postings {
                if last != Some(p.doc_id) {
                    count += 1;
                    last = Some(p.doc_id);
                }
            }
            count
        };
        let term_count = postings.len() as u32;

        // Stage the encoded posting block in the thread-local arena before
        // copying it into the permanent blob store (§5: transient
        // per-build buffers live in the arena, released en bloc below).
        let encoded = arena::with_arena(|a| a.chunk(a.alloc_bytes(&encode_postings(&postings))));
        let index_block_id = index_data.append(&encoded);

        let record = TermRecord {
            term_type: TermType::Regular,
            term_count,
            document_count,
            index_block_id,
            field_ids: vec![],
        };
        term_dict.insert(&term, record.encode())?;
    }

    arena::reset_arena();

    Ok(BuiltIndex {
        documents,
        term_dict,
        key_dict,
        index_data,
    })
}

const LOCK_FILE: &str = "lock";
const DOCUMENT_TABLE_FILE: &str = "document-table";
const DOCUMENT_DATA_FILE: &str = "document-data";
const TERM_DICTIONARY_FILE: &str = "term-dictionary";
const KEY_DICTIONARY_FILE: &str = "key-dictionary";
const INDEX_DATA_FILE: &str = "index-data";

impl BuiltIndex {
    /// Write every on-disk file named in §6's layout, holding the `lock`
    /// sentinel for the duration of the write.
    pub fn write_to_dir(&self, dir: &Path) -> io::Result<()> {
        fs::create_dir_all(dir)?;
        let lock_path = dir.join(LOCK_FILE);
        if lock_path.exists() {
            return Err(io::Error::new(io::ErrorKind::AlreadyExists, "index lock is held"));
        }
        fs::write(&lock_path, b"")?;

        let result = (|| -> io::Result<()> {
            self.documents.write_table_to(&dir.join(DOCUMENT_TABLE_FILE))?;
            self.documents.write_blobs_to(&dir.join(DOCUMENT_DATA_FILE))?;
            fs::write(dir.join(TERM_DICTIONARY_FILE), self.term_dict.to_bytes())?;
            fs::write(dir.join(KEY_DICTIONARY_FILE), self.key_dict.to_bytes())?;
            fs::write(dir.join(INDEX_DATA_FILE), self.index_data.to_bytes())?;
            Ok(())
        })();

        fs::remove_file(&lock_path)?;
        result
    }

    pub fn open_from_dir(dir: &Path) -> Result<Self> {
        let lock_path = dir.join(LOCK_FILE);
        if lock_path.exists() {
            return Err(FerretError::LockHeld);
        }
        let documents = DocumentStore::read_from_dir(
            &dir.join(DOCUMENT_TABLE_FILE),
            &dir.join(DOCUMENT_DATA_FILE),
        )?;
        let term_dict = TermDictionary::from_bytes(&fs::read(dir.join(TERM_DICTIONARY_FILE))?)?;
        let key_dict = KeyDictionary::from_bytes(&fs::read(dir.join(KEY_DICTIONARY_FILE))?)?;
        let index_data = BlobStore::from_bytes(&fs::read(dir.join(INDEX_DATA_FILE))?)?;
        Ok(Self {
            documents,
            term_dict,
            key_dict,
            index_data,
        })
    }
}
