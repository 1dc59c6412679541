//! Term dictionary and key dictionary (§4.4, §3 Key dictionary).
//!
//! Both are ordered string-keyed maps; the term dictionary stores the
//! term record bytes described in §3, the key dictionary maps an external
//! document key to its internal `doc_id`. Both are built by a single
//! strictly-ascending insertion pass and then queried read-only, matching
//! the build/search split in §5.

pub mod key;
pub mod term;

pub use key::KeyDictionary;
pub use term::{ScanControl, TermDictionary, TermRecord};
