// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary store parsing under adversarial input (§6 on-disk layout).
//!
//! If a table-store or blob-store file is truncated, corrupted, or
//! outright hostile, `from_bytes` must return `Err`, never panic — this is
//! the first thing that runs when an index directory is opened.

#![no_main]

use libfuzzer_sys::fuzz_target;

use ferret::store::{BlobStore, TableStore};

fuzz_target!(|data: &[u8]| {
    if let Ok(table) = TableStore::from_bytes(data) {
        let reencoded = table.to_bytes();
        let reparsed = TableStore::from_bytes(&reencoded).expect("re-encoded table must parse");
        assert_eq!(table.len(), reparsed.len());
    }

    if let Ok(blobs) = BlobStore::from_bytes(data) {
        let reencoded = blobs.to_bytes();
        let reparsed = BlobStore::from_bytes(&reencoded).expect("re-encoded blob store must parse");
        assert_eq!(blobs.len(), reparsed.len());
    }
});
