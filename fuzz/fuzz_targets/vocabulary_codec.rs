// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for term-record encoding/decoding (§3 term-dictionary record).
//!
//! `TermRecord::decode` reads attacker-controlled bytes straight off disk
//! when a term dictionary is reopened; it must never panic, and any record
//! it successfully decodes must re-encode to something that decodes back
//! to the same value.

#![no_main]

use libfuzzer_sys::fuzz_target;

use ferret::dict::term::TermRecord;

fuzz_target!(|data: &[u8]| {
    if let Ok(record) = TermRecord::decode(data) {
        let reencoded = record.encode();
        let redecoded = TermRecord::decode(&reencoded).expect("re-encoded record must decode");
        assert_eq!(record, redecoded);
    }
});
