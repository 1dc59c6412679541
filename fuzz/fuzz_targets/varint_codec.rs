// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for varuint/varsint encoding/decoding.
//!
//! Varints underlie every on-disk record in this crate. If decode panics on
//! truncated or malformed input, every downstream store is unsafe to open.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok((value, consumed)) = ferret::codec::read_varuint(data, 0) {
        let mut reencoded = Vec::new();
        ferret::codec::write_varuint(value, &mut reencoded);
        let (redecoded, reconsumed) =
            ferret::codec::read_varuint(&reencoded, 0).expect("re-encoded varuint must decode");
        assert_eq!(value, redecoded);
        assert_eq!(reconsumed, reencoded.len());
        assert!(consumed <= data.len());
    }

    if let Ok((value, consumed)) = ferret::codec::read_varsint(data, 0) {
        let mut reencoded = Vec::new();
        ferret::codec::write_varsint(value, &mut reencoded);
        let (redecoded, reconsumed) =
            ferret::codec::read_varsint(&reencoded, 0).expect("re-encoded varsint must decode");
        assert_eq!(value, redecoded);
        assert_eq!(reconsumed, reencoded.len());
        assert!(consumed <= data.len());
    }
});
