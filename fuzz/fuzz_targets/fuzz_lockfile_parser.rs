//! Fuzz target for lockfile decoding and normalization.
//!
//! Goal: decoding plus flattening should **never panic** on any input,
//! including deeply nested v1 dependency trees.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_lockfile_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Lockfiles are JSON, so only UTF-8 input is interesting.
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = lockguard_repo::fuzz::parse_lockfile(text);
    }
});
