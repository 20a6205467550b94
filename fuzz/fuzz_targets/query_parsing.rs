// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for query token parsing.
//!
//! The `q` parameter comes straight from users. Whatever bytes arrive, the
//! parser must skip what it cannot read and keep the rest: no panics, no empty
//! field names, no whitespace inside a field name, and every id multiplier
//! finite.

#![no_main]

use altrank::query::{parse_query_with, parse_weighted_fields};
use altrank::testing::truncate_chars;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: &[u8]| {
    let text = String::from_utf8_lossy(input);
    let text = truncate_chars(&text, 512);

    let mut skipped = 0usize;
    let attributes = parse_query_with(&[text], |_| skipped += 1);

    for key in attributes.keys() {
        assert!(!key.is_empty(), "empty field name from {:?}", text);
        assert!(!key.contains(char::is_whitespace), "whitespace in {:?}", key);
    }
    if let Some(ids) = attributes.ids() {
        for boost in ids {
            assert!(boost.multiplier.is_finite(), "multiplier {}", boost.multiplier);
        }
    }
    assert!(attributes.len() + skipped <= text.split_whitespace().count());

    let weighted = parse_weighted_fields(&[text]);
    for field in weighted.iter() {
        assert!(!field.is_empty());
        assert!(!field.contains(','));
    }
});
