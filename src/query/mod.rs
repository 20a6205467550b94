// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Turning request parameters into per-query maps.
//!
//! `q` goes through the lenient tokenizer, `sub.*` through the strict
//! tolerance extractor, `wg.f` through the field-list splitter. Nothing here
//! touches documents.

mod tokens;
mod tolerance;

pub use tokens::{parse_id_boost, parse_query, parse_query_with, SkipReason, SkippedToken};
pub use tolerance::{extract_tolerances, parse_tolerance, parse_weighted_fields};
