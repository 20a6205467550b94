//! Test utilities shared across unit tests, integration tests and benches.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use crate::config::ScoringConfig;
use crate::document::{MemoryDocument, MemorySegment};
use crate::error::ConfigError;
use crate::params::ParamMap;
use crate::plan::ScoringPlan;

/// Build request parameters from `(name, value)` pairs.
pub fn params(pairs: &[(&str, &str)]) -> ParamMap {
    pairs.iter().copied().collect()
}

/// Plan a query from `(name, value)` pairs with the default config.
pub fn plan_for(pairs: &[(&str, &str)]) -> Result<ScoringPlan, ConfigError> {
    ScoringPlan::from_params(&params(pairs), &ScoringConfig::default())
}

/// A product with an id and numeric attributes.
pub fn product(id: &str, numbers: &[(&str, f64)]) -> MemoryDocument {
    numbers
        .iter()
        .fold(MemoryDocument::new().with_str("id", id), |doc, (field, value)| {
            doc.with_num(field, *value)
        })
}

/// Deterministic pseudo-random catalogue of `count` products.
///
/// Values come from a fixed LCG, so the same `seed` always yields the same
/// catalogue.
pub fn synthetic_segment(count: usize, seed: u64) -> MemorySegment {
    const FILLERS: [&str; 4] = ["glass", "talc", "mineral", "carbon"];

    let mut state = seed;
    let mut next = move || {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (state >> 33) as u32
    };

    let docs = (0..count)
        .map(|i| {
            let mut doc = product(
                &format!("P{}", i),
                &[
                    ("rep_mfr", f64::from(next() % 400) / 10.0),
                    ("rep_mvr", f64::from(next() % 300) / 10.0),
                    ("rep_density", 0.9 + f64::from(next() % 60) / 100.0),
                    ("rep_fr", f64::from(next() % 3)),
                ],
            );
            // One product in five has no filler
            match next() % 5 {
                0 => {}
                n => {
                    doc = doc
                        .with_str("fillers", FILLERS[(n - 1) as usize])
                        .with_str("fillersContent", &format!("{}", 10 * (next() % 5)));
                }
            }
            doc
        })
        .collect();

    MemorySegment::new(docs)
}

/// The first `max` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    let end = text.char_indices().nth(max).map_or(text.len(), |(i, _)| i);
    &text[..end]
}
