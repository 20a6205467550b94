// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-field tolerances and the weighted-bonus field list.
//!
//! A field only takes part in similarity scoring when the request carries a
//! `sub.<field>` parameter for it. Unlike query tokens, a malformed tolerance
//! is fatal: weight allocation depends on which fields have one, so a guess
//! here would silently reshape the whole score.

use crate::error::ConfigError;
use crate::params::{tolerance_param, RequestParams};
use crate::types::{QueryAttributeMap, ToleranceMap, WeightedFieldSet};

/// Look up `sub.<field>` for every queried field.
///
/// Only the first value of a repeated parameter counts. Output order follows
/// the attribute map.
pub fn extract_tolerances<P: RequestParams + ?Sized>(
    attributes: &QueryAttributeMap,
    params: &P,
) -> Result<ToleranceMap, ConfigError> {
    let mut tolerances = ToleranceMap::new();

    for field in attributes.keys() {
        if let Some(raw) = params.get(&tolerance_param(field)) {
            tolerances.insert(field, parse_tolerance(field, raw)?);
        }
    }

    Ok(tolerances)
}

/// A tolerance must be a finite, non-negative number.
pub fn parse_tolerance(field: &str, raw: &str) -> Result<f64, ConfigError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(ConfigError::InvalidTolerance {
            field: field.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Split `wg.f` values on commas and whitespace into a deduplicated set.
pub fn parse_weighted_fields<S: AsRef<str>>(values: &[S]) -> WeightedFieldSet {
    values
        .iter()
        .flat_map(|value| value.as_ref().split(|c: char| c == ',' || c.is_whitespace()))
        .filter(|field| !field.is_empty())
        .collect()
}
