// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Weight allocation: who gets how many of the 100 points.
//!
//! Four steps, in order:
//!
//! 1. Start from the base table (fixed + custom fields).
//! 2. Drop every custom field the query gave no tolerance, pooling its weight
//!    as residue.
//! 3. Give every other tolerance field `generic_budget / k`, where `k` counts
//!    the tolerance fields that are not surviving custom fields.
//! 4. Spread any residue evenly over everything left in the table.
//!
//! Worked example with the default table and tolerances for `rep_mfr` and
//! `rep_density` only:
//!
//! ```text
//! base      fillers 15  fillersContent 15  rep_mfr 20  rep_mvr 20  rep_density 10
//! step 2    rep_mvr dropped, residue 20
//! step 3    no generic fields
//! step 4    20 / 4 = 5 each -> 20, 20, 25, 15   (total 80)
//! ```
//!
//! The result depends only on the tolerance map's key set and order, never on
//! its values.

use tracing::trace;

use crate::config::WeightTable;
use crate::contracts::check_weights_valid;
use crate::types::{ToleranceMap, WeightMap};

/// Derive the weight map for one query.
pub fn allocate_weights(tolerances: &ToleranceMap, table: &WeightTable) -> WeightMap {
    let mut weights: WeightMap = table
        .base
        .iter()
        .map(|fw| (fw.field.as_str(), fw.weight))
        .collect();

    // Step 2: eliminate custom fields without a tolerance
    let mut residue = 0.0;
    let mut eligible: Vec<&str> = Vec::with_capacity(table.custom_fields.len());
    for field in &table.custom_fields {
        if tolerances.contains_key(field) {
            eligible.push(field);
        } else if let Some(weight) = weights.remove(field) {
            residue += weight;
        }
    }

    // Step 3: spread the generic budget
    let generic_count = tolerances
        .keys()
        .filter(|field| !eligible.contains(field))
        .count();
    for field in tolerances.keys() {
        if eligible.contains(&field) || table.is_fixed(field) {
            continue;
        }
        weights.insert(field, table.generic_budget / generic_count as f64);
    }

    // Step 4: redistribute the residue
    if residue > 0.0 && !weights.is_empty() {
        let share = residue / weights.len() as f64;
        for weight in weights.values_mut() {
            *weight += share;
        }
    }

    trace!(
        fields = weights.len(),
        residue,
        generic_count,
        total = weights.total(),
        "allocated weights"
    );
    check_weights_valid(&weights);
    weights
}
