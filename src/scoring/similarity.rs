// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-field similarity rules.
//!
//! Each weighted field falls into exactly one rule class, checked in this
//! precedence:
//!
//! | Rule             | Fields              | Similarity                              |
//! |------------------|---------------------|-----------------------------------------|
//! | `Fillers`        | `fillers`           | categorical equality, sets fillers flag |
//! | `FillersContent` | `fillersContent`    | equality, only after a fillers match    |
//! | `ExactNumeric`   | `rep_fr`            | 1 on numeric equality, else 0           |
//! | `LinearDecay`    | other `rep_*`       | `1 - diff / tolerance`, clamped to 0    |
//! | `Unscored`       | everything else     | always 0                                |
//!
//! Similarity always lies in `[0, 1]`. The stepped bonus curve and the
//! identity boost live here too, since both are pure functions of a
//! similarity or a document id.

use crate::document::FieldValue;
use crate::error::FieldError;
use crate::types::{
    IdBoost, QueryValue, EXACT_NUMERIC_FIELD, FILLERS_CONTENT_FIELD, FILLERS_FIELD,
    NUMERIC_PREFIX,
};

/// How a field is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    Fillers,
    FillersContent,
    ExactNumeric,
    LinearDecay,
    Unscored,
}

impl FieldRule {
    pub fn classify(field: &str) -> Self {
        if field == FILLERS_FIELD {
            FieldRule::Fillers
        } else if field == FILLERS_CONTENT_FIELD {
            FieldRule::FillersContent
        } else if field == EXACT_NUMERIC_FIELD {
            FieldRule::ExactNumeric
        } else if field.starts_with(NUMERIC_PREFIX) {
            FieldRule::LinearDecay
        } else {
            FieldRule::Unscored
        }
    }
}

/// Inputs for one field of one document.
#[derive(Debug, Clone, Copy)]
pub struct FieldInput<'a> {
    pub field: &'a str,
    pub rule: FieldRule,
    pub reference: Option<&'a QueryValue>,
    pub candidate: Option<FieldValue<'a>>,
    pub tolerance: Option<f64>,
}

/// Evaluate one field.
///
/// `Ok(Some(s))` is a scored similarity. `Ok(None)` means nothing to compare
/// (no stored value, or an unscored field); it counts as 0 and earns no
/// bonus. `fillers_flag` is per-document state: the `Fillers` rule sets it,
/// the `FillersContent` rule reads it.
pub fn evaluate_field(
    input: &FieldInput<'_>,
    fillers_flag: &mut bool,
) -> Result<Option<f64>, FieldError> {
    match input.rule {
        FieldRule::Fillers => {
            let matched = categorical_match(input)?;
            if matched {
                *fillers_flag = true;
            }
            Ok(Some(indicator(matched)))
        }
        FieldRule::FillersContent => {
            let matched = *fillers_flag && categorical_match(input)?;
            Ok(Some(indicator(matched)))
        }
        FieldRule::ExactNumeric => {
            let Some((reference, candidate)) = numeric_pair(input)? else {
                return Ok(None);
            };
            Ok(Some(indicator(reference == candidate)))
        }
        FieldRule::LinearDecay => {
            let Some((reference, candidate)) = numeric_pair(input)? else {
                return Ok(None);
            };
            // A decay field without a tolerance only matches exactly
            let tolerance = input.tolerance.unwrap_or(0.0);
            Ok(Some(linear_decay(reference, candidate, tolerance)))
        }
        FieldRule::Unscored => Ok(None),
    }
}

fn indicator(matched: bool) -> f64 {
    if matched {
        1.0
    } else {
        0.0
    }
}

/// Both absent, or the stored value equals the reference.
fn categorical_match(input: &FieldInput<'_>) -> Result<bool, FieldError> {
    let reference = input
        .reference
        .map(QueryValue::as_scalar)
        .transpose()
        .map_err(|e| FieldError::from_value(input.field, e))?;

    Ok(match (reference, input.candidate) {
        (None, None) => true,
        (Some(reference), Some(candidate)) => candidate.equals_str(reference),
        _ => false,
    })
}

/// Reference and candidate as numbers, or `None` when either is absent.
fn numeric_pair(input: &FieldInput<'_>) -> Result<Option<(f64, f64)>, FieldError> {
    let (Some(reference), Some(candidate)) = (input.reference, input.candidate) else {
        return Ok(None);
    };
    let reference = reference
        .as_number()
        .map_err(|e| FieldError::from_value(input.field, e))?;
    let candidate = candidate
        .to_number()
        .map_err(|e| FieldError::from_value(input.field, e))?;
    Ok(Some((reference, candidate)))
}

/// Linear similarity decay over `[0, tolerance]`.
///
/// - `diff == 0` → 1
/// - `diff > tolerance` → 0
/// - otherwise `1 - diff / tolerance`
///
/// Monotonically non-increasing in `diff`. A zero tolerance only admits
/// exact matches.
pub fn linear_decay(reference: f64, candidate: f64, tolerance: f64) -> f64 {
    let diff = (reference - candidate).abs();
    if diff == 0.0 {
        1.0
    } else if diff > tolerance {
        0.0
    } else {
        1.0 - diff / tolerance
    }
}

// =============================================================================
// STEPPED BONUS
// =============================================================================

/// Lower band edges, highest first. Band `i` divides the bonus by `2(i+1)`.
const BONUS_BANDS: [f64; 9] = [0.9, 0.8, 0.7, 0.6, 0.5, 0.4, 0.3, 0.2, 0.1];

/// Divisor for similarities at or below the last band edge.
const BONUS_FLOOR_DIVISOR: f64 = 20.0;

/// Extra points for a weighted-bonus field.
///
/// An exact match earns the whole `bonus`. Anything less drops into one of ten
/// bands, each halving-and-more the share, and is then scaled by the
/// similarity again: 0.95 earns `bonus / 2 * 0.95`, 0.05 earns
/// `bonus / 20 * 0.05`.
pub fn stepped_bonus(similarity: f64, bonus: f64) -> f64 {
    if similarity == 1.0 {
        return bonus * similarity;
    }
    let divisor = BONUS_BANDS
        .iter()
        .position(|&edge| similarity > edge)
        .map_or(BONUS_FLOOR_DIVISOR, |band| 2.0 * (band + 1) as f64);
    bonus / divisor * similarity
}

// =============================================================================
// IDENTITY BOOST
// =============================================================================

/// Sum of multipliers of every query id equal to `doc_id`.
pub fn identity_boost(ids: &[IdBoost], doc_id: &str) -> f64 {
    ids.iter()
        .filter(|boost| boost.id == doc_id)
        .fold(0.0, |acc, boost| acc + 1.0 * boost.multiplier)
}
