//! Runtime contracts for the scoring invariants.
//!
//! Debug-mode assertions that:
//!
//! 1. Are **zero-cost in release builds** (use `debug_assert!`)
//! 2. Fail at the first bad number instead of three ranks later
//!
//! | Contract                    | Invariant                                  |
//! |-----------------------------|--------------------------------------------|
//! | `check_similarity_in_range` | every similarity lies in `[0, 1]`          |
//! | `check_weights_valid`       | every weight is finite and non-negative    |
//! | `check_score_finite`        | no NaN or infinity reaches the host        |

// ============================================================================
// COMPILE-TIME ASSERTIONS (evaluated at build time)
// ============================================================================

/// The default table plus the generic budget is a 100-point scale.
const _: () = {
    use crate::config::{
        DEFAULT_DENSITY_WEIGHT, DEFAULT_FILLERS_CONTENT_WEIGHT, DEFAULT_FILLERS_WEIGHT,
        DEFAULT_GENERIC_BUDGET, DEFAULT_MFR_WEIGHT, DEFAULT_MVR_WEIGHT,
    };

    const BASE: f64 = DEFAULT_FILLERS_WEIGHT
        + DEFAULT_FILLERS_CONTENT_WEIGHT
        + DEFAULT_MFR_WEIGHT
        + DEFAULT_MVR_WEIGHT
        + DEFAULT_DENSITY_WEIGHT;
    assert!(BASE == 80.0);
    assert!(BASE + DEFAULT_GENERIC_BUDGET == 100.0);
};

use crate::types::WeightMap;

#[inline]
pub fn check_similarity_in_range(field: &str, similarity: f64) {
    debug_assert!(
        (0.0..=1.0).contains(&similarity),
        "Contract violation: similarity for '{}' is {}, outside [0, 1]",
        field,
        similarity
    );
}

#[inline]
pub fn check_weights_valid(weights: &WeightMap) {
    for (field, weight) in weights.iter() {
        debug_assert!(
            weight.is_finite() && *weight >= 0.0,
            "Contract violation: weight for '{}' is {}",
            field,
            weight
        );
    }
}

#[inline]
pub fn check_score_finite(score: f64) {
    debug_assert!(
        score.is_finite(),
        "Contract violation: score {} is not finite",
        score
    );
}
