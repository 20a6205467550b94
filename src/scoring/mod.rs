// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring: weights, similarities, and the final number.
//!
//! Field weights come from a fixed 100-point table that is rebalanced per
//! query; similarities come from one of a few field-class rules; the final
//! score adds them up together with the stepped bonus and identity boost.
//! Nothing in here allocates per document except on the explanation path.

mod aggregate;
mod similarity;
mod weights;

pub use aggregate::{explain_document, score_document, FieldContribution, ScoreExplanation};
pub use similarity::{
    evaluate_field, identity_boost, linear_decay, stepped_bonus, FieldInput, FieldRule,
};
pub use weights::allocate_weights;
