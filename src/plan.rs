// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The per-query scoring plan.
//!
//! Everything that depends only on the request is derived here, once, before
//! the first document is scored: the attribute map, tolerances, weights, the
//! bonus set, and each weighted field's rule class. The plan is plain data, so
//! it is `Send + Sync` and can be shared by reference across every scoring
//! thread of the query.

use tracing::debug;

use crate::config::ScoringConfig;
use crate::error::ConfigError;
use crate::params::{RequestParams, QUERY_PARAM, WEIGHTED_FIELDS_PARAM};
use crate::query::{extract_tolerances, parse_query, parse_weighted_fields};
use crate::scoring::{allocate_weights, FieldRule};
use crate::types::{QueryAttributeMap, ToleranceMap, WeightMap, WeightedFieldSet};

/// Immutable derived state for one query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringPlan {
    attributes: QueryAttributeMap,
    tolerances: ToleranceMap,
    weights: WeightMap,
    weighted_fields: WeightedFieldSet,
    /// Parallel to `weights`.
    rules: Vec<FieldRule>,
    /// Per-field stepped bonus, `None` when no field was nominated.
    bonus: Option<f64>,
}

impl ScoringPlan {
    /// Read `q`, `wg.f` and `sub.*` from the request.
    ///
    /// Malformed query tokens are skipped; a malformed tolerance fails the
    /// whole plan.
    pub fn from_params<P: RequestParams + ?Sized>(
        params: &P,
        config: &ScoringConfig,
    ) -> Result<Self, ConfigError> {
        let attributes = parse_query(params.get_params(QUERY_PARAM).unwrap_or_default());
        let tolerances = extract_tolerances(&attributes, params)?;
        let weighted_fields =
            parse_weighted_fields(params.get_params(WEIGHTED_FIELDS_PARAM).unwrap_or_default());

        Ok(Self::from_parts(attributes, tolerances, weighted_fields, config))
    }

    /// Assemble a plan from already-parsed maps.
    pub fn from_parts(
        attributes: QueryAttributeMap,
        tolerances: ToleranceMap,
        weighted_fields: WeightedFieldSet,
        config: &ScoringConfig,
    ) -> Self {
        let weights = allocate_weights(&tolerances, &config.weights);
        let rules = weights.keys().map(FieldRule::classify).collect();
        let bonus = if weighted_fields.is_empty() {
            None
        } else {
            Some(config.bonus_budget / weighted_fields.len() as f64)
        };

        debug!(
            attributes = attributes.len(),
            tolerances = tolerances.len(),
            weights = weights.len(),
            weighted_fields = weighted_fields.len(),
            "built scoring plan"
        );

        Self {
            attributes,
            tolerances,
            weights,
            weighted_fields,
            rules,
            bonus,
        }
    }

    /// With no tolerance configured, scoring passes the baseline through.
    pub fn is_noop(&self) -> bool {
        self.tolerances.is_empty()
    }

    pub fn attributes(&self) -> &QueryAttributeMap {
        &self.attributes
    }

    pub fn tolerances(&self) -> &ToleranceMap {
        &self.tolerances
    }

    pub fn weights(&self) -> &WeightMap {
        &self.weights
    }

    pub fn weighted_fields(&self) -> &WeightedFieldSet {
        &self.weighted_fields
    }

    /// Bonus share for a field, if it was nominated through `wg.f`.
    pub fn bonus_for(&self, field: &str) -> Option<f64> {
        self.bonus.filter(|_| self.weighted_fields.contains(field))
    }

    /// Weighted fields with their rule and weight, in evaluation order.
    pub(crate) fn fields(&self) -> impl Iterator<Item = (&str, FieldRule, f64)> {
        self.weights
            .iter()
            .zip(&self.rules)
            .map(|((field, weight), rule)| (field, *rule, *weight))
    }
}
