// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Folding per-field similarities into one document score.
//!
//! ```text
//! score = Σ (similarity × weight  +  stepped_bonus(similarity))  +  identity
//! ```
//!
//! unless the plan has no tolerances, in which case the host's baseline score
//! is returned untouched. In the scored branch the baseline is discarded.
//!
//! Fields are visited in weight-map order and every addition happens in a
//! fixed sequence, so the same plan and document always produce the same
//! bits. `fillers` precedes `fillersContent` in that order, which is what lets
//! the fillers flag gate the content field.

use serde::Serialize;
use tracing::{trace, warn};

use crate::contracts::{check_score_finite, check_similarity_in_range};
use crate::document::{DocId, DocumentReader};
use crate::error::FieldError;
use crate::plan::ScoringPlan;
use crate::types::ID_FIELD;

use super::similarity::{evaluate_field, identity_boost, stepped_bonus, FieldInput};

/// What one weighted field added to a document's score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldContribution {
    pub field: String,
    pub similarity: f64,
    pub weight: f64,
    /// `similarity × weight`.
    pub weighted: f64,
    /// Stepped bonus, 0 unless the field is in `wg.f` and was scored.
    pub bonus: f64,
    /// Set when the field could not be evaluated.
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_error")]
    pub error: Option<FieldError>,
}

fn serialize_error<S: serde::Serializer>(
    error: &Option<FieldError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match error {
        Some(err) => serializer.serialize_str(&err.to_string()),
        None => serializer.serialize_none(),
    }
}

/// Full breakdown of one document's score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreExplanation {
    pub doc: DocId,
    pub score: f64,
    pub baseline: f64,
    /// The plan had no tolerances and the baseline was returned.
    pub noop: bool,
    pub identity: f64,
    pub fields: Vec<FieldContribution>,
}

/// Borrowed per-field outcome handed to the visitor.
struct Outcome<'p> {
    field: &'p str,
    similarity: f64,
    weight: f64,
    weighted: f64,
    bonus: f64,
    error: Option<FieldError>,
}

/// Evaluate every weighted field of `doc`, then return its identity boost.
fn visit_fields<R, F>(plan: &ScoringPlan, reader: &R, doc: DocId, mut visit: F) -> f64
where
    R: DocumentReader + ?Sized,
    F: FnMut(Outcome<'_>),
{
    let attributes = plan.attributes();
    let tolerances = plan.tolerances();
    let mut fillers_flag = false;

    for (field, rule, weight) in plan.fields() {
        let input = FieldInput {
            field,
            rule,
            reference: attributes.get(field),
            candidate: reader.field(doc, field),
            tolerance: tolerances.get(field).copied(),
        };

        let (similarity, scored, error) = match evaluate_field(&input, &mut fillers_flag) {
            Ok(Some(similarity)) => (similarity, true, None),
            Ok(None) => (0.0, false, None),
            Err(err) => {
                warn!(doc = doc.0, %err, "field contributes nothing");
                (0.0, false, Some(err))
            }
        };
        check_similarity_in_range(field, similarity);

        let bonus = match plan.bonus_for(field) {
            Some(bonus) if scored => stepped_bonus(similarity, bonus),
            _ => 0.0,
        };

        visit(Outcome {
            field,
            similarity,
            weight,
            weighted: similarity * weight,
            bonus,
            error,
        });
    }

    match (attributes.ids(), reader.field(doc, ID_FIELD)) {
        (Some(ids), Some(id)) => identity_boost(ids, &id.to_id_string()),
        _ => 0.0,
    }
}

/// Final score for one document.
pub fn score_document<R: DocumentReader + ?Sized>(
    plan: &ScoringPlan,
    reader: &R,
    doc: DocId,
    baseline: f64,
) -> f64 {
    if plan.is_noop() {
        return baseline;
    }

    let mut similar_sum = 0.0;
    let identity = visit_fields(plan, reader, doc, |outcome| {
        similar_sum += outcome.weighted;
        similar_sum += outcome.bonus;
    });
    let score = similar_sum + identity;

    trace!(doc = doc.0, score, identity, "scored document");
    check_score_finite(score);
    score
}

/// Same computation as [`score_document`], keeping every step.
pub fn explain_document<R: DocumentReader + ?Sized>(
    plan: &ScoringPlan,
    reader: &R,
    doc: DocId,
    baseline: f64,
) -> ScoreExplanation {
    if plan.is_noop() {
        return ScoreExplanation {
            doc,
            score: baseline,
            baseline,
            noop: true,
            identity: 0.0,
            fields: Vec::new(),
        };
    }

    let mut similar_sum = 0.0;
    let mut fields = Vec::with_capacity(plan.weights().len());
    let identity = visit_fields(plan, reader, doc, |outcome| {
        similar_sum += outcome.weighted;
        similar_sum += outcome.bonus;
        fields.push(FieldContribution {
            field: outcome.field.to_string(),
            similarity: outcome.similarity,
            weight: outcome.weight,
            weighted: outcome.weighted,
            bonus: outcome.bonus,
            error: outcome.error,
        });
    });

    ScoreExplanation {
        doc,
        score: similar_sum + identity,
        baseline,
        noop: false,
        identity,
        fields,
    }
}
