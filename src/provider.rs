// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The surface the host search engine talks to.
//!
//! Two hooks, mirroring a custom-score query plugin:
//!
//! 1. **Parse** — [`AlternativeProductQuery::parse`] hands the raw query text
//!    to the host's own parser (through [`SubQueryParser`]) and builds the
//!    scoring plan from the request parameters. Both happen once per query.
//! 2. **Score** — [`AlternativeProductQuery::provider`] binds the plan to one
//!    index segment; the host then calls [`ScoreProvider::custom_score`] for
//!    every hit in that segment, from whichever thread owns the segment.
//!
//! ```ignore
//! let query = AlternativeProductQuery::parse(qstr, &params, &host_parser, &config)?;
//! for segment in &segments {
//!     let provider = query.provider(segment);
//!     for (doc, baseline) in segment.hits() {
//!         let score = provider.custom_score(doc, baseline, &[]);
//!     }
//! }
//! ```

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::ScoringConfig;
use crate::document::{DocId, DocumentReader};
use crate::error::ConfigError;
use crate::params::RequestParams;
use crate::plan::ScoringPlan;
use crate::scoring::{explain_document, score_document, ScoreExplanation};

/// The host's parser for the wrapped sub-query.
pub trait SubQueryParser {
    type Query;
    type Error: fmt::Display;

    fn parse(&self, qstr: &str) -> Result<Self::Query, Self::Error>;
}

/// A host sub-query wrapped with an attribute-similarity scoring plan.
#[derive(Debug, Clone)]
pub struct AlternativeProductQuery<Q> {
    sub_query: Q,
    plan: Arc<ScoringPlan>,
}

impl<Q> AlternativeProductQuery<Q> {
    pub fn new(sub_query: Q, plan: ScoringPlan) -> Self {
        Self {
            sub_query,
            plan: Arc::new(plan),
        }
    }

    /// Parse hook: wrap the host's parse of `qstr` and plan the scoring.
    pub fn parse<P, S>(
        qstr: &str,
        params: &P,
        parser: &S,
        config: &ScoringConfig,
    ) -> Result<Self, ConfigError>
    where
        P: RequestParams + ?Sized,
        S: SubQueryParser<Query = Q> + ?Sized,
    {
        let sub_query = parser
            .parse(qstr)
            .map_err(|e| ConfigError::SubQuery(e.to_string()))?;
        let plan = ScoringPlan::from_params(params, config)?;
        Ok(Self::new(sub_query, plan))
    }

    /// The host query whose scores become baselines.
    pub fn sub_query(&self) -> &Q {
        &self.sub_query
    }

    pub fn plan(&self) -> &ScoringPlan {
        &self.plan
    }

    /// Bind the plan to one segment.
    pub fn provider<'a, R: DocumentReader + ?Sized>(&'a self, segment: &'a R) -> ScoreProvider<'a, R> {
        ScoreProvider {
            plan: &self.plan,
            segment,
        }
    }
}

/// Per-segment scorer. Cheap to create, holds only borrows.
pub struct ScoreProvider<'a, R: ?Sized> {
    plan: &'a ScoringPlan,
    segment: &'a R,
}

impl<R: DocumentReader + ?Sized> ScoreProvider<'_, R> {
    /// Final score for `doc`.
    ///
    /// `val_src_scores` are auxiliary per-document scores from other scoring
    /// features; they take no part in the formula.
    pub fn custom_score(&self, doc: DocId, sub_query_score: f32, _val_src_scores: &[f32]) -> f32 {
        if self.plan.is_noop() {
            return sub_query_score;
        }
        score_document(self.plan, self.segment, doc, f64::from(sub_query_score)) as f32
    }

    /// Single auxiliary score overload.
    pub fn custom_score_single(&self, doc: DocId, sub_query_score: f32, val_src_score: f32) -> f32 {
        self.custom_score(doc, sub_query_score, &[val_src_score])
    }

    /// Per-field breakdown of the score for `doc`.
    pub fn explain(&self, doc: DocId, sub_query_score: f32) -> ScoreExplanation {
        explain_document(self.plan, self.segment, doc, f64::from(sub_query_score))
    }
}

// =============================================================================
// PARALLEL SEGMENT SCORING
// =============================================================================

/// One segment's hits: `(doc, baseline)` pairs from the sub-query.
#[derive(Debug, Clone)]
pub struct SegmentHits<'a, R: ?Sized> {
    pub segment: &'a R,
    pub hits: Vec<(DocId, f32)>,
}

#[cfg(feature = "parallel")]
impl<Q: Sync> AlternativeProductQuery<Q> {
    /// Score every segment on the rayon pool, one task per segment.
    ///
    /// Output is indexed like the input: `result[s][h]` is the score of
    /// `segments[s].hits[h]`.
    pub fn score_segments<R>(&self, segments: &[SegmentHits<'_, R>]) -> Vec<Vec<f32>>
    where
        R: DocumentReader + Sync + ?Sized,
    {
        segments
            .par_iter()
            .map(|segment| {
                let provider = self.provider(segment.segment);
                segment
                    .hits
                    .iter()
                    .map(|&(doc, baseline)| provider.custom_score(doc, baseline, &[]))
                    .collect()
            })
            .collect()
    }
}
