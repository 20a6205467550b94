//! Attribute-similarity scoring for alternative-product search.
//!
//! Given a reference product described in the query (`rep_mfr:5 fillers:glass
//! id:X^2 ...`) and a tolerance per attribute (`sub.rep_mfr=2`), every candidate
//! document is scored by how closely its attributes match. The host search
//! engine supplies documents and a baseline score; this crate supplies the
//! number that replaces it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  params.rs  │────▶│   query/    │────▶│   plan.rs   │
//! │ (q, wg.f,   │     │ (tokens,    │     │ (Scoring-   │
//! │  sub.*)     │     │  tolerance) │     │  Plan)      │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                                ▼
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ document.rs │────▶│  scoring/   │◀────│ provider.rs │
//! │ (Document-  │     │ (weights,   │     │ (parse hook,│
//! │  Reader)    │     │  similarity,│     │  per-segment│
//! │             │     │  aggregate) │     │  scorer)    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Field Classes
//!
//! | Field            | Similarity                                   |
//! |------------------|----------------------------------------------|
//! | `fillers`        | 1 if equal or both absent, sets a flag       |
//! | `fillersContent` | 1 if the flag is set and values match        |
//! | `rep_fr`         | 1 if numerically equal                       |
//! | other `rep_*`    | `max(0, 1 - abs(ref - cand) / tolerance)`    |
//! | anything else    | 0                                            |
//!
//! # Usage
//!
//! ```
//! use altrank::{AlternativeProductQuery, DocId, MemoryDocument, MemorySegment};
//! use altrank::{ParamMap, ScoringConfig, ScoringPlan};
//!
//! let params = ParamMap::new()
//!     .with("q", "rep_mfr:5 rep_density:1")
//!     .with("sub.rep_mfr", "2")
//!     .with("sub.rep_density", "2");
//! let plan = ScoringPlan::from_params(&params, &ScoringConfig::default()).unwrap();
//! let query = AlternativeProductQuery::new((), plan);
//!
//! let segment = MemorySegment::new(vec![MemoryDocument::new()
//!     .with_num("rep_mfr", 5.0)
//!     .with_num("rep_density", 1.0)]);
//! let provider = query.provider(&segment);
//!
//! assert_eq!(provider.custom_score(DocId(0), 0.7, &[]), 80.0);
//! ```

// Module declarations
pub mod config;
pub mod contracts;
mod document;
pub mod error;
pub mod params;
mod plan;
mod provider;
pub mod query;
pub mod scoring;
mod types;

#[doc(hidden)]
pub mod testing;

// Re-exports for public API
pub use config::{FieldWeight, ScoringConfig, WeightTable};
pub use document::{
    DocId, DocumentReader, FieldValue, MemoryDocument, MemorySegment, StoredValue,
};
pub use error::{ConfigError, FieldError, ValueError};
pub use params::{ParamMap, RequestParams};
pub use plan::ScoringPlan;
pub use provider::{AlternativeProductQuery, ScoreProvider, SegmentHits, SubQueryParser};
pub use scoring::{FieldContribution, ScoreExplanation};
pub use types::{
    parse_finite, FieldMap, IdBoost, QueryAttributeMap, QueryValue, ToleranceMap, WeightMap,
    WeightedFieldSet, EXACT_NUMERIC_FIELD, FILLERS_CONTENT_FIELD, FILLERS_FIELD, ID_FIELD,
    NUMERIC_PREFIX,
};
