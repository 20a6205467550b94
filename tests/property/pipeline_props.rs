//! Whole-pipeline invariants over synthetic catalogues.

use crate::common::{params, synthetic_segment};
use altrank::{AlternativeProductQuery, DocId, ScoringConfig, ScoringPlan};
use proptest::prelude::*;

/// A reference product request: attribute values, tolerances and nominees.
fn request() -> impl Strategy<Value = Vec<(String, String)>> {
    (
        0.0f64..40.0,
        0.0f64..30.0,
        prop::option::of(0.0f64..10.0),
        prop::option::of(0.0f64..10.0),
        prop::option::of(0.0f64..0.5),
        prop::sample::select(vec!["glass", "talc", "nylon"]),
        prop::sample::subsequence(vec!["rep_mfr", "rep_mvr", "rep_density", "fillers"], 0..4),
        prop::option::of(0u32..50),
    )
        .prop_map(|(mfr, mvr, sub_mfr, sub_mvr, sub_density, fillers, wg, boost_doc)| {
            let mut q = format!("rep_mfr:{} rep_mvr:{} rep_density:1.2 fillers:{}", mfr, mvr, fillers);
            if let Some(doc) = boost_doc {
                q.push_str(&format!(" id:P{}^2", doc));
            }
            let mut pairs = vec![("q".to_string(), q), ("wg.f".to_string(), wg.join(","))];
            for (field, sub) in [("rep_mfr", sub_mfr), ("rep_mvr", sub_mvr), ("rep_density", sub_density)] {
                if let Some(sub) = sub {
                    pairs.push((format!("sub.{}", field), sub.to_string()));
                }
            }
            pairs
        })
}

fn plan(pairs: &[(String, String)]) -> ScoringPlan {
    let borrowed: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    ScoringPlan::from_params(&params(&borrowed), &ScoringConfig::default()).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// No tolerance, no change: the baseline passes through untouched.
    #[test]
    fn prop_noop_returns_baseline(
        seed in any::<u64>(),
        q in "(rep_mfr|fillers|id):[a-z0-9]{1,4}( (rep_mvr|grade):[0-9]{1,3}){0,3}",
        baselines in prop::collection::vec(-100.0f32..100.0, 20),
    ) {
        let segment = synthetic_segment(20, seed);
        let plan = ScoringPlan::from_params(&params(&[("q", q.as_str())]), &ScoringConfig::default()).unwrap();
        let query = AlternativeProductQuery::new((), plan);
        let provider = query.provider(&segment);

        for (doc, baseline) in segment.doc_ids().zip(baselines) {
            prop_assert_eq!(provider.custom_score(doc, baseline, &[]).to_bits(), baseline.to_bits());
        }
    }

    /// Scores are finite, non-negative, bounded and independent of the baseline.
    #[test]
    fn prop_scores_bounded(seed in any::<u64>(), pairs in request()) {
        let segment = synthetic_segment(30, seed);
        let plan = plan(&pairs);
        prop_assume!(!plan.is_noop());

        let ceiling = plan.weights().total() + ScoringConfig::default().bonus_budget + 2.0;
        let query = AlternativeProductQuery::new((), plan);
        let provider = query.provider(&segment);

        for doc in segment.doc_ids() {
            let score = f64::from(provider.custom_score(doc, 0.0, &[]));
            prop_assert!(score.is_finite());
            prop_assert!(score >= 0.0, "negative score {}", score);
            prop_assert!(score <= ceiling + 1e-3, "score {} above {}", score, ceiling);
            prop_assert_eq!(
                provider.custom_score(doc, 0.0, &[]),
                provider.custom_score(doc, 55.5, &[1.0])
            );
        }
    }

    /// The explanation adds up to the score it explains.
    #[test]
    fn prop_explanation_matches_score(seed in any::<u64>(), pairs in request()) {
        let segment = synthetic_segment(10, seed);
        let query = AlternativeProductQuery::new((), plan(&pairs));
        let provider = query.provider(&segment);

        for doc in segment.doc_ids() {
            let explanation = provider.explain(doc, 0.25);
            prop_assert_eq!(explanation.score as f32, provider.custom_score(doc, 0.25, &[]));
            for field in &explanation.fields {
                prop_assert!((0.0..=1.0).contains(&field.similarity));
            }
        }
    }

    /// Building the plan twice gives the same plan and the same bits.
    #[test]
    fn prop_deterministic(seed in any::<u64>(), pairs in request()) {
        let segment = synthetic_segment(10, seed);
        let first = plan(&pairs);
        let second = plan(&pairs);
        prop_assert_eq!(&first, &second);

        let a = AlternativeProductQuery::new((), first);
        let b = AlternativeProductQuery::new((), second);
        for doc in segment.doc_ids() {
            prop_assert_eq!(
                a.provider(&segment).custom_score(doc, 0.0, &[]).to_bits(),
                b.provider(&segment).custom_score(doc, 0.0, &[]).to_bits()
            );
        }
    }
}

#[test]
fn test_missing_document_scores_like_empty_document() {
    let segment = synthetic_segment(3, 7);
    let plan = ScoringPlan::from_params(
        &params(&[("q", "rep_mfr:5"), ("sub.rep_mfr", "1")]),
        &ScoringConfig::default(),
    )
    .unwrap();
    let query = AlternativeProductQuery::new((), plan);
    let provider = query.provider(&segment);

    // Out-of-range ids read as "every field absent"
    let score = provider.custom_score(DocId(99), 0.0, &[]);
    let explanation = provider.explain(DocId(99), 0.0);
    assert_eq!(explanation.score as f32, score);
    assert!(explanation.fields.iter().all(|f| f.error.is_none()));
}
