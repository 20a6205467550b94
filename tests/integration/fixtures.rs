//! The fixture catalogue scored against its reference product.

use crate::common::{assert_close, load_products, load_request};
use altrank::{
    AlternativeProductQuery, DocId, DocumentReader, FieldError, ScoringConfig, ScoringPlan,
};

fn ranked() -> Vec<(String, f64)> {
    let segment = load_products();
    let plan = ScoringPlan::from_params(&load_request(), &ScoringConfig::default()).unwrap();
    let query = AlternativeProductQuery::new((), plan);
    let provider = query.provider(&segment);

    let mut scored: Vec<(String, f64)> = segment
        .doc_ids()
        .map(|doc| {
            let id = segment
                .field(doc, "id")
                .map(|id| id.to_id_string().into_owned())
                .unwrap_or_default();
            (id, provider.explain(doc, 1.0).score)
        })
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored
}

#[test]
fn test_fixture_weights_fill_the_budget() {
    let plan = ScoringPlan::from_params(&load_request(), &ScoringConfig::default()).unwrap();
    let weights: Vec<(&str, f64)> = plan.weights().iter().map(|(f, w)| (f, *w)).collect();

    assert_eq!(
        weights,
        vec![
            ("fillers", 17.0),
            ("fillersContent", 17.0),
            ("rep_mfr", 22.0),
            ("rep_mvr", 22.0),
            ("rep_fr", 22.0),
        ]
    );
    assert_eq!(plan.weights().total(), 100.0);
    assert_eq!(plan.bonus_for("rep_mfr"), Some(100.0));
}

#[test]
fn test_fixture_ranking() {
    let ranked = ranked();
    let order: Vec<&str> = ranked.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(order, vec!["P-100", "P-300", "P-200", "P-500", "P-400"]);

    let expected = [205.0, 133.0, 90.0, 56.0, 22.0];
    for ((id, score), expected) in ranked.iter().zip(expected) {
        assert!((score - expected).abs() < 1e-9, "{}: expected {}, got {}", id, expected, score);
    }
}

#[test]
fn test_reference_product_outranks_everything() {
    let ranked = ranked();
    let (top, score) = &ranked[0];
    assert_eq!(top, "P-100");
    // Full weight, full bonus, identity boost
    assert_close(*score, 100.0 + 100.0 + 5.0);
}

#[test]
fn test_unparseable_fixture_field_is_explained() {
    let segment = load_products();
    let plan = ScoringPlan::from_params(&load_request(), &ScoringConfig::default()).unwrap();
    let query = AlternativeProductQuery::new((), plan);
    let explanation = query.provider(&segment).explain(DocId(3), 0.0);

    let errors: Vec<&FieldError> = explanation
        .fields
        .iter()
        .filter_map(|f| f.error.as_ref())
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field(), "rep_mfr");
    assert_eq!(errors[0].to_string(), "invalid numeric field 'rep_mfr': 'n/a'");
}

#[test]
fn test_explanation_serializes() {
    let segment = load_products();
    let plan = ScoringPlan::from_params(&load_request(), &ScoringConfig::default()).unwrap();
    let query = AlternativeProductQuery::new((), plan);
    let explanation = query.provider(&segment).explain(DocId(0), 0.0);

    let json = serde_json::to_value(&explanation).unwrap();
    assert_eq!(json["doc"], 0);
    assert_eq!(json["identity"], 5.0);
    assert_eq!(json["noop"], false);
    assert_eq!(json["fields"].as_array().unwrap().len(), 5);
    assert_eq!(json["fields"][2]["field"], "rep_mfr");
    assert_eq!(json["fields"][2]["bonus"], 100.0);
}
