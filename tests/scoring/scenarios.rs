//! End-to-end scenarios: request parameters in, one score out.

use crate::common::{explain, product, score};
use altrank::{MemoryDocument, MemorySegment};

#[test]
fn test_exact_match_earns_full_redistributed_weight() {
    // rep_mvr has no tolerance: its 20 points spread over the four remaining
    // fields, giving fillers 20, fillersContent 20, rep_mfr 25, rep_density 15.
    let segment = MemorySegment::new(vec![product(
        "P1",
        &[("rep_mfr", 5.0), ("rep_density", 1.0)],
    )]);
    let request = [
        ("q", "rep_mfr:5 rep_density:1"),
        ("sub.rep_mfr", "2"),
        ("sub.rep_density", "2"),
    ];

    assert_eq!(score(&request, &segment, 0, 0.42), 80.0);

    let explanation = explain(&request, &segment, 0);
    let weights: Vec<(&str, f64)> = explanation
        .fields
        .iter()
        .map(|f| (f.field.as_str(), f.weight))
        .collect();
    assert_eq!(
        weights,
        vec![
            ("fillers", 20.0),
            ("fillersContent", 20.0),
            ("rep_mfr", 25.0),
            ("rep_density", 15.0),
        ]
    );
    assert!(explanation.fields.iter().all(|f| f.similarity == 1.0));
}

#[test]
fn test_empty_query_returns_baseline() {
    let segment = MemorySegment::new(vec![
        product("P1", &[("rep_mfr", 5.0)]),
        product("P2", &[("rep_mfr", 9.0)]),
    ]);

    for (doc, baseline) in [(0, 0.0f32), (1, 3.75), (0, -1.5)] {
        assert_eq!(score(&[("q", "")], &segment, doc, baseline), baseline);
        assert_eq!(score(&[], &segment, doc, baseline), baseline);
    }
}

#[test]
fn test_query_without_tolerances_is_noop() {
    let segment = MemorySegment::new(vec![product("P1", &[("rep_mfr", 5.0)])]);
    let request = [("q", "rep_mfr:5 fillers:glass id:P1^4"), ("wg.f", "rep_mfr")];

    assert_eq!(score(&request, &segment, 0, 1.25), 1.25);
    assert!(explain(&request, &segment, 0).noop);
}

#[test]
fn test_tolerance_for_field_not_in_query_is_ignored() {
    let segment = MemorySegment::new(vec![product("P1", &[("rep_mfr", 5.0)])]);
    let request = [("q", "fillers:glass"), ("sub.rep_mfr", "2")];

    assert_eq!(score(&request, &segment, 0, 9.0), 9.0);
}

#[test]
fn test_baseline_is_discarded_once_scored() {
    let segment = MemorySegment::new(vec![product("P1", &[("rep_mfr", 5.0)])]);
    let request = [("q", "rep_mfr:5"), ("sub.rep_mfr", "1")];

    let low = score(&request, &segment, 0, 0.0);
    let high = score(&request, &segment, 0, 1000.0);
    assert_eq!(low, high);
}

#[test]
fn test_quoted_values_are_unquoted() {
    let segment = MemorySegment::new(vec![MemoryDocument::new()
        .with_str("fillers", "glass fibre")
        .with_num("rep_mfr", 5.0)]);
    let request = [("q", "fillers:\"glass rep_mfr:5"), ("sub.rep_mfr", "1")];

    // The quote only wraps the first word; the second token is its own attribute.
    let explanation = explain(&request, &segment, 0);
    let fillers = &explanation.fields[0];
    assert_eq!(fillers.field, "fillers");
    assert_eq!(fillers.similarity, 0.0);
    let mfr = explanation
        .fields
        .iter()
        .find(|f| f.field == "rep_mfr")
        .expect("rep_mfr weighted");
    assert_eq!(mfr.similarity, 1.0);
}

#[test]
fn test_malformed_tokens_do_not_void_query() {
    let segment = MemorySegment::new(vec![product("P1", &[("rep_mfr", 5.0)])]);
    let clean = [("q", "rep_mfr:5"), ("sub.rep_mfr", "1")];
    let noisy = [("q", "oops rep_mfr:5 :x dangling:"), ("sub.rep_mfr", "1")];

    assert_eq!(score(&noisy, &segment, 0, 0.0), score(&clean, &segment, 0, 0.0));
}

#[test]
fn test_queries_spread_across_params_accumulate() {
    let segment = MemorySegment::new(vec![product(
        "P1",
        &[("rep_mfr", 5.0), ("rep_density", 1.0)],
    )]);
    let split = [
        ("q", "rep_mfr:5"),
        ("q", "rep_density:1"),
        ("sub.rep_mfr", "2"),
        ("sub.rep_density", "2"),
    ];

    assert_eq!(score(&split, &segment, 0, 0.0), 80.0);
}

#[test]
fn test_later_value_overwrites_earlier() {
    let segment = MemorySegment::new(vec![product("P1", &[("rep_mfr", 7.0)])]);
    let request = [("q", "rep_mfr:1 rep_mfr:7"), ("sub.rep_mfr", "1")];

    let explanation = explain(&request, &segment, 0);
    let mfr = explanation
        .fields
        .iter()
        .find(|f| f.field == "rep_mfr")
        .expect("rep_mfr weighted");
    assert_eq!(mfr.similarity, 1.0);
}
