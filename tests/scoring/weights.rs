//! Weight allocation as seen through a built plan.

use crate::common::{assert_close, plan_for, weight_of};

#[test]
fn test_all_custom_fields_keep_base_weights() {
    let plan = plan_for(&[
        ("q", "rep_mfr:5 rep_mvr:3 rep_density:1"),
        ("sub.rep_mfr", "1"),
        ("sub.rep_mvr", "1"),
        ("sub.rep_density", "0.1"),
    ])
    .unwrap();

    assert_eq!(weight_of(&plan, "fillers"), 15.0);
    assert_eq!(weight_of(&plan, "fillersContent"), 15.0);
    assert_eq!(weight_of(&plan, "rep_mfr"), 20.0);
    assert_eq!(weight_of(&plan, "rep_mvr"), 20.0);
    assert_eq!(weight_of(&plan, "rep_density"), 10.0);
    assert_eq!(plan.weights().total(), 80.0);
}

#[test]
fn test_generic_field_completes_one_hundred() {
    let plan = plan_for(&[
        ("q", "rep_mfr:5 rep_mvr:3 rep_density:1 rep_hdt:120"),
        ("sub.rep_mfr", "1"),
        ("sub.rep_mvr", "1"),
        ("sub.rep_density", "0.1"),
        ("sub.rep_hdt", "10"),
    ])
    .unwrap();

    assert_eq!(weight_of(&plan, "rep_hdt"), 20.0);
    assert_eq!(plan.weights().total(), 100.0);
}

#[test]
fn test_generic_budget_splits_evenly() {
    let plan = plan_for(&[
        ("q", "rep_hdt:120 rep_fr:1 rep_tensile:60"),
        ("sub.rep_hdt", "10"),
        ("sub.rep_fr", "0"),
        ("sub.rep_tensile", "5"),
    ])
    .unwrap();

    // Every custom field dropped: residue 50 over fillers, fillersContent and
    // the three generic fields.
    assert!(plan.weights().get("rep_mfr").is_none());
    assert_close(weight_of(&plan, "fillers"), 15.0 + 10.0);
    assert_close(weight_of(&plan, "rep_hdt"), 20.0 / 3.0 + 10.0);
    assert_close(weight_of(&plan, "rep_fr"), 20.0 / 3.0 + 10.0);
    assert_close(plan.weights().total(), 100.0);
}

#[test]
fn test_untoleranced_query_fields_get_no_weight() {
    let plan = plan_for(&[("q", "rep_mfr:5 rep_hdt:120 grade:A"), ("sub.rep_mfr", "1")]).unwrap();

    assert!(plan.weights().get("rep_hdt").is_none());
    assert!(plan.weights().get("grade").is_none());
    assert_eq!(plan.weights().len(), 3);
}

#[test]
fn test_weight_order_puts_fillers_before_content() {
    let plan = plan_for(&[
        ("q", "fillersContent:20 rep_hdt:1 fillers:glass"),
        ("sub.rep_hdt", "1"),
    ])
    .unwrap();

    let keys: Vec<&str> = plan.weights().keys().collect();
    assert_eq!(keys, vec!["fillers", "fillersContent", "rep_hdt"]);
}

#[test]
fn test_weights_ignore_tolerance_values() {
    let tight = plan_for(&[("q", "rep_mfr:5 rep_hdt:1"), ("sub.rep_mfr", "0.01"), ("sub.rep_hdt", "0")])
        .unwrap();
    let loose = plan_for(&[("q", "rep_mfr:5 rep_hdt:1"), ("sub.rep_mfr", "500"), ("sub.rep_hdt", "9")])
        .unwrap();

    assert_eq!(tight.weights(), loose.weights());
}
