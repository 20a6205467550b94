// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for score calculation invariants.
//!
//! Scores must be finite and deterministic. The same request scored twice must
//! produce identical bits, and a request without tolerances must hand back the
//! baseline untouched.

#![no_main]

use altrank::testing::synthetic_segment;
use altrank::{AlternativeProductQuery, ParamMap, ScoringConfig, ScoringPlan};
use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;

/// A request assembled from fuzzer-chosen pieces.
#[derive(Debug, Clone)]
struct ScoringInput {
    q: String,
    tolerances: Vec<(String, String)>,
    weighted: String,
    baseline: f32,
    seed: u64,
}

impl<'a> Arbitrary<'a> for ScoringInput {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        const FIELDS: [&str; 8] = [
            "rep_mfr", "rep_mvr", "rep_density", "rep_fr", "rep_hdt", "fillers",
            "fillersContent", "grade",
        ];

        let mut q = String::new();
        for _ in 0..u.int_in_range(0..=8)? {
            let field = FIELDS[u.int_in_range(0..=FIELDS.len() - 1)?];
            let value = match u.int_in_range(0..=3)? {
                0 => format!("{}", u.int_in_range(-100i32..=100)?),
                1 => format!("{}", f64::from(u.int_in_range(0u32..=10_000)?) / 100.0),
                2 => ["glass", "talc", "n/a", ""][u.int_in_range(0..=3)?].to_string(),
                _ => String::arbitrary(u)?,
            };
            q.push_str(&format!("{}:{} ", field, value));
        }
        if u.arbitrary()? {
            q.push_str(&format!("id:P{}^{} ", u.int_in_range(0u32..=40)?, u.int_in_range(0u32..=9)?));
        }

        let mut tolerances = Vec::new();
        for _ in 0..u.int_in_range(0..=4)? {
            let field = FIELDS[u.int_in_range(0..=FIELDS.len() - 1)?];
            let value = format!("{}", f64::from(u.int_in_range(0u32..=2_000)?) / 100.0);
            tolerances.push((format!("sub.{}", field), value));
        }

        Ok(Self {
            q,
            tolerances,
            weighted: String::arbitrary(u)?,
            baseline: f32::from(u.int_in_range(-1000i16..=1000)?),
            seed: u.arbitrary()?,
        })
    }
}

fuzz_target!(|input: ScoringInput| {
    let mut params = ParamMap::new().with("q", &input.q).with("wg.f", &input.weighted);
    for (name, value) in &input.tolerances {
        params.add(name, value);
    }

    let config = ScoringConfig::default();
    let Ok(first) = ScoringPlan::from_params(&params, &config) else {
        return;
    };
    let second = ScoringPlan::from_params(&params, &config).expect("second parse disagreed");
    assert_eq!(first, second);

    let segment = synthetic_segment(40, input.seed);
    let noop = first.is_noop();
    let a = AlternativeProductQuery::new((), first);
    let b = AlternativeProductQuery::new((), second);
    let (pa, pb) = (a.provider(&segment), b.provider(&segment));

    for doc in segment.doc_ids() {
        let score = pa.custom_score(doc, input.baseline, &[]);
        assert_eq!(score.to_bits(), pb.custom_score(doc, input.baseline, &[]).to_bits());
        if noop {
            assert_eq!(score.to_bits(), input.baseline.to_bits());
        } else {
            assert!(score.is_finite(), "score {} for {:?}", score, doc);
        }
    }
});
