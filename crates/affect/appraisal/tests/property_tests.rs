//! Property tests over randomly generated appraisals.

use affect_appraisal::{
    check_consistency, classify, consistency, distance, find_alternatives, AffectLibrary,
    CategoryDistribution, DEFAULT_CONSISTENCY_DECAY,
};
use affect_types::{
    AcceptanceState, AffectVector, AppraisalInstance, AppraisalSet, AppraisalVariable,
    ClassificationInput, EmotionGroup, ExpectationRecord, Perspective, Source, Timeframe,
};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_source() -> impl Strategy<Value = Source> {
    prop_oneof![
        Just(Source::Internal),
        Just(Source::External),
        Just(Source::ValueSelf),
        Just(Source::Unclear),
    ]
}

fn arb_perspective() -> impl Strategy<Value = Perspective> {
    prop_oneof![
        Just(Perspective::Oneself),
        Just(Perspective::Other),
        Just(Perspective::Both),
        Just(Perspective::Unclear),
    ]
}

fn arb_timeframe() -> impl Strategy<Value = Timeframe> {
    prop_oneof![
        Just(Timeframe::Present),
        Just(Timeframe::Past),
        Just(Timeframe::Future),
        Just(Timeframe::Ongoing),
        Just(Timeframe::Unclear),
    ]
}

fn arb_acceptance() -> impl Strategy<Value = AcceptanceState> {
    prop_oneof![
        Just(AcceptanceState::Accepted),
        Just(AcceptanceState::Resisted),
        Just(AcceptanceState::Uncertain),
        Just(AcceptanceState::Unclear),
    ]
}

fn arb_appraisal() -> impl Strategy<Value = AppraisalSet> {
    (
        (arb_source(), 0.0..=1.0f64),
        (arb_perspective(), 0.0..=1.0f64),
        (arb_timeframe(), 0.0..=1.0f64),
        (arb_acceptance(), 0.0..=1.0f64),
    )
        .prop_map(|((s, sc), (p, pc), (t, tc), (a, ac))| {
            AppraisalSet::new(
                AppraisalVariable::new(s, sc),
                AppraisalVariable::new(p, pc),
                AppraisalVariable::new(t, tc),
                AppraisalVariable::new(a, ac),
            )
        })
}

fn arb_vad() -> impl Strategy<Value = AffectVector> {
    (-1.0..=1.0f64, 0.0..=1.0f64, 0.0..=1.0f64, 0.0..=1.0f64)
        .prop_map(|(v, a, d, c)| AffectVector::new(v, a, d, c))
}

fn arb_input() -> impl Strategy<Value = ClassificationInput> {
    (
        arb_appraisal(),
        prop_oneof![Just(0.0f64), -1.5..=1.5f64],
        -0.5..=1.5f64,
        arb_vad(),
        prop::option::of(0.0..=10.0f64),
    )
        .prop_map(|(appraisal, valuation, power, vad, expectation)| {
            let input = ClassificationInput::new(
                appraisal,
                AppraisalInstance {
                    valuation_shift: valuation,
                    power_level: power,
                    appraisal_confidence: 0.9,
                },
                vad,
            );
            match expectation {
                Some(level) => input.with_expectations(vec![
                    ExpectationRecord::new("e", "expectation", level).with_activation(1.0),
                ]),
                None => input,
            }
        })
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn distribution_sums_to_one(input in arb_input()) {
        let result = classify(&input);
        let total: f64 = result.category_distribution.iter().map(|e| e.probability).sum();
        prop_assert!((total - 1.0).abs() < 1e-5, "sum {}", total);
    }

    #[test]
    fn entries_respect_the_cap(input in arb_input()) {
        let result = classify(&input);
        if result.category_distribution.len() > 1 {
            for entry in &result.category_distribution {
                prop_assert!(entry.probability <= 0.9 + 1e-9, "{:?}", entry);
            }
        }
    }

    #[test]
    fn distribution_is_sorted_and_bounded(input in arb_input()) {
        let result = classify(&input);
        prop_assert!(result
            .category_distribution
            .windows(2)
            .all(|w| w[0].probability >= w[1].probability));
        prop_assert!((0.0..=1.0).contains(&result.consistency_score));
        prop_assert!((0.0..=1.0).contains(&result.group_confidence));
        prop_assert!(!result.rule_trace.is_empty());
    }

    #[test]
    fn low_mean_confidence_is_confusion(input in arb_input()) {
        let result = classify(&input);
        if input.appraisal.average_confidence() < 0.6 {
            prop_assert_eq!(result.emotion_group, EmotionGroup::Confusion);
        }
    }

    #[test]
    fn consistency_is_non_increasing(d1 in 0.0..5.0f64, d2 in 0.0..5.0f64) {
        let (near, far) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
        prop_assert!(
            consistency(near, DEFAULT_CONSISTENCY_DECAY)
                >= consistency(far, DEFAULT_CONSISTENCY_DECAY)
        );
    }

    #[test]
    fn self_distance_is_zero(vad in arb_vad()) {
        prop_assert_eq!(distance(&vad, &vad), 0.0);
        prop_assert_eq!(check_consistency(&vad, &vad, DEFAULT_CONSISTENCY_DECAY), 1.0);
    }

    #[test]
    fn alternatives_exclude_and_sort(vad in arb_vad(), count in 0usize..8) {
        let library = AffectLibrary::builtin();
        let found = find_alternatives(library, &vad, "Neutral", count);
        prop_assert_eq!(found.len(), count.min(library.len() - 1));
        prop_assert!(found.iter().all(|alt| alt.label != "Neutral"));
        prop_assert!(found.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn finalized_masses_sum_to_one(
        masses in prop::collection::vec(0.0..3.0f64, 1..8),
    ) {
        let mut dist = CategoryDistribution::new();
        for (index, mass) in masses.iter().enumerate() {
            dist.add(&format!("label-{index}"), *mass);
        }
        let entries = dist.finalize(0.9);
        let total: f64 = entries.iter().map(|e| e.probability).sum();
        prop_assert!((total - 1.0).abs() < 1e-9);
    }
}
