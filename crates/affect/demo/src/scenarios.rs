//! Canned appraisals covering the main rule branches.

use affect_types::{
    AcceptanceState, AffectVector, AppraisalInstance, AppraisalSet, AppraisalVariable,
    ClassificationInput, ExpectationRecord, Perspective, Source, Timeframe,
};

/// A named appraisal to classify.
pub struct Scenario {
    pub name: &'static str,
    pub utterance: &'static str,
    pub input: ClassificationInput,
}

fn appraisal(
    source: (Source, f64),
    perspective: (Perspective, f64),
    timeframe: (Timeframe, f64),
    acceptance: (AcceptanceState, f64),
) -> AppraisalSet {
    AppraisalSet::new(
        AppraisalVariable::new(source.0, source.1),
        AppraisalVariable::new(perspective.0, perspective.1),
        AppraisalVariable::new(timeframe.0, timeframe.1),
        AppraisalVariable::new(acceptance.0, acceptance.1),
    )
}

pub fn all() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "blocked deploy",
            utterance: "They pushed a broken config and took the service down again.",
            input: ClassificationInput::new(
                appraisal(
                    (Source::External, 0.9),
                    (Perspective::Oneself, 0.9),
                    (Timeframe::Present, 0.9),
                    (AcceptanceState::Resisted, 0.9),
                ),
                AppraisalInstance::new(-0.6, 0.8, 0.9),
                AffectVector::new(-0.6, 0.75, 0.6, 0.8),
            )
            .with_expectations(vec![
                ExpectationRecord::new("exp-1", "stable releases", 7.0).with_activation(0.8),
                ExpectationRecord::new("exp-2", "code review", 3.0).with_activation(0.3),
            ]),
        },
        Scenario {
            name: "missed deadline",
            utterance: "I should have started the report earlier.",
            input: ClassificationInput::new(
                appraisal(
                    (Source::ValueSelf, 0.6),
                    (Perspective::Oneself, 0.8),
                    (Timeframe::Past, 0.9),
                    (AcceptanceState::Accepted, 0.8),
                ),
                AppraisalInstance::new(-0.5, 0.4, 0.8),
                AffectVector::new(-0.5, 0.35, 0.3, 0.7),
            ),
        },
        Scenario {
            name: "upcoming review",
            utterance: "The audit next week is going to find something, I know it.",
            input: ClassificationInput::new(
                appraisal(
                    (Source::Internal, 0.8),
                    (Perspective::Oneself, 0.9),
                    (Timeframe::Future, 0.9),
                    (AcceptanceState::Resisted, 0.7),
                ),
                AppraisalInstance::new(-0.4, 0.6, 0.8),
                AffectVector::new(-0.4, 0.6, 0.35, 0.7),
            ),
        },
        Scenario {
            name: "friend's visit",
            utterance: "My sister flew in to surprise me for my birthday.",
            input: ClassificationInput::new(
                appraisal(
                    (Source::External, 0.9),
                    (Perspective::Both, 0.7),
                    (Timeframe::Present, 0.9),
                    (AcceptanceState::Accepted, 0.9),
                ),
                AppraisalInstance::new(0.8, 0.7, 0.9),
                AffectVector::new(0.8, 0.5, 0.6, 0.9),
            ),
        },
        Scenario {
            name: "mixed signals",
            utterance: "Not sure what to make of the reorg announcement.",
            input: ClassificationInput::new(
                appraisal(
                    (Source::External, 0.5),
                    (Perspective::Unclear, 0.3),
                    (Timeframe::Ongoing, 0.6),
                    (AcceptanceState::Uncertain, 0.5),
                ),
                AppraisalInstance::new(-0.1, 0.3, 0.4),
                AffectVector::new(-0.1, 0.5, 0.4, 0.5),
            ),
        },
    ]
}
