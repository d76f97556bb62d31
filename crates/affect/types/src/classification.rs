//! Classifier input and output values.

use serde::{Deserialize, Serialize};

use crate::affect::{AffectVector, ExpectationRecord};
use crate::appraisal::{AppraisalInstance, AppraisalSet};
use crate::group::EmotionGroup;

/// Ordered record of which rule branches fired during classification.
///
/// A trace built through [`RuleTrace::new`] is never empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleTrace(Vec<String>);

impl RuleTrace {
    pub fn new(first: impl Into<String>) -> Self {
        Self(vec![first.into()])
    }

    pub fn push(&mut self, step: impl Into<String>) {
        self.0.push(step.into());
    }

    pub fn steps(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }
}

/// One labelled entry of a probability distribution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryProbability {
    pub label: String,
    pub probability: f64,
}

impl CategoryProbability {
    pub fn new(label: impl Into<String>, probability: f64) -> Self {
        Self {
            label: label.into(),
            probability,
        }
    }
}

/// Everything the upstream appraisal extractor hands to the classifier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassificationInput {
    pub appraisal: AppraisalSet,
    pub instance: AppraisalInstance,
    /// Measured affect of the utterance.
    pub vad: AffectVector,
    #[serde(default)]
    pub expectations: Vec<ExpectationRecord>,
}

impl ClassificationInput {
    pub fn new(appraisal: AppraisalSet, instance: AppraisalInstance, vad: AffectVector) -> Self {
        Self {
            appraisal,
            instance,
            vad,
            expectations: Vec::new(),
        }
    }

    pub fn with_expectations(mut self, expectations: Vec<ExpectationRecord>) -> Self {
        self.expectations = expectations;
        self
    }
}

/// Final output of one classification call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Label of the most probable distribution entry.
    pub primary_label: String,
    /// Severity-graded label chosen for the rule engine's group. May differ
    /// from `primary_label` once the distribution has been reshaped.
    pub severity_label: String,
    pub emotion_group: EmotionGroup,
    pub group_confidence: f64,
    pub rule_trace: RuleTrace,
    pub vad: AffectVector,
    /// Sorted by descending probability; sums to 1.0.
    pub category_distribution: Vec<CategoryProbability>,
    pub consistency_score: f64,
}

impl ClassificationResult {
    /// Probability assigned to `label`, or `0.0` when absent.
    pub fn probability_of(&self, label: &str) -> f64 {
        self.category_distribution
            .iter()
            .find(|entry| entry.label == label)
            .map_or(0.0, |entry| entry.probability)
    }

    /// True when the top distribution entry is not the severity label.
    pub fn label_diverged(&self) -> bool {
        self.primary_label != self.severity_label
    }

    /// One-sentence rendering of the rule trace for explanation surfaces.
    pub fn rationale(&self) -> String {
        let mut text = format!(
            "Classified as {} ({}) with confidence {:.2}: {}.",
            self.severity_label,
            self.emotion_group,
            self.group_confidence,
            self.rule_trace.steps().join("; then ")
        );
        if self.label_diverged() {
            text.push_str(&format!(
                " The measured affect favours {} instead (consistency {:.2}).",
                self.primary_label, self.consistency_score
            ));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ClassificationResult {
        let mut trace = RuleTrace::new("negative resisted present: external source");
        trace.push("anger");
        ClassificationResult {
            primary_label: "Frustrated".into(),
            severity_label: "Frustrated".into(),
            emotion_group: EmotionGroup::Anger,
            group_confidence: 0.81,
            rule_trace: trace,
            vad: AffectVector::neutral(),
            category_distribution: vec![
                CategoryProbability::new("Frustrated", 0.8),
                CategoryProbability::new("Confused", 0.2),
            ],
            consistency_score: 0.9,
        }
    }

    #[test]
    fn trace_is_never_empty_when_constructed() {
        let trace = RuleTrace::new("low overall confidence");
        assert!(!trace.is_empty());
        assert_eq!(trace.last(), Some("low overall confidence"));
    }

    #[test]
    fn trace_serializes_as_plain_list() {
        let trace = RuleTrace::new("a");
        assert_eq!(serde_json::to_string(&trace).unwrap(), "[\"a\"]");
    }

    #[test]
    fn probability_lookup() {
        let result = sample();
        assert_eq!(result.probability_of("Confused"), 0.2);
        assert_eq!(result.probability_of("Rage"), 0.0);
    }

    #[test]
    fn rationale_mentions_group_and_steps() {
        let mut result = sample();
        let text = result.rationale();
        assert!(text.contains("Anger Group"));
        assert!(text.contains("external source"));
        assert!(!text.contains("instead"));

        result.primary_label = "Confused".into();
        assert!(result.rationale().contains("favours Confused"));
    }
}
