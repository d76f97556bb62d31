//! Classification orchestrator.
//!
//! Runs the rule engine, grades the group's severity, validates the severity
//! label against the measured affect, and shapes the category distribution.

use std::borrow::Cow;

use affect_types::{
    clamp_unit, AffectResult, ClassificationInput, ClassificationResult, ExpectationRecord,
};
use tracing::debug;

use crate::alternatives::find_alternatives;
use crate::config::ClassifierConfig;
use crate::distance::check_consistency;
use crate::distribution::CategoryDistribution;
use crate::library::AffectLibrary;
use crate::rules::RuleEngine;
use crate::severity::SeverityLadders;

/// Distribution label for the confusion entry.
pub const CONFUSION_LABEL: &str = "Confused";

/// Weight of the missing appraisal confidence in the confusion mass.
const UNCERTAINTY_WEIGHT: f64 = 0.7;
/// Weight of the affect inconsistency in the confusion mass.
const INCONSISTENCY_WEIGHT: f64 = 0.5;

/// Affect classifier. Stateless between calls; safe to share across threads.
#[derive(Clone, Debug)]
pub struct Classifier {
    config: ClassifierConfig,
    engine: RuleEngine,
    library: &'static AffectLibrary,
    ladders: Cow<'static, SeverityLadders>,
}

impl Default for Classifier {
    fn default() -> Self {
        let config = ClassifierConfig::default();
        Self {
            engine: RuleEngine::new(&config),
            config,
            library: AffectLibrary::builtin(),
            ladders: Cow::Borrowed(SeverityLadders::builtin()),
        }
    }
}

impl Classifier {
    /// Build a classifier from a validated configuration.
    pub fn new(config: ClassifierConfig) -> AffectResult<Self> {
        config.validate()?;
        Ok(Self {
            engine: RuleEngine::new(&config),
            config,
            ..Self::default()
        })
    }

    /// Replace the built-in severity ladders.
    pub fn with_ladders(mut self, ladders: SeverityLadders) -> Self {
        self.ladders = Cow::Owned(ladders);
        self
    }

    pub fn library(&self) -> &'static AffectLibrary {
        self.library
    }

    /// Classify one appraisal. Never fails; out-of-range numbers are clamped.
    pub fn classify(&self, input: &ClassificationInput) -> ClassificationResult {
        let instance = input.instance.clamped();
        let outcome = self.engine.evaluate(&input.appraisal, &instance);

        let expectation_power = ExpectationRecord::primary(&input.expectations)
            .map_or(self.config.default_expectation_power, |record| {
                record.power_level
            });
        let severity_label = self.ladders.label_for_group(
            outcome.group,
            expectation_power,
            instance.power_level,
        );

        let reference = self.library.reference_for(outcome.group, &severity_label);
        let consistency =
            check_consistency(&input.vad, &reference, self.config.consistency_decay);

        let category_distribution = self
            .distribution(
                &severity_label,
                outcome.confidence,
                outcome.average_confidence,
                consistency,
                input,
            )
            .finalize(self.config.probability_cap);

        let primary_label = category_distribution
            .first()
            .map_or_else(|| severity_label.clone(), |entry| entry.label.clone());

        debug!(
            group = %outcome.group,
            group_confidence = outcome.confidence,
            severity = %severity_label,
            primary = %primary_label,
            consistency,
            entries = category_distribution.len(),
            "classified appraisal"
        );

        ClassificationResult {
            primary_label,
            severity_label,
            emotion_group: outcome.group,
            group_confidence: outcome.confidence,
            rule_trace: outcome.trace,
            vad: input.vad,
            category_distribution,
            consistency_score: consistency,
        }
    }

    fn distribution(
        &self,
        severity_label: &str,
        group_confidence: f64,
        average_confidence: f64,
        consistency: f64,
        input: &ClassificationInput,
    ) -> CategoryDistribution {
        let config = &self.config;
        let mut distribution = CategoryDistribution::new();

        let primary = group_confidence * config.group_confidence_weight
            + consistency * (1.0 - config.group_confidence_weight);
        distribution.add(severity_label, primary);

        let confusion = ((1.0 - average_confidence) * UNCERTAINTY_WEIGHT)
            .max((1.0 - consistency) * INCONSISTENCY_WEIGHT)
            .min(config.confusion_ceiling);
        let confusion = if confusion > config.confusion_inclusion_floor {
            distribution.add(CONFUSION_LABEL, confusion);
            confusion
        } else {
            0.0
        };

        let remaining = clamp_unit(1.0 - primary - confusion);
        if consistency < config.alternative_consistency_threshold && remaining > 0.0 {
            let alternatives = find_alternatives(
                self.library,
                &input.vad,
                severity_label,
                config.alternative_count,
            );
            let others = alternatives.len().saturating_sub(1).max(1) as f64;
            for (rank, alternative) in alternatives.iter().enumerate() {
                let share = if rank == 0 {
                    config.alternative_primary_share
                } else {
                    (1.0 - config.alternative_primary_share) / others
                };
                let mass = remaining * share;
                if mass <= 0.0 {
                    continue;
                }
                debug!(label = %alternative.label, distance = alternative.distance, mass, "alternative");
                distribution.add(&alternative.label, mass);
            }
        }

        distribution
    }
}

/// Classify with the default configuration and built-in tables.
pub fn classify(input: &ClassificationInput) -> ClassificationResult {
    Classifier::default().classify(input)
}
