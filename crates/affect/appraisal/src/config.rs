use affect_types::{AffectError, AffectResult};
use serde::{Deserialize, Serialize};

use crate::distance::DEFAULT_CONSISTENCY_DECAY;

/// Tunable thresholds and weights of the classifier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Mean appraisal confidence below which the result is Confusion.
    pub min_average_confidence: f64,
    /// Scale applied to the mean confidence when a critical variable is unclear.
    pub unclear_confidence_factor: f64,
    /// Source confidence needed before a self-attributed event becomes Shame/Embarrassment.
    pub self_attribution_min_confidence: f64,
    /// Decay rate of the distance-to-consistency mapping.
    pub consistency_decay: f64,
    /// Share of the primary probability taken from group confidence; the rest
    /// comes from the consistency score.
    pub group_confidence_weight: f64,
    /// Upper bound on the confusion entry.
    pub confusion_ceiling: f64,
    /// Confusion mass at or below this is left out of the distribution.
    pub confusion_inclusion_floor: f64,
    /// Consistency below which nearest-neighbour alternatives are added.
    pub alternative_consistency_threshold: f64,
    /// Number of alternatives to add.
    pub alternative_count: usize,
    /// Share of the leftover mass given to the nearest alternative; the second
    /// takes the remainder.
    pub alternative_primary_share: f64,
    /// Cap on any single distribution entry.
    pub probability_cap: f64,
    /// Expectation power (`[0, 10]`) assumed when no expectation is supplied.
    pub default_expectation_power: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_average_confidence: 0.6,
            unclear_confidence_factor: 0.8,
            self_attribution_min_confidence: 0.7,
            consistency_decay: DEFAULT_CONSISTENCY_DECAY,
            group_confidence_weight: 0.7,
            confusion_ceiling: 0.8,
            confusion_inclusion_floor: 0.1,
            alternative_consistency_threshold: 0.7,
            alternative_count: 2,
            alternative_primary_share: 0.7,
            probability_cap: 0.9,
            default_expectation_power: 5.0,
        }
    }
}

impl ClassifierConfig {
    /// Stricter gating: demands more extractor confidence and tighter affect agreement.
    pub fn strict() -> Self {
        Self {
            min_average_confidence: 0.7,
            self_attribution_min_confidence: 0.8,
            consistency_decay: 3.0,
            alternative_consistency_threshold: 0.8,
            ..Self::default()
        }
    }

    /// Parse from JSON; missing fields take their defaults. The result is validated.
    pub fn from_json(json: &str) -> AffectResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> AffectResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> AffectResult<()> {
        check_unit("min_average_confidence", self.min_average_confidence)?;
        check_unit("unclear_confidence_factor", self.unclear_confidence_factor)?;
        check_unit(
            "self_attribution_min_confidence",
            self.self_attribution_min_confidence,
        )?;
        check_unit("group_confidence_weight", self.group_confidence_weight)?;
        check_unit("confusion_ceiling", self.confusion_ceiling)?;
        check_unit("confusion_inclusion_floor", self.confusion_inclusion_floor)?;
        check_unit(
            "alternative_consistency_threshold",
            self.alternative_consistency_threshold,
        )?;
        check_unit("alternative_primary_share", self.alternative_primary_share)?;

        if !(self.consistency_decay.is_finite() && self.consistency_decay > 0.0) {
            return Err(AffectError::invalid_config(
                "consistency_decay",
                format!("must be a positive finite number, got {}", self.consistency_decay),
            ));
        }
        if !(self.probability_cap > 0.0 && self.probability_cap <= 1.0) {
            return Err(AffectError::invalid_config(
                "probability_cap",
                format!("must be in (0, 1], got {}", self.probability_cap),
            ));
        }
        if !(0.0..=10.0).contains(&self.default_expectation_power) {
            return Err(AffectError::invalid_config(
                "default_expectation_power",
                format!("must be in [0, 10], got {}", self.default_expectation_power),
            ));
        }
        Ok(())
    }
}

fn check_unit(field: &str, value: f64) -> AffectResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(AffectError::invalid_config(
            field,
            format!("must be in [0, 1], got {value}"),
        ))
    }
}
