use serde::{Deserialize, Serialize};

use crate::appraisal::clamp_unit;

/// A point in valence/arousal/dominance space.
///
/// Valence is conventionally `[-1, 1]`, arousal and dominance `[0, 1]`. The
/// distance metric does not depend on the exact ranges, so coordinates are
/// stored as given. Only `confidence` is clamped.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AffectVector {
    pub valence: f64,
    pub arousal: f64,
    pub dominance: f64,
    pub confidence: f64,
}

impl AffectVector {
    pub fn new(valence: f64, arousal: f64, dominance: f64, confidence: f64) -> Self {
        Self {
            valence,
            arousal,
            dominance,
            confidence: clamp_unit(confidence),
        }
    }

    /// A fully confident reference coordinate.
    pub const fn reference(valence: f64, arousal: f64, dominance: f64) -> Self {
        Self {
            valence,
            arousal,
            dominance,
            confidence: 1.0,
        }
    }

    /// The calm, centred coordinate.
    pub const fn neutral() -> Self {
        Self::reference(0.0, 0.3, 0.5)
    }
}

impl Default for AffectVector {
    fn default() -> Self {
        Self::neutral()
    }
}

/// A standing expectation held by the agent, supplied by the upstream extractor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpectationRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Intensity of the expectation on a `[0, 10]` scale.
    pub power_level: f64,
    pub valuation: f64,
    pub activation_weight: f64,
}

impl ExpectationRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, power_level: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: "expectation".to_string(),
            power_level,
            valuation: 0.0,
            activation_weight: 0.0,
        }
    }

    pub fn with_activation(mut self, weight: f64) -> Self {
        self.activation_weight = weight;
        self
    }

    /// The expectation with the highest activation weight; the first wins ties.
    ///
    /// NaN weights never win.
    pub fn primary(records: &[ExpectationRecord]) -> Option<&ExpectationRecord> {
        let outranks = |candidate: &ExpectationRecord, current: &ExpectationRecord| {
            candidate.activation_weight > current.activation_weight
                || (current.activation_weight.is_nan() && !candidate.activation_weight.is_nan())
        };
        records
            .iter()
            .fold(None, |best: Option<&ExpectationRecord>, record| match best {
                Some(current) if !outranks(record, current) => Some(current),
                _ => Some(record),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_takes_highest_activation() {
        let records = vec![
            ExpectationRecord::new("a", "deadline", 3.0).with_activation(0.2),
            ExpectationRecord::new("b", "promotion", 8.0).with_activation(0.9),
            ExpectationRecord::new("c", "holiday", 5.0).with_activation(0.4),
        ];
        assert_eq!(ExpectationRecord::primary(&records).unwrap().id, "b");
    }

    #[test]
    fn primary_first_wins_ties() {
        let records = vec![
            ExpectationRecord::new("a", "x", 1.0).with_activation(0.5),
            ExpectationRecord::new("b", "y", 2.0).with_activation(0.5),
        ];
        assert_eq!(ExpectationRecord::primary(&records).unwrap().id, "a");
    }

    #[test]
    fn primary_of_empty_is_none() {
        assert!(ExpectationRecord::primary(&[]).is_none());
    }

    #[test]
    fn expectation_kind_serializes_as_type() {
        let record = ExpectationRecord::new("a", "x", 1.0);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "expectation");
    }

    #[test]
    fn affect_confidence_is_clamped() {
        let vad = AffectVector::new(-0.5, 0.7, 0.2, 4.0);
        assert_eq!(vad.confidence, 1.0);
        assert_eq!(vad.valence, -0.5);
    }
}
