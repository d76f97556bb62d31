//! Severity grading within an emotion group.
//!
//! Combines the standing expectation's power (`[0, 10]`) with the immediate
//! perceived power (`[0, 1]`) into an intensity, then picks the matching rung
//! of the group's five-label ladder.

use std::collections::HashMap;

use affect_types::{clamp_unit, EmotionGroup};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::library::{AffectLibrary, DEFAULT_LADDER, REFERENCE_LADDERS};

/// Rungs per ladder.
pub const LADDER_LENGTH: usize = 5;

/// Weight of the expectation power in the intensity blend.
const EXPECTATION_WEIGHT: f64 = 0.6;
/// Weight of the perceived power in the intensity blend.
const PERCEPTION_WEIGHT: f64 = 0.4;

/// Group name to ordered severity labels, mild to extreme.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeverityLadders {
    ladders: HashMap<String, [String; LADDER_LENGTH]>,
}

static BUILTIN: Lazy<SeverityLadders> = Lazy::new(|| {
    let library = AffectLibrary::builtin();
    let ladders = REFERENCE_LADDERS
        .iter()
        .filter_map(|(key, _)| {
            let labels = library.ladder_labels(*key)?;
            let rungs: [String; LADDER_LENGTH] =
                std::array::from_fn(|index| labels[index].to_string());
            Some((key.name().to_string(), rungs))
        })
        .collect();
    SeverityLadders { ladders }
});

impl SeverityLadders {
    /// Ladders for every built-in group plus `Default`.
    pub fn builtin() -> &'static SeverityLadders {
        &BUILTIN
    }

    /// A caller-supplied table. Missing groups fall back to `Default`.
    pub fn from_map(ladders: HashMap<String, [String; LADDER_LENGTH]>) -> Self {
        Self { ladders }
    }

    pub fn ladder(&self, group_name: &str) -> Option<&[String; LADDER_LENGTH]> {
        self.ladders.get(group_name)
    }

    pub fn has_default(&self) -> bool {
        self.ladders.contains_key(DEFAULT_LADDER)
    }

    /// Severity label for a group name.
    ///
    /// Out-of-range powers are clamped. An unknown group uses the `Default`
    /// ladder; with no `Default` ladder the group name itself is returned.
    pub fn label_for(&self, group_name: &str, expectation_power: f64, perceived_power: f64) -> String {
        let ladder = self
            .ladders
            .get(group_name)
            .or_else(|| self.ladders.get(DEFAULT_LADDER));
        match ladder {
            Some(rungs) => {
                let index = rung_index(intensity(expectation_power, perceived_power));
                rungs[index].clone()
            }
            None => group_name.to_string(),
        }
    }

    /// Severity label for a typed group.
    pub fn label_for_group(
        &self,
        group: EmotionGroup,
        expectation_power: f64,
        perceived_power: f64,
    ) -> String {
        self.label_for(group.as_str(), expectation_power, perceived_power)
    }
}

impl Default for SeverityLadders {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

/// Blend of the two power measures, in `[0, 1]`.
pub fn intensity(expectation_power: f64, perceived_power: f64) -> f64 {
    let scaled_expectation = if expectation_power.is_nan() {
        0.0
    } else {
        expectation_power.clamp(0.0, 10.0) / 10.0
    };
    clamp_unit(scaled_expectation * EXPECTATION_WEIGHT + clamp_unit(perceived_power) * PERCEPTION_WEIGHT)
}

/// Ladder position for an intensity: `floor(intensity * 5)`, with `1.0` on the top rung.
pub fn rung_index(intensity: f64) -> usize {
    if intensity >= 1.0 {
        return LADDER_LENGTH - 1;
    }
    let scaled = (clamp_unit(intensity) * LADDER_LENGTH as f64).floor() as usize;
    scaled.min(LADDER_LENGTH - 1)
}

/// Severity label from the built-in ladders.
pub fn severity_label(group_name: &str, expectation_power: f64, perceived_power: f64) -> String {
    SeverityLadders::builtin().label_for(group_name, expectation_power, perceived_power)
}
