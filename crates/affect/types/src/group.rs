//! Coarse emotion groups.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AffectError;

/// One of the fixed coarse emotion families produced by the rule engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionGroup {
    Fear,
    Anger,
    Sadness,
    Worry,
    Regret,
    Happiness,
    PositiveAnticipation,
    NegativeAnticipation,
    Pride,
    Shame,
    Embarrassment,
    Flattery,
    Disgust,
    Surprise,
    Stress,
    Relief,
    Envy,
    Love,
    Confusion,
    Boredom,
    Curiosity,
    Neutral,
}

impl EmotionGroup {
    /// Every group, in declaration order.
    pub const ALL: [EmotionGroup; 22] = [
        EmotionGroup::Fear,
        EmotionGroup::Anger,
        EmotionGroup::Sadness,
        EmotionGroup::Worry,
        EmotionGroup::Regret,
        EmotionGroup::Happiness,
        EmotionGroup::PositiveAnticipation,
        EmotionGroup::NegativeAnticipation,
        EmotionGroup::Pride,
        EmotionGroup::Shame,
        EmotionGroup::Embarrassment,
        EmotionGroup::Flattery,
        EmotionGroup::Disgust,
        EmotionGroup::Surprise,
        EmotionGroup::Stress,
        EmotionGroup::Relief,
        EmotionGroup::Envy,
        EmotionGroup::Love,
        EmotionGroup::Confusion,
        EmotionGroup::Boredom,
        EmotionGroup::Curiosity,
        EmotionGroup::Neutral,
    ];

    /// Canonical group name, e.g. `"Anger Group"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionGroup::Fear => "Fear Group",
            EmotionGroup::Anger => "Anger Group",
            EmotionGroup::Sadness => "Sadness Group",
            EmotionGroup::Worry => "Worry Group",
            EmotionGroup::Regret => "Regret Group",
            EmotionGroup::Happiness => "Happiness Group",
            EmotionGroup::PositiveAnticipation => "Positive Anticipation Group",
            EmotionGroup::NegativeAnticipation => "Negative Anticipation Group",
            EmotionGroup::Pride => "Pride Group",
            EmotionGroup::Shame => "Shame Group",
            EmotionGroup::Embarrassment => "Embarrassment Group",
            EmotionGroup::Flattery => "Flattery Group",
            EmotionGroup::Disgust => "Disgust Group",
            EmotionGroup::Surprise => "Surprise Group",
            EmotionGroup::Stress => "Stress Group",
            EmotionGroup::Relief => "Relief Group",
            EmotionGroup::Envy => "Envy Group",
            EmotionGroup::Love => "Love Group",
            EmotionGroup::Confusion => "Confusion Group",
            EmotionGroup::Boredom => "Boredom Group",
            EmotionGroup::Curiosity => "Curiosity Group",
            EmotionGroup::Neutral => "Neutral Group",
        }
    }

    /// Group name without the `" Group"` suffix.
    pub fn family(&self) -> &'static str {
        let name = self.as_str();
        name.strip_suffix(" Group").unwrap_or(name)
    }
}

impl fmt::Display for EmotionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmotionGroup {
    type Err = AffectError;

    /// Accepts `"Anger Group"`, `"Anger"`, `"anger"`, or `"positive_anticipation"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let squash = |text: &str| -> String {
            text.chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .map(|c| c.to_ascii_lowercase())
                .collect()
        };
        let wanted = squash(s);
        let wanted = wanted.strip_suffix("group").unwrap_or(&wanted);
        EmotionGroup::ALL
            .iter()
            .copied()
            .find(|group| squash(group.family()) == wanted)
            .ok_or_else(|| AffectError::UnknownGroup(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_group_suffix() {
        assert_eq!(EmotionGroup::Anger.to_string(), "Anger Group");
        assert_eq!(
            EmotionGroup::PositiveAnticipation.to_string(),
            "Positive Anticipation Group"
        );
        assert_eq!(EmotionGroup::NegativeAnticipation.family(), "Negative Anticipation");
    }

    #[test]
    fn parses_with_and_without_suffix() {
        assert_eq!("Anger Group".parse::<EmotionGroup>().unwrap(), EmotionGroup::Anger);
        assert_eq!("anger".parse::<EmotionGroup>().unwrap(), EmotionGroup::Anger);
        assert_eq!(
            "positive_anticipation".parse::<EmotionGroup>().unwrap(),
            EmotionGroup::PositiveAnticipation
        );
        assert!("Melancholy Group".parse::<EmotionGroup>().is_err());
    }

    #[test]
    fn every_group_round_trips_through_its_name() {
        for group in EmotionGroup::ALL {
            assert_eq!(group.as_str().parse::<EmotionGroup>().unwrap(), group);
        }
    }
}
