//! Reference affect library.
//!
//! Every canonical emotion label is defined exactly once per severity ladder,
//! together with its reference coordinate in valence/arousal/dominance space.
//! The library, the built-in severity ladders, and the group membership map
//! are all derived from [`REFERENCE_LADDERS`] and built once per process.
//!
//! A handful of labels (`Uneasy`, `Dread`, `Humiliated`) sit on two ladders
//! with different coordinates. Plain label lookups resolve to the last
//! definition; [`AffectLibrary::reference_for`] prefers the coordinate owned by
//! the group being classified. See [`AffectLibrary::conflicting_labels`].

use std::collections::HashMap;

use affect_types::{AffectVector, EmotionGroup};
use once_cell::sync::Lazy;
use tracing::{debug, warn};

/// Label used when nothing better is known.
pub const NEUTRAL_LABEL: &str = "Neutral";

/// Name of the fallback severity ladder.
pub const DEFAULT_LADDER: &str = "Default";

/// Owner of a severity ladder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LadderKey {
    Group(EmotionGroup),
    Default,
}

impl LadderKey {
    pub fn name(&self) -> &'static str {
        match self {
            LadderKey::Group(group) => group.as_str(),
            LadderKey::Default => DEFAULT_LADDER,
        }
    }
}

/// One rung: label plus reference valence, arousal, dominance.
pub type Rung = (&'static str, f64, f64, f64);

/// Built-in severity ladders, mild to extreme, with reference coordinates.
pub const REFERENCE_LADDERS: &[(LadderKey, [Rung; 5])] = &[
    (
        LadderKey::Group(EmotionGroup::Fear),
        [
            ("Uneasy", -0.30, 0.45, 0.35),
            ("Nervous", -0.40, 0.60, 0.30),
            ("Afraid", -0.60, 0.70, 0.20),
            ("Terrified", -0.80, 0.85, 0.10),
            ("Panicked", -0.90, 0.95, 0.05),
        ],
    ),
    (
        LadderKey::Group(EmotionGroup::Anger),
        [
            ("Annoyed", -0.30, 0.50, 0.55),
            ("Frustrated", -0.50, 0.60, 0.50),
            ("Angry", -0.65, 0.75, 0.65),
            ("Furious", -0.80, 0.88, 0.70),
            ("Rage", -0.90, 0.97, 0.75),
        ],
    ),
    (
        LadderKey::Group(EmotionGroup::Sadness),
        [
            ("Disappointed", -0.35, 0.30, 0.35),
            ("Sad", -0.55, 0.25, 0.30),
            ("Sorrowful", -0.70, 0.20, 0.25),
            ("Grief-stricken", -0.85, 0.35, 0.15),
            ("Despair", -0.95, 0.30, 0.05),
        ],
    ),
    (
        LadderKey::Group(EmotionGroup::Worry),
        [
            ("Concerned", -0.20, 0.45, 0.45),
            ("Uneasy", -0.30, 0.50, 0.40),
            ("Worried", -0.45, 0.60, 0.35),
            ("Anxious", -0.60, 0.75, 0.25),
            ("Dread", -0.75, 0.80, 0.15),
        ],
    ),
    (
        LadderKey::Group(EmotionGroup::Regret),
        [
            ("Wistful", -0.20, 0.25, 0.40),
            ("Regretful", -0.45, 0.35, 0.35),
            ("Remorseful", -0.60, 0.40, 0.30),
            ("Guilt-ridden", -0.75, 0.55, 0.20),
            ("Anguished", -0.90, 0.70, 0.10),
        ],
    ),
    (
        LadderKey::Group(EmotionGroup::Happiness),
        [
            ("Content", 0.40, 0.25, 0.60),
            ("Pleased", 0.55, 0.40, 0.60),
            ("Happy", 0.70, 0.55, 0.65),
            ("Joyful", 0.85, 0.70, 0.70),
            ("Ecstatic", 0.95, 0.90, 0.75),
        ],
    ),
    (
        LadderKey::Group(EmotionGroup::PositiveAnticipation),
        [
            ("Hopeful", 0.35, 0.45, 0.50),
            ("Optimistic", 0.50, 0.50, 0.60),
            ("Eager", 0.60, 0.65, 0.60),
            ("Excited", 0.75, 0.80, 0.65),
            ("Thrilled", 0.90, 0.92, 0.70),
        ],
    ),
    (
        LadderKey::Group(EmotionGroup::NegativeAnticipation),
        [
            ("Hesitant", -0.20, 0.40, 0.35),
            ("Apprehensive", -0.35, 0.55, 0.30),
            ("Pessimistic", -0.50, 0.35, 0.30),
            ("Foreboding", -0.65, 0.60, 0.20),
            ("Dread", -0.80, 0.75, 0.10),
        ],
    ),
    (
        LadderKey::Group(EmotionGroup::Pride),
        [
            ("Satisfied", 0.45, 0.35, 0.65),
            ("Proud", 0.65, 0.55, 0.75),
            ("Accomplished", 0.70, 0.60, 0.80),
            ("Triumphant", 0.85, 0.80, 0.90),
            ("Exalted", 0.95, 0.90, 0.95),
        ],
    ),
    (
        LadderKey::Group(EmotionGroup::Shame),
        [
            ("Sheepish", -0.25, 0.35, 0.30),
            ("Guilty", -0.45, 0.45, 0.25),
            ("Ashamed", -0.60, 0.50, 0.20),
            ("Disgraced", -0.75, 0.55, 0.10),
            ("Humiliated", -0.85, 0.70, 0.05),
        ],
    ),
    (
        LadderKey::Group(EmotionGroup::Embarrassment),
        [
            ("Awkward", -0.20, 0.45, 0.35),
            ("Self-conscious", -0.30, 0.50, 0.30),
            ("Embarrassed", -0.45, 0.60, 0.25),
            ("Mortified", -0.70, 0.75, 0.15),
            ("Humiliated", -0.80, 0.80, 0.10),
        ],
    ),
    (
        LadderKey::Group(EmotionGroup::Flattery),
        [
            ("Acknowledged", 0.30, 0.35, 0.55),
            ("Appreciated", 0.50, 0.40, 0.60),
            ("Flattered", 0.60, 0.55, 0.60),
            ("Honored", 0.75, 0.60, 0.70),
            ("Revered", 0.85, 0.70, 0.80),
        ],
    ),
    (
        LadderKey::Group(EmotionGroup::Disgust),
        [
            ("Dislike", -0.30, 0.35, 0.55),
            ("Distaste", -0.45, 0.40, 0.55),
            ("Disgusted", -0.65, 0.55, 0.60),
            ("Revolted", -0.80, 0.70, 0.60),
            ("Repulsed", -0.90, 0.80, 0.55),
        ],
    ),
    (
        LadderKey::Group(EmotionGroup::Surprise),
        [
            ("Startled", 0.00, 0.65, 0.40),
            ("Surprised", 0.10, 0.75, 0.45),
            ("Amazed", 0.35, 0.80, 0.50),
            ("Astonished", 0.30, 0.88, 0.45),
            ("Stunned", 0.00, 0.95, 0.30),
        ],
    ),
    (
        LadderKey::Group(EmotionGroup::Stress),
        [
            ("Tense", -0.25, 0.60, 0.40),
            ("Pressured", -0.40, 0.70, 0.35),
            ("Stressed", -0.55, 0.80, 0.30),
            ("Overwhelmed", -0.70, 0.90, 0.15),
            ("Burnt out", -0.80, 0.40, 0.10),
        ],
    ),
    (
        LadderKey::Group(EmotionGroup::Relief),
        [
            ("Eased", 0.30, 0.25, 0.55),
            ("Relieved", 0.50, 0.20, 0.60),
            ("Reassured", 0.55, 0.30, 0.65),
            ("Unburdened", 0.70, 0.35, 0.70),
            ("Liberated", 0.85, 0.50, 0.80),
        ],
    ),
    (
        LadderKey::Group(EmotionGroup::Envy),
        [
            ("Longing", -0.15, 0.40, 0.35),
            ("Envious", -0.40, 0.55, 0.30),
            ("Jealous", -0.55, 0.65, 0.30),
            ("Resentful", -0.70, 0.70, 0.35),
            ("Bitter", -0.80, 0.60, 0.30),
        ],
    ),
    (
        LadderKey::Group(EmotionGroup::Love),
        [
            ("Fond", 0.50, 0.30, 0.55),
            ("Affectionate", 0.65, 0.40, 0.60),
            ("Caring", 0.70, 0.45, 0.65),
            ("Loving", 0.85, 0.55, 0.65),
            ("Adoring", 0.95, 0.70, 0.60),
        ],
    ),
    (
        LadderKey::Group(EmotionGroup::Confusion),
        [
            ("Unsure", -0.10, 0.40, 0.35),
            ("Puzzled", -0.15, 0.50, 0.35),
            ("Confused", -0.25, 0.55, 0.30),
            ("Bewildered", -0.35, 0.70, 0.20),
            ("Lost", -0.50, 0.60, 0.10),
        ],
    ),
    (
        LadderKey::Group(EmotionGroup::Boredom),
        [
            ("Indifferent", -0.05, 0.10, 0.50),
            ("Uninterested", -0.15, 0.10, 0.45),
            ("Bored", -0.30, 0.08, 0.40),
            ("Weary", -0.40, 0.05, 0.30),
            ("Apathetic", -0.50, 0.02, 0.25),
        ],
    ),
    (
        LadderKey::Group(EmotionGroup::Curiosity),
        [
            ("Interested", 0.30, 0.50, 0.55),
            ("Curious", 0.40, 0.60, 0.55),
            ("Intrigued", 0.50, 0.65, 0.60),
            ("Fascinated", 0.65, 0.75, 0.60),
            ("Captivated", 0.75, 0.85, 0.55),
        ],
    ),
    (
        LadderKey::Group(EmotionGroup::Neutral),
        [
            ("Calm", 0.10, 0.15, 0.60),
            ("Relaxed", 0.20, 0.10, 0.60),
            ("Neutral", 0.00, 0.30, 0.50),
            ("Attentive", 0.10, 0.50, 0.55),
            ("Alert", 0.05, 0.65, 0.55),
        ],
    ),
    (
        LadderKey::Default,
        [
            ("Calm", 0.10, 0.15, 0.60),
            ("Neutral", 0.00, 0.30, 0.50),
            ("Alert", 0.05, 0.65, 0.55),
            ("Stirred", 0.00, 0.75, 0.50),
            ("Agitated", -0.30, 0.85, 0.40),
        ],
    ),
];

/// A canonical label with its reference coordinate and owning ladder.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffectProfile {
    pub label: &'static str,
    pub ladder: LadderKey,
    pub vad: AffectVector,
}

/// Read-only index over the reference ladders.
#[derive(Debug)]
pub struct AffectLibrary {
    /// Every definition, in declaration order.
    profiles: Vec<AffectProfile>,
    /// Label to index of its last definition.
    by_label: HashMap<&'static str, usize>,
    /// Ladder owner to the indices of its rungs.
    by_ladder: HashMap<LadderKey, Vec<usize>>,
    /// Labels in first-seen order, each listed once.
    unique_labels: Vec<&'static str>,
}

static BUILTIN: Lazy<AffectLibrary> = Lazy::new(|| AffectLibrary::from_ladders(REFERENCE_LADDERS));

impl AffectLibrary {
    /// The process-wide library built from [`REFERENCE_LADDERS`].
    pub fn builtin() -> &'static AffectLibrary {
        &BUILTIN
    }

    pub fn from_ladders(ladders: &[(LadderKey, [Rung; 5])]) -> Self {
        let mut profiles = Vec::with_capacity(ladders.len() * 5);
        let mut by_label = HashMap::new();
        let mut by_ladder: HashMap<LadderKey, Vec<usize>> = HashMap::new();
        let mut unique_labels = Vec::new();

        for (key, rungs) in ladders {
            for &(label, valence, arousal, dominance) in rungs {
                let index = profiles.len();
                profiles.push(AffectProfile {
                    label,
                    ladder: *key,
                    vad: AffectVector::reference(valence, arousal, dominance),
                });
                if by_label.insert(label, index).is_none() {
                    unique_labels.push(label);
                }
                by_ladder.entry(*key).or_default().push(index);
            }
        }

        let library = Self {
            profiles,
            by_label,
            by_ladder,
            unique_labels,
        };
        for label in library.conflicting_labels() {
            debug!(label, "label defined on several ladders with different coordinates");
        }
        library
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.unique_labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unique_labels.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.by_label.contains_key(label)
    }

    /// Reference coordinate for `label`; the last definition wins.
    pub fn lookup(&self, label: &str) -> Option<AffectVector> {
        self.by_label.get(label).map(|&index| self.profiles[index].vad)
    }

    /// Coordinate of `label` as defined on `group`'s own ladder.
    pub fn lookup_in_group(&self, group: EmotionGroup, label: &str) -> Option<AffectVector> {
        self.by_ladder
            .get(&LadderKey::Group(group))?
            .iter()
            .map(|&index| &self.profiles[index])
            .find(|profile| profile.label == label)
            .map(|profile| profile.vad)
    }

    /// Reference coordinate used to validate a severity label.
    ///
    /// Prefers the group's own definition, then the label's last definition,
    /// then the `Neutral` coordinate.
    pub fn reference_for(&self, group: EmotionGroup, label: &str) -> AffectVector {
        if let Some(vad) = self.lookup_in_group(group, label) {
            return vad;
        }
        if let Some(vad) = self.lookup(label) {
            return vad;
        }
        warn!(label, group = %group, "no reference coordinate; using Neutral");
        self.lookup(NEUTRAL_LABEL).unwrap_or_else(AffectVector::neutral)
    }

    /// Each distinct label with its resolved (last-definition) coordinate.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, AffectVector)> + '_ {
        self.unique_labels
            .iter()
            .map(move |&label| (label, self.profiles[self.by_label[label]].vad))
    }

    /// Labels on `group`'s ladder with that ladder's coordinates, mild first.
    pub fn members(&self, group: EmotionGroup) -> impl Iterator<Item = &AffectProfile> + '_ {
        self.by_ladder
            .get(&LadderKey::Group(group))
            .into_iter()
            .flatten()
            .map(move |&index| &self.profiles[index])
    }

    /// True when `label` sits on `group`'s ladder.
    pub fn is_member(&self, group: EmotionGroup, label: &str) -> bool {
        self.members(group).any(|profile| profile.label == label)
    }

    /// Ladders that define `label`, in declaration order.
    pub fn owners(&self, label: &str) -> Vec<LadderKey> {
        self.profiles
            .iter()
            .filter(|profile| profile.label == label)
            .map(|profile| profile.ladder)
            .collect()
    }

    /// Labels defined more than once with differing coordinates.
    pub fn conflicting_labels(&self) -> Vec<&'static str> {
        self.unique_labels
            .iter()
            .copied()
            .filter(|&label| {
                let mut coords = self
                    .profiles
                    .iter()
                    .filter(|profile| profile.label == label)
                    .map(|profile| profile.vad);
                match coords.next() {
                    Some(first) => coords.any(|other| other != first),
                    None => false,
                }
            })
            .collect()
    }

    /// Rung labels of a ladder, mild first.
    pub(crate) fn ladder_labels(&self, key: LadderKey) -> Option<Vec<&'static str>> {
        self.by_ladder
            .get(&key)
            .map(|indices| indices.iter().map(|&index| self.profiles[index].label).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_holds_about_a_hundred_labels() {
        let library = AffectLibrary::builtin();
        assert!(library.len() >= 100, "only {} labels", library.len());
        assert!(library.contains("Rage"));
        assert!(library.contains(NEUTRAL_LABEL));
    }

    #[test]
    fn every_group_has_a_ladder() {
        let library = AffectLibrary::builtin();
        for group in EmotionGroup::ALL {
            assert_eq!(library.members(group).count(), 5, "{group} ladder");
        }
    }

    #[test]
    fn duplicates_are_flagged() {
        let library = AffectLibrary::builtin();
        let conflicts = library.conflicting_labels();
        assert!(conflicts.contains(&"Dread"));
        assert!(conflicts.contains(&"Uneasy"));
        assert!(conflicts.contains(&"Humiliated"));
        // Identical redefinitions are not conflicts.
        assert!(!conflicts.contains(&"Calm"));
    }

    #[test]
    fn plain_lookup_is_last_definition_wins() {
        let library = AffectLibrary::builtin();
        let dread = library.lookup("Dread").unwrap();
        let negative = library
            .lookup_in_group(EmotionGroup::NegativeAnticipation, "Dread")
            .unwrap();
        let worry = library.lookup_in_group(EmotionGroup::Worry, "Dread").unwrap();
        assert_eq!(dread, negative);
        assert_ne!(dread, worry);
        assert_eq!(
            library.owners("Dread"),
            vec![
                LadderKey::Group(EmotionGroup::Worry),
                LadderKey::Group(EmotionGroup::NegativeAnticipation)
            ]
        );
    }

    #[test]
    fn reference_prefers_the_owning_group() {
        let library = AffectLibrary::builtin();
        let worry = library.reference_for(EmotionGroup::Worry, "Dread");
        assert_eq!(worry, library.lookup_in_group(EmotionGroup::Worry, "Dread").unwrap());
    }

    #[test]
    fn reference_falls_back_to_neutral() {
        let library = AffectLibrary::builtin();
        let vad = library.reference_for(EmotionGroup::Anger, "Ennui");
        assert_eq!(vad, library.lookup(NEUTRAL_LABEL).unwrap());
    }

    #[test]
    fn membership_is_explicit() {
        let library = AffectLibrary::builtin();
        assert!(library.is_member(EmotionGroup::Anger, "Rage"));
        assert!(!library.is_member(EmotionGroup::Anger, "Afraid"));
        // A label sharing text with the group name is not thereby a member.
        assert!(!library.is_member(EmotionGroup::Fear, "Fearless"));
    }
}
