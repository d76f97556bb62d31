//! Nearest-neighbour search over the reference library.

use std::cmp::Ordering;

use affect_types::{AffectVector, EmotionGroup};
use serde::{Deserialize, Serialize};

use crate::distance::distance;
use crate::library::AffectLibrary;

/// A candidate label and its distance from the measured affect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub label: String,
    pub distance: f64,
}

/// The `count` labels nearest to `vad`, excluding `exclude_label`.
///
/// Results are sorted by ascending distance; equal distances are ordered by
/// label so the output is deterministic.
pub fn find_alternatives(
    library: &AffectLibrary,
    vad: &AffectVector,
    exclude_label: &str,
    count: usize,
) -> Vec<Alternative> {
    let candidates = library
        .entries()
        .filter(|(label, _)| *label != exclude_label)
        .map(|(label, reference)| (label, distance(vad, &reference)));
    nearest(candidates, count)
}

/// Like [`find_alternatives`], restricted to labels on `group`'s ladder.
///
/// Membership comes from the library's explicit group map and distances use
/// the group's own coordinates.
pub fn find_alternatives_in_group(
    library: &AffectLibrary,
    vad: &AffectVector,
    group: EmotionGroup,
    exclude_label: &str,
    count: usize,
) -> Vec<Alternative> {
    let candidates = library
        .members(group)
        .filter(|profile| profile.label != exclude_label)
        .map(|profile| (profile.label, distance(vad, &profile.vad)));
    nearest(candidates, count)
}

fn nearest<'a>(candidates: impl Iterator<Item = (&'a str, f64)>, count: usize) -> Vec<Alternative> {
    if count == 0 {
        return Vec::new();
    }
    let mut scored: Vec<(&str, f64)> = candidates.collect();
    scored.sort_by(|a, b| {
        a.1.partial_cmp(&b.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });
    scored
        .into_iter()
        .take(count)
        .map(|(label, distance)| Alternative {
            label: label.to_string(),
            distance,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excludes_label_and_respects_count() {
        let library = AffectLibrary::builtin();
        let rage = library.lookup("Rage").unwrap();
        let found = find_alternatives(library, &rage, "Rage", 3);
        assert_eq!(found.len(), 3);
        assert!(found.iter().all(|alt| alt.label != "Rage"));
        assert!(found.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn nearest_neighbour_of_a_reference_point_is_itself() {
        let library = AffectLibrary::builtin();
        let happy = library.lookup("Happy").unwrap();
        let found = find_alternatives(library, &happy, "Rage", 1);
        assert_eq!(found[0].label, "Happy");
        assert_eq!(found[0].distance, 0.0);
    }

    #[test]
    fn zero_count_is_empty() {
        let library = AffectLibrary::builtin();
        assert!(find_alternatives(library, &AffectVector::neutral(), "Neutral", 0).is_empty());
    }

    #[test]
    fn count_larger_than_library_returns_everything_else() {
        let library = AffectLibrary::builtin();
        let found = find_alternatives(library, &AffectVector::neutral(), "Neutral", 10_000);
        assert_eq!(found.len(), library.len() - 1);
    }

    #[test]
    fn group_scoped_search_stays_in_group() {
        let library = AffectLibrary::builtin();
        let vad = AffectVector::reference(-0.7, 0.8, 0.6);
        let found = find_alternatives_in_group(library, &vad, EmotionGroup::Anger, "Furious", 4);
        assert_eq!(found.len(), 4);
        assert!(found
            .iter()
            .all(|alt| library.is_member(EmotionGroup::Anger, &alt.label)));
        assert!(found.iter().all(|alt| alt.label != "Furious"));
    }
}
