//! Probability distribution builder.
//!
//! Collects labelled masses, then shapes them into a proper distribution:
//! normalize to 1.0, cap any single entry, hand the excess to the entries
//! below the cap, and sort by descending probability.

use std::cmp::Ordering;

use affect_types::CategoryProbability;
use tracing::trace;

use crate::library::NEUTRAL_LABEL;

/// Sums below this are treated as zero when normalizing.
const ZERO_MASS: f64 = 1e-12;

/// Upper bound on redistribution passes; each pass pins at least one entry.
const MAX_REDISTRIBUTION_PASSES: usize = 32;

/// An ordered list of labelled probability masses.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategoryDistribution {
    entries: Vec<CategoryProbability>,
}

impl CategoryDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add mass to `label`, merging with an existing entry of the same label.
    ///
    /// Negative and NaN masses are treated as zero.
    pub fn add(&mut self, label: &str, mass: f64) {
        let mass = if mass.is_nan() { 0.0 } else { mass.max(0.0) };
        match self.entries.iter_mut().find(|entry| entry.label == label) {
            Some(entry) => entry.probability += mass,
            None => self.entries.push(CategoryProbability::new(label, mass)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|entry| entry.probability).sum()
    }

    pub fn entries(&self) -> &[CategoryProbability] {
        &self.entries
    }

    /// Scale so the masses sum to 1.0. A (near) zero total splits evenly.
    pub fn normalize(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let total = self.total();
        if total < ZERO_MASS || !total.is_finite() {
            let even = 1.0 / self.entries.len() as f64;
            trace!(entries = self.entries.len(), "zero mass; splitting evenly");
            for entry in &mut self.entries {
                entry.probability = even;
            }
            return;
        }
        for entry in &mut self.entries {
            entry.probability /= total;
        }
    }

    /// Cap every entry at `cap`, redistributing the excess.
    ///
    /// Excess goes to the entries still below the cap, in proportion to their
    /// mass (evenly if they hold none). Entries pushed over the cap by the
    /// redistribution are pinned on the next pass. When no entry is below the
    /// cap the excess is parked in a synthetic `Neutral` entry, or merged into
    /// the existing one.
    pub fn cap_and_redistribute(&mut self, cap: f64) {
        for _ in 0..MAX_REDISTRIBUTION_PASSES {
            let excess: f64 = self
                .entries
                .iter()
                .map(|entry| (entry.probability - cap).max(0.0))
                .sum();
            if excess <= f64::EPSILON {
                return;
            }
            for entry in &mut self.entries {
                if entry.probability > cap {
                    entry.probability = cap;
                }
            }

            let receivers: Vec<usize> = self
                .entries
                .iter()
                .enumerate()
                .filter(|(_, entry)| entry.probability < cap)
                .map(|(index, _)| index)
                .collect();

            if receivers.is_empty() {
                trace!(excess, "every entry at cap; adding synthetic neutral mass");
                self.add(NEUTRAL_LABEL, excess);
                return;
            }

            let receiving_mass: f64 = receivers
                .iter()
                .map(|&index| self.entries[index].probability)
                .sum();
            trace!(excess, receivers = receivers.len(), "redistributing capped mass");
            for &index in &receivers {
                let share = if receiving_mass > ZERO_MASS {
                    self.entries[index].probability / receiving_mass
                } else {
                    1.0 / receivers.len() as f64
                };
                self.entries[index].probability += excess * share;
            }
        }
    }

    /// Order entries by descending probability; ties keep insertion order.
    pub fn sort_descending(&mut self) {
        self.entries.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(Ordering::Equal)
        });
    }

    /// Normalize, cap, and sort in one step.
    pub fn finalize(mut self, cap: f64) -> Vec<CategoryProbability> {
        self.normalize();
        self.cap_and_redistribute(cap);
        self.sort_descending();
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum(entries: &[CategoryProbability]) -> f64 {
        entries.iter().map(|e| e.probability).sum()
    }

    #[test]
    fn add_merges_duplicate_labels() {
        let mut dist = CategoryDistribution::new();
        dist.add("Angry", 0.3);
        dist.add("Confused", 0.2);
        dist.add("Angry", 0.1);
        assert_eq!(dist.len(), 2);
        assert!((dist.entries()[0].probability - 0.4).abs() < 1e-12);
    }

    #[test]
    fn normalize_scales_to_one() {
        let mut dist = CategoryDistribution::new();
        dist.add("a", 2.0);
        dist.add("b", 6.0);
        dist.normalize();
        assert!((dist.entries()[0].probability - 0.25).abs() < 1e-12);
        assert!((dist.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn normalize_zero_mass_splits_evenly() {
        let mut dist = CategoryDistribution::new();
        dist.add("a", 0.0);
        dist.add("b", -1.0);
        dist.add("c", f64::NAN);
        dist.normalize();
        for entry in dist.entries() {
            assert!((entry.probability - 1.0 / 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn cap_redistributes_proportionally() {
        let mut dist = CategoryDistribution::new();
        dist.add("top", 0.95);
        dist.add("mid", 0.04);
        dist.add("low", 0.01);
        let entries = dist.finalize(0.9);
        assert_eq!(entries[0].label, "top");
        assert!((entries[0].probability - 0.9).abs() < 1e-12);
        // 0.05 excess split 4:1.
        assert!((entries[1].probability - 0.08).abs() < 1e-9);
        assert!((entries[2].probability - 0.02).abs() < 1e-9);
        assert!((sum(&entries) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn sole_entry_spills_into_neutral() {
        let mut dist = CategoryDistribution::new();
        dist.add("Rage", 0.7);
        let entries = dist.finalize(0.9);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].label, "Rage");
        assert!((entries[0].probability - 0.9).abs() < 1e-12);
        assert_eq!(entries[1].label, NEUTRAL_LABEL);
        assert!((entries[1].probability - 0.1).abs() < 1e-12);
    }

    #[test]
    fn sole_neutral_entry_absorbs_its_own_excess() {
        let mut dist = CategoryDistribution::new();
        dist.add(NEUTRAL_LABEL, 0.4);
        let entries = dist.finalize(0.9);
        assert_eq!(entries.len(), 1);
        assert!((entries[0].probability - 1.0).abs() < 1e-12);
    }

    #[test]
    fn receivers_pushed_over_cap_are_pinned() {
        let mut dist = CategoryDistribution::new();
        dist.add("a", 0.5);
        dist.add("b", 0.45);
        dist.add("c", 0.05);
        let entries = dist.finalize(0.46);
        assert!(entries.iter().all(|e| e.probability <= 0.46 + 1e-9));
        assert_eq!(entries[2].label, "c");
        assert!((sum(&entries) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_stays_empty() {
        assert!(CategoryDistribution::new().finalize(0.9).is_empty());
    }
}
