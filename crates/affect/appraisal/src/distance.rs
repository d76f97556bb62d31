//! Distance and consistency in affect space.

use affect_types::AffectVector;

/// Decay rate mapping distance to consistency.
pub const DEFAULT_CONSISTENCY_DECAY: f64 = 2.5;

/// Euclidean distance over valence, arousal, and dominance. Confidence is ignored.
pub fn distance(a: &AffectVector, b: &AffectVector) -> f64 {
    let dv = a.valence - b.valence;
    let da = a.arousal - b.arousal;
    let dd = a.dominance - b.dominance;
    (dv * dv + da * da + dd * dd).sqrt()
}

/// Map a distance to a `[0, 1]` agreement score, `e^(-decay * d)`.
///
/// Zero distance scores exactly `1.0`; the score never increases with distance.
pub fn consistency(distance: f64, decay: f64) -> f64 {
    let score = (-decay * distance).exp();
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

/// Agreement between a measured affect vector and a label's reference coordinate.
pub fn check_consistency(predicted: &AffectVector, reference: &AffectVector, decay: f64) -> f64 {
    consistency(distance(predicted, reference), decay)
}
