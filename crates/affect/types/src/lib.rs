//! Affect Types - the value model of the affect appraisal classifier.
//!
//! Every value here is created fresh for a classification call and is never
//! mutated once returned. Numeric fields with a declared range are clamped on
//! construction rather than rejected.

#![deny(unsafe_code)]

pub mod affect;
pub mod appraisal;
pub mod classification;
pub mod error;
pub mod group;

pub use affect::{AffectVector, ExpectationRecord};
pub use appraisal::{
    clamp_signed_unit, clamp_unit, AcceptanceState, AppraisalInstance, AppraisalSet,
    AppraisalValue, AppraisalVariable, Perspective, Source, Timeframe,
};
pub use classification::{
    CategoryProbability, ClassificationInput, ClassificationResult, RuleTrace,
};
pub use error::{AffectError, AffectResult};
pub use group::EmotionGroup;
