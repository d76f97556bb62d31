//! Appraisal variables and the appraisal instance.
//!
//! An appraisal describes how an event is interpreted along four categorical
//! dimensions (source, perspective, timeframe, acceptance), each carrying its
//! own confidence, plus a signed valuation shift and a perceived power level.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AffectError;

/// Clamp a value into `[0, 1]`. NaN collapses to `0.0`.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Clamp a value into `[-1, 1]`. NaN collapses to `0.0`.
pub fn clamp_signed_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

/// Common surface of the four appraisal value domains.
pub trait AppraisalValue: Copy + Eq + FromStr<Err = AffectError> {
    /// Dimension name used in errors and traces.
    const DIMENSION: &'static str;

    /// The `unclear` member of the domain.
    const UNCLEAR: Self;

    fn as_str(&self) -> &'static str;

    fn is_unclear(&self) -> bool {
        *self == Self::UNCLEAR
    }

    /// Decode upstream text, mapping anything unrecognised to `unclear`.
    fn parse_lenient(text: &str) -> Self {
        text.parse().unwrap_or(Self::UNCLEAR)
    }
}

macro_rules! appraisal_value {
    (
        $(#[$meta:meta])*
        $name:ident, $dimension:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal $(| $alias:literal)* ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $text $(, alias = $alias)*)]
                $variant,
            )+
        }

        impl AppraisalValue for $name {
            const DIMENSION: &'static str = $dimension;
            const UNCLEAR: Self = $name::Unclear;

            fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $text, )+
                }
            }
        }

        impl FromStr for $name {
            type Err = AffectError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_ascii_lowercase().replace(['_', '-', ' '], "");
                $(
                    if normalized == $text.replace('_', "")
                        $(|| normalized == $alias.to_ascii_lowercase())*
                    {
                        return Ok($name::$variant);
                    }
                )+
                Err(AffectError::unknown_value($dimension, s))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

appraisal_value! {
    /// Who or what the event is attributed to.
    Source, "source" {
        Internal => "internal",
        External => "external",
        /// The event bears on the agent's own values or self-image.
        ValueSelf => "value_self" | "valueSelf",
        Unclear => "unclear",
    }
}

appraisal_value! {
    /// Whose standpoint the event is evaluated from.
    Perspective, "perspective" {
        Oneself => "self",
        Other => "other",
        Both => "both",
        Unclear => "unclear",
    }
}

appraisal_value! {
    /// When the appraised event sits relative to now.
    Timeframe, "timeframe" {
        Present => "present",
        Past => "past",
        Future => "future",
        Ongoing => "ongoing",
        Unclear => "unclear",
    }
}

appraisal_value! {
    /// Whether the agent has come to terms with the event.
    AcceptanceState, "acceptance_state" {
        Accepted => "accepted",
        Resisted => "resisted",
        Uncertain => "uncertain",
        Unclear => "unclear",
    }
}

/// A categorical judgment together with the extractor's confidence in it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppraisalVariable<T> {
    pub value: T,
    pub confidence: f64,
}

impl<T: AppraisalValue> AppraisalVariable<T> {
    /// Create a variable. Confidence is clamped into `[0, 1]`.
    pub fn new(value: T, confidence: f64) -> Self {
        Self {
            value,
            confidence: clamp_unit(confidence),
        }
    }

    /// An `unclear` judgment with zero confidence.
    pub fn unclear() -> Self {
        Self::new(T::UNCLEAR, 0.0)
    }

    /// Build from raw upstream text; unknown values become `unclear`.
    pub fn from_raw(value: &str, confidence: f64) -> Self {
        Self::new(T::parse_lenient(value), confidence)
    }

    pub fn is(&self, value: T) -> bool {
        self.value == value
    }

    /// Confidence clamped into `[0, 1]`, even if the field was set directly.
    pub fn confidence(&self) -> f64 {
        clamp_unit(self.confidence)
    }
}

/// Scalar measures accompanying an appraisal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppraisalInstance {
    /// Signed judgment of the event, `[-1, 1]`.
    pub valuation_shift: f64,
    /// Immediate perceived intensity, `[0, 1]`.
    pub power_level: f64,
    /// Overall confidence of the extractor, `[0, 1]`.
    pub appraisal_confidence: f64,
}

impl AppraisalInstance {
    pub fn new(valuation_shift: f64, power_level: f64, appraisal_confidence: f64) -> Self {
        Self {
            valuation_shift: clamp_signed_unit(valuation_shift),
            power_level: clamp_unit(power_level),
            appraisal_confidence: clamp_unit(appraisal_confidence),
        }
    }

    /// Copy with every field forced into its declared range.
    pub fn clamped(&self) -> Self {
        Self::new(
            self.valuation_shift,
            self.power_level,
            self.appraisal_confidence,
        )
    }
}

impl Default for AppraisalInstance {
    fn default() -> Self {
        Self::new(0.0, 0.5, 1.0)
    }
}

/// The four appraisal variables that drive the rule engine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppraisalSet {
    pub source: AppraisalVariable<Source>,
    pub perspective: AppraisalVariable<Perspective>,
    pub timeframe: AppraisalVariable<Timeframe>,
    pub acceptance: AppraisalVariable<AcceptanceState>,
}

impl AppraisalSet {
    pub fn new(
        source: AppraisalVariable<Source>,
        perspective: AppraisalVariable<Perspective>,
        timeframe: AppraisalVariable<Timeframe>,
        acceptance: AppraisalVariable<AcceptanceState>,
    ) -> Self {
        Self {
            source,
            perspective,
            timeframe,
            acceptance,
        }
    }

    /// Mean of the four (clamped) confidences.
    pub fn average_confidence(&self) -> f64 {
        (self.source.confidence()
            + self.perspective.confidence()
            + self.timeframe.confidence()
            + self.acceptance.confidence())
            / 4.0
    }

    /// True when any variable the rule engine cannot do without is `unclear`.
    ///
    /// Perspective is not critical: only the overrides consult it.
    pub fn has_critical_unclear(&self) -> bool {
        self.source.value.is_unclear()
            || self.acceptance.value.is_unclear()
            || self.timeframe.value.is_unclear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_spellings() {
        assert_eq!("valueSelf".parse::<Source>().unwrap(), Source::ValueSelf);
        assert_eq!("value_self".parse::<Source>().unwrap(), Source::ValueSelf);
        assert_eq!("EXTERNAL".parse::<Source>().unwrap(), Source::External);
        assert_eq!("self".parse::<Perspective>().unwrap(), Perspective::Oneself);
        assert_eq!(" ongoing ".parse::<Timeframe>().unwrap(), Timeframe::Ongoing);
        assert_eq!(
            "resisted".parse::<AcceptanceState>().unwrap(),
            AcceptanceState::Resisted
        );
    }

    #[test]
    fn unknown_text_is_an_error_in_strict_mode() {
        let err = "tomorrow-ish".parse::<Timeframe>().unwrap_err();
        assert!(err.to_string().contains("timeframe"));
    }

    #[test]
    fn lenient_parse_falls_back_to_unclear() {
        assert_eq!(Source::parse_lenient("somewhere"), Source::Unclear);
        let var = AppraisalVariable::<AcceptanceState>::from_raw("??", 0.9);
        assert!(var.value.is_unclear());
        assert_eq!(var.confidence, 0.9);
    }

    #[test]
    fn confidence_is_clamped() {
        let high = AppraisalVariable::new(Source::Internal, 1.7);
        assert_eq!(high.confidence, 1.0);
        let low = AppraisalVariable::new(Source::Internal, -0.2);
        assert_eq!(low.confidence, 0.0);
        let nan = AppraisalVariable::new(Source::Internal, f64::NAN);
        assert_eq!(nan.confidence, 0.0);
    }

    #[test]
    fn instance_is_clamped() {
        let instance = AppraisalInstance::new(-3.0, 2.0, -1.0);
        assert_eq!(instance.valuation_shift, -1.0);
        assert_eq!(instance.power_level, 1.0);
        assert_eq!(instance.appraisal_confidence, 0.0);
    }

    #[test]
    fn average_and_critical_unclear() {
        let set = AppraisalSet::new(
            AppraisalVariable::new(Source::Internal, 0.8),
            AppraisalVariable::new(Perspective::Unclear, 0.4),
            AppraisalVariable::new(Timeframe::Present, 0.6),
            AppraisalVariable::new(AcceptanceState::Accepted, 1.0),
        );
        assert!((set.average_confidence() - 0.7).abs() < 1e-12);
        assert!(!set.has_critical_unclear());

        let unclear = AppraisalSet {
            timeframe: AppraisalVariable::unclear(),
            ..set
        };
        assert!(unclear.has_critical_unclear());
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&Source::ValueSelf).unwrap();
        assert_eq!(json, "\"value_self\"");
        let parsed: Source = serde_json::from_str("\"valueSelf\"").unwrap();
        assert_eq!(parsed, Source::ValueSelf);
        let persp: Perspective = serde_json::from_str("\"self\"").unwrap();
        assert_eq!(persp, Perspective::Oneself);
    }
}
