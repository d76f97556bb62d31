//! Appraisal rule engine.
//!
//! Maps the four appraisal variables plus the valuation/power measures to an
//! emotion group, a confidence, and a trace of the rules that fired.
//!
//! # Evaluation order
//!
//! ```text
//!   gates ──> primary rules ──> override rules ──> Neutral fallback
//! ```
//!
//! Two gates short-circuit to Confusion: a low mean confidence, and an
//! `unclear` source, timeframe, or acceptance state. Past the gates, every rule
//! in [`RULES`] is checked in order against a mutable current-best result and
//! each match replaces it. Primary rules are mutually exclusive except where a
//! later one is meant to refine an earlier one (Relief over Happiness/Pride,
//! Curiosity over Surprise/Boredom). Override rules come last, so the final
//! matching override always wins.

use affect_types::{
    clamp_unit, AcceptanceState, AppraisalInstance, AppraisalSet, EmotionGroup, Perspective,
    RuleTrace, Source, Timeframe,
};
use tracing::debug;

use crate::config::ClassifierConfig;

/// Source confidence needed before an external source is blamed (Anger vs Fear).
const BLAME_MIN_CONFIDENCE: f64 = 0.6;
/// Valuation below which an accepted external loss reads as Disgust.
const DISGUST_VALUATION: f64 = -0.7;
/// Perceived power above which a neutral present event is surprising.
const SURPRISE_POWER: f64 = 0.7;
/// Perceived power below which a neutral ongoing event is boring.
const BOREDOM_POWER: f64 = 0.3;
/// Confidence of the fallback Neutral result.
const NEUTRAL_CONFIDENCE: f64 = 0.5;

/// Whether a rule picks the primary group or overrides it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RulePhase {
    Primary,
    Override,
}

/// Everything a rule may inspect.
pub struct RuleContext<'a> {
    pub appraisal: &'a AppraisalSet,
    pub instance: AppraisalInstance,
    pub self_attribution_min_confidence: f64,
}

impl RuleContext<'_> {
    fn negative(&self) -> bool {
        self.instance.valuation_shift < 0.0
    }

    fn positive(&self) -> bool {
        self.instance.valuation_shift > 0.0
    }

    fn neutral(&self) -> bool {
        self.instance.valuation_shift == 0.0
    }

    fn source(&self, value: Source) -> bool {
        self.appraisal.source.is(value)
    }

    fn perspective(&self, value: Perspective) -> bool {
        self.appraisal.perspective.is(value)
    }

    fn timeframe(&self, value: Timeframe) -> bool {
        self.appraisal.timeframe.is(value)
    }

    fn acceptance(&self, value: AcceptanceState) -> bool {
        self.appraisal.acceptance.is(value)
    }

    fn immediate(&self) -> bool {
        self.timeframe(Timeframe::Present) || self.timeframe(Timeframe::Past)
    }

    fn src(&self) -> f64 {
        self.appraisal.source.confidence()
    }

    fn persp(&self) -> f64 {
        self.appraisal.perspective.confidence()
    }

    fn time(&self) -> f64 {
        self.appraisal.timeframe.confidence()
    }

    fn accept(&self) -> f64 {
        self.appraisal.acceptance.confidence()
    }

    fn blames_external(&self) -> bool {
        self.source(Source::External) && self.src() >= BLAME_MIN_CONFIDENCE
    }

    fn self_attributed(&self) -> bool {
        self.source(Source::ValueSelf) && self.src() >= self.self_attribution_min_confidence
    }
}

/// Minimum of the governing confidences, scaled and kept within `[0, 1]`.
fn scaled_min(confidences: &[f64], factor: f64) -> f64 {
    let min = confidences.iter().copied().fold(1.0, f64::min);
    clamp_unit(min * factor)
}

/// One `(predicate, outcome)` entry of the rule list.
pub struct Rule {
    pub phase: RulePhase,
    pub description: &'static str,
    pub group: EmotionGroup,
    pub applies: fn(&RuleContext<'_>) -> bool,
    pub confidence: fn(&RuleContext<'_>) -> f64,
}

/// The ordered rule list. Later matches replace earlier ones.
pub static RULES: &[Rule] = &[
    // Negative valuation, resisted.
    Rule {
        phase: RulePhase::Primary,
        description: "negative, resisted, immediate, blamed on external source",
        group: EmotionGroup::Anger,
        applies: |c| {
            c.negative()
                && c.acceptance(AcceptanceState::Resisted)
                && c.immediate()
                && c.blames_external()
        },
        confidence: |c| scaled_min(&[c.src(), c.accept(), c.time()], 0.9),
    },
    Rule {
        phase: RulePhase::Primary,
        description: "negative, resisted, immediate, no confident external source",
        group: EmotionGroup::Fear,
        applies: |c| {
            c.negative()
                && c.acceptance(AcceptanceState::Resisted)
                && c.immediate()
                && !c.blames_external()
        },
        confidence: |c| scaled_min(&[c.src(), c.accept(), c.time()], 0.9),
    },
    Rule {
        phase: RulePhase::Primary,
        description: "negative, resisted, future",
        group: EmotionGroup::Worry,
        applies: |c| {
            c.negative() && c.acceptance(AcceptanceState::Resisted) && c.timeframe(Timeframe::Future)
        },
        confidence: |c| scaled_min(&[c.accept(), c.time()], 0.85),
    },
    Rule {
        phase: RulePhase::Primary,
        description: "negative, resisted, ongoing",
        group: EmotionGroup::Stress,
        applies: |c| {
            c.negative() && c.acceptance(AcceptanceState::Resisted) && c.timeframe(Timeframe::Ongoing)
        },
        confidence: |c| scaled_min(&[c.accept(), c.time()], 0.85),
    },
    // Negative valuation, accepted.
    Rule {
        phase: RulePhase::Primary,
        description: "negative, accepted, present, strongly negative external source",
        group: EmotionGroup::Disgust,
        applies: |c| {
            c.negative()
                && c.acceptance(AcceptanceState::Accepted)
                && c.timeframe(Timeframe::Present)
                && c.source(Source::External)
                && c.instance.valuation_shift < DISGUST_VALUATION
        },
        confidence: |c| scaled_min(&[c.src(), c.accept(), c.time()], 0.85),
    },
    Rule {
        phase: RulePhase::Primary,
        description: "negative, accepted, present, self-attributed",
        group: EmotionGroup::Shame,
        applies: |c| {
            c.negative()
                && c.acceptance(AcceptanceState::Accepted)
                && c.timeframe(Timeframe::Present)
                && c.source(Source::ValueSelf)
        },
        confidence: |c| scaled_min(&[c.src(), c.accept(), c.time()], 0.8),
    },
    Rule {
        phase: RulePhase::Primary,
        description: "negative, accepted, present",
        group: EmotionGroup::Sadness,
        applies: |c| {
            c.negative()
                && c.acceptance(AcceptanceState::Accepted)
                && c.timeframe(Timeframe::Present)
                && !c.source(Source::ValueSelf)
                && !(c.source(Source::External) && c.instance.valuation_shift < DISGUST_VALUATION)
        },
        confidence: |c| scaled_min(&[c.accept(), c.time()], 0.85),
    },
    Rule {
        phase: RulePhase::Primary,
        description: "negative, accepted, past, self-attributed",
        group: EmotionGroup::Regret,
        applies: |c| {
            c.negative()
                && c.acceptance(AcceptanceState::Accepted)
                && c.timeframe(Timeframe::Past)
                && c.source(Source::ValueSelf)
        },
        confidence: |c| scaled_min(&[c.src(), c.accept(), c.time()], 0.85),
    },
    Rule {
        phase: RulePhase::Primary,
        description: "negative, accepted, past",
        group: EmotionGroup::Sadness,
        applies: |c| {
            c.negative()
                && c.acceptance(AcceptanceState::Accepted)
                && c.timeframe(Timeframe::Past)
                && !c.source(Source::ValueSelf)
        },
        confidence: |c| scaled_min(&[c.accept(), c.time()], 0.85),
    },
    Rule {
        phase: RulePhase::Primary,
        description: "negative, accepted, future",
        group: EmotionGroup::NegativeAnticipation,
        applies: |c| {
            c.negative() && c.acceptance(AcceptanceState::Accepted) && c.timeframe(Timeframe::Future)
        },
        confidence: |c| scaled_min(&[c.accept(), c.time()], 0.85),
    },
    Rule {
        phase: RulePhase::Primary,
        description: "negative, acceptance uncertain",
        group: EmotionGroup::Confusion,
        applies: |c| c.negative() && c.acceptance(AcceptanceState::Uncertain),
        confidence: |c| scaled_min(&[c.accept()], 0.8),
    },
    // Positive valuation.
    Rule {
        phase: RulePhase::Primary,
        description: "positive, immediate, self-attributed",
        group: EmotionGroup::Pride,
        applies: |c| c.positive() && c.immediate() && c.source(Source::ValueSelf),
        confidence: |c| scaled_min(&[c.src(), c.time()], 0.85),
    },
    Rule {
        phase: RulePhase::Primary,
        description: "positive, immediate",
        group: EmotionGroup::Happiness,
        applies: |c| c.positive() && c.immediate() && !c.source(Source::ValueSelf),
        confidence: |c| scaled_min(&[c.src(), c.time()], 0.85),
    },
    Rule {
        phase: RulePhase::Primary,
        description: "positive, past, accepted",
        group: EmotionGroup::Relief,
        applies: |c| {
            c.positive() && c.timeframe(Timeframe::Past) && c.acceptance(AcceptanceState::Accepted)
        },
        confidence: |c| scaled_min(&[c.accept(), c.time()], 0.85),
    },
    Rule {
        phase: RulePhase::Primary,
        description: "positive, future",
        group: EmotionGroup::PositiveAnticipation,
        applies: |c| c.positive() && c.timeframe(Timeframe::Future),
        confidence: |c| scaled_min(&[c.time(), c.accept()], 0.85),
    },
    // Neutral valuation.
    Rule {
        phase: RulePhase::Primary,
        description: "neutral, present, high perceived power",
        group: EmotionGroup::Surprise,
        applies: |c| {
            c.neutral() && c.timeframe(Timeframe::Present) && c.instance.power_level > SURPRISE_POWER
        },
        confidence: |c| scaled_min(&[c.time()], 0.8),
    },
    Rule {
        phase: RulePhase::Primary,
        description: "neutral, ongoing, low perceived power",
        group: EmotionGroup::Boredom,
        applies: |c| {
            c.neutral() && c.timeframe(Timeframe::Ongoing) && c.instance.power_level < BOREDOM_POWER
        },
        confidence: |c| scaled_min(&[c.time()], 0.8),
    },
    Rule {
        phase: RulePhase::Primary,
        description: "neutral, external source, acceptance uncertain",
        group: EmotionGroup::Curiosity,
        applies: |c| {
            c.neutral() && c.source(Source::External) && c.acceptance(AcceptanceState::Uncertain)
        },
        confidence: |c| scaled_min(&[c.src(), c.accept()], 0.8),
    },
    // Overrides, last match wins.
    Rule {
        phase: RulePhase::Override,
        description: "self-attributed, own perspective",
        group: EmotionGroup::Shame,
        applies: |c| c.self_attributed() && c.perspective(Perspective::Oneself),
        confidence: |c| scaled_min(&[c.src(), c.persp()], 0.85),
    },
    Rule {
        phase: RulePhase::Override,
        description: "self-attributed, observed by others",
        group: EmotionGroup::Embarrassment,
        applies: |c| {
            c.self_attributed()
                && (c.perspective(Perspective::Other) || c.perspective(Perspective::Both))
        },
        confidence: |c| scaled_min(&[c.src(), c.persp()], 0.85),
    },
    Rule {
        phase: RulePhase::Override,
        description: "external source, other's perspective, negative",
        group: EmotionGroup::Envy,
        applies: |c| c.source(Source::External) && c.perspective(Perspective::Other) && c.negative(),
        confidence: |c| scaled_min(&[c.src(), c.persp()], 0.8),
    },
    Rule {
        phase: RulePhase::Override,
        description: "external source, other's perspective, not accepted, positive",
        group: EmotionGroup::Flattery,
        applies: |c| {
            c.source(Source::External)
                && c.perspective(Perspective::Other)
                && !c.acceptance(AcceptanceState::Accepted)
                && c.positive()
        },
        confidence: |c| scaled_min(&[c.src(), c.persp(), c.accept()], 0.8),
    },
    Rule {
        phase: RulePhase::Override,
        description: "external source, accepted, positive",
        group: EmotionGroup::Love,
        applies: |c| c.source(Source::External) && c.acceptance(AcceptanceState::Accepted) && c.positive(),
        confidence: |c| scaled_min(&[c.src(), c.accept()], 0.8),
    },
];

/// Result of running the rule engine.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleOutcome {
    pub group: EmotionGroup,
    pub confidence: f64,
    pub trace: RuleTrace,
    /// Mean of the four appraisal confidences.
    pub average_confidence: f64,
}

/// Runs the gates and the ordered rule list.
#[derive(Clone, Debug)]
pub struct RuleEngine {
    min_average_confidence: f64,
    unclear_confidence_factor: f64,
    self_attribution_min_confidence: f64,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}

impl RuleEngine {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            min_average_confidence: config.min_average_confidence,
            unclear_confidence_factor: config.unclear_confidence_factor,
            self_attribution_min_confidence: config.self_attribution_min_confidence,
        }
    }

    pub fn evaluate(&self, appraisal: &AppraisalSet, instance: &AppraisalInstance) -> RuleOutcome {
        let average_confidence = appraisal.average_confidence();

        if average_confidence < self.min_average_confidence {
            debug!(average_confidence, "low overall confidence");
            return RuleOutcome {
                group: EmotionGroup::Confusion,
                confidence: average_confidence,
                trace: RuleTrace::new("low overall confidence"),
                average_confidence,
            };
        }

        if appraisal.has_critical_unclear() {
            debug!(average_confidence, "critical variable unclear");
            return RuleOutcome {
                group: EmotionGroup::Confusion,
                confidence: clamp_unit(average_confidence * self.unclear_confidence_factor),
                trace: RuleTrace::new("critical variable unclear"),
                average_confidence,
            };
        }

        let ctx = RuleContext {
            appraisal,
            instance: instance.clamped(),
            self_attribution_min_confidence: self.self_attribution_min_confidence,
        };

        let mut best: Option<(EmotionGroup, f64)> = None;
        let mut trace: Option<RuleTrace> = None;
        for rule in RULES.iter().filter(|rule| (rule.applies)(&ctx)) {
            let confidence = (rule.confidence)(&ctx);
            let step = match rule.phase {
                RulePhase::Primary => {
                    format!("{}: {} ({confidence:.2})", rule.description, rule.group)
                }
                RulePhase::Override => {
                    format!("override, {}: {} ({confidence:.2})", rule.description, rule.group)
                }
            };
            debug!(rule = rule.description, group = %rule.group, confidence, "rule fired");
            match trace.as_mut() {
                Some(trace) => trace.push(step),
                None => trace = Some(RuleTrace::new(step)),
            }
            best = Some((rule.group, confidence));
        }

        match (best, trace) {
            (Some((group, confidence)), Some(trace)) => RuleOutcome {
                group,
                confidence,
                trace,
                average_confidence,
            },
            _ => {
                debug!("no rule matched; defaulting to neutral");
                RuleOutcome {
                    group: EmotionGroup::Neutral,
                    confidence: NEUTRAL_CONFIDENCE,
                    trace: RuleTrace::new(format!(
                        "no rule matched: {} ({NEUTRAL_CONFIDENCE:.2})",
                        EmotionGroup::Neutral
                    )),
                    average_confidence,
                }
            }
        }
    }
}
