//! Affect Appraisal - maps cognitive appraisals to graded emotion labels.
//!
//! # Architecture
//!
//! ```text
//!   ClassificationInput
//!         │
//!         ▼
//!   ┌─────────────┐   group, confidence, trace
//!   │ RuleEngine  │──────────────────────────────┐
//!   └─────────────┘                              │
//!         │ group + expectation/perceived power  │
//!         ▼                                      │
//!   ┌──────────────────┐                         │
//!   │ SeverityLadders  │── severity label        │
//!   └──────────────────┘        │                │
//!                               ▼                │
//!   ┌──────────────────┐  reference VAD          │
//!   │  AffectLibrary   │──────────┐              │
//!   └──────────────────┘          ▼              │
//!                        consistency vs measured │
//!                               │                │
//!                               ▼                ▼
//!                    ┌──────────────────────────────┐
//!                    │ CategoryDistribution shaping │──> ClassificationResult
//!                    └──────────────────────────────┘
//! ```
//!
//! The reference library and the severity ladders are immutable
//! process-wide tables. A [`Classifier`] holds only its configuration and
//! references to those tables, so a single instance can serve many threads.

#![deny(unsafe_code)]

pub mod alternatives;
pub mod classifier;
pub mod config;
pub mod distance;
pub mod distribution;
pub mod library;
pub mod rules;
pub mod severity;

pub use alternatives::{find_alternatives, find_alternatives_in_group, Alternative};
pub use classifier::{classify, Classifier, CONFUSION_LABEL};
pub use config::ClassifierConfig;
pub use distance::{check_consistency, consistency, distance, DEFAULT_CONSISTENCY_DECAY};
pub use distribution::CategoryDistribution;
pub use library::{AffectLibrary, AffectProfile, LadderKey, DEFAULT_LADDER, NEUTRAL_LABEL};
pub use rules::{RuleEngine, RuleOutcome};
pub use severity::{intensity, rung_index, severity_label, SeverityLadders, LADDER_LENGTH};
