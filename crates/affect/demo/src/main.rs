#![deny(unsafe_code)]
//! Affect appraisal demo binary.
//!
//! Classifies a set of canned appraisals, or the inputs in a JSON file, and
//! prints each result with its rationale.

mod scenarios;

use std::fs;
use std::path::{Path, PathBuf};

use affect_appraisal::{Classifier, ClassifierConfig};
use affect_types::{ClassificationInput, ClassificationResult};
use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Affect appraisal demo
#[derive(Parser)]
#[command(name = "affect-demo")]
#[command(about = "Classify appraisals into graded emotion labels", long_about = None)]
#[command(version)]
struct Cli {
    /// Classifier configuration file (JSON)
    #[arg(short, long, env = "AFFECT_CONFIG")]
    config: Option<PathBuf>,

    /// Use the strict preset when no configuration file is given
    #[arg(long)]
    strict: bool,

    /// JSON file holding one input or an array of inputs
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Print full results as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(cli: &Cli) -> anyhow::Result<ClassifierConfig> {
    match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            Ok(ClassifierConfig::from_json(&text)?)
        }
        None if cli.strict => Ok(ClassifierConfig::strict()),
        None => Ok(ClassifierConfig::default()),
    }
}

fn load_inputs(path: &Path) -> anyhow::Result<Vec<(String, ClassificationInput)>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading inputs {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text)?;
    let inputs: Vec<ClassificationInput> = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };
    Ok(inputs
        .into_iter()
        .enumerate()
        .map(|(index, input)| (format!("input #{}", index + 1), input))
        .collect())
}

fn print_result(name: &str, utterance: Option<&str>, result: &ClassificationResult) {
    println!();
    println!(" ── {name} ──");
    if let Some(text) = utterance {
        println!("   \"{text}\"");
    }
    println!(
        "   {} / {} (confidence {:.2}, consistency {:.2})",
        result.emotion_group, result.severity_label, result.group_confidence, result.consistency_score
    );
    for entry in &result.category_distribution {
        println!("     {:<14} {:>6.3}", entry.label, entry.probability);
    }
    println!("   {}", result.rationale());
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let classifier = Classifier::new(load_config(&cli)?)?;
    info!(
        labels = classifier.library().len(),
        strict = cli.strict,
        "classifier ready"
    );

    let runs: Vec<(String, Option<&'static str>, ClassificationInput)> = match &cli.input {
        Some(path) => load_inputs(path)?
            .into_iter()
            .map(|(name, input)| (name, None, input))
            .collect(),
        None => scenarios::all()
            .into_iter()
            .map(|s| (s.name.to_string(), Some(s.utterance), s.input))
            .collect(),
    };

    for (name, utterance, input) in &runs {
        let result = classifier.classify(input);
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            print_result(name, *utterance, &result);
        }
    }

    info!(classified = runs.len(), "done");
    Ok(())
}
