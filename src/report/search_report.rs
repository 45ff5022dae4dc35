//! JSON export of a complete search
//!
//! The report records how the run was configured, the dataset baselines,
//! every round with all of its scored candidates, and the best subset found.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{ClassCount, Dataset, FeatureSet, RoundSummary, SearchMode, SearchOutcome};

/// Report metadata
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// Timestamp of the run (RFC 3339)
    pub timestamp: String,
    pub nnsel_version: String,
    pub input_file: String,
    pub mode: SearchMode,
    pub parallel: bool,
}

/// Dataset shape and baselines
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub instances: usize,
    pub features: usize,
    pub class_counts: Vec<ClassCount>,
    pub default_rate: f64,
    pub all_features_accuracy: f64,
}

/// Final result of the search
#[derive(Debug, Clone, Serialize)]
pub struct ResultSummary {
    pub initial_set: FeatureSet,
    pub initial_accuracy: f64,
    pub best_set: FeatureSet,
    pub best_accuracy: f64,
    pub rounds: usize,
    pub elapsed_seconds: f64,
}

/// Complete search report
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub metadata: ReportMetadata,
    pub dataset: DatasetSummary,
    pub result: ResultSummary,
    pub rounds: Vec<RoundSummary>,
}

/// Parameters for building a report
pub struct ReportParams<'a> {
    pub input_file: &'a str,
    pub parallel: bool,
    pub default_rate: f64,
    pub all_features_accuracy: f64,
    pub elapsed: Duration,
}

impl SearchReport {
    pub fn new(dataset: &Dataset, outcome: &SearchOutcome, params: &ReportParams) -> Self {
        Self {
            metadata: ReportMetadata {
                timestamp: Utc::now().to_rfc3339(),
                nnsel_version: env!("CARGO_PKG_VERSION").to_string(),
                input_file: params.input_file.to_string(),
                mode: outcome.mode,
                parallel: params.parallel,
            },
            dataset: DatasetSummary {
                instances: dataset.num_instances(),
                features: dataset.num_features(),
                class_counts: dataset.class_counts(),
                default_rate: params.default_rate,
                all_features_accuracy: params.all_features_accuracy,
            },
            result: ResultSummary {
                initial_set: outcome.initial_set.clone(),
                initial_accuracy: outcome.initial_accuracy,
                best_set: outcome.best_set.clone(),
                best_accuracy: outcome.best_accuracy,
                rounds: outcome.rounds.len(),
                elapsed_seconds: params.elapsed.as_secs_f64(),
            },
            rounds: outcome.rounds.clone(),
        }
    }
}

/// Default report location: next to the input with a `_selection.json` suffix
pub fn default_report_path(input: &Path) -> PathBuf {
    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset");
    parent.join(format!("{}_selection.json", stem))
}

/// Export the search report to a JSON file
pub fn export_search_report(report: &SearchReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .context("Failed to serialize search report to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write search report to {}", output_path.display()))?;

    Ok(())
}
