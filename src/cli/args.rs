//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::pipeline::SearchMode;
use crate::report::default_report_path;

/// nnsel - Find a high-accuracy feature subset with nearest-neighbor stepwise search
#[derive(Parser, Debug)]
#[command(name = "nnsel")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Input file path: whitespace-separated text (class label first), CSV or Parquet
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Search mode: "forward" (forward selection) or "backward" (backward elimination).
    /// If not provided, will be selected interactively.
    #[arg(short, long, value_parser = parse_search_mode)]
    pub mode: Option<SearchMode>,

    /// Class label column for CSV/Parquet input. Defaults to the first column.
    #[arg(long)]
    pub label_column: Option<String>,

    /// Score the candidates of each round in parallel.
    /// Results and tie-breaking are identical to the sequential search.
    #[arg(long, default_value = "false")]
    pub parallel: bool,

    /// Number of worker threads for --parallel (defaults to all cores)
    #[arg(long, value_parser = validate_threads)]
    pub threads: Option<usize>,

    /// Write a JSON report of every round to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Write the JSON report next to the input with a '_selection.json' suffix
    #[arg(long, default_value = "false")]
    pub save_report: bool,

    /// Skip interactive prompts (mode defaults to forward selection)
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,

    /// Enable verbose (debug-level) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Hide per-candidate lines and suppress logging except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score a single feature subset with leave-one-out nearest-neighbor accuracy
    Evaluate {
        /// Input file path (text, CSV or Parquet)
        input: PathBuf,

        /// Feature indices to use (comma-separated, 1-based; class label is column 0).
        /// Omit to get the default rate.
        #[arg(long, value_delimiter = ',')]
        features: Vec<usize>,

        /// Class label column for CSV/Parquet input. Defaults to the first column.
        #[arg(long)]
        label_column: Option<String>,

        /// Number of rows to use for schema inference (CSV only)
        #[arg(long, default_value = "10000")]
        infer_schema_length: usize,
    },
}

impl Cli {
    /// Get the input path, if provided.
    pub fn input(&self) -> Option<&PathBuf> {
        self.input.as_ref()
    }

    /// Get the report path: the explicit `--report` path, or the derived one when
    /// `--save-report` is set.
    pub fn report_path(&self) -> Option<PathBuf> {
        if let Some(report) = &self.report {
            return Some(report.clone());
        }
        if self.save_report {
            return self.input.as_deref().map(default_report_path);
        }
        None
    }
}

/// Parser for the search mode parameter
fn parse_search_mode(s: &str) -> Result<SearchMode, String> {
    s.parse()
}

/// Validator for threads parameter
fn validate_threads(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid thread count", s))?;

    if value == 0 {
        Err("threads must be at least 1".to_string())
    } else {
        Ok(value)
    }
}
