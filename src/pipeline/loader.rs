//! Dataset loader for whitespace-separated text, CSV and Parquet files
//!
//! Text files hold one instance per line: the class label followed by the
//! feature values, separated by any amount of whitespace. CSV and Parquet
//! files are read with polars; the label column (first column unless named
//! explicitly) is moved to position 0 and every column is cast to `f64`.

use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;
use tracing::{debug, instrument};

use crate::pipeline::dataset::Dataset;

/// Options for tabular (CSV / Parquet) inputs
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Class label column; defaults to the first column
    pub label_column: Option<String>,
    /// Rows used for CSV schema inference; 0 means a full scan
    pub infer_schema_length: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            label_column: None,
            infer_schema_length: 10000,
        }
    }
}

/// Load a dataset from a file, choosing the reader from the extension
/// (`csv`, `parquet`, anything else is read as whitespace-separated text)
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_dataset(path: &Path, options: &LoadOptions) -> Result<Dataset> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let rows = match extension.as_str() {
        "csv" => {
            let schema_length = if options.infer_schema_length == 0 {
                None
            } else {
                Some(options.infer_schema_length)
            };
            let df = LazyCsvReader::new(path)
                .with_infer_schema_length(schema_length)
                .finish()
                .and_then(|lf| lf.collect())
                .with_context(|| format!("Failed to load CSV file: {}", path.display()))?;
            dataframe_to_rows(&df, options.label_column.as_deref())?
        }
        "parquet" => {
            let df = LazyFrame::scan_parquet(path, Default::default())
                .and_then(|lf| lf.collect())
                .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?;
            dataframe_to_rows(&df, options.label_column.as_deref())?
        }
        _ => {
            if options.label_column.is_some() {
                anyhow::bail!(
                    "--label-column only applies to CSV and Parquet inputs; text files keep the class label in the first value of each line"
                );
            }
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read dataset file: {}", path.display()))?;
            parse_whitespace_rows(&text)
                .with_context(|| format!("Failed to parse dataset file: {}", path.display()))?
        }
    };

    debug!(rows = rows.len(), "rows parsed");

    let dataset = Dataset::new(rows)
        .with_context(|| format!("Invalid dataset in {}", path.display()))?;
    Ok(dataset)
}

/// Parse whitespace-separated numeric rows, skipping blank lines.
///
/// Accepts any `f64` literal, including scientific notation such as
/// `2.0000000e+000`.
pub fn parse_whitespace_rows(text: &str) -> Result<Vec<Vec<f64>>> {
    let mut rows = Vec::new();

    for (line_idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let row = line
            .split_whitespace()
            .map(|token| {
                token.parse::<f64>().with_context(|| {
                    format!("line {}: '{}' is not a number", line_idx + 1, token)
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }

    Ok(rows)
}

/// Convert a DataFrame into `[label, features...]` rows.
///
/// Every column is cast to `f64`; nulls (including values that fail the
/// cast) are rejected with the column name.
pub fn dataframe_to_rows(df: &DataFrame, label_column: Option<&str>) -> Result<Vec<Vec<f64>>> {
    let column_names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();

    let label = match label_column {
        Some(name) => {
            if !column_names.iter().any(|c| c == name) {
                anyhow::bail!(
                    "Label column '{}' not found in dataset. Available columns: {:?}",
                    name,
                    column_names
                );
            }
            name.to_string()
        }
        None => column_names
            .first()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Dataset has no columns"))?,
    };

    let ordered: Vec<&String> = std::iter::once(&label)
        .chain(column_names.iter().filter(|c| **c != label))
        .collect();

    let mut rows: Vec<Vec<f64>> = vec![Vec::with_capacity(ordered.len()); df.height()];

    for name in ordered {
        let column = df
            .column(name)?
            .cast(&DataType::Float64)
            .with_context(|| format!("Column '{}' cannot be read as numbers", name))?;

        if column.null_count() > 0 {
            anyhow::bail!(
                "Column '{}' has {} missing or non-numeric value(s)",
                name,
                column.null_count()
            );
        }

        for (row, value) in rows.iter_mut().zip(column.f64()?.into_iter()) {
            row.push(value.unwrap_or(f64::NAN));
        }
    }

    Ok(rows)
}
