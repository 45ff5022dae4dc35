//! In-memory dataset of labelled numeric instances
//!
//! Every instance is a row of `f64` values where column 0 holds the class
//! label and columns `1..num_columns` hold the features. A `Dataset` can only
//! be built through [`Dataset::new`], which checks every shape invariant, so
//! the evaluator and the search driver may rely on them.

use serde::Serialize;

use crate::pipeline::error::SelectionError;
use crate::pipeline::features::FeatureSet;

/// Number of distinct class labels a dataset may carry
pub const MAX_CLASSES: usize = 2;

/// Validated, immutable collection of labelled instances
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    rows: Vec<Vec<f64>>,
    num_columns: usize,
    /// Distinct class labels in order of first appearance
    labels: Vec<f64>,
}

/// Instance count for one class label
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassCount {
    pub label: f64,
    pub count: usize,
}

impl Dataset {
    /// Build a dataset from rows of `[label, feature_1, ..., feature_n]`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`SelectionError::EmptyDataset`] | `rows` is empty |
    /// | [`SelectionError::RowTooShort`] | a row has fewer than 2 values |
    /// | [`SelectionError::InconsistentRowLength`] | a row differs in length from row 0 |
    /// | [`SelectionError::NonFiniteValue`] | a value is NaN or infinite |
    /// | [`SelectionError::TooManyClasses`] | more than two distinct labels |
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, SelectionError> {
        let num_columns = rows.first().ok_or(SelectionError::EmptyDataset)?.len();

        let mut labels: Vec<f64> = Vec::with_capacity(MAX_CLASSES);
        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() < 2 {
                return Err(SelectionError::RowTooShort {
                    row: row_idx,
                    len: row.len(),
                });
            }
            if row.len() != num_columns {
                return Err(SelectionError::InconsistentRowLength {
                    row: row_idx,
                    expected: num_columns,
                    got: row.len(),
                });
            }
            if let Some(column) = row.iter().position(|v| !v.is_finite()) {
                return Err(SelectionError::NonFiniteValue {
                    row: row_idx,
                    column,
                });
            }
            if !labels.contains(&row[0]) {
                labels.push(row[0]);
            }
        }

        if labels.len() > MAX_CLASSES {
            return Err(SelectionError::TooManyClasses { labels });
        }

        Ok(Self {
            rows,
            num_columns,
            labels,
        })
    }

    /// Number of instances (rows)
    pub fn num_instances(&self) -> usize {
        self.rows.len()
    }

    /// Number of values per instance, class label included
    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    /// Number of feature columns (class label excluded)
    pub fn num_features(&self) -> usize {
        self.num_columns - 1
    }

    /// Full row for an instance, label at position 0
    pub fn instance(&self, row: usize) -> &[f64] {
        &self.rows[row]
    }

    /// Iterate over all instances in dataset order
    pub fn instances(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Class label of an instance
    pub fn label(&self, row: usize) -> f64 {
        self.rows[row][0]
    }

    /// Distinct class labels in order of first appearance (one or two entries)
    pub fn class_labels(&self) -> &[f64] {
        &self.labels
    }

    /// Instance count per class label, in order of first appearance
    pub fn class_counts(&self) -> Vec<ClassCount> {
        self.labels
            .iter()
            .map(|&label| ClassCount {
                label,
                count: self.rows.iter().filter(|row| row[0] == label).count(),
            })
            .collect()
    }

    /// Every feature index `1..num_columns` in ascending order
    pub fn all_features(&self) -> FeatureSet {
        FeatureSet::all(self.num_features())
    }

    /// Check that `index` names a feature column of this dataset
    pub fn check_feature(&self, index: usize) -> Result<(), SelectionError> {
        if index == 0 || index >= self.num_columns {
            return Err(SelectionError::FeatureOutOfRange {
                index,
                num_columns: self.num_columns,
            });
        }
        Ok(())
    }
}
