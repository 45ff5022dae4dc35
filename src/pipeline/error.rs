//! Error types for dataset validation, accuracy evaluation and stepwise search.

use crate::pipeline::search::SearchMode;

/// Precondition violations raised by the selection core.
///
/// None of these are recoverable for the call that produced them: the
/// evaluator and the search driver fail fast and the search is aborted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectionError {
    /// Returned when a dataset has no instances.
    #[error("dataset has zero instances")]
    EmptyDataset,

    /// Returned when a row cannot hold a class label and at least one feature.
    #[error("row {row} has {len} value(s), need at least 2 (class label plus one feature)")]
    RowTooShort {
        /// Zero-based index of the offending row.
        row: usize,
        /// Number of values found in the row.
        len: usize,
    },

    /// Returned when a row differs in length from the first row.
    #[error("row {row} has {got} value(s), expected {expected}")]
    InconsistentRowLength {
        /// Zero-based index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        got: usize,
    },

    /// Returned when a value is NaN or infinite.
    #[error("non-finite value at row {row}, column {column}")]
    NonFiniteValue {
        /// Zero-based index of the offending row.
        row: usize,
        /// Zero-based column (0 is the class label).
        column: usize,
    },

    /// Returned when the class column holds more than two distinct labels.
    #[error("class column holds {} distinct labels {labels:?}, only two classes are supported", .labels.len())]
    TooManyClasses {
        /// Distinct labels in order of first appearance.
        labels: Vec<f64>,
    },

    /// Returned when a feature index is the class column or past the last column.
    #[error("feature index {index} is out of range, valid feature indices are 1..{num_columns}")]
    FeatureOutOfRange {
        /// The offending feature index.
        index: usize,
        /// Number of columns per instance (class label included).
        num_columns: usize,
    },

    /// Returned when leave-one-out evaluation has no neighbor to compare against.
    #[error("leave-one-out evaluation needs at least 2 instances, dataset has {instances}")]
    TooFewInstances {
        /// Number of instances in the dataset.
        instances: usize,
    },

    /// Returned when a search round has no feature left to add or remove.
    #[error("{mode} round {round} has no eligible candidate feature")]
    NoEligibleCandidates {
        /// One-based round number.
        round: usize,
        /// Search mode the round belongs to.
        mode: SearchMode,
    },
}
