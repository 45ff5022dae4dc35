//! Leave-one-out nearest-neighbor accuracy
//!
//! Scores a feature subset by holding out every instance once, classifying it
//! with the label of its single nearest neighbor among all other instances
//! (Euclidean distance over the selected feature columns), and reporting the
//! percentage of correct classifications. An empty feature subset is scored
//! with the default rate: the share of the most frequent class.

use tracing::trace;

use crate::pipeline::dataset::Dataset;
use crate::pipeline::error::SelectionError;
use crate::pipeline::features::FeatureSet;

/// Accuracy (percentage in `[0, 100]`) of a feature subset.
///
/// Dispatches to [`default_rate`] for the empty set and to
/// [`leave_one_out_accuracy`] otherwise.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`SelectionError::FeatureOutOfRange`] | an index is 0 or past the last column |
/// | [`SelectionError::TooFewInstances`] | fewer than 2 instances with a non-empty set |
pub fn accuracy(dataset: &Dataset, features: &FeatureSet) -> Result<f64, SelectionError> {
    if features.is_empty() {
        return Ok(default_rate(dataset));
    }
    leave_one_out_accuracy(dataset, features)
}

/// Majority-class baseline: `100 * max(count_a, count_b) / N`.
///
/// A single-class dataset yields 100%.
pub fn default_rate(dataset: &Dataset) -> f64 {
    let majority = dataset
        .class_counts()
        .iter()
        .map(|c| c.count)
        .max()
        .unwrap_or(0);

    100.0 * majority as f64 / dataset.num_instances() as f64
}

/// Leave-one-out 1-NN accuracy over the given (non-empty) feature subset.
pub fn leave_one_out_accuracy(
    dataset: &Dataset,
    features: &FeatureSet,
) -> Result<f64, SelectionError> {
    for index in features.iter() {
        dataset.check_feature(index)?;
    }

    let n = dataset.num_instances();
    if n < 2 {
        return Err(SelectionError::TooFewInstances { instances: n });
    }

    let columns = features.as_slice();
    let successes = (0..n)
        .filter(|&held_out| {
            nearest_neighbor(dataset, held_out, columns)
                .is_some_and(|neighbor| dataset.label(neighbor) == dataset.label(held_out))
        })
        .count();

    let accuracy = 100.0 * successes as f64 / n as f64;
    trace!(features = %features, successes, accuracy, "leave-one-out evaluation");

    Ok(accuracy)
}

/// Index of the instance closest to `held_out`, excluding `held_out` itself.
///
/// Scans in dataset order and only replaces the current candidate on a
/// strictly smaller distance, so the first of several equidistant instances
/// wins. Returns `None` when the dataset has no other instance.
pub fn nearest_neighbor(dataset: &Dataset, held_out: usize, columns: &[usize]) -> Option<usize> {
    let test = dataset.instance(held_out);
    let mut closest: Option<(usize, f64)> = None;

    for (idx, candidate) in dataset.instances().enumerate() {
        if idx == held_out {
            continue;
        }
        let distance = euclidean_distance(test, candidate, columns);
        match closest {
            Some((_, best)) if distance >= best => {}
            _ => closest = Some((idx, distance)),
        }
    }

    closest.map(|(idx, _)| idx)
}

/// Euclidean distance between two rows restricted to `columns`
pub fn euclidean_distance(a: &[f64], b: &[f64], columns: &[usize]) -> f64 {
    columns
        .iter()
        .map(|&j| {
            let d = a[j] - b[j];
            d * d
        })
        .sum::<f64>()
        .sqrt()
}
