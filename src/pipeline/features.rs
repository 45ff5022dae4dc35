//! Ordered, de-duplicated sets of feature column indices

use std::fmt;

use serde::Serialize;

/// Feature column indices that take part in a distance computation.
///
/// Insertion order is kept so that a forward search reports features in the
/// order they were added. Sets are never modified in place: [`FeatureSet::with`]
/// and [`FeatureSet::without`] return new sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FeatureSet(Vec<usize>);

impl FeatureSet {
    /// Empty set
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Every feature index `1..=num_features` in ascending order
    pub fn all(num_features: usize) -> Self {
        Self((1..=num_features).collect())
    }

    /// Copy of this set with `index` appended (no-op if already present)
    pub fn with(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        if !indices.contains(&index) {
            indices.push(index);
        }
        Self(indices)
    }

    /// Copy of this set with `index` removed, remaining order kept
    pub fn without(&self, index: usize) -> Self {
        Self(self.0.iter().copied().filter(|&i| i != index).collect())
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Indices in ascending order, for order-insensitive comparison
    pub fn sorted(&self) -> Vec<usize> {
        let mut indices = self.0.clone();
        indices.sort_unstable();
        indices
    }
}

impl FromIterator<usize> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut indices = Vec::new();
        for index in iter {
            if !indices.contains(&index) {
                indices.push(index);
            }
        }
        Self(indices)
    }
}

impl From<Vec<usize>> for FeatureSet {
    fn from(indices: Vec<usize>) -> Self {
        indices.into_iter().collect()
    }
}

impl fmt::Display for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "{{{}}}", joined)
    }
}
