//! Shared test utilities and fixture generators

#![allow(dead_code)]

use nnsel::pipeline::{Dataset, FeatureSet, RoundSummary, SearchMode, SearchReporter};
use rand::{Rng, SeedableRng};
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Four instances, two well-separated classes, two features
///
/// `(label, f1, f2)`: `(1,0,0) (1,0,1) (2,5,5) (2,5,6)`
pub fn separated_dataset() -> Dataset {
    Dataset::new(separated_rows()).unwrap()
}

pub fn separated_rows() -> Vec<Vec<f64>> {
    vec![
        vec![1.0, 0.0, 0.0],
        vec![1.0, 0.0, 1.0],
        vec![2.0, 5.0, 5.0],
        vec![2.0, 5.0, 6.0],
    ]
}

/// Seeded dataset where feature 1 separates the classes and every other
/// feature is uniform noise.
///
/// Class 1 has feature 1 in `[3.0, 3.5)`, class 2 in `[6.0, 6.5)`; noise
/// features lie in `[0, 10)`. Labels alternate 1, 2, 1, 2, ...
pub fn informative_dataset(instances: usize, features: usize, seed: u64) -> Dataset {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let rows = (0..instances)
        .map(|i| {
            let label = if i % 2 == 0 { 1.0 } else { 2.0 };
            let mut row = Vec::with_capacity(features + 1);
            row.push(label);
            row.push(label * 3.0 + rng.gen::<f64>() * 0.5);
            for _ in 1..features {
                row.push(rng.gen::<f64>() * 10.0);
            }
            row
        })
        .collect();

    Dataset::new(rows).unwrap()
}

/// Seeded dataset of pure noise
pub fn noise_dataset(instances: usize, features: usize, seed: u64) -> Dataset {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let rows = (0..instances)
        .map(|_| {
            let mut row = Vec::with_capacity(features + 1);
            row.push(if rng.gen::<bool>() { 1.0 } else { 2.0 });
            for _ in 0..features {
                row.push(rng.gen_range(-5.0..5.0));
            }
            row
        })
        .collect();

    Dataset::new(rows).unwrap()
}

/// Write rows as a whitespace-separated text file in scientific notation
pub fn create_temp_text(rows: &[Vec<f64>]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("dataset.txt");

    let mut file = std::fs::File::create(&path).unwrap();
    for row in rows {
        let line = row
            .iter()
            .map(|v| format!("{:.7e}", v))
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(file, "  {}", line).unwrap();
    }

    (temp_dir, path)
}

/// Event captured by [`RecordingReporter`]
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Start(SearchMode, FeatureSet, f64),
    RoundStart(usize, usize),
    Candidate(FeatureSet, f64),
    Commit(RoundSummary),
    Finish(FeatureSet, f64),
}

/// Reporter that records every callback in order
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<Event>,
}

impl RecordingReporter {
    pub fn candidates(&self) -> Vec<(FeatureSet, f64)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Candidate(set, acc) => Some((set.clone(), *acc)),
                _ => None,
            })
            .collect()
    }

    pub fn commits(&self) -> Vec<RoundSummary> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Commit(round) => Some(round.clone()),
                _ => None,
            })
            .collect()
    }
}

impl SearchReporter for RecordingReporter {
    fn on_start(&mut self, mode: SearchMode, initial_set: &FeatureSet, accuracy: f64) {
        self.events
            .push(Event::Start(mode, initial_set.clone(), accuracy));
    }

    fn on_round_start(&mut self, round: usize, candidates: usize) {
        self.events.push(Event::RoundStart(round, candidates));
    }

    fn on_candidate(&mut self, candidate: &FeatureSet, accuracy: f64) {
        self.events.push(Event::Candidate(candidate.clone(), accuracy));
    }

    fn on_commit(&mut self, round: &RoundSummary) {
        self.events.push(Event::Commit(round.clone()));
    }

    fn on_finish(&mut self, best_set: &FeatureSet, best_accuracy: f64) {
        self.events.push(Event::Finish(best_set.clone(), best_accuracy));
    }
}
