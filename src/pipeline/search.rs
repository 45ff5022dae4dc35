//! Greedy stepwise feature subset search
//!
//! Forward selection starts from the empty set and adds one feature per
//! round; backward elimination starts from every feature and removes one per
//! round. Both share a single round routine, [`step_round`], parameterized by
//! the step direction. Every round scores each eligible single-feature change
//! with [`accuracy`], commits the best one permanently and records whether it
//! beat the best subset seen so far. A round that does not improve never stops
//! the search, so it always runs until the working set is full (forward) or
//! empty (backward).
//!
//! Round progress is exposed through the [`SearchReporter`] hook; nothing in
//! this module writes to the terminal.

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::pipeline::dataset::Dataset;
use crate::pipeline::error::SelectionError;
use crate::pipeline::evaluator::accuracy;
use crate::pipeline::features::FeatureSet;

/// Direction of the stepwise search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Start from no features and add one per round
    ForwardSelection,
    /// Start from all features and remove one per round
    BackwardElimination,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::ForwardSelection => write!(f, "forward selection"),
            SearchMode::BackwardElimination => write!(f, "backward elimination"),
        }
    }
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "forward" | "forward-selection" | "forward_selection" => {
                Ok(SearchMode::ForwardSelection)
            }
            "2" | "backward" | "backward-elimination" | "backward_elimination" => {
                Ok(SearchMode::BackwardElimination)
            }
            other => Err(format!(
                "unknown search mode '{}' (expected forward or backward)",
                other
            )),
        }
    }
}

/// Search configuration.
///
/// Construct via [`SearchConfig::new`], then chain `with_parallel` if desired.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub mode: SearchMode,
    /// Score the candidates of a round on the rayon thread pool
    pub parallel: bool,
}

impl SearchConfig {
    pub fn new(mode: SearchMode) -> Self {
        Self {
            mode,
            parallel: false,
        }
    }

    /// Evaluate round candidates in parallel. Candidate order, tie-breaking
    /// and reporter callbacks are identical to the sequential run.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// How a committed round compares to the best subset known before it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundOutcome {
    /// Accuracy strictly above the previous best; the working set becomes the best set
    NewBest,
    /// Accuracy equal to the previous best; the best set is kept
    Plateau,
    /// Accuracy below the previous best: a possible local maximum
    Decline,
}

impl RoundOutcome {
    fn classify(accuracy: f64, best_accuracy: f64) -> Self {
        if accuracy > best_accuracy {
            RoundOutcome::NewBest
        } else if accuracy < best_accuracy {
            RoundOutcome::Decline
        } else {
            RoundOutcome::Plateau
        }
    }
}

/// One scored candidate of a round
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateScore {
    /// Feature added or removed to form the candidate
    pub feature: usize,
    /// Candidate feature subset
    pub features: FeatureSet,
    pub accuracy: f64,
}

/// Result of one committed round
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundSummary {
    /// One-based round number
    pub round: usize,
    /// Feature added (forward) or removed (backward) this round
    pub committed_feature: usize,
    /// Working set after the commit
    pub working_set: FeatureSet,
    /// Accuracy of the working set after the commit
    pub accuracy: f64,
    pub outcome: RoundOutcome,
    /// Best accuracy known after this round
    pub best_accuracy: f64,
    /// Every candidate scored this round, in evaluation order
    pub candidates: Vec<CandidateScore>,
}

impl RoundSummary {
    pub fn is_new_best(&self) -> bool {
        self.outcome == RoundOutcome::NewBest
    }
}

/// Final result of a search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub mode: SearchMode,
    /// Working set before the first round (empty or full)
    pub initial_set: FeatureSet,
    pub initial_accuracy: f64,
    pub best_set: FeatureSet,
    pub best_accuracy: f64,
    pub rounds: Vec<RoundSummary>,
}

/// Callbacks through which the search exposes its progress.
///
/// All methods default to no-ops so a reporter only implements what it needs.
pub trait SearchReporter {
    /// Called once with the starting working set and its accuracy
    fn on_start(&mut self, _mode: SearchMode, _initial_set: &FeatureSet, _accuracy: f64) {}

    /// Called before a round scores its `candidates` candidates
    fn on_round_start(&mut self, _round: usize, _candidates: usize) {}

    /// Called once per scored candidate, in ascending candidate order
    fn on_candidate(&mut self, _candidate: &FeatureSet, _accuracy: f64) {}

    /// Called once per round after the best candidate is committed
    fn on_commit(&mut self, _round: &RoundSummary) {}

    /// Called once when the search terminates
    fn on_finish(&mut self, _best_set: &FeatureSet, _best_accuracy: f64) {}
}

/// Reporter that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl SearchReporter for NullReporter {}

/// Mutable state of a search, replaced once per round
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    pub mode: SearchMode,
    pub working_set: FeatureSet,
    pub best_set: FeatureSet,
    pub best_accuracy: f64,
    /// Indexed by column: `true` while the feature may still be added
    /// (forward) or removed (backward). Column 0 is never available.
    pub available: Vec<bool>,
    /// Rounds completed so far
    pub round: usize,
}

impl SearchState {
    /// Starting state for `mode`: the empty set for forward selection, every
    /// feature for backward elimination. The starting set is the first best set.
    pub fn initial(dataset: &Dataset, mode: SearchMode) -> Result<Self, SelectionError> {
        let working_set = match mode {
            SearchMode::ForwardSelection => FeatureSet::new(),
            SearchMode::BackwardElimination => dataset.all_features(),
        };
        let best_accuracy = accuracy(dataset, &working_set)?;

        let mut available = vec![true; dataset.num_columns()];
        available[0] = false;

        Ok(Self {
            mode,
            best_set: working_set.clone(),
            working_set,
            best_accuracy,
            available,
            round: 0,
        })
    }

    /// `true` once every feature has been added or removed
    pub fn is_terminal(&self) -> bool {
        !self.available.iter().any(|&a| a)
    }

    fn step(&self) -> Step {
        match self.mode {
            SearchMode::ForwardSelection => Step::Add,
            SearchMode::BackwardElimination => Step::Remove,
        }
    }
}

/// Single-feature mutation applied by a round
#[derive(Debug, Clone, Copy)]
enum Step {
    Add,
    Remove,
}

impl Step {
    /// Eligible features in the order they are scored: ascending index for
    /// additions, the working set's current order for removals.
    fn eligible(self, state: &SearchState) -> Vec<usize> {
        let is_available = |i: &usize| state.available.get(*i).copied().unwrap_or(false);
        match self {
            Step::Add => (0..state.available.len()).filter(is_available).collect(),
            Step::Remove => state.working_set.iter().filter(is_available).collect(),
        }
    }

    fn apply(self, set: &FeatureSet, feature: usize) -> FeatureSet {
        match self {
            Step::Add => set.with(feature),
            Step::Remove => set.without(feature),
        }
    }
}

/// Run one round: score every eligible candidate, commit the best and return
/// the next state together with the round summary.
///
/// The highest accuracy wins; among equal accuracies the first candidate in
/// scoring order wins.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`SelectionError::NoEligibleCandidates`] | no feature is left to add or remove |
/// | Evaluator errors | From scoring a candidate |
pub fn step_round<R: SearchReporter + ?Sized>(
    dataset: &Dataset,
    state: SearchState,
    config: &SearchConfig,
    reporter: &mut R,
) -> Result<(SearchState, RoundSummary), SelectionError> {
    let round = state.round + 1;
    let step = state.step();
    let eligible = step.eligible(&state);

    if eligible.is_empty() {
        return Err(SelectionError::NoEligibleCandidates {
            round,
            mode: state.mode,
        });
    }

    reporter.on_round_start(round, eligible.len());

    let candidates: Vec<(usize, FeatureSet)> = eligible
        .into_iter()
        .map(|feature| (feature, step.apply(&state.working_set, feature)))
        .collect();

    let mut scored: Vec<CandidateScore> = Vec::with_capacity(candidates.len());
    if config.parallel {
        // Indexed collect keeps candidate order regardless of completion order
        let results = candidates
            .into_par_iter()
            .map(|(feature, features)| {
                accuracy(dataset, &features).map(|accuracy| CandidateScore {
                    feature,
                    features,
                    accuracy,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        for candidate in results {
            reporter.on_candidate(&candidate.features, candidate.accuracy);
            scored.push(candidate);
        }
    } else {
        for (feature, features) in candidates {
            let accuracy = accuracy(dataset, &features)?;
            reporter.on_candidate(&features, accuracy);
            scored.push(CandidateScore {
                feature,
                features,
                accuracy,
            });
        }
    }

    let mut best: Option<&CandidateScore> = None;
    for candidate in &scored {
        if best.map_or(true, |b| candidate.accuracy > b.accuracy) {
            best = Some(candidate);
        }
    }
    let best = best.ok_or(SelectionError::NoEligibleCandidates {
        round,
        mode: state.mode,
    })?;

    let committed_feature = best.feature;
    let working_set = best.features.clone();
    let round_accuracy = best.accuracy;
    let outcome = RoundOutcome::classify(round_accuracy, state.best_accuracy);

    let (best_set, best_accuracy) = if outcome == RoundOutcome::NewBest {
        (working_set.clone(), round_accuracy)
    } else {
        (state.best_set, state.best_accuracy)
    };

    let mut available = state.available;
    available[committed_feature] = false;

    debug!(
        round,
        feature = committed_feature,
        working_set = %working_set,
        accuracy = round_accuracy,
        ?outcome,
        "round committed"
    );

    let summary = RoundSummary {
        round,
        committed_feature,
        working_set: working_set.clone(),
        accuracy: round_accuracy,
        outcome,
        best_accuracy,
        candidates: scored,
    };
    reporter.on_commit(&summary);

    let next = SearchState {
        mode: state.mode,
        working_set,
        best_set,
        best_accuracy,
        available,
        round,
    };

    Ok((next, summary))
}

/// Run a complete stepwise search and return the best subset seen.
///
/// # Errors
///
/// Any [`SelectionError`] raised while scoring aborts the search; no partial
/// result is returned.
#[instrument(skip_all, fields(mode = %config.mode, instances = dataset.num_instances(), features = dataset.num_features()))]
pub fn run_search<R: SearchReporter + ?Sized>(
    dataset: &Dataset,
    config: &SearchConfig,
    reporter: &mut R,
) -> Result<SearchOutcome, SelectionError> {
    let mut state = SearchState::initial(dataset, config.mode)?;
    let initial_set = state.working_set.clone();
    let initial_accuracy = state.best_accuracy;
    reporter.on_start(config.mode, &initial_set, initial_accuracy);

    let mut rounds = Vec::with_capacity(dataset.num_features());
    while !state.is_terminal() {
        let (next, summary) = step_round(dataset, state, config, reporter)?;
        rounds.push(summary);
        state = next;
    }

    reporter.on_finish(&state.best_set, state.best_accuracy);
    info!(
        best_set = %state.best_set,
        best_accuracy = state.best_accuracy,
        rounds = rounds.len(),
        "search finished"
    );

    Ok(SearchOutcome {
        mode: config.mode,
        initial_set,
        initial_accuracy,
        best_set: state.best_set,
        best_accuracy: state.best_accuracy,
        rounds,
    })
}

/// Sequential forward selection
pub fn forward_selection<R: SearchReporter + ?Sized>(
    dataset: &Dataset,
    reporter: &mut R,
) -> Result<SearchOutcome, SelectionError> {
    run_search(dataset, &SearchConfig::new(SearchMode::ForwardSelection), reporter)
}

/// Sequential backward elimination
pub fn backward_elimination<R: SearchReporter + ?Sized>(
    dataset: &Dataset,
    reporter: &mut R,
) -> Result<SearchOutcome, SelectionError> {
    run_search(dataset, &SearchConfig::new(SearchMode::BackwardElimination), reporter)
}
