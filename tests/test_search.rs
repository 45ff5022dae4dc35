//! Tests for forward selection and backward elimination

use nnsel::pipeline::{
    accuracy, backward_elimination, forward_selection, run_search, step_round, Dataset,
    FeatureSet, NullReporter, RoundOutcome, SearchConfig, SearchMode, SearchState,
    SelectionError,
};

#[path = "common/mod.rs"]
mod common;

use common::{Event, RecordingReporter};

#[test]
fn test_forward_selection_on_separated_dataset() {
    let ds = common::separated_dataset();

    let outcome = forward_selection(&ds, &mut NullReporter).unwrap();

    assert_eq!(outcome.rounds.len(), 2, "Two features means exactly two rounds");
    assert!(outcome.initial_set.is_empty());
    assert_eq!(outcome.initial_accuracy, 50.0);
    assert_eq!(outcome.best_accuracy, 100.0);

    // {1} and {2} tie at 100% in round 1; the lower index is committed and
    // becomes the best set. Round 2 reaches 100% again without exceeding it.
    assert_eq!(outcome.best_set.as_slice(), &[1]);
    assert_eq!(outcome.rounds[0].outcome, RoundOutcome::NewBest);
    assert_eq!(outcome.rounds[1].working_set.sorted(), vec![1, 2]);
    assert_eq!(outcome.rounds[1].accuracy, 100.0);
    assert_eq!(outcome.rounds[1].outcome, RoundOutcome::Plateau);
}

#[test]
fn test_backward_elimination_on_separated_dataset() {
    let ds = common::separated_dataset();

    let outcome = backward_elimination(&ds, &mut NullReporter).unwrap();

    assert_eq!(outcome.rounds.len(), 2);
    assert_eq!(outcome.initial_set.as_slice(), &[1, 2]);
    assert_eq!(outcome.initial_accuracy, 100.0);
    assert_eq!(outcome.best_set.sorted(), vec![1, 2], "Best set is never replaced");
    assert_eq!(outcome.best_accuracy, 100.0);

    // Removing either feature keeps 100%: a plateau, not a decline
    assert_eq!(outcome.rounds[0].committed_feature, 1);
    assert_eq!(outcome.rounds[0].working_set.as_slice(), &[2]);
    assert_eq!(outcome.rounds[0].outcome, RoundOutcome::Plateau);
    assert!(!outcome.rounds[0].is_new_best());

    // The empty set falls back to the 50% default rate
    assert!(outcome.rounds[1].working_set.is_empty());
    assert_eq!(outcome.rounds[1].accuracy, 50.0);
    assert_eq!(outcome.rounds[1].outcome, RoundOutcome::Decline);
}

#[test]
fn test_forward_working_set_grows_by_one_each_round() {
    let ds = common::noise_dataset(30, 6, 11);

    let outcome = forward_selection(&ds, &mut NullReporter).unwrap();

    assert_eq!(outcome.rounds.len(), 6);
    for (i, round) in outcome.rounds.iter().enumerate() {
        assert_eq!(round.round, i + 1);
        assert_eq!(round.working_set.len(), i + 1);
        assert_eq!(round.candidates.len(), 6 - i, "One candidate per unused feature");
    }
    assert_eq!(
        outcome.rounds.last().unwrap().working_set.sorted(),
        vec![1, 2, 3, 4, 5, 6]
    );
}

#[test]
fn test_backward_working_set_shrinks_by_one_each_round() {
    let ds = common::noise_dataset(30, 6, 12);

    let outcome = backward_elimination(&ds, &mut NullReporter).unwrap();

    assert_eq!(outcome.rounds.len(), 6);
    for (i, round) in outcome.rounds.iter().enumerate() {
        assert_eq!(round.working_set.len(), 5 - i);
        assert!(!round.working_set.contains(round.committed_feature));
    }
    assert!(outcome.rounds.last().unwrap().working_set.is_empty());
}

#[test]
fn test_no_feature_committed_twice() {
    let ds = common::noise_dataset(20, 5, 3);

    for mode in [SearchMode::ForwardSelection, SearchMode::BackwardElimination] {
        let outcome = run_search(&ds, &SearchConfig::new(mode), &mut NullReporter).unwrap();
        let mut committed: Vec<usize> = outcome.rounds.iter().map(|r| r.committed_feature).collect();
        committed.sort_unstable();
        assert_eq!(committed, vec![1, 2, 3, 4, 5], "{} must touch each feature once", mode);
    }
}

#[test]
fn test_full_set_accuracy_matches_final_forward_round() {
    for seed in [1, 2, 3] {
        let ds = common::noise_dataset(24, 4, seed);

        let outcome = forward_selection(&ds, &mut NullReporter).unwrap();
        let direct = accuracy(&ds, &ds.all_features()).unwrap();

        assert_eq!(outcome.rounds.last().unwrap().accuracy, direct);
    }
}

#[test]
fn test_equal_candidates_pick_lower_index() {
    // Features 1 and 2 are identical columns, so every candidate pair ties
    let rows = vec![
        vec![1.0, 0.0, 0.0, 7.0],
        vec![1.0, 1.0, 1.0, 3.0],
        vec![2.0, 5.0, 5.0, 1.0],
        vec![2.0, 6.0, 6.0, 9.0],
    ];
    let ds = Dataset::new(rows).unwrap();

    let forward = forward_selection(&ds, &mut NullReporter).unwrap();
    let round_one = &forward.rounds[0];
    let score_1 = round_one.candidates.iter().find(|c| c.feature == 1).unwrap().accuracy;
    let score_2 = round_one.candidates.iter().find(|c| c.feature == 2).unwrap().accuracy;
    assert_eq!(score_1, score_2);
    assert_eq!(round_one.committed_feature, 1);

    let backward = backward_elimination(&ds, &mut NullReporter).unwrap();
    let removal_1 = backward.rounds[0].candidates.iter().find(|c| c.feature == 1).unwrap();
    let removal_2 = backward.rounds[0].candidates.iter().find(|c| c.feature == 2).unwrap();
    assert_eq!(removal_1.accuracy, removal_2.accuracy);
    assert_ne!(backward.rounds[0].committed_feature, 2, "feature 1 precedes feature 2");
}

#[test]
fn test_informative_feature_found_first() {
    let ds = common::informative_dataset(40, 6, 42);

    let outcome = forward_selection(&ds, &mut NullReporter).unwrap();

    assert_eq!(outcome.rounds[0].committed_feature, 1);
    assert_eq!(outcome.best_accuracy, 100.0);
    assert!(outcome.best_set.contains(1));
}

#[test]
fn test_best_accuracy_is_max_over_committed_rounds() {
    let ds = common::noise_dataset(30, 5, 99);

    for mode in [SearchMode::ForwardSelection, SearchMode::BackwardElimination] {
        let outcome = run_search(&ds, &SearchConfig::new(mode), &mut NullReporter).unwrap();

        let max = outcome
            .rounds
            .iter()
            .map(|r| r.accuracy)
            .fold(outcome.initial_accuracy, f64::max);
        assert_eq!(outcome.best_accuracy, max);
        assert_eq!(accuracy(&ds, &outcome.best_set).unwrap(), outcome.best_accuracy);

        for round in &outcome.rounds {
            assert_eq!(round.is_new_best(), round.outcome == RoundOutcome::NewBest);
        }
    }
}

#[test]
fn test_parallel_matches_sequential() {
    let ds = common::noise_dataset(40, 7, 5);

    for mode in [SearchMode::ForwardSelection, SearchMode::BackwardElimination] {
        let mut seq_events = RecordingReporter::default();
        let mut par_events = RecordingReporter::default();

        let sequential = run_search(&ds, &SearchConfig::new(mode), &mut seq_events).unwrap();
        let parallel = run_search(
            &ds,
            &SearchConfig::new(mode).with_parallel(true),
            &mut par_events,
        )
        .unwrap();

        assert_eq!(sequential, parallel);
        assert_eq!(seq_events.events, par_events.events, "Callback order must match");
    }
}

#[test]
fn test_reporter_event_sequence() {
    let ds = common::separated_dataset();
    let mut reporter = RecordingReporter::default();

    let outcome = forward_selection(&ds, &mut reporter).unwrap();

    assert_eq!(
        reporter.events.first(),
        Some(&Event::Start(SearchMode::ForwardSelection, FeatureSet::new(), 50.0))
    );
    assert_eq!(
        reporter.events.last(),
        Some(&Event::Finish(outcome.best_set.clone(), outcome.best_accuracy))
    );
    assert_eq!(reporter.events[1], Event::RoundStart(1, 2));

    let candidates = reporter.candidates();
    assert_eq!(candidates.len(), 3, "2 candidates in round 1, 1 in round 2");
    assert_eq!(candidates[0], (FeatureSet::from(vec![1]), 100.0));
    assert_eq!(candidates[1], (FeatureSet::from(vec![2]), 100.0));
    assert_eq!(candidates[2], (FeatureSet::from(vec![1, 2]), 100.0));

    assert_eq!(reporter.commits(), outcome.rounds);
}

#[test]
fn test_rounds_can_be_stepped_individually() {
    let ds = common::separated_dataset();
    let config = SearchConfig::new(SearchMode::BackwardElimination);

    let state = SearchState::initial(&ds, config.mode).unwrap();
    let (state, first) = step_round(&ds, state, &config, &mut NullReporter).unwrap();
    assert_eq!(first.round, 1);
    assert_eq!(state.working_set.as_slice(), &[2]);
    assert!(!state.is_terminal());

    let (state, second) = step_round(&ds, state, &config, &mut NullReporter).unwrap();
    assert_eq!(second.round, 2);
    assert!(state.is_terminal());
    assert_eq!(state.best_set.as_slice(), &[1, 2]);

    let err = step_round(&ds, state, &config, &mut NullReporter).unwrap_err();
    assert_eq!(
        err,
        SelectionError::NoEligibleCandidates {
            round: 3,
            mode: SearchMode::BackwardElimination
        }
    );
}

#[test]
fn test_single_instance_search_aborts() {
    let ds = Dataset::new(vec![vec![1.0, 2.0, 3.0]]).unwrap();

    let forward = forward_selection(&ds, &mut NullReporter);
    let backward = backward_elimination(&ds, &mut NullReporter);

    assert_eq!(
        forward.unwrap_err(),
        SelectionError::TooFewInstances { instances: 1 }
    );
    assert_eq!(
        backward.unwrap_err(),
        SelectionError::TooFewInstances { instances: 1 }
    );
}
