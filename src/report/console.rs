//! Terminal reporter for a running search

use console::style;
use indicatif::ProgressBar;

use crate::pipeline::{FeatureSet, RoundOutcome, RoundSummary, SearchMode, SearchReporter};
use crate::utils::{
    create_progress_bar, format_accuracy, print_info, print_success, print_warning,
};

/// Prints every candidate and round commit while the search runs
pub struct ConsoleReporter {
    show_candidates: bool,
    progress: Option<ProgressBar>,
}

impl ConsoleReporter {
    /// `show_candidates` prints a line per scored candidate; round results are always shown
    pub fn new(show_candidates: bool) -> Self {
        Self {
            show_candidates,
            progress: None,
        }
    }
}

impl SearchReporter for ConsoleReporter {
    fn on_start(&mut self, mode: SearchMode, initial_set: &FeatureSet, accuracy: f64) {
        print_info(&format!("Beginning {}", mode));
        println!(
            "      Using feature(s) {} accuracy is {}",
            initial_set,
            format_accuracy(accuracy)
        );
        println!(
            "    Feature set {} was best, accuracy is {}",
            style(initial_set).cyan(),
            style(format_accuracy(accuracy)).yellow().bold()
        );
    }

    fn on_round_start(&mut self, round: usize, candidates: usize) {
        println!();
        self.progress = Some(create_progress_bar(
            candidates as u64,
            &format!("Round {}", round),
        ));
    }

    fn on_candidate(&mut self, candidate: &FeatureSet, accuracy: f64) {
        let line = format!(
            "      Using feature(s) {} accuracy is {}",
            candidate,
            format_accuracy(accuracy)
        );
        if self.show_candidates {
            // A hidden bar (stdout is not a terminal) drops println output
            match &self.progress {
                Some(pb) if !pb.is_hidden() => pb.println(line),
                _ => println!("{}", line),
            }
        }
        if let Some(pb) = &self.progress {
            pb.inc(1);
        }
    }

    fn on_commit(&mut self, round: &RoundSummary) {
        if let Some(pb) = self.progress.take() {
            pb.finish_and_clear();
        }

        if round.outcome == RoundOutcome::Decline {
            print_warning("Accuracy has decreased! Continuing search in case of local maxima");
        }
        println!(
            "    Feature set {} was best, accuracy is {}{}",
            style(&round.working_set).cyan(),
            style(format_accuracy(round.accuracy)).yellow().bold(),
            match round.outcome {
                RoundOutcome::NewBest => style(" (new best)").green().to_string(),
                RoundOutcome::Plateau => style(" (no change)").dim().to_string(),
                RoundOutcome::Decline => String::new(),
            }
        );
    }

    fn on_finish(&mut self, best_set: &FeatureSet, best_accuracy: f64) {
        println!();
        print_success(&format!(
            "Finished search!! The best feature subset is {}, which has an accuracy of {}",
            best_set,
            format_accuracy(best_accuracy)
        ));
    }
}
