//! Search summary report generation

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{RoundOutcome, SearchMode, SearchOutcome};
use crate::utils::format_accuracy;

/// Summary of one stepwise search
#[derive(Debug)]
pub struct SearchSummary {
    pub mode: SearchMode,
    pub instances: usize,
    pub features: usize,
    pub default_rate: f64,
    pub all_features_accuracy: f64,
    pub outcome: SearchOutcome,
    pub load_time: Duration,
    pub search_time: Duration,
}

impl SearchSummary {
    pub fn new(
        outcome: SearchOutcome,
        instances: usize,
        features: usize,
        default_rate: f64,
        all_features_accuracy: f64,
    ) -> Self {
        Self {
            mode: outcome.mode,
            instances,
            features,
            default_rate,
            all_features_accuracy,
            outcome,
            load_time: Duration::ZERO,
            search_time: Duration::ZERO,
        }
    }

    pub fn set_load_time(&mut self, elapsed: Duration) {
        self.load_time = elapsed;
    }

    pub fn set_search_time(&mut self, elapsed: Duration) {
        self.search_time = elapsed;
    }

    /// Number of rounds whose committed accuracy fell below the best known
    pub fn decline_count(&self) -> usize {
        self.outcome
            .rounds
            .iter()
            .filter(|r| r.outcome == RoundOutcome::Decline)
            .count()
    }

    /// Round table: one row per committed round
    pub fn rounds_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Round").add_attribute(Attribute::Bold),
            Cell::new("Feature").add_attribute(Attribute::Bold),
            Cell::new("Set Size").add_attribute(Attribute::Bold),
            Cell::new("Accuracy").add_attribute(Attribute::Bold),
            Cell::new("Outcome").add_attribute(Attribute::Bold),
        ]);

        let sign = match self.mode {
            SearchMode::ForwardSelection => "+",
            SearchMode::BackwardElimination => "-",
        };

        for round in &self.outcome.rounds {
            let (label, color) = match round.outcome {
                RoundOutcome::NewBest => ("new best", Color::Green),
                RoundOutcome::Plateau => ("plateau", Color::Cyan),
                RoundOutcome::Decline => ("decline", Color::Yellow),
            };
            table.add_row(vec![
                Cell::new(round.round),
                Cell::new(format!("{}{}", sign, round.committed_feature)),
                Cell::new(round.working_set.len()),
                Cell::new(format_accuracy(round.accuracy)),
                Cell::new(label).fg(color),
            ]);
        }

        table
    }

    /// Metric table: dataset, baselines and the best subset
    pub fn metrics_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("🧭 Mode"), Cell::new(self.mode)]);
        table.add_row(vec![Cell::new("📁 Instances"), Cell::new(self.instances)]);
        table.add_row(vec![Cell::new("🔢 Features"), Cell::new(self.features)]);
        table.add_row(vec![
            Cell::new("📏 Default Rate"),
            Cell::new(format_accuracy(self.default_rate)),
        ]);
        table.add_row(vec![
            Cell::new("🧮 All Features"),
            Cell::new(format_accuracy(self.all_features_accuracy)),
        ]);
        table.add_row(vec![
            Cell::new("⚠️  Declining Rounds"),
            Cell::new(self.decline_count()).fg(if self.decline_count() == 0 {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);
        table.add_row(vec![
            Cell::new("✅ Best Subset"),
            Cell::new(&self.outcome.best_set)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("🎯 Best Accuracy"),
            Cell::new(format_accuracy(self.outcome.best_accuracy))
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("⏱️  Load Time"),
            Cell::new(format!("{:.2}s", self.load_time.as_secs_f64())),
        ]);
        table.add_row(vec![
            Cell::new("⏱️  Search Time"),
            Cell::new(format!("{:.2}s", self.search_time.as_secs_f64())),
        ]);

        table
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("SEARCH SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        // Indent the tables
        for line in self.metrics_table().to_string().lines() {
            println!("    {}", line);
        }

        if !self.outcome.rounds.is_empty() {
            println!();
            println!(
                "    {} {}",
                style("📝").cyan(),
                style("ROUNDS").white().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());
            for line in self.rounds_table().to_string().lines() {
                println!("    {}", line);
            }
        }
    }
}
