//! nnsel: Feature Subset Selection CLI Tool
//!
//! A command-line tool for finding a high-accuracy feature subset using
//! leave-one-out nearest-neighbor evaluation and greedy stepwise search.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use tracing::info;

use nnsel::cli::{self, confirm_step, select_search_mode, Cli, Commands};
use nnsel::pipeline::{
    accuracy, default_rate, load_dataset, run_search, LoadOptions, SearchConfig, SearchMode,
};
use nnsel::report::{
    default_report_path, export_search_report, ConsoleReporter, ReportParams, SearchReport,
    SearchSummary,
};
use nnsel::utils::{
    create_spinner, finish_with_success, format_accuracy, init_tracing, print_banner,
    print_completion, print_config, print_count, print_info, print_step_header, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    // Configure Rayon thread pool
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    // Handle subcommands
    if let Some(command) = &cli.command {
        return match command {
            Commands::Evaluate {
                input,
                features,
                label_column,
                infer_schema_length,
            } => {
                let options = LoadOptions {
                    label_column: label_column.clone(),
                    infer_schema_length: *infer_schema_length,
                };
                cli::evaluate::run_evaluate(input, features, &options)
            }
        };
    }

    // Main search - require input
    let input = cli.input().ok_or_else(|| {
        anyhow::anyhow!("Input file is required. Use -i/--input to specify a file.")
    })?;

    let mode = match cli.mode {
        Some(mode) => mode,
        None if cli.no_confirm => SearchMode::ForwardSelection,
        None => select_search_mode()?,
    };
    let report_path = cli.report_path();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(input, mode, cli.parallel, report_path.as_deref());

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");

    let step_start = Instant::now();
    let spinner = create_spinner("Reading dataset...");
    let options = LoadOptions {
        label_column: cli.label_column.clone(),
        infer_schema_length: cli.infer_schema_length,
    };
    let dataset = load_dataset(input, &options)?;
    finish_with_success(&spinner, "Dataset loaded");
    let load_elapsed = step_start.elapsed();

    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!(
        "      This dataset has {} features (not including the class attribute), with {} instances.",
        dataset.num_features(),
        dataset.num_instances()
    );
    for class in dataset.class_counts() {
        print_count(
            "instance(s)",
            class.count,
            Some(&format!("(class {})", class.label)),
        );
    }

    // Step 2: Baselines
    print_step_header(2, "Baseline Accuracy");

    let baseline = default_rate(&dataset);
    let spinner = create_spinner("Running nearest neighbor with all features...");
    let all_features = dataset.all_features();
    let all_features_accuracy = accuracy(&dataset, &all_features)
        .context("Failed to evaluate the full feature set")?;
    finish_with_success(&spinner, "Baseline evaluation complete");

    print_info(&format!(
        "Default rate (majority class): {}",
        format_accuracy(baseline)
    ));
    print_info(&format!(
        "Running nearest neighbor with all {} features, using \"leaving-one-out\" evaluation, I get an accuracy of {}",
        dataset.num_features(),
        format_accuracy(all_features_accuracy)
    ));

    // Step 3: Stepwise search
    print_step_header(3, "Stepwise Search");

    let step_start = Instant::now();
    let config = SearchConfig::new(mode).with_parallel(cli.parallel);
    let mut reporter = ConsoleReporter::new(!cli.quiet);
    let outcome = run_search(&dataset, &config, &mut reporter)
        .with_context(|| format!("Search aborted ({})", mode))?;
    let search_elapsed = step_start.elapsed();

    // Step 4: Optional report export
    let report_path = match report_path {
        Some(path) => Some(path),
        None if !cli.no_confirm => {
            let path = default_report_path(input);
            if confirm_step(&format!("Save search report to {}?", path.display()))? {
                Some(path)
            } else {
                None
            }
        }
        None => None,
    };

    if let Some(path) = &report_path {
        print_step_header(4, "Save Report");

        let report = SearchReport::new(
            &dataset,
            &outcome,
            &ReportParams {
                input_file: &input.display().to_string(),
                parallel: cli.parallel,
                default_rate: baseline,
                all_features_accuracy,
                elapsed: search_elapsed,
            },
        );
        export_search_report(&report, path)?;
        print_success(&format!("Saved report to {}", path.display()));
    }

    // Display summary
    let mut summary = SearchSummary::new(
        outcome,
        dataset.num_instances(),
        dataset.num_features(),
        baseline,
        all_features_accuracy,
    );
    summary.set_load_time(load_elapsed);
    summary.set_search_time(search_elapsed);
    summary.display();

    print_completion();

    Ok(())
}
