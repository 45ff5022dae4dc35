//! Single-subset accuracy evaluation

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use crate::pipeline::{accuracy, load_dataset, FeatureSet, LoadOptions};
use crate::utils::{create_spinner, format_accuracy};

/// Load a dataset and print the leave-one-out accuracy of one feature subset
///
/// # Arguments
/// * `input` - Path to the dataset
/// * `features` - Feature indices; empty means the default rate
/// * `options` - Tabular loading options
pub fn run_evaluate(input: &Path, features: &[usize], options: &LoadOptions) -> Result<()> {
    let spinner = create_spinner("Loading dataset...");
    let dataset = load_dataset(input, options)?;
    spinner.finish_with_message(format!(
        "{} Loaded {} instances with {} features",
        style("✓").green(),
        dataset.num_instances(),
        dataset.num_features()
    ));

    let feature_set: FeatureSet = features.iter().copied().collect();

    let spinner = create_spinner("Running leave-one-out evaluation...");
    let score = accuracy(&dataset, &feature_set)
        .with_context(|| format!("Failed to evaluate feature set {}", feature_set))?;
    spinner.finish_and_clear();

    let method = if feature_set.is_empty() {
        "default rate"
    } else {
        "leave-one-out 1-NN"
    };
    println!(
        "\n {} Feature set {} ({}) accuracy is {}\n",
        style("◆").cyan().bold(),
        style(&feature_set).cyan(),
        method,
        style(format_accuracy(score)).yellow().bold()
    );

    Ok(())
}
