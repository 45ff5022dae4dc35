//! Interactive prompts using dialoguer

use anyhow::Result;
use dialoguer::{Confirm, Select};

use crate::pipeline::SearchMode;

/// Prompt user to pick the search algorithm
pub fn select_search_mode() -> Result<SearchMode> {
    let modes = [SearchMode::ForwardSelection, SearchMode::BackwardElimination];
    let items = ["Forward Selection", "Backward Elimination"];

    let choice = Select::new()
        .with_prompt("Type the number of the algorithm you want to run")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(modes[choice])
}

/// Prompt user to confirm proceeding with an action
pub fn confirm_step(message: &str) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()?;
    Ok(confirmed)
}
