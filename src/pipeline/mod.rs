//! Pipeline module - dataset model, accuracy evaluation and stepwise search

pub mod dataset;
pub mod error;
pub mod evaluator;
pub mod features;
pub mod loader;
pub mod search;

pub use dataset::*;
pub use error::*;
pub use evaluator::*;
pub use features::*;
pub use loader::*;
pub use search::*;
