//! nnsel: Feature Subset Selection Library
//!
//! Scores feature subsets with leave-one-out nearest-neighbor accuracy and
//! searches for a high-accuracy subset by forward selection or backward
//! elimination.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
