//! Utilities - terminal styling, progress indicators and log setup

pub mod logging;
pub mod progress;
pub mod styling;

pub use logging::*;
pub use progress::*;
pub use styling::*;
