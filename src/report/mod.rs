//! Report module - presenting and exporting search results

pub mod console;
pub mod search_report;
pub mod summary;

pub use console::*;
pub use search_report::*;
pub use summary::*;
