//! Dataset analysis and quality profiling.

mod analyzer;
mod quality;

pub use analyzer::analyze;
pub use quality::{ColumnProfile, DataProfile, ProfileOverview, QualityIssues, profile};

pub(crate) use quality::canonical_row;
