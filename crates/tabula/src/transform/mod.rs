//! Filtering, sorting and cleaning of dataset rows.

mod engine;
mod operations;

pub use engine::FilterSortEngine;
pub use operations::{
    CleaningOperation, CleaningResult, MissingValueStrategy, handle_missing_values,
    remove_duplicates, remove_outliers, standardize_text,
};
