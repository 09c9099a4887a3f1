//! Schema types for representing analyzed table structure.

mod column;
mod dataset;
mod types;

pub use column::{Column, ColumnStats};
pub use dataset::Dataset;
pub use types::{ColumnType, FilterOperator, FilterRule, SortDirection};
