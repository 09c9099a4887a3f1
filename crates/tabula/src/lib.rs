//! Tabula: tabular data analysis toolkit.
//!
//! Tabula takes rows of named fields, infers a type for every column and
//! builds statistics, quality profiles, chart aggregates and insights on
//! top of them.
//!
//! # Core Principles
//!
//! - **Immutable datasets**: a [`Dataset`] is built once from rows; every view reads it
//! - **Graceful statistics**: too little data yields empty results, never errors
//! - **Explicit structure errors**: unknown columns or names are reported to the caller
//!
//! # Example
//!
//! ```
//! use tabula::{FilterOperator, FilterRule, FilterSortEngine, Value, analyze, row};
//!
//! let rows = vec![
//!     row([("city", Value::from("NYC")), ("age", Value::from(25))]),
//!     row([("city", Value::from("LA")), ("age", Value::from(31))]),
//! ];
//! let dataset = analyze(rows, "people");
//!
//! let mut engine = FilterSortEngine::new(&dataset);
//! engine
//!     .add_filter_rule(FilterRule::new("age", FilterOperator::Greater, "30"))
//!     .unwrap();
//! assert_eq!(engine.total_filtered_rows(), 1);
//! ```

pub mod chart;
pub mod error;
pub mod inference;
pub mod input;
pub mod insight;
pub mod profile;
pub mod schema;
pub mod transform;

mod tabula;

pub use crate::tabula::{AnalysisReport, Tabula, TabulaConfig};
pub use chart::{ChartConfig, ChartData, ChartDataGenerator, ChartRecommendation, ChartType};
pub use error::{Result, TabulaError};
pub use input::{Parser, ParserConfig, Row, SourceMetadata, Value, row};
pub use insight::{DriftRecord, FeatureImportance, Insight, InsightEngine, PredictionModel};
pub use profile::{DataProfile, analyze, profile};
pub use schema::{Column, ColumnStats, ColumnType, Dataset, FilterOperator, FilterRule, SortDirection};
pub use transform::{CleaningOperation, FilterSortEngine, MissingValueStrategy};
