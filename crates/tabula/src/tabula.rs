//! Main Tabula struct and public API.

use std::path::Path;

use serde::Serialize;

use crate::chart::{ChartDataGenerator, ChartRecommendation};
use crate::error::Result;
use crate::input::{Parser, ParserConfig, Row, SourceMetadata};
use crate::insight::{Insight, InsightEngine, MAX_INSIGHTS};
use crate::profile::{DataProfile, analyze, profile};
use crate::schema::Dataset;

/// Configuration for Tabula analysis.
#[derive(Debug, Clone)]
pub struct TabulaConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Maximum rows to analyze (None = all). Overrides the parser limit.
    pub max_rows: Option<usize>,
    /// Maximum insights in a report.
    pub insight_limit: usize,
}

impl Default for TabulaConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            max_rows: None,
            insight_limit: MAX_INSIGHTS,
        }
    }
}

/// Everything learned from one dataset.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Metadata about the source file, when the rows came from one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceMetadata>,
    pub dataset: Dataset,
    pub profile: DataProfile,
    pub insights: Vec<Insight>,
    pub recommended_charts: Vec<ChartRecommendation>,
}

/// The main analysis entry point.
pub struct Tabula {
    config: TabulaConfig,
    parser: Parser,
}

impl Tabula {
    /// Create a new Tabula instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(TabulaConfig::default())
    }

    /// Create a Tabula instance with custom configuration.
    pub fn with_config(config: TabulaConfig) -> Self {
        let mut parser_config = config.parser.clone();
        if config.max_rows.is_some() {
            parser_config.max_rows = config.max_rows;
        }

        Self {
            parser: Parser::with_config(parser_config),
            config,
        }
    }

    pub fn config(&self) -> &TabulaConfig {
        &self.config
    }

    /// Load rows from a CSV/TSV/JSON file.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<(Vec<Row>, SourceMetadata)> {
        self.parser.parse_file(path)
    }

    /// Load and analyze a file into a dataset named after the file.
    pub fn load_dataset(&self, path: impl AsRef<Path>) -> Result<(Dataset, SourceMetadata)> {
        let (rows, source) = self.load_file(path)?;
        Ok((analyze(rows, source.file.clone()), source))
    }

    /// Analyze a data file and produce a full report.
    pub fn analyze_file(&self, path: impl AsRef<Path>) -> Result<AnalysisReport> {
        let (dataset, source) = self.load_dataset(path)?;
        log::info!(
            "analyzing {} ({} rows, {} columns)",
            source.file,
            source.row_count,
            source.column_count
        );
        Ok(self.report(dataset, Some(source)))
    }

    /// Analyze in-memory rows and produce a full report.
    pub fn analyze_rows(&self, mut rows: Vec<Row>, name: impl Into<String>) -> AnalysisReport {
        if let Some(max) = self.config.max_rows {
            rows.truncate(max);
        }
        self.report(analyze(rows, name), None)
    }

    fn report(&self, dataset: Dataset, source: Option<SourceMetadata>) -> AnalysisReport {
        let profile = profile(&dataset);
        let insights =
            InsightEngine::new(&dataset).generate_insights_with_limit(self.config.insight_limit);
        let recommended_charts = ChartDataGenerator::new(&dataset).recommended_charts();

        AnalysisReport {
            source,
            dataset,
            profile,
            insights,
            recommended_charts,
        }
    }
}

impl Default for Tabula {
    fn default() -> Self {
        Self::new()
    }
}
