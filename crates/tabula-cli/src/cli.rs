//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tabula: tabular data analysis toolkit
#[derive(Parser)]
#[command(name = "tabula")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a data file: column types, quality, insights and chart ideas
    Analyze {
        /// Path to the data file (CSV/TSV/JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the data quality profile
    Profile {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List statistical insights, most confident first
    Insights {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Maximum number of insights
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search, filter and sort rows
    Filter {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Case-insensitive search across all fields
        #[arg(short, long)]
        search: Option<String>,

        /// Filter rule as column:operator:value (repeatable)
        #[arg(short = 'F', long = "filter", value_name = "RULE")]
        filters: Vec<String>,

        /// Column to sort by
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,
    },

    /// Build chart data
    Chart {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Chart type (bar, line, scatter, pie)
        #[arg(short = 't', long = "type")]
        chart_type: String,

        /// X-axis column (category column for pie charts)
        #[arg(short, long)]
        x: String,

        /// Y-axis column (numeric; not used for pie charts)
        #[arg(short, long)]
        y: Option<String>,

        /// Rows scanned for point charts
        #[arg(short, long, default_value = "100")]
        limit: usize,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,
    },

    /// Fit a single-feature linear regression
    Model {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Target column
        #[arg(short, long)]
        target: String,

        /// Feature columns (only the first is used)
        #[arg(long, num_args = 1.., required = true)]
        features: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rank numeric columns by correlation with a target
    Importance {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Target column
        #[arg(short, long)]
        target: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare column distributions against a reference file
    Drift {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Reference data file
        #[arg(short, long)]
        reference: PathBuf,

        /// Drift score above which a column is reported
        #[arg(long, default_value = "0.1")]
        threshold: f64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply a cleaning operation and print the cleaned rows
    Clean {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Operation (dedupe, missing, standardize, outliers)
        #[arg(long)]
        op: CleanOp,

        /// Target column (required for all operations but dedupe)
        #[arg(short, long)]
        column: Option<String>,

        /// Missing value strategy (remove, fill, mean, mode)
        #[arg(long, default_value = "remove")]
        strategy: String,

        /// Fill value for the fill strategy
        #[arg(long)]
        fill: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,
    },

    /// Serve the HTTP API
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for the web server
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Maximum rows accepted per request
        #[arg(long, default_value = "100000")]
        max_rows: usize,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use json or csv.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Cleaning operation choice
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CleanOp {
    /// Remove duplicate rows
    Dedupe,
    /// Handle missing values in a column
    Missing,
    /// Trim, collapse whitespace and lowercase a text column
    Standardize,
    /// Drop rows with IQR outliers in a column
    Outliers,
}

impl std::str::FromStr for CleanOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "dedupe" | "duplicates" | "remove_duplicates" => Ok(CleanOp::Dedupe),
            "missing" | "handle_missing" => Ok(CleanOp::Missing),
            "standardize" | "standardize_text" => Ok(CleanOp::Standardize),
            "outliers" | "remove_outliers" => Ok(CleanOp::Outliers),
            _ => Err(format!(
                "Unknown operation: {}. Use: dedupe, missing, standardize, or outliers.",
                s
            )),
        }
    }
}

impl std::fmt::Display for CleanOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CleanOp::Dedupe => write!(f, "dedupe"),
            CleanOp::Missing => write!(f, "missing"),
            CleanOp::Standardize => write!(f, "standardize"),
            CleanOp::Outliers => write!(f, "outliers"),
        }
    }
}
