//! Example: Analyze a tabular data file with Tabula.
//!
//! Usage:
//!   cargo run --example analyze -- <file_path>
//!
//! Example:
//!   cargo run --example analyze -- sales.csv

use std::env;
use std::path::Path;

use tabula::insight::DEFAULT_DRIFT_THRESHOLD;
use tabula::{ChartDataGenerator, FilterSortEngine, InsightEngine, SortDirection, Tabula};

fn main() -> tabula::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example analyze -- <file_path> [reference_file]");
        eprintln!("\nExample:");
        eprintln!("  cargo run --example analyze -- sales.csv");
        std::process::exit(1);
    }

    let file_path = &args[1];
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Error: File not found: {}", file_path);
        std::process::exit(1);
    }

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Tabula Analysis: {}", file_path);
    println!("{}", separator);
    println!();

    let tabula = Tabula::new();
    let report = tabula.analyze_file(path)?;

    if let Some(source) = &report.source {
        println!("## Source Metadata");
        println!("  File: {}", source.file);
        println!("  Format: {}", source.format);
        println!("  Rows: {}", source.row_count);
        println!("  Columns: {}", source.column_count);
        println!("  Hash: {}", source.hash);
        println!();
    }

    let dataset = &report.dataset;
    println!("## Columns ({})", dataset.total_columns());
    println!();
    for column in dataset.columns() {
        println!(
            "  {:20} {:12} unique={:<5} missing={}",
            column.name,
            column.column_type.as_str(),
            column.unique_count,
            column.missing_count
        );
        if let Some(stats) = dataset.column_stats(&column.name)? {
            println!(
                "                       mean={:.2} median={:.2} std={:.2} [{}, {}]",
                stats.mean, stats.median, stats.std, stats.min, stats.max
            );
        }
    }
    println!();

    let quality = &report.profile.quality;
    println!("## Quality");
    println!("  Completeness: {:.1}%", report.profile.overview.completeness);
    println!("  Duplicate rows: {}", quality.duplicates);
    println!("  Missing values: {}", quality.missing_values);
    println!("  Outliers: {}", quality.outliers);
    println!("  Columns with text issues: {}", quality.text_issues);
    println!();

    println!("## Insights ({})", report.insights.len());
    for insight in &report.insights {
        println!(
            "  [{:>5.1}] {}: {}",
            insight.confidence, insight.title, insight.description
        );
    }
    println!();

    // Sort by the first numeric column, descending, and show the top rows.
    if let Some(column) = dataset.columns().iter().find(|c| c.is_numeric()) {
        let mut engine = FilterSortEngine::new(dataset);
        engine.set_sort(&column.name, SortDirection::Desc)?;
        println!("## Top 5 rows by {}", column.name);
        for row in engine.filtered_rows().into_iter().take(5) {
            println!("  {}", serde_json::to_string(row).unwrap_or_default());
        }
        println!();

        let ranking = InsightEngine::new(dataset).calculate_feature_importance(&column.name);
        if !ranking.is_empty() {
            println!("## Feature importance for {}", column.name);
            for feature in ranking {
                println!("  {:20} {:.3}", feature.feature, feature.importance);
            }
            println!();
        }
    }

    println!("## Recommended Charts");
    let generator = ChartDataGenerator::new(dataset);
    for chart in &report.recommended_charts {
        let points = generator.chart_data(&chart.config(), 100)?.len();
        println!("  {:8} {} ({} points)", chart.chart_type, chart.title, points);
    }

    if let Some(reference_path) = args.get(2) {
        let (reference, _) = tabula.load_dataset(reference_path)?;
        let drift = InsightEngine::new(dataset).detect_data_drift(&reference, DEFAULT_DRIFT_THRESHOLD);
        println!();
        println!("## Drift against {} ({} columns)", reference_path, drift.len());
        for record in drift {
            println!(
                "  {:20} {} score={:.3}",
                record.column, record.metric, record.drift_score
            );
        }
    }

    println!();
    println!("{}", separator);

    Ok(())
}
