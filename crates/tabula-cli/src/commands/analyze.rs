//! Analyze command - full report for a data file.

use std::path::PathBuf;

use colored::Colorize;
use tabula::{ColumnType, Tabula};

pub fn run(file: PathBuf, json: bool, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    // Validate input file exists
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let report = Tabula::new().analyze_file(&file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Analyzed".cyan().bold(),
        file.display().to_string().white()
    );
    if let Some(source) = &report.source {
        println!("  Format: {}  Hash: {}", source.format, source.hash);
    }
    println!(
        "  {} rows, {} columns, ~{} bytes",
        report.dataset.total_rows().to_string().white().bold(),
        report.dataset.total_columns().to_string().white().bold(),
        report.dataset.memory_usage()
    );
    println!();

    println!("{}", "Columns:".yellow().bold());
    for column in report.dataset.columns() {
        let kind = match column.column_type {
            ColumnType::Numeric => column.column_type.as_str().blue(),
            ColumnType::Categorical => column.column_type.as_str().magenta(),
            ColumnType::Datetime => column.column_type.as_str().green(),
            ColumnType::Text => column.column_type.as_str().normal(),
        };
        println!(
            "  {:20} {:12} {:>6} missing {:>6} unique",
            column.name, kind, column.missing_count, column.unique_count
        );

        if verbose && column.is_numeric() {
            if let Some(stats) = report.dataset.column_stats(&column.name)? {
                println!(
                    "  {:20} mean {:.2}  median {:.2}  std {:.2}  range [{}, {}]",
                    "", stats.mean, stats.median, stats.std, stats.min, stats.max
                );
            }
        }
    }
    println!();

    let quality = &report.profile.quality;
    println!(
        "Completeness {:.1}%  duplicates {}  missing {}  outliers {}  text issues {}",
        report.profile.overview.completeness,
        quality.duplicates.to_string().yellow(),
        quality.missing_values.to_string().yellow(),
        quality.outliers.to_string().yellow(),
        quality.text_issues.to_string().yellow()
    );
    println!();

    if report.insights.is_empty() {
        println!("{}", "No notable insights.".green());
    } else {
        println!("{}", "Insights:".yellow().bold());
        for insight in &report.insights {
            println!(
                "  [{:>5.1}] {} - {}",
                insight.confidence,
                insight.title.white().bold(),
                insight.description
            );
        }
    }

    if !report.recommended_charts.is_empty() {
        println!();
        println!("{}", "Recommended charts:".yellow().bold());
        for chart in &report.recommended_charts {
            println!("  {:8} {}", chart.chart_type.to_string().cyan(), chart.title);
        }
    }

    Ok(())
}
