//! Profile command - data quality overview.

use std::path::PathBuf;

use colored::Colorize;

use super::load_dataset;

pub fn run(file: PathBuf, json: bool, _verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = load_dataset(&file)?;
    let profile = tabula::profile(&dataset);

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Quality profile for".cyan().bold(),
        dataset.name().white()
    );
    println!();

    let overview = &profile.overview;
    println!(
        "Rows: {}  Columns: {}  Memory: ~{} bytes",
        overview.total_rows.to_string().white().bold(),
        overview.total_columns.to_string().white().bold(),
        overview.memory_usage
    );

    let completeness = format!("{:.1}%", overview.completeness);
    let completeness = if overview.completeness >= 95.0 {
        completeness.green()
    } else if overview.completeness >= 80.0 {
        completeness.yellow()
    } else {
        completeness.red()
    };
    println!("Completeness: {}", completeness);
    println!();

    let quality = &profile.quality;
    println!("{}", "Issues:".yellow().bold());
    println!("  Duplicate rows:     {}", quality.duplicates);
    println!("  Missing values:     {}", quality.missing_values);
    println!("  Outliers:           {}", quality.outliers);
    println!("  Inconsistent types: {}", quality.inconsistent_types);
    println!("  Text issues:        {}", quality.text_issues);
    println!();

    println!("{}", "Columns:".yellow().bold());
    for column in &profile.columns {
        println!(
            "  {:20} {:12} {:>6.1}% complete  {:>6} unique",
            column.name,
            column.column_type.as_str(),
            column.completeness,
            column.unique_count
        );
    }

    Ok(())
}
