//! Importance command - feature ranking by correlation with a target.

use std::path::PathBuf;

use colored::Colorize;
use tabula::InsightEngine;

use super::load_dataset;

pub fn run(
    file: PathBuf,
    target: String,
    json: bool,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = load_dataset(&file)?;
    dataset.require_column(&target)?;

    let ranking = InsightEngine::new(&dataset).calculate_feature_importance(&target);

    if json {
        println!("{}", serde_json::to_string_pretty(&ranking)?);
        return Ok(());
    }

    if ranking.is_empty() {
        println!(
            "{} '{}' is not numeric or no other numeric column overlaps it",
            "Nothing to rank:".yellow(),
            target
        );
        return Ok(());
    }

    println!(
        "{} {}",
        "Feature importance for".cyan().bold(),
        target.white().bold()
    );
    let bar_width = 30;
    for item in &ranking {
        let filled = (item.importance * bar_width as f64).round() as usize;
        let bar: String = "█".repeat(filled) + &"░".repeat(bar_width - filled);
        println!("  {:20} {} {:.3}", item.feature, bar.cyan(), item.importance);
    }

    Ok(())
}
