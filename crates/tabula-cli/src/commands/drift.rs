//! Drift command - compare a file against a reference file.

use std::path::PathBuf;

use colored::Colorize;
use tabula::InsightEngine;
use tabula::insight::DriftKind;

use super::load_dataset;

pub fn run(
    file: PathBuf,
    reference: PathBuf,
    threshold: f64,
    json: bool,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let current = load_dataset(&file)?;
    let reference = load_dataset(&reference)?;

    let records = InsightEngine::new(&current).detect_data_drift(&reference, threshold);

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!(
            "{} (threshold {})",
            "No drift detected".green().bold(),
            threshold
        );
        return Ok(());
    }

    println!(
        "{} {} columns drifted (threshold {})",
        "Drift:".red().bold(),
        records.len(),
        threshold
    );
    for record in &records {
        match &record.kind {
            DriftKind::NumericDrift {
                current_value,
                reference_value,
            } => println!(
                "  {:20} mean {:.3} -> {:.3}  score {:.3}",
                record.column, reference_value, current_value, record.drift_score
            ),
            DriftKind::CategoricalDrift => println!(
                "  {:20} distribution shift  score {:.3}",
                record.column, record.drift_score
            ),
        }
    }

    Ok(())
}
