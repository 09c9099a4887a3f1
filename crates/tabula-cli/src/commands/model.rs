//! Model command - single-feature linear regression.

use std::path::PathBuf;

use colored::Colorize;
use tabula::InsightEngine;

use super::load_dataset;

pub fn run(
    file: PathBuf,
    target: String,
    features: Vec<String>,
    json: bool,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = load_dataset(&file)?;
    dataset.require_column(&target)?;
    for feature in &features {
        dataset.require_column(feature)?;
    }

    let Some(model) = InsightEngine::new(&dataset).create_prediction_model(&target, &features)
    else {
        return Err(format!(
            "Could not fit a model for '{}': need at least 10 rows with numeric values in both columns and a non-constant feature",
            target
        )
        .into());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&model)?);
        return Ok(());
    }

    println!(
        "{} {} ~ {}",
        "Linear regression".cyan().bold(),
        model.target.white().bold(),
        model.features.join(", ")
    );
    if !model.ignored_features.is_empty() {
        println!(
            "{} only the first feature is used; ignored {}",
            "Note:".yellow(),
            model.ignored_features.join(", ")
        );
    }
    println!();
    println!("  slope      {:.6}", model.coefficients.slope);
    println!("  intercept  {:.6}", model.coefficients.intercept);
    println!("  r squared  {:.4}", model.r_squared);
    println!("  accuracy   {:.1}%", model.accuracy);

    Ok(())
}
