//! Insights command - ranked statistical findings.

use std::path::PathBuf;

use colored::Colorize;
use tabula::InsightEngine;
use tabula::insight::InsightType;

use super::load_dataset;

pub fn run(
    file: PathBuf,
    limit: usize,
    json: bool,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = load_dataset(&file)?;
    let insights = InsightEngine::new(&dataset).generate_insights_with_limit(limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
        return Ok(());
    }

    if insights.is_empty() {
        println!("{}", "No notable insights.".green());
        return Ok(());
    }

    for insight in &insights {
        let tag = match insight.insight_type() {
            InsightType::Correlation => "correlation".blue(),
            InsightType::Distribution => "distribution".magenta(),
            InsightType::Anomaly => "anomaly".red(),
            InsightType::Pattern => "pattern".green(),
        };
        println!(
            "{:>5.1}  {:14} {}",
            insight.confidence,
            tag,
            insight.title.white().bold()
        );
        println!("       {}", insight.description);
    }

    Ok(())
}
