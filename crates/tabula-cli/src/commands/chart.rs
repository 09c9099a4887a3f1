//! Chart command - chart-ready data for one configuration.

use std::path::PathBuf;

use tabula::{ChartConfig, ChartData, ChartDataGenerator, ChartType};

use super::load_dataset;
use crate::cli::OutputFormat;
use crate::export;

pub fn run(
    file: PathBuf,
    chart_type: String,
    x: String,
    y: Option<String>,
    limit: usize,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let chart_type: ChartType = chart_type.parse()?;
    let dataset = load_dataset(&file)?;

    let config = ChartConfig::new(chart_type, x, y);
    let data = ChartDataGenerator::new(&dataset).chart_data(&config, limit)?;
    log::info!("{} chart with {} entries", chart_type, data.len());

    let output = match &data {
        ChartData::Points(points) => export::render(points, format)?,
        ChartData::Slices(slices) => export::render(slices, format)?,
    };
    println!("{}", output);
    Ok(())
}
