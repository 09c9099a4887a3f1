//! Clean command - apply a cleaning operation and print the rows.

use std::path::PathBuf;

use tabula::{CleaningOperation, MissingValueStrategy, Value};

use super::load_dataset;
use crate::cli::{CleanOp, OutputFormat};
use crate::export;

pub fn run(
    file: PathBuf,
    op: CleanOp,
    column: Option<String>,
    strategy: String,
    fill: Option<String>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = load_dataset(&file)?;

    let strategy = MissingValueStrategy::from_name(&strategy, fill.map(Value::from))?;
    let operation = CleaningOperation::from_name(&op.to_string(), column, strategy)?;
    operation.validate(&dataset)?;

    let result = operation.apply(dataset.rows());
    log::info!(
        "{}: {} rows removed, {} cells changed",
        result.description,
        result.rows_removed(),
        result.cells_changed
    );

    println!("{}", export::render(&result.rows, format)?);
    Ok(())
}
