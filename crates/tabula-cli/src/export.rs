//! Rendering records as JSON or CSV.

use std::collections::BTreeSet;
use std::error::Error;

use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;

/// Render serializable records in the requested format.
pub fn render<T: Serialize>(records: &[T], format: OutputFormat) -> Result<String, Box<dyn Error>> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Csv => to_csv(records),
    }
}

/// CSV with the sorted union of record keys as header. Missing keys and
/// nulls become empty cells; nested values are written as JSON.
fn to_csv<T: Serialize>(records: &[T]) -> Result<String, Box<dyn Error>> {
    if records.is_empty() {
        return Ok(String::new());
    }

    let values: Vec<Value> = records
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<_, _>>()?;

    let keys: BTreeSet<&str> = values
        .iter()
        .filter_map(Value::as_object)
        .flat_map(|obj| obj.keys().map(String::as_str))
        .collect();

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&keys)?;

    for value in &values {
        let record: Vec<String> = keys
            .iter()
            .map(|key| cell_text(value.get(*key)))
            .collect();
        writer.write_record(&record)?;
    }

    let bytes = writer.into_inner().map_err(|e| e.to_string())?;
    let mut text = String::from_utf8(bytes)?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}
