//! Building a [`Dataset`] from raw rows.

use std::collections::HashSet;

use crate::inference::detect_column_type;
use crate::input::{Row, Value};
use crate::schema::{Column, Dataset};

/// Analyze raw rows into a dataset with typed column metadata.
///
/// The column set is the key set of the first row, in its order. Later rows
/// may lack some of those keys (read as null) or carry extra keys (ignored
/// for column metadata, kept in the rows). The same rows always produce the
/// same columns.
pub fn analyze(rows: Vec<Row>, name: impl Into<String>) -> Dataset {
    let name = name.into();

    let Some(first) = rows.first() else {
        return Dataset::from_parts(name, Vec::new(), Vec::new(), 0);
    };

    let column_names: Vec<String> = first.keys().cloned().collect();
    let columns: Vec<Column> = column_names
        .into_iter()
        .map(|col| build_column(col, &rows))
        .collect();

    let memory_usage = estimate_memory(&rows);

    log::debug!(
        "analyzed dataset '{}': {} rows, {} columns, ~{} bytes",
        name,
        rows.len(),
        columns.len(),
        memory_usage
    );

    Dataset::from_parts(name, rows, columns, memory_usage)
}

fn build_column(name: String, rows: &[Row]) -> Column {
    let values: Vec<Value> = rows
        .iter()
        .map(|row| Dataset::cell(row, &name).clone())
        .collect();

    let column_type = detect_column_type(&values);
    let missing_count = values.iter().filter(|v| v.is_missing()).count();
    let unique_count = values
        .iter()
        .filter(|v| !v.is_missing())
        .map(Value::distinct_key)
        .collect::<HashSet<_>>()
        .len();

    Column {
        name,
        column_type,
        values,
        missing_count,
        unique_count,
    }
}

/// Byte length of the rows as compact UTF-8 JSON.
fn estimate_memory(rows: &[Row]) -> usize {
    serde_json::to_vec(rows).map(|bytes| bytes.len()).unwrap_or(0)
}
