//! The analyzed dataset.

use serde::Serialize;

use super::column::{Column, ColumnStats};
use crate::error::{Result, TabulaError};
use crate::inference::basic_stats;
use crate::input::{Row, Value};

/// Rows plus the column metadata derived from them.
///
/// Built once by [`crate::analyze`] and read-only afterwards; every
/// downstream view borrows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    name: String,
    rows: Vec<Row>,
    columns: Vec<Column>,
    total_rows: usize,
    total_columns: usize,
    memory_usage: usize,
}

impl Dataset {
    pub(crate) fn from_parts(
        name: String,
        rows: Vec<Row>,
        columns: Vec<Column>,
        memory_usage: usize,
    ) -> Self {
        let total_rows = rows.len();
        let total_columns = columns.len();
        Self {
            name,
            rows,
            columns,
            total_rows,
            total_columns,
            memory_usage,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    pub fn total_columns(&self) -> usize {
        self.total_columns
    }

    /// Byte length of the rows serialized as compact JSON.
    pub fn memory_usage(&self) -> usize {
        self.memory_usage
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get a column by name, or a `NotFound` error.
    pub fn require_column(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| TabulaError::column_not_found(name))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Get all column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Cell lookup treating absent keys as null.
    pub fn cell<'a>(row: &'a Row, column: &str) -> &'a Value {
        static NULL: Value = Value::Null;
        row.get(column).unwrap_or(&NULL)
    }

    /// Descriptive statistics over the parseable values of a column.
    ///
    /// `Ok(None)` means the column exists but has no numeric values.
    pub fn column_stats(&self, name: &str) -> Result<Option<ColumnStats>> {
        let column = self.require_column(name)?;
        Ok(basic_stats(&column.numeric_values()))
    }

    /// Row-aligned pairs where both columns parse as numbers.
    pub fn numeric_pairs(&self, x: &str, y: &str) -> Vec<(f64, f64)> {
        self.rows
            .iter()
            .filter_map(|row| {
                let xv = Self::cell(row, x).as_number()?;
                let yv = Self::cell(row, y).as_number()?;
                Some((xv, yv))
            })
            .collect()
    }
}
