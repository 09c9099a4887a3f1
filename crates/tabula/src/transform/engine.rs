//! Search, filter and sort pipeline over a dataset.

use std::cmp::Ordering;

use crate::error::{Result, TabulaError};
use crate::input::{Row, Value, parse_number};
use crate::schema::{Dataset, FilterOperator, FilterRule, SortDirection};

/// Stateful, single-owner view that narrows and orders a dataset's rows.
///
/// The pipeline always runs in the same order: global search, then every
/// active filter rule in insertion order, then one stable sort. The result
/// is computed lazily on first read and reused until a setter marks it
/// dirty. One engine per caller; it is not meant to be shared.
#[derive(Debug)]
pub struct FilterSortEngine<'a> {
    dataset: &'a Dataset,
    search_term: String,
    rules: Vec<FilterRule>,
    sort: Option<(String, SortDirection)>,
    dirty: bool,
    cached: Vec<usize>,
    computations: usize,
}

impl<'a> FilterSortEngine<'a> {
    /// Create an engine with no search, filters or sort.
    pub fn new(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            search_term: String::new(),
            rules: Vec::new(),
            sort: None,
            dirty: true,
            cached: Vec::new(),
            computations: 0,
        }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn filter_rules(&self) -> &[FilterRule] {
        &self.rules
    }

    pub fn sort(&self) -> Option<(&str, SortDirection)> {
        self.sort.as_ref().map(|(c, d)| (c.as_str(), *d))
    }

    /// Number of times the pipeline actually ran.
    pub fn computations(&self) -> usize {
        self.computations
    }

    /// Set the case-insensitive global search term (empty disables search).
    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_lowercase();
        self.dirty = true;
    }

    /// Append a filter rule.
    ///
    /// Rules naming a column the dataset does not have are rejected. Rules
    /// with an empty column or value are stored but never applied.
    pub fn add_filter_rule(&mut self, rule: FilterRule) -> Result<()> {
        self.check_column(&rule.column)?;
        self.rules.push(rule);
        self.dirty = true;
        Ok(())
    }

    /// Remove the rule at `index`, returning it. Out-of-range is a no-op.
    pub fn remove_filter_rule(&mut self, index: usize) -> Option<FilterRule> {
        if index >= self.rules.len() {
            return None;
        }
        self.dirty = true;
        Some(self.rules.remove(index))
    }

    /// Replace the rule at `index`.
    pub fn update_filter_rule(&mut self, index: usize, rule: FilterRule) -> Result<()> {
        if index >= self.rules.len() {
            return Err(TabulaError::InvalidArgument(format!(
                "filter rule index {} out of range ({} rules)",
                index,
                self.rules.len()
            )));
        }
        self.check_column(&rule.column)?;
        self.rules[index] = rule;
        self.dirty = true;
        Ok(())
    }

    /// Sort by `column`; an empty column name clears the sort.
    pub fn set_sort(&mut self, column: &str, direction: SortDirection) -> Result<()> {
        self.check_column(column)?;
        self.sort = if column.is_empty() {
            None
        } else {
            Some((column.to_string(), direction))
        };
        self.dirty = true;
        Ok(())
    }

    /// Reset search, filters and sort.
    pub fn clear_all(&mut self) {
        self.search_term.clear();
        self.rules.clear();
        self.sort = None;
        self.dirty = true;
    }

    /// Indices into the dataset rows, in result order.
    pub fn filtered_indices(&mut self) -> &[usize] {
        if self.dirty {
            self.cached = self.compute();
            self.dirty = false;
            self.computations += 1;
            log::debug!(
                "filter pipeline recomputed: {} of {} rows",
                self.cached.len(),
                self.dataset.total_rows()
            );
        }
        &self.cached
    }

    /// The current result rows.
    pub fn filtered_rows(&mut self) -> Vec<&'a Row> {
        let rows = self.dataset.rows();
        self.filtered_indices().iter().map(|&i| &rows[i]).collect()
    }

    pub fn total_filtered_rows(&mut self) -> usize {
        self.filtered_indices().len()
    }

    fn check_column(&self, column: &str) -> Result<()> {
        if column.is_empty() || self.dataset.has_column(column) {
            Ok(())
        } else {
            Err(TabulaError::column_not_found(column))
        }
    }

    fn compute(&self) -> Vec<usize> {
        let rows = self.dataset.rows();
        let mut indices: Vec<usize> = (0..rows.len()).collect();

        if !self.search_term.is_empty() {
            indices.retain(|&i| row_matches_search(&rows[i], &self.search_term));
        }

        for rule in self.rules.iter().filter(|r| r.is_active()) {
            indices.retain(|&i| rule_matches(rule, Dataset::cell(&rows[i], &rule.column)));
        }

        if let Some((column, direction)) = &self.sort {
            indices = sort_indices(rows, indices, column, *direction);
        }

        indices
    }
}

/// Case-insensitive substring match against any non-null field.
fn row_matches_search(row: &Row, term: &str) -> bool {
    row.values()
        .filter(|v| !v.is_null())
        .any(|v| v.to_display_string().to_lowercase().contains(term))
}

/// Evaluate one rule against a cell; numeric comparisons fail closed.
fn rule_matches(rule: &FilterRule, cell: &Value) -> bool {
    let cell = cell.to_display_string().to_lowercase();
    let wanted = rule.value.to_lowercase();

    match rule.operator {
        FilterOperator::Equals => cell == wanted,
        FilterOperator::NotEquals => cell != wanted,
        FilterOperator::Contains => cell.contains(&wanted),
        FilterOperator::Greater => compare_numbers(&cell, &wanted) == Some(Ordering::Greater),
        FilterOperator::Less => compare_numbers(&cell, &wanted) == Some(Ordering::Less),
    }
}

fn compare_numbers(cell: &str, wanted: &str) -> Option<Ordering> {
    let a = parse_number(cell)?;
    let b = parse_number(wanted)?;
    a.partial_cmp(&b)
}

/// Sort key: numbers order before text; text compares lowercased.
#[derive(Debug, PartialEq)]
enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    fn of(value: &Value) -> Option<Self> {
        if value.is_null() {
            return None;
        }
        Some(match value.as_number() {
            Some(n) => SortKey::Number(n),
            None => SortKey::Text(value.to_display_string().to_lowercase()),
        })
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            // Keys are finite, so -0 and 0 tie.
            (SortKey::Number(a), SortKey::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        }
    }
}

/// Stable sort; rows with a null (or absent) sort cell go last in either
/// direction, keeping their prior order.
fn sort_indices(
    rows: &[Row],
    indices: Vec<usize>,
    column: &str,
    direction: SortDirection,
) -> Vec<usize> {
    let mut keyed = Vec::with_capacity(indices.len());
    let mut nulls = Vec::new();

    for i in indices {
        match SortKey::of(Dataset::cell(&rows[i], column)) {
            Some(key) => keyed.push((key, i)),
            None => nulls.push(i),
        }
    }

    keyed.sort_by(|(a, _), (b, _)| match direction {
        SortDirection::Asc => a.compare(b),
        SortDirection::Desc => b.compare(a),
    });

    keyed.into_iter().map(|(_, i)| i).chain(nulls).collect()
}
