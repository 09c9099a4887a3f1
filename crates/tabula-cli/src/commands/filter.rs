//! Filter command - search, filter and sort rows.

use std::path::PathBuf;

use tabula::{FilterRule, FilterSortEngine, SortDirection};

use super::load_dataset;
use crate::cli::OutputFormat;
use crate::export;

pub fn run(
    file: PathBuf,
    search: Option<String>,
    filters: Vec<String>,
    sort: Option<String>,
    desc: bool,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = load_dataset(&file)?;
    let mut engine = FilterSortEngine::new(&dataset);

    if let Some(term) = search {
        engine.set_search_term(&term);
    }

    for raw in &filters {
        let rule: FilterRule = raw.parse()?;
        engine.add_filter_rule(rule)?;
    }

    if let Some(column) = sort {
        let direction = if desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        engine.set_sort(&column, direction)?;
    }

    let rows = engine.filtered_rows();
    log::info!("{} of {} rows matched", rows.len(), dataset.total_rows());

    println!("{}", export::render(&rows, format)?);
    Ok(())
}
