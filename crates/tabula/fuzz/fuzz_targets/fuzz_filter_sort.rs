//! Fuzz target for the filter/sort pipeline.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tabula::{FilterRule, FilterSortEngine, SortDirection, Value, analyze, row};

#[derive(Debug, Arbitrary)]
struct Input {
    cells: Vec<(Option<String>, Option<f64>)>,
    search: String,
    rules: Vec<String>,
    sort_desc: bool,
}

fuzz_target!(|input: Input| {
    if input.cells.len() > 500 {
        return;
    }

    let rows = input
        .cells
        .into_iter()
        .map(|(text, number)| {
            row([
                ("text", text.map(Value::from).unwrap_or(Value::Null)),
                ("number", number.map(Value::from).unwrap_or(Value::Null)),
            ])
        })
        .collect();
    let dataset = analyze(rows, "fuzz");
    let mut engine = FilterSortEngine::new(&dataset);

    engine.set_search_term(&input.search);
    for rule in &input.rules {
        if let Ok(rule) = rule.parse::<FilterRule>() {
            let _ = engine.add_filter_rule(rule);
        }
    }
    let direction = if input.sort_desc {
        SortDirection::Desc
    } else {
        SortDirection::Asc
    };
    let _ = engine.set_sort("number", direction);

    let total = engine.total_filtered_rows();
    assert!(total <= dataset.total_rows());
    assert_eq!(engine.filtered_rows().len(), total);
});
