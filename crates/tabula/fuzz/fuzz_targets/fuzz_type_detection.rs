//! Fuzz target for column type detection and statistics.
//!
//! Date and number detection run regexes and parsers over arbitrary text;
//! none of it may panic, and the statistics built on top must stay finite.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tabula::inference::{detect_column_type, looks_like_date};
use tabula::{InsightEngine, Value, analyze, profile, row};

fuzz_target!(|values: Vec<String>| {
    if values.len() > 1_000 {
        return;
    }

    for v in &values {
        let _ = looks_like_date(v);
    }

    let cells: Vec<Value> = values.iter().map(|v| Value::from(v.as_str())).collect();
    let _ = detect_column_type(&cells);

    let rows = values
        .iter()
        .enumerate()
        .map(|(i, v)| row([("value", Value::from(v.as_str())), ("index", Value::from(i as i64))]))
        .collect();
    let dataset = analyze(rows, "fuzz");
    let _ = profile(&dataset);

    for insight in InsightEngine::new(&dataset).generate_insights() {
        assert!(insight.confidence.is_finite());
    }
});
