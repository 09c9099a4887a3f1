//! Integration tests for Tabula.

use std::io::Write;
use tempfile::NamedTempFile;

use tabula::insight::InsightType;
use tabula::{
    ChartConfig, ChartData, ChartDataGenerator, ChartType, CleaningOperation, ColumnType, Dataset,
    FilterOperator, FilterRule, FilterSortEngine, InsightEngine, MissingValueStrategy, Row,
    SortDirection, Tabula, TabulaConfig, TabulaError, Value, analyze, profile, row,
};

/// Helper to create a temporary file with given content and extension.
fn create_test_file(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

/// The eight-person sample used across these tests.
fn people() -> Dataset {
    let records = [
        ("John", 25, "NYC", 50000, "Engineering"),
        ("Jane", 30, "LA", 60000, "Marketing"),
        ("Bob", 35, "Chicago", 70000, "Engineering"),
        ("Alice", 28, "NYC", 55000, "Design"),
        ("Charlie", 32, "LA", 65000, "Marketing"),
        ("Diana", 29, "Chicago", 58000, "Engineering"),
        ("Eve", 26, "NYC", 52000, "Design"),
        ("Frank", 31, "LA", 62000, "Marketing"),
    ];
    let rows: Vec<Row> = records
        .iter()
        .map(|&(name, age, city, salary, department)| {
            row([
                ("name", Value::from(name)),
                ("age", Value::from(age)),
                ("city", Value::from(city)),
                ("salary", Value::from(salary)),
                ("department", Value::from(department)),
            ])
        })
        .collect();
    analyze(rows, "people")
}

fn names(rows: &[&Row]) -> Vec<String> {
    rows.iter()
        .map(|r| Dataset::cell(r, "name").to_display_string())
        .collect()
}

// =============================================================================
// Analysis
// =============================================================================

#[test]
fn test_analyze_people() {
    let dataset = people();

    assert_eq!(dataset.total_rows(), 8);
    assert_eq!(
        dataset.column_names(),
        vec!["name", "age", "city", "salary", "department"]
    );
    assert_eq!(dataset.column("age").unwrap().column_type, ColumnType::Numeric);
    assert_eq!(dataset.column("salary").unwrap().column_type, ColumnType::Numeric);
    assert_eq!(dataset.column("city").unwrap().unique_count, 3);
    assert!(dataset.memory_usage() > 0);

    let stats = dataset.column_stats("age").unwrap().unwrap();
    assert_eq!(stats.count, 8);
    assert_eq!(stats.min, 25.0);
    assert_eq!(stats.max, 35.0);
    assert!((stats.mean - 29.5).abs() < 1e-9);

    assert!(dataset.column_stats("city").unwrap().is_none());
    assert!(matches!(
        dataset.column_stats("height"),
        Err(TabulaError::NotFound(_))
    ));
}

#[test]
fn test_profile_people() {
    let profile = profile(&people());

    assert_eq!(profile.overview.total_rows, 8);
    assert_eq!(profile.overview.total_columns, 5);
    assert_eq!(profile.overview.completeness, 100.0);
    assert_eq!(profile.quality.duplicates, 0);
    assert_eq!(profile.quality.missing_values, 0);
    assert_eq!(profile.quality.text_issues, 0);
    assert_eq!(profile.columns.len(), 5);
}

// =============================================================================
// Filtering and sorting
// =============================================================================

#[test]
fn test_search_is_case_insensitive() {
    let dataset = people();
    let mut engine = FilterSortEngine::new(&dataset);

    engine.set_search_term("NYC");
    assert_eq!(engine.total_filtered_rows(), 3);

    engine.set_search_term("nyc");
    assert_eq!(names(&engine.filtered_rows()), vec!["John", "Alice", "Eve"]);
}

#[test]
fn test_search_and_filter_intersect() {
    let dataset = people();
    let mut engine = FilterSortEngine::new(&dataset);

    engine.set_search_term("NYC");
    engine
        .add_filter_rule(FilterRule::new("age", FilterOperator::Greater, "28"))
        .unwrap();
    assert_eq!(engine.total_filtered_rows(), 0);

    engine.remove_filter_rule(0);
    assert_eq!(engine.total_filtered_rows(), 3);
}

#[test]
fn test_filter_then_sort() {
    let dataset = people();
    let mut engine = FilterSortEngine::new(&dataset);

    engine
        .add_filter_rule(FilterRule::new(
            "department",
            FilterOperator::Equals,
            "Engineering",
        ))
        .unwrap();
    engine.set_sort("salary", SortDirection::Desc).unwrap();

    assert_eq!(names(&engine.filtered_rows()), vec!["Bob", "Diana", "John"]);

    engine.clear_all();
    assert_eq!(engine.total_filtered_rows(), 8);
}

#[test]
fn test_filter_unknown_column() {
    let dataset = people();
    let mut engine = FilterSortEngine::new(&dataset);

    let err = engine
        .add_filter_rule(FilterRule::new("height", FilterOperator::Greater, "1"))
        .unwrap_err();
    assert!(matches!(err, TabulaError::NotFound(_)));
    assert!(engine.filter_rules().is_empty());
}

#[test]
fn test_filter_rules_from_cli_syntax() {
    let dataset = people();
    let mut engine = FilterSortEngine::new(&dataset);

    let rule: FilterRule = "city:not_equals:LA".parse().unwrap();
    engine.add_filter_rule(rule).unwrap();
    let rule: FilterRule = "name:contains:e".parse().unwrap();
    engine.add_filter_rule(rule).unwrap();

    let rows = engine.filtered_rows();
    assert_eq!(names(&rows), vec!["Alice", "Eve"]);
}

// =============================================================================
// Charts
// =============================================================================

#[test]
fn test_pie_chart_counts() {
    let dataset = people();
    let slices = ChartDataGenerator::new(&dataset).pie_data("city").unwrap();

    assert_eq!(slices.len(), 3);
    assert_eq!(slices.iter().map(|s| s.value).sum::<usize>(), 8);
    assert_eq!(slices[0].name, "NYC");
    assert_eq!(slices[2].name, "Chicago");
}

#[test]
fn test_chart_data_validation() {
    let dataset = people();
    let generator = ChartDataGenerator::new(&dataset);

    let bar = ChartConfig::new(ChartType::Bar, "department", Some("salary".to_string()));
    let data = generator.chart_data(&bar, 100).unwrap();
    assert!(matches!(data, ChartData::Points(ref p) if p.len() == 8));

    let limited = generator.chart_data(&bar, 3).unwrap();
    assert_eq!(limited.len(), 3);

    let missing_y = ChartConfig::new(ChartType::Line, "age", None);
    assert!(matches!(
        generator.chart_data(&missing_y, 100),
        Err(TabulaError::InvalidArgument(_))
    ));

    let text_y = ChartConfig::new(ChartType::Bar, "age", Some("city".to_string()));
    assert!(matches!(
        generator.chart_data(&text_y, 100),
        Err(TabulaError::InvalidArgument(_))
    ));
}

#[test]
fn test_recommended_charts_capped() {
    let dataset = people();
    let recommendations = ChartDataGenerator::new(&dataset).recommended_charts();

    assert_eq!(recommendations.len(), 5);
    assert_eq!(recommendations[0].chart_type, ChartType::Bar);
    assert_eq!(recommendations[0].x_column, "name");
    assert_eq!(recommendations[0].y_column.as_deref(), Some("age"));
    assert_eq!(recommendations[4].chart_type, ChartType::Scatter);
    assert_eq!(recommendations[4].title, "age vs salary");
}

// =============================================================================
// Insights and models
// =============================================================================

#[test]
fn test_correlation_insight_needs_ten_pairs() {
    let dataset = people();
    assert!(InsightEngine::new(&dataset).correlation_insights().is_empty());

    let rows: Vec<Row> = (0..12)
        .map(|i| {
            row([
                ("x", Value::from(i)),
                ("y", Value::from(3 * i + 1)),
            ])
        })
        .collect();
    let dataset = analyze(rows, "linear");
    let insights = InsightEngine::new(&dataset).correlation_insights();
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].insight_type(), InsightType::Correlation);
    assert_eq!(insights[0].columns, vec!["x", "y"]);
}

#[test]
fn test_insights_sorted_by_confidence() {
    let rows: Vec<Row> = (0..30)
        .map(|i| {
            let reading = if i == 29 { 500 } else { i % 5 };
            row([
                ("reading", Value::from(reading)),
                ("level", Value::from(if i < 20 { "low" } else { "high" })),
            ])
        })
        .collect();
    let dataset = analyze(rows, "sensors");
    let insights = InsightEngine::new(&dataset).generate_insights();

    assert!(!insights.is_empty());
    assert!(insights.len() <= 10);
    assert!(
        insights
            .windows(2)
            .all(|w| w[0].confidence >= w[1].confidence)
    );
    assert!(
        insights
            .iter()
            .any(|i| i.insight_type() == InsightType::Anomaly)
    );
}

#[test]
fn test_prediction_model_and_importance() {
    let rows: Vec<Row> = (0..20)
        .map(|i| {
            row([
                ("x", Value::from(i)),
                ("noise", Value::from((i * 7) % 5)),
                ("y", Value::from(2 * i + 5)),
            ])
        })
        .collect();
    let dataset = analyze(rows, "fit");
    let engine = InsightEngine::new(&dataset);

    let model = engine
        .create_prediction_model("y", &["x".to_string(), "noise".to_string()])
        .unwrap();
    assert!((model.coefficients.slope - 2.0).abs() < 1e-9);
    assert!((model.coefficients.intercept - 5.0).abs() < 1e-9);
    assert!((model.r_squared - 1.0).abs() < 1e-9);
    assert_eq!(model.ignored_features, vec!["noise"]);
    assert_eq!(model.predictions.len(), 20);

    let ranking = engine.calculate_feature_importance("y");
    assert_eq!(ranking.len(), 2);
    assert_eq!(ranking[0].feature, "x");
    assert!((ranking[0].importance - 1.0).abs() < 1e-9);
}

#[test]
fn test_prediction_model_too_few_rows() {
    let dataset = people();
    let model =
        InsightEngine::new(&dataset).create_prediction_model("salary", &["age".to_string()]);
    assert!(model.is_none());
}

#[test]
fn test_drift_between_datasets() {
    let reference: Vec<Row> = (0..10)
        .map(|i| row([("score", Value::from(100 + i % 2))]))
        .collect();
    let current: Vec<Row> = (0..10)
        .map(|i| row([("score", Value::from(150 + i % 2))]))
        .collect();
    let reference = analyze(reference, "reference");
    let current = analyze(current, "current");

    let records = InsightEngine::new(&current).detect_data_drift(&reference, 0.1);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].column, "score");
    assert!(records[0].significant);
    assert!((records[0].drift_score - 0.5).abs() < 1e-2);

    let same = InsightEngine::new(&reference).detect_data_drift(&reference, 0.1);
    assert!(same.is_empty());
}

// =============================================================================
// Cleaning
// =============================================================================

#[test]
fn test_cleaning_pipeline() {
    let rows = vec![
        row([("city", Value::from("  New   York ")), ("temp", Value::from(20))]),
        row([("city", Value::from("  New   York ")), ("temp", Value::from(20))]),
        row([("city", Value::from("Boston")), ("temp", Value::Null)]),
        row([("city", Value::from("Austin")), ("temp", Value::from(24))]),
    ];
    let dataset = analyze(rows, "weather");

    let dedupe = CleaningOperation::RemoveDuplicates;
    let result = dedupe.apply(dataset.rows());
    assert_eq!(result.rows_removed(), 1);

    let dataset = analyze(result.rows, "weather");
    let fill = CleaningOperation::HandleMissing {
        column: "temp".to_string(),
        strategy: MissingValueStrategy::Mean,
    };
    fill.validate(&dataset).unwrap();
    let result = fill.apply(dataset.rows());
    assert_eq!(result.rows_after, 3);
    assert_eq!(result.cells_changed, 1);
    assert_eq!(result.rows[1]["temp"], Value::Number(22.0));

    let standardize = CleaningOperation::StandardizeText {
        column: "city".to_string(),
    };
    let result = standardize.apply(&result.rows);
    assert_eq!(result.rows[0]["city"], Value::from("new york"));
}

#[test]
fn test_cleaning_unknown_column() {
    let dataset = people();
    let op = CleaningOperation::RemoveOutliers {
        column: "height".to_string(),
    };
    assert!(matches!(op.validate(&dataset), Err(TabulaError::NotFound(_))));
}

// =============================================================================
// Files
// =============================================================================

#[test]
fn test_analyze_csv_file() {
    let content = "name,age,city\n\
                   John,25,NYC\n\
                   Jane,30,LA\n\
                   Bob,35,Chicago\n";
    let file = create_test_file(content, ".csv");

    let report = Tabula::new().analyze_file(file.path()).expect("Analysis failed");

    let source = report.source.as_ref().unwrap();
    assert_eq!(source.format, "csv");
    assert_eq!(source.row_count, 3);
    assert_eq!(source.column_count, 3);
    assert!(source.hash.starts_with("sha256:"));

    assert_eq!(report.dataset.total_rows(), 3);
    assert_eq!(report.dataset.name(), source.file);
    assert_eq!(
        report.dataset.column("age").unwrap().column_type,
        ColumnType::Numeric
    );
    assert_eq!(report.dataset.rows()[0]["age"], Value::from("25"));
}

#[test]
fn test_analyze_tsv_auto_detect() {
    let content = "sample\tvalue\nA\t1\nB\t2\n";
    let file = create_test_file(content, ".tsv");

    let (rows, source) = Tabula::new().load_file(file.path()).unwrap();
    assert_eq!(source.format, "tsv");
    assert_eq!(rows.len(), 2);
}

#[test]
fn test_analyze_json_file() {
    let content = r#"[
        {"product": "widget", "price": 9.5, "in_stock": true},
        {"product": "gadget", "price": 12, "in_stock": false},
        {"product": "gizmo", "price": null, "in_stock": true}
    ]"#;
    let file = create_test_file(content, ".json");

    let report = Tabula::new().analyze_file(file.path()).unwrap();
    let source = report.source.as_ref().unwrap();
    assert_eq!(source.format, "json");

    let price = report.dataset.column("price").unwrap();
    assert_eq!(price.column_type, ColumnType::Numeric);
    assert_eq!(price.missing_count, 1);
    assert!(!report.dataset.column("in_stock").unwrap().is_numeric());
}

#[test]
fn test_max_rows_config() {
    let content = "n\n1\n2\n3\n4\n5\n";
    let file = create_test_file(content, ".csv");

    let tabula = Tabula::with_config(TabulaConfig {
        max_rows: Some(2),
        ..TabulaConfig::default()
    });
    let report = tabula.analyze_file(file.path()).unwrap();
    assert_eq!(report.dataset.total_rows(), 2);
}

#[test]
fn test_empty_and_missing_files() {
    let file = create_test_file("", ".csv");
    assert!(Tabula::new().analyze_file(file.path()).is_err());

    let file = create_test_file("[]", ".json");
    assert!(matches!(
        Tabula::new().analyze_file(file.path()),
        Err(TabulaError::EmptyData(_))
    ));

    assert!(matches!(
        Tabula::new().analyze_file("/nonexistent/data.csv"),
        Err(TabulaError::Io { .. })
    ));
}

#[test]
fn test_report_serializes_camel_case() {
    let report = Tabula::new().analyze_rows(people().rows().to_vec(), "people");
    let json = serde_json::to_value(&report).unwrap();

    assert!(json.get("source").is_none());
    assert_eq!(json["dataset"]["totalRows"], 8);
    assert_eq!(json["profile"]["overview"]["totalColumns"], 5);
    assert!(json["recommendedCharts"].is_array());
}
