//! Full analysis performance benchmarks.
//!
//! Measures end-to-end analysis (parse, type inference, profile, insights)
//! and the individual statistics it is built on.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;
use tabula::inference::{basic_stats, correlation, detect_outliers};
use tabula::{InsightEngine, Parser, Tabula, analyze, profile};
use tempfile::NamedTempFile;

/// Generate a sales-like CSV with numeric, categorical, date and text columns.
fn generate_sales_data(rows: usize) -> String {
    let mut rng = StdRng::seed_from_u64(42);
    let regions = ["north", "south", "east", "west"];
    let products = ["widget", "gadget", "gizmo"];

    let mut data = String::from("order_id,region,product,order_date,quantity,unit_price,revenue,note\n");
    for row in 0..rows {
        let quantity: u32 = rng.gen_range(1..50);
        // Occasional extreme price so outlier detection has work to do.
        let unit_price: f64 = if row % 97 == 0 {
            rng.gen_range(900.0..1000.0)
        } else {
            rng.gen_range(5.0..25.0)
        };
        let note = if row % 11 == 0 { "" } else { "ok" };
        data.push_str(&format!(
            "{},{},{},2024-{:02}-{:02},{},{:.2},{:.2},{}\n",
            row + 1,
            regions[row % regions.len()],
            products[rng.gen_range(0..products.len())],
            (row % 12) + 1,
            (row % 28) + 1,
            quantity,
            unit_price,
            quantity as f64 * unit_price,
            note
        ));
    }
    data
}

fn write_temp(data: &str) -> NamedTempFile {
    let mut temp = NamedTempFile::with_suffix(".csv").unwrap();
    temp.write_all(data.as_bytes()).unwrap();
    temp
}

fn bench_full_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_analysis");

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_sales_data(*rows);
        let temp = write_temp(&data);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("sales_rows", rows), &temp, |b, temp| {
            b.iter(|| black_box(Tabula::new().analyze_file(temp.path()).unwrap()))
        });
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    let data = generate_sales_data(10_000);
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("csv_10k_rows", |b| {
        b.iter(|| black_box(Parser::new().parse_delimited(data.as_bytes(), b',').unwrap()))
    });

    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis_stages");

    let data = generate_sales_data(10_000);
    let rows = Parser::new().parse_delimited(data.as_bytes(), b',').unwrap();
    let dataset = analyze(rows.clone(), "sales");

    group.bench_function("analyze_10k_rows", |b| {
        b.iter_with_setup(|| rows.clone(), |rows| black_box(analyze(rows, "sales")))
    });
    group.bench_function("profile_10k_rows", |b| {
        b.iter(|| black_box(profile(&dataset)))
    });
    group.bench_function("insights_10k_rows", |b| {
        b.iter(|| black_box(InsightEngine::new(&dataset).generate_insights()))
    });

    group.finish();
}

fn bench_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistics");
    let mut rng = StdRng::seed_from_u64(7);

    for n in [1_000, 100_000].iter() {
        let x: Vec<f64> = (0..*n).map(|_| rng.gen_range(0.0..100.0)).collect();
        let y: Vec<f64> = x.iter().map(|v| v * 1.5 + rng.gen_range(-5.0..5.0)).collect();

        group.throughput(Throughput::Elements(*n as u64));
        group.bench_with_input(BenchmarkId::new("basic_stats", n), &x, |b, x| {
            b.iter(|| black_box(basic_stats(x)))
        });
        group.bench_with_input(BenchmarkId::new("detect_outliers", n), &x, |b, x| {
            b.iter(|| black_box(detect_outliers(x)))
        });
        group.bench_with_input(BenchmarkId::new("correlation", n), &(x, y), |b, (x, y)| {
            b.iter(|| black_box(correlation(x, y)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_full_analysis,
    bench_parse,
    bench_stages,
    bench_statistics,
);
criterion_main!(benches);
