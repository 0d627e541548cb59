//! Benchmarks for render-plan computation.
//!
//! Run with: cargo bench --package heatmap-core --bench plan_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;

use heatmap_common::{ChartOptions, TemperatureDataset, VarianceRecord};
use heatmap_core::build_plan;

/// Generate a dataset shaped like the real one: every month of every year in
/// a range, with small noisy variances around a seasonal swing.
fn generate_dataset(first_year: i32, last_year: i32) -> TemperatureDataset {
    let mut rng = rand::thread_rng();
    let mut monthly_variance = Vec::new();

    for year in first_year..=last_year {
        for month in 1..=12u32 {
            let seasonal = ((month as f64 / 12.0) * std::f64::consts::TAU).sin() * 0.8;
            let noise = rng.gen_range(-1.5..1.5);
            monthly_variance.push(VarianceRecord {
                year,
                month,
                variance: seasonal + noise,
            });
        }
    }

    TemperatureDataset {
        base_temperature: 8.66,
        monthly_variance,
    }
}

fn bench_build_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_plan");
    let options = ChartOptions::default();

    // (1753, 2015) matches the real dataset's span: 263 years x 12 months.
    for (first, last) in [(1990, 2015), (1900, 2015), (1753, 2015)] {
        let dataset = generate_dataset(first, last);
        let cells = dataset.monthly_variance.len();

        group.throughput(Throughput::Elements(cells as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}years", last - first + 1)),
            &dataset,
            |b, dataset| {
                b.iter(|| build_plan(black_box(dataset), black_box(&options)).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_build_plan);
criterion_main!(benches);
