use chart_engine::indicators::{IndicatorConfig, IndicatorEngine};
use chart_engine::series::DailyCandle;
use chart_engine::viewport::ViewportTracker;
use chart_engine::volume_profile::build_profile;
use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn synthetic_series(len: usize) -> Vec<DailyCandle> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    (0..len)
        .map(|i| {
            let close = 100.0 + (i as f64) * 0.05 + ((i % 13) as f64) * 1.7;
            DailyCandle::new_from_values(
                start + Days::new(i as u64),
                close - 0.4,
                close + 2.0,
                close - 2.0,
                close,
                1_000.0 + ((i % 9) as f64) * 300.0,
            )
        })
        .collect()
}

fn bench_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicator_engine");
    let engine = IndicatorEngine::new(IndicatorConfig::default());

    for &len in &[252usize, 1_000, 5_000] {
        let series = synthetic_series(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("compute", len), &series, |b, series| {
            b.iter(|| engine.compute(black_box(series)))
        });
    }

    group.finish();
}

fn bench_profile_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("volume_profile");
    let engine = IndicatorEngine::new(IndicatorConfig {
        periods: vec![28],
        bucket_count: 50,
    });
    let enriched = engine.compute(&synthetic_series(5_000)).enriched;

    group.throughput(Throughput::Elements(enriched.len() as u64));
    group.bench_function("build_profile_5k_rows", |b| {
        b.iter(|| build_profile(black_box(&enriched), black_box(50)))
    });

    group.finish();
}

fn bench_viewport_ops(c: &mut Criterion) {
    c.bench_function("viewport_zoom_cycle", |b| {
        b.iter(|| {
            let mut tracker = ViewportTracker::new(black_box(5_000));
            for _ in 0..20 {
                tracker.zoom_in();
            }
            for _ in 0..20 {
                tracker.zoom_out();
            }
            tracker.reset();
            tracker
        })
    });
}

criterion_group!(benches, bench_compute, bench_profile_build, bench_viewport_ops);
criterion_main!(benches);
