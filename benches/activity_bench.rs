//! Benchmarks for the activity log and action evaluation
//!
//! Run with: cargo bench

use efarm::readings::fallback_readings;
use efarm::rules::DEFAULT_RULES;
use efarm::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use tempfile::tempdir;

fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("append");

    group.bench_function("memory_full_log", |b| {
        let mut log = ActivityLogStore::new(MemoryStore::new());
        for i in 0..MAX_ENTRIES {
            log.append(&format!("Irrigate field #{}", i), "2025-09-18 08:00:00").unwrap();
        }

        b.iter(|| {
            log.append(black_box("Skip watering - Soil moisture is adequate"), "2025-09-18 12:00:00")
                .unwrap()
        });
    });

    group.bench_function("file_full_log", |b| {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path().join("state.json")).unwrap();
        let mut log = ActivityLogStore::new(store);
        for i in 0..MAX_ENTRIES {
            log.append(&format!("Irrigate field #{}", i), "2025-09-18 08:00:00").unwrap();
        }

        b.iter(|| {
            log.append(black_box("Pest inspection - Check leaves and stems"), "2025-09-18 16:00:00")
                .unwrap()
        });
    });

    group.finish();
}

fn bench_list_and_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("list");
    group.throughput(Throughput::Elements(MAX_ENTRIES as u64));

    let mut log = ActivityLogStore::new(MemoryStore::new());
    for i in 0..MAX_ENTRIES {
        log.append(&format!("Apply fertilizer #{}", i), "2025-09-18 08:00:00").unwrap();
    }

    group.bench_function("list_50", |b| b.iter(|| black_box(log.list())));

    let entries = log.list();
    group.bench_function("export_50", |b| {
        b.iter(|| export_json(black_box(&entries)).unwrap())
    });

    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let rules = DEFAULT_RULES;
    let readings = fallback_readings();

    c.bench_function("evaluate_default_rules", |b| {
        b.iter(|| {
            for reading in &readings {
                black_box(evaluate(&rules, black_box(reading)));
            }
        })
    });
}

criterion_group!(benches, bench_append, bench_list_and_export, bench_evaluate);
criterion_main!(benches);
