use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use quality_gate::config::{DuplicateKey, FieldSelection, GateConfig};
use quality_gate::core::QualityGate;
use quality_gate::test_fixtures::batch_with_counts;

fn benchmark_compute_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_stats");

    let full_record = QualityGate::new();
    let keyed = QualityGate::with_config(
        GateConfig::new()
            .with_null_fields(FieldSelection::fields(["id", "email"]))
            .with_duplicate_key(DuplicateKey::fields(["id"])),
    )
    .unwrap();

    for n in [1_000u64, 10_000, 100_000].iter() {
        let batch = batch_with_counts(*n, n / 50, n / 50);
        group.throughput(Throughput::Elements(*n));

        group.bench_with_input(BenchmarkId::new("full_record", n), &batch, |b, batch| {
            b.iter(|| full_record.compute_stats(Some(std::hint::black_box(batch))).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("keyed", n), &batch, |b, batch| {
            b.iter(|| keyed.compute_stats(Some(std::hint::black_box(batch))).unwrap());
        });
    }

    group.finish();
}

fn benchmark_cleanse(c: &mut Criterion) {
    let mut group = c.benchmark_group("cleanse");
    let gate = QualityGate::new();

    for n in [1_000u64, 10_000].iter() {
        let batch = batch_with_counts(*n, n / 20, n / 20);
        group.throughput(Throughput::Elements(*n));
        group.bench_with_input(BenchmarkId::from_parameter(n), &batch, |b, batch| {
            b.iter(|| gate.cleanse(Some(batch.clone())).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_compute_stats, benchmark_cleanse);
criterion_main!(benches);
