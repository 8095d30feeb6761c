// ============================================================================
// Numeric Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Decimal - Multiplication and division at increasing precision caps
// 2. Tower Dispatch - Mixed-variant arithmetic through Number
// 3. Quantities - Dimension checks and uncertainty propagation
// 4. Registry - Prefixed unit lookup, cold derivation vs cached
// ============================================================================

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use physical_quantity::prelude::*;
use std::hint::black_box;

// ============================================================================
// Decimal Benchmarks
// ============================================================================

fn benchmark_decimal_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("decimal");

    for precision in [16usize, 50, 200].iter() {
        let a = PreciseDecimal::parse_with_precision(
            "3.14159265358979323846264338327950288",
            *precision,
        )
        .unwrap();
        let b = PreciseDecimal::parse_with_precision(
            "2.71828182845904523536028747135266249",
            *precision,
        )
        .unwrap();

        group.bench_with_input(BenchmarkId::new("mul", precision), &(&a, &b), |bench, (a, b)| {
            bench.iter(|| black_box(*a * *b));
        });

        group.bench_with_input(BenchmarkId::new("div", precision), &(&a, &b), |bench, (a, b)| {
            bench.iter(|| black_box(a.checked_div(b)));
        });

        group.bench_with_input(BenchmarkId::new("sqrt", precision), &a, |bench, a| {
            bench.iter(|| black_box(a.sqrt()));
        });
    }

    group.finish();
}

// ============================================================================
// Tower Dispatch Benchmarks
// ============================================================================

fn benchmark_tower_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("tower");

    let decimal: Number = "1.013".parse().unwrap();
    let cases = [
        ("int_int", Number::from(12345), Number::from(678)),
        ("int_double", Number::from(12345), Number::from(6.78)),
        ("double_decimal", Number::from(6.78), decimal.clone()),
        ("complex_decimal", Number::complex(3, -4), decimal),
    ];

    for (name, a, b) in cases.iter() {
        group.bench_with_input(BenchmarkId::new("add", name), &(a, b), |bench, (a, b)| {
            bench.iter(|| black_box(*a + *b));
        });
        group.bench_with_input(BenchmarkId::new("div", name), &(a, b), |bench, (a, b)| {
            bench.iter(|| black_box(*a / *b));
        });
    }

    group.finish();
}

// ============================================================================
// Quantity Benchmarks
// ============================================================================

fn benchmark_quantity_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantity");

    let length = Quantity::new(3, &standard::METERS)
        .with_uncertainty(0.01)
        .unwrap();
    let time = Quantity::new(1.5, &standard::SECONDS)
        .with_uncertainty(0.02)
        .unwrap();
    let other = Quantity::new(250, &standard::METERS)
        .with_uncertainty(0.05)
        .unwrap();

    group.bench_function("divide_with_uncertainty", |bench| {
        bench.iter(|| black_box(&length / &time));
    });

    group.bench_function("add_same_dimension", |bench| {
        bench.iter(|| black_box(&length + &other));
    });

    group.bench_function("add_mismatch_rejected", |bench| {
        bench.iter(|| black_box((&length + &time).is_err()));
    });

    group.finish();
}

// ============================================================================
// Registry Benchmarks
// ============================================================================

fn benchmark_registry_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry");

    group.bench_function("exact", |bench| {
        let registry = UnitRegistry::with_standard_units();
        bench.iter(|| black_box(registry.lookup("m")));
    });

    group.bench_function("prefixed_cached", |bench| {
        let registry = UnitRegistry::with_standard_units();
        registry.lookup("km");
        bench.iter(|| black_box(registry.lookup("km")));
    });

    group.bench_function("prefixed_cold", |bench| {
        bench.iter_batched(
            UnitRegistry::with_standard_units,
            |registry| black_box(registry.lookup("GW")),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_decimal_arithmetic,
    benchmark_tower_dispatch,
    benchmark_quantity_ops,
    benchmark_registry_lookup,
);

criterion_main!(benches);
