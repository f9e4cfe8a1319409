use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use qdim::{si, Rational64, UnitSet};
use std::hint::black_box;

fn bench_unit_algebra(c: &mut Criterion) {
    let mut group = c.benchmark_group("unit_algebra");

    let force = si::newton();
    let length = si::meter();
    group.bench_function("multiply_sets", |b| {
        b.iter(|| black_box(&force) * black_box(&length));
    });

    let energy = si::kilogram() * si::meter().powi(2) / si::second().powi(2);
    group.bench_function("divide_sets", |b| {
        b.iter(|| black_box(&energy) / black_box(&length));
    });

    group.bench_function("sqrt_set", |b| {
        let area = si::meter().powi(2);
        b.iter(|| black_box(&area).sqrt());
    });

    group.finish();
}

fn bench_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversion");
    let reg = si::registry();

    let targets: Vec<(&str, UnitSet, UnitSet)> = vec![
        ("mm_to_m", si::millimeter(), si::meter()),
        ("mi_to_ft", si::mile(), si::foot()),
        ("kmh_to_mps", si::kilometer() / si::hour(), si::meter() / si::second()),
        ("deg_to_unitless", si::degree(), UnitSet::none()),
    ];

    for (name, from, to) in &targets {
        group.bench_with_input(BenchmarkId::new("factor", name), &(from, to), |b, (from, to)| {
            b.iter(|| reg.conversion(black_box(from), black_box(to)));
        });
    }

    let q = 90.0 * (si::kilometer() / si::hour());
    let mps = si::meter() / si::second();
    group.bench_function("convert_f64", |b| {
        b.iter(|| black_box(&q).convert_to(black_box(&mps), reg));
    });

    let exact = Rational64::from_integer(3) * si::mile();
    let ft = si::foot();
    group.bench_function("convert_rational", |b| {
        b.iter(|| black_box(&exact).convert_to(black_box(&ft), reg));
    });

    group.finish();
}

fn bench_batch_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_arithmetic");
    let reg = si::registry();

    let lengths: Vec<_> = (0..1000)
        .map(|i| {
            if i % 2 == 0 {
                (i as f64) * si::meter()
            } else {
                (i as f64) * si::foot()
            }
        })
        .collect();

    group.bench_function("sum_mixed_lengths", |b| {
        b.iter(|| {
            lengths
                .iter()
                .try_fold(0.0 * si::meter(), |acc, q| acc.add(black_box(q), reg))
        });
    });

    group.bench_function("max_mixed_lengths", |b| {
        b.iter(|| {
            lengths
                .iter()
                .try_fold(lengths[0].clone(), |acc, q| acc.max(black_box(q), reg))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_unit_algebra, bench_conversion, bench_batch_arithmetic);
criterion_main!(benches);
