//! Benchmarks for codomain chain operations.
//!
//! Run with: `cargo bench`
//!
//! Two costs matter: the LUT rebuild triggered by every configuration
//! change, and the steady-state per-pixel lookup.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use codomain::{
    BitPlane, CodomainChain, CodomainContext, ContrastStretchingContext, PlaneSlicingContext,
    ReverseIntensityContext,
};

fn full_stack() -> Vec<CodomainContext> {
    vec![
        CodomainContext::ReverseIntensity(ReverseIntensityContext::new()),
        CodomainContext::PlaneSlicing(PlaneSlicingContext::new(BitPlane::Bit4, false)),
        CodomainContext::ContrastStretching(
            ContrastStretchingContext::new((63, 31), (191, 223)).unwrap(),
        ),
    ]
}

/// Benchmark LUT rebuild cost against chain length.
fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("rebuild");

    let stack = full_stack();
    for len in 0..=stack.len() {
        let contexts: Vec<CodomainContext> = stack[..len].to_vec();
        group.bench_with_input(BenchmarkId::new("with_contexts", len), &contexts, |b, ctxs| {
            b.iter(|| {
                CodomainChain::with_contexts(black_box(0), black_box(255), ctxs.clone()).unwrap()
            })
        });
    }

    group.bench_function("set_interval", |b| {
        let mut chain = CodomainChain::with_contexts(0, 255, full_stack()).unwrap();
        let mut narrow = false;
        b.iter(|| {
            narrow = !narrow;
            let end = if narrow { 200 } else { 255 };
            chain.set_interval(black_box(0), black_box(end)).unwrap()
        })
    });

    group.finish();
}

/// Benchmark steady-state transform throughput.
fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");

    let chain = CodomainChain::with_contexts(0, 255, full_stack()).unwrap();

    for size in [1_000usize, 100_000, 1_000_000].iter() {
        let values: Vec<i32> = (0..*size).map(|i| (i % 256) as i32).collect();
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("lookup", size), &values, |b, v| {
            b.iter(|| {
                v.iter()
                    .map(|&x| chain.transform(black_box(x)))
                    .collect::<Vec<_>>()
            })
        });

        group.bench_with_input(BenchmarkId::new("slice", size), &values, |b, v| {
            b.iter(|| {
                let mut plane = v.clone();
                chain.transform_slice(&mut plane);
                plane
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rebuild, bench_transform);
criterion_main!(benches);
