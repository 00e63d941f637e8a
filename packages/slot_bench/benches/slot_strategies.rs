//! Compares the cached-slot and linear-search strategies end to end, and shows
//! the false-sharing cliff when the stride drops below one cache line.

#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;
use std::num::NonZero;

use criterion::{Criterion, criterion_group, criterion_main};
use new_zealand::nz;
use slot_bench::{RunConfig, Strategy, execute};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

// Small enough to keep Criterion's sample collection reasonable, large enough
// that the counting loop dominates thread start-up cost.
const BENCH_START_COUNT: u32 = 1 << 16;

const BENCH_THREADS: NonZero<usize> = nz!(4);

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("slot_resolution");

    // Whole fan-out/fan-in runs are slow as benchmark iterations go.
    group.sample_size(10);

    for strategy in [Strategy::CachedSlot, Strategy::LinearSearch] {
        group.bench_function(strategy.to_string(), |b| {
            b.iter(|| {
                let config = RunConfig::new(BENCH_THREADS, BENCH_START_COUNT, nz!(32), strategy);

                black_box(execute(&config));
            });
        });
    }

    // Stride 1 packs all counters into the same cache lines; the gap between
    // this and the strided cached_slot run above is the false sharing cost.
    group.bench_function("cached_slot_unstrided", |b| {
        b.iter(|| {
            let config = RunConfig::new(
                BENCH_THREADS,
                BENCH_START_COUNT,
                nz!(1),
                Strategy::CachedSlot,
            );

            black_box(execute(&config));
        });
    });

    group.finish();
}
