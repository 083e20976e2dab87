use beacon_emitter::{Emitter, EmitterConfig, EventKey};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy)]
struct Position {
    x: i32,
    y: i32,
}

// ============================================================================
// Benchmark: Emission fan-out
// ============================================================================

fn bench_emit(c: &mut Criterion) {
    let mut group = c.benchmark_group("emit");

    for listeners in [0_u64, 1, 8, 64] {
        let emitter = Emitter::with_config(EmitterConfig::default().max_listeners(0));
        let key = EventKey::<Position>::new("playerMove");
        let sum = Arc::new(AtomicU64::new(0));

        for _ in 0..listeners {
            let sum = Arc::clone(&sum);
            emitter.listen(&key, move |p| {
                sum.fetch_add(u64::from(p.x.unsigned_abs() + p.y.unsigned_abs()), Ordering::Relaxed);
            });
        }

        group.throughput(Throughput::Elements(listeners.max(1)));
        group.bench_with_input(BenchmarkId::new("listeners", listeners), &key, |b, key| {
            b.iter(|| black_box(emitter.emit(key, &Position { x: 10, y: 20 })));
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Registration churn
// ============================================================================

fn bench_register(c: &mut Criterion) {
    let mut group = c.benchmark_group("register");
    let emitter = Emitter::new();
    let key = EventKey::<Position>::new("playerMove");

    group.bench_function("on_off", |b| {
        b.iter(|| {
            let listener = emitter.listen(&key, |p| {
                black_box(p);
            });
            black_box(emitter.off(&key, &listener));
        });
    });

    group.bench_function("once_fired", |b| {
        b.iter(|| {
            emitter.once(&key, |p| {
                black_box(p);
            });
            black_box(emitter.emit(&key, &Position { x: 1, y: 2 }));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_emit, bench_register);
criterion_main!(benches);
