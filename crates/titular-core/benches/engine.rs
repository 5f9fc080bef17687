//! Engine hot-path benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;
use titular_core::{FixedRandom, PhraseList, SpeedConfig, Typewriter};

fn bench_parse(c: &mut Criterion) {
    c.bench_function("phrase_parse", |b| {
        b.iter(|| {
            PhraseList::parse(black_box(
                "Software Engineer, Full-Stack Developer, Problem Solver",
            ))
        });
    });
}

fn bench_ticks(c: &mut Criterion) {
    c.bench_function("engine_256_ticks", |b| {
        b.iter(|| {
            let mut rng = FixedRandom {
                index: 0,
                delay: Duration::ZERO,
            };
            let mut engine = Typewriter::with_rng(
                black_box("Software Engineer, Full-Stack Developer"),
                SpeedConfig::default(),
                &mut rng,
            );
            for _ in 0..256 {
                engine.tick();
            }
            engine
        });
    });
}

criterion_group!(benches, bench_parse, bench_ticks);
criterion_main!(benches);
