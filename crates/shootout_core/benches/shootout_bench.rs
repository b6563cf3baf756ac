use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use shootout_core::{play_out, Difficulty, ShootoutEngine};

fn bench_full_shootout(c: &mut Criterion) {
    let mut group = c.benchmark_group("shootout");

    for difficulty in Difficulty::ALL {
        group.bench_function(format!("play_out_{}", difficulty.display_name().to_lowercase()), |b| {
            let mut seed = 0u64;
            b.iter(|| {
                seed += 1;
                let mut engine = ShootoutEngine::seeded(seed);
                let mut policy = ChaCha8Rng::seed_from_u64(!seed);
                engine.start_new(difficulty);
                black_box(play_out(&mut engine, &mut policy).unwrap())
            })
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let config = shootout_core::EngineConfig::default();
    c.bench_function("simulate_batch_1000", |b| {
        b.iter(|| {
            black_box(
                shootout_core::calibration::simulate_batch(&config, Difficulty::Medium, 1_000, 7)
                    .unwrap(),
            )
        })
    });
}

criterion_group!(benches, bench_full_shootout, bench_batch);
criterion_main!(benches);
