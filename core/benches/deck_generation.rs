use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use pairs_core::*;
use std::hint::black_box;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_deck");
    for pair_count in [8, 32, MAX_PAIRS] {
        let config = GameConfig::new(pair_count);
        group.bench_with_input(
            BenchmarkId::from_parameter(pair_count),
            &config,
            |b, config| {
                let mut seed = 0u64;
                b.iter(|| {
                    seed = seed.wrapping_add(1);
                    black_box(RandomDeckGenerator::new(seed).generate(config))
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
