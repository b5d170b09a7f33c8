use criterion::{Criterion, criterion_group, criterion_main};
use flag_rescue_core::{BoardGenerator, Game, Intent, MissionConfig, RandomBoardGenerator, iter_coords};
use rand::prelude::*;
use std::hint::black_box;

fn bench_generate(c: &mut Criterion) {
    let config = MissionConfig::default();
    let mut seed = 0u64;
    c.bench_function("generate 6x6", |b| {
        b.iter(|| {
            seed = seed.wrapping_add(1);
            black_box(RandomBoardGenerator::new(seed).generate(black_box(&config)))
        })
    });
}

fn bench_full_mission(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(0);
    c.bench_function("reveal every cell", |b| {
        b.iter(|| {
            let mut game = Game::default();
            game.dispatch(Intent::AcceptMission, &mut rng);
            for coords in iter_coords(MissionConfig::DEFAULT_SIZE) {
                game.dispatch(Intent::RevealCell(coords), &mut rng);
            }
            black_box(game.view())
        })
    });
}

criterion_group!(benches, bench_generate, bench_full_mission);
criterion_main!(benches);
