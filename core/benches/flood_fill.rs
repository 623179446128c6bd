use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use floodfill_core::{BoardGenerator, Difficulty, FloodEngine, RandomBoardGenerator, greedy_choice};

fn generate_boards(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for difficulty in Difficulty::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(difficulty),
            &difficulty,
            |b, &difficulty| {
                let mut seed = 0;
                b.iter(|| {
                    seed += 1;
                    black_box(RandomBoardGenerator::new(seed).generate(difficulty.config()))
                });
            },
        );
    }
    group.finish();
}

fn greedy_games(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy_game");
    for difficulty in Difficulty::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(difficulty),
            &difficulty,
            |b, &difficulty| {
                let mut seed = 0;
                b.iter(|| {
                    seed += 1;
                    let mut engine = FloodEngine::new_game(difficulty, seed);
                    while let Some(color) = greedy_choice(&engine) {
                        engine.choose_color(color);
                    }
                    black_box(engine.score())
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, generate_boards, greedy_games);
criterion_main!(benches);
