use blastgrid_core::*;
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement");
    for level in Level::ALL {
        let config = level.config();
        let center = (config.rows() / 2, config.cols() / 2);
        group.bench_function(level.name(), |b| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                RandomMineGenerator::new(seed).generate(black_box(config), center)
            })
        });
    }
    group.finish();
}

fn first_reveal(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_reveal");
    for level in Level::ALL {
        let config = level.config();
        let center = (config.rows() / 2, config.cols() / 2);
        group.bench_function(level.name(), |b| {
            let mut seed = 0;
            b.iter_batched(
                || {
                    seed += 1;
                    GridEngine::new(config, seed).expect("preset config is valid")
                },
                |mut engine| engine.reveal(black_box(center)),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn flood_fill_empty_grid(c: &mut Criterion) {
    let config = GameConfig::new((MAX_ROWS, MAX_COLS), 0).expect("empty grid is valid");
    c.bench_function("flood_fill_empty_24x24", |b| {
        b.iter_batched(
            || GridEngine::new(config, 0).expect("empty grid is valid"),
            |mut engine| engine.reveal(black_box((0, 0))),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, placement, first_reveal, flood_fill_empty_grid);
criterion_main!(benches);
