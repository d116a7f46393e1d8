use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_blockfit::core::{catalog_shape, Board, GameEngine, GameSnapshot};
use tui_blockfit::engine::{choose, play_turn};
use tui_blockfit::types::Color;

fn checkerboard() -> Board {
    let mut board = Board::new();
    for row in 0..10 {
        for col in 0..10 {
            if (row + col) % 2 == 0 {
                board.set(row, col, Some(Color::Blue));
            }
        }
    }
    board
}

fn bench_can_place(c: &mut Criterion) {
    let board = checkerboard();
    let square3 = catalog_shape("square3").unwrap();

    c.bench_function("can_place_scan_square3", |b| {
        b.iter(|| {
            let mut fits = 0;
            for row in -1..11 {
                for col in -1..11 {
                    if board.can_place(black_box(&square3), row, col) {
                        fits += 1;
                    }
                }
            }
            fits
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("detect_and_clear_3_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for i in 0..10 {
                board.set(2, i, Some(Color::Red));
                board.set(7, i, Some(Color::Red));
                board.set(i, 4, Some(Color::Red));
            }
            let lines = board.detect_full_lines();
            board.apply_clear(black_box(&lines))
        })
    });
}

fn bench_game_over_search(c: &mut Criterion) {
    let domino = catalog_shape("domino_horizontal").unwrap();
    let mut engine = GameEngine::new(12345);

    c.bench_function("game_over_search_stuck", |b| {
        b.iter(|| engine.start_with(checkerboard(), [(domino, Color::Red); 3]))
    });
}

fn bench_planner(c: &mut Criterion) {
    let mut engine = GameEngine::new(12345);
    engine.start();

    c.bench_function("choose_placement", |b| b.iter(|| choose(black_box(&engine))));

    c.bench_function("play_turn", |b| {
        b.iter(|| {
            if engine.is_over() {
                engine.start();
            }
            play_turn(&mut engine).ok()
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut engine = GameEngine::new(12345);
    engine.start();
    let mut snap = GameSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| engine.snapshot_into(black_box(&mut snap)))
    });
}

criterion_group!(
    benches,
    bench_can_place,
    bench_line_clear,
    bench_game_over_search,
    bench_planner,
    bench_snapshot
);
criterion_main!(benches);
