use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ivory::eval::evaluate::evaluate;
use ivory::search::alphabeta::find_best_move;
use ivory::Position;

const MIDDLEGAME: &str = "r1bq1rk1/pp2bppp/2n1pn2/3p4/3P4/2NBPN2/PP3PPP/R1BQ1RK1 w - - 0 9";

fn bench_evaluate_startpos(c: &mut Criterion) {
    let pos = Position::startpos();
    c.bench_function("evaluate_startpos", |b| {
        b.iter(|| black_box(evaluate(black_box(&pos))));
    });
}

fn bench_evaluate_middlegame(c: &mut Criterion) {
    let pos = Position::from_fen(MIDDLEGAME).expect("known-good FEN");
    c.bench_function("evaluate_middlegame", |b| {
        b.iter(|| black_box(evaluate(black_box(&pos))));
    });
}

fn bench_search_shallow(c: &mut Criterion) {
    let pos = Position::from_fen(MIDDLEGAME).expect("known-good FEN");
    c.bench_function("search_middlegame_depth_3", |b| {
        b.iter(|| black_box(find_best_move(black_box(&pos), 3)));
    });
}

criterion_group!(
    benches,
    bench_evaluate_startpos,
    bench_evaluate_middlegame,
    bench_search_shallow
);
criterion_main!(benches);
