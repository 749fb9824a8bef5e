use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cellmate::board::{Board, Team};

fn bench_legality(c: &mut Criterion) {
    c.bench_function("legal_targets_standard", |b| {
        let mut board = Board::standard();
        b.iter(|| {
            let mut total = 0;
            for cell in board.team_cells(Team::White) {
                total += board.legal_targets(cell).len();
            }
            black_box(total)
        })
    });

    c.bench_function("stalemate_query_standard", |b| {
        let mut board = Board::standard();
        b.iter(|| black_box(board.is_stalemate(Team::White)))
    });
}

criterion_group!(legality_benches, bench_legality);
criterion_main!(legality_benches);
