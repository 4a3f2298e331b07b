//! Printer throughput on synthetic loop nests.
//!
//! Bodies share one expression node per level, so the benchmark also covers
//! printing heavily shared DAGs.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use raster_ir::{print_stmt, Expr, ForKind, Range, Stmt, Type};

/// `depth` nested loops around a block of `width` stores.
fn synthetic_nest(depth: usize, width: usize) -> Stmt {
    let x = Expr::var(Type::int(32), "x");
    let shared = (&x * 3 + 1) / (&x - 2);
    let stores: Vec<Stmt> = (0..width)
        .map(|i| Stmt::store("out", &x + i as i32, &shared + i as i32))
        .collect();
    let mut body = Stmt::sequence(stores).unwrap_or_else(|| Stmt::store("out", 0, 0));
    for level in 0..depth {
        let kind = match level % 4 {
            0 => ForKind::Serial,
            1 => ForKind::Parallel,
            2 => ForKind::Unrolled,
            _ => ForKind::Vectorized,
        };
        body = Stmt::for_loop(format!("v{}", level), 0, 64, kind, body).unwrap();
    }
    Stmt::realize("out", vec![Range::new(0, 64)], body)
}

fn bench_print(c: &mut Criterion) {
    let small = synthetic_nest(2, 8);
    let large = synthetic_nest(8, 256);

    let mut group = c.benchmark_group("print_stmt");
    group.bench_function("2x8", |b| b.iter(|| print_stmt(black_box(&small))));
    group.bench_function("8x256", |b| b.iter(|| print_stmt(black_box(&large))));
    group.finish();
}

criterion_group!(benches, bench_print);
criterion_main!(benches);
