use super::*;
use crate::ir::{CallKind, ForKind, Range, Type};

fn i32_var(name: &str) -> Expr {
    Expr::var(Type::int(32), name)
}

fn store_x() -> Stmt {
    Stmt::store("f", i32_var("x"), 1)
}

// --- Expressions ---

#[test]
fn test_add_with_immediate() {
    assert_eq!(print_expr(&(i32_var("x") + 3)), "(x + 3)");
}

#[test]
fn test_arithmetic_spacing() {
    let x = i32_var("x");
    let y = i32_var("y");
    assert_eq!(print_expr(&(&x - &y)), "(x - y)");
    assert_eq!(print_expr(&(&x * &y)), "(x*y)");
    assert_eq!(print_expr(&(&x / &y)), "(x/y)");
    assert_eq!(print_expr(&(&x % &y)), "(x % y)");
}

#[test]
fn test_nesting_one_paren_per_operator() {
    let x = i32_var("x");
    let e = &x * (Expr::int(17) / (&x - 3));
    assert_eq!(print_expr(&e), "(x*(17/(x - 3)))");

    let y = i32_var("y");
    let e = (&x + 3) * (&y / 2 + 17);
    assert_eq!(print_expr(&e), "((x + 3)*((y/2) + 17))");
}

#[test]
fn test_min_max_call_form() {
    let a = i32_var("a");
    let b = i32_var("b");
    assert_eq!(
        print_expr(&Expr::min(a.clone(), b.clone()).unwrap()),
        "min(a, b)"
    );
    let nested = Expr::max(Expr::min(a, b).unwrap(), Expr::int(0)).unwrap();
    assert_eq!(print_expr(&nested), "max(min(a, b), 0)");
}

#[test]
fn test_comparisons_and_logic() {
    let x = i32_var("x");
    let cases = [
        (Expr::eq(x.clone(), Expr::int(1)).unwrap(), "(x == 1)"),
        (Expr::ne(x.clone(), Expr::int(1)).unwrap(), "(x != 1)"),
        (Expr::lt(x.clone(), Expr::int(1)).unwrap(), "(x < 1)"),
        (Expr::le(x.clone(), Expr::int(1)).unwrap(), "(x <= 1)"),
        (Expr::gt(x.clone(), Expr::int(1)).unwrap(), "(x > 1)"),
        (Expr::ge(x.clone(), Expr::int(1)).unwrap(), "(x >= 1)"),
    ];
    for (expr, text) in cases {
        assert_eq!(print_expr(&expr), text);
    }

    let lo = Expr::ge(x.clone(), Expr::int(0)).unwrap();
    let hi = Expr::lt(x, Expr::int(8)).unwrap();
    let both = Expr::and(lo.clone(), hi.clone()).unwrap();
    assert_eq!(print_expr(&both), "((x >= 0) && (x < 8))");
    let either = Expr::or(lo, hi).unwrap();
    assert_eq!(print_expr(&!either), "!((x >= 0) || (x < 8))");
}

#[test]
fn test_immediates() {
    assert_eq!(print_expr(&Expr::int(-2)), "-2");
    assert_eq!(print_expr(&Expr::float(0.5)), "0.5");
    assert_eq!(print_expr(&Expr::float(1.0)), "1");
    assert_eq!(print_expr(&Expr::float(-2.25)), "-2.25");
    assert_eq!(print_expr(&Expr::float(0.1)), "0.1");
    assert_eq!(print_expr(&Expr::float(0.0)), "0");
    assert_eq!(print_expr(&Expr::float(f32::INFINITY)), "inf");
    assert_eq!(print_expr(&Expr::float(f32::NEG_INFINITY)), "-inf");
    assert_eq!(print_expr(&Expr::float(f32::NAN)), "nan");
}

#[test]
fn test_cast_var_and_load() {
    let x = i32_var("x");
    assert_eq!(
        print_expr(&Expr::cast(Type::float(32), x.clone())),
        "f32(x)"
    );
    assert_eq!(
        print_expr(&Expr::cast(Type::uint(8).vector(16), x.clone())),
        "u8x16(x)"
    );
    assert_eq!(
        print_expr(&Expr::load(Type::float(32), "input", &x + 1)),
        "input[(x + 1)]"
    );
}

#[test]
fn test_select_ramp_broadcast() {
    let x = i32_var("x");
    let c = Expr::lt(x.clone(), Expr::int(0)).unwrap();
    let s = Expr::select(c, Expr::int(0), x.clone()).unwrap();
    assert_eq!(print_expr(&s), "select((x < 0), 0, x)");

    let r = Expr::ramp(&x * 4, Expr::int(1), 4).unwrap();
    assert_eq!(print_expr(&r), "ramp((x*4), 1, 4)");

    let b = Expr::broadcast(Expr::float(0.25), 8).unwrap();
    assert_eq!(print_expr(&b), "broadcast(0.25, 8)");
}

#[test]
fn test_call_and_let() {
    let x = i32_var("x");
    let call = Expr::call(
        Type::float(32),
        "g",
        vec![x.clone(), &x + 1],
        CallKind::Producer,
    );
    assert_eq!(print_expr(&call), "g(x, (x + 1))");
    let empty = Expr::call(Type::float(32), "random", Vec::new(), CallKind::Extern);
    assert_eq!(print_expr(&empty), "random()");

    let t = i32_var("t");
    let e = Expr::let_in("t", &x * 2, &t + &t);
    assert_eq!(print_expr(&e), "(let t = (x*2) in (t + t))");
}

#[test]
fn test_shared_subexpression_printed_at_each_use() {
    let x = i32_var("x");
    let shared = &x + 1;
    let e = &shared * (&shared - 2);
    assert_eq!(print_expr(&e), "((x + 1)*((x + 1) - 2))");
    // The shared node is untouched and still printable on its own.
    assert_eq!(print_expr(&shared), "(x + 1)");
}

#[test]
fn test_printing_is_deterministic() {
    let x = i32_var("x");
    let e = Expr::max(&x * 3, &x % 5).unwrap();
    assert_eq!(print_expr(&e), print_expr(&e));
}

// --- Statements ---

#[test]
fn test_store_and_provide() {
    let x = i32_var("x");
    let y = i32_var("y");
    assert_eq!(
        print_stmt(&Stmt::store("buf", &y - 1, &x * 17)),
        "buf[(y - 1)] = (x*17)\n"
    );
    assert_eq!(
        print_stmt(&Stmt::provide("f", vec![x.clone(), y.clone()], &x + &y)),
        "f(x, y) = (x + y)\n"
    );
}

#[test]
fn test_print_and_assert() {
    let x = i32_var("x");
    let p = Stmt::print("x is", vec![x.clone(), &x + 1]);
    assert_eq!(print_stmt(&p), "print(x is, x, (x + 1))\n");
    assert_eq!(print_stmt(&Stmt::print("done", Vec::new())), "print(done)\n");

    let a = Stmt::assert(Expr::gt(x, Expr::int(3)).unwrap(), "x too small").unwrap();
    assert_eq!(print_stmt(&a), "assert((x > 3), \"x too small\")\n");
}

#[test]
fn test_parallel_for_indents_body() {
    let y = i32_var("y");
    let s = Stmt::for_loop("x", -2, &y + 2, ForKind::Parallel, store_x()).unwrap();
    assert_eq!(
        print_stmt(&s),
        "parallel (x, -2, (y + 2)) {\n  f[x] = 1\n}\n"
    );
}

#[test]
fn test_loop_kinds() {
    for (kind, keyword) in [
        (ForKind::Serial, "for"),
        (ForKind::Parallel, "parallel"),
        (ForKind::Unrolled, "unrolled"),
        (ForKind::Vectorized, "vectorized"),
    ] {
        let s = Stmt::for_loop("x", 0, 4, kind, store_x()).unwrap();
        assert!(print_stmt(&s).starts_with(&format!("{} (x, 0, 4) {{\n", keyword)));
    }
}

#[test]
fn test_nested_loops_accumulate_indent() {
    let inner = Stmt::for_loop("x", 0, 8, ForKind::Vectorized, store_x()).unwrap();
    let outer = Stmt::for_loop("y", 0, 4, ForKind::Serial, inner).unwrap();
    assert_eq!(
        print_stmt(&outer),
        "for (y, 0, 4) {\n  vectorized (x, 0, 8) {\n    f[x] = 1\n  }\n}\n"
    );
}

#[test]
fn test_let_stmt_body_at_same_indent() {
    let s = Stmt::let_stmt("y", Expr::int(17), store_x());
    assert_eq!(print_stmt(&s), "let y = 17\nf[x] = 1\n");

    let looped = Stmt::for_loop("x", 0, 2, ForKind::Serial, s).unwrap();
    assert_eq!(
        print_stmt(&looped),
        "for (x, 0, 2) {\n  let y = 17\n  f[x] = 1\n}\n"
    );
}

#[test]
fn test_pipeline_without_update() {
    let p = Stmt::pipeline("f", store_x(), None, Stmt::store("out", 0, 2));
    assert_eq!(
        print_stmt(&p),
        "produce f {\n  f[x] = 1\n} consume {\n  out[0] = 2\n}\n"
    );
}

#[test]
fn test_pipeline_with_update() {
    let p = Stmt::pipeline(
        "f",
        store_x(),
        Some(Stmt::store("f", 0, 3)),
        Stmt::store("out", 0, 2),
    );
    assert_eq!(
        print_stmt(&p),
        "produce f {\n  f[x] = 1\n} update {\n  f[0] = 3\n} consume {\n  out[0] = 2\n}\n"
    );
}

#[test]
fn test_allocate_keeps_indent() {
    let a = Stmt::allocate("tmp", Type::float(32), 16, Stmt::store("tmp", 0, 0.5f32));
    assert_eq!(
        print_stmt(&a),
        "allocate tmp[f32 * 16]\ntmp[0] = 0.5\nfree tmp\n"
    );

    let looped = Stmt::for_loop("i", 0, 3, ForKind::Unrolled, a).unwrap();
    assert_eq!(
        print_stmt(&looped),
        "unrolled (i, 0, 3) {\n  allocate tmp[f32 * 16]\n  tmp[0] = 0.5\n  free tmp\n}\n"
    );
}

#[test]
fn test_realize_bounds() {
    let x = i32_var("x");
    let y = i32_var("y");
    let body = Stmt::provide("f", vec![x.clone(), y.clone()], &x + &y);
    let r = Stmt::realize(
        "f",
        vec![Range::new(0, 10), Range::new(Expr::int(-1), &y + 2)],
        body,
    );
    assert_eq!(
        print_stmt(&r),
        "realize f([0, 10], [-1, (y + 2)]) {\n  f(x, y) = (x + y)\n}\n"
    );
}

#[test]
fn test_block_is_pure_sequencing() {
    let a = Stmt::store("a", 0, 1);
    let b = Stmt::store("b", 0, 2);
    let single = Stmt::block(a.clone(), None);
    assert_eq!(print_stmt(&single), "a[0] = 1\n");
    let pair = Stmt::block(a, Some(b));
    assert_eq!(print_stmt(&pair), "a[0] = 1\nb[0] = 2\n");
}

#[test]
fn test_streams_into_existing_sink() {
    let mut out = String::from("// header\n");
    Printer::new(&mut out).print_stmt(&store_x()).unwrap();
    assert_eq!(out, "// header\nf[x] = 1\n");
}

#[test]
fn test_display_matches_print_functions() {
    let s = Stmt::for_loop("x", 0, 4, ForKind::Serial, store_x()).unwrap();
    assert_eq!(format!("{}", s), print_stmt(&s));
    let e = i32_var("x") + 3;
    assert_eq!(format!("{}", e), "(x + 3)");
}

#[test]
fn test_float_six_significant_digits() {
    assert_eq!(print_expr(&Expr::float(1.0 / 3.0)), "0.333333");
    assert_eq!(print_expr(&Expr::float(2.0 / 3.0)), "0.666667");
    assert_eq!(print_expr(&Expr::float(123456.7)), "123457");
    assert_eq!(print_expr(&Expr::float(0.0001)), "0.0001");
}

#[test]
fn test_float_exponent_form() {
    assert_eq!(print_expr(&Expr::float(1e10)), "1e+10");
    assert_eq!(print_expr(&Expr::float(1e-7)), "1e-07");
    assert_eq!(print_expr(&Expr::float(1234567.0)), "1.23457e+06");
    assert_eq!(print_expr(&Expr::float(-2.5e-5)), "-2.5e-05");
    // Rounding can carry into the next decade.
    assert_eq!(print_expr(&Expr::float(999999.7)), "1e+06");
}
