mod common;
use common::{check_should_fail_with, lower, lower_pretty};

use ceres::parser::ast::{Expr, Stmt, UnaryOp};

// ── The two target-driven coercions ───────────────────────────────────

#[test]
fn int_source_into_float_target() {
    let out = lower_pretty("int main() { float f; int i; f = i; return 0; }");
    assert!(out.contains("f = float(i);"), "got:\n{out}");
    // exactly one wrapper
    assert_eq!(out.matches("float(").count(), 1);
}

#[test]
fn char_source_into_int_target() {
    let out = lower_pretty("int main() { int i; char c; i = c; return 0; }");
    assert!(out.contains("i = int(c);"), "got:\n{out}");
    assert_eq!(out.matches("int(").count(), 1);
}

#[test]
fn matching_types_take_no_coercion() {
    let out = lower_pretty(
        "int main() { int i; float f; char c; bool b; \
         i = 3; f = 2.5; c = 'q'; b = true; return 0; }",
    );
    assert!(out.contains("i = 3;"), "got:\n{out}");
    assert!(out.contains("f = 2.5;"), "got:\n{out}");
    assert!(out.contains("c = 'q';"), "got:\n{out}");
    assert!(out.contains("b = true;"), "got:\n{out}");
}

#[test]
fn wrapper_goes_around_the_whole_source() {
    // i + 1 runs at int; the assignment then wraps the finished sum.
    let out = lower_pretty("int main() { float f; int i; f = i + 1; return 0; }");
    assert!(out.contains("f = float(i + 1);"), "got:\n{out}");
}

#[test]
fn wrapper_is_a_single_conversion_node() {
    let p = lower("int main() { float f; int i; f = i; return 0; }");
    let Stmt::Assign { target, value } = &p.functions[0].node.body.node.stmts[0].node else {
        panic!("expected assignment");
    };
    assert_eq!(target.node, "f");
    let Expr::Unary { op: UnaryOp::IntToFloat, operand } = &value.node else {
        panic!("expected exactly one int-to-float wrapper, got {value:?}");
    };
    assert!(matches!(operand.node, Expr::Var(ref n) if n == "i"));
}

#[test]
fn float_source_already_matches_float_target() {
    let out = lower_pretty("int main() { float f; int i; f = f + float(i); return 0; }");
    // the cast covers the widening; the assignment adds nothing
    assert_eq!(out.matches("float(").count(), 1);
}

#[test]
fn global_targets_coerce_like_locals() {
    let out = lower_pretty("float g; int main() { int i; g = i; return 0; }");
    assert!(out.contains("g = float(i);"), "got:\n{out}");
}

// ── Directions the pass does not coerce are rejected upstream ─────────

#[test]
fn float_into_int_target_is_rejected() {
    check_should_fail_with(
        "int main() { int x, y; float z; x = y + z; }",
        "type mismatch in assignment: expected int, found float",
    );
}

#[test]
fn char_into_float_target_is_rejected() {
    check_should_fail_with(
        "int main() { float f; char c; f = c; }",
        "type mismatch in assignment: expected float, found char",
    );
}

#[test]
fn int_into_char_target_is_rejected() {
    check_should_fail_with(
        "int main() { char c; int i; c = i; }",
        "type mismatch in assignment: expected char, found int",
    );
}

#[test]
fn bool_never_mixes() {
    check_should_fail_with(
        "int main() { bool b; b = 1; }",
        "type mismatch in assignment: expected bool, found int",
    );
    check_should_fail_with(
        "int main() { int i; bool b; i = b; }",
        "type mismatch in assignment: expected int, found bool",
    );
}
