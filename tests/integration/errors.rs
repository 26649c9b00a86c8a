mod common;
use common::check_should_fail_with;

// The lowering pass assumes a checked program; these are the checks
// that keep its internal assertions unreachable.

#[test]
fn undefined_names() {
    check_should_fail_with("int main() { x = 1; }", "undefined variable 'x'");
    check_should_fail_with("int main() { int x; x = y; }", "undefined variable 'y'");
    check_should_fail_with("int main() { missing(); }", "unknown function 'missing'");
}

#[test]
fn duplicate_declarations() {
    check_should_fail_with("int g; float g; int main() { }", "duplicate global 'g'");
    check_should_fail_with(
        "int f() { return 1; } float f() { return 1.5; }",
        "duplicate function 'f'",
    );
    check_should_fail_with(
        "int main(int a) { char a; return 0; }",
        "duplicate declaration of 'a' in function 'main'",
    );
}

#[test]
fn function_and_global_names_are_disjoint() {
    check_should_fail_with(
        "int f; int f() { return 1; }",
        "function 'f' collides with a global of the same name",
    );
}

#[test]
fn char_arithmetic_has_no_variant() {
    check_should_fail_with(
        "int main() { int i; char c, d; i = c + d; }",
        "cannot apply '+' to two char operands",
    );
}

#[test]
fn bool_stays_out_of_the_numeric_lattice() {
    check_should_fail_with("int main() { int i; bool b; i = i + b; }", "cannot apply '+'");
    check_should_fail_with("int main() { bool r; int i; bool b; r = i < b; }", "cannot compare int and bool");
    check_should_fail_with("int main() { bool b; b = b && 1; }", "'&&' requires bool operands");
    check_should_fail_with("int main() { bool b; b = !3; }", "cannot apply '!' to type int");
}

#[test]
fn negation_needs_int_or_float() {
    check_should_fail_with("int main() { char c; int i; i = -c; }", "cannot negate type char");
    check_should_fail_with("int main() { bool b; b = -b; }", "cannot negate type bool");
}

#[test]
fn cast_operand_rules() {
    check_should_fail_with("int main() { float f; f = float(f); }", "'float(...)' requires an int operand");
    check_should_fail_with("int main() { char c; c = char('a'); }", "'char(...)' requires an int operand");
    check_should_fail_with("int main() { int i; bool b; i = int(b); }", "cannot cast bool to int");
}

#[test]
fn conditions_must_be_bool() {
    check_should_fail_with("int main() { if (1) ; }", "if condition must be bool, found int");
    check_should_fail_with("int main() { while (1.5) ; }", "while condition must be bool, found float");
}

#[test]
fn call_position_rules() {
    check_should_fail_with(
        "int twice(int n) { return n + n; } int main() { twice(2); }",
        "call statement requires a void function; 'twice' returns int",
    );
    check_should_fail_with(
        "void log(int v) { } int main() { int i; i = log(1); }",
        "void function 'log' used in an expression",
    );
    check_should_fail_with(
        "void log(int v) { } int main() { log(1, 2); }",
        "function 'log' expects 1 arguments, found 2",
    );
}

#[test]
fn return_rules() {
    check_should_fail_with("void f() { return 1; }", "return in void function 'f'");
    check_should_fail_with("int f() { return 1.5; }", "return type mismatch: expected int, found float");
}

#[test]
fn functions_are_not_values() {
    check_should_fail_with(
        "int f() { return 1; } int main() { int i; i = f; }",
        "'f' is a function, not a variable",
    );
    check_should_fail_with(
        "int f() { return 1; } int main() { f = 1; }",
        "'f' is a function, not a variable",
    );
}
