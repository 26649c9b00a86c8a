mod common;
use common::lower_pretty;

// Whole-program lowering output, checked verbatim.

#[test]
fn mixed_arithmetic_program() {
    let src = "float f; int i; char c; \
               int main() { f = i + 1; i = c; if (c < f) { f = 0.5; } return i; }";
    let expected = "\
float f;
int i;
char c;

int main() {
    f = float(i + 1);
    i = int(c);
    if (float(int(c)) < f) {
        f = 0.5;
    }
    return i;
}
";
    assert_eq!(lower_pretty(src), expected);
}

#[test]
fn functions_and_calls_program() {
    let src = "int g;\n\
               void put(float v) { }\n\
               float scale(int n, float k) { float r; r = n * k; return r; }\n\
               int main() { char c; g = c; put(scale(g, 2.0)); return g; }";
    let expected = "\
int g;

void put(float v) {
}

float scale(int n, float k) {
    float r;
    r = float(n) * k;
    return r;
}

int main() {
    char c;
    g = int(c);
    put(scale(g, 2.0));
    return g;
}
";
    assert_eq!(lower_pretty(src), expected);
}

#[test]
fn loop_heavy_program() {
    let src = "int main() { int i; float total; char step; \
               total = 0.0; i = 0; step = 'a'; \
               while (i < 10) { total = total + i; i = i + step; } \
               return int(total); }";
    let expected = "\
int main() {
    int i;
    float total;
    char step;
    total = 0.0;
    i = 0;
    step = 'a';
    while (i < 10) {
        total = total + float(i);
        i = i + int(step);
    }
    return int(total);
}
";
    assert_eq!(lower_pretty(src), expected);
}
