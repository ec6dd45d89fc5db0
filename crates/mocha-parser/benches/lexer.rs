use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mocha_parser::{parse_program, Lexer};

const PROGRAM: &str = r#"
abstract class Shape {
    int sides;
    abstract int area();
    int getSides() { return sides; }
}

class Square extends Shape {
    int side;
    int area() { return side * side; }
}

class Main {
    static void main() {
        class Shape[] shapes = new class Shape[10];
        int i = 0;
        for (i = 0; i < shapes.length(); i = i + 1) {
            shapes[i] = new Square();
        }
        var total = 0;
        var add = fun (int x) => total + x;
        Print("total: ", add(shapes[0].area()), true);
    }
}
"#;

fn bench_keywords(c: &mut Criterion) {
    let source = "class extends abstract static var fun int bool string void if else while for break return new this";

    c.bench_function("lex_keywords", |b| {
        b.iter(|| {
            let lexer = Lexer::new(black_box(source));
            lexer.tokenize().unwrap()
        });
    });
}

fn bench_literals(c: &mut Criterion) {
    let mut group = c.benchmark_group("literals");

    let integers = "42 123 0 999 1000000 0xFF 0x1234 0xDEAD";
    group.bench_with_input(BenchmarkId::new("integers", "mixed"), &integers, |b, source| {
        b.iter(|| {
            let lexer = Lexer::new(black_box(source));
            lexer.tokenize().unwrap()
        });
    });

    let strings = r#""hello" "line1\nline2" "tab\there" "quote\"test""#;
    group.bench_with_input(BenchmarkId::new("strings", "escapes"), &strings, |b, source| {
        b.iter(|| {
            let lexer = Lexer::new(black_box(source));
            lexer.tokenize().unwrap()
        });
    });

    group.finish();
}

fn bench_program(c: &mut Criterion) {
    let mut group = c.benchmark_group("program");
    group.throughput(Throughput::Bytes(PROGRAM.len() as u64));

    group.bench_function("lex", |b| {
        b.iter(|| {
            let lexer = Lexer::new(black_box(PROGRAM));
            lexer.tokenize().unwrap()
        });
    });

    group.bench_function("parse", |b| {
        b.iter(|| parse_program(black_box(PROGRAM)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_keywords, bench_literals, bench_program);
criterion_main!(benches);
