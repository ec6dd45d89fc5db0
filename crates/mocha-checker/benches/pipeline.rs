use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mocha_checker::{analyze, CheckerConfig};
use mocha_parser::parse_program;

const SHAPES: &str = r#"
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

/// A chain of `depth` classes, each overriding `f` and adding a closure
fn deep_hierarchy(depth: usize) -> String {
    let mut source = String::from("class C0 { int v0; int f(int x) { return x; } }\n");
    for i in 1..depth {
        source.push_str(&format!(
            "class C{i} extends C{p} {{ int v{i}; int f(int x) {{ var g = fun (int y) => x + y + v{i}; return g({i}); }} }}\n",
            i = i,
            p = i - 1
        ));
    }
    source.push_str("class Main { static void main() { Print(new C0().f(1)); } }\n");
    source
}

fn bench_shapes(c: &mut Criterion) {
    let program = parse_program(SHAPES).unwrap();
    let config = CheckerConfig::default();

    c.bench_function("analyze_shapes", |b| {
        b.iter(|| analyze(black_box(&program), &config));
    });
}

fn bench_hierarchy_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("hierarchy");
    let config = CheckerConfig::default();

    for depth in [10, 50, 200] {
        let source = deep_hierarchy(depth);
        let program = parse_program(&source).unwrap();
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::new("analyze", depth), &program, |b, program| {
            b.iter(|| analyze(black_box(program), &config));
        });
    }

    group.finish();
}

fn bench_parse_and_analyze(c: &mut Criterion) {
    let config = CheckerConfig::default();

    c.bench_function("parse_and_analyze_shapes", |b| {
        b.iter(|| {
            let program = parse_program(black_box(SHAPES)).unwrap();
            analyze(&program, &config)
        });
    });
}

criterion_group!(benches, bench_shapes, bench_hierarchy_depth, bench_parse_and_analyze);
criterion_main!(benches);
