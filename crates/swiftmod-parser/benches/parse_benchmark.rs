//! Parser benchmarks.

use criterion::{criterion_group, criterion_main, Criterion, black_box};
use swiftmod_parser::parse_type;

const SIMPLE_TYPE: &str = "CGFloat?";

const NESTED_TYPE: &str = "Dictionary<String, Array<Binding<Set<Int>?>>>";

const CLOSURE_TYPE: &str =
    "@escaping @Sendable (Dictionary<String, Int>, (Bool) -> Void) async throws -> Array<String>?";

fn parse_simple(c: &mut Criterion) {
    c.bench_function("parse_simple", |b| {
        b.iter(|| parse_type(black_box(SIMPLE_TYPE)))
    });
}

fn parse_nested(c: &mut Criterion) {
    c.bench_function("parse_nested", |b| {
        b.iter(|| parse_type(black_box(NESTED_TYPE)))
    });
}

fn parse_closure(c: &mut Criterion) {
    c.bench_function("parse_closure", |b| {
        b.iter(|| parse_type(black_box(CLOSURE_TYPE)))
    });
}

criterion_group!(benches, parse_simple, parse_nested, parse_closure);
criterion_main!(benches);
