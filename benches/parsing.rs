use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jayson::{parse, tokenize, Config};

/// A catalog-like document: `count` records with strings, numbers and nested arrays.
fn records(count: usize) -> String {
    let mut json = String::from("[");

    for i in 0..count {
        if i > 0 {
            json.push(',');
        }
        json.push_str(&format!(
            r#"{{"id": {i}, "name": "item é {i}", "price": {}.25, "tags": ["a", "b", null], "active": {}}}"#,
            i * 3,
            i % 2 == 0
        ));
    }

    json.push(']');
    json
}

fn nested(depth: usize) -> String {
    format!("{}1{}", "[".repeat(depth), "]".repeat(depth))
}

fn parse_benchmark(c: &mut Criterion) {
    let documents = [
        ("records_100", records(100)),
        ("records_10000", records(10_000)),
        ("nested_100", nested(100)),
    ];
    let mut group = c.benchmark_group("Parser");

    group.sample_size(10);

    for (name, json) in &documents {
        group.throughput(Throughput::Bytes(json.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), json, |b, data| {
            b.iter(|| {
                let _ = parse(black_box(data)).unwrap();
            })
        });
    }

    group.finish();
}

fn lex_benchmark(c: &mut Criterion) {
    let json = records(10_000);
    let mut group = c.benchmark_group("Lexer");

    group.sample_size(10);
    group.throughput(Throughput::Bytes(json.len() as u64));
    group.bench_function("records_10000", |b| {
        b.iter(|| {
            let _ = tokenize(black_box(&json), Config::default()).unwrap();
        })
    });

    group.finish();
}

criterion_group!(benches, parse_benchmark, lex_benchmark);
criterion_main!(benches);
