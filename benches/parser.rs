use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use trio::{Context, parse, run};

fn script(source: &str) {
    let script = parse(source, "bench");
    assert!(script.is_ok());
}

fn long_expr(c: &mut Criterion) {
    let mut group = c.benchmark_group("long-expr");

    let mut source = "var x = 1".to_string();
    for _i in 0..1000 {
        source.push_str(" + 1");
    }
    source.push(';');
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("long-expr", |b| b.iter(|| script(&source)));
}

fn stress_precedence(c: &mut Criterion) {
    let mut group = c.benchmark_group("stress-precedence");

    let mut source = "var x = 1".to_string();
    for _i in 0..200 {
        source.push_str(" == 2 < 3 + 5 * 5");
    }
    source.push(';');
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("stress-precedence", |b| b.iter(|| script(&source)));
}

fn loop_evaluation(c: &mut Criterion) {
    let source = "var s = 0;
                  for (var i = 0; i < 10000; i = i + 1) { s = s + i % 7; }
                  return s;";
    c.bench_function("loop-evaluation", |b| {
         b.iter(|| run(source, "bench", &mut Context::new()).is_ok())
     });
}

criterion_group!(benches, long_expr, stress_precedence, loop_evaluation);
criterion_main!(benches);
