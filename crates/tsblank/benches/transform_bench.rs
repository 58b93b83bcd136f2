use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use tsblank::transform;

fn synthetic_module(classes: usize) -> String {
    let mut source = String::from("import type { Config } from \"./config\";\n");
    for index in 0..classes {
        source.push_str(&format!(
            "export class Service{index}<T extends object> extends Base<T> implements Lifecycle {{\n\
             \x20 private readonly state?: Map<string, T>;\n\
             \x20 constructor(config: Config) {{ super(config as Config); }}\n\
             \x20 handle<U>(input: U, this_arg?: string): U {{ return input!; }}\n\
             }}\n"
        ));
    }
    source
}

fn bench_transform(c: &mut Criterion) {
    let small = synthetic_module(4);
    let large = synthetic_module(256);

    let mut group = c.benchmark_group("transform");
    group.throughput(Throughput::Bytes(small.len() as u64));
    group.bench_function("small_module", |b| {
        b.iter(|| transform(black_box(&small)))
    });
    group.throughput(Throughput::Bytes(large.len() as u64));
    group.bench_function("large_module", |b| {
        b.iter(|| transform(black_box(&large)))
    });
    group.finish();
}

criterion_group!(benches, bench_transform);
criterion_main!(benches);
