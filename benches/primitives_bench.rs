use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kv_proto::{GcMetadata, Key, NodeList, Value};

fn key_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("key");
    for len in [8usize, 64, 512] {
        let key = Key::new(vec![0x7fu8; len]).unwrap();
        group.bench_with_input(BenchmarkId::new("next", len), &key, |b, k| {
            b.iter(|| black_box(k).next())
        });
        group.bench_with_input(BenchmarkId::new("prev", len), &key, |b, k| {
            b.iter(|| black_box(k).prev())
        });
        group.bench_with_input(BenchmarkId::new("prefix_end", len), &key, |b, k| {
            b.iter(|| black_box(k).prefix_end())
        });
    }

    let max = Key::max();
    group.bench_function("display_key_max", |b| b.iter(|| black_box(&max).to_string()));
    group.finish();
}

fn value_checksum(c: &mut Criterion) {
    let key = Key::from("user/0000000042");
    let mut group = c.benchmark_group("value");
    for size in [16usize, 1024, 64 * 1024] {
        let mut value = Value::from_bytes(vec![0xabu8; size]);
        value.init_checksum(&key);
        group.bench_with_input(BenchmarkId::new("verify", size), &value, |b, v| {
            b.iter(|| black_box(v).verify(&key))
        });
    }
    group.finish();
}

fn gc_and_nodes(c: &mut Criterion) {
    let gc = GcMetadata::new(0, 86_400, (1..=64).rev().collect());
    c.bench_function("gc_estimated_bytes", |b| {
        b.iter(|| gc.estimated_bytes(black_box(200_000 * 1_000_000_000), 10_000))
    });

    c.bench_function("node_list_add_100", |b| {
        b.iter(|| {
            let mut nodes = NodeList::new();
            for n in (0..100).rev() {
                nodes.add(black_box(n));
            }
            nodes
        })
    });
}

criterion_group!(benches, key_arithmetic, value_checksum, gc_and_nodes);
criterion_main!(benches);
