/*!
 * List Benchmarks
 *
 * Compare lock backends and measure the cost of the O(n) traversal-based
 * append and length operations.
 */

use chainlist::{BitwiseCopy, LinkedList, NativeLock, RawLock, SpinLock};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn build_list<L: RawLock>(len: usize) -> LinkedList<L> {
    let list = LinkedList::<L>::with_backend(8, BitwiseCopy).unwrap();
    for i in 0..len as u64 {
        list.push(&i.to_ne_bytes()).unwrap();
    }
    list
}

fn bench_push_tail(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_tail");

    for len in [0usize, 64, 512] {
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, len| {
            let list = build_list::<NativeLock>(*len);
            b.iter(|| {
                list.push(black_box(&7u64.to_ne_bytes())).unwrap();
                // Keep the chain at its nominal length.
                list.remove(*len).unwrap();
            });
        });
    }

    group.finish();
}

fn bench_get_by_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_by_index");
    let list = build_list::<NativeLock>(512);

    for index in [0usize, 255, 511] {
        group.bench_with_input(BenchmarkId::from_parameter(index), &index, |b, index| {
            let mut out = [0u8; 8];
            b.iter(|| list.get(black_box(*index), &mut out).unwrap());
        });
    }

    group.finish();
}

fn bench_len_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("len_traversal");

    for len in [16usize, 256, 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, len| {
            let list = build_list::<NativeLock>(*len);
            b.iter(|| list.len().unwrap());
        });
    }

    group.finish();
}

fn bench_backends(c: &mut Criterion) {
    let mut group = c.benchmark_group("backend_uncontended_get");

    let native = build_list::<NativeLock>(64);
    group.bench_function(BenchmarkId::from_parameter("native"), |b| {
        let mut out = [0u8; 8];
        b.iter(|| native.get(black_box(32), &mut out).unwrap());
    });

    let spin = build_list::<SpinLock>(64);
    group.bench_function(BenchmarkId::from_parameter("spin"), |b| {
        let mut out = [0u8; 8];
        b.iter(|| spin.get(black_box(32), &mut out).unwrap());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_push_tail,
    bench_get_by_index,
    bench_len_traversal,
    bench_backends
);
criterion_main!(benches);
