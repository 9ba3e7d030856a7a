use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use common::types::Record;
use service::{CallContext, JsonRecordFile, RecordService, RecordStore};

// Every operation rereads (and for writes rewrites) the whole file, so cost
// grows linearly with the record count.
fn bench_get_by_size(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("record_store_get");

    for size in [10usize, 100, 1000] {
        let tmp = std::env::temp_dir().join(format!("bench_records_{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&tmp, b"").unwrap();
        let store = RecordService::new(JsonRecordFile::new(&tmp));
        let ctx = CallContext::new();
        rt.block_on(async {
            for i in 0..size {
                store.put(&ctx, Record::new(format!("n{i}"), format!("https://{i}.example"))).await.unwrap();
            }
        });
        let last = format!("n{}", size - 1);

        group.bench_with_input(BenchmarkId::from_parameter(size), &last, |b, name| {
            b.to_async(&rt).iter(|| store.get(&ctx, name));
        });
        let _ = std::fs::remove_file(&tmp);
    }
    group.finish();
}

criterion_group!(benches, bench_get_by_size);
criterion_main!(benches);
