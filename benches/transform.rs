use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use citibike_loader::indexing::{BatchIndexer, NdjsonSink, build_add_message};
use citibike_loader::ingestion::transform_line;

fn trip_line(n: usize) -> String {
    format!(
        r#""{d}","2013-07-01 00:00:00","2013-07-01 00:10:34","{n}","E 47 St & 2 Ave","40.75323098","-73.97032517","504","1 Ave & E 15 St","40.73221853","-73.98165557","16950","Customer","\N","0""#,
        d = 300 + n % 1000
    )
}

fn bench_transform(c: &mut Criterion) {
    let line = trip_line(164);
    c.bench_function("transform_line", |b| {
        b.iter(|| transform_line(2, black_box(&line)).unwrap())
    });

    let docs: Vec<_> = (0..1_000)
        .map(|n| transform_line(n as u64, &trip_line(n)).unwrap().unwrap())
        .collect();
    c.bench_function("build_add_message_1k", |b| {
        b.iter(|| build_add_message(black_box(&docs)))
    });

    let lines: Vec<String> = (0..10_000).map(trip_line).collect();
    c.bench_function("ingest_10k_lines_to_ndjson", |b| {
        b.iter(|| {
            BatchIndexer::new(NdjsonSink::new(std::io::sink()), 1_000)
                .unwrap()
                .ingest_lines(black_box(&lines))
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_transform);
criterion_main!(benches);
