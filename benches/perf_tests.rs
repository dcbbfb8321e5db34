use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sample_logger::{SampleLogger, DEFAULT_TEXT_DELIMITER};
use tempfile::tempdir;

const ROWS: usize = 10_000;
const COLUMNS: usize = 8;

fn filled_logger() -> SampleLogger<f64> {
    let mut log = SampleLogger::<f64>::new();
    log.initialize_by_row_column(ROWS, COLUMNS).unwrap();
    for i in 0..ROWS * COLUMNS {
        log.log(i as f64 * 0.001).unwrap();
    }
    log
}

fn column_titles() -> Vec<String> {
    (0..COLUMNS).map(|i| format!("q{i}")).collect()
}

fn bench_append(c: &mut Criterion) {
    c.bench_function("append_80k_samples", |b| {
        b.iter(|| {
            let mut log = SampleLogger::<f64>::new();
            log.initialize_by_row_column(ROWS, COLUMNS).unwrap();
            for i in 0..ROWS * COLUMNS {
                log.log(black_box(i as f64)).unwrap();
            }
            log
        })
    });
}

fn bench_text_dump(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bench.csv");
    let log = filled_logger();

    c.bench_function("text_dump_80k_samples", |b| {
        b.iter(|| log.dump_to_text_file(&path, DEFAULT_TEXT_DELIMITER).unwrap())
    });
}

fn bench_binary_dump(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bench.bin");
    let log = filled_logger();
    let titles = column_titles();

    c.bench_function("binary_dump_80k_samples", |b| {
        b.iter(|| log.dump_to_bin_file(&path, &titles).unwrap())
    });
}

fn bench_binary_load(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bench.bin");
    filled_logger().dump_to_bin_file(&path, &column_titles()).unwrap();

    c.bench_function("binary_load_80k_samples", |b| {
        b.iter(|| {
            let mut log = SampleLogger::<f64>::new();
            log.load_from_bin_file(&path).unwrap();
            log
        })
    });
}

criterion_group!(
    benches,
    bench_append,
    bench_text_dump,
    bench_binary_dump,
    bench_binary_load
);
criterion_main!(benches);
