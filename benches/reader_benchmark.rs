//! 并行读取与单线程基线的性能对比
//!
//! 基线一：csv 库一次性读入全部记录；基线二：csv 库逐条读取。
//! 每种策略都对记录做一次轻量"消费"，模拟下游处理成本。

#![allow(clippy::uninlined_format_args)]
use criterion::{criterion_group, criterion_main, Criterion};
use parallel_csv::{CancelToken, ParallelReader, ReaderConfig};
use std::fs::File;
use std::hint::black_box;
use std::io::Write;
use std::thread;
use std::time::Duration;

const ROWS: u64 = 50_000;
const DESCRIPTION: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Nunc eleifend felis quis magna auctor, ut lacinia eros efficitur. Maecenas mattis dolor a pharetra gravida. Aenean at eros sed metus posuere feugiat in vitae libero. Morbi a diam volutpat, tempor lacus sed, sagittis velit. Donec eget dignissim mauris, sed aliquam ex. Duis eros dolor, vestibulum ac aliquam eget, viverra in enim. Aenean ut turpis quis purus porta lobortis. Etiam sollicitudin lectus vitae velit tincidunt, ut volutpat justo aliquam.";

fn write_products_file(rows: u64, path: &std::path::Path) {
    let mut file = File::create(path).unwrap();
    for id in 1..=rows {
        writeln!(file, "{id},Product_{id},\"{DESCRIPTION}\",150.99,35").unwrap();
    }
}

// 模拟对单条记录的下游处理
fn process_row(row: &[String]) {
    black_box(row.iter().map(String::len).sum::<usize>());
}

fn bench_readers(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bench_products.csv");
    write_products_file(ROWS, &path);

    let mut group = c.benchmark_group("read_50k_rows");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(20));

    group.bench_function("parallel_csv_8_workers", |b| {
        b.iter(|| {
            let mut config = ReaderConfig::new(&path, 5);
            config.max_workers = 8;
            let reader = ParallelReader::new(config);
            let (rows_chans, errs_chan) = reader.read(&CancelToken::new());

            let mut consumers = Vec::with_capacity(rows_chans.len());
            for rows in rows_chans {
                consumers.push(thread::spawn(move || {
                    let mut count = 0u64;
                    for row in rows.iter() {
                        process_row(&row);
                        count += 1;
                    }
                    count
                }));
            }
            if let Some(err) = errs_chan.iter().next() {
                panic!("基准文件不应产生错误: {err}");
            }
            let count: u64 =
                consumers.into_iter().map(|c| c.join().unwrap()).sum();
            assert_eq!(count, ROWS);
        })
    });

    group.bench_function("csv_crate_read_all", |b| {
        b.iter(|| {
            let file = File::open(&path).unwrap();
            let mut reader = csv::ReaderBuilder::new()
                .has_headers(false)
                .from_reader(file);
            let mut count = 0u64;
            for result in reader.records() {
                let record = result.unwrap();
                let row: Vec<String> =
                    record.iter().map(str::to_string).collect();
                process_row(&row);
                count += 1;
            }
            assert_eq!(count, ROWS);
        })
    });

    group.bench_function("csv_crate_read_one_by_one", |b| {
        b.iter(|| {
            let file = File::open(&path).unwrap();
            let mut reader = csv::ReaderBuilder::new()
                .has_headers(false)
                .from_reader(file);
            let mut record = csv::StringRecord::new();
            let mut count = 0u64;
            while reader.read_record(&mut record).unwrap() {
                let row: Vec<String> =
                    record.iter().map(str::to_string).collect();
                process_row(&row);
                count += 1;
            }
            assert_eq!(count, ROWS);
        })
    });

    group.finish();
}

criterion_group!(benches, bench_readers);
criterion_main!(benches);
