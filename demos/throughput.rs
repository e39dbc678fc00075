//! 吞吐测量程序，便于配合外部性能分析工具使用
//!
//! 运行: `cargo run --release --example throughput [行数] [线程数]`

use parallel_csv::{CancelToken, ParallelReader, ReaderConfig};
use std::io::Write;
use std::thread;
use std::time::Instant;

const DESCRIPTION: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Nunc eleifend felis quis magna auctor, ut lacinia eros efficitur. Maecenas mattis dolor a pharetra gravida. Aenean at eros sed metus posuere feugiat in vitae libero.";

fn main() {
    let mut args = std::env::args().skip(1);
    let rows: u64 = args
        .next()
        .and_then(|v| v.parse().ok())
        .unwrap_or(50_000);
    let workers: usize = args
        .next()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8);

    println!("生成 {rows} 行测试文件...");
    let mut file = tempfile::NamedTempFile::new().expect("创建临时文件失败");
    for id in 1..=rows {
        writeln!(file, "{id},Product_{id},\"{DESCRIPTION}\",150.99,35")
            .expect("写入失败");
    }
    file.flush().expect("刷新失败");
    let file_size = file.as_file().metadata().expect("读取文件信息失败").len();

    let mut config = ReaderConfig::new(file.path(), 5);
    config.max_workers = workers;
    let reader = ParallelReader::new(config);

    let start = Instant::now();
    let (rows_chans, errs_chan) = reader.read(&CancelToken::new());

    let mut consumers = Vec::with_capacity(rows_chans.len());
    for rows_chan in rows_chans {
        consumers.push(thread::spawn(move || rows_chan.iter().count() as u64));
    }
    let error_count = errs_chan.iter().count();
    let total: u64 = consumers
        .into_iter()
        .map(|c| c.join().expect("消费线程异常退出"))
        .sum();
    let elapsed = start.elapsed();

    let mib = file_size as f64 / (1024.0 * 1024.0);
    println!(
        "{total} 条记录 ({mib:.1} MiB), {workers} 线程, {error_count} 个错误, 耗时 {elapsed:.2?}, {:.0} 行/秒",
        total as f64 / elapsed.as_secs_f64()
    );
}
