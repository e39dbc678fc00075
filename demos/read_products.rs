//! 并行读取演示：生成一份产品数据文件，多线程读取并统计
//!
//! 运行: `cargo run --example read_products`

use parallel_csv::{CancelToken, ParallelReader, ReaderConfig};
use std::io::Write;
use std::thread;

const ROWS: u64 = 10_000;

fn main() {
    parallel_csv::logging::init_default_logging().ok();

    let mut file = tempfile::NamedTempFile::new().expect("创建临时文件失败");
    for id in 1..=ROWS {
        writeln!(file, "{id},Product_{id},\"样例描述文本\",150.99,35")
            .expect("写入失败");
    }
    file.flush().expect("刷新失败");

    let mut config = ReaderConfig::new(file.path(), 5);
    config.max_workers = 4;

    let reader = ParallelReader::new(config);
    let cancel = CancelToken::new();
    let (rows_chans, errs_chan) = reader.read(&cancel);

    // 每个记录通道一个消费线程，统计记录数与 id 之和
    let mut consumers = Vec::with_capacity(rows_chans.len());
    for (i, rows) in rows_chans.into_iter().enumerate() {
        consumers.push(thread::spawn(move || {
            let mut count = 0u64;
            let mut sum = 0u64;
            for row in rows.iter() {
                count += 1;
                sum += row[0].parse::<u64>().unwrap_or(0);
            }
            println!("通道 {} 收到 {count} 条记录", i + 1);
            (count, sum)
        }));
    }

    let mut error_count = 0u64;
    for err in errs_chan.iter() {
        eprintln!("读取错误: {err}");
        error_count += 1;
    }

    let mut total = 0u64;
    let mut sum = 0u64;
    for consumer in consumers {
        let (count, ids) = consumer.join().expect("消费线程异常退出");
        total += count;
        sum += ids;
    }

    println!("共 {total} 条记录, {error_count} 个错误, id 之和 {sum}");
    assert_eq!(total, ROWS);
    assert_eq!(sum, ROWS * (ROWS + 1) / 2);
}
