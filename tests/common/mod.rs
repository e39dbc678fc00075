//! 测试共用工具
#![allow(dead_code)]

use parallel_csv::{ErrsChan, ReadError, Row, RowsChan};
use std::io::Write;
use std::thread;
use tempfile::NamedTempFile;

/// 产品名前缀，完整名为 `Product_<id>`
pub const COL_NAME_PREFIX: &str = "Product_";

/// 产品描述列的固定内容，让每行体量接近真实数据
pub const COL_DESCRIPTION: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Nunc eleifend felis quis magna auctor, ut lacinia eros efficitur. Maecenas mattis dolor a pharetra gravida. Aenean at eros sed metus posuere feugiat in vitae libero. Morbi a diam volutpat, tempor lacus sed, sagittis velit. Donec eget dignissim mauris, sed aliquam ex. Duis eros dolor, vestibulum ac aliquam eget, viverra in enim. Aenean ut turpis quis purus porta lobortis. Etiam sollicitudin lectus vitae velit tincidunt, ut volutpat justo aliquam. Aenean vitae vehicula arcu. Interdum et malesuada fames ac ante ipsum primis in faucibus. Nunc viverra enim nec risus mollis elementum nec dictum ex. Nunc lorem eros, vulputate a rutrum nec, scelerisque non augue. Sed in egestas eros. Quisque felis lorem, vehicula ac venenatis vel, tristique id sapien. Morbi vitae odio eget orci facilisis suscipit. Cras sodales, augue vitae tincidunt tempus, diam turpis volutpat est, vitae fringilla augue leo semper augue. Integer scelerisque tempor mauris, ac posuere sem aenean";

/// 产品价格列的固定内容
pub const COL_PRICE: &str = "150.99";

/// 产品库存列的固定内容
pub const COL_STOCK: &str = "35";

/// 按给定内容创建临时 CSV 文件
pub fn write_csv_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("创建临时文件失败");
    file.write_all(content.as_bytes()).expect("写入测试内容失败");
    file.flush().expect("刷新临时文件失败");
    file
}

/// 生成 `rows` 行产品数据文件，行格式：
/// `<id>,Product_<id>,"<lorem>",150.99,35\n`，id 从 1 递增
pub fn generate_products_file(rows: u64) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("创建临时文件失败");
    for id in 1..=rows {
        writeln!(
            file,
            "{id},{COL_NAME_PREFIX}{id},\"{COL_DESCRIPTION}\",{COL_PRICE},{COL_STOCK}"
        )
        .expect("写入测试行失败");
    }
    file.flush().expect("刷新临时文件失败");
    file
}

/// 汇聚全部记录通道和错误通道。
///
/// 先为每个记录通道启动消费线程，再在当前线程排空错误通道，
/// 与工作线程的有界输出并发进行，避免互相阻塞。
pub fn gather(
    rows_chans: Vec<RowsChan>,
    errs_chan: ErrsChan,
) -> (Vec<Row>, Vec<ReadError>) {
    let mut consumers = Vec::with_capacity(rows_chans.len());
    for rows in rows_chans {
        consumers.push(thread::spawn(move || rows.iter().collect::<Vec<Row>>()));
    }

    let errors: Vec<ReadError> = errs_chan.iter().collect();

    let mut records = Vec::new();
    for consumer in consumers {
        records.extend(consumer.join().expect("消费线程异常退出"));
    }
    (records, errors)
}
