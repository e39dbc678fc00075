//! 字节区间规划
//!
//! 把文件按字节切分为若干连续区间，每个区间交给一个工作线程处理。
//! 规划只做纯算术，不接触文件本身。

/// 单个工作线程负责的闭区间字节范围 `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// 区间起始偏移（含）
    pub start: u64,
    /// 区间结束偏移（含）
    pub end: u64,
}

impl ByteRange {
    /// 创建闭区间 `[start, end]`
    pub fn new(start: u64, end: u64) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// 区间包含的字节数
    pub fn bytes(&self) -> u64 {
        self.end - self.start + 1
    }
}

/// 计算工作线程数量及各自负责的字节区间。
///
/// - `total_bytes`：待处理的总字节数；0 时返回空结果（无事可做）。
/// - `max_workers`：工作线程数上限；0 按 1 处理。
/// - `min_bytes_per_worker`：单个线程值得处理的最小字节数；0 按 1 处理。
///
/// 返回的区间恰好覆盖 `[0, total_bytes - 1]`，互不重叠，数量不超过
/// `max_workers`；除最后一个区间外每个区间字节数相同，余数并入最后
/// 一个区间。
pub fn split_byte_ranges(
    total_bytes: u64,
    max_workers: usize,
    min_bytes_per_worker: u64,
) -> Vec<ByteRange> {
    if total_bytes == 0 {
        return Vec::new();
    }
    let min_bytes = min_bytes_per_worker.max(1);
    let max_workers = max_workers.max(1) as u64;

    // 总量不超过单线程最小值时只安排一个线程
    if total_bytes <= min_bytes {
        return vec![ByteRange::new(0, total_bytes - 1)];
    }

    let mut workers = total_bytes / min_bytes;
    if workers == 1 {
        return vec![ByteRange::new(0, total_bytes - 1)];
    }
    if workers > max_workers {
        workers = max_workers;
    }

    let step = total_bytes / workers;
    let mut ranges = Vec::with_capacity(workers as usize);
    let mut start = 0u64;
    let mut end = step - 1;
    for _ in 0..workers - 1 {
        ranges.push(ByteRange::new(start, end));
        start = end + 1;
        end += step;
    }
    // 最后一个区间吸收整除余数
    ranges.push(ByteRange::new(start, total_bytes - 1));

    ranges
}
