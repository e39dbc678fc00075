//! CSV 并行读取模块
//!
//! 提供字节区间规划、行读取、记录解析与并行协调功能

pub mod line_reader;
pub mod parallel;
pub mod parser;
pub mod planner;

pub(crate) mod worker;

// 重新导出核心类型
pub use parallel::{ParallelReader, CHAN_CAPACITY, MIN_BYTES_PER_WORKER};
pub use parser::RowParser;
pub use planner::{split_byte_ranges, ByteRange};

use crate::error::ReadError;

/// 单条 CSV 记录，持有自身的字段存储
pub type Row = Vec<String>;

/// 记录接收通道，每个工作线程对应一个，缓冲 256 条
pub type RowsChan = crossbeam_channel::Receiver<Row>;

/// 错误接收通道，全部工作线程共享，缓冲 256 条
pub type ErrsChan = crossbeam_channel::Receiver<ReadError>;
