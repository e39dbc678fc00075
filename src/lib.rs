//! # 大型 CSV 文件并行读取库
//!
//! 针对"必须逐条读取大文件并对每条记录做非平凡处理"的场景，把单个
//! CSV 文件按字节切分为连续区间，由多个工作线程并发解析，缩短整体
//! 耗时。每个工作线程把解析出的记录写入自己的有界通道，消费端因此
//! 也可以并行处理；错误统一经共享的有界错误通道上报。
//!
//! ## 功能特性
//!
//! - 字节区间自动规划，线程数不超过配置上限
//! - 跨区间边界的记录恰好输出一次（区间起点对齐 + 越界读取）
//! - 记录通道与错误通道均为有界通道（容量 256），自带背压
//! - 协作式取消：每行循环与阻塞发送处都能观察到取消
//! - 单条记录的解析错误只跳过该行，不影响其他记录和线程
//!
//! ## 快速开始
//!
//! ```no_run
//! use parallel_csv::{CancelToken, ParallelReader, ReaderConfig};
//! use std::thread;
//!
//! let mut config = ReaderConfig::new("data/products.csv", 5);
//! config.max_workers = 8;
//!
//! let reader = ParallelReader::new(config);
//! let cancel = CancelToken::new();
//! let (rows_chans, errs_chan) = reader.read(&cancel);
//!
//! // 每个记录通道交给一个消费线程
//! let mut consumers = Vec::new();
//! for rows in rows_chans {
//!     consumers.push(thread::spawn(move || {
//!         for row in rows.iter() {
//!             println!("{row:?}");
//!         }
//!     }));
//! }
//! for err in errs_chan.iter() {
//!     eprintln!("读取错误: {err}");
//! }
//! for consumer in consumers {
//!     let _ = consumer.join();
//! }
//! ```
//!
//! ## 已知限制
//!
//! 不支持跨物理行的引号字段：区间切分以 `\n` 为记录边界，引号字段
//! 内的换行会被当作记录结束。另外不支持远程输入源，也不保证不同
//! 记录通道之间的输出顺序。
//!
//! ## 模块结构
//!
//! - [`error`] - 错误类型定义
//! - [`config`] - 读取器配置
//! - [`cancel`] - 协作式取消令牌
//! - [`reader`] - 并行读取核心
//!   - [`planner`](reader::planner) - 字节区间规划
//!   - [`line_reader`](reader::line_reader) - 保留终止符的行读取
//!   - [`parser`](reader::parser) - 单行记录解析
//!   - [`parallel`](reader::parallel) - 并行协调器
//! - [`logging`] - 日志初始化（需要 `logging` feature）

pub mod cancel;
pub mod config;
pub mod error;
#[cfg(feature = "logging")]
pub mod logging;
pub mod reader;

// 重新导出常用类型
pub use cancel::CancelToken;
pub use config::ReaderConfig;
pub use error::{ReadError, Result};
pub use reader::{ErrsChan, ParallelReader, Row, RowsChan};

/// 库版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 库名称
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// 预导入模块
///
/// 包含了最常用的类型，方便快速开始使用。
///
/// ```no_run
/// use parallel_csv::prelude::*;
/// ```
pub mod prelude {
    pub use crate::cancel::CancelToken;
    pub use crate::config::ReaderConfig;
    pub use crate::error::{ReadError, Result};
    pub use crate::reader::{
        ByteRange, ErrsChan, ParallelReader, Row, RowsChan,
    };
}
