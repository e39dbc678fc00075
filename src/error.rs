//! 错误类型定义
//!
//! 这个模块定义了库中使用的所有错误类型，使用 thiserror 提供丰富的错误信息。
//! 读取过程中产生的错误不会中断其他工作线程，而是统一通过错误通道上报。

use std::io;
use thiserror::Error;

/// 并行读取器的结果类型
pub type Result<T> = std::result::Result<T, ReadError>;

/// CSV 并行读取错误类型
#[derive(Debug, Error)]
pub enum ReadError {
    /// IO 错误（获取文件信息、打开、定位、读取）
    #[error("IO错误: {0}")]
    Io(#[from] io::Error),

    /// 文件为空
    #[error("CSV 文件为空")]
    EmptyFile,

    /// 行长度超过读取缓冲区容量 (buffer full)
    #[error("读取缓冲区已满 (buffer full): 行长度超过 {capacity} 字节")]
    BufferFull { capacity: usize },

    /// 底层 CSV 解析错误
    #[error("CSV解析错误: {0}")]
    Csv(#[from] csv::Error),

    /// 记录字段数与期望不符
    #[error("字段数错误: 期望 {expected} 个字段, 实际 {found} 个")]
    FieldCount { expected: usize, found: usize },

    /// 未加引号的字段中出现裸引号（严格引号模式）
    #[error("引号错误: 第 {position} 字节处未加引号的字段中出现引号")]
    BareQuote { position: usize },

    /// 引号未闭合，或闭合引号后存在多余字符（严格引号模式）
    #[error("引号错误: 引号未闭合或闭合引号后存在多余字符")]
    Quote,

    /// 读取被取消
    #[error("读取已取消")]
    Cancelled,
}

impl ReadError {
    /// 检查是否为 IO 错误
    pub fn is_io_error(&self) -> bool {
        matches!(self, ReadError::Io(_))
    }

    /// 检查是否为空文件错误
    pub fn is_empty_file(&self) -> bool {
        matches!(self, ReadError::EmptyFile)
    }

    /// 检查是否为单条记录的解析错误（此类错误只跳过该行，不终止工作线程）
    pub fn is_row_error(&self) -> bool {
        matches!(
            self,
            ReadError::Csv(_)
                | ReadError::FieldCount { .. }
                | ReadError::BareQuote { .. }
                | ReadError::Quote
        )
    }

    /// 检查是否为取消错误
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ReadError::Cancelled)
    }
}
