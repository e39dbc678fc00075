//! 并行读取协调器
//!
//! 负责校验输入、规划字节区间、创建输出通道并启动工作线程；
//! 另起一个监督线程等待全部工作线程结束后统一关闭所有通道。

use crate::cancel::CancelToken;
use crate::config::ReaderConfig;
use crate::error::{ReadError, Result};
use crate::reader::planner::split_byte_ranges;
use crate::reader::worker::{self, WorkerContext};
use crate::reader::{ErrsChan, RowsChan};
use crossbeam_channel::bounded;
use std::fs;
use std::sync::Arc;
use std::thread;

/// 记录通道与错误通道的缓冲容量
pub const CHAN_CAPACITY: usize = 256;

/// 单个工作线程值得处理的最小字节数；低于此值多开线程没有收益
pub const MIN_BYTES_PER_WORKER: u64 = 2048;

/// CSV 并行读取器
///
/// 把文件切分为连续字节区间并发解析，每个工作线程有独立的记录输出
/// 通道，错误统一走共享的错误通道。记录在单个通道内保持文件顺序，
/// 跨通道不保证任何顺序。
#[derive(Debug, Clone)]
pub struct ParallelReader {
    config: Arc<ReaderConfig>,
}

impl ParallelReader {
    /// 用给定配置创建读取器
    pub fn new(config: ReaderConfig) -> Self {
        Self { config: Arc::new(config) }
    }

    /// 当前配置
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// 启动并行读取。
    ///
    /// 返回每个工作线程的记录通道和共享的错误通道，随后调用方与工作
    /// 线程并发消费。全部通道在所有工作线程结束后关闭恰好一次；启动
    /// 前的致命错误（文件不存在、文件为空）会在关闭前的错误通道上
    /// 出现恰好一次，此时记录通道列表为空。
    pub fn read(&self, cancel: &CancelToken) -> (Vec<RowsChan>, ErrsChan) {
        #[cfg(feature = "logging")]
        tracing::debug!(
            file = %self.config.file_name(),
            columns_count = self.config.columns_count,
            file_has_header = self.config.file_has_header,
            max_workers = self.config.max_workers,
            "开始读取文件"
        );

        let (errs_tx, errs_rx) = bounded(CHAN_CAPACITY);

        let file_size = match self.file_size() {
            Ok(size) => size,
            Err(e) => {
                #[cfg(feature = "logging")]
                tracing::error!(
                    file = %self.config.file_name(),
                    error = %e,
                    "无法获取文件大小"
                );
                let _ = errs_tx.send(e);
                // errs_tx 在此离开作用域，通道随之关闭
                return (Vec::new(), errs_rx);
            }
        };

        let ranges = split_byte_ranges(
            file_size,
            self.config.max_workers,
            MIN_BYTES_PER_WORKER,
        );
        #[cfg(feature = "logging")]
        tracing::debug!(
            file = %self.config.file_name(),
            file_size,
            total_workers = ranges.len(),
            ranges = ?ranges,
            "字节区间分配完成"
        );

        let mut rows_rxs = Vec::with_capacity(ranges.len());
        let mut rows_txs = Vec::with_capacity(ranges.len());
        let mut handles = Vec::with_capacity(ranges.len());

        for (i, range) in ranges.into_iter().enumerate() {
            let (rows_tx, rows_rx) = bounded(CHAN_CAPACITY);
            rows_rxs.push(rows_rx);

            let context = WorkerContext {
                range,
                index: i + 1,
                config: Arc::clone(&self.config),
                rows_tx: rows_tx.clone(),
                errs_tx: errs_tx.clone(),
                cancel: cancel.clone(),
            };
            rows_txs.push(rows_tx);
            handles.push(thread::spawn(move || worker::read_range(context)));
        }

        // 监督线程：保留每个通道的一个发送端，等全部工作线程结束后
        // 一并丢弃，保证通道在所有线程终止后关闭恰好一次
        #[cfg(feature = "logging")]
        let file_name = self.config.file_name();
        thread::spawn(move || {
            for handle in handles {
                let _ = handle.join();
            }
            drop(rows_txs);
            drop(errs_tx);
            #[cfg(feature = "logging")]
            tracing::debug!(file = %file_name, "文件读取完成");
        });

        (rows_rxs, errs_rx)
    }

    fn file_size(&self) -> Result<u64> {
        let metadata = fs::metadata(&self.config.file_path)?;
        let size = metadata.len();
        if size == 0 {
            return Err(ReadError::EmptyFile);
        }
        Ok(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(CHAN_CAPACITY, 256);
        assert_eq!(MIN_BYTES_PER_WORKER, 2048);
    }

    #[test]
    fn test_missing_file_yields_single_error() {
        let reader = ParallelReader::new(ReaderConfig::new(
            "this_file_does_not_exist.csv",
            3,
        ));
        assert_eq!(reader.config().columns_count, 3);

        let cancel = CancelToken::new();
        let (rows_chans, errs_chan) = reader.read(&cancel);
        assert!(rows_chans.is_empty());
        let errors: Vec<_> = errs_chan.iter().collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].is_io_error());
    }
}
