//! 区间读取工作线程
//!
//! 每个工作线程持有独立的文件句柄、行读取器和解析器，只与其他线程
//! 共享错误通道。线程从区间起点对齐到记录边界后逐行读取，直到消费
//! 完第一条起始偏移越过区间终点的记录为止（越界读取保证跨边界的
//! 记录恰好被起点所在区间的线程输出一次）。

use crate::cancel::CancelToken;
use crate::config::ReaderConfig;
use crate::error::ReadError;
use crate::reader::line_reader::LineReader;
use crate::reader::parser::RowParser;
use crate::reader::planner::ByteRange;
use crate::reader::Row;
use crossbeam_channel::{select, Receiver, Sender};
use std::fs::File;
use std::io::{Seek, SeekFrom};
use std::sync::Arc;

/// 工作线程上下文
pub(crate) struct WorkerContext {
    /// 负责的字节区间
    pub range: ByteRange,
    /// 线程序号，从 1 开始
    pub index: usize,
    pub config: Arc<ReaderConfig>,
    /// 本线程独占的记录输出端
    pub rows_tx: Sender<Row>,
    /// 全部线程共享的错误输出端
    pub errs_tx: Sender<ReadError>,
    pub cancel: CancelToken,
}

/// 读取并输出一个字节区间内的全部记录
pub(crate) fn read_range(ctx: WorkerContext) {
    let WorkerContext { range, index, config, rows_tx, errs_tx, cancel } = ctx;
    let cancel_observer = cancel.observer().clone();

    let mut file = match File::open(&config.file_path) {
        Ok(file) => file,
        Err(e) => {
            #[cfg(feature = "logging")]
            tracing::error!(
                file = %config.file_name(),
                worker = index,
                error = %e,
                "无法打开文件"
            );
            if !publish_error(&errs_tx, &cancel_observer, ReadError::Io(e)) {
                let _ = errs_tx.send(ReadError::Cancelled);
            }
            return;
        }
    };
    if let Err(e) = file.seek(SeekFrom::Start(range.start)) {
        #[cfg(feature = "logging")]
        tracing::error!(
            file = %config.file_name(),
            worker = index,
            error = %e,
            "定位区间起点失败"
        );
        if !publish_error(&errs_tx, &cancel_observer, ReadError::Io(e)) {
            let _ = errs_tx.send(ReadError::Cancelled);
        }
        return;
    }

    let mut reader = LineReader::new(file, config.buffer_size);
    let mut parser = RowParser::new(&config);

    // 区间起点对齐：首个线程从字节 0 开始即是记录边界（除非有表头），
    // 其余线程起点落在上一区间的残行中，丢弃该行对齐到下一条记录。
    let mut discarded = 0u64;
    if index != 1 || config.file_has_header {
        match reader.next_line() {
            Ok(Some(line)) => discarded = line.len() as u64,
            Ok(None) => return,
            Err(e) => {
                if !publish_read_failure(
                    &errs_tx,
                    &cancel_observer,
                    &config,
                    index,
                    range.start,
                    e,
                ) {
                    let _ = errs_tx.send(ReadError::Cancelled);
                }
                return;
            }
        }
    }
    let real_start = range.start + discarded;
    let mut offset = real_start;

    loop {
        if cancel.is_cancelled() {
            let _ = errs_tx.send(ReadError::Cancelled);
            return;
        }

        let line = match reader.next_line() {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                if !publish_read_failure(
                    &errs_tx,
                    &cancel_observer,
                    &config,
                    index,
                    offset,
                    e,
                ) {
                    let _ = errs_tx.send(ReadError::Cancelled);
                    return;
                }
                break;
            }
        };
        let line_len = line.len() as u64;

        match parser.parse_line(line) {
            Ok(row) => {
                // 输出端已满时在此阻塞，同时保持对取消的观察
                select! {
                    send(rows_tx, row) -> result => {
                        if result.is_err() {
                            // 消费端已全部关闭
                            return;
                        }
                    }
                    recv(cancel_observer) -> _ => {
                        let _ = errs_tx.send(ReadError::Cancelled);
                        return;
                    }
                }
            }
            Err(e) => {
                #[cfg(feature = "logging")]
                tracing::error!(
                    file = %config.file_name(),
                    worker = index,
                    offset,
                    error = %e,
                    "记录解析失败"
                );
                if !publish_error(&errs_tx, &cancel_observer, e) {
                    let _ = errs_tx.send(ReadError::Cancelled);
                    return;
                }
            }
        }

        offset += line_len;
        if offset - 1 > range.end {
            // 后续记录归下一个线程处理
            break;
        }
    }

    #[cfg(feature = "logging")]
    tracing::debug!(
        file = %config.file_name(),
        worker = index,
        offset_start = range.start,
        offset_end = range.end,
        real_offset_start = real_start,
        real_offset_end = offset.saturating_sub(1),
        bytes = offset - real_start,
        "区间读取完成"
    );
}

#[cfg_attr(not(feature = "logging"), allow(unused_variables))]
fn publish_read_failure(
    errs_tx: &Sender<ReadError>,
    cancel_observer: &Receiver<()>,
    config: &ReaderConfig,
    index: usize,
    offset: u64,
    err: ReadError,
) -> bool {
    #[cfg(feature = "logging")]
    tracing::error!(
        file = %config.file_name(),
        worker = index,
        offset,
        error = %err,
        "读取行失败"
    );
    publish_error(errs_tx, cancel_observer, err)
}

/// 向错误通道发送一条错误，阻塞期间保持对取消的观察。
///
/// 返回 `false` 表示发送期间观察到取消，该错误被放弃，
/// 调用方应上报取消原因后退出；消费端关闭导致的发送失败不算取消。
fn publish_error(
    errs_tx: &Sender<ReadError>,
    cancel_observer: &Receiver<()>,
    err: ReadError,
) -> bool {
    select! {
        send(errs_tx, err) -> _result => true,
        recv(cancel_observer) -> _ => false,
    }
}
