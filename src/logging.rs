//! 日志初始化模块
//!
//! 提供可选的日志初始化功能，使用 tracing 库。库本身只通过 tracing
//! 宏输出诊断事件；不安装订阅者时这些事件是空操作，由调用方决定
//! 是否以及如何收集。

use std::io;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, time::SystemTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// 日志配置结构体
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 日志级别
    pub level: Level,
}

impl LogConfig {
    /// 创建新的日志配置，使用默认级别
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置日志级别
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: Level::INFO }
    }
}

/// 日志初始化错误
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("IO错误: {0}")]
    Io(#[from] io::Error),
    #[error("日志初始化错误: {0}")]
    Init(String),
}

/// 日志初始化结果
pub type LogResult<T> = Result<T, LogError>;

/// 初始化日志系统
///
/// 输出到控制台和 logs 目录（按天滚动），级别可通过 `RUST_LOG`
/// 环境变量覆盖。重复初始化不视为错误。
///
/// # Examples
///
/// ```no_run
/// use parallel_csv::logging::{init_logging, LogConfig};
/// use tracing::Level;
///
/// init_logging(LogConfig::new().level(Level::DEBUG)).unwrap();
/// ```
pub fn init_logging(config: LogConfig) -> LogResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));

    let subscriber = Registry::default().with(env_filter);

    // 控制台输出层
    let console_layer = fmt::layer()
        .with_timer(SystemTime)
        .with_target(true)
        .with_thread_ids(true)
        .with_ansi(true);

    // 文件输出层，按天滚动
    let file_appender = tracing_appender::rolling::daily("logs", "parallel-csv");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_timer(SystemTime)
        .with_target(true)
        .with_thread_ids(true)
        .with_ansi(false);

    match subscriber.with(console_layer).with(file_layer).try_init() {
        Ok(_) => {
            // guard 不能丢弃，否则文件输出线程退出
            std::mem::forget(guard);
            Ok(())
        }
        // 已经初始化过，不视为错误
        Err(_) => Ok(()),
    }
}

/// 使用默认配置初始化日志系统
pub fn init_default_logging() -> LogResult<()> {
    init_logging(LogConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_builder() {
        let config = LogConfig::new().level(Level::TRACE);
        assert_eq!(config.level, Level::TRACE);
        assert_eq!(LogConfig::default().level, Level::INFO);
    }
}
