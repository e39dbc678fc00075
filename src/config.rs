//! 读取器配置
//!
//! 配置项与默认值保持最小化：除文件路径与列数外，其余字段都有合理默认值。

use std::path::PathBuf;

/// 默认读取缓冲区大小（字节）
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// 默认列分隔符
pub const DEFAULT_DELIMITER: u8 = b',';

/// CSV 并行读取配置
///
/// 调用 [`ParallelReader::read`](crate::ParallelReader::read) 之后配置不再变化。
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// CSV 文件路径
    pub file_path: PathBuf,
    /// 每条记录的字段数；0 表示以各工作线程解析到的首条记录为准
    pub columns_count: usize,
    /// 列分隔符（单字节），默认逗号
    pub columns_delimiter: u8,
    /// 首行是否为表头；表头行会被丢弃，不作为记录输出
    pub file_has_header: bool,
    /// 宽松引号模式：未加引号字段中的 `"` 按字面保留而不报错
    pub lazy_quotes: bool,
    /// 最大工作线程数，默认为逻辑 CPU 数；0 按 1 处理
    pub max_workers: usize,
    /// 每个工作线程的读取缓冲区大小（字节），默认 4096。
    /// 超过该长度的行会产生 buffer full 错误并终止所在工作线程。
    pub buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            file_path: PathBuf::new(),
            columns_count: 0,
            columns_delimiter: DEFAULT_DELIMITER,
            file_has_header: false,
            lazy_quotes: false,
            max_workers: num_cpus::get(),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl ReaderConfig {
    /// 创建一份指向给定文件、期望给定列数的配置，其余字段使用默认值
    pub fn new(file_path: impl Into<PathBuf>, columns_count: usize) -> Self {
        Self { file_path: file_path.into(), columns_count, ..Self::default() }
    }

    /// 文件基本名，用于日志输出
    #[cfg(feature = "logging")]
    pub(crate) fn file_name(&self) -> String {
        self.file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file_path.display().to_string())
    }
}
