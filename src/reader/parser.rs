//! 单行记录解析
//!
//! 每个工作线程持有自己的 `RowParser`，把一条物理行解析为一条记录。
//! 底层解析交给 csv 库；字段数和严格引号校验在这里补齐：csv 库不
//! 校验绝对字段数，而且对引号天然宽松（等价于宽松引号模式）。

use crate::config::ReaderConfig;
use crate::error::ReadError;
use crate::reader::line_reader::MIN_BUFFER_SIZE;
use crate::reader::Row;

/// 行级 CSV 解析器
pub struct RowParser {
    builder: csv::ReaderBuilder,
    // 跨行复用的记录缓冲，避免热路径上每行一次的分配
    record: csv::StringRecord,
    delimiter: u8,
    lazy_quotes: bool,
    // None 表示以解析到的首条记录的字段数为准
    expected_columns: Option<usize>,
}

impl RowParser {
    /// 按配置创建解析器
    pub fn new(config: &ReaderConfig) -> Self {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .delimiter(config.columns_delimiter)
            .has_headers(false)
            .flexible(true)
            // 行长不会超过读取缓冲区，csv 内部缓冲没必要更大
            .buffer_capacity(config.buffer_size.max(MIN_BUFFER_SIZE));
        Self {
            builder,
            record: csv::StringRecord::new(),
            delimiter: config.columns_delimiter,
            lazy_quotes: config.lazy_quotes,
            expected_columns: (config.columns_count > 0)
                .then_some(config.columns_count),
        }
    }

    /// 把一行（可含行终止符）解析为一条记录
    ///
    /// 记录持有自身的字段存储，消费方可以无限期保留。
    pub fn parse_line(&mut self, line: &[u8]) -> Result<Row, ReadError> {
        if !self.lazy_quotes {
            validate_quotes(line, self.delimiter)?;
        }

        self.record.clear();
        let mut reader = self.builder.from_reader(line);
        let has_record = reader.read_record(&mut self.record)?;
        if !has_record {
            // 空行：没有任何字段
            return Err(ReadError::FieldCount {
                expected: self.expected_columns.unwrap_or(1),
                found: 0,
            });
        }

        let expected = *self.expected_columns.get_or_insert(self.record.len());
        if self.record.len() != expected {
            return Err(ReadError::FieldCount {
                expected,
                found: self.record.len(),
            });
        }

        Ok(self.record.iter().map(str::to_string).collect())
    }
}

/// 严格引号校验。
///
/// 拒绝未加引号字段中的裸引号、未闭合的引号以及闭合引号后的多余
/// 字符；`""` 是引号字段内的转义引号。宽松引号模式下不调用。
fn validate_quotes(line: &[u8], delimiter: u8) -> Result<(), ReadError> {
    let mut s = line;
    if let [rest @ .., b'\n'] = s {
        s = rest;
    }
    if let [rest @ .., b'\r'] = s {
        s = rest;
    }

    let mut i = 0usize;
    loop {
        if s.get(i) == Some(&b'"') {
            // 引号字段：扫描到闭合引号
            i += 1;
            loop {
                match memchr::memchr(b'"', &s[i..]) {
                    None => return Err(ReadError::Quote),
                    Some(at) => {
                        let quote = i + at;
                        match s.get(quote + 1) {
                            // "" 为转义引号，仍在字段内
                            Some(&b'"') => i = quote + 2,
                            Some(&b) if b == delimiter => {
                                i = quote + 2;
                                break;
                            }
                            None => return Ok(()),
                            Some(_) => return Err(ReadError::Quote),
                        }
                    }
                }
            }
        } else {
            // 未加引号字段：扫描到分隔符，途中出现引号即为裸引号
            let mut j = i;
            loop {
                match s.get(j) {
                    None => return Ok(()),
                    Some(&b) if b == delimiter => {
                        i = j + 1;
                        break;
                    }
                    Some(&b'"') => {
                        return Err(ReadError::BareQuote { position: j })
                    }
                    Some(_) => j += 1,
                }
            }
        }
    }
}
