//! 保留行终止符的受限缓冲行读取器
//!
//! 偏移推进依赖每行的精确字节数，因此返回的行必须包含 `\n` 终止符；
//! 标准库中剥掉终止符或无限扩张缓冲的行读取原语都不满足要求。
//! 缓冲区大小固定：一行放不进缓冲区即产生 buffer full 错误。

use crate::error::ReadError;
use std::io::{ErrorKind, Read};

/// 缓冲区容量下限
pub(crate) const MIN_BUFFER_SIZE: usize = 16;

/// 逐行读取器，行内容含 `\n` 终止符
pub struct LineReader<R> {
    src: R,
    buf: Box<[u8]>,
    pos: usize,
    filled: usize,
    eof: bool,
}

impl<R: Read> LineReader<R> {
    /// 创建容量为 `capacity` 字节的行读取器，容量不足下限时取下限
    pub fn new(src: R, capacity: usize) -> Self {
        let capacity = capacity.max(MIN_BUFFER_SIZE);
        Self {
            src,
            buf: vec![0u8; capacity].into_boxed_slice(),
            pos: 0,
            filled: 0,
            eof: false,
        }
    }

    /// 读取下一物理行。
    ///
    /// 返回的切片包含 `\n` 终止符；文件末尾的未终止行按原样返回。
    /// 干净的文件结尾返回 `Ok(None)`；行长超过缓冲区容量返回
    /// [`ReadError::BufferFull`]。
    pub fn next_line(&mut self) -> Result<Option<&[u8]>, ReadError> {
        match self.advance()? {
            Some((start, end)) => Ok(Some(&self.buf[start..end])),
            None => Ok(None),
        }
    }

    // 推进游标并返回下一行在缓冲区中的下标范围
    fn advance(&mut self) -> Result<Option<(usize, usize)>, ReadError> {
        loop {
            if let Some(at) =
                memchr::memchr(b'\n', &self.buf[self.pos..self.filled])
            {
                let start = self.pos;
                self.pos += at + 1;
                return Ok(Some((start, self.pos)));
            }

            if self.eof {
                if self.pos == self.filled {
                    return Ok(None);
                }
                // 文件末尾的未终止行
                let span = (self.pos, self.filled);
                self.pos = self.filled;
                return Ok(Some(span));
            }

            // 把未消费的字节挪到缓冲区头部，腾出续读空间
            if self.pos > 0 {
                self.buf.copy_within(self.pos..self.filled, 0);
                self.filled -= self.pos;
                self.pos = 0;
            }
            if self.filled == self.buf.len() {
                return Err(ReadError::BufferFull { capacity: self.buf.len() });
            }

            match self.src.read(&mut self.buf[self.filled..]) {
                Ok(0) => self.eof = true,
                Ok(n) => self.filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(ReadError::Io(e)),
            }
        }
    }
}
