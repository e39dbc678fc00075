//! 协作式取消令牌
//!
//! 工作线程在每行循环开头检查取消标志；阻塞在记录通道上的发送通过
//! `select!` 观察到取消通道断开后被唤醒。令牌可克隆，克隆共享同一状态。

use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// 取消令牌
///
/// `cancel` 之后所有克隆的 `is_cancelled` 都返回 `true`，
/// 并且所有通过 [`observer`](CancelToken::observer) 获取的接收端都会断开。
#[derive(Debug, Clone)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    flag: AtomicBool,
    // cancel 时丢弃发送端，使全部接收端观察到断开
    guard: Mutex<Option<Sender<()>>>,
    observer: Receiver<()>,
}

impl CancelToken {
    /// 创建一个未取消的令牌
    pub fn new() -> Self {
        let (tx, rx) = bounded::<()>(0);
        Self {
            inner: Arc::new(Inner {
                flag: AtomicBool::new(false),
                guard: Mutex::new(Some(tx)),
                observer: rx,
            }),
        }
    }

    /// 触发取消，幂等
    pub fn cancel(&self) {
        self.inner.flag.store(true, Ordering::SeqCst);
        if let Ok(mut guard) = self.inner.guard.lock() {
            guard.take();
        }
    }

    /// 是否已取消
    pub fn is_cancelled(&self) -> bool {
        self.inner.flag.load(Ordering::SeqCst)
    }

    /// 取消观察通道：永远收不到消息，取消后断开
    pub(crate) fn observer(&self) -> &Receiver<()> {
        &self.inner.observer
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
