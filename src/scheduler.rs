//! tokioによる遅延実行

use crate::error::{ClinicMapError, Result};
use clinic_map_common::{Scheduler, TimerHandle};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// 遅延タスクを指定ランタイムで動かす
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// 呼び出し元のランタイムを使う。ランタイム外ならエラー
    pub fn current() -> Result<Self> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|e| ClinicMapError::Runtime(e.to_string()))
    }
}

#[derive(Debug)]
pub struct TokioTimer(JoinHandle<()>);

impl TimerHandle for TokioTimer {
    fn cancel(self) {
        self.0.abort();
    }
}

impl Scheduler for TokioScheduler {
    type Handle = TokioTimer;

    fn schedule<F>(&self, delay: Duration, task: F) -> TokioTimer
    where
        F: FnOnce() + Send + 'static,
    {
        TokioTimer(self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        }))
    }
}
