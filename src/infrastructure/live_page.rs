//! 页面表面 - 基础设施层
//!
//! 监控器只通过 [`PageSurface`] 接触页面：取快照、读信号、显示通知。

use std::future::Future;

use tracing::{debug, error, info, warn};

use crate::error::AppResult;
use crate::infrastructure::{page_scripts, JsExecutor};
use crate::models::{PageSignals, PageSnapshot};
use crate::services::extraction;

/// 通知级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NotificationLevel {
    pub fn css_suffix(self) -> &'static str {
        match self {
            NotificationLevel::Success => "success",
            NotificationLevel::Info => "info",
            NotificationLevel::Warning => "warning",
            NotificationLevel::Error => "error",
        }
    }
}

/// 监控器所需的页面能力
pub trait PageSurface: Send + Sync {
    /// 注入按钮、通知栏和 DOM 监听（幂等）
    fn ensure_overlay(&self) -> impl Future<Output = AppResult<()>> + Send;

    /// 采集一次页面快照
    fn snapshot(&self) -> impl Future<Output = AppResult<PageSnapshot>> + Send;

    /// 读取并清零页面信号
    fn take_signals(&self) -> impl Future<Output = AppResult<PageSignals>> + Send;

    /// 显示一条通知
    fn notify(
        &self,
        level: NotificationLevel,
        message: &str,
    ) -> impl Future<Output = AppResult<()>> + Send;

    /// 同步成功后的按钮反馈
    fn flash_success(&self) -> impl Future<Output = AppResult<()>> + Send;
}

/// 基于真实浏览器标签页的实现
pub struct LivePage {
    executor: JsExecutor,
    snapshot_script: String,
}

impl LivePage {
    pub fn new(executor: JsExecutor) -> Self {
        Self {
            executor,
            snapshot_script: page_scripts::snapshot_script(&extraction::all_selectors()),
        }
    }
}

impl PageSurface for LivePage {
    async fn ensure_overlay(&self) -> AppResult<()> {
        let installed: bool = self.executor.eval_as(page_scripts::install_overlay_script()).await?;
        if installed {
            let url = self.executor.current_url().await?.unwrap_or_default();
            info!("⚡ 已在页面注入同步按钮: {}", url);
        }
        Ok(())
    }

    async fn snapshot(&self) -> AppResult<PageSnapshot> {
        self.executor.eval_as(self.snapshot_script.as_str()).await
    }

    async fn take_signals(&self) -> AppResult<PageSignals> {
        self.executor.eval_as(page_scripts::take_signals_script()).await
    }

    async fn notify(&self, level: NotificationLevel, message: &str) -> AppResult<()> {
        match level {
            NotificationLevel::Error => error!("🔔 {}", message),
            NotificationLevel::Warning => warn!("🔔 {}", message),
            _ => info!("🔔 {}", message),
        }
        let shown: bool = self
            .executor
            .eval_as(page_scripts::notification_script(message, level.css_suffix()))
            .await?;
        if !shown {
            debug!("通知栏不存在，通知只写入日志");
        }
        Ok(())
    }

    async fn flash_success(&self) -> AppResult<()> {
        self.executor.run(page_scripts::flash_success_script()).await
    }
}
