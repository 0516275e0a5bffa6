//! 页面监控 - 流程层
//!
//! 流程顺序：
//! 1. 轮询 / DOM 变化 → 提取提交 → 去重 → 读设置 → 通知 → 等待 → 同步
//! 2. ⚡ 按钮 → 提取提交（不去重）→ 同步
//!
//! 本层只决定顺序，页面能力来自 [`PageSurface`]，同步由后台服务完成。

use std::future::Future;
use std::time::Duration;

use tokio::time::{interval, sleep, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::{NotificationLevel, PageSurface};
use crate::models::{Request, Response, SolutionSubmission, SyncOutcome, SyncSettings};
use crate::services::extraction::{self, Extraction};
use crate::utils::logging;
use crate::workflow::background::BackgroundHandle;

pub const MSG_ACCEPTED: &str = "Solution Accepted! Syncing to GitHub...";
pub const MSG_AUTO_SYNC_OFF: &str = "Solution Accepted! Auto sync is off, click ⚡ to sync.";
pub const MSG_MANUAL: &str = "Manually syncing to GitHub...";
pub const MSG_NOTHING_TO_SYNC: &str = "No accepted solution found to sync";
pub const MSG_SYNCED: &str = "Successfully synced to GitHub!";

/// 会话状态：最近一次已处理的提交
#[derive(Debug, Default)]
pub struct SessionState {
    last_key: Option<String>,
}

impl SessionState {
    /// 新提交返回 true 并记住它；同一 `slug-language` 返回 false
    pub fn arm(&mut self, submission: &SolutionSubmission) -> bool {
        let key = submission.dedup_key();
        if self.last_key.as_deref() == Some(key.as_str()) {
            return false;
        }
        self.last_key = Some(key);
        true
    }

    pub fn last_key(&self) -> Option<&str> {
        self.last_key.as_deref()
    }
}

/// 一次检查的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// 页面上没有可同步的提交
    Idle,
    /// 已通过但缺少字段
    Incomplete(Vec<&'static str>),
    /// 与上一次检测到的提交相同
    Duplicate,
    /// 自动同步已关闭
    AutoSyncDisabled,
    Synced(SyncOutcome),
    Failed(String),
}

/// 监控间隔
#[derive(Debug, Clone, Copy)]
pub struct MonitorTiming {
    pub poll_interval: Duration,
    pub observe_interval: Duration,
    pub sync_delay: Duration,
}

impl MonitorTiming {
    pub fn from_config(config: &Config) -> Self {
        Self {
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            observe_interval: Duration::from_millis(config.observe_interval_ms),
            sync_delay: Duration::from_millis(config.sync_delay_ms),
        }
    }
}

/// 页面监控器，一个标签页一个
pub struct PageMonitor<S> {
    surface: S,
    background: BackgroundHandle,
    state: SessionState,
    timing: MonitorTiming,
}

impl<S: PageSurface> PageMonitor<S> {
    pub fn new(surface: S, background: BackgroundHandle, timing: MonitorTiming) -> Self {
        Self {
            surface,
            background,
            state: SessionState::default(),
            timing,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// 运行监控循环，直到 `shutdown` 完成
    pub async fn run_until<F>(&mut self, shutdown: F) -> AppResult<()>
    where
        F: Future<Output = ()>,
    {
        if let Err(e) = self.surface.ensure_overlay().await {
            // 页面可能还在加载，观察时会再次注入
            warn!("⚠️ 注入同步按钮失败: {}", e);
        }

        let mut poll = interval(self.timing.poll_interval);
        poll.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut observe = interval(self.timing.observe_interval);
        observe.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        info!(
            "👀 开始监控提交结果 (轮询 {:?}, 观察 {:?})",
            self.timing.poll_interval, self.timing.observe_interval
        );

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("收到退出信号，停止监控");
                    break;
                }
                _ = poll.tick() => self.run_check("轮询").await,
                _ = observe.tick() => self.observe().await,
            }
        }
        Ok(())
    }

    /// 检查当前页面是否有新的通过提交，有则同步
    pub async fn check_current_submission(&mut self) -> AppResult<CheckOutcome> {
        let snapshot = self.surface.snapshot().await?;

        let submission = match extraction::extract(&snapshot, now_ms()) {
            Extraction::NotAccepted => return Ok(CheckOutcome::Idle),
            Extraction::Incomplete { missing } => {
                debug!("{}", AppError::Extraction { missing: missing.clone() });
                return Ok(CheckOutcome::Incomplete(missing));
            }
            Extraction::Ready(submission) => submission,
        };

        if !self.state.arm(&submission) {
            return Ok(CheckOutcome::Duplicate);
        }
        info!(
            "🎉 检测到通过的提交: {} ({}, {})",
            submission.problem_title,
            submission.difficulty,
            submission.language
        );
        debug!("代码预览: {}", logging::truncate_text(&submission.code, 80));

        let settings = match self.fetch_settings().await {
            Ok(settings) => settings,
            Err(e) => return Ok(self.report_failure(e).await),
        };
        if !settings.auto_sync_enabled {
            info!("自动同步已关闭，等待手动同步");
            self.notify(NotificationLevel::Info, MSG_AUTO_SYNC_OFF).await;
            return Ok(CheckOutcome::AutoSyncDisabled);
        }

        self.notify(NotificationLevel::Success, MSG_ACCEPTED).await;
        if !self.timing.sync_delay.is_zero() {
            sleep(self.timing.sync_delay).await;
        }
        Ok(self.sync_to_github(submission).await)
    }

    /// ⚡ 按钮：不经过去重，直接同步当前页面上的提交
    pub async fn handle_manual_sync(&mut self) -> AppResult<CheckOutcome> {
        let snapshot = self.surface.snapshot().await?;
        match extraction::extract(&snapshot, now_ms()) {
            Extraction::Ready(submission) => {
                info!("🖱️ 手动同步: {}", submission.problem_title);
                self.notify(NotificationLevel::Success, MSG_MANUAL).await;
                Ok(self.sync_to_github(submission).await)
            }
            other => {
                debug!("手动同步时没有可用的提交: {:?}", other);
                self.notify(NotificationLevel::Warning, MSG_NOTHING_TO_SYNC).await;
                Ok(CheckOutcome::Idle)
            }
        }
    }

    /// 把提交交给后台服务，并把结果反馈到页面
    async fn sync_to_github(&self, submission: SolutionSubmission) -> CheckOutcome {
        let response = match self
            .background
            .send(Request::SyncSolution { data: submission })
            .await
        {
            Ok(response) => response,
            Err(e) => return self.report_failure(e).await,
        };

        match sync_result(response) {
            Ok(outcome) => {
                info!("✅ 已同步: {}", outcome.url);
                self.notify(NotificationLevel::Success, MSG_SYNCED).await;
                if let Err(e) = self.surface.flash_success().await {
                    debug!("按钮反馈失败: {}", e);
                }
                CheckOutcome::Synced(outcome)
            }
            Err(message) => {
                error!("❌ 同步失败: {}", message);
                self.notify(NotificationLevel::Error, &format!("Sync failed: {}", message))
                    .await;
                CheckOutcome::Failed(message)
            }
        }
    }

    async fn fetch_settings(&self) -> AppResult<SyncSettings> {
        match self.background.send(Request::GetSettings).await? {
            Response::Settings { settings, .. } => Ok(settings),
            other => Err(AppError::Other(
                other.error_message().unwrap_or("Unknown settings error").to_string(),
            )),
        }
    }

    async fn report_failure(&self, err: AppError) -> CheckOutcome {
        error!("❌ 同步失败: {}", err);
        let message = match &err {
            AppError::MessagingUnavailable => err.to_string(),
            _ => format!("Sync failed: {}", err),
        };
        self.notify(NotificationLevel::Error, &message).await;
        CheckOutcome::Failed(err.to_string())
    }

    async fn run_check(&mut self, trigger: &str) {
        match self.check_current_submission().await {
            Ok(CheckOutcome::Idle) | Ok(CheckOutcome::Duplicate) => {}
            Ok(outcome) => debug!("[{}] 检查结果: {:?}", trigger, outcome),
            Err(e) => debug!("[{}] 读取页面失败: {}", trigger, e),
        }
    }

    async fn observe(&mut self) {
        let signals = match self.surface.take_signals().await {
            Ok(signals) => signals,
            Err(e) => {
                debug!("读取页面信号失败: {}", e);
                return;
            }
        };

        if !signals.installed {
            // 整页跳转后注入的内容会丢失
            if let Err(e) = self.surface.ensure_overlay().await {
                debug!("重新注入失败: {}", e);
            }
            return;
        }

        if signals.manual_requested {
            if let Err(e) = self.handle_manual_sync().await {
                warn!("手动同步失败: {}", e);
                self.notify(NotificationLevel::Error, &format!("Sync failed: {}", e))
                    .await;
            }
        }
        if signals.dom_changed {
            self.run_check("DOM 变化").await;
        }
    }

    async fn notify(&self, level: NotificationLevel, message: &str) {
        if let Err(e) = self.surface.notify(level, message).await {
            warn!("显示通知失败: {}", e);
        }
    }
}

/// 同步响应 → 结果；成功但没有带回文件信息也算失败
fn sync_result(response: Response) -> Result<SyncOutcome, String> {
    match response {
        Response::Synced {
            success: true,
            data,
        } => Ok(data),
        other => Err(other
            .error_message()
            .unwrap_or("Unknown sync error")
            .to_string()),
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
