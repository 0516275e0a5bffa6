//! 应用 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：日志文件、连接浏览器、启动后台服务
//! 2. **资源管理**：持有 Browser，页面只交给 `LivePage`
//! 3. **运行监控**：直到 Ctrl+C

use chromiumoxide::Browser;
use tracing::{info, warn};

use crate::browser;
use crate::clients::GitHubClient;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::{JsExecutor, LivePage};
use crate::models::{Request, Response};
use crate::services::{SettingsStore, SyncJournal, SyncService};
use crate::utils::logging;
use crate::workflow::{
    spawn_background, BackgroundHandle, BackgroundService, MonitorTiming, PageMonitor,
};

/// 应用主结构
pub struct App {
    _browser: Browser,
    monitor: PageMonitor<LivePage>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> AppResult<Self> {
        logging::init_log_file(&config.output_log_file)?;
        logging::log_startup(&config);

        let background = start_background(&config)?;
        expect_success(background.send(Request::InitializeSettings).await?)?;
        let settings = background
            .send(Request::GetSettings)
            .await?
            .into_settings()
            .unwrap_or_default();
        logging::log_settings(&settings);

        let (browser, page) =
            browser::connect_to_leetcode(config.browser_debug_port, &config.target_url).await?;
        let surface = LivePage::new(JsExecutor::new(page));
        let monitor = PageMonitor::new(surface, background, MonitorTiming::from_config(&config));

        Ok(Self {
            _browser: browser,
            monitor,
        })
    }

    /// 运行监控，直到收到 Ctrl+C
    pub async fn run(mut self) -> AppResult<()> {
        self.monitor
            .run_until(async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    warn!("无法监听 Ctrl+C: {}", e);
                    std::future::pending::<()>().await;
                }
            })
            .await?;
        info!("👋 已停止");
        Ok(())
    }
}

/// 创建 GitHub 客户端与设置存储，并在后台任务中启动服务
pub fn start_background(config: &Config) -> AppResult<BackgroundHandle> {
    let api = GitHubClient::new(config)?;
    let store = SettingsStore::new(&config.settings_file);
    let service = BackgroundService::new(store, SyncService::new(api, config.content_mode))
        .with_journal(SyncJournal::with_path(&config.output_log_file));
    Ok(spawn_background(service))
}

fn expect_success(response: Response) -> AppResult<()> {
    if response.is_success() {
        return Ok(());
    }
    let message = response.error_message().unwrap_or("unknown error");
    Err(AppError::Other(message.to_string()))
}
