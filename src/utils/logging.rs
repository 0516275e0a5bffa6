//! 日志工具模块
//!
//! 初始化 tracing，并提供启动信息和同步日志文件的辅助函数

use std::fs;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::SyncSettings;
use crate::services::validation;

/// 初始化 tracing
///
/// `RUST_LOG` 优先；未设置时按 `verbose` 选择 debug 或 info。
/// 重复调用不会报错，方便测试中多次初始化。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("leetcode_sync={},warn", default_level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化同步日志文件，写入表头
pub fn init_log_file(log_file_path: &str) -> AppResult<()> {
    let log_header = format!(
        "{}\nLeetCode 同步日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header).map_err(|e| AppError::storage(log_file_path, e))?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - LeetCode → GitHub 同步");
    info!("🌐 浏览器调试端口: {}", config.browser_debug_port);
    info!("📁 设置文件: {}", config.settings_file);
    info!("📝 同步日志: {}", config.output_log_file);
    info!("⏱️ 轮询间隔: {} ms", config.poll_interval_ms);
    info!("{}", "=".repeat(60));
}

/// 检查已保存的设置，逐项提示缺失或格式错误的字段
pub fn log_settings(settings: &SyncSettings) {
    match validation::validate_settings(settings) {
        Ok(()) => info!(
            "✓ 同步目标: {}/{} (目录: {:?}, 自动同步: {})",
            settings.account_name,
            settings.repository_name,
            settings.folder_layout,
            settings.auto_sync_enabled
        ),
        Err(e) => {
            warn!("⚠️ 设置不完整: {}", e);
            warn!("💡 请在设置文件中填写 accessToken / accountName / repositoryName");
        }
    }
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("Two Sum", 20), "Two Sum");
        assert_eq!(truncate_text("两数之和两数之和", 4), "两数之和...");
    }

    #[test]
    fn test_init_log_file_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sync_log.txt");
        let path = path.to_str().unwrap();

        init_log_file(path).unwrap();
        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.starts_with(&"=".repeat(60)));
        assert!(written.contains("LeetCode 同步日志"));
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(true);
        init(false);
    }
}
