use std::path::Path;

use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::ContentMode;

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "leetcode_sync.toml";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 浏览器调试端口
    pub browser_debug_port: u16,
    /// 目标页面 URL（用于在已打开的标签页中查找，找不到时新建）
    pub target_url: String,
    /// 设置文件路径（保存 token / 账号 / 仓库 等）
    pub settings_file: String,
    /// GitHub API 根地址
    pub github_api_base_url: String,
    /// 轮询间隔（毫秒）
    pub poll_interval_ms: u64,
    /// 检查 DOM 变化标记的间隔（毫秒）
    pub observe_interval_ms: u64,
    /// 检测到通过后到发起同步之间的等待（毫秒）
    pub sync_delay_ms: u64,
    /// 文件已存在时的内容处理方式
    pub content_mode: ContentMode,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 同步记录文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser_debug_port: 9222,
            target_url: "https://leetcode.com/problemset/".to_string(),
            settings_file: "leetcode_sync_settings.json".to_string(),
            github_api_base_url: "https://api.github.com".to_string(),
            poll_interval_ms: 2000,
            observe_interval_ms: 500,
            sync_delay_ms: 1000,
            content_mode: ContentMode::Overwrite,
            verbose_logging: false,
            output_log_file: "sync_log.txt".to_string(),
        }
    }
}

impl Config {
    /// 加载配置：默认值 → TOML 文件（如果存在）→ 环境变量
    pub fn load() -> AppResult<Self> {
        let path = std::env::var("LEETCODE_SYNC_CONFIG")
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let base = if Path::new(&path).exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        Ok(base.with_env_overrides())
    }

    /// 从 TOML 文件读取配置，缺失的字段使用默认值
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AppError::storage(path, e))?;
        Self::from_toml_str(&content).map_err(|source| AppError::ConfigParse {
            path: path.to_string(),
            source,
        })
    }

    fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 仅使用默认值和环境变量
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    fn with_env_overrides(self) -> Self {
        Self {
            browser_debug_port: env_parse("BROWSER_DEBUG_PORT").unwrap_or(self.browser_debug_port),
            target_url: std::env::var("TARGET_URL").unwrap_or(self.target_url),
            settings_file: std::env::var("SETTINGS_FILE").unwrap_or(self.settings_file),
            github_api_base_url: std::env::var("GITHUB_API_BASE_URL")
                .unwrap_or(self.github_api_base_url),
            poll_interval_ms: env_parse("POLL_INTERVAL_MS").unwrap_or(self.poll_interval_ms),
            observe_interval_ms: env_parse("OBSERVE_INTERVAL_MS")
                .unwrap_or(self.observe_interval_ms),
            sync_delay_ms: env_parse("SYNC_DELAY_MS").unwrap_or(self.sync_delay_ms),
            content_mode: std::env::var("CONTENT_MODE")
                .ok()
                .and_then(|v| ContentMode::parse(&v))
                .unwrap_or(self.content_mode),
            verbose_logging: env_parse("VERBOSE_LOGGING").unwrap_or(self.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(self.output_log_file),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_intervals() {
        let config = Config::default();
        assert_eq!(config.poll_interval_ms, 2000);
        assert_eq!(config.sync_delay_ms, 1000);
        assert_eq!(config.content_mode, ContentMode::Overwrite);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            browser_debug_port = 2001
            content_mode = "append"
            "#,
        )
        .unwrap();
        assert_eq!(config.browser_debug_port, 2001);
        assert_eq!(config.content_mode, ContentMode::Append);
        assert_eq!(config.github_api_base_url, "https://api.github.com");
    }

    #[test]
    fn test_bad_toml_is_error() {
        assert!(Config::from_toml_str("poll_interval_ms = \"soon\"").is_err());
    }
}
