//! 设置存储 - 业务能力层
//!
//! 单个 JSON 文件，单个键 `settings`，整条记录读写

use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tokio::fs;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::SyncSettings;

const SETTINGS_KEY: &str = "settings";

/// 设置存储
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 首次运行时写入默认设置，已有记录则保持不变
    pub async fn initialize(&self) -> AppResult<()> {
        if self.read_record().await?.is_some() {
            debug!("设置已存在: {}", self.path.display());
            return Ok(());
        }
        info!("📝 初始化默认设置: {}", self.path.display());
        self.save(&SyncSettings::default()).await
    }

    /// 读取设置；没有记录时返回默认值，文件无法解析时返回错误
    pub async fn get(&self) -> AppResult<SyncSettings> {
        Ok(self.read_record().await?.unwrap_or_default())
    }

    /// 整条覆盖保存
    pub async fn save(&self, settings: &SyncSettings) -> AppResult<()> {
        let path = self.path.display().to_string();
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::storage(&path, e))?;
        }
        let content = serde_json::to_string_pretty(&json!({ SETTINGS_KEY: settings }))?;
        fs::write(&self.path, content)
            .await
            .map_err(|e| AppError::storage(&path, e))?;
        debug!("设置已保存: {}", path);
        Ok(())
    }

    async fn read_record(&self) -> AppResult<Option<SyncSettings>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AppError::storage(self.path.display().to_string(), e)),
        };
        // 文件存在但无法解析是错误，不算没有记录
        let mut value: Value = serde_json::from_str(&content)?;
        match value.get_mut(SETTINGS_KEY).map(Value::take) {
            Some(record) => Ok(Some(serde_json::from_value(record)?)),
            None => Ok(None),
        }
    }
}
