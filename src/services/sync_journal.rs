//! 同步日志 - 业务能力层
//!
//! 每次同步结果追加一行到日志文件，不关心流程

use std::path::PathBuf;

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::{SolutionSubmission, SyncOutcome};

/// 同步日志
pub struct SyncJournal {
    path: PathBuf,
}

impl SyncJournal {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 记录一次成功的同步
    pub async fn record_success(
        &self,
        submission: &SolutionSubmission,
        outcome: &SyncOutcome,
    ) -> AppResult<()> {
        let line = format!(
            "{} | ✓ {} | {} | {:?} | {}\n",
            timestamp(),
            submission.problem_title,
            submission.language,
            outcome.action,
            outcome.url
        );
        self.append(&line).await
    }

    /// 记录一次失败的同步
    pub async fn record_failure(
        &self,
        submission: &SolutionSubmission,
        error: &str,
    ) -> AppResult<()> {
        let line = format!(
            "{} | ❌ {} | {} | {}\n",
            timestamp(),
            submission.problem_title,
            submission.language,
            error
        );
        self.append(&line).await
    }

    async fn append(&self, line: &str) -> AppResult<()> {
        debug!("写入同步日志: {}", line.trim_end());
        let path = self.path.display().to_string();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| AppError::storage(&path, e))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| AppError::storage(&path, e))?;
        // tokio 的 File 丢弃前不会写完缓冲
        file.flush().await.map_err(|e| AppError::storage(&path, e))?;
        Ok(())
    }
}

fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
