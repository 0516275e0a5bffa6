//! 同步服务 - 业务能力层
//!
//! 把一次通过的提交写成仓库里的一个文件：
//! 计算路径 → 查询是否存在 → 生成内容 → 创建或更新。
//! 本层不做重试，失败原样返回给调用方。

use tracing::{debug, info};

use crate::clients::ContentsApi;
use crate::error::{AppError, AppResult};
use crate::models::{
    ContentMode, PutFileRequest, RepoTarget, SolutionSubmission, SyncAction, SyncOutcome,
    SyncSettings,
};
use crate::services::{content, layout};

/// 同步服务
pub struct SyncService<A> {
    api: A,
    content_mode: ContentMode,
}

impl<A: ContentsApi> SyncService<A> {
    pub fn new(api: A, content_mode: ContentMode) -> Self {
        Self { api, content_mode }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// 同步一次提交，返回远端文件地址
    pub async fn sync(
        &self,
        settings: &SyncSettings,
        submission: &SolutionSubmission,
    ) -> AppResult<SyncOutcome> {
        if !settings.has_credentials() {
            return Err(AppError::ConfigurationMissing);
        }

        let target = RepoTarget::from_settings(settings);
        let path = layout::target_path(
            settings.folder_layout,
            submission.difficulty,
            &submission.slug,
            &submission.language,
        );
        debug!("目标路径: {}/{}:{}", target.owner, target.repo, path);

        // 写入前重新查询，拿到最新的 sha
        let existing = self.api.fetch_file(&target, &path).await?;
        let file_content = content::prepare_file_content(submission, &existing, self.content_mode);

        if existing.content.as_deref() == Some(file_content.as_str()) {
            if let Some(url) = existing.html_url.clone() {
                info!("内容未变化，跳过提交: {}", path);
                return Ok(SyncOutcome {
                    success: true,
                    url,
                    path,
                    action: SyncAction::Unchanged,
                });
            }
        }

        let request = PutFileRequest {
            path: path.clone(),
            message: content::commit_message(submission, &existing),
            content: file_content,
            sha: existing.sha.clone(),
        };
        let written = self.api.put_file(&target, &request).await?;

        let action = if existing.exists() {
            SyncAction::Updated
        } else {
            SyncAction::Created
        };
        info!("✓ {} -> {} ({:?})", submission.problem_title, written.html_url, action);

        Ok(SyncOutcome {
            success: true,
            url: written.html_url,
            path,
            action,
        })
    }
}
