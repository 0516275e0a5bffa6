//! 远端仓库客户端
//!
//! 所有与 GitHub 的 HTTP 交互都在这里完成，上层只通过 [`ContentsApi`] 调用。

use std::future::Future;

use crate::error::AppResult;
use crate::models::{PutFileRequest, RemoteFileHandle, RepoTarget, WrittenFile};

pub mod github_client;

pub use github_client::GitHubClient;

/// 仓库内容接口
pub trait ContentsApi: Send + Sync {
    /// 校验 token，返回对应的登录名
    fn authenticated_user(&self, token: &str) -> impl Future<Output = AppResult<String>> + Send;

    /// 查询文件；不存在时返回 [`RemoteFileHandle::absent`]
    fn fetch_file(
        &self,
        target: &RepoTarget,
        path: &str,
    ) -> impl Future<Output = AppResult<RemoteFileHandle>> + Send;

    /// 创建或更新文件（整体替换内容）
    fn put_file(
        &self,
        target: &RepoTarget,
        request: &PutFileRequest,
    ) -> impl Future<Output = AppResult<WrittenFile>> + Send;
}
