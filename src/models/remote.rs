use serde::Serialize;

use crate::models::SyncSettings;

/// 目标仓库及访问凭据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoTarget {
    pub token: String,
    pub owner: String,
    pub repo: String,
}

impl RepoTarget {
    pub fn from_settings(settings: &SyncSettings) -> Self {
        Self {
            token: settings.access_token.trim().to_string(),
            owner: settings.account_name.trim().to_string(),
            repo: settings.repository_name.trim().to_string(),
        }
    }
}

/// 写入前查询到的远端文件状态，每次写入前重新获取，从不缓存
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteFileHandle {
    pub path: String,
    /// 已存在文件的 blob sha；`None` 表示文件不存在
    pub sha: Option<String>,
    /// 已存在文件的解码内容
    pub content: Option<String>,
    pub html_url: Option<String>,
}

impl RemoteFileHandle {
    pub fn absent(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn exists(&self) -> bool {
        self.sha.is_some()
    }
}

/// 创建 / 更新文件的请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutFileRequest {
    pub path: String,
    pub message: String,
    /// 明文内容，发送前由客户端做 base64
    pub content: String,
    /// 更新已有文件时必须携带
    pub sha: Option<String>,
}

/// 写入成功后远端返回的文件信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub html_url: String,
    pub sha: String,
}

/// 本次同步对远端做了什么
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncAction {
    Created,
    Updated,
    /// 内容与远端一致，没有提交
    Unchanged,
}

/// 同步结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncOutcome {
    pub success: bool,
    pub url: String,
    pub path: String,
    pub action: SyncAction,
}
