use serde::{Deserialize, Serialize};

/// 仓库内的目录组织方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FolderLayout {
    /// easy/ medium/ hard/
    #[default]
    #[serde(alias = "difficulty")]
    ByDifficulty,
    /// 按 slug 首字母大写分目录
    Alphabetical,
    /// 全部放在 solutions/ 下
    #[serde(other)]
    Flat,
}

/// 同步设置
///
/// 整条记录一起读写；校验由调用方（`validation`）负责，存储层照单全收。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncSettings {
    pub access_token: String,
    pub account_name: String,
    pub repository_name: String,
    pub folder_layout: FolderLayout,
    pub auto_sync_enabled: bool,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            account_name: String::new(),
            repository_name: String::new(),
            folder_layout: FolderLayout::ByDifficulty,
            auto_sync_enabled: true,
        }
    }
}

impl SyncSettings {
    /// token、账号、仓库三项齐全
    pub fn has_credentials(&self) -> bool {
        !self.access_token.trim().is_empty()
            && !self.account_name.trim().is_empty()
            && !self.repository_name.trim().is_empty()
    }
}

/// 文件已存在时如何生成新内容
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentMode {
    /// 用本次代码整体覆盖远端文件
    #[default]
    Overwrite,
    /// 保留远端已有内容，在末尾追加本次代码
    Append,
}

impl ContentMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "overwrite" => Some(ContentMode::Overwrite),
            "append" => Some(ContentMode::Append),
            _ => None,
        }
    }
}
