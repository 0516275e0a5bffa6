//! 设置格式校验
//!
//! 只检查格式，不发网络请求。存储层不做校验，保存前由调用方调用
//! [`validate_settings`]。

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::models::SyncSettings;

/// 可接受的 token 前缀
pub const TOKEN_PREFIXES: &[&str] = &["ghp_", "gho_", "ghu_", "ghs_", "ghr_"];
/// token 最短长度
pub const MIN_TOKEN_LEN: usize = 20;
/// 仓库名最大长度
pub const MAX_REPOSITORY_LEN: usize = 100;

/// 出错的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    AccessToken,
    AccountName,
    RepositoryName,
}

impl SettingsField {
    pub fn name(self) -> &'static str {
        match self {
            SettingsField::AccessToken => "accessToken",
            SettingsField::AccountName => "accountName",
            SettingsField::RepositoryName => "repositoryName",
        }
    }
}

/// 字段校验失败
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: SettingsField,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.field.name())
    }
}

impl std::error::Error for FieldError {}

fn account_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9]([a-zA-Z0-9-]{0,38}[a-zA-Z0-9])?$").expect("valid account regex")
    })
}

fn repository_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z0-9._-]+$").expect("valid repository regex"))
}

/// token 至少 20 个字符且以已知前缀开头
pub fn is_valid_token_format(token: &str) -> bool {
    let token = token.trim();
    token.len() >= MIN_TOKEN_LEN && TOKEN_PREFIXES.iter().any(|p| token.starts_with(p))
}

pub fn is_valid_account_name(name: &str) -> bool {
    account_regex().is_match(name.trim())
}

pub fn is_valid_repository_name(name: &str) -> bool {
    let name = name.trim();
    !name.is_empty() && name.len() <= MAX_REPOSITORY_LEN && repository_regex().is_match(name)
}

/// 逐个字段检查，返回第一个出错的字段
pub fn validate_settings(settings: &SyncSettings) -> Result<(), FieldError> {
    let fail = |field, message| Err(FieldError { field, message });

    if settings.access_token.trim().is_empty() {
        return fail(SettingsField::AccessToken, "GitHub token is required");
    }
    if settings.account_name.trim().is_empty() {
        return fail(SettingsField::AccountName, "GitHub username is required");
    }
    if settings.repository_name.trim().is_empty() {
        return fail(SettingsField::RepositoryName, "Repository name is required");
    }
    if !is_valid_token_format(&settings.access_token) {
        return fail(SettingsField::AccessToken, "Invalid token format");
    }
    if !is_valid_account_name(&settings.account_name) {
        return fail(SettingsField::AccountName, "Invalid username format");
    }
    if !is_valid_repository_name(&settings.repository_name) {
        return fail(SettingsField::RepositoryName, "Invalid repository name format");
    }
    Ok(())
}
