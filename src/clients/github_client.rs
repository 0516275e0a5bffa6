//! GitHub 内容 API 客户端
//!
//! 封装 `GET /user`、`GET/PUT /repos/{owner}/{repo}/contents/{path}` 三个调用

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::clients::ContentsApi;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{PutFileRequest, RemoteFileHandle, RepoTarget, WrittenFile};

const ACCEPT: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("leetcode_sync/", env!("CARGO_PKG_VERSION"));

/// GitHub 客户端
pub struct GitHubClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    login: String,
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    sha: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    html_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PutResponse {
    content: PutContent,
}

#[derive(Debug, Deserialize)]
struct PutContent {
    html_url: String,
    sha: String,
}

impl GitHubClient {
    /// 创建新的 GitHub 客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        Self::with_base_url(&config.github_api_base_url)
    }

    pub fn with_base_url(base_url: &str) -> AppResult<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn get(&self, url: Url, token: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .header("Authorization", format!("token {}", token))
            .header("Accept", ACCEPT)
    }
}

impl ContentsApi for GitHubClient {
    async fn authenticated_user(&self, token: &str) -> AppResult<String> {
        let url = api_url(&self.base_url, &["user"])?;
        debug!("校验 token: GET {}", url);

        let response = self.get(url, token).send().await?;
        if !response.status().is_success() {
            return Err(AppError::TokenRejected {
                status: response.status().as_u16(),
            });
        }

        let user: UserResponse = response.json().await?;
        Ok(user.login)
    }

    async fn fetch_file(&self, target: &RepoTarget, path: &str) -> AppResult<RemoteFileHandle> {
        let url = contents_url(&self.base_url, target, path)?;
        debug!("查询文件: GET {}", url);

        let response = self.get(url, &target.token).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            debug!("文件不存在: {}", path);
            return Ok(RemoteFileHandle::absent(path));
        }
        if !status.is_success() {
            warn!("查询文件失败 ({}): {}", path, status);
            return Err(AppError::remote_fetch(path, status.as_u16()));
        }

        let data: ContentsResponse = response.json().await?;
        Ok(RemoteFileHandle {
            path: path.to_string(),
            sha: Some(data.sha),
            content: data.content.as_deref().and_then(decode_content),
            html_url: data.html_url,
        })
    }

    async fn put_file(
        &self,
        target: &RepoTarget,
        request: &PutFileRequest,
    ) -> AppResult<WrittenFile> {
        let url = contents_url(&self.base_url, target, &request.path)?;
        let body = put_body(request);
        debug!(
            "写入文件: PUT {} (sha: {:?}, 内容长度: {})",
            url,
            request.sha,
            request.content.len()
        );

        let response = self
            .client
            .put(url)
            .header("Authorization", format!("token {}", target.token))
            .header("Accept", ACCEPT)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::remote_api(api_error_message(status, &text)));
        }

        let written: PutResponse = response.json().await?;
        Ok(WrittenFile {
            html_url: written.content.html_url,
            sha: written.content.sha,
        })
    }
}

// ========== 辅助函数 ==========

fn api_url(base_url: &str, segments: &[&str]) -> AppResult<Url> {
    let mut url = Url::parse(base_url)
        .map_err(|e| AppError::Other(format!("无效的 API 地址 {}: {}", base_url, e)))?;
    url.path_segments_mut()
        .map_err(|_| AppError::Other(format!("无效的 API 地址: {}", base_url)))?
        .pop_if_empty()
        .extend(segments.iter().filter(|s| !s.is_empty()));
    Ok(url)
}

/// `{base}/repos/{owner}/{repo}/contents/{path}`，路径逐段编码
pub fn contents_url(base_url: &str, target: &RepoTarget, path: &str) -> AppResult<Url> {
    let mut segments = vec!["repos", target.owner.as_str(), target.repo.as_str(), "contents"];
    segments.extend(path.split('/'));
    api_url(base_url, &segments)
}

/// PUT 请求体；没有 sha 时不带该字段
fn put_body(request: &PutFileRequest) -> Value {
    let mut body = json!({
        "message": request.message,
        "content": STANDARD.encode(request.content.as_bytes()),
    });
    if let Some(sha) = &request.sha {
        body["sha"] = json!(sha);
    }
    body
}

/// 远端返回的 base64 内容带换行，先去掉空白再解码
fn decode_content(encoded: &str) -> Option<String> {
    let cleaned: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD
        .decode(cleaned)
        .ok()
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
}

/// 从错误响应体里取 `message`，取不到时用状态码
pub fn api_error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| status.as_u16().to_string())
}
