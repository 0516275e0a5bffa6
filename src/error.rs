use thiserror::Error;

/// 应用程序错误类型
///
/// 每一种错误都在发生的边界被捕获，并转换成页面通知或
/// `{success: false}` 响应；没有任何一种错误会让监控进程退出。
#[derive(Debug, Error)]
pub enum AppError {
    /// 凭据未配置（token / 账号 / 仓库 任意一项为空）
    #[error("GitHub credentials not configured")]
    ConfigurationMissing,

    /// 写入接口返回非 2xx，消息取自响应体的 `message` 字段
    #[error("GitHub API error: {0}")]
    RemoteApi(String),

    /// 查询文件是否存在时返回了 404 以外的非 2xx
    #[error("Failed to get file SHA: {status}")]
    RemoteFetch { path: String, status: u16 },

    /// token 校验接口返回非 2xx
    #[error("Token validation failed: {status}")]
    TokenRejected { status: u16 },

    /// 页面缺少必需字段
    #[error("Missing required submission data: {}", missing.join(", "))]
    Extraction { missing: Vec<&'static str> },

    /// 后台消息通道已关闭或尚未就绪
    #[error("Extension context not ready")]
    MessagingUnavailable,

    /// 浏览器相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    /// 网络请求失败
    #[error("网络请求失败: {0}")]
    Http(#[from] reqwest::Error),

    /// 设置文件读写失败
    #[error("设置存储错误 ({path}): {source}")]
    Storage {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON 解析失败
    #[error("JSON解析失败: {0}")]
    Json(#[from] serde_json::Error),

    /// 配置文件解析失败
    #[error("配置文件解析失败 ({path}): {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// 其他错误
    #[error("{0}")]
    Other(String),
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建设置存储错误
    pub fn storage(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Storage {
            path: path.into(),
            source,
        }
    }

    /// 创建文件查询错误
    pub fn remote_fetch(path: impl Into<String>, status: u16) -> Self {
        AppError::RemoteFetch {
            path: path.into(),
            status,
        }
    }

    /// 创建写入接口错误
    pub fn remote_api(message: impl Into<String>) -> Self {
        AppError::RemoteApi(message.into())
    }

    /// 是否为用户配置问题（而不是网络或远端问题）
    pub fn is_configuration(&self) -> bool {
        matches!(self, AppError::ConfigurationMissing)
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
