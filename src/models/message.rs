//! 监控器 ⇄ 后台服务 之间的消息协议
//!
//! 请求按 `action` 字段区分；响应带 `success` 或 `valid`。

use serde::{Deserialize, Serialize};

use crate::models::{SolutionSubmission, SyncOutcome, SyncSettings};

/// 请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    InitializeSettings,
    ValidateToken { token: String },
    SyncSolution { data: SolutionSubmission },
    GetSettings,
    SaveSettings { settings: SyncSettings },
}

impl Request {
    pub fn action(&self) -> &'static str {
        match self {
            Request::InitializeSettings => "initializeSettings",
            Request::ValidateToken { .. } => "validateToken",
            Request::SyncSolution { .. } => "syncSolution",
            Request::GetSettings => "getSettings",
            Request::SaveSettings { .. } => "saveSettings",
        }
    }
}

/// 响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Ack {
        success: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    Token {
        valid: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        username: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    Synced {
        success: bool,
        data: SyncOutcome,
    },
    Settings {
        success: bool,
        settings: SyncSettings,
    },
}

impl Response {
    pub fn ok() -> Self {
        Response::Ack {
            success: true,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Response::Ack {
            success: false,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        match self {
            Response::Ack { success, .. }
            | Response::Synced { success, .. }
            | Response::Settings { success, .. } => *success,
            Response::Token { valid, .. } => *valid,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Response::Ack { error, .. } | Response::Token { error, .. } => error.as_deref(),
            _ => None,
        }
    }

    pub fn into_outcome(self) -> Option<SyncOutcome> {
        match self {
            Response::Synced { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn into_settings(self) -> Option<SyncSettings> {
        match self {
            Response::Settings { settings, .. } => Some(settings),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_protocol_requests() {
        let request: Request = serde_json::from_value(json!({
            "action": "validateToken",
            "token": "ghp_abc"
        }))
        .unwrap();
        assert_eq!(
            request,
            Request::ValidateToken {
                token: "ghp_abc".to_string()
            }
        );

        let request: Request = serde_json::from_value(json!({ "action": "getSettings" })).unwrap();
        assert_eq!(request.action(), "getSettings");

        let request: Request = serde_json::from_value(json!({
            "action": "saveSettings",
            "settings": { "accessToken": "t", "folderLayout": "alphabetical" }
        }))
        .unwrap();
        assert_eq!(request.action(), "saveSettings");
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let parsed = serde_json::from_value::<Request>(json!({ "action": "deleteEverything" }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_response_shapes() {
        assert_eq!(serde_json::to_value(Response::ok()).unwrap(), json!({ "success": true }));
        assert_eq!(
            serde_json::to_value(Response::failure("boom")).unwrap(),
            json!({ "success": false, "error": "boom" })
        );
        let token = Response::Token {
            valid: true,
            username: Some("octocat".to_string()),
            error: None,
        };
        assert_eq!(
            serde_json::to_value(&token).unwrap(),
            json!({ "valid": true, "username": "octocat" })
        );
        assert!(token.is_success());
    }
}
