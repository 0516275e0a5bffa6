//! 后台服务 - 流程层
//!
//! 接收监控器发来的请求，串起设置存储与同步服务。
//! 运行在独立的 tokio 任务中，通过 mpsc + oneshot 收发消息。

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use crate::clients::ContentsApi;
use crate::error::{AppError, AppResult};
use crate::models::{Request, Response, SolutionSubmission};
use crate::services::{validation, SettingsStore, SyncJournal, SyncService};

const CHANNEL_CAPACITY: usize = 16;

type Envelope = (Request, oneshot::Sender<Response>);

/// 后台服务
pub struct BackgroundService<A> {
    store: SettingsStore,
    sync: SyncService<A>,
    journal: Option<SyncJournal>,
}

impl<A: ContentsApi> BackgroundService<A> {
    pub fn new(store: SettingsStore, sync: SyncService<A>) -> Self {
        Self {
            store,
            sync,
            journal: None,
        }
    }

    /// 每次同步结果额外写入日志文件
    pub fn with_journal(mut self, journal: SyncJournal) -> Self {
        self.journal = Some(journal);
        self
    }

    /// 处理一条请求；内部错误转成 `{success:false, error}`
    pub async fn handle(&self, request: Request) -> Response {
        let action = request.action();
        debug!("📨 收到请求: {}", action);
        match self.dispatch(request).await {
            Ok(response) => response,
            Err(e) => {
                error!("❌ 处理 {} 失败: {}", action, e);
                Response::failure(e.to_string())
            }
        }
    }

    async fn dispatch(&self, request: Request) -> AppResult<Response> {
        match request {
            Request::InitializeSettings => {
                self.store.initialize().await?;
                Ok(Response::ok())
            }
            Request::ValidateToken { token } => Ok(self.validate_token(&token).await),
            Request::SyncSolution { data } => self.sync_solution(&data).await,
            Request::GetSettings => Ok(Response::Settings {
                success: true,
                settings: self.store.get().await?,
            }),
            Request::SaveSettings { settings } => {
                self.store.save(&settings).await?;
                info!("✓ 设置已保存");
                Ok(Response::ok())
            }
        }
    }

    async fn validate_token(&self, token: &str) -> Response {
        let invalid = |error: String| Response::Token {
            valid: false,
            username: None,
            error: Some(error),
        };

        if !validation::is_valid_token_format(token) {
            return invalid("Invalid token format".to_string());
        }
        match self.sync.api().authenticated_user(token.trim()).await {
            Ok(username) => {
                info!("✓ token 有效，用户: {}", username);
                Response::Token {
                    valid: true,
                    username: Some(username),
                    error: None,
                }
            }
            Err(e) => {
                warn!("token 校验失败: {}", e);
                invalid(e.to_string())
            }
        }
    }

    async fn sync_solution(&self, submission: &SolutionSubmission) -> AppResult<Response> {
        let settings = self.store.get().await?;
        let result = self.sync.sync(&settings, submission).await;

        if let Some(journal) = &self.journal {
            let written = match &result {
                Ok(outcome) => journal.record_success(submission, outcome).await,
                Err(e) => journal.record_failure(submission, &e.to_string()).await,
            };
            if let Err(e) = written {
                warn!("写入同步日志失败: {}", e);
            }
        }

        let outcome = result?;
        Ok(Response::Synced {
            success: true,
            data: outcome,
        })
    }
}

/// 后台服务的发送端，可在多个监控器之间克隆
#[derive(Clone)]
pub struct BackgroundHandle {
    tx: mpsc::Sender<Envelope>,
}

impl BackgroundHandle {
    #[cfg(test)]
    pub(crate) fn from_sender(tx: mpsc::Sender<Envelope>) -> Self {
        Self { tx }
    }

    /// 发送请求并等待响应；服务已退出时返回 [`AppError::MessagingUnavailable`]
    pub async fn send(&self, request: Request) -> AppResult<Response> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send((request, reply_tx))
            .await
            .map_err(|_| AppError::MessagingUnavailable)?;
        reply_rx.await.map_err(|_| AppError::MessagingUnavailable)
    }
}

/// 在独立任务中启动后台服务
pub fn spawn_background<A>(service: BackgroundService<A>) -> BackgroundHandle
where
    A: ContentsApi + 'static,
{
    let (tx, mut rx) = mpsc::channel::<Envelope>(CHANNEL_CAPACITY);
    tokio::spawn(async move {
        while let Some((request, reply)) = rx.recv().await {
            let response = service.handle(request).await;
            if reply.send(response).is_err() {
                debug!("请求方已放弃等待响应");
            }
        }
        debug!("后台服务退出");
    });
    BackgroundHandle { tx }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::{
        ContentMode, PutFileRequest, RemoteFileHandle, RepoTarget, SyncAction, SyncSettings,
        WrittenFile,
    };
    use crate::services::sync_service::tests::{configured_settings, two_sum, FakeContents};

    /// 共享同一个假仓库，方便测试里检查写入
    #[derive(Clone, Default)]
    pub(crate) struct SharedContents(pub Arc<FakeContents>);

    impl ContentsApi for SharedContents {
        async fn authenticated_user(&self, token: &str) -> AppResult<String> {
            self.0.authenticated_user(token).await
        }

        async fn fetch_file(&self, target: &RepoTarget, path: &str) -> AppResult<RemoteFileHandle> {
            self.0.fetch_file(target, path).await
        }

        async fn put_file(
            &self,
            target: &RepoTarget,
            request: &PutFileRequest,
        ) -> AppResult<WrittenFile> {
            self.0.put_file(target, request).await
        }
    }

    pub(crate) async fn service_with(
        dir: &tempfile::TempDir,
        settings: Option<SyncSettings>,
    ) -> (BackgroundService<SharedContents>, Arc<FakeContents>) {
        let store = SettingsStore::new(dir.path().join("settings.json"));
        if let Some(settings) = settings {
            store.save(&settings).await.unwrap();
        }
        let contents = SharedContents::default();
        let fake = contents.0.clone();
        let service =
            BackgroundService::new(store, SyncService::new(contents, ContentMode::Overwrite));
        (service, fake)
    }

    #[tokio::test]
    async fn test_initialize_and_get_settings() {
        let dir = tempfile::tempdir().unwrap();
        let (service, _) = service_with(&dir, None).await;

        assert!(service.handle(Request::InitializeSettings).await.is_success());
        let settings = service.handle(Request::GetSettings).await.into_settings().unwrap();
        assert_eq!(settings, SyncSettings::default());
    }

    #[tokio::test]
    async fn test_save_then_get_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let (service, _) = service_with(&dir, None).await;

        let saved = configured_settings();
        let response = service
            .handle(Request::SaveSettings {
                settings: saved.clone(),
            })
            .await;
        assert_eq!(response, Response::ok());

        let settings = service.handle(Request::GetSettings).await.into_settings().unwrap();
        assert_eq!(settings, saved);
    }

    #[tokio::test]
    async fn test_validate_token_checks_format_before_network() {
        let dir = tempfile::tempdir().unwrap();
        let (service, fake) = service_with(&dir, None).await;

        let response = service
            .handle(Request::ValidateToken {
                token: "not-a-token".to_string(),
            })
            .await;
        assert!(!response.is_success());
        assert_eq!(response.error_message(), Some("Invalid token format"));
        assert_eq!(*fake.user_calls.lock().unwrap(), 0);

        let response = service
            .handle(Request::ValidateToken {
                token: "ghp_abcdefghijklmnopqrstuvwxyz".to_string(),
            })
            .await;
        assert_eq!(
            response,
            Response::Token {
                valid: true,
                username: Some("octocat".to_string()),
                error: None,
            }
        );

        let response = service
            .handle(Request::ValidateToken {
                token: "ghp_abcdefghijklmnopqrstuvwxyzbad".to_string(),
            })
            .await;
        assert_eq!(response.error_message(), Some("Token validation failed: 401"));
    }

    #[tokio::test]
    async fn test_sync_without_credentials_fails() {
        let dir = tempfile::tempdir().unwrap();
        let (service, fake) = service_with(&dir, None).await;

        let response = service.handle(Request::SyncSolution { data: two_sum() }).await;
        assert_eq!(response, Response::failure("GitHub credentials not configured"));
        assert!(fake.puts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sync_writes_journal() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("sync_log.txt");
        let (service, _) = service_with(&dir, Some(configured_settings())).await;
        let service = service.with_journal(SyncJournal::with_path(&log_path));

        let outcome = service
            .handle(Request::SyncSolution { data: two_sum() })
            .await
            .into_outcome()
            .unwrap();
        assert_eq!(outcome.path, "easy/two-sum.py");
        assert_eq!(outcome.action, SyncAction::Created);

        let log = std::fs::read_to_string(&log_path).unwrap();
        assert!(log.contains("Two Sum"));
    }

    #[tokio::test]
    async fn test_handle_over_channel() {
        let dir = tempfile::tempdir().unwrap();
        let (service, fake) = service_with(&dir, Some(configured_settings())).await;
        let handle = spawn_background(service);

        let response = handle.send(Request::SyncSolution { data: two_sum() }).await.unwrap();
        assert!(response.is_success());
        assert_eq!(fake.puts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_closed_channel_is_unavailable() {
        let (tx, rx) = mpsc::channel::<Envelope>(1);
        drop(rx);
        let handle = BackgroundHandle::from_sender(tx);

        let err = handle.send(Request::GetSettings).await.unwrap_err();
        assert!(matches!(err, AppError::MessagingUnavailable));
        assert_eq!(err.to_string(), "Extension context not ready");
    }
}
