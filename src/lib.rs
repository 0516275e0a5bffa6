//! # LeetCode Sync
//!
//! 监控浏览器中的 LeetCode 标签页，把通过的提交自动同步到 GitHub 仓库
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `JsExecutor` - 唯一的 page owner，提供 eval() 能力
//! - `LivePage` - 快照、信号、通知，实现 `PageSurface`
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个提交
//! - `extraction` - 从页面快照提取提交
//! - `layout` / `content` - 文件路径与文件内容
//! - `SyncService` - 创建或更新远端文件
//! - `SettingsStore` - 读写设置
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次提交"的完整处理流程
//! - `PageMonitor` - 检测 → 去重 → 通知 → 同步
//! - `BackgroundService` - 处理监控器发来的请求
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 管理浏览器资源和后台任务
//!
//! ## 模块结构

pub mod browser;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use browser::connect_to_leetcode;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::JsExecutor;
pub use models::{Request, Response, SolutionSubmission, SyncSettings};
pub use orchestrator::App;
pub use workflow::{BackgroundHandle, BackgroundService, PageMonitor};
