//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! App (持有 Browser，运行到 Ctrl+C)
//!     ↓
//! workflow::PageMonitor ──消息──▶ workflow::BackgroundService
//!     ↓                                 ↓
//! infrastructure::LivePage        services (settings / sync / journal)
//!                                       ↓
//!                                 clients::GitHubClient
//! ```
//!
//! 只有编排层持有 Browser；下层只依赖能力，不依赖资源。

pub mod app;

pub use app::{start_background, App};
