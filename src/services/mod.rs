//! 业务能力层
//!
//! 每个模块只描述"我能做什么"，流程顺序由 workflow 决定

pub mod content;
pub mod extraction;
pub mod layout;
pub mod settings_store;
pub mod sync_journal;
pub mod sync_service;
pub mod validation;

pub use extraction::Extraction;
pub use settings_store::SettingsStore;
pub use sync_journal::SyncJournal;
pub use sync_service::SyncService;
