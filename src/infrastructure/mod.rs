//! 基础设施层
//!
//! 持有浏览器页面这一稀缺资源，只向上暴露能力

pub mod js_executor;
pub mod live_page;
pub mod page_scripts;

pub use js_executor::JsExecutor;
pub use live_page::{LivePage, NotificationLevel, PageSurface};
