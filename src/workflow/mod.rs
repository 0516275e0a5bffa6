pub mod background;
pub mod monitor;

pub use background::{spawn_background, BackgroundHandle, BackgroundService};
pub use monitor::{CheckOutcome, MonitorTiming, PageMonitor, SessionState};
