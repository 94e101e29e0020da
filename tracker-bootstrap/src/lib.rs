pub mod admin;
pub mod context;
pub mod lifecycle;
pub mod logging;

pub use admin::issue_key;
pub use context::{AppContext, StartupOptions};
pub use lifecycle::run_standalone;
pub use logging::{init_tracing, LogOptions};
