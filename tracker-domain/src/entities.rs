// Domain entities

pub mod anomaly;
pub mod api_key;
pub mod runtime_config;

pub use anomaly::*;
pub use api_key::*;
pub use runtime_config::*;
