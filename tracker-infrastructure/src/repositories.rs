pub mod sqlite_anomaly_repository;
pub mod sqlite_api_key_repository;

pub use sqlite_anomaly_repository::*;
pub use sqlite_api_key_repository::*;
