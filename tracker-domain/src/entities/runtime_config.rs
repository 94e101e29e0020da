// Runtime configuration shared read-only across requests

use crate::value_objects::OwnershipScope;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub debug: bool,
    pub ownership_scope: OwnershipScope,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub shutdown_grace_seconds: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8081".to_string(),
            debug: false,
            ownership_scope: OwnershipScope::Group,
            max_body_bytes: 64 * 1024,
            request_timeout_seconds: 10,
            shutdown_grace_seconds: 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_url: String,
    pub connect_timeout_seconds: u64,
}
