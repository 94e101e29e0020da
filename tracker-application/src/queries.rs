pub mod anomaly_queries;
pub mod api_key_queries;
