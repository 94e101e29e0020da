pub mod anomaly_commands;
pub mod api_key_commands;
