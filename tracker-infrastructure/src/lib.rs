pub mod config;
pub mod database;
pub mod repositories;
pub mod utils;

pub use config::*;
pub use database::*;
pub use repositories::*;
pub use utils::*;
