pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;

pub use error::*;
pub use handlers::*;
pub use middleware::*;
pub use response::*;
pub use routes::*;
