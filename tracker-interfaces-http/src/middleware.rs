pub mod auth;
pub mod codec;
pub mod envelope;

pub use auth::*;
pub use codec::*;
pub use envelope::*;
