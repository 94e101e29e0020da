// Domain value objects
pub mod anomaly_type;
pub mod identifiers;
pub mod scope;

pub use anomaly_type::*;
pub use identifiers::*;
pub use scope::*;
