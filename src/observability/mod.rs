pub mod middleware;
pub mod tracing;

pub use middleware::*;
pub use tracing::*;
