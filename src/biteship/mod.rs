pub mod client;
pub mod credentials;
pub mod error;

pub use client::*;
pub use credentials::*;
pub use error::*;
