pub mod api;
pub mod biteship;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod node;
pub mod nodes;
pub mod observability;
