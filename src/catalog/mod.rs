pub mod classifier;
pub mod couriers;

pub use classifier::*;
pub use couriers::*;
