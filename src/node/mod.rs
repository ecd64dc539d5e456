pub mod description;
pub mod error;
pub mod executor;
pub mod params;
pub mod registry;
pub mod simplify;

pub use description::*;
pub use error::*;
pub use executor::*;
pub use params::*;
pub use registry::*;

use crate::biteship::BiteshipClient;
use async_trait::async_trait;
use serde_json::Value;

/// A Biteship node: a static field schema plus the mapping of one input item
/// to one API call.
#[async_trait]
pub trait Node: Send + Sync {
    /// Field schema published to the host
    fn description(&self) -> &NodeDescription;

    /// Node type name, e.g. `biteshipOrders`
    fn name(&self) -> &str {
        &self.description().name
    }

    /// Value of the `object` field added to this node's error envelopes
    fn error_object(&self) -> Option<&'static str> {
        None
    }

    /// Process one item. Parameters already carry the description defaults.
    async fn execute_item(
        &self,
        client: &BiteshipClient,
        params: &Parameters,
    ) -> Result<Value, NodeError>;
}
