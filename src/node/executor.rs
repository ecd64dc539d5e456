use crate::biteship::BiteshipClient;
use crate::node::{Node, NodeError, Parameters};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// What happens when one item of a batch fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorPolicy {
    /// Emit an error envelope for the item and keep going
    #[default]
    ContinueOnFail,
    /// Abort the batch on the first failure
    FailFast,
}

#[derive(Error, Debug)]
#[error("item {index} failed: {source}")]
pub struct ItemFailure {
    pub index: usize,
    #[source]
    pub source: NodeError,
}

/// `{success: false, error, details}` plus `object` when the node sets one
pub fn error_envelope(node: &dyn Node, error: &NodeError) -> Value {
    let mut envelope = json!({
        "success": false,
        "error": error.to_string(),
        "details": error.details(),
    });
    if let (Some(object), Some(map)) = (node.error_object(), envelope.as_object_mut()) {
        map.insert("object".to_string(), Value::from(object));
    }
    envelope
}

/// Run a batch sequentially, one request per item, each awaited before the next
pub async fn execute(
    node: &dyn Node,
    client: &BiteshipClient,
    items: Vec<Parameters>,
    policy: ErrorPolicy,
) -> Result<Vec<Value>, ItemFailure> {
    info!("Executing {} with {} item(s)", node.name(), items.len());

    let mut results = Vec::with_capacity(items.len());
    for (index, mut params) in items.into_iter().enumerate() {
        node.description().apply_defaults(&mut params);
        debug!("{} item {} operation={}", node.name(), index, params.string("operation"));

        match node.execute_item(client, &params).await {
            Ok(output) => results.push(output),
            Err(error) => {
                if error.is_input_error() {
                    warn!("{} item {} rejected: {}", node.name(), index, error);
                } else {
                    error!("{} item {} failed: {}", node.name(), index, error);
                }
                match policy {
                    ErrorPolicy::ContinueOnFail => results.push(error_envelope(node, &error)),
                    ErrorPolicy::FailFast => return Err(ItemFailure { index, source: error }),
                }
            }
        }
    }

    Ok(results)
}
