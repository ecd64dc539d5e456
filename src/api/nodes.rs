use poem_openapi::{param::Path, payload::Json, ApiResponse, Object, OpenApi};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use crate::biteship::BiteshipClient;
use crate::error::AppError;
use crate::node::{execute, ErrorPolicy, NodeRegistry, Parameters};

pub struct NodesApi {
    registry: Arc<NodeRegistry>,
    client: Arc<BiteshipClient>,
}

impl NodesApi {
    pub fn new(registry: Arc<NodeRegistry>, client: Arc<BiteshipClient>) -> Self {
        Self { registry, client }
    }
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct NodeSummary {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub operations: Vec<String>,
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct ExecuteRequest {
    /// Parameter values, one object per input item
    pub items: Vec<Value>,
    /// Abort on the first failing item instead of emitting an error envelope
    #[oai(default)]
    pub fail_fast: bool,
}

#[derive(Debug, Clone, Object)]
pub struct ExecuteResponse {
    pub results: Vec<Value>,
}

#[derive(ApiResponse)]
pub enum ListNodesResponse {
    #[oai(status = 200)]
    Ok(Json<Vec<NodeSummary>>),
}

#[derive(ApiResponse)]
pub enum DescribeNodeResponse {
    /// Full field schema of the node
    #[oai(status = 200)]
    Ok(Json<Value>),
}

#[derive(ApiResponse)]
pub enum ExecuteNodeResponse {
    #[oai(status = 200)]
    Ok(Json<ExecuteResponse>),
}

#[OpenApi]
impl NodesApi {
    /// List the registered nodes
    #[oai(path = "/nodes", method = "get")]
    async fn list_nodes(&self) -> ListNodesResponse {
        let nodes = self
            .registry
            .descriptions()
            .into_iter()
            .map(|d| NodeSummary {
                name: d.name.clone(),
                display_name: d.display_name.clone(),
                description: d.description.clone(),
                operations: d.operations(),
            })
            .collect();
        ListNodesResponse::Ok(Json(nodes))
    }

    #[oai(path = "/nodes/:name", method = "get")]
    async fn describe_node(&self, name: Path<String>) -> Result<DescribeNodeResponse, poem::Error> {
        let node = self
            .registry
            .get(&name.0)
            .ok_or_else(|| AppError::NotFound(format!("node {}", name.0)))?;
        let description =
            serde_json::to_value(node.description()).map_err(|e| AppError::Internal(e.into()))?;
        Ok(DescribeNodeResponse::Ok(Json(description)))
    }

    /// Run a batch of items through one node
    #[oai(path = "/nodes/:name/execute", method = "post")]
    async fn execute_node(
        &self,
        name: Path<String>,
        body: Json<ExecuteRequest>,
    ) -> Result<ExecuteNodeResponse, poem::Error> {
        let node = self
            .registry
            .get(&name.0)
            .ok_or_else(|| AppError::NotFound(format!("node {}", name.0)))?;

        let ExecuteRequest { items, fail_fast } = body.0;
        let items = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                Parameters::from_value(item)
                    .map_err(|e| AppError::BadRequest(format!("item {}: {}", index, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let policy = if fail_fast {
            ErrorPolicy::FailFast
        } else {
            ErrorPolicy::ContinueOnFail
        };
        info!("Executing {} item(s) on {} ({:?})", items.len(), name.0, policy);

        let results = execute(node.as_ref(), &self.client, items, policy)
            .await
            .map_err(AppError::from)?;
        Ok(ExecuteNodeResponse::Ok(Json(ExecuteResponse { results })))
    }
}
