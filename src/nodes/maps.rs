use crate::biteship::BiteshipClient;
use crate::node::simplify::{project, project_list};
use crate::node::{Node, NodeDescription, NodeError, NodeProperty, Parameters, PropertyOption};
use crate::nodes::{simplify_property, success};
use async_trait::async_trait;
use serde_json::{json, Value};

pub struct MapsNode {
    description: NodeDescription,
}

impl Default for MapsNode {
    fn default() -> Self {
        Self::new()
    }
}

impl MapsNode {
    pub fn new() -> Self {
        let description = NodeDescription::new(
            "biteshipMaps",
            "Biteship Maps",
            "Manage map-related operations with Biteship API",
        )
        .property(NodeProperty::operation(
            "getCoordinates",
            vec![
                PropertyOption::new("Get Coordinates", "getCoordinates")
                    .describe("Get coordinates from address")
                    .action("Get coordinates"),
                PropertyOption::new("Get Area", "getArea")
                    .describe("Get area details by ID or query")
                    .action("Get area"),
            ],
        ))
        .property(
            NodeProperty::string("address", "Address")
                .describe("Address to convert to coordinates")
                .required()
                .show_when("operation", &["getCoordinates"]),
        )
        .property(
            NodeProperty::string("areaQuery", "Area Query")
                .describe("Query to search for areas (e.g., city or postal code)")
                .required()
                .show_when("operation", &["getArea"]),
        )
        .property(simplify_property(
            "Whether to return a simplified version of the response",
        ));

        Self { description }
    }
}

#[async_trait]
impl Node for MapsNode {
    fn description(&self) -> &NodeDescription {
        &self.description
    }

    async fn execute_item(
        &self,
        client: &BiteshipClient,
        params: &Parameters,
    ) -> Result<Value, NodeError> {
        let simplify = params.boolean("simplifyResponse");

        match params.string("operation").as_str() {
            "getCoordinates" => {
                let address = params.require_string("address", "Address is required")?;
                let response = client
                    .get(&["v1", "maps", "coordinates"], &[("address", address.as_str())])
                    .await?;

                if simplify {
                    Ok(success(project(
                        &response,
                        &[("coordinates", "coordinates"), ("address", "address")],
                    )))
                } else {
                    Ok(success(response))
                }
            }
            "getArea" => {
                let query = params.require_string("areaQuery", "Area query is required")?;
                let response = client
                    .get(&["v1", "maps", "areas"], &[("q", query.as_str())])
                    .await?;

                if simplify {
                    let mut simplified = json!({});
                    if let Some(areas) = project_list(&response, "areas", &[("id", "id"), ("name", "name")]) {
                        simplified["areas"] = areas;
                    }
                    Ok(success(simplified))
                } else {
                    Ok(success(response))
                }
            }
            other => Err(NodeError::UnknownOperation(other.to_string())),
        }
    }
}
