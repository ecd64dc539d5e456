use crate::biteship::BiteshipClient;
use crate::node::simplify::{project, project_list};
use crate::node::{Node, NodeDescription, NodeError, NodeProperty, Parameters, PropertyOption};
use crate::nodes::{simplify_property, success};
use async_trait::async_trait;
use serde_json::{json, Value};

const LOCATION_FIELDS: &[(&str, &str)] = &[("id", "id"), ("name", "name"), ("postalCode", "postal_code")];

pub struct LocationsNode {
    description: NodeDescription,
}

impl Default for LocationsNode {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationsNode {
    pub fn new() -> Self {
        let description = NodeDescription::new(
            "biteshipLocations",
            "Biteship Locations",
            "Manage location-related operations with Biteship API",
        )
        .property(NodeProperty::operation(
            "searchLocations",
            vec![
                PropertyOption::new("Search Locations", "searchLocations")
                    .describe("Search locations by query")
                    .action("Search locations"),
                PropertyOption::new("Get Location Details", "getLocationDetails")
                    .describe("Get details of a specific location by ID")
                    .action("Get location details"),
            ],
        ))
        .property(
            NodeProperty::string("locationQuery", "Location Query")
                .describe("Query to search locations (e.g., city, postal code)")
                .required()
                .show_when("operation", &["searchLocations"]),
        )
        .property(
            NodeProperty::string("locationId", "Location ID")
                .describe("ID of the location to retrieve")
                .required()
                .show_when("operation", &["getLocationDetails"]),
        )
        .property(simplify_property(
            "Whether to return a simplified version of the response",
        ));

        Self { description }
    }
}

#[async_trait]
impl Node for LocationsNode {
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
            "searchLocations" => {
                let query = params.require_string("locationQuery", "Location query is required")?;
                let response = client
                    .get(&["v1", "locations"], &[("q", query.as_str())])
                    .await?;

                if simplify {
                    let mut simplified = json!({});
                    if let Some(locations) = project_list(&response, "locations", LOCATION_FIELDS) {
                        simplified["locations"] = locations;
                    }
                    Ok(success(simplified))
                } else {
                    Ok(success(response))
                }
            }
            "getLocationDetails" => {
                let location_id = params.require_string("locationId", "Location ID is required")?;
                let response = client
                    .get(&["v1", "locations", location_id.as_str()], &[])
                    .await?;

                if simplify {
                    Ok(success(project(&response, LOCATION_FIELDS)))
                } else {
                    Ok(success(response))
                }
            }
            other => Err(NodeError::UnknownOperation(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biteship::{Credentials, Environment};
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    async fn client_for(server: &MockServer) -> BiteshipClient {
        BiteshipClient::with_credentials(&server.uri(), Credentials::new("key", Environment::Test)).unwrap()
    }

    fn params(value: Value) -> Parameters {
        let mut params = Parameters::from_value(value).unwrap();
        LocationsNode::new().description().apply_defaults(&mut params);
        params
    }

    #[tokio::test]
    async fn test_search_locations_simplified() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/locations"))
            .and(query_param("q", "Kebayoran"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "locations": [
                    {"id": "loc-1", "name": "Kebayoran Baru", "postal_code": 12120, "type": "origin"}
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = LocationsNode::new()
            .execute_item(
                &client_for(&mock_server).await,
                &params(json!({"locationQuery": "Kebayoran", "simplifyResponse": true})),
            )
            .await
            .unwrap();

        assert_eq!(
            result["data"],
            json!({"locations": [{"id": "loc-1", "name": "Kebayoran Baru", "postalCode": 12120}]})
        );
    }

    #[tokio::test]
    async fn test_get_location_details_raw() {
        let mock_server = MockServer::start().await;
        let raw = json!({"success": true, "id": "loc-1", "name": "Gudang", "postal_code": 12120});
        Mock::given(method("GET"))
            .and(path("/v1/locations/loc-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&raw))
            .mount(&mock_server)
            .await;

        let node = LocationsNode::new();
        let client = client_for(&mock_server).await;
        let result = node
            .execute_item(
                &client,
                &params(json!({"operation": "getLocationDetails", "locationId": "loc-1"})),
            )
            .await
            .unwrap();
        assert_eq!(result, json!({"success": true, "data": raw}));

        let simplified = node
            .execute_item(
                &client,
                &params(json!({
                    "operation": "getLocationDetails",
                    "locationId": "loc-1",
                    "simplifyResponse": true
                })),
            )
            .await
            .unwrap();
        assert_eq!(
            simplified["data"],
            json!({"id": "loc-1", "name": "Gudang", "postalCode": 12120})
        );
    }

    #[tokio::test]
    async fn test_empty_query_rejected_before_request() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let error = LocationsNode::new()
            .execute_item(&client_for(&mock_server).await, &params(json!({"locationQuery": ""})))
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "Location query is required");
    }
}
