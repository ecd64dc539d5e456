use crate::biteship::BiteshipClient;
use crate::config::DEFAULT_BITESHIP_URL;
use crate::node::simplify::project_list;
use crate::node::{
    Node, NodeDescription, NodeError, NodeProperty, Parameters, PropertyGroup, PropertyOption,
    RequestDefaults, RequestRouting, RoutingTransform,
};
use crate::nodes::{courier_options, item_field, simplify_property, FieldKind};
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// Quotes shipping rates across one or more couriers.
///
/// Unlike the other nodes the request is fully declarative: the operation
/// option carries the endpoint and every input property carries the body
/// field it is routed to.
pub struct RatesNode {
    description: NodeDescription,
}

impl Default for RatesNode {
    fn default() -> Self {
        Self::new()
    }
}

fn coordinate(name: &str, display_name: &str, body: &str, description: &str) -> NodeProperty {
    NodeProperty::number(name, display_name, 0)
        .describe(description)
        .required()
        .show_when("requestType", &["coordinates"])
        .route_to(body, RoutingTransform::Direct)
}

fn postal_code(name: &str, display_name: &str, body: &str, description: &str) -> NodeProperty {
    NodeProperty::number(name, display_name, 0)
        .describe(description)
        .required()
        .show_when("requestType", &["postalCode"])
        .route_to(body, RoutingTransform::Direct)
}

impl RatesNode {
    pub fn new() -> Self {
        let headers = BTreeMap::from([
            ("Accept".to_string(), "application/json".to_string()),
            ("Content-Type".to_string(), "application/json".to_string()),
        ]);

        let item = |name: &str, display_name: &str, kind: FieldKind, description: &str, required: bool| {
            let field = item_field(name, display_name, kind, description);
            if required {
                field.required()
            } else {
                field
            }
        };

        let description = NodeDescription::new(
            "biteshipRates",
            "Biteship Rates",
            "Get shipping rates with Biteship API",
        )
        .subtitle("={{$parameter[\"operation\"] + \": \" + $parameter[\"requestType\"]}}")
        .request_defaults(RequestDefaults {
            base_url: DEFAULT_BITESHIP_URL.to_string(),
            headers,
        })
        .property(NodeProperty::operation(
            "getRates",
            vec![PropertyOption::new("Get Rates", "getRates")
                .describe("Get available shipping rates")
                .action("Get shipping rates")
                .route("POST", "/v1/rates/couriers")],
        ))
        .property(
            NodeProperty::options(
                "requestType",
                "Type of Request",
                "postalCode",
                vec![
                    PropertyOption::new("Rates by Coordinates", "coordinates")
                        .describe("Get rates using latitude and longitude coordinates"),
                    PropertyOption::new("Rates by Postal Code", "postalCode")
                        .describe("Get rates using postal codes"),
                ],
            )
            .no_data_expression(),
        )
        .property(coordinate(
            "originLatitude",
            "Origin Latitude",
            "origin_latitude",
            "The origin latitude where items can be picked up",
        ))
        .property(coordinate(
            "originLongitude",
            "Origin Longitude",
            "origin_longitude",
            "The origin longitude where items can be picked up",
        ))
        .property(coordinate(
            "destinationLatitude",
            "Destination Latitude",
            "destination_latitude",
            "The destination latitude where items will be received",
        ))
        .property(coordinate(
            "destinationLongitude",
            "Destination Longitude",
            "destination_longitude",
            "The destination longitude where items will be received",
        ))
        .property(postal_code(
            "originPostalCode",
            "Origin Postal Code",
            "origin_postal_code",
            "Postal code for the origin location",
        ))
        .property(postal_code(
            "destinationPostalCode",
            "Destination Postal Code",
            "destination_postal_code",
            "Postal code for the destination location",
        ))
        .property(
            NodeProperty::multi_options("couriers", "Couriers", courier_options())
                .describe("Select one or more couriers to query rates for, separated by commas")
                .required()
                .route_to("couriers", RoutingTransform::Join(",".to_string())),
        )
        .property(
            NodeProperty::fixed_collection(
                "items",
                "Items",
                true,
                vec![PropertyGroup::new(
                    "item",
                    "Item",
                    vec![
                        item("name", "Name", FieldKind::Text, "Name of your package", true),
                        item(
                            "description",
                            "Description",
                            FieldKind::Text,
                            "A description of your package (e.g., color, details)",
                            false,
                        ),
                        item("sku", "SKU", FieldKind::Text, "Item SKU if available", false),
                        item("value", "Value (IDR)", FieldKind::Number(0), "The value of the item in IDR", true),
                        item("quantity", "Quantity", FieldKind::Number(1), "The total number of items", true),
                        item("weight", "Weight (grams)", FieldKind::Number(0), "The weight of the item in grams", true),
                        item("height", "Height (cm)", FieldKind::Number(0), "The height of the item in centimeters", false),
                        item("length", "Length (cm)", FieldKind::Number(0), "The length of the item in centimeters", false),
                        item("width", "Width (cm)", FieldKind::Number(0), "The width of the item in centimeters", false),
                    ],
                )],
            )
            .describe("The items of the shipment")
            .route_to("items", RoutingTransform::Group("item".to_string())),
        )
        .property(simplify_property(
            "Whether to return a simplified version of the response",
        ));

        Self { description }
    }

    fn validate(params: &Parameters) -> Result<(), NodeError> {
        if params.string_list("couriers").is_empty() {
            return Err(NodeError::MissingField("At least one courier is required".to_string()));
        }
        if params.fixed_collection("items", "item").is_empty() {
            return Err(NodeError::MissingField("At least one item is required".to_string()));
        }

        match params.string("requestType").as_str() {
            "postalCode" => {
                let message = "Origin and destination postal codes are required";
                params.require_number("originPostalCode", message)?;
                params.require_number("destinationPostalCode", message)?;
            }
            "coordinates" => {
                // Defaults fill absent coordinates with 0, so only an explicit
                // null or non-numeric text lands here
                let complete = [
                    "originLatitude",
                    "originLongitude",
                    "destinationLatitude",
                    "destinationLongitude",
                ]
                .iter()
                .all(|name| params.number(name).is_some());
                if !complete {
                    return Err(NodeError::MissingField(
                        "Origin and destination coordinates are required".to_string(),
                    ));
                }
            }
            other => {
                return Err(NodeError::InvalidParameter(format!(
                    "Unknown request type: {}",
                    other
                )))
            }
        }
        Ok(())
    }

    /// Request body assembled from the routing of every visible property
    pub fn build_body(&self, params: &Parameters) -> Result<Value, NodeError> {
        Self::validate(params)?;

        let mut body = Map::new();
        for property in self.description.visible_properties(params) {
            if let Some(routing) = &property.routing {
                body.insert(routing.body.clone(), routing.resolve(property, params));
            }
        }
        Ok(Value::Object(body))
    }

    fn operation_routing(&self, operation: &str) -> Option<&RequestRouting> {
        self.description
            .find_property("operation")?
            .options
            .iter()
            .find(|o| o.value == operation)?
            .routing
            .as_ref()
    }

    fn simplify(response: &Value) -> Value {
        let rates = project_list(
            response,
            "rates",
            &[
                ("courier", "company"),
                ("service", "service_type"),
                ("price", "price"),
                ("estimatedDelivery", "estimated_days"),
            ],
        );
        json!({ "success": true, "rates": rates.unwrap_or_else(|| json!([])) })
    }
}

#[async_trait]
impl Node for RatesNode {
    fn description(&self) -> &NodeDescription {
        &self.description
    }

    async fn execute_item(
        &self,
        client: &BiteshipClient,
        params: &Parameters,
    ) -> Result<Value, NodeError> {
        let operation = params.string("operation");
        let routing = self
            .operation_routing(&operation)
            .ok_or_else(|| NodeError::UnknownOperation(operation.clone()))?;

        let body = self.build_body(params)?;
        let segments: Vec<&str> = routing.url.split('/').filter(|s| !s.is_empty()).collect();
        debug!("Routing {} to {} {}", operation, routing.method, routing.url);

        let response = match routing.method.as_str() {
            "POST" => client.post(&segments, Some(&body)).await?,
            "GET" => client.get(&segments, &[]).await?,
            other => {
                return Err(NodeError::InvalidParameter(format!(
                    "Unsupported request method: {}",
                    other
                )))
            }
        };

        if params.boolean("simplifyResponse") {
            Ok(Self::simplify(&response))
        } else {
            Ok(response)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biteship::{Credentials, Environment};
    use wiremock::{
        matchers::{body_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    async fn client_for(server: &MockServer) -> BiteshipClient {
        BiteshipClient::with_credentials(&server.uri(), Credentials::new("key", Environment::Test)).unwrap()
    }

    fn params(value: Value) -> Parameters {
        let mut params = Parameters::from_value(value).unwrap();
        RatesNode::new().description().apply_defaults(&mut params);
        params
    }

    fn postal_params() -> Value {
        json!({
            "originPostalCode": 12440,
            "destinationPostalCode": 12950,
            "couriers": ["jne", "sicepat"],
            "items": {"item": [{"name": "Shoes", "value": 199000, "quantity": 1, "weight": 800}]}
        })
    }

    fn rates_response() -> Value {
        json!({
            "success": true,
            "rates": [
                {"company": "jne", "service_type": "reg", "price": 9000, "estimated_days": "1 - 2", "courier_name": "JNE"},
                {"company": "sicepat", "service_type": "best", "price": 15000}
            ]
        })
    }

    #[test]
    fn test_body_from_postal_code_routing() {
        let body = RatesNode::new().build_body(&params(postal_params())).unwrap();
        assert_eq!(
            body,
            json!({
                "origin_postal_code": 12440,
                "destination_postal_code": 12950,
                "couriers": "jne,sicepat",
                "items": [{"name": "Shoes", "value": 199000, "quantity": 1, "weight": 800}]
            })
        );
    }

    #[test]
    fn test_body_from_coordinates_routing() {
        let mut value = postal_params();
        value["requestType"] = json!("coordinates");
        value["originLatitude"] = json!(-6.2);
        value["originLongitude"] = json!(106.8);
        value["destinationLatitude"] = json!(-6.9);
        value["destinationLongitude"] = json!(107.6);

        let body = RatesNode::new().build_body(&params(value)).unwrap();
        assert_eq!(body["origin_latitude"], json!(-6.2));
        assert_eq!(body["destination_longitude"], json!(107.6));
        assert!(body.get("origin_postal_code").is_none());
    }

    #[test]
    fn test_validation_messages() {
        let node = RatesNode::new();

        let mut value = postal_params();
        value["couriers"] = json!([]);
        let error = node.build_body(&params(value)).unwrap_err();
        assert_eq!(error.to_string(), "At least one courier is required");

        let mut value = postal_params();
        value["items"] = json!({});
        let error = node.build_body(&params(value)).unwrap_err();
        assert_eq!(error.to_string(), "At least one item is required");

        let mut value = postal_params();
        value["originPostalCode"] = json!(0);
        let error = node.build_body(&params(value)).unwrap_err();
        assert_eq!(error.to_string(), "Origin and destination postal codes are required");
    }

    #[test]
    fn test_explicit_null_coordinate_is_rejected() {
        let mut value = postal_params();
        value["requestType"] = json!("coordinates");
        value["originLatitude"] = Value::Null;
        value["originLongitude"] = json!(106.8);

        let error = RatesNode::new().build_body(&params(value)).unwrap_err();
        assert_eq!(error.to_string(), "Origin and destination coordinates are required");
    }

    #[test]
    fn test_absent_coordinates_default_to_zero() {
        let mut value = postal_params();
        value["requestType"] = json!("coordinates");

        let body = RatesNode::new().build_body(&params(value)).unwrap();
        assert_eq!(body["origin_latitude"], json!(0));
        assert_eq!(body["destination_longitude"], json!(0));
    }

    #[test]
    fn test_description_shape() {
        let node = RatesNode::new();
        let value = serde_json::to_value(node.description()).unwrap();
        assert_eq!(value["requestDefaults"]["baseUrl"], "https://api.biteship.com");
        assert_eq!(value["requestDefaults"]["headers"]["Accept"], "application/json");
        assert_eq!(value["properties"][0]["options"][0]["routing"]["url"], "/v1/rates/couriers");
        assert!(node.description().subtitle.contains("requestType"));
    }

    #[tokio::test]
    async fn test_get_rates_raw_passthrough() {
        let mock_server = MockServer::start().await;
        let expected = RatesNode::new().build_body(&params(postal_params())).unwrap();
        Mock::given(method("POST"))
            .and(path("/v1/rates/couriers"))
            .and(body_json(&expected))
            .respond_with(ResponseTemplate::new(200).set_body_json(rates_response()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = RatesNode::new()
            .execute_item(&client_for(&mock_server).await, &params(postal_params()))
            .await
            .unwrap();
        assert_eq!(result, rates_response());
    }

    #[tokio::test]
    async fn test_get_rates_simplified() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/rates/couriers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(rates_response()))
            .mount(&mock_server)
            .await;

        let mut value = postal_params();
        value["simplifyResponse"] = json!(true);
        let result = RatesNode::new()
            .execute_item(&client_for(&mock_server).await, &params(value))
            .await
            .unwrap();

        assert_eq!(
            result,
            json!({
                "success": true,
                "rates": [
                    {"courier": "jne", "service": "reg", "price": 9000, "estimatedDelivery": "1 - 2"},
                    {"courier": "sicepat", "service": "best", "price": 15000}
                ]
            })
        );
    }

    #[tokio::test]
    async fn test_missing_couriers_sends_nothing() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let mut value = postal_params();
        value.as_object_mut().unwrap().remove("couriers");
        let error = RatesNode::new()
            .execute_item(&client_for(&mock_server).await, &params(value))
            .await
            .unwrap_err();
        assert!(error.is_input_error());
    }

    #[tokio::test]
    async fn test_unknown_operation() {
        let mock_server = MockServer::start().await;
        let error = RatesNode::new()
            .execute_item(&client_for(&mock_server).await, &params(json!({"operation": "listRates"})))
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "Unknown operation: listRates");
    }
}
