use crate::biteship::BiteshipClient;
use crate::node::simplify::project;
use crate::node::{
    Node, NodeDescription, NodeError, NodeProperty, Parameters, PropertyGroup, PropertyOption,
};
use crate::nodes::{item_field, simplify_property, success, FieldKind};
use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;

pub struct OrdersNode {
    description: NodeDescription,
}

impl Default for OrdersNode {
    fn default() -> Self {
        Self::new()
    }
}

fn coordinate_group() -> Vec<PropertyGroup> {
    vec![PropertyGroup::new(
        "coordinate",
        "Coordinate",
        vec![
            item_field("latitude", "Latitude", FieldKind::Number(0), "Latitude"),
            item_field("longitude", "Longitude", FieldKind::Number(0), "Longitude"),
        ],
    )]
}

fn create_field(name: &str, display_name: &str, description: &str) -> NodeProperty {
    NodeProperty::string(name, display_name)
        .describe(description)
        .required()
        .show_when("operation", &["create"])
}

fn location_field(property: NodeProperty, location_type: &str) -> NodeProperty {
    property
        .show_when("operation", &["create"])
        .show_when("locationType", &[location_type])
}

impl OrdersNode {
    pub fn new() -> Self {
        let description = NodeDescription::new(
            "biteshipOrders",
            "Biteship Orders",
            "Manage shipping orders with Biteship API",
        )
        .property(NodeProperty::operation(
            "create",
            vec![
                PropertyOption::new("Create", "create")
                    .describe("Create a new shipping order")
                    .action("Create order"),
                PropertyOption::new("Get", "get")
                    .describe("Get order details by ID")
                    .action("Get order"),
                PropertyOption::new("Cancel", "cancel")
                    .describe("Cancel an existing order")
                    .action("Cancel order"),
            ],
        ))
        .property(
            NodeProperty::string("orderId", "Order ID")
                .describe("The ID of the order")
                .required()
                .show_when("operation", &["get", "cancel"]),
        )
        .property(create_field("originContactName", "Origin Contact Name", "Origin contact person name"))
        .property(create_field("originContactPhone", "Origin Contact Phone", "Origin contact phone number"))
        .property(create_field("originAddress", "Origin Address", "Origin full address"))
        .property(create_field(
            "destinationContactName",
            "Destination Contact Name",
            "Destination contact person name",
        ))
        .property(create_field(
            "destinationContactPhone",
            "Destination Contact Phone",
            "Destination contact phone number",
        ))
        .property(create_field("destinationAddress", "Destination Address", "Destination full address"))
        .property(
            NodeProperty::options(
                "locationType",
                "Location Type",
                "postalCode",
                vec![
                    PropertyOption::new("Postal Code", "postalCode").describe("Use postal codes"),
                    PropertyOption::new("Coordinates", "coordinates").describe("Use latitude and longitude"),
                    PropertyOption::new("Area ID", "areaId").describe("Use Biteship area IDs"),
                ],
            )
            .describe("How to specify locations")
            .show_when("operation", &["create"]),
        )
        .property(location_field(
            NodeProperty::number("originPostalCode", "Origin Postal Code", 0)
                .describe("Origin postal code")
                .required(),
            "postalCode",
        ))
        .property(location_field(
            NodeProperty::number("destinationPostalCode", "Destination Postal Code", 0)
                .describe("Destination postal code")
                .required(),
            "postalCode",
        ))
        .property(location_field(
            NodeProperty::fixed_collection("originCoordinates", "Origin Coordinates", false, coordinate_group()),
            "coordinates",
        ))
        .property(location_field(
            NodeProperty::fixed_collection(
                "destinationCoordinates",
                "Destination Coordinates",
                false,
                coordinate_group(),
            ),
            "coordinates",
        ))
        .property(location_field(
            NodeProperty::string("originAreaId", "Origin Area ID")
                .describe("Origin area ID from Biteship")
                .required(),
            "areaId",
        ))
        .property(location_field(
            NodeProperty::string("destinationAreaId", "Destination Area ID")
                .describe("Destination area ID from Biteship")
                .required(),
            "areaId",
        ))
        .property(
            NodeProperty::options(
                "deliveryType",
                "Delivery Type",
                "now",
                vec![
                    PropertyOption::new("Now", "now").describe("Deliver now"),
                    PropertyOption::new("Schedule", "schedule").describe("Schedule delivery"),
                ],
            )
            .describe("Delivery type")
            .show_when("operation", &["create"]),
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
                        item_field("name", "Name", FieldKind::Text, "Item name"),
                        item_field("description", "Description", FieldKind::Text, "Item description"),
                        item_field("category", "Category", FieldKind::Text, "Item category"),
                        item_field("value", "Value (IDR)", FieldKind::Number(0), "Item value in IDR"),
                        item_field("length", "Length (cm)", FieldKind::Number(0), "Item length in centimeters"),
                        item_field("width", "Width (cm)", FieldKind::Number(0), "Item width in centimeters"),
                        item_field("height", "Height (cm)", FieldKind::Number(0), "Item height in centimeters"),
                        item_field("weight", "Weight (grams)", FieldKind::Number(0), "Item weight in grams"),
                        item_field("quantity", "Quantity", FieldKind::Number(1), "Item quantity"),
                    ],
                )],
            )
            .show_when("operation", &["create"]),
        )
        .property(
            NodeProperty::collection("additionalFields", "Additional Fields", additional_fields())
                .show_when("operation", &["create"]),
        )
        .property(simplify_property(
            "Whether to return a simplified version of the response instead of the raw data",
        ));

        Self { description }
    }

    /// Request body for `POST /v1/orders`
    pub fn build_create_body(params: &Parameters) -> Result<Value, NodeError> {
        let origin = "All origin fields (contact name, phone, address) are required";
        let destination = "All destination fields (contact name, phone, address) are required";

        let mut body = Map::new();
        for (field, key, message) in [
            ("originContactName", "origin_contact_name", origin),
            ("originContactPhone", "origin_contact_phone", origin),
            ("originAddress", "origin_address", origin),
            ("destinationContactName", "destination_contact_name", destination),
            ("destinationContactPhone", "destination_contact_phone", destination),
            ("destinationAddress", "destination_address", destination),
        ] {
            body.insert(key.to_string(), Value::from(params.require_string(field, message)?));
        }

        let items = params.fixed_collection("items", "item");
        if items.is_empty() {
            return Err(NodeError::MissingField("At least one item is required".to_string()));
        }
        body.insert("delivery_type".to_string(), Value::from(params.string("deliveryType")));
        body.insert("items".to_string(), Value::Array(items));

        match params.string("locationType").as_str() {
            "postalCode" => {
                let message = "Origin and destination postal codes are required";
                let origin = params.require_number("originPostalCode", message)?;
                let destination = params.require_number("destinationPostalCode", message)?;
                body.insert("origin_postal_code".to_string(), Value::Number(origin));
                body.insert("destination_postal_code".to_string(), Value::Number(destination));
            }
            "coordinates" => {
                let origin = params.fixed_collection("originCoordinates", "coordinate");
                let destination = params.fixed_collection("destinationCoordinates", "coordinate");
                match (origin.into_iter().next(), destination.into_iter().next()) {
                    (Some(origin), Some(destination)) => {
                        body.insert("origin_coordinate".to_string(), origin);
                        body.insert("destination_coordinate".to_string(), destination);
                    }
                    _ => {
                        return Err(NodeError::MissingField(
                            "Origin and destination coordinates are required".to_string(),
                        ))
                    }
                }
            }
            "areaId" => {
                let message = "Origin and destination area IDs are required";
                let origin = params.require_string("originAreaId", message)?;
                let destination = params.require_string("destinationAreaId", message)?;
                body.insert("origin_area_id".to_string(), Value::from(origin));
                body.insert("destination_area_id".to_string(), Value::from(destination));
            }
            other => {
                return Err(NodeError::InvalidParameter(format!(
                    "Unknown location type: {}",
                    other
                )))
            }
        }

        let additional = Parameters::from(params.collection("additionalFields"));
        for (name, value) in additional.as_map() {
            let value = if name == "metadata" {
                Value::Object(additional.json_object(name)?)
            } else {
                value.clone()
            };
            body.insert(to_snake_case(name), value);
        }

        Ok(Value::Object(body))
    }

    fn simplify(response: &Value) -> Value {
        project(
            response,
            &[
                ("orderId", "id"),
                ("status", "status"),
                ("courier", "courier.company"),
                ("deliveryType", "delivery_type"),
            ],
        )
    }
}

fn additional_fields() -> Vec<NodeProperty> {
    let text = |name: &str, display_name: &str, description: &str| {
        NodeProperty::string(name, display_name).describe(description)
    };

    vec![
        text("shipperContactName", "Shipper Contact Name", "Shipper contact name"),
        text("shipperContactPhone", "Shipper Contact Phone", "Shipper contact phone"),
        text("shipperContactEmail", "Shipper Contact Email", "Shipper contact email"),
        text("shipperOrganization", "Shipper Organization", "Shipper organization name"),
        text("destinationContactEmail", "Destination Contact Email", "Destination contact email"),
        text("originNote", "Origin Note", "Additional note for origin location"),
        text("destinationNote", "Destination Note", "Additional note for destination location"),
        text("orderNote", "Order Note", "General order note"),
        text(
            "courierCompany",
            "Courier Company",
            "Specific courier company to use (e.g., jne, sicepat, grab)",
        ),
        text("courierType", "Courier Type", "Courier service type (e.g., reg, instant, same_day)"),
        NodeProperty::number("courierInsurance", "Courier Insurance (IDR)", 0)
            .describe("Insurance amount in IDR"),
        NodeProperty::number("destinationCashOnDelivery", "Cash on Delivery Amount (IDR)", 0)
            .describe("Cash on delivery amount in IDR"),
        NodeProperty::options(
            "destinationCashOnDeliveryType",
            "Cash on Delivery Type",
            "7_days",
            vec![
                PropertyOption::new("7 Days", "7_days").describe("Settlement in 7 days"),
                PropertyOption::new("14 Days", "14_days").describe("Settlement in 14 days"),
            ],
        )
        .describe("Cash on delivery settlement type"),
        text("referenceId", "Reference ID", "Your internal reference ID for this order"),
        NodeProperty::json("metadata", "Metadata").describe("Additional metadata as JSON object"),
    ]
}

/// `shipperContactName` -> `shipper_contact_name`
fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            if !out.is_empty() {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[async_trait]
impl Node for OrdersNode {
    fn description(&self) -> &NodeDescription {
        &self.description
    }

    async fn execute_item(
        &self,
        client: &BiteshipClient,
        params: &Parameters,
    ) -> Result<Value, NodeError> {
        let response = match params.string("operation").as_str() {
            "create" => {
                let body = Self::build_create_body(params)?;
                debug!("Creating order with {} field(s)", body.as_object().map_or(0, Map::len));
                client.post(&["v1", "orders"], Some(&body)).await?
            }
            "get" => {
                let order_id = params.require_string("orderId", "Order ID is required")?;
                client.get(&["v1", "orders", order_id.as_str()], &[]).await?
            }
            "cancel" => {
                let order_id = params.require_string("orderId", "Order ID is required")?;
                client
                    .post(&["v1", "orders", order_id.as_str(), "cancel"], None)
                    .await?
            }
            other => return Err(NodeError::UnknownOperation(other.to_string())),
        };

        if params.boolean("simplifyResponse") {
            Ok(success(Self::simplify(&response)))
        } else {
            Ok(success(response))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biteship::{Credentials, Environment};
    use serde_json::json;
    use wiremock::{
        matchers::{body_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    async fn client_for(server: &MockServer) -> BiteshipClient {
        BiteshipClient::with_credentials(&server.uri(), Credentials::new("key", Environment::Test)).unwrap()
    }

    fn params(value: Value) -> Parameters {
        let mut params = Parameters::from_value(value).unwrap();
        OrdersNode::new().description().apply_defaults(&mut params);
        params
    }

    fn create_params() -> Value {
        json!({
            "operation": "create",
            "originContactName": "Amir",
            "originContactPhone": "0812345678",
            "originAddress": "Jl. Sudirman 1",
            "destinationContactName": "Budi",
            "destinationContactPhone": "0898765432",
            "destinationAddress": "Jl. Thamrin 2",
            "originPostalCode": 12440,
            "destinationPostalCode": 12950,
            "items": {"item": [{"name": "Shoes", "value": 199000, "weight": 800, "quantity": 1}]}
        })
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("shipperContactName"), "shipper_contact_name");
        assert_eq!(to_snake_case("referenceId"), "reference_id");
        assert_eq!(to_snake_case("metadata"), "metadata");
    }

    #[test]
    fn test_build_body_postal_codes() {
        let body = OrdersNode::build_create_body(&params(create_params())).unwrap();
        assert_eq!(body["origin_postal_code"], 12440);
        assert_eq!(body["destination_postal_code"], 12950);
        assert_eq!(body["delivery_type"], "now");
        assert_eq!(body["destination_contact_name"], "Budi");
        assert!(body.get("origin_area_id").is_none());
    }

    #[test]
    fn test_build_body_coordinates() {
        let mut value = create_params();
        value["locationType"] = json!("coordinates");
        value["originCoordinates"] = json!({"coordinate": {"latitude": -6.2, "longitude": 106.8}});
        value["destinationCoordinates"] = json!({"coordinate": {"latitude": -6.3, "longitude": 106.9}});

        let body = OrdersNode::build_create_body(&params(value)).unwrap();
        assert_eq!(body["origin_coordinate"], json!({"latitude": -6.2, "longitude": 106.8}));
        assert_eq!(body["destination_coordinate"]["latitude"], json!(-6.3));
        assert!(body.get("origin_postal_code").is_none());
    }

    #[test]
    fn test_build_body_missing_coordinates() {
        let mut value = create_params();
        value["locationType"] = json!("coordinates");
        let error = OrdersNode::build_create_body(&params(value)).unwrap_err();
        assert_eq!(error.to_string(), "Origin and destination coordinates are required");
    }

    #[test]
    fn test_build_body_area_ids() {
        let mut value = create_params();
        value["locationType"] = json!("areaId");
        value["originAreaId"] = json!("IDNP6");
        let error = OrdersNode::build_create_body(&params(value.clone())).unwrap_err();
        assert_eq!(error.to_string(), "Origin and destination area IDs are required");

        value["destinationAreaId"] = json!("IDNP9");
        let body = OrdersNode::build_create_body(&params(value)).unwrap();
        assert_eq!(body["origin_area_id"], "IDNP6");
        assert_eq!(body["destination_area_id"], "IDNP9");
    }

    #[test]
    fn test_build_body_unknown_location_type() {
        let mut value = create_params();
        value["locationType"] = json!("teleport");
        let error = OrdersNode::build_create_body(&params(value)).unwrap_err();
        assert_eq!(error.to_string(), "Unknown location type: teleport");
    }

    #[test]
    fn test_build_body_required_contacts() {
        let mut value = create_params();
        value["destinationContactPhone"] = json!("");
        let error = OrdersNode::build_create_body(&params(value)).unwrap_err();
        assert_eq!(
            error.to_string(),
            "All destination fields (contact name, phone, address) are required"
        );
    }

    #[test]
    fn test_build_body_zero_postal_code() {
        let mut value = create_params();
        value["destinationPostalCode"] = json!(0);
        let error = OrdersNode::build_create_body(&params(value)).unwrap_err();
        assert_eq!(error.to_string(), "Origin and destination postal codes are required");
    }

    #[test]
    fn test_additional_fields_merged() {
        let mut value = create_params();
        value["additionalFields"] = json!({
            "courierCompany": "jne",
            "courierType": "reg",
            "destinationCashOnDelivery": 250000,
            "metadata": "{\"source\": \"workflow\"}"
        });

        let body = OrdersNode::build_create_body(&params(value)).unwrap();
        assert_eq!(body["courier_company"], "jne");
        assert_eq!(body["courier_type"], "reg");
        assert_eq!(body["destination_cash_on_delivery"], 250000);
        assert_eq!(body["metadata"], json!({"source": "workflow"}));
    }

    #[test]
    fn test_invalid_metadata() {
        let mut value = create_params();
        value["additionalFields"] = json!({"metadata": "{not json"});
        let error = OrdersNode::build_create_body(&params(value)).unwrap_err();
        assert!(matches!(error, NodeError::InvalidParameter(_)));
    }

    #[tokio::test]
    async fn test_create_order_simplified() {
        let mock_server = MockServer::start().await;
        let expected = OrdersNode::build_create_body(&params(create_params())).unwrap();

        Mock::given(method("POST"))
            .and(path("/v1/orders"))
            .and(body_json(&expected))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "id": "order-1",
                "status": "confirmed",
                "delivery_type": "now",
                "courier": {"company": "jne", "type": "reg", "waybill_id": null}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut value = create_params();
        value["simplifyResponse"] = json!(true);
        let result = OrdersNode::new()
            .execute_item(&client_for(&mock_server).await, &params(value))
            .await
            .unwrap();

        assert_eq!(
            result["data"],
            json!({"orderId": "order-1", "status": "confirmed", "courier": "jne", "deliveryType": "now"})
        );
    }

    #[tokio::test]
    async fn test_cancel_order() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/orders/order-1/cancel"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "id": "order-1",
                "status": "cancelled"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = OrdersNode::new()
            .execute_item(
                &client_for(&mock_server).await,
                &params(json!({"operation": "cancel", "orderId": "order-1"})),
            )
            .await
            .unwrap();
        assert_eq!(result["data"]["status"], "cancelled");
    }

    #[tokio::test]
    async fn test_get_order_requires_id() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let error = OrdersNode::new()
            .execute_item(&client_for(&mock_server).await, &params(json!({"operation": "get"})))
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "Order ID is required");
    }
}
