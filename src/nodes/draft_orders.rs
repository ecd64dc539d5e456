use crate::biteship::BiteshipClient;
use crate::node::simplify::{lookup, project_list};
use crate::node::{
    Node, NodeDescription, NodeError, NodeProperty, Parameters, PropertyGroup, PropertyOption,
};
use crate::nodes::{item_field, simplify_property, success, FieldKind};
use async_trait::async_trait;
use serde_json::{json, Map, Value};

pub struct DraftOrdersNode {
    description: NodeDescription,
}

impl Default for DraftOrdersNode {
    fn default() -> Self {
        Self::new()
    }
}

impl DraftOrdersNode {
    pub fn new() -> Self {
        let create = &["createDraft"];
        let description = NodeDescription::new(
            "biteshipDraftOrders",
            "Biteship Draft Orders",
            "Manage draft orders with Biteship API",
        )
        .property(NodeProperty::operation(
            "createDraft",
            vec![
                PropertyOption::new("Create Draft", "createDraft")
                    .describe("Create a new draft order")
                    .action("Create draft order"),
                PropertyOption::new("Get Draft", "getDraft")
                    .describe("Get draft order details by ID")
                    .action("Get draft order"),
                PropertyOption::new("Delete Draft", "deleteDraft")
                    .describe("Delete a draft order")
                    .action("Delete draft order"),
            ],
        ))
        .property(
            NodeProperty::string("draftId", "Draft ID")
                .describe("The ID of the draft order")
                .required()
                .show_when("operation", &["getDraft", "deleteDraft"]),
        )
        .property(
            NodeProperty::string("originContactName", "Origin Contact Name")
                .describe("Origin contact person name")
                .required()
                .show_when("operation", create),
        )
        .property(
            NodeProperty::string("originContactPhone", "Origin Contact Phone")
                .describe("Origin contact phone number")
                .required()
                .show_when("operation", create),
        )
        .property(
            NodeProperty::string("originAddress", "Origin Address")
                .describe("Origin full address")
                .required()
                .show_when("operation", create),
        )
        .property(
            NodeProperty::number("originPostalCode", "Origin Postal Code", 0)
                .describe("Origin postal code")
                .required()
                .show_when("operation", create),
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
                        item_field("value", "Value (IDR)", FieldKind::Number(0), "Item value in IDR"),
                        item_field("weight", "Weight (grams)", FieldKind::Number(0), "Item weight in grams"),
                        item_field("quantity", "Quantity", FieldKind::Number(1), "Item quantity"),
                    ],
                )],
            )
            .show_when("operation", create),
        )
        .property(simplify_property(
            "Whether to return a simplified version of the response",
        ));

        Self { description }
    }

    /// Request body for `POST /v1/draft-orders`
    pub fn build_create_body(params: &Parameters) -> Result<Value, NodeError> {
        let message = "All origin fields (contact name, phone, address, postal code) are required";
        let contact_name = params.require_string("originContactName", message)?;
        let contact_phone = params.require_string("originContactPhone", message)?;
        let address = params.require_string("originAddress", message)?;
        let postal_code = params.require_number("originPostalCode", message)?;

        let items = params.fixed_collection("items", "item");
        if items.is_empty() {
            return Err(NodeError::MissingField("At least one item is required".to_string()));
        }

        Ok(json!({
            "origin_contact_name": contact_name,
            "origin_contact_phone": contact_phone,
            "origin_address": address,
            "origin_postal_code": postal_code,
            "items": items,
        }))
    }

    fn simplify(response: &Value) -> Value {
        let mut out = Map::new();
        if let Some(id) = lookup(response, "id") {
            out.insert("draftId".to_string(), id.clone());
        }
        if let Some(status) = lookup(response, "status") {
            out.insert("status".to_string(), status.clone());
        }
        if let Some(items) = project_list(response, "items", &[("name", "name"), ("quantity", "quantity")]) {
            out.insert("items".to_string(), items);
        }
        Value::Object(out)
    }
}

#[async_trait]
impl Node for DraftOrdersNode {
    fn description(&self) -> &NodeDescription {
        &self.description
    }

    async fn execute_item(
        &self,
        client: &BiteshipClient,
        params: &Parameters,
    ) -> Result<Value, NodeError> {
        let response = match params.string("operation").as_str() {
            "createDraft" => {
                let body = Self::build_create_body(params)?;
                client.post(&["v1", "draft-orders"], Some(&body)).await?
            }
            "getDraft" => {
                let draft_id = params.require_string("draftId", "Draft ID is required")?;
                client.get(&["v1", "draft-orders", draft_id.as_str()], &[]).await?
            }
            "deleteDraft" => {
                let draft_id = params.require_string("draftId", "Draft ID is required")?;
                client.delete(&["v1", "draft-orders", draft_id.as_str()]).await?
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
    use wiremock::{
        matchers::{body_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    async fn client_for(server: &MockServer) -> BiteshipClient {
        BiteshipClient::with_credentials(&server.uri(), Credentials::new("key", Environment::Test)).unwrap()
    }

    fn params(value: Value) -> Parameters {
        let mut params = Parameters::from_value(value).unwrap();
        DraftOrdersNode::new().description().apply_defaults(&mut params);
        params
    }

    fn create_params() -> Value {
        json!({
            "operation": "createDraft",
            "originContactName": "Amir",
            "originContactPhone": "0812345678",
            "originAddress": "Jl. Sudirman 1",
            "originPostalCode": 12440,
            "items": {"item": [{"name": "Shoes", "value": 199000, "weight": 800, "quantity": 1}]}
        })
    }

    #[test]
    fn test_build_create_body() {
        let body = DraftOrdersNode::build_create_body(&params(create_params())).unwrap();
        assert_eq!(body["origin_postal_code"], 12440);
        assert_eq!(body["items"][0]["name"], "Shoes");
    }

    #[test]
    fn test_create_requires_origin_fields() {
        let mut value = create_params();
        value["originPostalCode"] = json!(0);
        let error = DraftOrdersNode::build_create_body(&params(value)).unwrap_err();
        assert_eq!(
            error.to_string(),
            "All origin fields (contact name, phone, address, postal code) are required"
        );
    }

    #[test]
    fn test_create_requires_items() {
        let mut value = create_params();
        value["items"] = json!({});
        let error = DraftOrdersNode::build_create_body(&params(value)).unwrap_err();
        assert_eq!(error.to_string(), "At least one item is required");
    }

    #[tokio::test]
    async fn test_create_draft_posts_body() {
        let mock_server = MockServer::start().await;
        let expected = DraftOrdersNode::build_create_body(&params(create_params())).unwrap();

        Mock::given(method("POST"))
            .and(path("/v1/draft-orders"))
            .and(body_json(&expected))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "id": "draft-1",
                "status": "placed",
                "items": [{"name": "Shoes", "quantity": 1, "value": 199000}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let node = DraftOrdersNode::new();
        let mut value = create_params();
        value["simplifyResponse"] = json!(true);
        let result = node
            .execute_item(&client_for(&mock_server).await, &params(value))
            .await
            .unwrap();

        assert_eq!(
            result,
            json!({
                "success": true,
                "data": {"draftId": "draft-1", "status": "placed", "items": [{"name": "Shoes", "quantity": 1}]}
            })
        );
    }

    #[tokio::test]
    async fn test_get_and_delete_draft() {
        let mock_server = MockServer::start().await;
        let raw = json!({"success": true, "id": "draft-9", "status": "placed"});

        Mock::given(method("GET"))
            .and(path("/v1/draft-orders/draft-9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&raw))
            .mount(&mock_server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/v1/draft-orders/draft-9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .mount(&mock_server)
            .await;

        let node = DraftOrdersNode::new();
        let client = client_for(&mock_server).await;

        let got = node
            .execute_item(&client, &params(json!({"operation": "getDraft", "draftId": "draft-9"})))
            .await
            .unwrap();
        assert_eq!(got, json!({"success": true, "data": raw}));

        let deleted = node
            .execute_item(&client, &params(json!({"operation": "deleteDraft", "draftId": "draft-9"})))
            .await
            .unwrap();
        assert_eq!(deleted["data"]["success"], true);
    }

    #[tokio::test]
    async fn test_missing_draft_id_sends_nothing() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let node = DraftOrdersNode::new();
        let error = node
            .execute_item(&client_for(&mock_server).await, &params(json!({"operation": "getDraft"})))
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "Draft ID is required");
    }
}
