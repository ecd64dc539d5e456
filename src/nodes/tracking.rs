use crate::biteship::BiteshipClient;
use crate::node::simplify::{project, project_list};
use crate::node::{Node, NodeDescription, NodeError, NodeProperty, Parameters, PropertyOption};
use crate::nodes::{simplify_property, success};
use async_trait::async_trait;
use serde_json::Value;

pub struct TrackingNode {
    description: NodeDescription,
}

impl Default for TrackingNode {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackingNode {
    pub fn new() -> Self {
        let waybill = &["trackByWaybill"];
        let description = NodeDescription::new(
            "biteshipTracking",
            "Biteship Tracking",
            "Track shipments with Biteship API",
        )
        .property(NodeProperty::operation(
            "trackByOrderId",
            vec![
                PropertyOption::new("Track by Order ID", "trackByOrderId")
                    .describe("Track shipment by order ID")
                    .action("Track by order ID"),
                PropertyOption::new("Track by Waybill", "trackByWaybill")
                    .describe("Track shipment by waybill ID and courier code")
                    .action("Track by waybill"),
            ],
        ))
        .property(
            NodeProperty::string("orderId", "Order ID")
                .describe("The ID of the order to track")
                .required()
                .show_when("operation", &["trackByOrderId"]),
        )
        .property(
            NodeProperty::string("waybillId", "Waybill ID")
                .describe("The waybill ID of the shipment")
                .required()
                .show_when("operation", waybill),
        )
        .property(
            NodeProperty::string("courierCode", "Courier Code")
                .describe("The courier code (e.g., jne, sicepat)")
                .required()
                .show_when("operation", waybill),
        )
        .property(simplify_property(
            "Whether to return a simplified version of the response",
        ));

        Self { description }
    }

    fn simplify(response: &Value) -> Value {
        let mut simplified = project(
            response,
            &[
                ("trackingId", "tracking_id"),
                ("status", "status"),
                ("courier", "courier.company"),
            ],
        );
        if let Some(history) = project_list(response, "history", &[("status", "status"), ("timestamp", "timestamp")]) {
            simplified["history"] = history;
        }
        simplified
    }
}

#[async_trait]
impl Node for TrackingNode {
    fn description(&self) -> &NodeDescription {
        &self.description
    }

    async fn execute_item(
        &self,
        client: &BiteshipClient,
        params: &Parameters,
    ) -> Result<Value, NodeError> {
        let response = match params.string("operation").as_str() {
            "trackByOrderId" => {
                let order_id = params.require_string("orderId", "Order ID is required")?;
                client.get(&["v1", "trackings", order_id.as_str()], &[]).await?
            }
            "trackByWaybill" => {
                let message = "Waybill ID and courier code are required";
                let waybill_id = params.require_string("waybillId", message)?;
                let courier_code = params.require_string("courierCode", message)?;
                client
                    .get(
                        &["v1", "trackings", waybill_id.as_str(), "couriers", courier_code.as_str()],
                        &[],
                    )
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
