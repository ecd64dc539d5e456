use crate::biteship::BiteshipClient;
use crate::catalog::classifier::{classify, DurationUnit, ServiceType, ShippingType, Tier};
use crate::node::{Node, NodeDescription, NodeError, NodeProperty, Parameters, PropertyOption};
use crate::nodes::{courier_options, service_options};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashSet;
use tracing::debug;

const OBJECT: &str = "courier";

#[derive(Debug, Deserialize)]
struct RemoteCourier {
    code: String,
    #[serde(default)]
    name: Option<String>,
    /// Sent as `null` for couriers without services
    #[serde(default)]
    available_types: Option<Vec<RemoteService>>,
}

#[derive(Debug, Deserialize)]
struct RemoteService {
    code: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    is_active: Option<bool>,
}

/// One courier service with its derived metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourierServiceEntry {
    pub available_for_cash_on_delivery: bool,
    pub available_for_proof_of_delivery: bool,
    pub available_for_instant_waybill_id: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courier_name: Option<String>,
    pub courier_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courier_service_name: Option<String>,
    pub courier_service_code: String,
    pub tier: Tier,
    pub description: String,
    pub service_type: ServiceType,
    pub shipping_type: ShippingType,
    pub shipment_duration_range: String,
    pub shipment_duration_unit: DurationUnit,
}

impl CourierServiceEntry {
    fn new(courier: &RemoteCourier, service: &RemoteService) -> Self {
        let courier_code = courier.code.to_lowercase();
        let service_code = service.code.to_lowercase();
        let profile = classify(&courier_code, &service_code);

        Self {
            available_for_cash_on_delivery: profile.cash_on_delivery,
            available_for_proof_of_delivery: profile.proof_of_delivery,
            available_for_instant_waybill_id: profile.instant_waybill_id,
            courier_name: courier.name.clone(),
            courier_code,
            courier_service_name: service.name.clone(),
            courier_service_code: service_code,
            tier: profile.tier,
            description: service.description.clone().unwrap_or_default(),
            service_type: profile.service_type,
            shipping_type: profile.shipping_type,
            shipment_duration_range: profile.duration_range.to_string(),
            shipment_duration_unit: profile.duration_unit,
        }
    }
}

/// Lists couriers and their services, tagged by service tier
pub struct CouriersNode {
    description: NodeDescription,
}

impl Default for CouriersNode {
    fn default() -> Self {
        Self::new()
    }
}

impl CouriersNode {
    pub fn new() -> Self {
        let description = NodeDescription::new(
            "biteshipCouriers",
            "Biteship Couriers",
            "Manage courier-related operations with Biteship API",
        )
        .property(NodeProperty::operation(
            "getAll",
            vec![PropertyOption::new("Get All", "getAll")
                .describe("Get list of all or specific couriers and their services")
                .action("Get all couriers")],
        ))
        .property(
            NodeProperty::multi_options("courierCode", "Couriers", courier_options()).describe(
                "Select one or more couriers to filter the results, or leave empty to get all couriers",
            ),
        )
        .property(
            NodeProperty::multi_options("serviceCode", "Service Codes", service_options()).describe(
                "Select one or more service codes to filter the results, or leave empty to get all services for selected couriers",
            ),
        )
        .property(NodeProperty::collection(
            "additionalFields",
            "Additional Fields",
            vec![NodeProperty::boolean("activeOnly", "Filter Active Only")
                .describe("Only return active/available services")],
        ));

        Self { description }
    }

    async fn get_all(&self, client: &BiteshipClient, params: &Parameters) -> Result<Value, NodeError> {
        let requested = params.string_list("courierCode");
        let courier_codes: HashSet<String> = requested.iter().map(|c| c.to_lowercase()).collect();
        let service_codes: HashSet<String> = params
            .string_list("serviceCode")
            .iter()
            .map(|s| s.to_lowercase())
            .collect();
        let active_only = params
            .collection("additionalFields")
            .get("activeOnly")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        let response = client.get(&["v1", "couriers"], &[]).await?;
        let raw_couriers = response
            .get("couriers")
            .and_then(Value::as_array)
            .ok_or_else(|| NodeError::InvalidResponse("Invalid response: No couriers found".to_string()))?;

        let couriers: Vec<RemoteCourier> = raw_couriers
            .iter()
            .map(|c| serde_json::from_value(c.clone()))
            .collect::<Result<_, _>>()
            .map_err(|e| NodeError::InvalidResponse(format!("Invalid courier entry: {}", e)))?;
        let available: Vec<&str> = couriers.iter().map(|c| c.code.as_str()).collect();

        let selected: Vec<&RemoteCourier> = if courier_codes.is_empty() {
            couriers.iter().collect()
        } else {
            couriers
                .iter()
                .filter(|c| courier_codes.contains(&c.code.to_lowercase()))
                .collect()
        };

        if selected.is_empty() {
            return Ok(json!({
                "success": false,
                "object": OBJECT,
                "error": format!("No couriers found for codes: {}", requested.join(", ")),
                "availableCouriers": available,
            }));
        }

        let mut entries = Vec::new();
        for courier in selected {
            let services = courier
                .available_types
                .iter()
                .flatten()
                .filter(|s| !active_only || s.is_active != Some(false))
                .filter(|s| {
                    service_codes.is_empty()
                        || service_codes.contains(&format!(
                            "{}.{}",
                            courier.code.to_lowercase(),
                            s.code.to_lowercase()
                        ))
                });
            entries.extend(services.map(|s| CourierServiceEntry::new(courier, s)));
        }

        debug!("Classified {} courier service(s)", entries.len());

        if entries.is_empty() {
            return Ok(json!({
                "success": false,
                "object": OBJECT,
                "error": "No services found for selected couriers and service codes",
                "availableCouriers": available,
            }));
        }

        Ok(json!({
            "success": true,
            "object": OBJECT,
            "couriers": entries,
        }))
    }
}

#[async_trait]
impl Node for CouriersNode {
    fn description(&self) -> &NodeDescription {
        &self.description
    }

    fn error_object(&self) -> Option<&'static str> {
        Some(OBJECT)
    }

    async fn execute_item(
        &self,
        client: &BiteshipClient,
        params: &Parameters,
    ) -> Result<Value, NodeError> {
        match params.string("operation").as_str() {
            "getAll" => self.get_all(client, params).await,
            other => Err(NodeError::UnknownOperation(other.to_string())),
        }
    }
}
