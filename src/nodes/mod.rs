pub mod couriers;
pub mod draft_orders;
pub mod locations;
pub mod maps;
pub mod orders;
pub mod rates;
pub mod tracking;

pub use couriers::CouriersNode;
pub use draft_orders::DraftOrdersNode;
pub use locations::LocationsNode;
pub use maps::MapsNode;
pub use orders::OrdersNode;
pub use rates::RatesNode;
pub use tracking::TrackingNode;

use crate::catalog::{COURIERS, SERVICES};
use crate::node::{NodeProperty, PropertyOption};
use serde_json::{json, Value};

fn courier_options() -> Vec<PropertyOption> {
    COURIERS
        .iter()
        .map(|c| PropertyOption::new(c.name, c.code))
        .collect()
}

fn service_options() -> Vec<PropertyOption> {
    SERVICES
        .iter()
        .map(|s| PropertyOption::new(s.name, s.code).describe(s.description))
        .collect()
}

fn simplify_property(description: &str) -> NodeProperty {
    NodeProperty::boolean("simplifyResponse", "Simplify Response").describe(description)
}

fn item_field(name: &str, display_name: &str, kind: FieldKind, description: &str) -> NodeProperty {
    let property = match kind {
        FieldKind::Text => NodeProperty::string(name, display_name),
        FieldKind::Number(default) => NodeProperty::number(name, display_name, default),
    };
    property.describe(description)
}

enum FieldKind {
    Text,
    Number(i64),
}

/// `{success: true, data}` envelope shared by most nodes
fn success(data: Value) -> Value {
    json!({ "success": true, "data": data })
}
