//! Static field schema a node publishes to its host.
//!
//! The types serialize in the camelCase shape workflow hosts expect
//! (`displayName`, `displayOptions`, `typeOptions`, ...). Constructors and
//! builder methods keep the node definitions in `crate::nodes` compact.

use crate::node::params::Parameters;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescription {
    pub display_name: String,
    pub name: String,
    pub description: String,
    pub subtitle: String,
    pub version: u32,
    pub credentials: Vec<CredentialRequirement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_defaults: Option<RequestDefaults>,
    pub properties: Vec<NodeProperty>,
}

impl NodeDescription {
    pub fn new(name: &str, display_name: &str, description: &str) -> Self {
        Self {
            display_name: display_name.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            subtitle: "={{$parameter[\"operation\"]}}".to_string(),
            version: 1,
            credentials: vec![CredentialRequirement {
                name: crate::biteship::CREDENTIAL_NAME.to_string(),
                required: true,
            }],
            request_defaults: None,
            properties: Vec::new(),
        }
    }

    pub fn subtitle(mut self, subtitle: &str) -> Self {
        self.subtitle = subtitle.to_string();
        self
    }

    pub fn request_defaults(mut self, defaults: RequestDefaults) -> Self {
        self.request_defaults = Some(defaults);
        self
    }

    pub fn property(mut self, property: NodeProperty) -> Self {
        self.properties.push(property);
        self
    }

    pub fn find_property(&self, name: &str) -> Option<&NodeProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Fill parameters the caller did not set with their declared defaults
    pub fn apply_defaults(&self, params: &mut Parameters) {
        for property in &self.properties {
            if !params.contains(&property.name) {
                params.insert(&property.name, property.default.clone());
            }
        }
    }

    /// Properties shown for the given parameter values
    pub fn visible_properties<'a>(
        &'a self,
        params: &'a Parameters,
    ) -> impl Iterator<Item = &'a NodeProperty> + 'a {
        self.properties.iter().filter(move |p| p.is_visible(params))
    }

    /// Values accepted by the `operation` property
    pub fn operations(&self) -> Vec<String> {
        self.find_property("operation")
            .map(|p| {
                p.options
                    .iter()
                    .filter_map(|o| o.value.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialRequirement {
    pub name: String,
    pub required: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDefaults {
    pub base_url: String,
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyKind {
    String,
    Number,
    Boolean,
    Options,
    MultiOptions,
    Collection,
    FixedCollection,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProperty {
    pub display_name: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    pub default: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub no_data_expression: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_options: Option<TypeOptions>,
    /// Choices of an `options` / `multiOptions` property
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<PropertyOption>,
    /// Sub-fields of a `collection` property
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<NodeProperty>,
    /// Named groups of a `fixedCollection` property
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<PropertyGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_options: Option<DisplayOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing: Option<PropertyRouting>,
}

impl NodeProperty {
    pub fn new(name: &str, display_name: &str, kind: PropertyKind, default: Value) -> Self {
        Self {
            display_name: display_name.to_string(),
            name: name.to_string(),
            kind,
            default,
            description: None,
            required: false,
            no_data_expression: false,
            placeholder: None,
            type_options: None,
            options: Vec::new(),
            fields: Vec::new(),
            groups: Vec::new(),
            display_options: None,
            routing: None,
        }
    }

    pub fn string(name: &str, display_name: &str) -> Self {
        Self::new(name, display_name, PropertyKind::String, Value::from(""))
    }

    pub fn number(name: &str, display_name: &str, default: i64) -> Self {
        Self::new(name, display_name, PropertyKind::Number, Value::from(default))
    }

    pub fn boolean(name: &str, display_name: &str) -> Self {
        Self::new(name, display_name, PropertyKind::Boolean, Value::Bool(false))
    }

    pub fn options(name: &str, display_name: &str, default: &str, options: Vec<PropertyOption>) -> Self {
        let mut property = Self::new(name, display_name, PropertyKind::Options, Value::from(default));
        property.options = options;
        property
    }

    pub fn multi_options(name: &str, display_name: &str, options: Vec<PropertyOption>) -> Self {
        let mut property =
            Self::new(name, display_name, PropertyKind::MultiOptions, Value::Array(Vec::new()));
        property.options = options;
        property
    }

    pub fn collection(name: &str, display_name: &str, fields: Vec<NodeProperty>) -> Self {
        let mut property = Self::new(
            name,
            display_name,
            PropertyKind::Collection,
            Value::Object(Default::default()),
        );
        property.placeholder = Some("Add Field".to_string());
        property.fields = fields;
        property
    }

    pub fn fixed_collection(
        name: &str,
        display_name: &str,
        multiple_values: bool,
        groups: Vec<PropertyGroup>,
    ) -> Self {
        let mut property = Self::new(
            name,
            display_name,
            PropertyKind::FixedCollection,
            Value::Object(Default::default()),
        );
        if multiple_values {
            property.type_options = Some(TypeOptions {
                multiple_values: true,
            });
        }
        property.groups = groups;
        property
    }

    pub fn json(name: &str, display_name: &str) -> Self {
        Self::new(name, display_name, PropertyKind::Json, Value::from("{}"))
    }

    pub fn operation(default: &str, options: Vec<PropertyOption>) -> Self {
        let mut property = Self::options("operation", "Operation", default, options);
        property.no_data_expression = true;
        property
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn no_data_expression(mut self) -> Self {
        self.no_data_expression = true;
        self
    }

    /// Show this property only when `field` has one of `values`
    pub fn show_when(mut self, field: &str, values: &[&str]) -> Self {
        self.display_options
            .get_or_insert_with(DisplayOptions::default)
            .show
            .insert(field.to_string(), values.iter().map(|v| v.to_string()).collect());
        self
    }

    pub fn route_to(mut self, body_field: &str, transform: RoutingTransform) -> Self {
        self.routing = Some(PropertyRouting {
            body: body_field.to_string(),
            transform,
        });
        self
    }

    pub fn is_visible(&self, params: &Parameters) -> bool {
        self.display_options
            .as_ref()
            .map_or(true, |d| d.is_visible(params))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeOptions {
    pub multiple_values: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyOption {
    pub name: String,
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing: Option<RequestRouting>,
}

impl PropertyOption {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: Value::from(value),
            description: None,
            action: None,
            routing: None,
        }
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn action(mut self, action: &str) -> Self {
        self.action = Some(action.to_string());
        self
    }

    pub fn route(mut self, method: &str, url: &str) -> Self {
        self.routing = Some(RequestRouting {
            method: method.to_string(),
            url: url.to_string(),
        });
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyGroup {
    pub name: String,
    pub display_name: String,
    pub values: Vec<NodeProperty>,
}

impl PropertyGroup {
    pub fn new(name: &str, display_name: &str, values: Vec<NodeProperty>) -> Self {
        Self {
            name: name.to_string(),
            display_name: display_name.to_string(),
            values,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayOptions {
    pub show: BTreeMap<String, Vec<String>>,
}

impl DisplayOptions {
    pub fn is_visible(&self, params: &Parameters) -> bool {
        self.show.iter().all(|(field, allowed)| {
            let current = params.string(field);
            allowed.iter().any(|v| *v == current)
        })
    }
}

/// Endpoint an operation is routed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestRouting {
    pub method: String,
    pub url: String,
}

/// Where a property's value lands in the request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRouting {
    pub body: String,
    pub transform: RoutingTransform,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "with")]
pub enum RoutingTransform {
    /// Value copied unchanged
    Direct,
    /// List joined into one string
    Join(String),
    /// Entries of a fixed-collection group
    Group(String),
}

impl PropertyRouting {
    /// Resolve the body value for `property` from the item parameters
    pub fn resolve(&self, property: &NodeProperty, params: &Parameters) -> Value {
        match &self.transform {
            RoutingTransform::Direct => params
                .get(&property.name)
                .cloned()
                .unwrap_or_else(|| property.default.clone()),
            RoutingTransform::Join(separator) => {
                Value::from(params.string_list(&property.name).join(separator))
            }
            RoutingTransform::Group(group) => {
                Value::Array(params.fixed_collection(&property.name, group))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_description() -> NodeDescription {
        NodeDescription::new("sample", "Sample", "Sample node")
            .property(NodeProperty::operation(
                "get",
                vec![
                    PropertyOption::new("Get", "get").action("Get thing"),
                    PropertyOption::new("Delete", "delete"),
                ],
            ))
            .property(
                NodeProperty::string("thingId", "Thing ID")
                    .required()
                    .show_when("operation", &["get", "delete"]),
            )
            .property(NodeProperty::number("postalCode", "Postal Code", 0).show_when("operation", &["create"]))
            .property(NodeProperty::boolean("simplifyResponse", "Simplify Response"))
    }

    #[test]
    fn test_apply_defaults_fills_missing_only() {
        let description = sample_description();
        let mut params = Parameters::from_value(json!({"thingId": "abc"})).unwrap();

        description.apply_defaults(&mut params);

        assert_eq!(params.string("operation"), "get");
        assert_eq!(params.string("thingId"), "abc");
        assert!(!params.boolean("simplifyResponse"));
        assert_eq!(params.get("postalCode"), Some(&json!(0)));
    }

    #[test]
    fn test_display_options_visibility() {
        let description = sample_description();
        let mut params = Parameters::from_value(json!({"operation": "create"})).unwrap();
        description.apply_defaults(&mut params);

        let visible: Vec<&str> = description
            .visible_properties(&params)
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(visible, vec!["operation", "postalCode", "simplifyResponse"]);
    }

    #[test]
    fn test_operations_listed() {
        assert_eq!(sample_description().operations(), vec!["get", "delete"]);
    }

    #[test]
    fn test_serialized_shape() {
        let value = serde_json::to_value(sample_description()).unwrap();
        assert_eq!(value["displayName"], "Sample");
        assert_eq!(value["credentials"][0]["name"], "biteshipApi");

        let thing = &value["properties"][1];
        assert_eq!(thing["type"], "string");
        assert_eq!(thing["required"], true);
        assert_eq!(thing["displayOptions"]["show"]["operation"], json!(["get", "delete"]));
        assert!(thing.get("routing").is_none());

        let operation = &value["properties"][0];
        assert_eq!(operation["noDataExpression"], true);
        assert_eq!(operation["options"][0]["action"], "Get thing");
    }

    #[test]
    fn test_routing_resolve() {
        let couriers = NodeProperty::multi_options("couriers", "Couriers", vec![])
            .route_to("couriers", RoutingTransform::Join(",".to_string()));
        let items = NodeProperty::fixed_collection("items", "Items", true, vec![])
            .route_to("items", RoutingTransform::Group("item".to_string()));
        let params = Parameters::from_value(json!({
            "couriers": ["jne", "sicepat"],
            "items": {"item": [{"name": "Shoes"}]}
        }))
        .unwrap();

        let routing = couriers.routing.as_ref().unwrap();
        assert_eq!(routing.resolve(&couriers, &params), json!("jne,sicepat"));

        let routing = items.routing.as_ref().unwrap();
        assert_eq!(routing.resolve(&items, &params), json!([{"name": "Shoes"}]));
    }
}
