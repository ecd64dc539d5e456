use crate::node::error::NodeError;
use serde_json::{Map, Number, Value};

/// Parameter values of one input item
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters(Map<String, Value>);

impl Parameters {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn from_value(value: Value) -> Result<Self, NodeError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::new()),
            other => Err(NodeError::InvalidParameter(format!(
                "Item parameters must be a JSON object, got {}",
                type_name(&other)
            ))),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn insert(&mut self, name: &str, value: Value) {
        self.0.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// String value; numbers are rendered, anything else is empty
    pub fn string(&self, name: &str) -> String {
        match self.0.get(name) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }

    /// Numeric value, keeping integers as integers. Numeric strings are parsed.
    pub fn number(&self, name: &str) -> Option<Number> {
        match self.0.get(name) {
            Some(Value::Number(n)) => Some(n.clone()),
            Some(Value::String(s)) => parse_number(s.trim()),
            _ => None,
        }
    }

    pub fn boolean(&self, name: &str) -> bool {
        match self.0.get(name) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    /// List of strings. A comma separated string is split.
    pub fn string_list(&self, name: &str) -> Vec<String> {
        match self.0.get(name) {
            Some(Value::Array(values)) => values
                .iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect(),
            Some(Value::String(s)) => s
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Sub-fields of a collection property; empty when unset
    pub fn collection(&self, name: &str) -> Map<String, Value> {
        match self.0.get(name) {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        }
    }

    /// Entries of one group of a fixed collection (`items.item`). A single
    /// object entry is returned as a one-element list.
    pub fn fixed_collection(&self, name: &str, group: &str) -> Vec<Value> {
        match self.0.get(name).and_then(|v| v.get(group)) {
            Some(Value::Array(entries)) => entries.clone(),
            Some(entry @ Value::Object(_)) => vec![entry.clone()],
            _ => Vec::new(),
        }
    }

    /// JSON object parameter. JSON text is parsed; unset or blank yields an
    /// empty object.
    pub fn json_object(&self, name: &str) -> Result<Map<String, Value>, NodeError> {
        let parsed = match self.0.get(name) {
            None | Some(Value::Null) => return Ok(Map::new()),
            Some(Value::String(text)) if text.trim().is_empty() => return Ok(Map::new()),
            Some(Value::String(text)) => serde_json::from_str(text).map_err(|e| {
                NodeError::InvalidParameter(format!("{} must be valid JSON: {}", name, e))
            })?,
            Some(other) => other.clone(),
        };

        match parsed {
            Value::Object(map) => Ok(map),
            other => Err(NodeError::InvalidParameter(format!(
                "{} must be a JSON object, got {}",
                name,
                type_name(&other)
            ))),
        }
    }

    /// Non-empty string or the given error message
    pub fn require_string(&self, name: &str, message: &str) -> Result<String, NodeError> {
        let value = self.string(name);
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(NodeError::MissingField(message.to_string()));
        }
        Ok(trimmed.to_string())
    }

    /// Non-zero number or the given error message
    pub fn require_number(&self, name: &str, message: &str) -> Result<Number, NodeError> {
        match self.number(name) {
            Some(n) if n.as_f64().map_or(false, |f| f != 0.0) => Ok(n),
            _ => Err(NodeError::MissingField(message.to_string())),
        }
    }
}

impl From<Map<String, Value>> for Parameters {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn parse_number(s: &str) -> Option<Number> {
    if let Ok(i) = s.parse::<i64>() {
        return Some(Number::from(i));
    }
    s.parse::<f64>().ok().and_then(Number::from_f64)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
