//! Response projections used by the "simplify" option. Projections only copy
//! values that exist in the raw response; missing or null fields are left out.

use serde_json::{Map, Value};

/// Follow a dotted path (`courier.company`) through nested objects
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |current, key| current.get(key))
        .filter(|v| !v.is_null())
}

/// Build an object from `(output key, source path)` pairs
pub fn project(source: &Value, fields: &[(&str, &str)]) -> Value {
    let mut out = Map::new();
    for (key, path) in fields {
        if let Some(value) = lookup(source, path) {
            out.insert((*key).to_string(), value.clone());
        }
    }
    Value::Object(out)
}

/// Project every element of the array at `path`. `None` if there is no array.
pub fn project_list(source: &Value, path: &str, fields: &[(&str, &str)]) -> Option<Value> {
    lookup(source, path)
        .and_then(Value::as_array)
        .map(|entries| Value::Array(entries.iter().map(|e| project(e, fields)).collect()))
}
