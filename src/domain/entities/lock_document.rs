//! Raw lock document
//!
//! The JSON object read from a lockfile, before any semantic checks.

use serde_json::{Map, Value};

/// Parsed but unvalidated lockfile content
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LockDocument(Map<String, Value>);

impl LockDocument {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Accept a JSON value if it is an object.
    ///
    /// On failure returns the JSON type that was found instead.
    pub fn from_value(value: Value) -> Result<Self, &'static str> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(json_type_name(&other)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_objects() {
        let doc = LockDocument::from_value(json!({"name": "web"})).unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get("name"), Some(&json!("web")));
    }

    #[test]
    fn reports_type_of_non_objects() {
        assert_eq!(LockDocument::from_value(json!([1, 2])), Err("array"));
        assert_eq!(LockDocument::from_value(json!("text")), Err("string"));
        assert_eq!(LockDocument::from_value(Value::Null), Err("null"));
    }
}
