//! Row data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Shown for values a row does not carry.
pub const PLACEHOLDER: &str = "—";

/// One record of table data: a JSON object keyed by column key.
///
/// Rows have no declared shape beyond what the columns read, so host API
/// payloads deserialize straight into them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Map<String, Value>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Get a value. JSON `null` counts as missing.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Display text for a field, or the placeholder when it is missing.
    pub fn display(&self, key: &str) -> String {
        display_value(self.get(key))
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Row {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Default text for a cell value.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => PLACEHOLDER.to_string(),
        Some(Value::String(s)) if s.is_empty() => PLACEHOLDER.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => if *b { "Yes" } else { "No" }.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_and_null_render_placeholder() {
        let row = Row::new().with("name", "Layer A").with("note", Value::Null);
        assert_eq!(row.display("name"), "Layer A");
        assert_eq!(row.display("note"), PLACEHOLDER);
        assert_eq!(row.display("absent"), PLACEHOLDER);
    }

    #[test]
    fn test_scalar_display() {
        let row: Row = serde_json::from_value(json!({
            "birds": 1200,
            "vaccinated": true,
            "weight": 1.75,
            "tags": ["a"]
        }))
        .unwrap();
        assert_eq!(row.display("birds"), "1200");
        assert_eq!(row.display("vaccinated"), "Yes");
        assert_eq!(row.display("weight"), "1.75");
        assert_eq!(row.display("tags"), "[\"a\"]");
    }
}
