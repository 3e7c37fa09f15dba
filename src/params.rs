//! The flat key/value store backing every measurement's typed accessors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single measurement parameter value.
///
/// GA4 event parameters are plain JSON scalars. The untagged representation
/// keeps the wire format flat: `Text` serializes as a JSON string and
/// `Number` as a JSON number.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Text(String),
    Number(f64),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Text(value) => Some(value),
            ParamValue::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Text(_) => None,
            ParamValue::Number(value) => Some(*value),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

/// Ordered parameter map owned by exactly one measurement.
///
/// Reads are typed: asking for a string under a key that holds a number
/// yields `None` rather than a coerced value, so a mismatch between setter
/// and getter is visible at the accessor instead of silently altering the
/// payload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(ParamValue::as_str)
    }

    pub fn get_number(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(ParamValue::as_number)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_reads_do_not_coerce() {
        let mut params = Params::new();
        params.set("category", "checkout");
        params.set("value", 42.0);

        assert_eq!(params.get_str("category"), Some("checkout"));
        assert_eq!(params.get_number("value"), Some(42.0));
        assert_eq!(params.get_str("value"), None);
        assert_eq!(params.get_number("category"), None);
        assert_eq!(params.get_str("absent"), None);
    }

    #[test]
    fn serializes_as_flat_json_object() {
        let mut params = Params::new();
        params.set("action", "click");
        params.set("time", 12.5);

        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"action": "click", "time": 12.5})
        );
    }
}
