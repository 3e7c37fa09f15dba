//! Response model for the debug/validation endpoint.

use serde::Deserialize;

/// Structured feedback returned by the debug endpoint for one submitted
/// batch. An empty message list means the payload passed validation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ValidationResponse {
    #[serde(rename = "validationMessages", default)]
    pub validation_messages: Vec<ValidationMessage>,
}

impl ValidationResponse {
    pub fn is_valid(&self) -> bool {
        self.validation_messages.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ValidationMessage {
    #[serde(default)]
    pub description: String,
    #[serde(rename = "fieldPath", default)]
    pub field_path: String,
    #[serde(rename = "validationCode", default)]
    pub validation_code: String,
}
