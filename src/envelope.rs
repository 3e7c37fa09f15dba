//! The batch envelope handed to the transport.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::Serialize;

use crate::error::{missing_required_field, AnalyticsResult};
use crate::measurement::Measurement;

/// A named user property value, serialized as `{"value": ...}` per the
/// protocol reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserPropertyValue {
    value: String,
}

impl UserPropertyValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A batch of up to 25 measurements plus the client and destination metadata
/// needed to submit them in one request.
///
/// `measurement_id` and `api_secret` only ever appear in the request URL;
/// [`Analytics::to_payload`] never includes them. An envelope is meant to be
/// reused across batches: push measurements, hand it to
/// [`HttpProtocol`](crate::protocol::HttpProtocol), then call
/// [`clear_events`](Analytics::clear_events) before the next batch.
#[derive(Clone, Debug)]
pub struct Analytics {
    measurement_id: String,
    api_secret: String,
    client_id: String,
    user_id: Option<String>,
    timestamp_micros: i64,
    non_personalized_ads: bool,
    user_properties: BTreeMap<String, UserPropertyValue>,
    events: Vec<Measurement>,
}

impl Analytics {
    pub fn new(
        measurement_id: impl Into<String>,
        api_secret: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            measurement_id: measurement_id.into(),
            api_secret: api_secret.into(),
            client_id: client_id.into(),
            user_id: None,
            timestamp_micros: Utc::now().timestamp_micros(),
            non_personalized_ads: false,
            user_properties: BTreeMap::new(),
            events: Vec::new(),
        }
    }

    pub fn measurement_id(&self) -> &str {
        &self.measurement_id
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn set_user_id(&mut self, user_id: impl Into<String>) {
        self.user_id = Some(user_id.into());
    }

    pub fn timestamp_micros(&self) -> i64 {
        self.timestamp_micros
    }

    /// Overrides the microsecond Unix timestamp defaulted at construction.
    pub fn set_timestamp_micros(&mut self, timestamp_micros: i64) {
        self.timestamp_micros = timestamp_micros;
    }

    pub fn non_personalized_ads(&self) -> bool {
        self.non_personalized_ads
    }

    pub fn set_non_personalized_ads(&mut self, non_personalized_ads: bool) {
        self.non_personalized_ads = non_personalized_ads;
    }

    pub fn user_properties(&self) -> &BTreeMap<String, UserPropertyValue> {
        &self.user_properties
    }

    pub fn set_user_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.user_properties
            .insert(name.into(), UserPropertyValue::new(value));
    }

    /// Appends a measurement; insertion order becomes array order on the wire.
    pub fn push(&mut self, measurement: impl Into<Measurement>) {
        self.events.push(measurement.into());
    }

    pub fn events(&self) -> &[Measurement] {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Builds the query string for the collection URL.
    ///
    /// The destination and auth identifiers travel only here, never in the
    /// request body.
    pub fn to_query_string(&self) -> AnalyticsResult<String> {
        require(&self.measurement_id, "measurement_id")?;
        require(&self.client_id, "client_id")?;
        require(&self.api_secret, "api_secret")?;
        Ok(format!(
            "api_secret={}&measurement_id={}",
            self.api_secret, self.measurement_id
        ))
    }

    /// Projects the envelope into the wire JSON shape without mutating it.
    ///
    /// `user_id` falls back to `client_id` when unset, and both fields are
    /// serialized; the remote endpoint requires `client_id` on every payload.
    pub fn to_payload(&self) -> Payload<'_> {
        let user_id = self
            .user_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or(&self.client_id);
        Payload {
            client_id: &self.client_id,
            user_id,
            timestamp_micros: self.timestamp_micros,
            non_personalized_ads: self.non_personalized_ads,
            user_properties: &self.user_properties,
            events: &self.events,
        }
    }
}

fn require(value: &str, name: &str) -> AnalyticsResult<()> {
    if value.trim().is_empty() {
        return Err(missing_required_field(name));
    }
    Ok(())
}

/// Wire shape of one collection request body.
#[derive(Serialize)]
pub struct Payload<'a> {
    client_id: &'a str,
    user_id: &'a str,
    timestamp_micros: i64,
    non_personalized_ads: bool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    user_properties: &'a BTreeMap<String, UserPropertyValue>,
    events: &'a [Measurement],
}

/// Generates a random 32-character alphanumeric client identifier, for
/// callers that do not already have a stable per-device id.
pub fn generate_client_id() -> String {
    use rand::distributions::Alphanumeric;
    use rand::Rng;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .map(char::from)
        .take(32)
        .collect()
}
