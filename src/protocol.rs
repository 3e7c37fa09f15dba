//! HTTP transport for the GA4 Measurement Protocol.
//!
//! Each operation is one stateless request/response cycle: preconditions are
//! checked before any network I/O, the envelope is serialized, and the result
//! is surfaced to the caller unchanged. Batching, retries and envelope reuse
//! are the caller's responsibility.

use std::time::Duration;

use log::debug;
use reqwest::header::{ACCEPT_LANGUAGE, CONTENT_TYPE, USER_AGENT};
use reqwest::Client;

use crate::envelope::Analytics;
use crate::error::{
    decode_error, internal_error, no_validation_response, payload_too_large, too_many_events,
    transport_error, AnalyticsResult,
};
use crate::platform;
use crate::validation::ValidationResponse;

const COLLECT_URL: &str = "https://www.google-analytics.com/mp/collect";
const DEBUG_COLLECT_URL: &str = "https://www.google-analytics.com/debug/mp/collect";

/// A single request may carry at most this many events.
pub const MAX_EVENTS_PER_REQUEST: usize = 25;
/// Upper bound on the UTF-8 encoded request body.
pub const MAX_PAYLOAD_BYTES: usize = 130_000;

const CLIENT_USER_AGENT: &str =
    concat!("ga4-measurement-protocol-rs/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Stateless transport for submitting and validating analytics envelopes.
///
/// Holds nothing but a `reqwest` client and the endpoint URLs; it retains no
/// state between calls and is safe to share across tasks.
#[derive(Clone, Debug)]
pub struct HttpProtocol {
    client: Client,
    collect_url: String,
    debug_collect_url: String,
}

impl HttpProtocol {
    /// Creates a transport targeting the production GA4 endpoints, with a
    /// default request timeout.
    pub fn new() -> AnalyticsResult<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|err| internal_error(format!("failed to build HTTP client: {err}")))?;
        Ok(Self::with_client(client))
    }

    /// Creates a transport over a caller-supplied HTTP client. Timeouts,
    /// proxies and TLS configuration stay under the caller's control.
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            collect_url: COLLECT_URL.to_string(),
            debug_collect_url: DEBUG_COLLECT_URL.to_string(),
        }
    }

    /// Overrides both endpoint URLs. Primarily for tests and emulators.
    pub fn with_endpoints(
        mut self,
        collect_url: impl Into<String>,
        debug_collect_url: impl Into<String>,
    ) -> Self {
        self.collect_url = collect_url.into();
        self.debug_collect_url = debug_collect_url.into();
        self
    }

    /// Submits the envelope's events to the collection endpoint.
    ///
    /// Fails before any network I/O when the envelope has more than
    /// [`MAX_EVENTS_PER_REQUEST`] events, is missing a required identifier,
    /// or encodes to more than [`MAX_PAYLOAD_BYTES`] bytes. A non-2xx status
    /// surfaces as a transport error; no response body is read on success.
    pub async fn post_measurements(&self, analytics: &Analytics) -> AnalyticsResult<()> {
        check_event_count(analytics)?;
        let query = analytics.to_query_string()?;
        let body = encode_payload(analytics)?;

        debug!(
            "posting {} event(s) ({} bytes) to the collection endpoint",
            analytics.events().len(),
            body.len()
        );

        let response = self
            .client
            .post(format!("{}?{}", self.collect_url, query))
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|err| transport_error(format!("failed to post measurements: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(transport_error(format!(
                "collection endpoint returned status {status}"
            )));
        }
        Ok(())
    }

    /// Submits the envelope to the debug endpoint and returns its structured
    /// feedback without recording anything.
    ///
    /// Before serialization the envelope's user properties are populated with
    /// platform and locale metadata, a deliberate side effect on the caller's
    /// envelope mirroring what the debug endpoint expects to see.
    pub async fn validate_measurements(
        &self,
        analytics: &mut Analytics,
    ) -> AnalyticsResult<ValidationResponse> {
        check_event_count(analytics)?;
        let query = analytics.to_query_string()?;

        let os = platform::os_name();
        let locale = platform::current_locale();
        analytics.set_user_property("platform", os);
        analytics.set_user_property("platform_version", platform::os_description());
        analytics.set_user_property("framework", CLIENT_USER_AGENT);
        analytics.set_user_property("language", locale.clone());

        let body = encode_payload(analytics)?;

        debug!(
            "validating {} event(s) ({} bytes) against the debug endpoint",
            analytics.events().len(),
            body.len()
        );

        let response = self
            .client
            .post(format!("{}?{}", self.debug_collect_url, query))
            .header(USER_AGENT, format!("Mozilla/5.0 ({}; {})", os, platform::arch()))
            .header(ACCEPT_LANGUAGE, locale)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|err| transport_error(format!("failed to validate measurements: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(transport_error(format!(
                "validation endpoint returned status {status}"
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|err| transport_error(format!("failed to read validation response: {err}")))?;
        if text.trim().is_empty() {
            return Err(no_validation_response());
        }

        let parsed: ValidationResponse = serde_json::from_str(&text)
            .map_err(|err| decode_error(format!("malformed validation response: {err}")))?;
        if !parsed.is_valid() {
            debug!(
                "validation returned {} message(s)",
                parsed.validation_messages.len()
            );
        }
        Ok(parsed)
    }
}

fn check_event_count(analytics: &Analytics) -> AnalyticsResult<()> {
    let count = analytics.events().len();
    if count > MAX_EVENTS_PER_REQUEST {
        return Err(too_many_events(count));
    }
    Ok(())
}

fn encode_payload(analytics: &Analytics) -> AnalyticsResult<Vec<u8>> {
    let body = serde_json::to_vec(&analytics.to_payload())
        .map_err(|err| internal_error(format!("failed to serialize payload: {err}")))?;
    if body.len() > MAX_PAYLOAD_BYTES {
        return Err(payload_too_large(body.len()));
    }
    Ok(body)
}
