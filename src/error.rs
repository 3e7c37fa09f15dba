use std::fmt::{Display, Formatter};

/// Reference documentation for the protocol limits surfaced in error messages.
const PROTOCOL_GUIDE: &str =
    "https://developers.google.com/analytics/devguides/collection/protocol/ga4";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnalyticsErrorCode {
    MissingRequiredField,
    TooManyEvents,
    PayloadTooLarge,
    Transport,
    NoValidationResponse,
    Decode,
    Internal,
}

impl AnalyticsErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyticsErrorCode::MissingRequiredField => "analytics/missing-required-field",
            AnalyticsErrorCode::TooManyEvents => "analytics/too-many-events",
            AnalyticsErrorCode::PayloadTooLarge => "analytics/payload-too-large",
            AnalyticsErrorCode::Transport => "analytics/transport",
            AnalyticsErrorCode::NoValidationResponse => "analytics/no-validation-response",
            AnalyticsErrorCode::Decode => "analytics/decode",
            AnalyticsErrorCode::Internal => "analytics/internal",
        }
    }
}

#[derive(Clone, Debug)]
pub struct AnalyticsError {
    pub code: AnalyticsErrorCode,
    message: String,
}

impl AnalyticsError {
    pub fn new(code: AnalyticsErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl Display for AnalyticsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code_str())
    }
}

impl std::error::Error for AnalyticsError {}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

pub fn missing_required_field(name: &str) -> AnalyticsError {
    AnalyticsError::new(
        AnalyticsErrorCode::MissingRequiredField,
        format!("{name} must not be empty"),
    )
}

pub fn too_many_events(count: usize) -> AnalyticsError {
    AnalyticsError::new(
        AnalyticsErrorCode::TooManyEvents,
        format!("a maximum of 25 events can be sent per request, got {count}. See {PROTOCOL_GUIDE}"),
    )
}

pub fn payload_too_large(bytes: usize) -> AnalyticsError {
    AnalyticsError::new(
        AnalyticsErrorCode::PayloadTooLarge,
        format!("the encoded payload must not exceed 130000 bytes, got {bytes}. See {PROTOCOL_GUIDE}"),
    )
}

pub fn transport_error(message: impl Into<String>) -> AnalyticsError {
    AnalyticsError::new(AnalyticsErrorCode::Transport, message)
}

pub fn no_validation_response() -> AnalyticsError {
    AnalyticsError::new(
        AnalyticsErrorCode::NoValidationResponse,
        "the validation endpoint returned no response body",
    )
}

pub fn decode_error(message: impl Into<String>) -> AnalyticsError {
    AnalyticsError::new(AnalyticsErrorCode::Decode, message)
}

pub fn internal_error(message: impl Into<String>) -> AnalyticsError {
    AnalyticsError::new(AnalyticsErrorCode::Internal, message)
}
