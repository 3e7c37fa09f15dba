//! Client library for the Google Analytics 4 Measurement Protocol.
//!
//! Measurements are built through typed wrappers over a shared parameter bag,
//! collected into an [`Analytics`] envelope of at most 25 events, and handed
//! to [`HttpProtocol`] for validation against the debug endpoint or
//! submission to the collection endpoint.
//!
//! ```no_run
//! use ga4_measurement_protocol::{Analytics, HttpProtocol, PageView};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut analytics = Analytics::new("G-XXXXXXXXXX", "api-secret", "client-id");
//! analytics.push(PageView::new().with_path("/home").with_title("Home"));
//!
//! let protocol = HttpProtocol::new()?;
//! let report = protocol.validate_measurements(&mut analytics).await?;
//! if report.is_valid() {
//!     protocol.post_measurements(&analytics).await?;
//! }
//! analytics.clear_events();
//! # Ok(())
//! # }
//! ```

pub mod envelope;
pub mod error;
pub mod measurement;
pub mod params;
pub mod platform;
pub mod protocol;
pub mod validation;

pub use envelope::{generate_client_id, Analytics, Payload, UserPropertyValue};
pub use error::{AnalyticsError, AnalyticsErrorCode, AnalyticsResult};
pub use measurement::{Event, Exception, Measurement, PageView, Timing};
pub use params::{ParamValue, Params};
pub use protocol::{HttpProtocol, MAX_EVENTS_PER_REQUEST, MAX_PAYLOAD_BYTES};
pub use validation::{ValidationMessage, ValidationResponse};
