//! Measurement kinds understood by the GA4 Measurement Protocol.
//!
//! A [`Measurement`] is one event record: a fixed event name plus a parameter
//! bag. The variant wrappers ([`PageView`], [`Event`], [`Exception`],
//! [`Timing`]) fix the event name at construction and expose accessors for the
//! parameter keys that kind of event uses; they are views over the shared bag,
//! not a hierarchy. See
//! <https://developers.google.com/analytics/devguides/collection/protocol/ga4/reference>.

use std::borrow::Cow;
use std::ops::{Deref, DerefMut};

use serde::Serialize;

use crate::error::{missing_required_field, AnalyticsResult};
use crate::params::{ParamValue, Params};

// Session correlation params are generated per session and attached to every
// event in it, regardless of event kind.
// https://support.google.com/analytics/answer/9234069#session_start
const SESSION_ID_KEY: &str = "ga_session_id";
const SESSION_NUMBER_KEY: &str = "ga_session_number";

/// One analytics event record contributed to a batch.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Measurement {
    name: Cow<'static, str>,
    params: Params,
}

impl Measurement {
    fn with_name(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            params: Params::new(),
        }
    }

    /// Creates a measurement with a caller-chosen event name, for events not
    /// covered by the built-in wrappers. The name is fixed for the lifetime of
    /// the measurement and must not be empty.
    pub fn custom(name: impl Into<String>) -> AnalyticsResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(missing_required_field("event name"));
        }
        Ok(Self {
            name: Cow::Owned(name),
            params: Params::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn set_param(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.params.set(key, value);
    }

    pub fn session_id(&self) -> Option<&str> {
        self.params.get_str(SESSION_ID_KEY)
    }

    pub fn set_session_id(&mut self, id: impl Into<String>) {
        self.params.set(SESSION_ID_KEY, id.into());
    }

    pub fn session_number(&self) -> Option<&str> {
        self.params.get_str(SESSION_NUMBER_KEY)
    }

    pub fn set_session_number(&mut self, number: impl Into<String>) {
        self.params.set(SESSION_NUMBER_KEY, number.into());
    }
}

macro_rules! string_param_accessors {
    ($(($getter:ident, $setter:ident, $key:literal)),+ $(,)?) => {
        $(
            pub fn $getter(&self) -> Option<&str> {
                self.0.params.get_str($key)
            }

            pub fn $setter(mut self, value: impl Into<String>) -> Self {
                self.0.params.set($key, value.into());
                self
            }
        )+
    };
}

macro_rules! measurement_wrapper {
    ($name:ident) => {
        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<$name> for Measurement {
            fn from(wrapper: $name) -> Measurement {
                wrapper.0
            }
        }

        impl Deref for $name {
            type Target = Measurement;

            fn deref(&self) -> &Measurement {
                &self.0
            }
        }

        impl DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Measurement {
                &mut self.0
            }
        }
    };
}

/// A wrapper over the `page_view` measurement.
#[derive(Clone, Debug, PartialEq)]
pub struct PageView(Measurement);

impl PageView {
    pub fn new() -> Self {
        Self(Measurement::with_name("page_view"))
    }

    string_param_accessors!(
        (host_name, with_host_name, "host_name"),
        (path, with_path, "page_location"),
        (title, with_title, "page_title"),
        (referrer, with_referrer, "page_referrer"),
        (user_agent, with_user_agent, "user_agent"),
    );
}

measurement_wrapper!(PageView);

/// A wrapper over the generic `event` measurement.
#[derive(Clone, Debug, PartialEq)]
pub struct Event(Measurement);

impl Event {
    pub fn new() -> Self {
        Self(Measurement::with_name("event"))
    }

    string_param_accessors!(
        (category, with_category, "category"),
        (action, with_action, "action"),
        (label, with_label, "label"),
        (value, with_value, "value"),
    );
}

measurement_wrapper!(Event);

/// A wrapper over the `exception` measurement.
#[derive(Clone, Debug, PartialEq)]
pub struct Exception(Measurement);

impl Exception {
    pub fn new() -> Self {
        Self(Measurement::with_name("exception"))
    }

    string_param_accessors!(
        (description, with_description, "description"),
        (fatal, with_fatal, "fatal"),
    );
}

measurement_wrapper!(Exception);

/// A wrapper over the `timing` measurement.
#[derive(Clone, Debug, PartialEq)]
pub struct Timing(Measurement);

impl Timing {
    pub fn new() -> Self {
        Self(Measurement::with_name("timing"))
    }

    string_param_accessors!(
        (category, with_category, "category"),
        (variable, with_variable, "variable"),
        (time, with_time, "time"),
        (label, with_label, "label"),
    );
}

measurement_wrapper!(Timing);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_view_serializes_name_and_params() {
        let page = PageView::new().with_path("X").with_title("Y");
        let measurement = Measurement::from(page);

        let json = serde_json::to_value(&measurement).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "page_view",
                "params": {"page_location": "X", "page_title": "Y"}
            })
        );
    }

    #[test]
    fn session_accessors_share_reserved_keys_across_variants() {
        let mut page = PageView::new();
        page.set_session_id("1700000000");
        page.set_session_number("3");
        assert_eq!(page.session_id(), Some("1700000000"));
        assert_eq!(page.params().get_str("ga_session_id"), Some("1700000000"));

        let mut exception = Exception::new().with_description("boom");
        exception.set_session_id("1700000000");
        assert_eq!(exception.session_id(), Some("1700000000"));
        assert_eq!(
            exception.params().get_str("ga_session_id"),
            Some("1700000000")
        );
        assert_eq!(page.session_number(), Some("3"));
    }

    #[test]
    fn variant_accessors_alias_their_reserved_keys() {
        let event = Event::new()
            .with_category("nav")
            .with_action("click")
            .with_label("header")
            .with_value("1");
        assert_eq!(event.category(), Some("nav"));
        assert_eq!(event.params().get_str("action"), Some("click"));
        assert_eq!(event.name(), "event");

        let timing = Timing::new().with_variable("load").with_time("250");
        assert_eq!(timing.variable(), Some("load"));
        assert_eq!(timing.params().get_str("time"), Some("250"));
        assert_eq!(timing.name(), "timing");
    }

    #[test]
    fn custom_measurement_fixes_caller_supplied_name() {
        let mut custom = Measurement::custom("session_start").unwrap();
        custom.set_session_number("1");
        assert_eq!(custom.name(), "session_start");
        assert_eq!(custom.session_number(), Some("1"));
    }

    #[test]
    fn custom_measurement_rejects_empty_name() {
        let err = Measurement::custom("  ").unwrap_err();
        assert_eq!(err.code_str(), "analytics/missing-required-field");
    }
}
