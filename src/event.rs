//! The telemetry event record shipped to the ingestion endpoint.

use chrono::Utc;
use serde::Serialize;
use serde_json::{Map, Value};

/// A single telemetry event.
///
/// The transport treats events as opaque: fields are serialised as-is and
/// never validated here. The service expects at least one of `user_id` /
/// `device_id` to be set, but enforcing that is the caller's concern.
///
/// Optional fields are omitted from the wire payload when unset.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Event {
    /// Name of the event, e.g. `"button_clicked"`.
    pub event_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    /// Event timestamp in epoch milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
    /// Deduplication key; the service drops repeats within its dedup window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,
    /// Free-form properties attached to this event occurrence.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub event_properties: Map<String, Value>,
    /// Free-form properties applied to the owning user profile.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub user_properties: Map<String, Value>,
}

impl Event {
    /// Create an event stamped with the current time.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            time: Some(Utc::now().timestamp_millis()),
            ..Self::default()
        }
    }
}
