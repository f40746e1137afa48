//! Batch encoding for the outbound wire payload.

use serde::Serialize;

use crate::event::Event;

/// Canonical upload payload shape: `{"api_key": ..., "events": [...]}`.
#[derive(Serialize)]
struct Payload<'a> {
    api_key: &'a str,
    events: &'a [Event],
}

/// Encode a batch of events into the JSON body sent to the service.
///
/// Pure function: the batch is borrowed and never mutated. Both endpoint
/// variants accept the same body shape, so there is a single encoder.
pub(crate) fn encode_payload(api_key: &str, events: &[Event]) -> serde_json::Result<String> {
    serde_json::to_string(&Payload { api_key, events })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_wraps_key_and_events() {
        let events = vec![Event::new("first"), Event::new("second")];
        let encoded = encode_payload("test-key", &events).expect("encode");
        let json: serde_json::Value = serde_json::from_str(&encoded).expect("valid JSON");

        assert_eq!(json["api_key"], "test-key");
        let wire_events = json["events"].as_array().expect("events array");
        assert_eq!(wire_events.len(), 2);
        assert_eq!(wire_events[0]["event_type"], "first");
        assert_eq!(wire_events[1]["event_type"], "second");
    }

    #[test]
    fn empty_batches_encode_without_rejection() {
        let encoded = encode_payload("test-key", &[]).expect("encode");
        let json: serde_json::Value = serde_json::from_str(&encoded).expect("valid JSON");
        assert_eq!(json["events"].as_array().expect("events array").len(), 0);
    }
}
