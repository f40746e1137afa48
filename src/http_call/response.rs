//! Typed response model and the status-code classifier.

use std::collections::HashMap;

use log::warn;
use serde::Deserialize;

use crate::error::InvalidApiKeyError;

/// Sentinel status code reported when no well-formed response was obtained.
pub(crate) const TIMEOUT_CODE: u16 = 408;

/// Outcome kind of one upload call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// The server ingested the batch.
    Success,
    /// The request was rejected for malformed or missing event fields.
    Invalid,
    /// The encoded batch exceeded the server's size limit.
    PayloadTooLarge,
    /// The server throttled some devices or users in the batch.
    RateLimit,
    /// No usable response: transport failure, unreadable body, or a status
    /// code outside the wire contract. Safe to retry.
    Timeout,
}

/// Counters returned with a 200 response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SuccessBody {
    pub events_ingested: i32,
    pub payload_size_bytes: i32,
    /// Server-side upload timestamp in epoch milliseconds.
    pub server_upload_time: i64,
}

/// Field diagnostics returned with a 400 response.
///
/// The index lists refer to positions in the submitted batch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct InvalidRequestBody {
    #[serde(default)]
    pub missing_field: Option<String>,
    #[serde(default)]
    pub events_with_invalid_fields: HashMap<String, Vec<i32>>,
    #[serde(default)]
    pub events_with_missing_fields: HashMap<String, Vec<i32>>,
}

/// Throttling detail returned with a 429 response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RateLimitBody {
    /// Events-per-second threshold the batch tripped.
    #[serde(default)]
    pub eps_threshold: i32,
    #[serde(default)]
    pub throttled_devices: HashMap<String, i32>,
    #[serde(default)]
    pub throttled_users: HashMap<String, i32>,
    /// Indices into the submitted batch, in server order; may repeat.
    #[serde(default)]
    pub throttled_events: Vec<i32>,
}

/// Detail body carried by a [`Response`], tagged by outcome.
///
/// Exactly one variant per call, so a `Response` never holds a union of
/// nullable bodies to pick through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResponseBody {
    Success(SuccessBody),
    Invalid(InvalidRequestBody),
    PayloadTooLarge,
    RateLimit(RateLimitBody),
    Timeout,
}

/// The classified outcome of one upload call.
///
/// Constructed fresh per call and immutable afterwards; holds no resources.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    /// Raw HTTP status code, or 408 when no response was obtained.
    pub code: u16,
    /// The server's error text, when it reported one.
    pub error: Option<String>,
    /// Outcome-specific detail.
    pub body: ResponseBody,
}

impl Response {
    /// The outcome kind, derived from the body variant.
    pub fn status(&self) -> Status {
        match self.body {
            ResponseBody::Success(_) => Status::Success,
            ResponseBody::Invalid(_) => Status::Invalid,
            ResponseBody::PayloadTooLarge => Status::PayloadTooLarge,
            ResponseBody::RateLimit(_) => Status::RateLimit,
            ResponseBody::Timeout => Status::Timeout,
        }
    }

    pub fn success_body(&self) -> Option<&SuccessBody> {
        match &self.body {
            ResponseBody::Success(body) => Some(body),
            _ => None,
        }
    }

    pub fn invalid_request_body(&self) -> Option<&InvalidRequestBody> {
        match &self.body {
            ResponseBody::Invalid(body) => Some(body),
            _ => None,
        }
    }

    pub fn rate_limit_body(&self) -> Option<&RateLimitBody> {
        match &self.body {
            ResponseBody::RateLimit(body) => Some(body),
            _ => None,
        }
    }

    /// The uniform transport-failure response: 408, no body, no error.
    pub(crate) fn timeout() -> Self {
        Self {
            code: TIMEOUT_CODE,
            error: None,
            body: ResponseBody::Timeout,
        }
    }
}

/// Error envelope shared by the non-success response shapes.
#[derive(Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<String>,
}

/// Classify one (status code, body) pair into a typed [`Response`].
///
/// A body that fails its per-status parse counts as "no well-formed response
/// obtained" and collapses to the timeout response, keeping the caller's
/// retry check uniform. The invalid-API-key check matches the server's error
/// text against the key used for this call.
pub(crate) fn classify(
    api_key: &str,
    code: u16,
    raw_body: &str,
) -> Result<Response, InvalidApiKeyError> {
    match code {
        200 => Ok(parse_or_timeout(code, raw_body, |body: SuccessBody| Response {
            code,
            error: None,
            body: ResponseBody::Success(body),
        })),
        400 => {
            let error = match serde_json::from_str::<ErrorEnvelope>(raw_body) {
                Ok(envelope) => envelope.error,
                Err(err) => return Ok(malformed_body(code, &err)),
            };
            if let Some(text) = &error {
                if is_invalid_api_key(text, api_key) {
                    return Err(InvalidApiKeyError(text.clone()));
                }
            }
            Ok(parse_or_timeout(code, raw_body, |body: InvalidRequestBody| {
                Response {
                    code,
                    error,
                    body: ResponseBody::Invalid(body),
                }
            }))
        }
        413 => match serde_json::from_str::<ErrorEnvelope>(raw_body) {
            Ok(envelope) => Ok(Response {
                code,
                error: envelope.error,
                body: ResponseBody::PayloadTooLarge,
            }),
            Err(err) => Ok(malformed_body(code, &err)),
        },
        429 => {
            let error = match serde_json::from_str::<ErrorEnvelope>(raw_body) {
                Ok(envelope) => envelope.error,
                Err(err) => return Ok(malformed_body(code, &err)),
            };
            Ok(parse_or_timeout(code, raw_body, |body: RateLimitBody| {
                Response {
                    code,
                    error,
                    body: ResponseBody::RateLimit(body),
                }
            }))
        }
        // Status codes outside the wire contract carry no recognised body;
        // the raw code is preserved for diagnostics and any error text is
        // taken best-effort.
        other => Ok(Response {
            code: other,
            error: serde_json::from_str::<ErrorEnvelope>(raw_body)
                .ok()
                .and_then(|envelope| envelope.error),
            body: ResponseBody::Timeout,
        }),
    }
}

fn parse_or_timeout<'de, T, F>(code: u16, raw_body: &'de str, into_response: F) -> Response
where
    T: Deserialize<'de>,
    F: FnOnce(T) -> Response,
{
    match serde_json::from_str::<T>(raw_body) {
        Ok(body) => into_response(body),
        Err(err) => malformed_body(code, &err),
    }
}

fn malformed_body(code: u16, err: &serde_json::Error) -> Response {
    warn!("HttpCall could not parse response body for status {code}: {err}");
    Response::timeout()
}

fn is_invalid_api_key(error: &str, api_key: &str) -> bool {
    error.contains(&format!("Invalid API key: {api_key} is invalid"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const API_KEY: &str = "test-apiKey";

    #[rstest]
    #[case(200, r#"{"events_ingested":1,"payload_size_bytes":2,"server_upload_time":3}"#, Status::Success)]
    #[case(400, r#"{"error":"bad request"}"#, Status::Invalid)]
    #[case(413, r#"{"error":"too big"}"#, Status::PayloadTooLarge)]
    #[case(429, r#"{"error":"slow down"}"#, Status::RateLimit)]
    #[case(500, r#"{"error":"oops"}"#, Status::Timeout)]
    #[case(302, "", Status::Timeout)]
    fn status_codes_classify_deterministically(
        #[case] code: u16,
        #[case] body: &str,
        #[case] expected: Status,
    ) {
        let response = classify(API_KEY, code, body).expect("classified");
        assert_eq!(response.status(), expected);
        assert_eq!(response.code, code);
    }

    #[test]
    fn server_upload_time_keeps_64_bit_precision() {
        let body = r#"{"events_ingested":10,"payload_size_bytes":10,"server_upload_time":1396381378123}"#;
        let response = classify(API_KEY, 200, body).expect("classified");
        let success = response.success_body().expect("success body");
        assert_eq!(success.server_upload_time, 1_396_381_378_123_i64);
    }

    #[test]
    fn throttled_events_preserve_order_and_duplicates() {
        let body = r#"{"eps_threshold":5,"throttled_events":[3,0,3,1]}"#;
        let response = classify(API_KEY, 429, body).expect("classified");
        let limits = response.rate_limit_body().expect("rate limit body");
        assert_eq!(limits.throttled_events, vec![3, 0, 3, 1]);
    }

    #[test]
    fn matching_invalid_api_key_text_aborts() {
        let body = r#"{"error":"Invalid API key: test-apiKey is invalid"}"#;
        let err = classify(API_KEY, 400, body).expect_err("aborts");
        assert_eq!(err.0, "Invalid API key: test-apiKey is invalid");
    }

    #[test]
    fn invalid_key_text_for_a_different_key_stays_invalid() {
        let body = r#"{"error":"Invalid API key: other-key is invalid"}"#;
        let response = classify(API_KEY, 400, body).expect("classified");
        assert_eq!(response.status(), Status::Invalid);
    }

    #[test]
    fn malformed_success_body_collapses_to_timeout() {
        let response = classify(API_KEY, 200, "not json").expect("classified");
        assert_eq!(response.status(), Status::Timeout);
        assert_eq!(response.code, TIMEOUT_CODE);
        assert_eq!(response.error, None);
    }

    #[test]
    fn missing_detail_sections_default_for_400() {
        let response = classify(API_KEY, 400, r#"{"error":"nope"}"#).expect("classified");
        let body = response.invalid_request_body().expect("invalid body");
        assert_eq!(body.missing_field, None);
        assert!(body.events_with_invalid_fields.is_empty());
        assert_eq!(response.error.as_deref(), Some("nope"));
    }
}
