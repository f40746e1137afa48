//! Transport core for the pulsemetry event-ingestion service.
//!
//! This crate owns the wire contract with the ingestion endpoint: one call to
//! [`HttpCall::make_request`] serialises a batch of [`Event`]s, performs a
//! single HTTPS POST, and classifies the server's answer into a typed
//! [`Response`]. Batching policy, retry scheduling, and event persistence
//! live with the caller; this crate only guarantees the single-call contract.
//!
//! # Outcomes
//!
//! Every call resolves to one of two channels:
//!
//! - `Ok(Response)` — the classified outcome, including transport failures,
//!   which collapse to [`Status::Timeout`] so retry logic only has to check
//!   one variant.
//! - `Err(InvalidApiKeyError)` — the server rejected the configured API key.
//!   Retrying cannot fix this, so it is the one condition surfaced as an
//!   error instead of a `Response`.

pub mod constants;

mod error;
mod event;
mod http_call;

pub use error::{ConfigError, InvalidApiKeyError};
pub use event::Event;
pub use http_call::{
    HttpCall, HttpCallBuilder, HttpCallMode, InvalidRequestBody, Options, ProxyAddress,
    RateLimitBody, Response, ResponseBody, Status, SuccessBody,
};
