//! The request/response protocol handler.
//!
//! This module owns one round trip with the ingestion service: encode a
//! batch, POST it, and classify the answer.
//!
//! # Classification
//!
//! The server's status code picks the typed body that gets parsed:
//!
//! - **200**: [`SuccessBody`] with ingestion counters.
//! - **400**: [`InvalidRequestBody`] naming the offending fields — unless the
//!   error text identifies a rejected API key, which aborts the call with
//!   [`InvalidApiKeyError`](crate::InvalidApiKeyError) instead.
//! - **413**: payload too large; carries only the server's error text.
//! - **429**: [`RateLimitBody`] with per-device/per-user throttle counts.
//! - **Anything else, or no response at all**: [`Status::Timeout`], so that
//!   callers apply one uniform retry check to every transport-shaped failure.

mod config;
mod handler;
mod payload;
mod response;
mod transport;


pub use config::{HttpCallMode, Options, ProxyAddress};
pub use handler::{HttpCall, HttpCallBuilder};
pub use response::{
    InvalidRequestBody, RateLimitBody, Response, ResponseBody, Status, SuccessBody,
};
