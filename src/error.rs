//! Error types surfaced by the public API.

use thiserror::Error;

/// The server rejected the API key configured for this client.
///
/// This is the only server response that is not reported as a
/// [`Response`](crate::Response): no amount of retrying fixes a bad key, so
/// the caller must propagate it instead of rescheduling the batch. The
/// payload is the server's error text verbatim.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct InvalidApiKeyError(pub String);

/// Invalid construction-time configuration.
///
/// Returned by [`HttpCallBuilder::build`](crate::HttpCallBuilder::build);
/// never by `make_request`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The API key must be a non-empty string.
    #[error("API key must not be empty")]
    EmptyApiKey,
    /// The proxy descriptor could not be parsed into a usable address.
    #[error("invalid proxy address {address}: {reason}")]
    InvalidProxy { address: String, reason: String },
    /// The TLS backend failed to initialise.
    #[error("TLS initialisation failed: {0}")]
    Tls(#[from] native_tls::Error),
}
