//! Fixed endpoints and tunables shared across the crate.

use std::time::Duration;

/// Ingestion endpoint for regular (single-request) uploads.
pub const API_URL: &str = "https://api.pulsemetry.com/2/httpapi";

/// Ingestion endpoint for batch uploads.
pub const BATCH_API_URL: &str = "https://api.pulsemetry.com/batch";

/// Connect and read timeout applied to every outgoing request.
pub const NETWORK_TIMEOUT: Duration = Duration::from_secs(10);
