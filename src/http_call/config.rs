//! Per-call configuration consumed by [`HttpCall`](super::HttpCall).

use std::collections::HashMap;

use crate::constants::{API_URL, BATCH_API_URL};

/// Selects which of the two fixed ingestion endpoints a handler targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HttpCallMode {
    /// The regular upload endpoint.
    #[default]
    Regular,
    /// The batch upload endpoint.
    Batch,
}

impl HttpCallMode {
    pub(crate) fn url(self) -> &'static str {
        match self {
            Self::Regular => API_URL,
            Self::Batch => BATCH_API_URL,
        }
    }
}

/// Optional request options: extra headers applied to every outgoing request.
#[derive(Clone, Debug, Default)]
pub struct Options {
    /// Headers sent in addition to the mandatory `Content-Type`.
    pub headers: HashMap<String, String>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Replace the header map wholesale.
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }
}

/// Address of an HTTP proxy to tunnel requests through.
///
/// Absence of a `ProxyAddress` means a direct connection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProxyAddress {
    /// Hostname or IP address of the proxy.
    pub host: String,
    /// Proxy port number.
    pub port: u16,
}

impl ProxyAddress {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub(crate) fn authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
