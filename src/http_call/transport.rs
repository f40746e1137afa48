//! Transport seam between the handler and the HTTP client.
//!
//! [`HttpCall`](super::HttpCall) talks to a [`Transport`] rather than to
//! `ureq` directly, so the classifier and header plumbing are testable
//! without sockets. [`UreqTransport`] is the production implementation: a
//! blocking client with fixed connect/read timeouts, a native-tls connector,
//! and an optional HTTP proxy.

use std::{sync::Arc, time::Duration};

use native_tls::TlsConnector;
use thiserror::Error;
use ureq::{Agent, AgentBuilder};

use super::config::ProxyAddress;
use crate::error::ConfigError;

/// One outbound POST, fully assembled by the handler.
pub(crate) struct TransportRequest<'a> {
    pub url: &'a str,
    /// Headers in application order; one set call per entry.
    pub headers: &'a [(String, String)],
    pub body: &'a str,
}

/// Status code and raw body of a completed HTTP exchange.
///
/// Non-2xx exchanges are still "completed": the classifier decides what they
/// mean. Only failures to obtain a response at all become errors.
pub(crate) struct RawResponse {
    pub code: u16,
    pub body: String,
}

/// Failure to complete an HTTP exchange.
#[derive(Debug, Error)]
pub(crate) enum TransportError {
    #[error("request failed: {0}")]
    Send(String),
    #[error("failed to read response body: {0}")]
    Body(#[from] std::io::Error),
}

/// Capability to execute one POST and report proxy usage.
pub(crate) trait Transport: Send + Sync {
    fn execute(&self, request: TransportRequest<'_>) -> Result<RawResponse, TransportError>;

    /// Whether requests are tunnelled through a configured proxy.
    fn using_proxy(&self) -> bool;
}

/// Production transport backed by a `ureq::Agent`.
pub(crate) struct UreqTransport {
    agent: Agent,
    proxied: bool,
}

impl UreqTransport {
    /// Build the agent once; every request reuses its timeouts and proxy.
    pub(crate) fn new(
        proxy: Option<&ProxyAddress>,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let tls = TlsConnector::new()?;
        let mut builder = AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .tls_connector(Arc::new(tls));
        if let Some(address) = proxy {
            let authority = address.authority();
            let proxy = ureq::Proxy::new(&authority).map_err(|err| ConfigError::InvalidProxy {
                address: authority,
                reason: err.to_string(),
            })?;
            builder = builder.proxy(proxy);
        }
        Ok(Self {
            agent: builder.build(),
            proxied: proxy.is_some(),
        })
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: TransportRequest<'_>) -> Result<RawResponse, TransportError> {
        let mut req = self.agent.post(request.url);
        for (name, value) in request.headers {
            req = req.set(name, value);
        }
        match req.send_string(request.body).map_err(Box::new) {
            Ok(response) => Ok(RawResponse {
                code: response.status(),
                body: response.into_string()?,
            }),
            Err(err) => match *err {
                ureq::Error::Status(code, response) => Ok(RawResponse {
                    code,
                    body: response.into_string()?,
                }),
                ureq::Error::Transport(transport) => {
                    Err(TransportError::Send(transport.to_string()))
                }
            },
        }
    }

    fn using_proxy(&self) -> bool {
        self.proxied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::NETWORK_TIMEOUT;

    #[test]
    fn direct_transport_reports_no_proxy() {
        let transport = UreqTransport::new(None, NETWORK_TIMEOUT).expect("build");
        assert!(!transport.using_proxy());
    }

    #[test]
    fn proxied_transport_reports_proxy() {
        let proxy = ProxyAddress::new("127.0.0.1", 3128);
        let transport = UreqTransport::new(Some(&proxy), NETWORK_TIMEOUT).expect("build");
        assert!(transport.using_proxy());
    }
}
