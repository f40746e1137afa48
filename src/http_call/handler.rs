//! Public handler type exported by the crate.

use log::{debug, warn};

use super::{
    config::{HttpCallMode, Options, ProxyAddress},
    payload::encode_payload,
    response::{classify, Response},
    transport::{Transport, TransportRequest, UreqTransport},
};
use crate::{
    constants::NETWORK_TIMEOUT,
    error::{ConfigError, InvalidApiKeyError},
    event::Event,
};

/// Protocol handler for one ingestion endpoint.
///
/// Stateless between calls: configuration is fixed at construction and each
/// [`make_request`](Self::make_request) opens its own exchange, so a shared
/// `HttpCall` may be used from any number of threads concurrently.
pub struct HttpCall {
    api_key: String,
    url: String,
    /// Mandatory headers first, then configured extras.
    headers: Vec<(String, String)>,
    transport: Box<dyn Transport>,
}

impl HttpCall {
    /// Construct a handler with default options and a direct connection.
    pub fn new(api_key: impl Into<String>, mode: HttpCallMode) -> Result<Self, ConfigError> {
        Self::builder(api_key).mode(mode).build()
    }

    /// Start building a handler with explicit options or a proxy.
    pub fn builder(api_key: impl Into<String>) -> HttpCallBuilder {
        HttpCallBuilder {
            api_key: api_key.into(),
            mode: HttpCallMode::default(),
            options: Options::default(),
            proxy: None,
        }
    }

    pub(crate) fn from_parts(
        api_key: String,
        url: impl Into<String>,
        options: &Options,
        transport: Box<dyn Transport>,
    ) -> Self {
        let mut headers = vec![("Content-Type".to_owned(), "application/json".to_owned())];
        headers.extend(
            options
                .headers
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );
        Self {
            api_key,
            url: url.into(),
            headers,
            transport,
        }
    }

    /// Upload one batch of events and classify the server's answer.
    ///
    /// Transport failures — connection refused, unreachable proxy, write or
    /// read errors, timeouts, unreadable bodies — are never raised; they
    /// collapse into a [`Status::Timeout`](super::Status::Timeout) response
    /// so retry logic has a single check to make. The one escaping failure
    /// is [`InvalidApiKeyError`], which retrying cannot fix.
    ///
    /// Exactly one POST is issued per call; connections are not shared
    /// across calls.
    pub fn make_request(&self, events: &[Event]) -> Result<Response, InvalidApiKeyError> {
        let payload = match encode_payload(&self.api_key, events) {
            Ok(payload) => payload,
            Err(err) => {
                warn!("HttpCall failed to encode batch: {err}");
                return Ok(Response::timeout());
            }
        };
        debug!(
            "HttpCall posting {} events ({} bytes) to {}",
            events.len(),
            payload.len(),
            self.url
        );

        let raw = match self.transport.execute(TransportRequest {
            url: &self.url,
            headers: &self.headers,
            body: &payload,
        }) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("HttpCall request to {} failed: {err}", self.url);
                return Ok(Response::timeout());
            }
        };
        debug!("HttpCall received status {} from {}", raw.code, self.url);
        classify(&self.api_key, raw.code, &raw.body)
    }

    /// Whether this handler tunnels requests through a configured proxy.
    pub fn using_proxy(&self) -> bool {
        self.transport.using_proxy()
    }
}

impl std::fmt::Debug for HttpCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCall")
            .field("url", &self.url)
            .field("using_proxy", &self.using_proxy())
            .finish()
    }
}

/// Builder for [`HttpCall`] instances.
#[derive(Clone, Debug)]
pub struct HttpCallBuilder {
    api_key: String,
    mode: HttpCallMode,
    options: Options,
    proxy: Option<ProxyAddress>,
}

impl HttpCallBuilder {
    /// Select the target endpoint. Defaults to the regular endpoint.
    pub fn mode(mut self, mode: HttpCallMode) -> Self {
        self.mode = mode;
        self
    }

    /// Apply per-call options (extra headers).
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Tunnel requests through an HTTP proxy.
    pub fn proxy(mut self, host: impl Into<String>, port: u16) -> Self {
        self.proxy = Some(ProxyAddress::new(host, port));
        self
    }

    /// Validate the configuration and construct the handler.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyApiKey`] for a blank key,
    /// [`ConfigError::InvalidProxy`] for an unparseable proxy address, and
    /// [`ConfigError::Tls`] if the TLS backend fails to initialise.
    pub fn build(self) -> Result<HttpCall, ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        let transport = UreqTransport::new(self.proxy.as_ref(), NETWORK_TIMEOUT)?;
        Ok(HttpCall::from_parts(
            self.api_key,
            self.mode.url(),
            &self.options,
            Box::new(transport),
        ))
    }
}
