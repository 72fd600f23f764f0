//! Fire-and-forget POST transport for deploy hooks.
//!
//! The transport reproduces how a browser dashboard sees a deploy hook call:
//! a response from the dashboard's own origin is readable, a cross-origin
//! response in `no-cors` mode is opaque (status hidden), and in `cors` mode a
//! cross-origin response is readable only when the endpoint allows the
//! origin. Without a configured origin nothing is cross-origin and every
//! response is readable.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use hookdash_types::{TransportMode, TransportSettings};
use reqwest::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, HeaderMap, HeaderValue, ORIGIN, PRAGMA};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, warn};
use url::{Origin, Url};

use crate::redact_endpoint;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// How much of a response the caller is allowed to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// Same-origin (or origin-less) response; status readable.
    Basic,
    /// Cross-origin response permitted by CORS; status readable.
    Cors,
    /// Cross-origin response in `no-cors` mode; status hidden.
    Opaque,
}

/// What the caller observes once a request completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportResponse {
    pub kind: ResponseKind,
    /// `None` for opaque responses.
    pub status: Option<StatusCode>,
}

impl TransportResponse {
    pub fn readable(kind: ResponseKind, status: StatusCode) -> Self {
        Self {
            kind,
            status: Some(status),
        }
    }

    pub fn opaque() -> Self {
        Self {
            kind: ResponseKind::Opaque,
            status: None,
        }
    }

    pub fn is_opaque(&self) -> bool {
        self.kind == ResponseKind::Opaque
    }

    /// True for a readable 2xx response. Opaque responses are never `ok`.
    pub fn ok(&self) -> bool {
        self.status.is_some_and(|status| status.is_success())
    }
}

/// Failures raised before a response could be observed.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("invalid dashboard origin '{0}'")]
    InvalidOrigin(String),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("response from {endpoint_origin} is not allowed for origin {origin}")]
    CorsRejected { origin: String, endpoint_origin: String },
}

/// Sends one body-less POST and reports what the caller may observe.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_empty(&self, endpoint: &str) -> Result<TransportResponse, TransportError>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    origin: Option<Origin>,
    mode: TransportMode,
}

impl ReqwestTransport {
    pub fn new(settings: &TransportSettings) -> Result<Self, TransportError> {
        let origin = settings.origin.as_deref().map(parse_origin).transpose()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        default_headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let mut builder = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .default_headers(default_headers);
        if let Some(seconds) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            origin,
            mode: settings.mode,
        })
    }

    fn response_kind(&self, endpoint: &Url, headers: &HeaderMap) -> Result<ResponseKind, TransportError> {
        let Some(origin) = self.origin.as_ref() else {
            return Ok(ResponseKind::Basic);
        };
        let endpoint_origin = endpoint.origin();
        if &endpoint_origin == origin {
            return Ok(ResponseKind::Basic);
        }
        match self.mode {
            TransportMode::NoCors => Ok(ResponseKind::Opaque),
            TransportMode::Cors => {
                let serialized = origin.ascii_serialization();
                let allowed = headers
                    .get(ACCESS_CONTROL_ALLOW_ORIGIN)
                    .and_then(|value| value.to_str().ok())
                    .map(str::trim)
                    .is_some_and(|value| value == "*" || value == serialized);
                if allowed {
                    Ok(ResponseKind::Cors)
                } else {
                    Err(TransportError::CorsRejected {
                        origin: serialized,
                        endpoint_origin: endpoint_origin.ascii_serialization(),
                    })
                }
            }
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_empty(&self, endpoint: &str) -> Result<TransportResponse, TransportError> {
        let url = Url::parse(endpoint.trim())?;
        let redacted = redact_endpoint(endpoint);
        let start = Instant::now();
        debug!(endpoint = %redacted, mode = ?self.mode, "deploy hook request started");

        let mut request = self.client.post(url.clone());
        if let Some(origin) = self.origin.as_ref() {
            request = request.header(ORIGIN, origin.ascii_serialization());
        }
        // reqwest errors carry the full request URL; the hook URL is a credential.
        let response = request.send().await.map_err(reqwest::Error::without_url).inspect_err(|error| {
            warn!(
                endpoint = %redacted,
                error = %error,
                duration_ms = start.elapsed().as_millis(),
                "deploy hook request failed"
            );
        })?;

        let status = response.status();
        let kind = self.response_kind(response.url(), response.headers())?;
        debug!(
            endpoint = %redacted,
            status = %status,
            kind = ?kind,
            duration_ms = start.elapsed().as_millis(),
            "deploy hook request completed"
        );
        Ok(match kind {
            ResponseKind::Opaque => TransportResponse::opaque(),
            readable => TransportResponse::readable(readable, status),
        })
    }
}

fn parse_origin(raw: &str) -> Result<Origin, TransportError> {
    let url = Url::parse(raw.trim()).map_err(|_| TransportError::InvalidOrigin(raw.to_string()))?;
    match url.origin() {
        origin @ Origin::Tuple(..) => Ok(origin),
        Origin::Opaque(_) => Err(TransportError::InvalidOrigin(raw.to_string())),
    }
}
