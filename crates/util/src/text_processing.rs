//! # Text Processing Utilities
//!
//! Deploy hook URLs are bearer credentials: anyone holding the URL can start
//! a build. These helpers keep them out of logs and terminal output while
//! leaving enough of the URL to tell hooks apart.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

const REDACTED: &str = "[REDACTED]";

/// Path segments that look like generated identifiers or tokens.
static SECRET_SEGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}|[A-Za-z0-9_\-]{16,})$")
        .expect("secret segment pattern compiles")
});

/// Redacts the secret parts of a deploy hook URL.
///
/// Scheme, host and port are kept. Path segments that look like identifiers
/// or tokens are replaced, and every query value is replaced. Input that does
/// not parse as a URL is redacted entirely.
///
/// # Example
/// ```rust
/// use hookdash_util::redact_endpoint;
///
/// let redacted = redact_endpoint("https://api.example.com/hooks/0a1b2c3d4e5f6a7b8c9d?token=abc");
/// assert_eq!(redacted, "https://api.example.com/hooks/[REDACTED]?token=[REDACTED]");
/// ```
pub fn redact_endpoint(endpoint: &str) -> String {
    let trimmed = endpoint.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let Ok(url) = Url::parse(trimmed) else {
        return REDACTED.to_string();
    };

    let mut out = format!("{}://", url.scheme());
    if let Some(host) = url.host_str() {
        out.push_str(host);
    }
    if let Some(port) = url.port() {
        out.push_str(&format!(":{port}"));
    }

    let path = url
        .path()
        .split('/')
        .map(|segment| if SECRET_SEGMENT.is_match(segment) { REDACTED } else { segment })
        .collect::<Vec<_>>()
        .join("/");
    out.push_str(&path);

    let query_keys: Vec<String> = url.query_pairs().map(|(key, _)| format!("{key}={REDACTED}")).collect();
    if !query_keys.is_empty() {
        out.push('?');
        out.push_str(&query_keys.join("&"));
    }
    out
}
