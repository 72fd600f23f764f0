//! Configuration, transport and text helpers shared by the hookdash crates.

pub mod config;
pub mod http;
pub mod path_processing;
pub mod text_processing;

pub use config::{ConfigError, default_config_path, default_log_path, load_config_from_path, resolve_config_path};
pub use http::{ReqwestTransport, ResponseKind, Transport, TransportError, TransportResponse};
pub use path_processing::expand_tilde;
pub use text_processing::redact_endpoint;
