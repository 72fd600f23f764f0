//! Widget configuration model.
//!
//! These types mirror the options a dashboard host hands to the deploy
//! widget: an optional header, the ordered list of sites, an optional layout
//! hint, and transport settings for the deploy hook requests. Keys use
//! camelCase on the wire so existing dashboard configs load unchanged.

use serde::{Deserialize, Serialize};

/// Header shown above the site list when the config does not set one.
pub const DEFAULT_WIDGET_TITLE: &str = "Cloudflare Deploys";

/// Top-level widget options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    /// Optional header; falls back to [`DEFAULT_WIDGET_TITLE`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Ordered list of sites. `None` and an empty list are both treated as
    /// "nothing configured" by the widget factory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sites: Option<Vec<Site>>,
    /// Optional layout hint for the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutConfig>,
    /// Settings for the outbound deploy hook requests.
    #[serde(default)]
    pub transport: TransportSettings,
}

impl WidgetConfig {
    /// Header text to display, honoring the default when unset or blank.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|title| !title.trim().is_empty())
            .unwrap_or(DEFAULT_WIDGET_TITLE)
    }

    /// Configured sites, or an empty slice when none are present.
    pub fn sites(&self) -> &[Site] {
        self.sites.as_deref().unwrap_or_default()
    }

    pub fn has_sites(&self) -> bool {
        !self.sites().is_empty()
    }
}

/// A single configured site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    /// Display name.
    #[serde(default)]
    pub title: String,
    /// Public URL of the site.
    #[serde(default)]
    pub url: String,
    /// Deploy hook URL. Empty strings count as "no hook".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deploy_hook: Option<String>,
}

impl Site {
    /// Returns the deploy hook when it is present and non-blank.
    pub fn deploy_hook(&self) -> Option<&str> {
        self.deploy_hook.as_deref().map(str::trim).filter(|hook| !hook.is_empty())
    }
}

/// Layout hint passed through to the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<LayoutWidth>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<LayoutHeight>,
}

impl LayoutConfig {
    /// Layout used when the config does not provide one.
    pub const fn default_for_widget() -> Self {
        Self {
            width: Some(LayoutWidth::Medium),
            height: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutWidth {
    Small,
    #[default]
    Medium,
    Large,
    Full,
}

impl LayoutWidth {
    /// Share of the available width, in percent.
    pub const fn percent(self) -> u16 {
        match self {
            Self::Small => 33,
            Self::Medium => 50,
            Self::Large => 75,
            Self::Full => 100,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutHeight {
    #[default]
    Auto,
    Full,
}

/// How deploy hook requests are sent and how their responses are exposed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportSettings {
    /// Origin the dashboard is served from (`scheme://host[:port]`).
    ///
    /// Responses from any other origin are opaque in `no-cors` mode. When
    /// unset there is no origin to compare against and every response is
    /// readable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default)]
    pub mode: TransportMode,
    /// Whole-request timeout enforced by the HTTP client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransportMode {
    /// Cross-origin responses are opaque; their status cannot be read.
    #[default]
    NoCors,
    /// Cross-origin responses are readable only when the endpoint allows the
    /// origin; otherwise the request fails.
    Cors,
}
