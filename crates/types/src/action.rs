//! Items, action results and the per-item status projection.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::Site;

/// Stable identity of an item within one render pass (its list index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub usize);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A renderable, optionally triggerable entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub display_name: String,
    pub link_url: String,
    /// Deploy hook; `None` renders the item link-only.
    pub action_endpoint: Option<String>,
}

impl Item {
    pub fn from_site(index: usize, site: &Site) -> Self {
        Self {
            id: ItemId(index),
            display_name: site.title.clone(),
            link_url: site.url.clone(),
            action_endpoint: site.deploy_hook().map(str::to_string),
        }
    }

    /// Builds the item list for a set of sites, using list indices as ids.
    pub fn from_sites(sites: &[Site]) -> Vec<Self> {
        sites.iter().enumerate().map(|(index, site)| Self::from_site(index, site)).collect()
    }

    pub fn has_action(&self) -> bool {
        self.action_endpoint.as_deref().is_some_and(|endpoint| !endpoint.is_empty())
    }
}

/// Why an action did not succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    NoEndpoint,
    Transport,
    NonSuccessStatus,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoEndpoint => "no endpoint configured",
            Self::Transport => "transport error",
            Self::NonSuccessStatus => "non-success status",
        })
    }
}

/// Classified outcome of one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionResult {
    Success,
    Failure(FailureReason),
}

impl ActionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Result of a finished trigger, tagged with the item that ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionReport {
    pub item_id: ItemId,
    pub result: ActionResult,
}

/// Status of one item, projected from the coordinator's active item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemRenderStatus {
    #[default]
    Idle,
    Running,
    BlockedByOther,
}

impl ItemRenderStatus {
    pub fn derive(item_id: ItemId, active_item_id: Option<ItemId>) -> Self {
        match active_item_id {
            None => Self::Idle,
            Some(active) if active == item_id => Self::Running,
            Some(_) => Self::BlockedByOther,
        }
    }

    pub fn is_idle(self) -> bool {
        self == Self::Idle
    }
}

/// The fixed set of messages shown to the user after a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Notice {
    NoEndpointConfigured,
    TriggeredSuccessfully,
    TriggerFailed,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Self::NoEndpointConfigured => "No deploy hook defined for this site.",
            Self::TriggeredSuccessfully => "Deployment triggered successfully!",
            Self::TriggerFailed => "Error triggering deployment",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            Self::NoEndpointConfigured => Severity::Warning,
            Self::TriggeredSuccessfully => Severity::Success,
            Self::TriggerFailed => Severity::Error,
        }
    }
}

impl From<ActionResult> for Notice {
    fn from(result: ActionResult) -> Self {
        match result {
            ActionResult::Success => Self::TriggeredSuccessfully,
            ActionResult::Failure(FailureReason::NoEndpoint) => Self::NoEndpointConfigured,
            ActionResult::Failure(_) => Self::TriggerFailed,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Visual tone for notices and notice-like surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}
