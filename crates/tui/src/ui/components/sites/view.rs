//! View model for the site list.
//!
//! Rows are derived from the items and the coordinator's active item only,
//! so every row reflects the same snapshot of coordinator state.

use hookdash_types::{Item, ItemId, ItemRenderStatus};
use unicode_width::UnicodeWidthStr;

pub const DEPLOY_LABEL: &str = "Deploy";
pub const DEPLOYING_LABEL: &str = "Deploying…";

/// Columns a control needs: the longest label, a throbber cell and a space,
/// plus borders.
pub fn control_width() -> u16 {
    let label = DEPLOY_LABEL.width().max(DEPLOYING_LABEL.width() + 2);
    label as u16 + 4
}

/// Visual weight of a deploy control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlTone {
    Default,
    Primary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployControl {
    pub label: &'static str,
    pub enabled: bool,
    pub tone: ControlTone,
    pub in_progress: bool,
}

impl DeployControl {
    pub fn for_status(status: ItemRenderStatus) -> Self {
        match status {
            ItemRenderStatus::Idle => Self {
                label: DEPLOY_LABEL,
                enabled: true,
                tone: ControlTone::Default,
                in_progress: false,
            },
            ItemRenderStatus::Running => Self {
                label: DEPLOYING_LABEL,
                enabled: false,
                tone: ControlTone::Primary,
                in_progress: true,
            },
            ItemRenderStatus::BlockedByOther => Self {
                label: DEPLOY_LABEL,
                enabled: false,
                tone: ControlTone::Default,
                in_progress: false,
            },
        }
    }
}

/// One rendered site: name, link, and a control when the item has an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRow<'a> {
    pub item: &'a Item,
    pub selected: bool,
    pub control: Option<DeployControl>,
}

pub fn site_rows(items: &[Item], selected: usize, active_item_id: Option<ItemId>) -> Vec<SiteRow<'_>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| SiteRow {
            item,
            selected: index == selected,
            control: item
                .has_action()
                .then(|| DeployControl::for_status(ItemRenderStatus::derive(item.id, active_item_id))),
        })
        .collect()
}
