//! Application state for the deploy widget UI.
//!
//! `App` owns everything the components read while rendering: the widget
//! description, the site list selection, the queue of notices waiting to be
//! acknowledged, and the [`ActionCoordinator`] that decides which deploy is
//! in flight. Components never mutate coordinator state; they only ask it for
//! the render status of each item.

use std::collections::VecDeque;

use chrono::{DateTime, Local};
use hookdash_engine::ActionCoordinator;
use hookdash_types::{ActionReport, Item, ItemId, ItemRenderStatus, Msg, Notice};
use ratatui::layout::{Position, Rect};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::ui::theme::Theme;
use crate::widget::DashboardWidget;

/// Frames of the throbber shown next to a running deploy.
pub const THROBBER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Cross-cutting context shared by every component.
#[derive(Debug)]
pub struct SharedCtx {
    pub theme: Box<dyn Theme>,
}

/// Selection and hit-testing state for the site list.
#[derive(Debug, Default)]
pub struct SitesState {
    items: Vec<Item>,
    selected: usize,
    /// First visible row when the list is taller than its area.
    pub offset: usize,
    row_areas: Vec<(usize, Rect)>,
    control_areas: Vec<(ItemId, Rect)>,
}

impl SitesState {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.items.get(self.selected)
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn select(&mut self, index: usize) {
        if index < self.items.len() {
            self.selected = index;
        }
    }

    pub fn select_next(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1) % self.items.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.items.is_empty() {
            self.selected = self.selected.checked_sub(1).unwrap_or(self.items.len() - 1);
        }
    }

    /// Records where rows and deploy controls were drawn for mouse hit-testing.
    pub fn set_hit_areas(&mut self, rows: Vec<(usize, Rect)>, controls: Vec<(ItemId, Rect)>) {
        self.row_areas = rows;
        self.control_areas = controls;
    }

    pub fn control_at(&self, position: Position) -> Option<ItemId> {
        self.control_areas
            .iter()
            .find(|(_, area)| area.contains(position))
            .map(|(id, _)| *id)
    }

    pub fn row_at(&self, position: Position) -> Option<usize> {
        self.row_areas
            .iter()
            .find(|(_, area)| area.contains(position))
            .map(|(index, _)| *index)
    }
}

/// A notice waiting for the user, with the time it was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShownNotice {
    pub notice: Notice,
    pub raised_at: DateTime<Local>,
}

/// Notices are shown one at a time in arrival order.
#[derive(Debug, Default)]
pub struct NoticeState {
    queue: VecDeque<ShownNotice>,
}

impl NoticeState {
    pub fn push(&mut self, notice: Notice) {
        self.queue.push_back(ShownNotice {
            notice,
            raised_at: Local::now(),
        });
    }

    pub fn current(&self) -> Option<&ShownNotice> {
        self.queue.front()
    }

    pub fn dismiss(&mut self) -> Option<ShownNotice> {
        self.queue.pop_front()
    }

    pub fn is_open(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Notices queued behind the one on screen.
    pub fn pending(&self) -> usize {
        self.queue.len().saturating_sub(1)
    }
}

#[derive(Debug)]
pub struct App {
    pub ctx: SharedCtx,
    pub widget: DashboardWidget,
    pub sites: SitesState,
    pub notices: NoticeState,
    pub coordinator: ActionCoordinator,
    pub throbber_idx: usize,
}

impl App {
    pub fn new(widget: DashboardWidget, coordinator: ActionCoordinator, theme: Box<dyn Theme>) -> Self {
        let sites = SitesState::new(widget.items().to_vec());
        Self {
            ctx: SharedCtx { theme },
            widget,
            sites,
            notices: NoticeState::default(),
            coordinator,
            throbber_idx: 0,
        }
    }

    /// True while a deploy is in flight.
    pub fn is_busy(&self) -> bool {
        !self.coordinator.is_idle()
    }

    pub fn status(&self, item_id: ItemId) -> ItemRenderStatus {
        self.coordinator.status(item_id)
    }

    pub fn throbber_frame(&self) -> &'static str {
        THROBBER_FRAMES[self.throbber_idx % THROBBER_FRAMES.len()]
    }

    /// Starts the deploy for `item_id` through the coordinator.
    ///
    /// Returns the task handle, or `None` when the item is unknown or the
    /// coordinator ignored the trigger because another deploy is running.
    pub fn trigger_deploy(&mut self, item_id: ItemId) -> Option<JoinHandle<ActionReport>> {
        let Some(item) = self.sites.item(item_id) else {
            warn!(item = %item_id, "deploy requested for unknown item");
            return None;
        };
        let handle = self.coordinator.trigger(item);
        if handle.is_some() {
            self.throbber_idx = 0;
        }
        handle
    }

    /// Applies a message to the shared state. Effects come from components.
    pub fn update(&mut self, msg: &Msg) {
        match msg {
            Msg::Tick => {
                if self.is_busy() {
                    self.throbber_idx = (self.throbber_idx + 1) % THROBBER_FRAMES.len();
                } else {
                    self.throbber_idx = 0;
                }
            }
            Msg::Resize(width, height) => {
                debug!(width, height, "terminal resized");
            }
            Msg::DeployFinished(report) => {
                info!(item = %report.item_id, success = report.result.is_success(), "deploy settled");
            }
            Msg::NoticeRaised(notice) => {
                self.notices.push(*notice);
            }
        }
    }
}
