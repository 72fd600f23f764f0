//! # Command Execution Layer
//!
//! Translates application effects (`Effect`) into imperative commands
//! (`Cmd`) and executes them. This is the boundary where UI state meets side
//! effects: the system clipboard and the deploy coordinator.
//!
//! - [`from_effects`] applies pure state effects and returns the rest as [`Cmd`]s.
//! - [`run_cmds`] executes them and hands back any spawned deploy tasks so the
//!   runtime can await their completion.

use arboard::Clipboard;
use hookdash_types::{ActionReport, Effect, ItemId};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::app::App;

/// Side-effectful commands executed outside of pure state updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Fire the deploy hook of an item.
    TriggerDeploy(ItemId),
    /// Write text into the system clipboard.
    ClipboardSet(String),
}

/// Deploy tasks started by a batch of commands.
#[derive(Debug, Default)]
pub struct CommandBatch {
    pub pending: Vec<JoinHandle<ActionReport>>,
}

/// Convert application [`Effect`]s into [`Cmd`]s.
///
/// `DismissNotice` only touches app state and is applied here. `Quit` is
/// handled by the runtime before effects reach this function.
pub fn from_effects(app: &mut App, effects: Vec<Effect>) -> Vec<Cmd> {
    let mut commands = Vec::new();
    for effect in effects {
        match effect {
            Effect::TriggerDeploy(item_id) => commands.push(Cmd::TriggerDeploy(item_id)),
            Effect::CopyToClipboard(text) => commands.push(Cmd::ClipboardSet(text)),
            Effect::DismissNotice => {
                app.notices.dismiss();
            }
            Effect::Quit => {}
        }
    }
    commands
}

/// Execute commands, collecting the handles of deploys that actually started.
pub fn run_cmds(app: &mut App, commands: Vec<Cmd>) -> CommandBatch {
    let mut batch = CommandBatch::default();
    for command in commands {
        match command {
            Cmd::TriggerDeploy(item_id) => match app.trigger_deploy(item_id) {
                Some(handle) => batch.pending.push(handle),
                None => debug!(item = %item_id, "deploy not started"),
            },
            Cmd::ClipboardSet(text) => set_clipboard(&text),
        }
    }
    batch
}

/// Convenience wrapper: effects in, started deploys out.
pub fn run_from_effects(app: &mut App, effects: Vec<Effect>) -> CommandBatch {
    let commands = from_effects(app, effects);
    run_cmds(app, commands)
}

fn set_clipboard(text: &str) {
    match Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text.to_string())) {
        Ok(()) => debug!(chars = text.len(), "copied to clipboard"),
        Err(error) => warn!(%error, "clipboard unavailable"),
    }
}
