//! Runtime: event loop and input routing for the widget UI.
//!
//! - Owns the terminal lifecycle (alternate screen, raw mode, mouse capture).
//! - A dedicated input thread blocks on `crossterm::event::read()` and
//!   forwards events over a channel.
//! - Smart ticking: fast interval while a deploy runs (throbber), slow when idle.
//! - Notices arrive on their own channel; finished deploy tasks are awaited
//!   through a `FuturesUnordered` and fed back as `Msg::DeployFinished`.
use std::io::Stdout;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::{StreamExt, stream::FuturesUnordered};
use hookdash_types::{ActionReport, Effect, Msg, Notice};
use ratatui::{Terminal, prelude::*};
use tokio::task::JoinHandle;
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};
use tracing::{info, warn};

use crate::app::App;
use crate::cmd;
use crate::ui::components::component::Component;
use crate::ui::main_component::MainView;

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Spawn a dedicated input thread that blocks on terminal input and forwards
/// `crossterm` events over a Tokio channel.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(event) => {
                    if sender.blocking_send(event).is_err() {
                        break;
                    }
                }
                Err(error) => {
                    warn!(%error, "failed to read terminal event");
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Tui, app: &mut App, main_view: &mut MainView) -> Result<()> {
    terminal.draw(|frame| main_view.render(frame, frame.area(), app))?;
    Ok(())
}

fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) => main_view.handle_key_events(app, key_event),
        Event::Mouse(mouse_event) => main_view.handle_mouse_events(app, mouse_event),
        Event::Resize(width, height) => main_view.handle_message(app, Msg::Resize(width, height)),
        Event::FocusGained | Event::FocusLost | Event::Paste(_) => Vec::new(),
    }
}

fn is_ctrl_c(event: &Event) -> bool {
    matches!(event, Event::Key(key) if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Outcome reported for a deploy task that did not return normally.
///
/// The coordinator is already idle at this point (its guard dropped with the
/// task), but the user was never notified, so a failure notice is raised.
fn settle_join_error(main_view: &mut MainView, app: &mut App, error: tokio::task::JoinError) -> Vec<Effect> {
    warn!(%error, "deploy task ended abnormally");
    main_view.handle_message(app, Msg::NoticeRaised(Notice::TriggerFailed))
}

/// Entry point for the TUI runtime: sets up the terminal, runs the event
/// loop, and restores the terminal on exit.
pub async fn run_app(mut app: App, mut notices: mpsc::UnboundedReceiver<Notice>) -> Result<()> {
    let mut input_receiver = spawn_input_thread();
    let mut main_view = MainView::new(&app.widget.view);
    let mut terminal = setup_terminal()?;
    info!(widget = app.widget.name, sites = app.sites.items().len(), "widget started");

    let mut pending_deploys: FuturesUnordered<JoinHandle<ActionReport>> = FuturesUnordered::new();
    let mut effects: Vec<Effect> = Vec::with_capacity(4);

    // Ticking strategy: fast while animating, very slow when idle.
    let fast_interval = Duration::from_millis(100);
    let idle_interval = Duration::from_millis(5000);
    let mut current_interval = idle_interval;
    let mut ticker = time::interval(current_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let result = async {
        render(&mut terminal, &mut app, &mut main_view)?;
        loop {
            let needs_animation = app.is_busy();
            let target_interval = if needs_animation { fast_interval } else { idle_interval };
            if target_interval != current_interval {
                current_interval = target_interval;
                ticker = time::interval(current_interval);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            }

            let mut needs_render = false;
            tokio::select! {
                maybe_event = input_receiver.recv() => {
                    let Some(event) = maybe_event else {
                        // Input channel closed; shut down cleanly.
                        break;
                    };
                    if is_ctrl_c(&event) {
                        break;
                    }
                    effects.extend(handle_input_event(&mut app, &mut main_view, event));
                    needs_render = true;
                }

                _ = ticker.tick() => {
                    effects.extend(main_view.handle_message(&mut app, Msg::Tick));
                    needs_render = needs_animation;
                }

                Some(notice) = notices.recv() => {
                    effects.extend(main_view.handle_message(&mut app, Msg::NoticeRaised(notice)));
                    needs_render = true;
                }

                Some(joined) = pending_deploys.next(), if !pending_deploys.is_empty() => {
                    let settled = match joined {
                        Ok(report) => main_view.handle_message(&mut app, Msg::DeployFinished(report)),
                        Err(error) => settle_join_error(&mut main_view, &mut app, error),
                    };
                    effects.extend(settled);
                    needs_render = true;
                }

                _ = signal::ctrl_c() => { break; }
            }

            if effects.contains(&Effect::Quit) {
                break;
            }
            if !effects.is_empty() {
                let batch = cmd::run_from_effects(&mut app, std::mem::take(&mut effects));
                pending_deploys.extend(batch.pending);
                needs_render = true;
            }

            if needs_render {
                render(&mut terminal, &mut app, &mut main_view)?;
            }
        }
        anyhow::Ok(())
    }
    .await;

    // Deploys still in flight are abandoned; their guards reset the coordinator.
    for handle in pending_deploys.iter() {
        handle.abort();
    }
    cleanup_terminal(&mut terminal)?;
    info!("widget stopped");
    result
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use hookdash_engine::{ActionCoordinator, ActionExecutor};
    use hookdash_types::{ActionResult, ItemId};

    use super::*;
    use crate::test_support::app_with;

    struct CrashingExecutor;

    #[async_trait]
    impl ActionExecutor for CrashingExecutor {
        async fn execute(&self, _endpoint: &str) -> ActionResult {
            panic!("deploy executor crashed");
        }
    }

    #[tokio::test]
    async fn crashed_deploy_raises_failure_notice_and_frees_the_widget() {
        let coordinator = ActionCoordinator::new(Arc::new(CrashingExecutor), Arc::new(|_: Notice| {}));
        let mut app = app_with(coordinator);
        let mut main_view = MainView::new(&app.widget.view.clone());

        let handle = app.trigger_deploy(ItemId(0)).expect("deploy starts");
        let error = handle.await.unwrap_err();
        assert!(error.is_panic());

        let effects = settle_join_error(&mut main_view, &mut app, error);
        assert!(effects.is_empty());
        assert_eq!(app.notices.current().map(|shown| shown.notice), Some(Notice::TriggerFailed));
        assert!(app.notices.is_open());
        assert!(!app.is_busy());
    }
}
