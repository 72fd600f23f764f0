//! # Hookdash TUI
//!
//! Terminal rendering of the deploy widget: a list of sites, each with an
//! optional deploy control, plus a blocking notice modal that reports the
//! outcome of every deploy.
//!
//! The crate follows a component architecture. `App` holds state, components
//! turn key and mouse input into `Effect`s, `cmd` executes effects, and the
//! runtime loop feeds finished deploys and notices back in as `Msg`s.

mod app;
mod cmd;
mod ui;
mod widget;

use std::sync::Arc;

use anyhow::Result;
use hookdash_engine::{ActionCoordinator, ChannelNotifier, RequestExecutor};
use hookdash_types::WidgetConfig;
use hookdash_util::ReqwestTransport;
use tokio::sync::mpsc;

pub use widget::{DashboardWidget, MISSING_SITES_MESSAGE, WIDGET_NAME, WidgetView, deploy_widget};

/// Runs the widget UI until the user quits.
///
/// Builds the transport from the widget's transport settings, wires a
/// coordinator whose notices flow back into the event loop, then hands the
/// terminal to the runtime.
///
/// # Errors
///
/// Fails when the transport settings are invalid (for example a malformed
/// origin) or when the terminal cannot be set up or restored.
pub async fn run(config: WidgetConfig) -> Result<()> {
    let transport = ReqwestTransport::new(&config.transport)?;
    let (notice_sender, notice_receiver) = mpsc::unbounded_channel();
    let coordinator = ActionCoordinator::new(
        Arc::new(RequestExecutor::new(transport)),
        Arc::new(ChannelNotifier::new(notice_sender)),
    );
    let widget = deploy_widget(&config);
    let app = app::App::new(widget, coordinator, ui::theme::load());
    ui::runtime::run_app(app, notice_receiver).await
}
