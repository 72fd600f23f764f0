//! Component system for the widget UI.
//!
//! Components are self-contained UI elements that read `App` state, turn
//! input into `Effect`s, and render themselves into a given area.

use crossterm::event::{KeyEvent, MouseEvent};
use hookdash_types::{Effect, Msg};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::app::App;

/// A UI element driven by the runtime loop.
///
/// Every method except `render` has a no-op default so components implement
/// only what they handle.
pub(crate) trait Component {
    /// Handle a key press. Returns effects for the runtime to execute.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle a mouse event. Hit areas come from the last render.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// React to an application message after `App::update` ran.
    fn update(&mut self, _app: &mut App, _msg: &Msg) -> Vec<Effect> {
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);

    /// Keyboard hints for the hints bar.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'static>> {
        Vec::new()
    }

    /// Split of `area` this component renders into.
    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        vec![area]
    }
}
