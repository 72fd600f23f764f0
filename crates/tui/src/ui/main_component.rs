use crossterm::event::{KeyEvent, MouseEvent};
use hookdash_types::{Effect, Msg};
use ratatui::widgets::Clear;
use ratatui::{
    prelude::*,
    style::Style,
    widgets::{Block, Paragraph},
};

use super::components::{Component, MissingSitesComponent, NoticeComponent, SitesComponent};
use super::utils::{centered_min_max, widget_area};
use crate::app::App;
use crate::widget::WidgetView;

/// Root view: the widget content, a hints bar, and the notice modal on top.
pub struct MainView {
    /// Site list or the missing-sites card
    pub content_view: Box<dyn Component>,
    /// Modal shown while a notice is open
    pub notice_view: NoticeComponent,
}

impl std::fmt::Debug for MainView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MainView").field("notice_view", &self.notice_view).finish_non_exhaustive()
    }
}

impl MainView {
    pub fn new(view: &WidgetView) -> Self {
        let content_view: Box<dyn Component> = match view {
            WidgetView::Sites { .. } => Box::new(SitesComponent),
            WidgetView::MissingSites => Box::new(MissingSitesComponent),
        };
        Self {
            content_view,
            notice_view: NoticeComponent::default(),
        }
    }

    /// Applies `msg` to the app state, then lets the active component react.
    pub fn handle_message(&mut self, app: &mut App, msg: Msg) -> Vec<Effect> {
        app.update(&msg);
        self.content_view.update(app, &msg)
    }

    fn content_height(app: &App) -> u16 {
        match app.widget.view {
            WidgetView::Sites { .. } => SitesComponent::content_height(app),
            WidgetView::MissingSites => MissingSitesComponent::HEIGHT,
        }
    }
}

impl Component for MainView {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if app.notices.is_open() {
            return self.notice_view.handle_key_events(app, key);
        }
        self.content_view.handle_key_events(app, key)
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if app.notices.is_open() {
            return self.notice_view.handle_mouse_events(app, mouse);
        }
        self.content_view.handle_mouse_events(app, mouse)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        // Fill the entire background with the theme's background color for consistency
        let bg_fill = Paragraph::new("").style(Style::default().bg(app.ctx.theme.roles().backdrop));
        frame.render_widget(bg_fill, area);

        let layout = self.get_preferred_layout(app, area);
        let content_area = widget_area(app.widget.layout, layout[0], Self::content_height(app));
        self.content_view.render(frame, content_area, app);

        let mut hint_spans = vec![Span::styled("Hints: ", app.ctx.theme.muted_style())];
        hint_spans.extend(self.get_hint_spans(app));
        let hints_widget = Paragraph::new(Line::from(hint_spans)).style(app.ctx.theme.muted_style());
        frame.render_widget(hints_widget, layout[1]);

        if app.notices.is_open() {
            render_overlay(frame, app);
            let modal_area = centered_min_max(40, 30, Rect::new(0, 0, 36, 9), Rect::new(0, 0, 72, 12), area);
            frame.render_widget(Clear, modal_area);
            self.notice_view.render(frame, modal_area, app);
        }
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        if app.notices.is_open() {
            return self.notice_view.get_hint_spans(app);
        }
        self.content_view.get_hint_spans(app)
    }

    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        Layout::vertical([
            Constraint::Min(1),    // Widget
            Constraint::Length(1), // Hints bar
        ])
        .split(area)
        .to_vec()
    }
}

/// Dims everything behind the modal.
fn render_overlay(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let overlay = Block::default().style(app.ctx.theme.overlay_style().dim());
    frame.render_widget(overlay, area);
}
