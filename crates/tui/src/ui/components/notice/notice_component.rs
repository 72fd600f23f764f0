use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use hookdash_types::Effect;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Borders, Paragraph, Wrap};

use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::theme_helpers::{ButtonRenderOptions, ButtonType, block_with_severity, build_hint_spans, render_button};

const BUTTON_WIDTH: u16 = 12;

/// Blocking modal showing the oldest unacknowledged notice.
///
/// While a notice is open the main view routes all input here.
#[derive(Debug, Default, Clone)]
pub struct NoticeComponent {
    button_area: Option<Rect>,
}

impl Component for NoticeComponent {
    fn handle_key_events(&mut self, _app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => vec![Effect::DismissNotice],
            _ => Vec::new(),
        }
    }

    fn handle_mouse_events(&mut self, _app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let MouseEvent { kind, column, row, .. } = mouse;
        if kind == MouseEventKind::Down(MouseButton::Left)
            && self.button_area.is_some_and(|area| area.contains(Position::new(column, row)))
        {
            return vec![Effect::DismissNotice];
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let Some(shown) = app.notices.current().copied() else {
            self.button_area = None;
            return;
        };
        let theme = &*app.ctx.theme;
        let block = block_with_severity(theme, shown.notice.severity(), Some(" Deploy "));
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let [message_rect, meta_rect, _, button_rect] = self.get_preferred_layout(app, inner)[..] else {
            return;
        };

        let message = Paragraph::new(shown.notice.message())
            .style(theme.text_style())
            .wrap(Wrap { trim: true });
        frame.render_widget(message, message_rect);

        let mut meta = vec![Span::styled(
            shown.raised_at.format("%H:%M:%S").to_string(),
            theme.muted_style(),
        )];
        let pending = app.notices.pending();
        if pending > 0 {
            meta.push(Span::styled(format!("  +{pending} more"), theme.muted_style()));
        }
        frame.render_widget(Paragraph::new(Line::from(meta)), meta_rect);

        let button = Rect::new(
            button_rect.x + button_rect.width.saturating_sub(BUTTON_WIDTH) / 2,
            button_rect.y,
            BUTTON_WIDTH.min(button_rect.width),
            button_rect.height,
        );
        render_button(
            frame,
            button,
            "OK",
            theme,
            ButtonRenderOptions::new(true, true, false, Borders::ALL, ButtonType::Primary),
        );
        self.button_area = Some(button);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        build_hint_spans(&*app.ctx.theme, &[("Enter/Esc", " dismiss")])
    }

    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        Layout::vertical([
            Constraint::Min(1),    // Message
            Constraint::Length(1), // Timestamp
            Constraint::Length(1), // Spacer
            Constraint::Length(3), // Button
        ])
        .split(area)
        .to_vec()
    }
}
