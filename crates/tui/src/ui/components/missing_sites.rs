use crossterm::event::{KeyCode, KeyEvent};
use hookdash_types::{Effect, Severity};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::widgets::{Paragraph, Wrap};

use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::theme_helpers::{block_with_severity, build_hint_spans};
use crate::widget::MISSING_SITES_MESSAGE;

/// Critical card shown instead of the list when no sites are configured.
#[derive(Debug, Default)]
pub struct MissingSitesComponent;

impl MissingSitesComponent {
    pub const HEIGHT: u16 = 4;
}

impl Component for MissingSitesComponent {
    fn handle_key_events(&mut self, _app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => vec![Effect::Quit],
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let block = block_with_severity(theme, Severity::Error, Some(" Critical "));
        let card = Paragraph::new(MISSING_SITES_MESSAGE)
            .style(theme.severity_style(Severity::Error))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(card, rect);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        build_hint_spans(&*app.ctx.theme, &[("q", " quit")])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crate::test_support::{gated_coordinator, render_rows};
    use crate::ui::theme::DraculaTheme;
    use crate::widget::deploy_widget;
    use hookdash_types::WidgetConfig;

    #[test]
    fn renders_the_configuration_hint() {
        let (coordinator, _release) = gated_coordinator();
        let mut app = App::new(deploy_widget(&WidgetConfig::default()), coordinator, Box::new(DraculaTheme::new()));
        let mut component = MissingSitesComponent;

        let rows = render_rows(100, 4, |frame| component.render(frame, frame.area(), &mut app));
        assert!(rows[1].contains("No sites are defined in the widget options. Please check your config."));
        assert!(rows[0].contains("Critical"));
    }
}
