use hookdash_types::Severity;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
};

use super::roles::{Theme, ThemeRoles};

/// Build a standard Block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(theme.card_border_style(focused))
        .style(theme.card_style());
    if let Some(t) = title {
        block = block.title(Span::styled(t, theme.site_name_style()));
    }
    block
}

/// Block whose border and title carry the color of `severity`.
pub fn block_with_severity<'a, T: Theme + ?Sized>(theme: &T, severity: Severity, title: Option<&'a str>) -> Block<'a> {
    let tone = theme.severity_style(severity);
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(tone)
        .style(theme.card_style());
    if let Some(t) = title {
        block = block.title(Span::styled(t, tone.add_modifier(Modifier::BOLD)));
    }
    block
}

/// Filled control: the notice's OK button, or the Deploy control in flight.
pub fn button_primary_style<T: Theme + ?Sized>(theme: &T, enabled: bool) -> Style {
    let ThemeRoles {
        card,
        deploy_running,
        deploy_running_fill,
        ..
    } = *theme.roles();
    if enabled {
        Style::default().bg(deploy_running).fg(card).add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(deploy_running_fill).fg(deploy_running).add_modifier(Modifier::BOLD)
    }
}

/// Outlined Deploy control; muted while another deploy holds the widget.
pub fn button_secondary_style<T: Theme + ?Sized>(theme: &T, enabled: bool, selected: bool) -> Style {
    if !enabled {
        return theme.muted_style();
    }
    let ThemeRoles {
        deploy_ready,
        selected_row,
        ..
    } = *theme.roles();
    let style = Style::default().fg(deploy_ready);
    if selected { style.bg(selected_row) } else { style }
}

/// Visual weight of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonType {
    #[default]
    Secondary,
    Primary,
}

/// Render flags for [`render_button`].
#[derive(Debug, Clone, Copy)]
pub struct ButtonRenderOptions {
    pub enabled: bool,
    pub focused: bool,
    pub selected: bool,
    pub borders: Borders,
    pub button_type: ButtonType,
}

impl ButtonRenderOptions {
    pub fn new(enabled: bool, focused: bool, selected: bool, borders: Borders, button_type: ButtonType) -> Self {
        Self {
            enabled,
            focused,
            selected,
            borders,
            button_type,
        }
    }
}

/// Renders a standard button
pub fn render_button<T: Theme + ?Sized>(frame: &mut Frame, area: Rect, label: &str, theme: &T, options: ButtonRenderOptions) {
    let ButtonRenderOptions {
        enabled,
        focused,
        selected,
        borders,
        button_type,
    } = options;

    let border_style = match (button_type, enabled) {
        (ButtonType::Primary, _) => Style::default().fg(theme.roles().deploy_running),
        (ButtonType::Secondary, true) => theme.card_border_style(focused),
        (ButtonType::Secondary, false) => theme.muted_style(),
    };

    let button_style = match button_type {
        ButtonType::Primary => button_primary_style(theme, enabled),
        ButtonType::Secondary => button_secondary_style(theme, enabled, selected),
    };

    let padding = if borders.is_empty() {
        Padding::uniform(1) // Add padding when no borders to match bordered button size
    } else {
        Padding::uniform(0)
    };

    frame.render_widget(
        Paragraph::new(label)
            .centered()
            .block(Block::bordered().borders(borders).border_style(border_style).padding(padding))
            .style(button_style),
        area,
    );
}

/// Hint spans for a hints bar: each key in accent, each description muted.
pub fn build_hint_spans<T: Theme + ?Sized>(theme: &T, hints: &[(&'static str, &'static str)]) -> Vec<Span<'static>> {
    hints
        .iter()
        .flat_map(|(key, description)| {
            [
                Span::styled(*key, theme.hint_key_style()),
                Span::styled(*description, theme.muted_style()),
            ]
        })
        .collect()
}
