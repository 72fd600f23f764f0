//! Color roles of the deploy widget.
//!
//! A palette fills one [`ThemeRoles`]; components ask the [`Theme`] for
//! styles named after what they draw (a site link, a hint key, a notice).

use std::fmt::Debug;

use hookdash_types::Severity;
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct ThemeRoles {
    /// Terminal fill around the widget card.
    pub backdrop: Color,
    /// Widget card and notice modal.
    pub card: Color,
    pub card_border: Color,
    pub card_border_focused: Color,

    pub text: Color,
    pub site_link: Color,
    /// Hints bar, notice timestamps, unavailable controls.
    pub muted: Color,
    pub hint_key: Color,

    /// Outline of a Deploy control that can be pressed.
    pub deploy_ready: Color,
    /// Accent of the control whose deploy is in flight.
    pub deploy_running: Color,
    pub deploy_running_fill: Color,
    pub selected_row: Color,

    pub notice_info: Color,
    pub notice_success: Color,
    pub notice_warning: Color,
    pub notice_error: Color,

    /// Layer drawn over the widget while a notice is open.
    pub overlay: Color,
}

pub trait Theme: Send + Sync + Debug {
    fn roles(&self) -> &ThemeRoles;

    fn card_style(&self) -> Style {
        Style::default().bg(self.roles().card).fg(self.roles().text)
    }

    fn card_border_style(&self, focused: bool) -> Style {
        let roles = self.roles();
        Style::default().fg(if focused { roles.card_border_focused } else { roles.card_border })
    }

    fn text_style(&self) -> Style {
        Style::default().fg(self.roles().text)
    }

    fn site_name_style(&self) -> Style {
        self.text_style().add_modifier(Modifier::BOLD)
    }

    fn site_link_style(&self) -> Style {
        Style::default().fg(self.roles().site_link).add_modifier(Modifier::UNDERLINED)
    }

    fn muted_style(&self) -> Style {
        Style::default().fg(self.roles().muted)
    }

    fn hint_key_style(&self) -> Style {
        Style::default().fg(self.roles().hint_key).add_modifier(Modifier::BOLD)
    }

    fn selected_row_style(&self) -> Style {
        Style::default().bg(self.roles().selected_row).add_modifier(Modifier::BOLD)
    }

    /// Foreground for a notice (or error card) of the given severity.
    fn severity_style(&self, severity: Severity) -> Style {
        let roles = self.roles();
        let color = match severity {
            Severity::Info => roles.notice_info,
            Severity::Success => roles.notice_success,
            Severity::Warning => roles.notice_warning,
            Severity::Error => roles.notice_error,
        };
        Style::default().fg(color)
    }

    fn overlay_style(&self) -> Style {
        Style::default().bg(self.roles().overlay)
    }
}
