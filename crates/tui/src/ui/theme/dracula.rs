use ratatui::style::Color;

use super::roles::{Theme, ThemeRoles};

// Dracula palette (https://draculatheme.com/contribute)
pub const BG: Color = Color::Rgb(0x28, 0x2A, 0x36); // #282a36
pub const CURRENT_LINE: Color = Color::Rgb(0x44, 0x47, 0x5A); // #44475a
pub const FOREGROUND: Color = Color::Rgb(0xF8, 0xF8, 0xF2); // #f8f8f2
pub const COMMENT: Color = Color::Rgb(0x62, 0x72, 0xA4); // #6272a4

pub const CYAN: Color = Color::Rgb(0x8B, 0xE9, 0xFD); // #8be9fd
pub const GREEN: Color = Color::Rgb(0x50, 0xFA, 0x7B); // #50fa7b
pub const ORANGE: Color = Color::Rgb(0xFF, 0xB8, 0x6C); // #ffb86c
pub const PINK: Color = Color::Rgb(0xFF, 0x79, 0xC6); // #ff79c6
pub const PURPLE: Color = Color::Rgb(0xBD, 0x93, 0xF9); // #bd93f9
pub const RED: Color = Color::Rgb(0xFF, 0x55, 0x55); // #ff5555

pub const BG_MODAL_OVERLAY: Color = Color::Rgb(0x1D, 0x1F, 0x27);

/// Default Dracula theme tuned for dark terminals.
#[derive(Debug, Clone)]
pub struct DraculaTheme {
    roles: ThemeRoles,
}

impl DraculaTheme {
    pub fn new() -> Self {
        Self {
            roles: ThemeRoles {
                backdrop: BG,
                card: BG,
                card_border: CURRENT_LINE,
                card_border_focused: PURPLE,

                text: FOREGROUND,
                site_link: COMMENT,
                muted: COMMENT,
                hint_key: PINK,

                // Cyan for a control that can be pressed, pink for the one in flight.
                deploy_ready: CYAN,
                deploy_running: PINK,
                deploy_running_fill: CURRENT_LINE,
                selected_row: CURRENT_LINE,

                notice_info: CYAN,
                notice_success: GREEN,
                notice_warning: ORANGE,
                notice_error: RED,

                overlay: BG_MODAL_OVERLAY,
            },
        }
    }
}

impl Default for DraculaTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme for DraculaTheme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}
