//! Nord palette mapped onto the theme roles.

use ratatui::style::Color;

use super::roles::{Theme, ThemeRoles};

// Polar Night
pub const N0: Color = Color::Rgb(0x2E, 0x34, 0x40); // #2E3440
pub const N1: Color = Color::Rgb(0x3B, 0x42, 0x52); // #3B4252
pub const N2: Color = Color::Rgb(0x43, 0x4C, 0x5E); // #434C5E
pub const N3: Color = Color::Rgb(0x4C, 0x56, 0x6A); // #4C566A

// Snow Storm
pub const S0: Color = Color::Rgb(0xD8, 0xDE, 0xE9); // #D8DEE9

// Frost
pub const F1: Color = Color::Rgb(0x88, 0xC0, 0xD0); // #88C0D0
pub const F3: Color = Color::Rgb(0x5E, 0x81, 0xAC); // #5E81AC

// Aurora
pub const A_RED: Color = Color::Rgb(0xBF, 0x61, 0x6A); // #BF616A
pub const A_ORANGE: Color = Color::Rgb(0xD0, 0x87, 0x70); // #D08770
pub const A_GREEN: Color = Color::Rgb(0xA3, 0xBE, 0x8C); // #A3BE8C

pub const TEXT_MUTED: Color = Color::Rgb(0x61, 0x6E, 0x88); // #616E88
pub const BG_MODAL_OVERLAY: Color = Color::Rgb(0x1A, 0x1E, 0x28);

#[derive(Debug, Clone)]
pub struct NordTheme {
    roles: ThemeRoles,
}

impl NordTheme {
    pub fn new() -> Self {
        Self {
            roles: ThemeRoles {
                backdrop: N0,
                card: N1,
                card_border: N3,
                card_border_focused: F1,

                text: S0,
                site_link: TEXT_MUTED,
                muted: TEXT_MUTED,
                hint_key: F1,

                deploy_ready: F3,
                deploy_running: F1,
                deploy_running_fill: N2,
                selected_row: N2,

                notice_info: F1,
                notice_success: A_GREEN,
                notice_warning: A_ORANGE,
                notice_error: A_RED,

                overlay: BG_MODAL_OVERLAY,
            },
        }
    }
}

impl Default for NordTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme for NordTheme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}
