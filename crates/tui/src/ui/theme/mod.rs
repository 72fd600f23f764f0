//! Theme styling for the widget UI.
//!
//! Two palettes are available (Dracula, Nord). `TUI_THEME` selects one by
//! name; anything else falls back to Dracula.

use std::env;

use tracing::debug;

pub mod dracula;
pub mod nord;
pub mod roles;
pub mod theme_helpers;

pub use dracula::DraculaTheme;
pub use nord::NordTheme;
pub use roles::Theme;

/// Environment variable naming the palette to use.
pub const THEME_ENV: &str = "TUI_THEME";

/// Selects a theme from the environment.
pub fn load() -> Box<dyn Theme> {
    let requested = env::var(THEME_ENV).ok();
    resolve(requested.as_deref())
}

fn resolve(name: Option<&str>) -> Box<dyn Theme> {
    match name.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
        Some("nord") => Box::new(NordTheme::new()),
        Some("dracula") | None | Some("") => Box::new(DraculaTheme::new()),
        Some(other) => {
            debug!(theme = other, "unknown theme requested; using dracula");
            Box::new(DraculaTheme::new())
        }
    }
}
