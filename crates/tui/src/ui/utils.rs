use hookdash_types::{LayoutConfig, LayoutHeight, LayoutWidth};
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Rect of `percent_x` by `percent_y` centered in `r`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    let area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1]);
    area[1]
}

/// Like [`centered_rect`] but clamped between `min` and `max` sizes.
pub fn centered_min_max(percent_x: u16, percent_y: u16, min: Rect, max: Rect, r: Rect) -> Rect {
    let area = centered_rect(percent_x, percent_y, r);
    let width = area.width.clamp(min.width, max.width).min(r.width);
    let height = area.height.clamp(min.height, max.height).min(r.height);
    Rect::new(
        r.x + (r.width - width) / 2,
        r.y + (r.height - height) / 2,
        width,
        height,
    )
}

/// Area the widget occupies inside `area`, anchored top-left.
///
/// Width follows the configured share of the terminal. `auto` height shrinks
/// to `content_height`, `full` takes everything.
pub fn widget_area(layout: LayoutConfig, area: Rect, content_height: u16) -> Rect {
    let percent = layout.width.unwrap_or(LayoutWidth::Medium).percent();
    let width = ((u32::from(area.width) * u32::from(percent)) / 100) as u16;
    let height = match layout.height.unwrap_or_default() {
        LayoutHeight::Auto => content_height.min(area.height),
        LayoutHeight::Full => area.height,
    };
    Rect::new(area.x, area.y, width.max(1).min(area.width), height)
}
