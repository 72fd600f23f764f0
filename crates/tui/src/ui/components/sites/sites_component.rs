use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use hookdash_types::{Effect, ItemId};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Borders, Paragraph};
use tracing::debug;

use super::view::{ControlTone, SiteRow, control_width, site_rows};
use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::theme_helpers::{ButtonRenderOptions, ButtonType, block, build_hint_spans, render_button};

/// Rows per site: name, link, spacer. Matches the bordered control height.
const ROW_HEIGHT: u16 = 3;

/// The site list with one deploy control per site that has a hook.
#[derive(Debug, Default)]
pub struct SitesComponent;

impl SitesComponent {
    /// Effect for deploying `item_id`, or nothing when its control is disabled
    /// or absent.
    fn deploy_effect(app: &App, item_id: ItemId) -> Vec<Effect> {
        let has_action = app.sites.item(item_id).is_some_and(|item| item.has_action());
        if !has_action {
            return Vec::new();
        }
        if !app.status(item_id).is_idle() {
            debug!(item = %item_id, "deploy control disabled while another deploy runs");
            return Vec::new();
        }
        vec![Effect::TriggerDeploy(item_id)]
    }

    /// Height the list needs to show every site, borders included.
    pub fn content_height(app: &App) -> u16 {
        (app.sites.items().len() as u16).saturating_mul(ROW_HEIGHT).saturating_add(2)
    }

    fn scroll_into_view(app: &mut App, visible_rows: usize) {
        let selected = app.sites.selected_index();
        let offset = &mut app.sites.offset;
        if selected < *offset {
            *offset = selected;
        } else if selected >= *offset + visible_rows {
            *offset = selected + 1 - visible_rows;
        }
    }

    fn render_row(frame: &mut Frame, area: Rect, row: &SiteRow<'_>, app: &App) -> Option<Rect> {
        let theme = &*app.ctx.theme;
        let [text_area, control_area] =
            Layout::horizontal([Constraint::Min(1), Constraint::Length(control_width())]).areas(area);

        let marker = if row.selected { "› " } else { "  " };
        let lines = vec![
            Line::from(vec![
                Span::styled(marker, theme.hint_key_style()),
                Span::styled(row.item.display_name.clone(), theme.site_name_style()),
            ]),
            Line::from(vec![
                Span::raw("  "),
                Span::styled(row.item.link_url.clone(), theme.site_link_style()),
            ]),
        ];
        let mut paragraph = Paragraph::new(lines);
        if row.selected {
            paragraph = paragraph.style(theme.selected_row_style());
        }
        frame.render_widget(paragraph, text_area);

        let control = row.control?;
        let label = if control.in_progress {
            format!("{} {}", app.throbber_frame(), control.label)
        } else {
            control.label.to_string()
        };
        let button_type = match control.tone {
            ControlTone::Primary => ButtonType::Primary,
            ControlTone::Default => ButtonType::Secondary,
        };
        render_button(
            frame,
            control_area,
            &label,
            theme,
            ButtonRenderOptions::new(control.enabled, row.selected, row.selected, Borders::ALL, button_type),
        );
        Some(control_area)
    }
}

impl Component for SitesComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => app.sites.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => app.sites.select_next(),
            KeyCode::Enter | KeyCode::Char('d') => {
                if let Some(item_id) = app.sites.selected_item().map(|item| item.id) {
                    return Self::deploy_effect(app, item_id);
                }
            }
            KeyCode::Char('y') => {
                if let Some(item) = app.sites.selected_item() {
                    return vec![Effect::CopyToClipboard(item.link_url.clone())];
                }
            }
            KeyCode::Char('q') | KeyCode::Esc => return vec![Effect::Quit],
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let position = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(item_id) = app.sites.control_at(position) {
                    if let Some(index) = app.sites.items().iter().position(|item| item.id == item_id) {
                        app.sites.select(index);
                    }
                    return Self::deploy_effect(app, item_id);
                }
                if let Some(index) = app.sites.row_at(position) {
                    app.sites.select(index);
                }
            }
            MouseEventKind::ScrollUp => app.sites.select_prev(),
            MouseEventKind::ScrollDown => app.sites.select_next(),
            _ => {}
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let title = app.widget.title().map(|title| format!(" {title} ")).unwrap_or_default();
        let block = block(&*app.ctx.theme, Some(title.as_str()), true);
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let visible_rows = usize::from(inner.height / ROW_HEIGHT).max(1);
        Self::scroll_into_view(app, visible_rows);

        let active_item_id = app.coordinator.active_item();
        let rows = site_rows(app.sites.items(), app.sites.selected_index(), active_item_id);
        let mut row_areas = Vec::with_capacity(visible_rows);
        let mut control_areas = Vec::new();
        for (slot, (index, row)) in rows.iter().enumerate().skip(app.sites.offset).take(visible_rows).enumerate() {
            let y = inner.y + slot as u16 * ROW_HEIGHT;
            let height = ROW_HEIGHT.min(inner.bottom().saturating_sub(y));
            if height == 0 {
                break;
            }
            let area = Rect::new(inner.x, y, inner.width, height);
            if let Some(control_area) = Self::render_row(frame, area, row, app) {
                control_areas.push((row.item.id, control_area));
            }
            row_areas.push((index, area));
        }
        app.sites.set_hit_areas(row_areas, control_areas);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        build_hint_spans(
            &*app.ctx.theme,
            &[
                ("↑/↓", " select  "),
                ("Enter", " deploy  "),
                ("y", " copy URL  "),
                ("q", " quit"),
            ],
        )
    }
}
