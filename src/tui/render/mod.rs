pub mod dropdown;
pub mod field;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{App, HitMap};

/// Main render function. Also refreshes the hit map for mouse handling.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: field (3 rows) | dropdown | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let mut hits = HitMap {
        field: chunks[0],
        ..Default::default()
    };
    field::render_field(frame, app, chunks[0], &mut hits);
    if app.surface().dropdown_visible {
        dropdown::render_dropdown(frame, app, chunks[1], &mut hits);
    }
    status_row::render_status_row(frame, app, chunks[2]);

    app.hits = hits;
}
