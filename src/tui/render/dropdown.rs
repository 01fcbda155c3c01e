use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::render::RowView;
use crate::tui::app::{App, HitMap};
use crate::util::unicode::truncate_to_width;

/// Maximum number of rows shown at once
const MAX_VISIBLE: usize = 8;

/// First row to draw so the highlight stays inside the window
fn scroll_start(highlighted: Option<usize>, count: usize) -> usize {
    match highlighted {
        Some(i) if i >= MAX_VISIBLE && i < count => i + 1 - MAX_VISIBLE,
        _ => 0,
    }
}

/// Render the open option list under the field
pub fn render_dropdown(frame: &mut Frame, app: &App, area: Rect, hits: &mut HitMap) {
    let bg = app.theme.background;
    let rows: Vec<&RowView> = app.surface().visible_rows().collect();
    let count = rows.len().min(MAX_VISIBLE).max(1);
    let popup_h = ((count + 2) as u16).min(area.height);
    if popup_h < 3 {
        return;
    }
    let popup_area = Rect::new(area.x, area.y, area.width, popup_h);
    hits.dropdown = Some(popup_area);

    let inner_w = area.width.saturating_sub(2) as usize;
    let highlighted = rows.iter().position(|r| r.highlighted);
    let start = scroll_start(highlighted, rows.len());

    let mut lines: Vec<Line> = Vec::new();
    for (offset, row) in rows.iter().skip(start).take(MAX_VISIBLE).enumerate() {
        let index = start + offset;
        let base = if row.highlighted {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.highlight_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };

        let (prefix, label, style) = match &row.id {
            Some(_) if row.selected => (" \u{2713} ", row.label.clone(), base.fg(app.theme.selected_fg)),
            Some(_) => ("   ", row.label.clone(), base),
            None => (
                " + ",
                format!("Create \"{}\"", row.label),
                base.fg(app.theme.create_fg),
            ),
        };
        let label = truncate_to_width(&label, inner_w.saturating_sub(3));
        let label = format!("{label:<width$}", width = inner_w.saturating_sub(3));
        lines.push(Line::from(vec![
            Span::styled(prefix, style),
            Span::styled(label, style),
        ]));

        let y = popup_area.y + 1 + offset as u16;
        hits.rows.push((Rect::new(popup_area.x + 1, y, inner_w as u16, 1), index));
    }
    if rows.is_empty() {
        lines.push(Line::from(Span::styled(
            "   No matches",
            Style::default().fg(app.theme.dim).bg(bg),
        )));
    }

    frame.render_widget(Clear, popup_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));
    let paragraph = Paragraph::new(lines).block(block).style(Style::default().bg(bg));
    frame.render_widget(paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_start_keeps_highlight_visible() {
        assert_eq!(scroll_start(None, 20), 0);
        assert_eq!(scroll_start(Some(3), 20), 0);
        assert_eq!(scroll_start(Some(7), 20), 0);
        assert_eq!(scroll_start(Some(8), 20), 1);
        assert_eq!(scroll_start(Some(19), 20), 12);
        assert_eq!(scroll_start(Some(25), 20), 0);
    }
}
