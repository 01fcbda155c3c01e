use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, HitMap};
use crate::util::unicode::{display_width, truncate_to_width};

/// Widest a single badge label may get before it is cut
const MAX_BADGE_LABEL: usize = 24;
/// Cells kept free after the badges for typing
const MIN_INPUT_CELLS: usize = 8;

/// Badges followed by the search input, inside a bordered box
pub fn render_field(frame: &mut Frame, app: &App, area: Rect, hits: &mut HitMap) {
    let bg = app.theme.background;
    let surface = app.surface();

    let title = format!(" {} ", app.picker().config().item_type);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, Style::default().fg(app.theme.dim).bg(bg)))
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let badge_style = Style::default().fg(app.theme.badge_fg).bg(app.theme.badge_bg);
    let budget = (inner.width as usize).saturating_sub(MIN_INPUT_CELLS);
    let mut spans: Vec<Span> = Vec::new();
    let mut used = 0usize;

    for (i, badge) in surface.badges.iter().enumerate() {
        let label = format!(" {} ", truncate_to_width(&badge.name, MAX_BADGE_LABEL));
        // label, remove glyph, trailing pad, gap
        let width = display_width(&label) + 3;
        if used + width > budget {
            let more = format!("+{} ", surface.badges.len() - i);
            used += display_width(&more);
            spans.push(Span::styled(more, Style::default().fg(app.theme.dim).bg(bg)));
            break;
        }
        let button_x = inner.x + (used + display_width(&label)) as u16;
        hits.remove_buttons.push((Rect::new(button_x, inner.y, 1, 1), badge.id.clone()));

        spans.push(Span::styled(label, badge_style));
        spans.push(Span::styled("\u{00d7}", badge_style.add_modifier(Modifier::BOLD)));
        spans.push(Span::styled(" ", badge_style));
        spans.push(Span::styled(" ", Style::default().bg(bg)));
        used += width;
    }

    let room = (inner.width as usize).saturating_sub(used + 1);
    if surface.input_value.is_empty() && !surface.placeholder.is_empty() {
        spans.push(Span::styled("\u{258C}", Style::default().fg(app.theme.create_fg).bg(bg)));
        spans.push(Span::styled(
            truncate_to_width(&surface.placeholder, room),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    } else {
        // Keep the tail of long input in view
        let text = tail_to_width(&surface.input_value, room);
        spans.push(Span::styled(text, Style::default().fg(app.theme.text_bright).bg(bg)));
        spans.push(Span::styled("\u{258C}", Style::default().fg(app.theme.create_fg).bg(bg)));
    }

    let line_area = Rect::new(inner.x, inner.y, inner.width, 1);
    frame.render_widget(Paragraph::new(Line::from(spans)), line_area);
}

fn tail_to_width(s: &str, max_cells: usize) -> &str {
    let mut start = 0;
    for (i, _) in s.char_indices() {
        if display_width(&s[i..]) <= max_cells {
            start = i;
            break;
        }
        start = s.len();
    }
    &s[start..]
}
