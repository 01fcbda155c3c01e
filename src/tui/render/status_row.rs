use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode::{display_width, truncate_to_width};

const HINT: &str = "\u{2191}\u{2193} move  enter select  esc close  ^Q done";

/// Form submission preview on the left, key hints on the right. A creation
/// message, when there is one, replaces the preview.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut left = match &app.status {
        Some(message) => message.clone(),
        None => app
            .surface()
            .hidden_inputs
            .iter()
            .map(|i| format!("{}={}", i.name, i.value))
            .collect::<Vec<_>>()
            .join("&"),
    };
    if app.in_flight > 0 {
        left = format!("saving {}\u{2026} {left}", app.in_flight);
    }

    let hint_width = display_width(HINT);
    let mut spans = Vec::new();
    if display_width(&left) + hint_width + 2 <= width {
        let padding = width - display_width(&left) - hint_width;
        spans.push(Span::styled(left, Style::default().fg(app.theme.status_fg).bg(bg)));
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(HINT, Style::default().fg(app.theme.dim).bg(bg)));
    } else {
        spans.push(Span::styled(
            truncate_to_width(&left, width),
            Style::default().fg(app.theme.status_fg).bg(bg),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
