use ratatui::Terminal;
use ratatui::backend::TestBackend;

use crate::model::{Item, ItemId, Targets, WidgetConfig};
use crate::ops::widget::Picker;
use crate::tui::app::App;

pub const TERM_W: u16 = 60;
pub const TERM_H: u16 = 14;

/// Draw the whole app into an in-memory buffer and return plain text
/// (no styles), trailing blanks trimmed.
pub fn render_app(app: &mut App, w: u16, h: u16) -> String {
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| super::render(frame, app)).unwrap();

    let buf = terminal.backend().buffer().clone();
    let lines: Vec<String> = buf
        .content
        .chunks(buf.area.width as usize)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();
    let end = lines.iter().rposition(|l| !l.is_empty()).map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// A genre picker with creation enabled and "Action" already selected
pub fn genre_app() -> App {
    let config = WidgetConfig::builder()
        .allow_create(true)
        .item_type("genre")
        .input_name("game[genre_ids][]")
        .build();
    let mut picker = Picker::new(config, Targets::default());
    let item = |id: &str, name: &str| Item::new(ItemId::parse(id).unwrap(), name);
    picker.hydrate(
        vec![item("1", "Action")],
        vec![
            item("1", "Action"),
            item("2", "Puzzle"),
            item("3", "Racing"),
            item("4", "Role Playing"),
        ],
    );
    App::new(picker)
}
