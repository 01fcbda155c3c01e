use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::ops::keys::Key;
use crate::ops::widget::WidgetEvent;
use crate::util::unicode::pop_grapheme;

use super::app::App;

/// Map a terminal key to the widget's key vocabulary
pub fn widget_key(key: &KeyEvent) -> Key {
    match key.code {
        KeyCode::Down => Key::ArrowDown,
        KeyCode::Up => Key::ArrowUp,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Tab | KeyCode::BackTab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    }
}

/// Handle a key press. The key itself is dispatched first, then any edit it
/// makes to the search text, the same order a browser fires keydown and input.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if matches!(key.code, KeyCode::Char('c' | 'q')) {
            app.should_quit = true;
        }
        return;
    }

    app.dispatch(WidgetEvent::Key(widget_key(&key)));

    let mut text = app.picker().query().to_string();
    let edited = match key.code {
        KeyCode::Char(c) => {
            text.push(c);
            true
        }
        KeyCode::Backspace => pop_grapheme(&mut text),
        _ => false,
    };
    if edited {
        app.dispatch(WidgetEvent::Input(text));
    }
}

/// Clicks on badges, rows and the field; hover over rows
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let (x, y) = (mouse.column, mouse.row);
    let hit = |r: &ratatui::layout::Rect| x >= r.x && x < r.right() && y >= r.y && y < r.bottom();

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let removed = app
                .hits
                .remove_buttons
                .iter()
                .find(|(r, _)| hit(r))
                .map(|(_, id)| id.clone());
            if let Some(id) = removed {
                app.dispatch(WidgetEvent::RemoveBadge(id));
                return;
            }
            if let Some(&(_, index)) = app.hits.rows.iter().find(|(r, _)| hit(r)) {
                click_visible(app, index);
                return;
            }
            if hit(&app.hits.field) {
                app.dispatch(WidgetEvent::Focus);
            } else if !app.hits.contains(x, y) {
                app.dispatch(WidgetEvent::ClickOutside);
            }
        }
        MouseEventKind::Moved => {
            if let Some(&(_, index)) = app.hits.rows.iter().find(|(r, _)| hit(r)) {
                app.dispatch(WidgetEvent::Hover(index));
            }
        }
        _ => {}
    }
}

fn click_visible(app: &mut App, index: usize) {
    let Some(row) = app.surface().visible_rows().nth(index) else {
        return;
    };
    let event = match &row.id {
        Some(id) => WidgetEvent::ClickOption(id.clone()),
        None => WidgetEvent::ClickCreate,
    };
    app.dispatch(event);
}
