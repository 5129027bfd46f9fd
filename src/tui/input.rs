use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::ItemState;

use super::app::{App, Mode};
use super::undo::Patch;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Ctrl-C quits from any mode
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Adding => handle_adding(app, key),
    }
}

fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up => move_cursor_up(app),
        KeyCode::Down => move_cursor_down(app),
        KeyCode::Enter => toggle_selected(app),
        KeyCode::Delete | KeyCode::Backspace => delete_selected(app),
        KeyCode::Char('a') | KeyCode::Char('A') => enter_add_mode(app),
        KeyCode::Char('z') | KeyCode::Char('Z') => app.undo(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.redo(),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}

/// Cursor wraps at both ends
fn move_cursor_up(app: &mut App) {
    if app.list.is_empty() {
        return;
    }
    app.cursor = if app.cursor > 0 {
        app.cursor - 1
    } else {
        app.list.len() - 1
    };
}

fn move_cursor_down(app: &mut App) {
    if app.list.is_empty() {
        return;
    }
    app.cursor = if app.cursor + 1 < app.list.len() {
        app.cursor + 1
    } else {
        0
    };
}

/// Enter toggles the selected item between active and crossed
fn toggle_selected(app: &mut App) {
    let Some(value) = app.selected_value().map(str::to_string) else {
        return;
    };
    let patch = match app.list.get(&value).map(|i| i.state) {
        Some(ItemState::Active) => Patch::Complete { value },
        Some(ItemState::Crossed) => Patch::Uncomplete { value },
        None => return,
    };
    app.execute(patch);
}

/// Two-step delete: an active item is crossed first; only an already-crossed
/// item is actually removed.
fn delete_selected(app: &mut App) {
    let Some(value) = app.selected_value().map(str::to_string) else {
        return;
    };
    match app.list.get(&value).map(|i| i.state) {
        Some(ItemState::Active) => app.execute(Patch::Complete { value }),
        Some(ItemState::Crossed) => {
            if let Some(patch) = Patch::remove(&app.list, &value) {
                app.execute(patch);
                app.clamp_cursor();
            }
        }
        None => {}
    }
}

fn enter_add_mode(app: &mut App) {
    app.mode = Mode::Adding;
    app.input.clear();
    app.input_cursor = 0;
}

fn handle_adding(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => leave_add_mode(app),
        KeyCode::Enter => submit_new_item(app),
        KeyCode::Char(c) => {
            app.input.insert(app.input_cursor, c);
            app.input_cursor += c.len_utf8();
        }
        KeyCode::Backspace => {
            if let Some(prev) = prev_char_boundary(&app.input, app.input_cursor) {
                app.input.remove(prev);
                app.input_cursor = prev;
            }
        }
        KeyCode::Delete => {
            if app.input_cursor < app.input.len() {
                app.input.remove(app.input_cursor);
            }
        }
        KeyCode::Left => {
            if let Some(prev) = prev_char_boundary(&app.input, app.input_cursor) {
                app.input_cursor = prev;
            }
        }
        KeyCode::Right => {
            if let Some(next) = next_char_boundary(&app.input, app.input_cursor) {
                app.input_cursor = next;
            }
        }
        KeyCode::Home => app.input_cursor = 0,
        KeyCode::End => app.input_cursor = app.input.len(),
        _ => {}
    }
}

fn leave_add_mode(app: &mut App) {
    app.mode = Mode::Navigate;
    app.input.clear();
    app.input_cursor = 0;
}

/// Submit the typed value. Empty and duplicate values are dropped silently;
/// either way the input closes and clears.
fn submit_new_item(app: &mut App) {
    let value = app.input.trim().to_string();
    if !value.is_empty() && !app.list.contains(&value) {
        app.execute(Patch::Add { value });
        app.cursor = app.list.len() - 1;
    }
    leave_add_mode(app);
}

/// Byte offset of the char boundary before `pos`, if any
fn prev_char_boundary(s: &str, pos: usize) -> Option<usize> {
    s[..pos].char_indices().next_back().map(|(i, _)| i)
}

/// Byte offset of the char boundary after `pos`, if any
fn next_char_boundary(s: &str, pos: usize) -> Option<usize> {
    s[pos..].chars().next().map(|c| pos + c.len_utf8())
}
