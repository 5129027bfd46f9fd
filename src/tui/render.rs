use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use super::app::{App, Mode};

/// Main render function: guide row | list | input row
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // guide row + blank separator
            Constraint::Min(1),    // list
            Constraint::Length(1), // input row
        ])
        .split(area);

    render_guide_row(frame, app, chunks[0]);
    render_list(frame, app, chunks[1]);
    render_input_row(frame, app, chunks[2]);
}

/// Key guide across the top, in the `[key] action` style
fn render_guide_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let actions: &[(&str, &str)] = &[
        ("A", "Add"),
        ("Enter", "Toggle"),
        ("Del", "Complete/Remove"),
        ("Z", "Undo"),
        ("R", "Redo"),
        ("Q", "Quit"),
    ];

    let mut spans = Vec::new();
    for (key, name) in actions {
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default()
                .fg(app.theme.guide_key)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}  ", name),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// The scrolling checklist. Crossed items render dim and struck through;
/// the cursor row gets a `> ` marker (hidden while the input has focus).
fn render_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let visible = area.height as usize;

    // Keep the cursor inside the viewport
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if visible > 0 && app.cursor >= app.scroll_offset + visible {
        app.scroll_offset = app.cursor + 1 - visible;
    }

    let mut lines = Vec::new();
    if app.list.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No items — press A to add one",
            Style::default().fg(app.theme.dim).bg(bg),
        )));
    }

    let focused = app.mode == Mode::Navigate;
    for (i, item) in app
        .list
        .items()
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(visible)
    {
        let selected = focused && i == app.cursor;
        let marker = if selected { "> " } else { "  " };

        let mut value_style = if item.state.is_crossed() {
            Style::default()
                .fg(app.theme.dim)
                .bg(bg)
                .add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };
        if selected {
            value_style = value_style.fg(app.theme.highlight);
        }

        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(app.theme.highlight).bg(bg)),
            Span::styled(item.value.clone(), value_style),
        ]));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Bottom input row: a text prompt with a block cursor while adding,
/// otherwise blank
fn render_input_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;

    let line = match app.mode {
        Mode::Adding => {
            if app.input.is_empty() {
                Line::from(vec![
                    Span::styled(
                        "\u{258C}",
                        Style::default().fg(app.theme.highlight).bg(bg),
                    ),
                    Span::styled(
                        "Enter new option...",
                        Style::default().fg(app.theme.dim).bg(bg),
                    ),
                ])
            } else {
                let (before, after) = app.input.split_at(app.input_cursor);
                Line::from(vec![
                    Span::styled(
                        before.to_string(),
                        Style::default().fg(app.theme.text_bright).bg(bg),
                    ),
                    Span::styled(
                        "\u{258C}",
                        Style::default().fg(app.theme.highlight).bg(bg),
                    ),
                    Span::styled(
                        after.to_string(),
                        Style::default().fg(app.theme.text_bright).bg(bg),
                    ),
                ])
            }
        }
        Mode::Navigate => Line::from(Span::styled(
            " ".repeat(area.width as usize),
            Style::default().bg(bg),
        )),
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Item;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::path::PathBuf;
    use std::time::Duration;

    fn test_app(items: Vec<Item>) -> App {
        let mut app = App::new(PathBuf::from("/tmp/unused.json"), Duration::from_secs(3));
        app.hydrate(items);
        app
    }

    fn draw(app: &mut App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn renders_guide_and_items() {
        let mut app = test_app(vec![Item::new("Alpha"), Item::new("Beta")]);
        let screen = draw(&mut app, 60, 10);
        assert!(screen.contains("[A] Add"));
        assert!(screen.contains("> Alpha"));
        assert!(screen.contains("  Beta"));
    }

    #[test]
    fn renders_empty_list_hint() {
        let mut app = test_app(vec![]);
        let screen = draw(&mut app, 60, 10);
        assert!(screen.contains("No items"));
    }

    #[test]
    fn renders_input_placeholder_in_add_mode() {
        let mut app = test_app(vec![Item::new("Alpha")]);
        app.mode = Mode::Adding;
        let screen = draw(&mut app, 60, 10);
        assert!(screen.contains("Enter new option..."));
        // Cursor marker hidden while the input has focus
        assert!(!screen.contains("> Alpha"));
    }

    #[test]
    fn scrolls_to_keep_cursor_visible() {
        let items: Vec<Item> = (0..30).map(|i| Item::new(format!("item {i:02}"))).collect();
        let mut app = test_app(items);
        app.cursor = 29;
        let screen = draw(&mut app, 60, 10);
        assert!(screen.contains("> item 29"));
        assert!(!screen.contains("item 00"));
        assert!(app.scroll_offset > 0);
    }

    #[test]
    fn typed_input_renders_with_cursor_block() {
        let mut app = test_app(vec![]);
        app.mode = Mode::Adding;
        app.input = "new item".into();
        app.input_cursor = app.input.len();
        let screen = draw(&mut app, 60, 10);
        assert!(screen.contains("new item\u{258C}"));
    }
}
