use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::store;
use crate::model::{Checklist, Item};

use super::input;
use super::render;
use super::save::{DEFAULT_SAVE_DELAY, DebouncedSave};
use super::theme::Theme;
use super::undo::{ActionLog, Patch};

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing a new item into the bottom input row
    Adding,
}

/// Main application state
pub struct App {
    pub list: Checklist,
    pub log: ActionLog,
    pub saver: DebouncedSave,
    pub store_path: PathBuf,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    /// Cursor index into the list
    pub cursor: usize,
    /// First visible row of the list viewport
    pub scroll_offset: usize,
    /// Add-mode input buffer
    pub input: String,
    /// Byte offset of the input cursor (always on a char boundary)
    pub input_cursor: usize,
    /// False until the first load has populated the list. Guards the
    /// startup race where a save could clobber the file with an empty list.
    pub hydrated: bool,
}

impl App {
    pub fn new(store_path: PathBuf, save_delay: Duration) -> Self {
        App {
            list: Checklist::new(),
            log: ActionLog::new(),
            saver: DebouncedSave::new(save_delay),
            store_path,
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::default(),
            cursor: 0,
            scroll_offset: 0,
            input: String::new(),
            input_cursor: 0,
            hydrated: false,
        }
    }

    /// Populate the list from a completed load
    pub fn hydrate(&mut self, items: Vec<Item>) {
        self.list = Checklist::from_items(items);
        self.hydrated = true;
    }

    /// Route a mutation through the action log and arm the save countdown
    pub fn execute(&mut self, patch: Patch) {
        self.log.execute(&mut self.list, patch);
        self.mark_dirty();
    }

    pub fn undo(&mut self) {
        if self.log.undo(&mut self.list) {
            self.mark_dirty();
            self.clamp_cursor();
        }
    }

    pub fn redo(&mut self) {
        if self.log.redo(&mut self.list) {
            self.mark_dirty();
            self.clamp_cursor();
        }
    }

    fn mark_dirty(&mut self) {
        if self.hydrated {
            self.saver.mark_dirty(Instant::now());
        }
    }

    /// Keep the cursor on a real item after the list shrinks
    pub fn clamp_cursor(&mut self) {
        if self.list.is_empty() {
            self.cursor = 0;
        } else if self.cursor >= self.list.len() {
            self.cursor = self.list.len() - 1;
        }
    }

    /// Value of the item under the cursor
    pub fn selected_value(&self) -> Option<&str> {
        self.list.items().get(self.cursor).map(|i| i.value.as_str())
    }
}

/// Run the TUI application
pub fn run(file: Option<&Path>, delay_ms: Option<u64>) -> Result<(), Box<dyn std::error::Error>> {
    let store_path = file.map(Path::to_path_buf).unwrap_or_else(store::default_path);
    let save_delay = delay_ms.map(Duration::from_millis).unwrap_or(DEFAULT_SAVE_DELAY);

    let mut app = App::new(store_path, save_delay);
    // A malformed state file propagates out; an absent one seeds defaults
    let items = store::load(&app.store_path)?;
    app.hydrate(items);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Run event loop
    let result = run_event_loop(&mut terminal, &mut app);

    // Final flush: any pending countdown is replaced by one unconditional
    // write, so a committed action right before quitting still lands.
    app.saver.flush();
    if app.hydrated {
        store::save(&app.store_path, app.list.items());
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        // Debounced background save
        if app.saver.poll(Instant::now()) {
            store::save(&app.store_path, app.list.items());
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemState;

    fn test_app() -> App {
        let mut app = App::new(PathBuf::from("/tmp/unused.json"), DEFAULT_SAVE_DELAY);
        app.hydrate(vec![Item::new("A"), Item::new("B")]);
        app
    }

    #[test]
    fn hydrate_populates_list_and_sets_flag() {
        let app = test_app();
        assert!(app.hydrated);
        assert_eq!(app.list.len(), 2);
    }

    #[test]
    fn execute_arms_the_save_countdown() {
        let mut app = test_app();
        assert!(!app.saver.is_armed());
        app.execute(Patch::Add { value: "C".into() });
        assert!(app.saver.is_armed());
    }

    #[test]
    fn mutations_before_hydration_do_not_arm_saves() {
        let mut app = App::new(PathBuf::from("/tmp/unused.json"), DEFAULT_SAVE_DELAY);
        app.execute(Patch::Add { value: "X".into() });
        assert!(!app.saver.is_armed());
    }

    #[test]
    fn undo_and_redo_arm_the_save_countdown() {
        let mut app = test_app();
        app.execute(Patch::Complete { value: "A".into() });
        app.saver.flush();

        app.undo();
        assert!(app.saver.is_armed());
        assert_eq!(app.list.get("A").unwrap().state, ItemState::Active);

        app.saver.flush();
        app.redo();
        assert!(app.saver.is_armed());
        assert_eq!(app.list.get("A").unwrap().state, ItemState::Crossed);
    }

    #[test]
    fn empty_undo_does_not_arm_saves() {
        let mut app = test_app();
        app.undo();
        assert!(!app.saver.is_armed());
    }

    #[test]
    fn cursor_clamps_after_undo_shrinks_list() {
        let mut app = test_app();
        app.execute(Patch::Add { value: "C".into() });
        app.cursor = 2;
        app.undo();
        assert_eq!(app.cursor, 1);
    }
}
