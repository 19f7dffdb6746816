//! TUI application state and event loop.
//!
//! Design: two views. The welcome view only leads into the sorter. The sorter
//! view drives a [`Session`]: keys pick an algorithm and a granularity, and
//! every loop iteration advances the session clock by the real elapsed time
//! so scheduled frames fire on this thread between redraws.

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use sortviz_core::{Session, SessionConfig, SortMode};

// ---------------------------------------------------------------------------
// View / Focus
// ---------------------------------------------------------------------------

/// Which screen is on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Welcome,
    Sorter,
}

/// Where keystrokes go on the sorter view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Controls,
    Input,
}

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Longest text accepted in the count field.
const MAX_INPUT_LEN: usize = 12;

/// Input poll timeout; also the animation clock granularity.
const POLL_INTERVAL: Duration = Duration::from_millis(30);

/// Parse an algorithm name into the enum.
pub fn parse_algorithm(s: &str) -> SortMode {
    match s {
        "bubble" | "b" => SortMode::Bubble,
        "merge" | "m" => SortMode::Merge,
        _ => {
            log::warn!("unknown algorithm '{s}', leaving unset");
            SortMode::Unset
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    session: Session,
    view: View,
    focus: Focus,
    input: String,
    running: bool,
    /// Row the user scrolled to; used when nothing is highlighted.
    row: usize,
    last_export: Option<PathBuf>,
    export_error: Option<String>,
}

impl App {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            session: Session::new(config),
            view: View::default(),
            focus: Focus::default(),
            input: String::new(),
            running: true,
            row: 0,
            last_export: None,
            export_error: None,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Install panic hook that restores terminal before printing the panic.
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
            original_hook(info);
        }));

        let result = self.run_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error.
        let _ = std::panic::take_hook(); // remove our hook
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            crossterm::cursor::Show
        )?;

        if let Some(path) = &self.last_export {
            println!("Last snapshot saved to {}", path.display());
        }

        result
    }

    fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        let mut last_tick = Instant::now();

        while self.running {
            terminal.draw(|f| super::ui::draw(f, self))?;

            if event::poll(POLL_INTERVAL)?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                self.handle_key(key.code);
            }

            let now = Instant::now();
            self.session.advance(now - last_tick);
            last_tick = now;
        }

        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        match self.view {
            View::Welcome => self.handle_welcome_key(key),
            View::Sorter => match self.focus {
                Focus::Input => self.handle_input_key(key),
                Focus::Controls => self.handle_control_key(key),
            },
        }
    }

    fn handle_welcome_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Enter | KeyCode::Char(' ') => self.open_sorter(),
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                let text = std::mem::take(&mut self.input);
                self.submit(&text);
                self.focus = Focus::Controls;
            }
            KeyCode::Esc => {
                self.input.clear();
                self.focus = Focus::Controls;
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) if self.input.len() < MAX_INPUT_LEN => self.input.push(c),
            _ => {}
        }
    }

    fn handle_control_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Esc | KeyCode::Char('h') => self.view = View::Welcome,
            KeyCode::Char('i') | KeyCode::Char('/') | KeyCode::Tab => self.focus = Focus::Input,
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
                self.focus = Focus::Input;
                self.input.clear();
                self.input.push(c);
            }
            KeyCode::Char('b') => self.choose_algorithm(SortMode::Bubble),
            KeyCode::Char('m') => self.choose_algorithm(SortMode::Merge),
            KeyCode::Char('s') => {
                self.session.step();
            }
            KeyCode::Char('p') => {
                self.session.pass();
            }
            KeyCode::Char('a') => {
                self.session.run_all();
            }
            KeyCode::Char('r') => self.session.randomize(),
            KeyCode::Char('o') => self.session.auto_sort(),
            KeyCode::Char('e') => self.export_snapshot(),
            KeyCode::Up | KeyCode::Char('k') => self.row = self.row.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.row + 1 < self.session.sequence().len() {
                    self.row += 1;
                }
            }
            _ => {}
        }
    }

    pub fn open_sorter(&mut self) {
        self.view = View::Sorter;
    }

    pub fn choose_algorithm(&mut self, mode: SortMode) {
        self.session.set_mode(mode);
    }

    /// Validate and apply a count. A rejection leaves its prompt on the session.
    pub fn submit(&mut self, text: &str) {
        if self.session.submit_count(text).is_ok() {
            self.row = 0;
        }
    }

    fn export_snapshot(&mut self) {
        let epoch = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let path = PathBuf::from(format!("sortviz-snapshot-{epoch}.json"));

        let written = serde_json::to_string_pretty(&self.session.snapshot())
            .map_err(io::Error::other)
            .and_then(|contents| std::fs::write(&path, contents));

        match written {
            Ok(()) => {
                log::info!("snapshot written to {}", path.display());
                self.last_export = Some(path);
                self.export_error = None;
            }
            Err(e) => {
                log::warn!("snapshot export failed: {e}");
                self.export_error = Some(e.to_string());
            }
        }
    }

    // --- Public accessors ---

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Row the table should keep in view: the last highlighted row while
    /// sorting, otherwise wherever the user scrolled.
    pub fn focus_row(&self) -> usize {
        self.session
            .presentation()
            .highlighted()
            .last()
            .copied()
            .unwrap_or(self.row)
    }

    pub fn last_export(&self) -> Option<&PathBuf> {
        self.last_export.as_ref()
    }

    pub fn export_error(&self) -> Option<&str> {
        self.export_error.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
