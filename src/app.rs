//! App: terminal init, main loop, mouse and key handling.

use crate::input::{Action, key_to_action};
use crate::theme::Theme;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::DefaultTerminal;
use ratatui::layout::Rect;
use sametui::{ClickOutcome, GameConfig, GameState};
use std::time::Duration;

/// Event poll timeout; the board only changes on input, so this just bounds redraw latency.
const POLL_INTERVAL_MS: u64 = 50;

pub struct App {
    config: GameConfig,
    theme: Theme,
    state: GameState,
    /// Keyboard cursor (column, row).
    cursor: (usize, usize),
    /// Cursor is drawn only while the keyboard is in use.
    cursor_visible: bool,
    /// Board rect from the last frame, for mouse → cell mapping.
    board: Rect,
}

impl App {
    pub fn new(config: GameConfig, theme: Theme) -> Self {
        let state = GameState::new(&config);
        Self {
            config,
            theme,
            state,
            cursor: (0, 0),
            cursor_visible: false,
            board: Rect::default(),
        }
    }

    /// Fresh board from a new random seed; `--seed` only fixes the first one.
    fn new_game(&mut self) {
        self.config.seed = None;
        self.state = GameState::new(&self.config);
        self.clamp_cursor();
        self.hover_cursor();
    }

    fn clamp_cursor(&mut self) {
        let grid = self.state.grid();
        self.cursor.0 = self.cursor.0.min(grid.width() - 1);
        self.cursor.1 = self.cursor.1.min(grid.height() - 1);
    }

    fn cursor_coords(&self) -> (i32, i32) {
        (
            i32::try_from(self.cursor.0).unwrap_or(i32::MAX),
            i32::try_from(self.cursor.1).unwrap_or(i32::MAX),
        )
    }

    fn hover_cursor(&mut self) {
        let (x, y) = self.cursor_coords();
        self.state.pointer_moved(x, y);
    }

    fn click(&mut self, x: i32, y: i32) {
        if let ClickOutcome::Removed { cells, points } = self.state.pointer_clicked(x, y) {
            log::debug!("click ({x}, {y}): {cells} cells, +{points}");
        }
    }

    fn apply_action(&mut self, action: Action) {
        let grid = self.state.grid();
        let (max_x, max_y) = (grid.width() - 1, grid.height() - 1);
        match action {
            Action::CursorLeft => self.cursor.0 = self.cursor.0.saturating_sub(1),
            Action::CursorRight => self.cursor.0 = (self.cursor.0 + 1).min(max_x),
            Action::CursorUp => self.cursor.1 = self.cursor.1.saturating_sub(1),
            Action::CursorDown => self.cursor.1 = (self.cursor.1 + 1).min(max_y),
            Action::Select => {
                let (x, y) = self.cursor_coords();
                self.click(x, y);
            }
            Action::NewGame => self.new_game(),
            Action::Quit | Action::None => return,
        }
        self.cursor_visible = true;
        if action != Action::Select {
            self.hover_cursor();
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let cell = crate::ui::screen_to_cell(self.board, mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                // Off the board clears the highlight.
                let (x, y) = cell.unwrap_or((-1, -1));
                self.state.pointer_moved(x, y);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some((x, y)) = cell {
                    self.click(x, y);
                }
            }
            _ => return,
        }
        if let Some((x, y)) = cell {
            self.cursor = (
                usize::try_from(x).unwrap_or_default(),
                usize::try_from(y).unwrap_or_default(),
            );
        }
        self.cursor_visible = false;
    }

    pub fn run(&mut self) -> Result<()> {
        use crossterm::{
            event::{DisableMouseCapture, EnableMouseCapture},
            execute,
            terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode, size},
        };

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

        let mut terminal =
            ratatui::DefaultTerminal::new(ratatui::backend::CrosstermBackend::new(stdout))?;

        // Shrink the board to fit the terminal; respect --width/--height when they fit
        let (term_cols, term_rows) = size()?;
        let (fit_w, fit_h) = crate::ui::max_board_cells_for_terminal(term_cols, term_rows);
        let (w, h) = (self.config.width.min(fit_w), self.config.height.min(fit_h));
        if (w, h) != (self.config.width, self.config.height) {
            log::debug!(
                "board {}x{} does not fit {term_cols}x{term_rows}, using {w}x{h}",
                self.config.width,
                self.config.height
            );
            self.config.width = w;
            self.config.height = h;
            self.state = GameState::new(&self.config);
        }

        let result = self.run_loop(&mut terminal);

        // Restore
        execute!(std::io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
        disable_raw_mode()?;

        result
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        loop {
            let snapshot = self.state.snapshot();
            let cursor = self.cursor_visible.then_some(self.cursor);
            let seed = self.state.seed();
            terminal.draw(|f| {
                self.board = crate::ui::board_rect(f.area(), snapshot.width, snapshot.height);
                crate::ui::draw(f, &snapshot, &self.theme, cursor, seed);
            })?;

            if !event::poll(Duration::from_millis(POLL_INTERVAL_MS))? {
                continue;
            }
            while event::poll(Duration::ZERO)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        let action = key_to_action(key);
                        if action == Action::Quit {
                            return Ok(());
                        }
                        self.apply_action(action);
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }
        }
    }
}
