//! Crossterm view of a search board.
//!
//! Draws the whole grid once, then repaints only the cells named by each
//! tick's [`CellUpdate`]s.

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use tickstar_core::{CellState, Grid, Point};
use tickstar_search::CellUpdate;

/// Screen columns per grid cell.
const CELL_COLS: u16 = 2;

/// Widest board whose cells all have a terminal column.
pub const MAX_WIDTH: i32 = (u16::MAX / CELL_COLS) as i32;

/// Tallest board that still leaves a row for the status line.
pub const MAX_HEIGHT: i32 = u16::MAX as i32 - 1;

/// Colour for each cell state.
fn state_color(state: CellState) -> Color {
    match state {
        CellState::Empty => Color::Rgb {
            r: 70,
            g: 70,
            b: 80,
        },
        CellState::Blocked => Color::White,
        CellState::Start => Color::Rgb {
            r: 178,
            g: 178,
            b: 255,
        },
        CellState::Finish => Color::Rgb {
            r: 77,
            g: 77,
            b: 230,
        },
        CellState::Frontier => Color::Green,
        CellState::Closed => Color::Red,
        CellState::Marked => Color::Yellow,
    }
}

/// Terminal session in raw mode on the alternate screen. Restores the
/// terminal when dropped.
pub struct TermView {
    out: Stdout,
    status_row: u16,
}

impl TermView {
    pub fn open(grid_size: Point) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        Ok(Self {
            out,
            status_row: grid_size.y.max(0) as u16 + 1,
        })
    }

    fn queue_cell(&mut self, pos: Point, state: CellState) -> io::Result<()> {
        queue!(
            self.out,
            cursor::MoveTo(pos.x as u16 * CELL_COLS, pos.y as u16),
            SetForegroundColor(state_color(state)),
            Print(state.glyph())
        )
    }

    /// Paint every cell.
    pub fn draw_grid(&mut self, grid: &Grid) -> io::Result<()> {
        for cell in grid {
            self.queue_cell(cell.pos(), cell.state())?;
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()
    }

    /// Paint only the cells that changed.
    pub fn draw_updates(&mut self, updates: &[CellUpdate]) -> io::Result<()> {
        for u in updates {
            self.queue_cell(u.pos, u.state)?;
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()
    }

    /// Replace the status line below the board.
    pub fn draw_status(&mut self, text: &str) -> io::Result<()> {
        queue!(
            self.out,
            cursor::MoveTo(0, self.status_row),
            terminal::Clear(ClearType::CurrentLine),
            Print(text)
        )?;
        self.out.flush()
    }

    /// Wait up to `timeout` for input. Returns true if the user asked to quit
    /// (`q`, `Esc` or `Ctrl-C`).
    pub fn wait_quit(&mut self, timeout: Duration) -> io::Result<bool> {
        let deadline = Instant::now() + timeout;
        loop {
            let left = deadline.saturating_duration_since(Instant::now());
            if !event::poll(left)? {
                return Ok(false);
            }
            if let Event::Key(KeyEvent {
                code, modifiers, ..
            }) = event::read()?
            {
                let quit = matches!(code, KeyCode::Char('q') | KeyCode::Esc)
                    || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL));
                if quit {
                    return Ok(true);
                }
            }
            if left.is_zero() {
                return Ok(false);
            }
        }
    }

    /// Block until any key is pressed.
    pub fn wait_any_key(&mut self) -> io::Result<()> {
        loop {
            if let Event::Key(_) = event::read()? {
                return Ok(());
            }
        }
    }
}

impl Drop for TermView {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
