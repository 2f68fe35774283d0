use std::io;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::config::{CellSize, GridSize};

/// Concrete terminal type used by the runtime.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Rows the HUD line and the two horizontal borders take from the surface.
const CHROME_ROWS: u16 = 3;

/// Columns the two vertical borders take from the surface.
const CHROME_COLUMNS: u16 = 2;

/// Raw mode and alternate screen held for one run of the game.
///
/// Dropping the session restores the terminal best-effort.
pub struct TerminalSession {
    terminal: AppTerminal,
}

impl TerminalSession {
    /// Enters raw mode, switches to the alternate screen, and creates a ratatui terminal.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        let backend = CrosstermBackend::new(stdout);
        match Terminal::new(backend) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(error) => {
                let _ = restore_terminal();
                Err(error)
            }
        }
    }

    pub fn terminal_mut(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

/// Leaves raw mode and the alternate screen. Safe to call more than once.
pub fn restore_terminal() -> io::Result<()> {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)
}

/// Largest grid that fits the current terminal next to the HUD and borders.
pub fn fitted_grid(cell: CellSize) -> io::Result<GridSize> {
    let (columns, rows) = terminal::size()?;
    Ok(grid_for_surface(columns, rows, cell))
}

fn grid_for_surface(columns: u16, rows: u16, cell: CellSize) -> GridSize {
    GridSize::from_surface(
        columns.saturating_sub(CHROME_COLUMNS),
        rows.saturating_sub(CHROME_ROWS),
        cell,
    )
}

#[cfg(test)]
mod tests {
    use crate::config::{GridSize, TERMINAL_CELL};

    use super::grid_for_surface;

    #[test]
    fn fitted_grid_leaves_room_for_chrome() {
        assert_eq!(
            grid_for_surface(80, 24, TERMINAL_CELL),
            GridSize {
                width: 39,
                height: 21
            }
        );
        assert_eq!(
            grid_for_surface(1, 2, TERMINAL_CELL),
            GridSize {
                width: 0,
                height: 0
            }
        );
    }
}
