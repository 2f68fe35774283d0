use std::time::Duration;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{BORDER_PLAY_AREA, CellSize, GLYPH_CELL, GridSize, PALETTE, TERMINAL_CELL};
use crate::game::{Phase, Snapshot};
use crate::snake::Position;
use crate::ui::hud::render_hud;
use crate::ui::menu::{centered_rect, render_game_over_menu, render_pause_menu, render_start_menu};

/// Values shown alongside the game state that the engine does not own.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderInfo {
    /// Time left before the automatic restart after game over.
    pub reset_in: Option<Duration>,
}

/// Renders the full frame from an immutable snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot<'_>, info: RenderInfo) {
    let area = frame.area();
    let below_hud = render_hud(frame, area, snapshot);

    let play_area = centered_rect(
        below_hud,
        board_extent(snapshot.grid.width, TERMINAL_CELL.columns),
        board_extent(snapshot.grid.height, TERMINAL_CELL.rows),
    );

    let block = Block::bordered()
        .border_set(BORDER_PLAY_AREA)
        .border_style(Style::new().fg(PALETTE.border_fg))
        .style(Style::new().bg(PALETTE.play_bg));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_food(frame, inner, snapshot);
    render_snake(frame, inner, snapshot);

    match snapshot.phase {
        Phase::NotStarted => render_start_menu(frame, play_area),
        Phase::Paused => render_pause_menu(frame, play_area),
        Phase::Over => render_game_over_menu(
            frame,
            play_area,
            snapshot.score,
            snapshot.death_reason,
            info.reset_in,
        ),
        Phase::Running => {}
    }
}

/// Terminal span of `cells` grid cells plus the two border lines.
fn board_extent(cells: u16, cell_span: u16) -> u16 {
    cells.saturating_mul(cell_span).saturating_add(2)
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot<'_>) {
    let Some((x, y)) = grid_to_terminal(inner, snapshot.grid, TERMINAL_CELL, snapshot.food) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_CELL, Style::new().fg(PALETTE.food));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot<'_>) {
    let buffer = frame.buffer_mut();
    let body_style = Style::new().fg(PALETTE.snake_body);
    let head_style = Style::new()
        .fg(PALETTE.snake_head)
        .add_modifier(Modifier::BOLD);

    // Draw tail first so the head wins when segments overlap.
    let segments: Vec<Position> = snapshot.snake.segments().copied().collect();
    for (index, segment) in segments.iter().enumerate().rev() {
        let Some((x, y)) = grid_to_terminal(inner, snapshot.grid, TERMINAL_CELL, *segment) else {
            continue;
        };

        let style = if index == 0 { head_style } else { body_style };
        buffer.set_string(x, y, GLYPH_CELL, style);
    }
}

/// Maps a grid cell to the top-left terminal cell it occupies inside `inner`.
///
/// Returns `None` for positions off the grid or clipped by a small terminal.
#[must_use]
pub fn grid_to_terminal(
    inner: Rect,
    bounds: GridSize,
    cell: CellSize,
    position: Position,
) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(cell.columns)?;
    let y_offset = u16::try_from(position.y).ok()?.checked_mul(cell.rows)?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(cell.columns) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    use crate::config::{GameSettings, GridSize, TERMINAL_CELL};
    use crate::game::GameLoop;
    use crate::snake::Position;

    use super::{RenderInfo, grid_to_terminal, render};

    const GRID: GridSize = GridSize {
        width: 20,
        height: 20,
    };

    #[test]
    fn grid_cells_span_two_columns() {
        let inner = Rect::new(1, 2, 40, 20);

        assert_eq!(
            grid_to_terminal(inner, GRID, TERMINAL_CELL, Position::new(0, 0)),
            Some((1, 2))
        );
        assert_eq!(
            grid_to_terminal(inner, GRID, TERMINAL_CELL, Position::new(19, 19)),
            Some((39, 21))
        );
    }

    #[test]
    fn off_grid_and_clipped_cells_are_skipped() {
        let small = Rect::new(0, 0, 10, 5);

        assert_eq!(
            grid_to_terminal(small, GRID, TERMINAL_CELL, Position::new(-1, 0)),
            None
        );
        assert_eq!(
            grid_to_terminal(small, GRID, TERMINAL_CELL, Position::new(5, 0)),
            None
        );
        assert_eq!(
            grid_to_terminal(small, GRID, TERMINAL_CELL, Position::new(0, 5)),
            None
        );
    }

    #[test]
    fn frame_shows_score_and_start_hint() {
        let game = GameLoop::with_seed(GameSettings::default(), 1);
        let mut terminal =
            Terminal::new(TestBackend::new(60, 26)).expect("test terminal should build");

        terminal
            .draw(|frame| render(frame, &game.snapshot(), RenderInfo::default()))
            .expect("drawing should succeed");

        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Score: 0"));
        assert!(text.contains("SNAKE"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let game = GameLoop::with_seed(GameSettings::default(), 1);
        let mut terminal =
            Terminal::new(TestBackend::new(8, 3)).expect("test terminal should build");

        terminal
            .draw(|frame| render(frame, &game.snapshot(), RenderInfo::default()))
            .expect("drawing should succeed");
    }
}
