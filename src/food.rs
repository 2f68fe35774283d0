use rand::Rng;

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// Rule used to choose the next food cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Placement {
    /// Any cell, each axis drawn independently. Food may land on the snake.
    Anywhere,
    /// Any cell the snake does not occupy.
    FreeCell,
}

/// The single food item on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Places new food according to `placement`.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: GridSize,
        snake: &Snake,
        placement: Placement,
    ) -> Self {
        let position = match placement {
            Placement::Anywhere => random_cell(rng, bounds),
            Placement::FreeCell => {
                free_cell(rng, bounds, snake).unwrap_or_else(|| random_cell(rng, bounds))
            }
        };

        Self::new(position)
    }
}

/// Draws a cell uniformly with `x` and `y` sampled independently.
#[must_use]
pub fn random_cell<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize) -> Position {
    debug_assert!(bounds.width > 0 && bounds.height > 0);

    Position {
        x: rng.gen_range(0..i32::from(bounds.width)),
        y: rng.gen_range(0..i32::from(bounds.height)),
    }
}

/// Draws uniformly among cells the snake does not cover, or `None` on a full board.
#[must_use]
pub fn free_cell<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize, snake: &Snake) -> Option<Position> {
    let mut candidates = Vec::with_capacity(bounds.total_cells().saturating_sub(snake.len()));

    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let position = Position { x, y };
            if !snake.occupies(position) {
                candidates.push(position);
            }
        }
    }

    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}
