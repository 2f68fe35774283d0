use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::GridSize;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns this position shifted by one step of `velocity`.
    #[must_use]
    pub fn stepped(self, velocity: Velocity) -> Self {
        Self {
            x: self.x + velocity.dx,
            y: self.y + velocity.dy,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Movement command direction.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    /// Returns the opposite heading.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    #[must_use]
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    /// Returns the unit velocity for this heading.
    #[must_use]
    pub fn velocity(self) -> Velocity {
        match self {
            Self::Up => Velocity { dx: 0, dy: -1 },
            Self::Down => Velocity { dx: 0, dy: 1 },
            Self::Left => Velocity { dx: -1, dy: 0 },
            Self::Right => Velocity { dx: 1, dy: 0 },
        }
    }
}

/// Per-tick displacement of the head. Either stationary or one unit on one axis.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct Velocity {
    pub dx: i32,
    pub dy: i32,
}

impl Velocity {
    pub const STILL: Self = Self { dx: 0, dy: 0 };

    /// Returns whether a turn to `heading` is legal from this velocity.
    ///
    /// A vertical turn needs no current vertical motion, a horizontal turn
    /// needs no current horizontal motion. This rejects reversals and
    /// repeats of the current heading alike.
    #[must_use]
    pub fn permits(self, heading: Heading) -> bool {
        if heading.is_vertical() {
            self.dy == 0
        } else {
            self.dx == 0
        }
    }

    /// Returns the heading this velocity moves along, if any.
    #[must_use]
    pub fn heading(self) -> Option<Heading> {
        match (self.dx, self.dy) {
            (0, -1) => Some(Heading::Up),
            (0, 1) => Some(Heading::Down),
            (-1, 0) => Some(Heading::Left),
            (1, 0) => Some(Heading::Right),
            _ => None,
        }
    }
}

impl From<Heading> for Velocity {
    fn from(heading: Heading) -> Self {
        heading.velocity()
    }
}

/// Snake body stored head-first.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Creates a one-cell snake at `start`.
    #[must_use]
    pub fn new(start: Position) -> Self {
        let mut body = VecDeque::new();
        body.push_front(start);

        Self { body }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>) -> Self {
        assert!(
            !segments.is_empty(),
            "snake needs at least one segment to have a head"
        );

        Self {
            body: VecDeque::from(segments),
        }
    }

    /// Moves the head one step along `velocity`, keeping the tail when `grow` is set.
    pub fn advance(&mut self, velocity: Velocity, grow: bool) -> Position {
        let next_head = self.head().stepped(velocity);

        self.body.push_front(next_head);
        if !grow {
            let _ = self.body.pop_back();
        }

        next_head
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the last segment.
    #[must_use]
    pub fn tail(&self) -> Position {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;

    use super::{Heading, Position, Snake, Velocity};

    #[test]
    fn bounds_are_half_open() {
        let bounds = GridSize {
            width: 10,
            height: 8,
        };

        assert!(Position::new(0, 0).is_within_bounds(bounds));
        assert!(Position::new(9, 7).is_within_bounds(bounds));
        assert!(!Position::new(10, 7).is_within_bounds(bounds));
        assert!(!Position::new(9, 8).is_within_bounds(bounds));
        assert!(!Position::new(-1, 3).is_within_bounds(bounds));
    }

    #[test]
    fn snake_moves_one_cell_per_advance() {
        let mut snake = Snake::new(Position::new(5, 5));

        let head = snake.advance(Heading::Right.velocity(), false);

        assert_eq!(head, Position::new(6, 5));
        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn growth_keeps_previous_tail() {
        let mut snake = Snake::new(Position::new(5, 5));

        snake.advance(Heading::Down.velocity(), true);

        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), Position::new(5, 6));
        assert_eq!(snake.tail(), Position::new(5, 5));
    }

    #[test]
    fn still_snake_stays_on_its_cell() {
        let mut snake = Snake::new(Position::new(3, 3));

        snake.advance(Velocity::STILL, false);

        assert_eq!(snake.head(), Position::new(3, 3));
        assert!(!snake.head_overlaps_body());
    }

    #[test]
    fn head_overlap_ignores_the_head_itself() {
        let looped = Snake::from_segments(vec![
            Position::new(1, 1),
            Position::new(2, 1),
            Position::new(1, 1),
        ]);
        let straight = Snake::from_segments(vec![Position::new(1, 1), Position::new(2, 1)]);

        assert!(looped.head_overlaps_body());
        assert!(!straight.head_overlaps_body());
    }

    #[test]
    fn turns_are_checked_per_axis() {
        let moving_right = Heading::Right.velocity();

        assert!(!moving_right.permits(Heading::Left));
        assert!(!moving_right.permits(Heading::Right));
        assert!(moving_right.permits(Heading::Up));
        assert!(moving_right.permits(Heading::Down));

        for heading in [Heading::Up, Heading::Down, Heading::Left, Heading::Right] {
            assert!(Velocity::STILL.permits(heading));
        }
    }

    #[test]
    fn heading_round_trips_through_velocity() {
        for heading in [Heading::Up, Heading::Down, Heading::Left, Heading::Right] {
            assert_eq!(Velocity::from(heading).heading(), Some(heading));
            assert_ne!(heading.opposite(), heading);
        }
        assert_eq!(Velocity::STILL.heading(), None);
    }
}
