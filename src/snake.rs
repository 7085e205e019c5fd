use std::collections::{HashSet, VecDeque};

use rand::Rng;

use crate::config::GridSize;
use crate::input::{Direction, direction_change_is_valid};

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns the center cell of `bounds`, rounding down.
    #[must_use]
    pub fn center(bounds: GridSize) -> Self {
        Self {
            x: i32::from(bounds.width / 2),
            y: i32::from(bounds.height / 2),
        }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring cell in `direction`, wrapped into bounds.
    #[must_use]
    pub fn stepped(self, direction: Direction, bounds: GridSize) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
        .wrapped(bounds)
    }

    /// Returns this position wrapped into bounds on both axes.
    #[must_use]
    pub fn wrapped(self, bounds: GridSize) -> Self {
        Self {
            x: self.x.rem_euclid(i32::from(bounds.width)),
            y: self.y.rem_euclid(i32::from(bounds.height)),
        }
    }
}

/// Mutable snake state: body, target length and direction buffering.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    length: usize,
    direction: Direction,
    next_direction: Direction,
}

impl Snake {
    /// Creates a one-cell snake at `start` with the provided direction.
    #[must_use]
    pub fn new(start: Position, direction: Direction) -> Self {
        Self::from_segments(vec![start], direction)
    }

    /// Creates the initial snake: one cell at the grid center, random heading.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize) -> Self {
        Self::new(Position::center(bounds), Direction::random(rng))
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// The target length equals the number of segments.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        Self {
            length: segments.len(),
            body: VecDeque::from(segments),
            direction,
            next_direction: direction,
        }
    }

    /// Returns the snake to its initial state in place.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R, bounds: GridSize) {
        *self = Self::spawn(rng, bounds);
    }

    /// Records the direction to take on the next move.
    ///
    /// A direct reversal of the committed heading is ignored. Among valid
    /// candidates within one tick, the last one wins.
    pub fn steer(&mut self, direction: Direction) {
        if direction_change_is_valid(self.direction, direction) {
            self.next_direction = direction;
        }
    }

    /// Makes the pending direction the current heading.
    pub fn commit_direction(&mut self) {
        self.direction = self.next_direction;
    }

    /// Moves the head one cell, wrapping at the edges, and trims the tail.
    pub fn advance(&mut self, bounds: GridSize) {
        debug_assert!(bounds.width > 0 && bounds.height > 0);

        let next_head = self.head().stepped(self.direction, bounds);
        self.body.push_front(next_head);
        while self.body.len() > self.length {
            let _ = self.body.pop_back();
        }
    }

    /// Raises the target length by one; the tail stays on the next move.
    pub fn grow(&mut self) {
        self.length += 1;
    }

    /// Returns the current head position.
    ///
    /// # Panics
    ///
    /// Panics on a snake built from no segments.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns the set of cells covered by the body.
    #[must_use]
    pub fn occupancy(&self) -> HashSet<Position> {
        self.body.iter().copied().collect()
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the length the body grows towards.
    #[must_use]
    pub fn target_length(&self) -> usize {
        self.length
    }

    /// Returns the current movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the direction that the next move will commit.
    #[must_use]
    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
