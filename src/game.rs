use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::GridSize;
use crate::food::Food;
use crate::input::GameInput;
use crate::snake::Snake;

/// What happened to the snake during one tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    Moved,
    Fed,
    Reset,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub tick_count: u64,
    /// Number of resets so far, from self-collision or a full board.
    pub resets: u64,
    bounds: GridSize,
    rng: StdRng,
}

impl GameState {
    /// Creates a state seeded from OS entropy.
    #[must_use]
    pub fn new(bounds: GridSize) -> Self {
        Self::with_rng(bounds, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible sessions.
    ///
    /// # Panics
    ///
    /// Panics when `bounds` has fewer than two cells.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, seed: u64) -> Self {
        Self::with_rng(bounds, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bounds: GridSize, mut rng: StdRng) -> Self {
        let snake = Snake::spawn(&mut rng, bounds);
        let food = Food::spawn(&mut rng, bounds, &snake.occupancy())
            .expect("grid must hold the snake and one food cell");

        Self {
            snake,
            food,
            tick_count: 0,
            resets: 0,
            bounds,
            rng,
        }
    }

    /// Advances simulation by one gameplay tick.
    ///
    /// Commits the pending direction, moves, then resolves self-collision
    /// before feeding. Eating the food on a board left with no free cell
    /// also resets the snake.
    pub fn tick(&mut self) -> TickOutcome {
        self.tick_count += 1;
        self.snake.commit_direction();
        self.snake.advance(self.bounds);

        if self.snake.head_overlaps_body() {
            info!(
                "snake hit itself at length {}; resetting",
                self.snake.target_length()
            );
            self.restart();
            return TickOutcome::Reset;
        }

        if self.snake.head() != self.food.position {
            return TickOutcome::Moved;
        }

        self.snake.grow();
        debug!("snake fed; target length {}", self.snake.target_length());
        if self
            .food
            .relocate(&mut self.rng, self.bounds, &self.snake.occupancy())
        {
            return TickOutcome::Fed;
        }

        info!(
            "snake filled the {}x{} board; resetting",
            self.bounds.width, self.bounds.height
        );
        self.restart();
        TickOutcome::Reset
    }

    fn restart(&mut self) {
        self.snake.reset(&mut self.rng, self.bounds);
        if !self
            .food
            .relocate(&mut self.rng, self.bounds, &self.snake.occupancy())
        {
            warn!("no free cell for food beside a fresh snake");
        }
        self.resets += 1;
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => self.snake.steer(direction),
            GameInput::Quit => {}
        }
    }

    /// Returns the playfield size.
    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }
}
