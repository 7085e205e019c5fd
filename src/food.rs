use std::collections::HashSet;

use log::debug;
use rand::Rng;

use crate::config::GridSize;
use crate::snake::Position;

/// Food entity currently active on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    /// Creates food at `position`.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Spawns food in a cell outside `occupied`, or `None` on a full board.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: GridSize,
        occupied: &HashSet<Position>,
    ) -> Option<Self> {
        spawn_position(rng, bounds, occupied).map(Self::new)
    }

    /// Moves the food to a fresh cell outside `occupied`.
    ///
    /// Returns `false` and leaves the food in place when no cell is free.
    #[must_use]
    pub fn relocate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        bounds: GridSize,
        occupied: &HashSet<Position>,
    ) -> bool {
        let Some(position) = spawn_position(rng, bounds, occupied) else {
            return false;
        };

        self.position = position;
        debug!("food placed at ({}, {})", position.x, position.y);
        true
    }
}

/// Samples uniformly random cells until one lies outside `occupied`.
///
/// Returns `None` when `occupied` covers every cell of `bounds`; otherwise
/// sampling has no attempt cap.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    occupied: &HashSet<Position>,
) -> Option<Position> {
    let occupied_in_bounds = occupied
        .iter()
        .filter(|position| position.is_within_bounds(bounds))
        .count();
    if occupied_in_bounds >= bounds.total_cells() {
        return None;
    }

    loop {
        let candidate = Position {
            x: rng.gen_range(0..i32::from(bounds.width)),
            y: rng.gen_range(0..i32::from(bounds.height)),
        };
        if !occupied.contains(&candidate) {
            return Some(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::GridSize;
    use crate::input::Direction;
    use crate::snake::{Position, Snake};

    use super::{Food, spawn_position};

    #[test]
    fn food_spawn_never_overlaps_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = Snake::from_segments(
            vec![
                Position { x: 0, y: 0 },
                Position { x: 1, y: 0 },
                Position { x: 2, y: 0 },
            ],
            Direction::Right,
        );
        let bounds = GridSize {
            width: 8,
            height: 6,
        };

        for _ in 0..100 {
            let food_position = spawn_position(&mut rng, bounds, &snake.occupancy())
                .expect("board has free cells");
            assert!(!snake.occupies(food_position));
            assert!(food_position.is_within_bounds(bounds));
        }
    }

    #[test]
    fn spawn_finds_the_only_free_cell() {
        let mut rng = StdRng::seed_from_u64(9);
        let bounds = GridSize {
            width: 3,
            height: 3,
        };
        let free = Position { x: 2, y: 1 };
        let occupied: HashSet<Position> = (0..3)
            .flat_map(|y| (0..3).map(move |x| Position { x, y }))
            .filter(|position| *position != free)
            .collect();

        assert_eq!(spawn_position(&mut rng, bounds, &occupied), Some(free));
    }

    #[test]
    fn spawn_on_a_full_board_returns_none() {
        let mut rng = StdRng::seed_from_u64(13);
        let bounds = GridSize {
            width: 2,
            height: 2,
        };
        let occupied: HashSet<Position> = (0..2)
            .flat_map(|y| (0..2).map(move |x| Position { x, y }))
            .collect();
        let mut food = Food::new(Position { x: 1, y: 1 });

        assert_eq!(spawn_position(&mut rng, bounds, &occupied), None);
        assert_eq!(Food::spawn(&mut rng, bounds, &occupied), None);
        assert!(!food.relocate(&mut rng, bounds, &occupied));
        assert_eq!(food.position, Position { x: 1, y: 1 });
    }

    #[test]
    fn relocate_moves_food_off_the_snake() {
        let mut rng = StdRng::seed_from_u64(3);
        let bounds = GridSize {
            width: 4,
            height: 4,
        };
        let mut food = Food::new(Position { x: 1, y: 1 });
        let occupied: HashSet<Position> = [Position { x: 1, y: 1 }, Position { x: 2, y: 1 }]
            .into_iter()
            .collect();

        assert!(food.relocate(&mut rng, bounds, &occupied));
        assert!(!occupied.contains(&food.position));
    }
}
