use std::io;

use log::info;

use crate::clock::TickPacer;
use crate::config::Palette;
use crate::game::GameState;
use crate::input::{GameInput, InputSource};
use crate::render::{Surface, draw_entities};

/// Totals reported when a session ends.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SessionSummary {
    pub ticks: u64,
    pub resets: u64,
}

/// Runs the update/render loop until the input source reports `Quit`.
///
/// Each iteration is one tick: wait, clear, drain input, update, draw,
/// present.
pub fn run<S, I, P>(
    state: &mut GameState,
    palette: &Palette,
    surface: &mut S,
    input: &mut I,
    pacer: &mut P,
) -> io::Result<SessionSummary>
where
    S: Surface + ?Sized,
    I: InputSource + ?Sized,
    P: TickPacer + ?Sized,
{
    loop {
        pacer.wait_for_next_tick();
        surface.clear(palette.background);

        for event in input.drain()? {
            if event == GameInput::Quit {
                info!(
                    "quit after {} ticks and {} resets",
                    state.tick_count, state.resets
                );
                return Ok(SessionSummary {
                    ticks: state.tick_count,
                    resets: state.resets,
                });
            }
            state.apply_input(event);
        }

        state.tick();

        draw_entities(surface, state, palette);
        surface.present()?;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::io;

    use crate::clock::TickPacer;
    use crate::config::{GridSize, Palette};
    use crate::food::Food;
    use crate::game::GameState;
    use crate::input::{Direction, GameInput, InputSource};
    use crate::render::tests::RecordingSurface;
    use crate::snake::{Position, Snake};

    use super::{SessionSummary, run};

    /// Replays one batch of events per tick, then quits.
    struct ScriptedInput {
        batches: VecDeque<Vec<GameInput>>,
    }

    impl ScriptedInput {
        fn new(batches: Vec<Vec<GameInput>>) -> Self {
            Self {
                batches: batches.into(),
            }
        }
    }

    impl InputSource for ScriptedInput {
        fn drain(&mut self) -> io::Result<Vec<GameInput>> {
            Ok(self
                .batches
                .pop_front()
                .unwrap_or_else(|| vec![GameInput::Quit]))
        }
    }

    #[derive(Default)]
    struct CountingPacer {
        waits: usize,
    }

    impl TickPacer for CountingPacer {
        fn wait_for_next_tick(&mut self) {
            self.waits += 1;
        }
    }

    fn state_heading_right() -> GameState {
        let mut state = GameState::new_with_seed(
            GridSize {
                width: 12,
                height: 8,
            },
            21,
        );
        state.snake = Snake::new(Position { x: 6, y: 4 }, Direction::Right);
        state.food = Food::new(Position { x: 0, y: 0 });
        state
    }

    #[test]
    fn loop_stops_on_quit_without_another_frame() {
        let mut state = state_heading_right();
        let mut surface = RecordingSurface::default();
        let mut input = ScriptedInput::new(vec![vec![], vec![]]);
        let mut pacer = CountingPacer::default();

        let summary = run(
            &mut state,
            &Palette::default(),
            &mut surface,
            &mut input,
            &mut pacer,
        )
        .expect("scripted session should not fail");

        assert_eq!(
            summary,
            SessionSummary {
                ticks: 2,
                resets: 0
            }
        );
        assert_eq!(surface.frames.len(), 2);
        assert_eq!(pacer.waits, 3);
        assert_eq!(state.snake.head(), Position { x: 8, y: 4 });
    }

    #[test]
    fn every_frame_draws_food_and_each_segment() {
        let mut state = state_heading_right();
        state.snake.grow();
        state.snake.grow();
        let mut surface = RecordingSurface::default();
        let mut input = ScriptedInput::new(vec![vec![]; 4]);

        run(
            &mut state,
            &Palette::default(),
            &mut surface,
            &mut input,
            &mut CountingPacer::default(),
        )
        .expect("scripted session should not fail");

        assert_eq!(surface.frames.len(), 4);
        assert_eq!(surface.clears.len(), 5);
        let sizes: Vec<usize> = surface.frames.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![3, 4, 4, 4]);
    }

    #[test]
    fn input_drained_in_a_tick_steers_that_tick() {
        let mut state = state_heading_right();
        let mut surface = RecordingSurface::default();
        let mut input = ScriptedInput::new(vec![vec![
            GameInput::Direction(Direction::Down),
            GameInput::Direction(Direction::Left),
        ]]);

        run(
            &mut state,
            &Palette::default(),
            &mut surface,
            &mut input,
            &mut CountingPacer::default(),
        )
        .expect("scripted session should not fail");

        // Left is the reverse of the committed Right and is dropped.
        assert_eq!(state.snake.direction(), Direction::Down);
        assert_eq!(state.snake.head(), Position { x: 6, y: 5 });
    }
}
