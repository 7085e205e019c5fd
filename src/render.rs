use crate::config::{Palette, Rgb};
use crate::food::Food;
use crate::game::GameState;
use crate::snake::{Position, Snake};

/// Fill and outline colors for one grid cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct CellStyle {
    pub fill: Rgb,
    pub border: Rgb,
}

/// Drawing target for one frame.
pub trait Surface {
    /// Paints the whole playfield with `background`.
    fn clear(&mut self, background: Rgb);

    /// Draws one colored, bordered cell at `position`.
    fn draw_cell(&mut self, position: Position, style: CellStyle);

    /// Shows everything drawn since the last `clear`.
    fn present(&mut self) -> std::io::Result<()>;
}

/// Anything that occupies cells and has one fill color.
pub trait Drawable {
    fn cells(&self) -> Vec<Position>;

    fn fill(&self, palette: &Palette) -> Rgb;

    /// Draws every cell with the palette border.
    fn draw<S: Surface + ?Sized>(&self, surface: &mut S, palette: &Palette) {
        let style = CellStyle {
            fill: self.fill(palette),
            border: palette.border,
        };
        for cell in self.cells() {
            surface.draw_cell(cell, style);
        }
    }
}

impl Drawable for Snake {
    fn cells(&self) -> Vec<Position> {
        self.segments().copied().collect()
    }

    fn fill(&self, palette: &Palette) -> Rgb {
        palette.snake
    }
}

impl Drawable for Food {
    fn cells(&self) -> Vec<Position> {
        vec![self.position]
    }

    fn fill(&self, palette: &Palette) -> Rgb {
        palette.food
    }
}

/// Draws food, then the snake on top. Does not clear or present.
pub fn draw_entities<S: Surface + ?Sized>(surface: &mut S, state: &GameState, palette: &Palette) {
    state.food.draw(surface, palette);
    state.snake.draw(surface, palette);
}
