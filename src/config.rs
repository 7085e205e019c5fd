use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

/// An RGB triple, stored as `[r, g, b]` in settings files.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self(r, g, b)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(rgb: Rgb) -> Self {
        [rgb.0, rgb.1, rgb.2]
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    }
}

/// Colors applied to every drawn element.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Fill for empty play-area cells.
    pub background: Rgb,
    /// Outline drawn around every occupied cell.
    pub border: Rgb,
    pub snake: Rgb,
    pub food: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb(0, 0, 0),
            border: Rgb(93, 216, 228),
            snake: Rgb(0, 255, 0),
            food: Rgb(255, 0, 0),
        }
    }
}

/// Window/frame title.
pub const GAME_TITLE: &str = "Snake";

/// Glyph pair for one grid cell; the border color is its foreground.
pub const GLYPH_CELL: &str = "[]";

/// Terminal columns per grid cell, so cells render roughly square.
pub const CELL_COLUMNS: u16 = 2;

/// Default playfield width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 32;

/// Default playfield height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 24;

/// Default simulation speed.
pub const DEFAULT_TICKS_PER_SECOND: u32 = 10;

/// Smallest accepted grid edge; keeps a free cell for food after a reset.
pub const MIN_GRID_EDGE: u16 = 2;

/// Largest accepted grid edge.
pub const MAX_GRID_EDGE: u16 = 500;

/// Accepted speed range, in ticks per second.
pub const MIN_TICKS_PER_SECOND: u32 = 1;
pub const MAX_TICKS_PER_SECOND: u32 = 60;

#[cfg(test)]
mod tests {
    use ratatui::style::Color;

    use super::{GridSize, Palette, Rgb};

    #[test]
    fn default_grid_matches_classic_window() {
        let grid = GridSize::default();

        assert_eq!((grid.width, grid.height), (32, 24));
        assert_eq!(grid.total_cells(), 768);
    }

    #[test]
    fn palette_colors_convert_to_terminal_rgb() {
        let palette = Palette::default();

        assert_eq!(Color::from(palette.border), Color::Rgb(93, 216, 228));
        assert_eq!(Color::from(palette.food), Color::Rgb(255, 0, 0));
    }

    #[test]
    fn rgb_serializes_as_array() {
        let json = serde_json::to_string(&Rgb(1, 2, 3)).expect("rgb should serialize");
        assert_eq!(json, "[1,2,3]");
    }
}
