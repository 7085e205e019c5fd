use std::io;
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Block;

use crate::config::{CELL_COLUMNS, GAME_TITLE, GLYPH_CELL, GridSize, Rgb};
use crate::input::{GameInput, InputSource, map_key};
use crate::render::{CellStyle, Surface};
use crate::snake::Position;

/// Raw mode, alternate screen and hidden cursor for the lifetime of a game.
///
/// Dropping the guard puts the terminal back, whichever way the loop ended.
#[derive(Debug)]
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    /// Switches stdout into game mode and titles the window.
    pub fn enter(title: &str) -> io::Result<Self> {
        enable_raw_mode()?;

        // Built before the screen switch so a failure below still restores.
        let guard = Self { _private: () };
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide, SetTitle(title))?;
        Ok(guard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(error) = restore_terminal() {
            log::warn!("terminal cleanup failed: {error}");
        }
    }
}

/// Leaves game mode; also called from the panic hook.
pub fn restore_terminal() -> io::Result<()> {
    let raw_mode = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)?;
    raw_mode
}

/// Collects one frame of cells and renders it through ratatui on `present`.
pub struct TerminalSurface<B: Backend> {
    terminal: Terminal<B>,
    grid: GridSize,
    background: Rgb,
    border: Rgb,
    cells: Vec<(Position, CellStyle)>,
}

impl<B: Backend> TerminalSurface<B> {
    #[must_use]
    pub fn new(terminal: Terminal<B>, grid: GridSize, border: Rgb) -> Self {
        Self {
            terminal,
            grid,
            background: Rgb(0, 0, 0),
            border,
            cells: Vec::new(),
        }
    }
}

impl<B: Backend> Surface for TerminalSurface<B> {
    fn clear(&mut self, background: Rgb) {
        self.background = background;
        self.cells.clear();
    }

    fn draw_cell(&mut self, position: Position, style: CellStyle) {
        self.cells.push((position, style));
    }

    fn present(&mut self) -> io::Result<()> {
        let (grid, background, border) = (self.grid, self.background, self.border);
        let cells = self.cells.as_slice();

        self.terminal
            .draw(|frame| render_playfield(frame, grid, background, border, cells))?;
        Ok(())
    }
}

/// Draws the framed playfield and every collected cell.
pub fn render_playfield(
    frame: &mut Frame<'_>,
    grid: GridSize,
    background: Rgb,
    border: Rgb,
    cells: &[(Position, CellStyle)],
) {
    let play_area = playfield_area(frame.area(), grid);
    let block = Block::bordered()
        .title(format!(" {GAME_TITLE} "))
        .border_style(Style::new().fg(border.into()))
        .style(Style::new().bg(background.into()));

    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    let buffer = frame.buffer_mut();
    for (position, style) in cells {
        let Some((x, y)) = logical_to_terminal(inner, grid, *position) else {
            continue;
        };

        buffer.set_string(
            x,
            y,
            GLYPH_CELL,
            Style::new().fg(style.border.into()).bg(style.fill.into()),
        );
    }
}

/// Returns the framed playfield rectangle, centered and clipped to `area`.
#[must_use]
pub fn playfield_area(area: Rect, grid: GridSize) -> Rect {
    let width = grid
        .width
        .saturating_mul(CELL_COLUMNS)
        .saturating_add(2)
        .min(area.width);
    let height = grid.height.saturating_add(2).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.saturating_mul(CELL_COLUMNS);
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_COLUMNS) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

/// Drains pending crossterm key events without blocking.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn drain(&mut self) -> io::Result<Vec<GameInput>> {
        let mut inputs = Vec::new();

        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                inputs.extend(map_key(key));
            }
        }

        Ok(inputs)
    }
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;
    use ratatui::style::Color;

    use crate::config::{GridSize, Palette};
    use crate::render::{CellStyle, Surface};
    use crate::snake::Position;

    use super::{TerminalSurface, logical_to_terminal, playfield_area, render_playfield};

    const GRID: GridSize = GridSize {
        width: 4,
        height: 3,
    };

    #[test]
    fn playfield_is_centered_with_double_width_cells() {
        let area = Rect::new(0, 0, 20, 9);

        assert_eq!(playfield_area(area, GRID), Rect::new(5, 2, 10, 5));
    }

    #[test]
    fn playfield_is_clipped_to_small_terminals() {
        let area = Rect::new(0, 0, 6, 3);

        assert_eq!(playfield_area(area, GRID), area);
    }

    #[test]
    fn cells_map_to_two_columns_each() {
        let inner = Rect::new(1, 1, 8, 3);

        assert_eq!(
            logical_to_terminal(inner, GRID, Position { x: 3, y: 2 }),
            Some((7, 3))
        );
        assert_eq!(
            logical_to_terminal(inner, GRID, Position { x: 4, y: 0 }),
            None
        );
    }

    #[test]
    fn rendered_cell_uses_fill_background_and_border_foreground() {
        let palette = Palette::default();
        let mut terminal =
            Terminal::new(TestBackend::new(10, 5)).expect("test terminal should build");
        let cells = [(
            Position { x: 1, y: 0 },
            CellStyle {
                fill: palette.food,
                border: palette.border,
            },
        )];

        terminal
            .draw(|frame| {
                render_playfield(frame, GRID, palette.background, palette.border, &cells)
            })
            .expect("test draw should succeed");

        let buffer = terminal.backend().buffer();
        let left = &buffer[(3, 1)];
        let right = &buffer[(4, 1)];
        assert_eq!(left.symbol(), "[");
        assert_eq!(right.symbol(), "]");
        assert_eq!(left.bg, Color::Rgb(255, 0, 0));
        assert_eq!(left.fg, Color::Rgb(93, 216, 228));
    }

    #[test]
    fn surface_presents_only_the_cells_drawn_since_clear() {
        let palette = Palette::default();
        let terminal = Terminal::new(TestBackend::new(10, 5)).expect("test terminal should build");
        let mut surface = TerminalSurface::new(terminal, GRID, palette.border);
        let snake = CellStyle {
            fill: palette.snake,
            border: palette.border,
        };

        surface.clear(palette.background);
        surface.draw_cell(Position { x: 0, y: 0 }, snake);
        surface.present().expect("first frame should draw");

        surface.clear(palette.background);
        surface.draw_cell(Position { x: 3, y: 2 }, snake);
        surface.present().expect("second frame should draw");

        let buffer = surface.terminal.backend().buffer();
        assert_eq!(buffer[(1, 1)].symbol(), " ");
        assert_eq!(buffer[(7, 3)].symbol(), "[");
        assert_eq!(buffer[(8, 3)].symbol(), "]");
        assert_eq!(buffer[(7, 3)].bg, Color::Rgb(0, 255, 0));
        assert_eq!(buffer[(1, 1)].bg, Color::Rgb(0, 0, 0));
    }
}
