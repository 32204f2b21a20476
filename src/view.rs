//! The gamepad's side of the board wire format: decode, then draw.

use alloc::format;

use embedded_graphics::{
    mono_font::{
        MonoTextStyle,
        ascii::{
            FONT_6X10,
            FONT_10X20,
        },
    },
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{
        PrimitiveStyle,
        Rectangle,
    },
    text::{
        Baseline,
        Text,
    },
};

use crate::{
    board::{
        BOARD_HEIGHT,
        BOARD_WIDTH,
    },
    codec::{
        CELL_ACTIVE,
        CELL_EMPTY,
        CELL_SETTLED,
        ROW_DELIMITER,
    },
};

pub const EMPTY_COLOR: Rgb565 = Rgb565::BLACK;
pub const SETTLED_COLOR: Rgb565 = Rgb565::CSS_STEEL_BLUE;
pub const ACTIVE_COLOR: Rgb565 = Rgb565::YELLOW;
pub const TEXT_COLOR: Rgb565 = Rgb565::WHITE;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ViewCell {
    #[default]
    Empty,
    Settled,
    Active,
}

impl ViewCell {
    const fn color(self) -> Rgb565 {
        match self {
            Self::Empty => EMPTY_COLOR,
            Self::Settled => SETTLED_COLOR,
            Self::Active => ACTIVE_COLOR,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ViewError {
    #[error("board view has {0} rows")]
    RowCount(usize),
    #[error("board view row {row} is {len} cells wide")]
    RowWidth { row: usize, len: usize },
    #[error("unknown board cell {0:?}")]
    UnknownCell(char),
}

/// A decoded board frame, as the gamepad shows it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardView {
    cells: [[ViewCell; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl BoardView {
    /// Decode a frame, rejecting anything that isn't exactly
    /// `BOARD_HEIGHT` rows of `BOARD_WIDTH` cells.
    pub fn parse(wire: &str) -> Result<Self, ViewError> {
        let rows = wire.split(ROW_DELIMITER).count();
        if rows != BOARD_HEIGHT {
            return Err(ViewError::RowCount(rows));
        }

        let mut view = Self::default();
        for (y, row) in wire.split(ROW_DELIMITER).enumerate() {
            let len = row.chars().count();
            if len != BOARD_WIDTH {
                return Err(ViewError::RowWidth { row: y, len });
            }
            for (x, c) in row.chars().enumerate() {
                view.cells[y][x] = match c {
                    CELL_EMPTY => ViewCell::Empty,
                    CELL_SETTLED => ViewCell::Settled,
                    CELL_ACTIVE => ViewCell::Active,
                    other => return Err(ViewError::UnknownCell(other)),
                };
            }
        }
        Ok(view)
    }

    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<ViewCell> {
        self.cells.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Cells in row-major order with their coordinates.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, ViewCell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(y, row)| row.iter().enumerate().map(move |(x, &c)| (x, y, c)))
    }
}

/// Draw the board as `cell_px` squares with a one pixel gutter, top-left at `origin`.
pub fn draw_board<D>(
    target: &mut D,
    view: &BoardView,
    origin: Point,
    cell_px: u32,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let side = cell_px.saturating_sub(1).max(1);
    let pitch = cell_px as i32;
    for (x, y, cell) in view.cells() {
        let top_left = origin + Point::new(x as i32 * pitch, y as i32 * pitch);
        Rectangle::new(top_left, Size::new_equal(side))
            .into_styled(PrimitiveStyle::with_fill(cell.color()))
            .draw(target)?;
    }
    Ok(())
}

/// Draw the drop counter in the large font, top-left at `origin`.
pub fn draw_score<D>(target: &mut D, dropped: u32, origin: Point) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let style = MonoTextStyle::new(&FONT_10X20, TEXT_COLOR);
    Text::with_baseline(&format!("{dropped}"), origin, style, Baseline::Top).draw(target)?;
    Ok(())
}

/// Draw the end-of-game notice with the final count below it.
pub fn draw_game_over<D>(target: &mut D, dropped: u32, origin: Point) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let style = MonoTextStyle::new(&FONT_6X10, TEXT_COLOR);
    Text::with_baseline("GAME OVER", origin, style, Baseline::Top).draw(target)?;
    draw_score(target, dropped, origin + Point::new(0, 14))
}
