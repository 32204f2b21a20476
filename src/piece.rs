//! Piece shapes and the active (movable) piece.

use rand_core::RngCore;

/// Side of the square every template shape fits in.
pub const PIECE_SPAN: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PieceKind {
    /// 2×2 block.
    Square,
    /// 2 wide, 1 high.
    HorizontalBar,
    /// 1 wide, 2 high.
    VerticalBar,
    /// 2×2 with the bottom-right cell missing ("J"-like).
    Notch,
    /// 2×2 with the top-left cell missing ("S"-like).
    Skew,
}

/// A static shape.
///
/// `width`/`height` are stored next to the shape mask; [`PieceTemplate::new`]
/// rejects masks with filled cells outside that extent, so the two can't
/// disagree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PieceTemplate {
    kind: PieceKind,
    width: u8,
    height: u8,
    shape: [[bool; PIECE_SPAN]; PIECE_SPAN],
}

impl PieceTemplate {
    /// Build a template. Evaluated at compile time for the built-in set.
    ///
    /// # Panics
    ///
    /// If the extent exceeds [`PIECE_SPAN`] or a filled cell lies outside it.
    #[must_use]
    pub const fn new(
        kind: PieceKind,
        width: u8,
        height: u8,
        shape: [[bool; PIECE_SPAN]; PIECE_SPAN],
    ) -> Self {
        assert!(width as usize <= PIECE_SPAN && height as usize <= PIECE_SPAN);
        let mut y = 0;
        while y < PIECE_SPAN {
            let mut x = 0;
            while x < PIECE_SPAN {
                if shape[y][x] && (x >= width as usize || y >= height as usize) {
                    panic!("filled cell outside the declared piece extent");
                }
                x += 1;
            }
            y += 1;
        }
        Self {
            kind,
            width,
            height,
            shape,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn width(&self) -> u8 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u8 {
        self.height
    }

    /// Whether the local cell `(x, y)` is part of the shape.
    #[must_use]
    pub fn is_filled(&self, x: u8, y: u8) -> bool {
        x < self.width && y < self.height && self.shape[y as usize][x as usize]
    }

    /// Local coordinates of every filled cell, row by row.
    pub fn filled_cells(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y)))
            .filter(|&(x, y)| self.is_filled(x, y))
    }
}

const X: bool = true;
const O: bool = false;

/// The five shapes the console deals from.
pub const TEMPLATES: [PieceTemplate; 5] = [
    PieceTemplate::new(PieceKind::Square, 2, 2, [[X, X], [X, X]]),
    PieceTemplate::new(PieceKind::HorizontalBar, 2, 1, [[X, X], [O, O]]),
    PieceTemplate::new(PieceKind::VerticalBar, 1, 2, [[X, O], [X, O]]),
    PieceTemplate::new(PieceKind::Notch, 2, 2, [[X, X], [X, O]]),
    PieceTemplate::new(PieceKind::Skew, 2, 2, [[O, X], [X, X]]),
];

/// A template placed on the board. `(x, y)` is the top-left anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActivePiece {
    template: PieceTemplate,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    #[must_use]
    pub const fn new(template: PieceTemplate, x: i8, y: i8) -> Self {
        Self { template, x, y }
    }

    #[must_use]
    pub const fn template(&self) -> &PieceTemplate {
        &self.template
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.template.kind
    }

    /// Board coordinates the filled cells would cover with the anchor at `(x, y)`.
    pub fn cells_at(&self, x: i8, y: i8) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.template
            .filled_cells()
            .map(move |(dx, dy)| (x.saturating_add(dx as i8), y.saturating_add(dy as i8)))
    }

    /// Board coordinates of the filled cells at the current position.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.cells_at(self.x, self.y)
    }

    /// Whether board cell `(x, y)` is inside the bounding box and filled
    /// in the shape.
    #[must_use]
    pub fn occupies(&self, x: i8, y: i8) -> bool {
        let dx = i16::from(x) - i16::from(self.x);
        let dy = i16::from(y) - i16::from(self.y);
        (0..i16::from(self.template.width)).contains(&dx)
            && (0..i16::from(self.template.height)).contains(&dy)
            && self.template.is_filled(dx as u8, dy as u8)
    }
}

/// Deal a new piece, chosen uniformly from `templates`, anchored at `(x, y)`.
///
/// # Panics
///
/// If `templates` is empty.
pub fn spawn<R: RngCore + ?Sized>(
    templates: &[PieceTemplate],
    x: i8,
    y: i8,
    rng: &mut R,
) -> ActivePiece {
    assert!(!templates.is_empty(), "no piece templates to deal from");
    let index = rng.next_u32() as usize % templates.len();
    ActivePiece::new(templates[index], x, y)
}
