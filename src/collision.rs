//! Placement test for a piece against the board and its edges.

use crate::{
    board::Board,
    piece::ActivePiece,
};

/// Whether `piece`, anchored at `(test_x, test_y)`, would collide.
///
/// A placement collides when the anchor lies off the board, when any filled
/// cell of the shape lies off the board, or when any filled cell lands on a
/// filled board cell. The piece's own stored position is ignored; callers pass
/// the candidate position they want to try.
///
/// Edges are checked before occupancy, so the board is never read outside its
/// extent.
#[must_use]
pub fn collides(board: &Board, piece: &ActivePiece, test_x: i8, test_y: i8) -> bool {
    if !board.contains(test_x, test_y) {
        return true;
    }

    if piece.cells_at(test_x, test_y).any(|(x, y)| !board.contains(x, y)) {
        return true;
    }

    piece
        .cells_at(test_x, test_y)
        .any(|(x, y)| board.is_filled(x, y))
}
