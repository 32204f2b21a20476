//! Board-state wire encoding, console → gamepad.
//!
//! One character per cell, rows top to bottom joined by `:`:
//! `'9'` active piece, `'3'` settled block, `'0'` empty. An empty board with a
//! square at the origin reads `99000:99000:00000:00000:00000`.

use alloc::string::String;

use crate::{
    board::{
        BOARD_HEIGHT,
        BOARD_WIDTH,
        Board,
    },
    piece::ActivePiece,
};

pub const CELL_EMPTY: char = '0';
pub const CELL_SETTLED: char = '3';
pub const CELL_ACTIVE: char = '9';
pub const ROW_DELIMITER: char = ':';

/// Encoded length: every cell plus the delimiters between rows.
pub const WIRE_LEN: usize = BOARD_WIDTH * BOARD_HEIGHT + BOARD_HEIGHT - 1;

/// Encode the board with `piece` drawn over it.
///
/// Active piece cells win over settled cells underneath them.
#[must_use]
pub fn serialize(board: &Board, piece: &ActivePiece) -> String {
    encode(board, Some(piece))
}

/// Encode the board alone.
#[must_use]
pub fn serialize_board(board: &Board) -> String {
    encode(board, None)
}

fn encode(board: &Board, piece: Option<&ActivePiece>) -> String {
    let mut out = String::with_capacity(WIRE_LEN);
    for (y, row) in board.rows().enumerate() {
        if y > 0 {
            out.push(ROW_DELIMITER);
        }
        for (x, &settled) in row.iter().enumerate() {
            let active = piece.is_some_and(|p| p.occupies(x as i8, y as i8));
            out.push(match (active, settled) {
                (true, _) => CELL_ACTIVE,
                (false, true) => CELL_SETTLED,
                (false, false) => CELL_EMPTY,
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::{
        PieceKind,
        TEMPLATES,
        tests::template,
    };

    #[test]
    fn square_at_origin_on_empty_board() {
        let square = ActivePiece::new(template(PieceKind::Square), 0, 0);
        assert_eq!(
            serialize(&Board::new(), &square),
            "99000:99000:00000:00000:00000"
        );
    }

    #[test]
    fn piece_is_drawn_over_settled_cells() {
        let mut board = Board::new();
        board.fill(4, 4);
        board.fill(1, 1);
        board.fill(2, 1);
        let skew = ActivePiece::new(template(PieceKind::Skew), 1, 0);
        assert_eq!(serialize(&board, &skew), "00900:09900:00000:00000:00003");
    }

    #[test]
    fn empty_shape_cells_show_what_is_underneath() {
        let mut board = Board::new();
        board.fill(3, 3);
        let notch = ActivePiece::new(template(PieceKind::Notch), 2, 2);
        assert_eq!(serialize(&board, &notch), "00000:00000:00990:00930:00000");
    }

    #[test]
    fn board_only() {
        let mut board = Board::new();
        board.fill(0, 4);
        assert_eq!(serialize_board(&board), "00000:00000:00000:00000:30000");
    }

    #[test]
    fn output_shape_is_fixed() {
        let mut board = Board::new();
        board.fill(2, 2);
        for t in TEMPLATES {
            for (x, y) in [(0, 0), (3, 3), (4, 4), (-1, 2)] {
                let wire = serialize(&board, &ActivePiece::new(t, x, y));
                assert_eq!(wire.len(), WIRE_LEN);
                let rows: Vec<_> = wire.split(ROW_DELIMITER).collect();
                assert_eq!(rows.len(), BOARD_HEIGHT);
                assert!(rows.iter().all(|r| r.len() == BOARD_WIDTH));
                assert!(wire.chars().all(|c| "039:".contains(c)));
            }
        }
    }
}
