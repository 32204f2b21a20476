//! Game state and the operations that change it.

use alloc::string::String;

use rand_core::RngCore;

use crate::{
    board::Board,
    codec,
    collision::collides,
    command::{
        Command,
        Direction,
    },
    piece::{
        self,
        ActivePiece,
        PieceTemplate,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpawnOutcome {
    Spawned(ActivePiece),
    /// The new piece overlapped the board at the origin.
    GameOver,
}

/// What applying one command did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Applied {
    Moved,
    /// The move would have collided; the piece stayed put.
    Blocked,
    Dropped,
    /// Unrecognized command, no active piece, or the game is over.
    Ignored,
}

/// Everything the console knows about the running game.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GameSession {
    board: Board,
    piece: Option<ActivePiece>,
    dropped: u32,
    over: bool,
}

impl GameSession {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            board: Board::new(),
            piece: None,
            dropped: 0,
            over: false,
        }
    }

    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub const fn piece(&self) -> Option<&ActivePiece> {
        self.piece.as_ref()
    }

    /// Pieces dropped so far; doubles as the score.
    #[must_use]
    pub const fn dropped_count(&self) -> u32 {
        self.dropped
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.over
    }

    /// Deal a new piece at `origin`, replacing any active one.
    ///
    /// If it doesn't fit there the game is over for good.
    pub fn spawn<R: RngCore + ?Sized>(
        &mut self,
        templates: &[PieceTemplate],
        origin: (i8, i8),
        rng: &mut R,
    ) -> SpawnOutcome {
        if self.over {
            return SpawnOutcome::GameOver;
        }

        let (x, y) = origin;
        let new_piece = piece::spawn(templates, x, y, rng);
        if collides(&self.board, &new_piece, x, y) {
            info!("no room for {:?}, game over after {} drops", new_piece.kind(), self.dropped);
            self.piece = None;
            self.over = true;
            return SpawnOutcome::GameOver;
        }

        debug!("spawned {:?} at ({}, {})", new_piece.kind(), x, y);
        self.piece = Some(new_piece);
        SpawnOutcome::Spawned(new_piece)
    }

    pub fn apply(&mut self, command: Command) -> Applied {
        if self.over {
            return Applied::Ignored;
        }
        match command {
            Command::Move(_) | Command::Drop if self.piece.is_none() => Applied::Ignored,
            Command::Move(direction) => {
                if self.move_piece(direction) {
                    Applied::Moved
                } else {
                    Applied::Blocked
                }
            }
            Command::Drop => {
                self.drop_piece();
                Applied::Dropped
            }
            Command::Unrecognized => {
                debug!("ignoring unrecognized command");
                Applied::Ignored
            }
        }
    }

    /// Shift the active piece one cell if the target is free.
    ///
    /// Returns whether it moved.
    pub fn move_piece(&mut self, direction: Direction) -> bool {
        let Some(active) = self.piece.as_mut() else {
            return false;
        };
        let (dx, dy) = direction.offset();
        let x = active.x.saturating_add(dx);
        let y = active.y.saturating_add(dy);
        if collides(&self.board, active, x, y) {
            trace!("{:?} blocked at ({}, {})", direction, active.x, active.y);
            return false;
        }
        active.x = x;
        active.y = y;
        true
    }

    /// Merge the active piece into the board and retire it.
    ///
    /// The resting place is trusted: spawn and every move were collision
    /// checked. Returns `false` when there is no active piece.
    pub fn drop_piece(&mut self) -> bool {
        let Some(active) = self.piece.take() else {
            return false;
        };
        for (x, y) in active.cells() {
            self.board.fill(x, y);
        }
        self.dropped += 1;
        info!(
            "dropped {:?} at ({}, {}), {} so far",
            active.kind(),
            active.x,
            active.y,
            self.dropped
        );
        true
    }

    /// Wire encoding of the board with the active piece, if any, on top.
    #[must_use]
    pub fn snapshot(&self) -> String {
        match &self.piece {
            Some(active) => codec::serialize(&self.board, active),
            None => codec::serialize_board(&self.board),
        }
    }
}
