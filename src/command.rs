//! Gamepad → console command text.
//!
//! `/`-delimited: `move/<digit>` with digit `0`..`3` for up, right, down,
//! left, or a bare `drop`. Anything else decodes to
//! [`Command::Unrecognized`] and is ignored by the console.

use alloc::{
    format,
    string::String,
};

pub const MOVE: &str = "move";
pub const DROP: &str = "drop";
pub const SEPARATOR: char = '/';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Wire digit for this direction.
    #[must_use]
    pub const fn digit(self) -> char {
        match self {
            Self::Up => '0',
            Self::Right => '1',
            Self::Down => '2',
            Self::Left => '3',
        }
    }

    #[must_use]
    pub fn from_digit(token: &str) -> Option<Self> {
        match token {
            "0" => Some(Self::Up),
            "1" => Some(Self::Right),
            "2" => Some(Self::Down),
            "3" => Some(Self::Left),
            _ => None,
        }
    }

    /// One-step `(dx, dy)`; y grows downwards.
    #[must_use]
    pub const fn offset(self) -> (i8, i8) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    Move(Direction),
    Drop,
    /// Unknown verb, missing or bad argument, empty message.
    Unrecognized,
}

/// Decode one inbound message. Never fails; junk becomes `Unrecognized`.
///
/// Only the tokens a command needs are looked at, so trailing fields after a
/// valid command are tolerated.
#[must_use]
pub fn decode(message: &str) -> Command {
    let mut tokens = message.split(SEPARATOR);
    match tokens.next() {
        Some(MOVE) => tokens
            .next()
            .and_then(Direction::from_digit)
            .map_or(Command::Unrecognized, Command::Move),
        Some(DROP) => Command::Drop,
        _ => Command::Unrecognized,
    }
}

/// Wire text for `command`. `Unrecognized` has no encoding.
#[must_use]
pub fn encode(command: Command) -> Option<String> {
    match command {
        Command::Move(direction) => Some(format!("{MOVE}{SEPARATOR}{}", direction.digit())),
        Command::Drop => Some(String::from(DROP)),
        Command::Unrecognized => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_every_direction() {
        assert_eq!(decode("move/0"), Command::Move(Direction::Up));
        assert_eq!(decode("move/1"), Command::Move(Direction::Right));
        assert_eq!(decode("move/2"), Command::Move(Direction::Down));
        assert_eq!(decode("move/3"), Command::Move(Direction::Left));
    }

    #[test]
    fn decodes_drop() {
        assert_eq!(decode("drop"), Command::Drop);
    }

    #[test]
    fn junk_is_unrecognized() {
        for junk in [
            "spin", "", "/", "move", "move/", "move/4", "move/up", "move/12", "MOVE/1", "dropped",
            " drop", "move//1",
        ] {
            assert_eq!(decode(junk), Command::Unrecognized, "{junk:?}");
        }
    }

    #[test]
    fn trailing_fields_are_tolerated() {
        assert_eq!(decode("move/2/extra"), Command::Move(Direction::Down));
        assert_eq!(decode("drop/now"), Command::Drop);
    }

    #[test]
    fn encode_matches_decode() {
        for direction in Direction::ALL {
            let wire = encode(Command::Move(direction)).unwrap();
            assert_eq!(wire.len(), 6);
            assert_eq!(decode(&wire), Command::Move(direction));
        }
        assert_eq!(encode(Command::Drop).as_deref(), Some("drop"));
        assert_eq!(encode(Command::Unrecognized), None);
    }
}
