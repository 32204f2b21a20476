//! # blocklink
//!
//! A falling-block puzzle for two Disobey 2026 badges talking over the radio.
//!
//! - The **console** owns the game: it deals pieces onto a 5×5 board, sends
//!   the board to the gamepad, and applies the commands it gets back.
//! - The **gamepad** shows the board it receives and answers with
//!   `move/<digit>` or `drop`.
//!
//! The game engine ([`session`], [`collision`], [`codec`], [`command`]) is
//! plain `no_std` + `alloc` code. The loops ([`console`], [`gamepad`]) reach
//! the outside world only through small traits (a [`link::Transport`], a
//! display, an `embedded_hal_async` delay and a `rand_core` RNG), so the whole
//! game runs on the host in tests. The ESP32-S3 bindings live behind the
//! `badge` feature.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! let config = GameConfig::default();
//! let mut console = Console::new(radio, scoreboard, embassy_time::Delay, rng, config);
//! let dropped = console.run().await?;
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

#[macro_use]
mod fmt;

pub mod board;
pub mod codec;
pub mod collision;
pub mod command;
pub mod config;
pub mod console;
mod error;
pub mod gamepad;
pub mod link;
pub mod piece;
pub mod session;
pub mod view;

#[cfg(feature = "badge")]
pub mod badge;

pub use board::{
    BOARD_HEIGHT,
    BOARD_WIDTH,
    Board,
};
pub use collision::collides;
pub use command::{
    Command,
    Direction,
};
pub use config::GameConfig;
pub use console::{
    Console,
    Phase,
    Scoreboard,
};
pub use error::Error;
pub use gamepad::{
    BoardRenderer,
    Controls,
    Gamepad,
    Press,
    Tilt,
};
pub use link::Transport;
pub use piece::{
    ActivePiece,
    PieceKind,
    PieceTemplate,
    TEMPLATES,
};
pub use session::GameSession;
pub use view::BoardView;
