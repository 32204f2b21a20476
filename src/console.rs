//! The console's game loop.
//!
//! ```text
//! Spawning ──collides──▶ GameOver
//!    │
//!    ▼
//! AwaitingCommand ◀──────────────┐
//!    │ move/N           drop     │
//!    ▼                   │       │
//! Moving ────────────────┼───────┘
//!                        ▼
//!                     Dropped ──▶ Spawning
//! ```
//!
//! All I/O goes through injected collaborators: the radio [`Transport`], a
//! [`Scoreboard`] for the local display, a `DelayNs` for polling and pauses,
//! and an `RngCore` for dealing pieces.

use embedded_hal_async::delay::DelayNs;
use rand_core::RngCore;

use crate::{
    command::{
        self,
        Command,
        Direction,
    },
    config::GameConfig,
    error::Error,
    link::{
        self,
        Transport,
    },
    piece::{
        PieceTemplate,
        TEMPLATES,
    },
    session::{
        GameSession,
        SpawnOutcome,
    },
};

/// The console's own display: score between pieces, a final notice.
pub trait Scoreboard {
    fn show_score(&mut self, dropped: u32);
    fn clear(&mut self);
    fn show_game_over(&mut self, dropped: u32);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    Spawning,
    AwaitingCommand,
    Moving(Direction),
    Dropped,
    GameOver,
}

pub struct Console<T, S, D, R> {
    session: GameSession,
    config: GameConfig,
    templates: &'static [PieceTemplate],
    phase: Phase,
    transport: T,
    scoreboard: S,
    delay: D,
    rng: R,
}

impl<T, S, D, R> Console<T, S, D, R>
where
    T: Transport,
    S: Scoreboard,
    D: DelayNs,
    R: RngCore,
{
    pub fn new(transport: T, scoreboard: S, delay: D, rng: R, config: GameConfig) -> Self {
        Self {
            session: GameSession::new(),
            config,
            templates: &TEMPLATES,
            phase: Phase::Spawning,
            transport,
            scoreboard,
            delay,
            rng,
        }
    }

    /// Deal from a different shape set.
    ///
    /// # Panics
    ///
    /// If `templates` is empty.
    #[must_use]
    pub fn with_templates(mut self, templates: &'static [PieceTemplate]) -> Self {
        assert!(!templates.is_empty(), "no piece templates to deal from");
        self.templates = templates;
        self
    }

    pub const fn session(&self) -> &GameSession {
        &self.session
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    pub const fn scoreboard(&self) -> &S {
        &self.scoreboard
    }

    /// Play until a new piece no longer fits. Returns the number of drops.
    pub async fn run(&mut self) -> Result<u32, Error<T::Error>> {
        while self.step().await? != Phase::GameOver {}
        Ok(self.session.dropped_count())
    }

    /// Execute one transition and return the phase it led to.
    ///
    /// `AwaitingCommand` is the only phase that waits: it sends the board,
    /// then blocks until a command comes in (or the configured receive timeout
    /// runs out, in which case the board is sent again on the next step).
    pub async fn step(&mut self) -> Result<Phase, Error<T::Error>> {
        self.phase = match self.phase {
            Phase::Spawning => self.spawn(),
            Phase::AwaitingCommand => self.await_command().await?,
            Phase::Moving(direction) => {
                self.session.move_piece(direction);
                Phase::AwaitingCommand
            }
            Phase::Dropped => {
                self.session.drop_piece();
                let pause_ms =
                    u32::try_from(self.config.drop_pause.as_millis()).unwrap_or(u32::MAX);
                self.delay.delay_ms(pause_ms).await;
                self.scoreboard.clear();
                Phase::Spawning
            }
            Phase::GameOver => Phase::GameOver,
        };
        Ok(self.phase)
    }

    fn spawn(&mut self) -> Phase {
        self.scoreboard.show_score(self.session.dropped_count());
        match self
            .session
            .spawn(self.templates, self.config.spawn_origin, &mut self.rng)
        {
            SpawnOutcome::Spawned(_) => Phase::AwaitingCommand,
            SpawnOutcome::GameOver => {
                self.scoreboard.show_game_over(self.session.dropped_count());
                Phase::GameOver
            }
        }
    }

    async fn await_command(&mut self) -> Result<Phase, Error<T::Error>> {
        let frame = self.session.snapshot();
        self.transport
            .send(&frame)
            .await
            .map_err(Error::Transport)?;

        let received = link::receive_blocking(
            &mut self.transport,
            &mut self.delay,
            self.config.poll_interval,
            self.config.receive_timeout,
        )
        .await
        .map_err(Error::Transport)?;

        let Some(message) = received else {
            warn!("no command before the receive timeout, re-sending the board");
            return Ok(Phase::AwaitingCommand);
        };

        let decoded = command::decode(&message);
        debug!("received {} as {:?}", message.as_str(), decoded);
        Ok(match decoded {
            Command::Move(direction) => Phase::Moving(direction),
            Command::Drop => Phase::Dropped,
            Command::Unrecognized => {
                debug!("ignoring unrecognized command");
                Phase::AwaitingCommand
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::{
        string::String,
        vec::Vec,
    };

    use embassy_futures::block_on;
    use embassy_time::Duration;

    use super::*;
    use crate::{
        link::tests::{
            FakeDelay,
            FakeTransport,
            LinkDown,
        },
        piece::tests::ScriptedRng,
    };

    #[derive(Debug, PartialEq, Eq)]
    enum Shown {
        Score(u32),
        Clear,
        GameOver(u32),
    }

    #[derive(Default)]
    struct FakeScoreboard(Vec<Shown>);

    impl Scoreboard for FakeScoreboard {
        fn show_score(&mut self, dropped: u32) {
            self.0.push(Shown::Score(dropped));
        }

        fn clear(&mut self) {
            self.0.push(Shown::Clear);
        }

        fn show_game_over(&mut self, dropped: u32) {
            self.0.push(Shown::GameOver(dropped));
        }
    }

    type TestConsole = Console<FakeTransport, FakeScoreboard, FakeDelay, ScriptedRng>;

    fn console(inbound: &[&str], rng: &'static [u32]) -> TestConsole {
        Console::new(
            FakeTransport::with_inbound(inbound),
            FakeScoreboard::default(),
            FakeDelay::default(),
            ScriptedRng::new(rng),
            GameConfig::default(),
        )
    }

    #[test]
    fn first_round_sends_the_board_and_moves() {
        let mut console = console(&["move/2"], &[0]);

        assert_eq!(block_on(console.step()), Ok(Phase::AwaitingCommand));
        assert_eq!(console.scoreboard().0, [Shown::Score(0)]);

        assert_eq!(block_on(console.step()), Ok(Phase::Moving(Direction::Down)));
        assert_eq!(console.transport().sent, ["99000:99000:00000:00000:00000"]);

        assert_eq!(block_on(console.step()), Ok(Phase::AwaitingCommand));
        let p = console.session().piece().unwrap();
        assert_eq!((p.x, p.y), (0, 1));
    }

    #[test]
    fn blocked_and_unrecognized_commands_keep_waiting() {
        let mut console = console(&["move/0", "spin", "move/3", "move/"], &[0]);
        block_on(console.step()).unwrap();
        let phases: Vec<_> = (0..6).map(|_| block_on(console.step()).unwrap()).collect();
        assert_eq!(
            phases,
            [
                Phase::Moving(Direction::Up),
                Phase::AwaitingCommand,
                Phase::AwaitingCommand,
                Phase::Moving(Direction::Left),
                Phase::AwaitingCommand,
                Phase::AwaitingCommand,
            ]
        );
        // Board re-sent before every wait, unchanged each time.
        assert_eq!(console.transport().sent.len(), 4);
        assert!(console
            .transport()
            .sent
            .iter()
            .all(|s| s == "99000:99000:00000:00000:00000"));
    }

    #[test]
    fn drop_pauses_clears_and_respawns() {
        let mut console = console(&["drop"], &[1, 0]);
        block_on(console.step()).unwrap();
        assert_eq!(block_on(console.step()), Ok(Phase::Dropped));
        assert_eq!(block_on(console.step()), Ok(Phase::Spawning));

        assert_eq!(console.session().dropped_count(), 1);
        assert!(console.session().board().is_filled(0, 0));
        assert!(console.session().board().is_filled(1, 0));
        assert_eq!(console.scoreboard().0, [Shown::Score(0), Shown::Clear]);
        // One poll sleep, then the drop pause.
        assert_eq!(console.delay.sleeps_us, [250_000, 500_000]);

        // The square dealt next can't fit over the bar: game over.
        assert_eq!(block_on(console.step()), Ok(Phase::GameOver));
        assert_eq!(
            console.scoreboard().0,
            [
                Shown::Score(0),
                Shown::Clear,
                Shown::Score(1),
                Shown::GameOver(1),
            ]
        );
    }

    #[test]
    fn game_over_is_terminal_and_announced_once() {
        let mut console = console(&["drop"], &[0]);
        assert_eq!(block_on(console.run()), Ok(1));
        for _ in 0..3 {
            assert_eq!(block_on(console.step()), Ok(Phase::GameOver));
        }
        let notices = console
            .scoreboard()
            .0
            .iter()
            .filter(|s| matches!(s, Shown::GameOver(_)))
            .count();
        assert_eq!(notices, 1);
        assert!(console.session().is_over());
    }

    #[test]
    fn timeout_resends_the_board() {
        let mut transport = FakeTransport::default();
        transport
            .inbound
            .extend([None, None, Some(String::from("drop"))]);
        let mut console = Console::new(
            transport,
            FakeScoreboard::default(),
            FakeDelay::default(),
            ScriptedRng::new(&[0]),
            GameConfig::default().with_receive_timeout(Some(Duration::from_millis(500))),
        );

        block_on(console.step()).unwrap();
        assert_eq!(block_on(console.step()), Ok(Phase::AwaitingCommand));
        assert_eq!(console.transport().sent.len(), 1);
        assert_eq!(block_on(console.step()), Ok(Phase::Dropped));
        assert_eq!(console.transport().sent.len(), 2);
        assert_eq!(console.transport().sent[0], console.transport().sent[1]);
    }

    #[test]
    fn transport_failure_surfaces() {
        let mut console = console(&[], &[0]);
        block_on(console.step()).unwrap();
        assert_eq!(
            block_on(console.step()),
            Err(Error::Transport(LinkDown))
        );
    }

    static BARS: [PieceTemplate; 1] = [TEMPLATES[2]];

    #[test]
    fn deals_from_a_custom_template_set() {
        let mut console = console(&["move/1", "drop", "drop"], &[0, 3, 4]).with_templates(&BARS);
        assert_eq!(block_on(console.run()), Ok(2));
        assert_eq!(
            console.transport().sent,
            [
                "90000:90000:00000:00000:00000",
                "09000:09000:00000:00000:00000",
                "93000:93000:00000:00000:00000",
            ]
        );
        assert_eq!(console.session().board().filled_count(), 4);
    }

    #[test]
    #[should_panic(expected = "no piece templates")]
    fn empty_template_set_is_rejected() {
        let _ = console(&[], &[0]).with_templates(&[]);
    }

    #[test]
    fn custom_spawn_origin() {
        let mut console = Console::new(
            FakeTransport::with_inbound(&["drop"]),
            FakeScoreboard::default(),
            FakeDelay::default(),
            ScriptedRng::new(&[2]),
            GameConfig::default().with_spawn_origin(2, 3),
        );
        block_on(console.step()).unwrap();
        block_on(console.step()).unwrap();
        assert_eq!(console.transport().sent, ["00000:00000:00000:00900:00900"]);
    }
}
