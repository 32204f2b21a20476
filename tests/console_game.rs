//! A console and a gamepad playing a full game over an in-memory radio.

use std::{
    cell::RefCell,
    collections::VecDeque,
    convert::Infallible,
    rc::Rc,
};

use blocklink::{
    BoardRenderer,
    BoardView,
    Console,
    Controls,
    GameConfig,
    Gamepad,
    Press,
    Scoreboard,
    Tilt,
    Transport,
    view::ViewCell,
};
use embassy_futures::{
    block_on,
    select::{
        Either,
        select,
    },
    yield_now,
};
use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;
use rand_core::RngCore;

type Queue = Rc<RefCell<VecDeque<String>>>;

/// One end of a loss-free radio link.
struct Wire {
    outbox: Queue,
    inbox: Queue,
    sent: Vec<String>,
}

fn link() -> (Wire, Wire) {
    let a: Queue = Rc::default();
    let b: Queue = Rc::default();
    (
        Wire {
            outbox: a.clone(),
            inbox: b.clone(),
            sent: Vec::new(),
        },
        Wire {
            outbox: b,
            inbox: a,
            sent: Vec::new(),
        },
    )
}

impl Transport for Wire {
    type Error = Infallible;

    async fn send(&mut self, message: &str) -> Result<(), Infallible> {
        self.sent.push(message.to_owned());
        self.outbox.borrow_mut().push_back(message.to_owned());
        Ok(())
    }

    fn try_receive(&mut self) -> Result<Option<String>, Infallible> {
        Ok(self.inbox.borrow_mut().pop_front())
    }
}

/// Lets the other side run instead of sleeping.
struct Yield;

impl DelayNs for Yield {
    async fn delay_ns(&mut self, _ns: u32) {
        yield_now().await;
    }
}

/// Always deals the first template (the square).
struct Squares;

impl RngCore for Squares {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        dest.fill(0);
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Shown {
    Score(u32),
    Clear,
    GameOver(u32),
}

#[derive(Default)]
struct Scores(Vec<Shown>);

impl Scoreboard for Scores {
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

#[derive(Default)]
struct Frames(Vec<BoardView>);

impl BoardRenderer for Frames {
    fn render(&mut self, view: &BoardView) {
        self.0.push(*view);
    }
}

/// Plays back a fixed list of presses, then keeps dropping.
///
/// `hesitate` is how many scheduler turns the first press takes.
struct Player {
    presses: VecDeque<Press>,
    hesitate: usize,
}

impl Controls for Player {
    async fn next_press(&mut self) -> Press {
        for _ in 0..core::mem::take(&mut self.hesitate) {
            yield_now().await;
        }
        self.presses.pop_front().unwrap_or(Press::Drop)
    }
}

const UP: Press = Press::Move(Tilt { x: 0, y: 1000 });
const DOWN: Press = Press::Move(Tilt { x: 0, y: -1000 });
const RIGHT: Press = Press::Move(Tilt { x: 1000, y: 0 });
const LEVEL: Press = Press::Move(Tilt { x: 30, y: -40 });

type TestConsole = Console<Wire, Scores, Yield, Squares>;
type TestGamepad = Gamepad<Wire, Frames, Player, Yield>;

/// Run both ends until the console reports game over.
fn play(presses: &[Press]) -> (TestConsole, TestGamepad, u32) {
    play_with(GameConfig::default(), presses, 0)
}

fn play_with(
    config: GameConfig,
    presses: &[Press],
    hesitate: usize,
) -> (TestConsole, TestGamepad, u32) {
    let (console_end, gamepad_end) = link();
    let mut console = Console::new(console_end, Scores::default(), Yield, Squares, config);
    let player = Player {
        presses: presses.iter().copied().collect(),
        hesitate,
    };
    let mut gamepad = Gamepad::new(gamepad_end, Frames::default(), player, Yield, config);

    let dropped = match block_on(select(console.run(), gamepad.run())) {
        Either::First(result) => result.unwrap(),
        Either::Second(result) => panic!("gamepad stopped first: {result:?}"),
    };
    (console, gamepad, dropped)
}

#[test]
fn squares_fill_the_corners_until_the_origin_is_taken() {
    let (console, gamepad, dropped) = play(&[
        DOWN, DOWN, DOWN, DOWN, Press::Drop,
        RIGHT, RIGHT, RIGHT, DOWN, DOWN, DOWN, Press::Drop,
        Press::Drop,
    ]);

    assert_eq!(dropped, 3);
    assert!(console.session().is_over());
    assert_eq!(console.session().board().filled_count(), 12);
    assert_eq!(
        console.scoreboard().0,
        [
            Shown::Score(0),
            Shown::Clear,
            Shown::Score(1),
            Shown::Clear,
            Shown::Score(2),
            Shown::Clear,
            Shown::Score(3),
            Shown::GameOver(3),
        ]
    );

    // Lockstep: one board per order, and the gamepad saw every board.
    let boards = &console.transport().sent;
    let orders = &gamepad.transport().sent;
    assert_eq!(boards.len(), 13);
    assert_eq!(orders.len(), 13);
    assert_eq!(gamepad.renderer().0.len(), 13);
    assert_eq!(boards[0], "99000:99000:00000:00000:00000");
    // The fourth move down was blocked by the floor.
    assert_eq!(boards[3], boards[4]);
    assert_eq!(boards[12], "99000:99000:00000:33033:33033");
    assert_eq!(orders[..5], ["move/2", "move/2", "move/2", "move/2", "drop"]);
}

#[test]
fn blocked_and_level_moves_keep_the_game_waiting() {
    let (console, gamepad, dropped) = play(&[UP, LEVEL, Press::Drop]);

    assert_eq!(dropped, 1);
    assert_eq!(gamepad.transport().sent, ["move/0", "move/", "drop"]);
    let boards = &console.transport().sent;
    assert_eq!(boards.len(), 3);
    assert!(boards.iter().all(|b| b == "99000:99000:00000:00000:00000"));
}

#[test]
fn slow_player_only_sees_the_latest_board() {
    let config = GameConfig::default().with_receive_timeout(Some(Duration::from_millis(500)));
    let (console, gamepad, dropped) = play_with(config, &[DOWN, DOWN, Press::Drop], 20);

    assert_eq!(dropped, 2);
    // The console re-sent the first board while the player hesitated.
    assert!(console.transport().sent.len() > 4);

    let shown: Vec<_> = gamepad
        .renderer()
        .0
        .iter()
        .map(|view| {
            view.cells()
                .filter(|&(_, _, cell)| cell != ViewCell::Empty)
                .map(|(x, y, _)| (x, y))
                .collect::<Vec<_>>()
        })
        .collect();
    let expected: [Vec<(usize, usize)>; 4] = [
        vec![(0, 0), (1, 0), (0, 1), (1, 1)],
        vec![(0, 1), (1, 1), (0, 2), (1, 2)],
        vec![(0, 2), (1, 2), (0, 3), (1, 3)],
        vec![(0, 0), (1, 0), (0, 1), (1, 1), (0, 2), (1, 2), (0, 3), (1, 3)],
    ];
    assert_eq!(shown, expected);
    assert_eq!(gamepad.transport().sent, ["move/2", "move/2", "drop", "drop"]);
}
