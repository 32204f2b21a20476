//! The remote controller: shows what the console sends, answers with orders.

use alloc::{
    format,
    string::String,
};

use embedded_hal_async::delay::DelayNs;

use crate::{
    command::{
        self,
        Command,
        Direction,
        MOVE,
        SEPARATOR,
    },
    config::GameConfig,
    error::Error,
    link::{
        self,
        Transport,
    },
    view::BoardView,
};

/// Accelerometer reading in milli-g.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tilt {
    pub x: i16,
    pub y: i16,
}

/// Direction the device is tilted in, if any axis is past the deadband.
///
/// The y axis is checked first. Only the deadband's magnitude counts.
#[must_use]
pub fn direction_for_tilt(tilt: Tilt, deadband: i16) -> Option<Direction> {
    let deadband = deadband.saturating_abs();
    match tilt {
        Tilt { y, .. } if y > deadband => Some(Direction::Up),
        Tilt { y, .. } if y < -deadband => Some(Direction::Down),
        Tilt { x, .. } if x > deadband => Some(Direction::Right),
        Tilt { x, .. } if x < -deadband => Some(Direction::Left),
        _ => None,
    }
}

/// `move/<digit>`, or a bare `move/` when level. The console ignores the latter.
#[must_use]
pub fn move_order(direction: Option<Direction>) -> String {
    match direction {
        Some(direction) => command::encode(Command::Move(direction)).unwrap_or_default(),
        None => format!("{MOVE}{SEPARATOR}"),
    }
}

/// One button press worth an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Press {
    /// Move button, with the tilt at the moment it was pressed.
    Move(Tilt),
    Drop,
}

#[allow(async_fn_in_trait)]
pub trait Controls {
    /// Wait for the next press.
    async fn next_press(&mut self) -> Press;
}

/// Wherever the gamepad shows the board.
pub trait BoardRenderer {
    fn render(&mut self, view: &BoardView);
}

pub struct Gamepad<T, V, C, D> {
    config: GameConfig,
    transport: T,
    renderer: V,
    controls: C,
    delay: D,
}

impl<T, V, C, D> Gamepad<T, V, C, D>
where
    T: Transport,
    V: BoardRenderer,
    C: Controls,
    D: DelayNs,
{
    pub const fn new(transport: T, renderer: V, controls: C, delay: D, config: GameConfig) -> Self {
        Self {
            config,
            transport,
            renderer,
            controls,
            delay,
        }
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    pub const fn renderer(&self) -> &V {
        &self.renderer
    }

    /// Wait for a board frame, show it, wait for a press, send the order.
    ///
    /// Returns the order sent. Only the newest queued frame is shown; older
    /// copies (re-sent by the console while the player was deciding) are
    /// dropped. Frames that don't decode are skipped without asking for input,
    /// and `Ok(None)` is returned.
    pub async fn step(&mut self) -> Result<Option<String>, Error<T::Error>> {
        let mut frame = loop {
            let received = link::receive_blocking(
                &mut self.transport,
                &mut self.delay,
                self.config.poll_interval,
                None,
            )
            .await
            .map_err(Error::Transport)?;
            if let Some(frame) = received {
                break frame;
            }
        };
        while let Some(newer) = self.transport.try_receive().map_err(Error::Transport)? {
            trace!("skipping stale board frame");
            frame = newer;
        }

        let view = match BoardView::parse(&frame) {
            Ok(view) => view,
            Err(e) => {
                warn!("skipping board frame: {:?}", e);
                return Ok(None);
            }
        };
        self.renderer.render(&view);

        let order = match self.controls.next_press().await {
            Press::Move(tilt) => move_order(direction_for_tilt(tilt, self.config.tilt_deadband)),
            Press::Drop => String::from(command::DROP),
        };
        debug!("sending {}", order.as_str());
        self.transport
            .send(&order)
            .await
            .map_err(Error::Transport)?;
        Ok(Some(order))
    }

    /// Serve the console forever, or until the radio fails.
    pub async fn run(&mut self) -> Result<(), Error<T::Error>> {
        loop {
            self.step().await?;
        }
    }
}
