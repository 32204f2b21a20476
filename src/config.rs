//! Tunables shared by the console and the gamepad.

use embassy_time::Duration;

/// Radio group both devices must agree on.
pub const DEFAULT_GROUP_ID: u8 = 31;
/// Delay between two receive polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);
/// Pause after a drop before the score is cleared.
pub const DEFAULT_DROP_PAUSE: Duration = Duration::from_millis(500);
/// Tilt (milli-g) an axis must exceed to count as a direction.
pub const DEFAULT_TILT_DEADBAND: i16 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GameConfig {
    /// Where every new piece is anchored.
    pub spawn_origin: (i8, i8),
    pub poll_interval: Duration,
    /// `None` waits forever for the next command. With `Some`, the console
    /// re-sends the board state each time the timeout runs out.
    pub receive_timeout: Option<Duration>,
    pub drop_pause: Duration,
    pub group_id: u8,
    pub tilt_deadband: i16,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            spawn_origin: (0, 0),
            poll_interval: DEFAULT_POLL_INTERVAL,
            receive_timeout: None,
            drop_pause: DEFAULT_DROP_PAUSE,
            group_id: DEFAULT_GROUP_ID,
            tilt_deadband: DEFAULT_TILT_DEADBAND,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub const fn with_spawn_origin(mut self, x: i8, y: i8) -> Self {
        self.spawn_origin = (x, y);
        self
    }

    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    #[must_use]
    pub const fn with_receive_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.receive_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_drop_pause(mut self, pause: Duration) -> Self {
        self.drop_pause = pause;
        self
    }

    #[must_use]
    pub const fn with_group_id(mut self, group_id: u8) -> Self {
        self.group_id = group_id;
        self
    }

    #[must_use]
    pub const fn with_tilt_deadband(mut self, deadband: i16) -> Self {
        self.tilt_deadband = deadband;
        self
    }
}
