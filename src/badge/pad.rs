//! D-pad and A/B buttons as the gamepad's controls.
//!
//! The badge has no accelerometer, so a held D-pad direction reads as a
//! full-scale tilt on that axis when A is pressed. B drops.

use embassy_futures::select::{
    Either,
    select,
};
use embassy_time::{
    Duration,
    Timer,
};
use esp_hal::gpio::{
    Input,
    InputConfig,
    Pull,
};

use super::PadResources;
use crate::gamepad::{
    Controls,
    Press,
    Tilt,
};

const DEBOUNCE_MS: u64 = 20;

/// What a held D-pad direction reads as, in milli-g.
const FULL_TILT: i16 = 1000;

pub struct Pad {
    up: Input<'static>,
    down: Input<'static>,
    left: Input<'static>,
    right: Input<'static>,
    a: Input<'static>,
    b: Input<'static>,
}

impl From<PadResources<'static>> for Pad {
    fn from(res: PadResources<'static>) -> Self {
        let pull_up = InputConfig::default().with_pull(Pull::Up);
        Self {
            up: Input::new(res.up, pull_up),
            down: Input::new(res.down, pull_up),
            left: Input::new(res.left, pull_up),
            right: Input::new(res.right, pull_up),
            a: Input::new(res.a, pull_up),
            b: Input::new(res.b, pull_up),
        }
    }
}

impl Pad {
    /// Current D-pad state as a tilt reading. Buttons are active low.
    fn tilt(&self) -> Tilt {
        let axis = |positive: &Input<'_>, negative: &Input<'_>| {
            match (positive.is_low(), negative.is_low()) {
                (true, false) => FULL_TILT,
                (false, true) => -FULL_TILT,
                _ => 0,
            }
        };
        Tilt {
            x: axis(&self.right, &self.left),
            y: axis(&self.up, &self.down),
        }
    }

    /// Wait for a debounced press (falling edge, active low).
    async fn debounce_press(button: &mut Input<'_>) {
        loop {
            button.wait_for_falling_edge().await;
            Timer::after(Duration::from_millis(DEBOUNCE_MS)).await;
            if button.is_low() {
                return;
            }
        }
    }
}

impl Controls for Pad {
    async fn next_press(&mut self) -> Press {
        let pressed = select(
            Self::debounce_press(&mut self.a),
            Self::debounce_press(&mut self.b),
        )
        .await;
        match pressed {
            Either::First(()) => Press::Move(self.tilt()),
            Either::Second(()) => Press::Drop,
        }
    }
}
