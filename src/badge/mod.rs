//! Disobey 2026 badge bindings for the two game roles.
//!
//! - **Screen**: the ST7789 LCD, showing the score (console) or the board
//!   (gamepad)
//! - **Pad**: D-pad plus A/B; the D-pad stands in for a tilt sensor
//! - **Radio**: ESP-NOW broadcast with group-id framing
//!
//! ```rust,ignore
//! let peripherals = blocklink::badge::init();
//! let resources = blocklink::split_resources!(peripherals);
//!
//! let screen: Screen = (resources.display, resources.backlight).into();
//! let pad: Pad = resources.pad.into();
//! ```

mod display;
mod pad;
mod radio;

pub use display::{
    Display,
    Screen,
};
use esp_hal::{
    assign_resources,
    clock::{
        Clock,
        CpuClock,
    },
    rng::Rng,
    rom,
};
pub use pad::Pad;
pub use radio::{
    EspNowLink,
    LinkError,
};
use rand_core::RngCore;

/// StaticCell helper: allocates a value into a `static` exactly once.
#[macro_export]
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write($val);
        x
    }};
}

// ── Pin / peripheral assignments ────────────────────────────────────────────

assign_resources! {
    pub Resources<'d> {
        display: DisplayResources<'d> {
            dc: GPIO15,
            rst: GPIO7,
            sck: GPIO4,
            cs: GPIO6,
            miso: GPIO16,
            mosi: GPIO5,
            spi: SPI2,
            dma: DMA_CH0,
        },
        backlight: BacklightResources<'d> {
            led: GPIO19,
        },
        pad: PadResources<'d> {
            up: GPIO11,
            down: GPIO1,
            left: GPIO21,
            right: GPIO2,
            a: GPIO13,
            b: GPIO38,
        },
        radio: RadioResources<'d> {
            wifi: WIFI,
        },
    }
}

// ── Board initialisation ────────────────────────────────────────────────────

/// Minimal CPU clock switcher for ESP32-S3.
///
/// Steps through an intermediate frequency before reaching the target,
/// which is required by the hardware.
fn set_cpu_clock(cpu_clock_speed: CpuClock) {
    let _ = esp_hal::peripherals::SYSTEM::regs()
        .sysclk_conf()
        .modify(|_, w| unsafe { w.soc_clk_sel().bits(1) });
    let _ = esp_hal::peripherals::SYSTEM::regs()
        .cpu_per_conf()
        .modify(|_, w| unsafe {
            let _ = w.pll_freq_sel().set_bit();
            w.cpuperiod_sel().bits(match cpu_clock_speed {
                CpuClock::_80MHz => 0,
                CpuClock::_160MHz => 1,
                CpuClock::_240MHz => 2,
                _ => panic!("Unsupported CPU clock speed"),
            })
        });

    rom::ets_update_cpu_frequency_rom(cpu_clock_speed.frequency().as_mhz());
}

/// Initialise the badge hardware and return the raw peripheral set.
///
/// Call this once at the top of `main`, then break the peripherals up with
/// [`split_resources!`](crate::split_resources).
#[must_use]
pub fn init() -> esp_hal::peripherals::Peripherals {
    set_cpu_clock(CpuClock::_160MHz);
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    esp_hal::init(config)
}

/// The SoC's true random number generator, for dealing pieces.
pub struct HwRng(Rng);

impl HwRng {
    #[must_use]
    pub fn new() -> Self {
        Self(Rng::new())
    }
}

impl Default for HwRng {
    fn default() -> Self {
        Self::new()
    }
}

impl RngCore for HwRng {
    fn next_u32(&mut self) -> u32 {
        self.0.random()
    }

    fn next_u64(&mut self) -> u64 {
        rand_core::impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
