//! Console badge: runs the game and shows the score.
//!
//! Pair it with a badge running the `gamepad` program; both must use the same
//! radio group.

#![no_std]
#![no_main]

use blocklink::{
    Console,
    GameConfig,
    badge::{
        EspNowLink,
        HwRng,
        Screen,
    },
    mk_static,
    split_resources,
};
use defmt::{
    error,
    info,
};
use embassy_executor::Spawner;
use embassy_time::{
    Delay,
    Duration,
    Timer,
};
use esp_backtrace as _;
use esp_hal::timer::timg::TimerGroup;
use esp_println as _;

extern crate alloc;

esp_bootloader_esp_idf::esp_app_desc!();

#[embassy_executor::task]
async fn console_task(link: EspNowLink<'static>, screen: Screen) {
    info!("Console started");
    let mut console = Console::new(link, screen, Delay, HwRng::new(), GameConfig::default());
    match console.run().await {
        Ok(dropped) => info!("Game over after {} drops", dropped),
        Err(e) => error!("Console stopped: {}", e),
    }
}

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    let peripherals = blocklink::badge::init();
    let resources = split_resources!(peripherals);

    esp_alloc::heap_allocator!(size: 64 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let radio = mk_static!(esp_radio::Controller<'static>, esp_radio::init().unwrap());
    let (mut wifi, interfaces) =
        esp_radio::wifi::new(radio, resources.radio.wifi, Default::default()).unwrap();
    wifi.set_mode(esp_radio::wifi::WifiMode::Sta).unwrap();
    wifi.start().unwrap();

    let link = EspNowLink::new(interfaces.esp_now, GameConfig::default().group_id).unwrap();
    let screen: Screen = (resources.display, resources.backlight).into();

    spawner.must_spawn(console_task(link, screen));

    loop {
        Timer::after(Duration::from_secs(600)).await;
    }
}
