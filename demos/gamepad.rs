//! Gamepad badge: shows the console's board and sends orders.
//!
//! Controls:
//! - Hold a D-pad direction and press A: move the piece that way
//! - A with the D-pad released: nothing happens (the console ignores it)
//! - B: drop the piece

#![no_std]
#![no_main]

use blocklink::{
    GameConfig,
    Gamepad,
    badge::{
        EspNowLink,
        Pad,
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
async fn gamepad_task(link: EspNowLink<'static>, screen: Screen, pad: Pad) {
    info!("Gamepad started, waiting for the console");
    let mut gamepad = Gamepad::new(link, screen, pad, Delay, GameConfig::default());
    if let Err(e) = gamepad.run().await {
        error!("Gamepad stopped: {}", e);
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
    let pad: Pad = resources.pad.into();

    spawner.must_spawn(gamepad_task(link, screen, pad));

    loop {
        Timer::after(Duration::from_secs(600)).await;
    }
}
