//! ST7789 LCD (320×170 over SPI with DMA) as the game's screen.

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
};
use embedded_hal_bus::spi::ExclusiveDevice;
use esp_hal::{
    Async,
    dma::{
        DmaRxBuf,
        DmaTxBuf,
    },
    dma_buffers,
    gpio::{
        Level,
        Output,
        OutputConfig,
    },
    spi::master::Spi,
    time::Rate,
};

use super::{
    BacklightResources,
    DisplayResources,
};
use crate::{
    BOARD_HEIGHT,
    BOARD_WIDTH,
    console::Scoreboard,
    gamepad::BoardRenderer,
    view::{
        self,
        BoardView,
    },
};

const SCREEN_W: i32 = 320;
const SCREEN_H: i32 = 170;

/// Pixel pitch of one board cell; the 5×5 board fills most of the height.
const CELL_PX: u32 = 30;
const BOARD_PX_W: i32 = BOARD_WIDTH as i32 * CELL_PX as i32;
const BOARD_PX_H: i32 = BOARD_HEIGHT as i32 * CELL_PX as i32;
const BOARD_ORIGIN: Point = Point::new((SCREEN_W - BOARD_PX_W) / 2, (SCREEN_H - BOARD_PX_H) / 2);

const SCORE_ORIGIN: Point = Point::new(SCREEN_W / 2 - 10, SCREEN_H / 2 - 10);
const GAME_OVER_ORIGIN: Point = Point::new(SCREEN_W / 2 - 27, SCREEN_H / 2 - 17);

type SpiInterface<'a> = mipidsi::interface::SpiInterface<
    'a,
    ExclusiveDevice<esp_hal::spi::master::SpiDmaBus<'a, Async>, Output<'a>, esp_hal::delay::Delay>,
    Output<'a>,
>;

/// The badge's ST7789 display, drawable with `embedded-graphics`.
pub type Display<'a> = mipidsi::Display<SpiInterface<'a>, mipidsi::models::ST7789, Output<'a>>;

impl<'a> From<DisplayResources<'a>> for Display<'a> {
    fn from(res: DisplayResources<'a>) -> Self {
        let (rx_buffer, rx_descriptors, tx_buffer, tx_descriptors) = dma_buffers!(32000);
        let dma_rx_buf = DmaRxBuf::new(rx_descriptors, rx_buffer).unwrap();
        let dma_tx_buf = DmaTxBuf::new(tx_descriptors, tx_buffer).unwrap();

        let mut delay = esp_hal::delay::Delay::new();

        let dc = Output::new(res.dc, Level::Low, OutputConfig::default());
        let mut rst = Output::new(res.rst, Level::Low, OutputConfig::default());
        rst.set_high();

        let spi = Spi::new(
            res.spi,
            esp_hal::spi::master::Config::default().with_frequency(Rate::from_mhz(80)),
        )
        .unwrap()
        .with_sck(res.sck)
        .with_mosi(res.mosi)
        .with_miso(res.miso)
        .with_dma(res.dma)
        .with_buffers(dma_rx_buf, dma_tx_buf)
        .into_async();

        let cs = Output::new(res.cs, Level::High, OutputConfig::default());
        let spi_device = ExclusiveDevice::new(spi, cs, delay).unwrap();

        let buffer = crate::mk_static!([u8; 32000], [0_u8; 32000]);
        let di = mipidsi::interface::SpiInterface::new(spi_device, dc, buffer);

        mipidsi::Builder::new(mipidsi::models::ST7789, di)
            .reset_pin(rst)
            .display_size(170, 320)
            .invert_colors(mipidsi::options::ColorInversion::Inverted)
            .orientation(
                mipidsi::options::Orientation::new().rotate(mipidsi::options::Rotation::Deg90),
            )
            .display_offset(35, 0)
            .init(&mut delay)
            .unwrap()
    }
}

/// LCD plus backlight. Shows the score on the console and the board on the
/// gamepad.
pub struct Screen {
    display: Display<'static>,
    _backlight: Output<'static>,
}

type ScreenResources = (DisplayResources<'static>, BacklightResources<'static>);

impl From<ScreenResources> for Screen {
    fn from((display, backlight): ScreenResources) -> Self {
        let mut screen = Self {
            display: display.into(),
            _backlight: Output::new(backlight.led, Level::High, OutputConfig::default()),
        };
        screen.blank();
        screen
    }
}

impl Screen {
    fn blank(&mut self) {
        if self.display.clear(Rgb565::BLACK).is_err() {
            error!("display clear failed");
        }
    }
}

impl Scoreboard for Screen {
    fn show_score(&mut self, dropped: u32) {
        self.blank();
        if view::draw_score(&mut self.display, dropped, SCORE_ORIGIN).is_err() {
            error!("drawing the score failed");
        }
    }

    fn clear(&mut self) {
        self.blank();
    }

    fn show_game_over(&mut self, dropped: u32) {
        self.blank();
        if view::draw_game_over(&mut self.display, dropped, GAME_OVER_ORIGIN).is_err() {
            error!("drawing the game over notice failed");
        }
    }
}

impl BoardRenderer for Screen {
    fn render(&mut self, board: &BoardView) {
        // Every cell is repainted, so no blanking between frames.
        if view::draw_board(&mut self.display, board, BOARD_ORIGIN, CELL_PX).is_err() {
            error!("drawing the board failed");
        }
    }
}
