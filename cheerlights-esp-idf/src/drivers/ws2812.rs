use cheerlights::hal::pixel::{PixelOutput, Rgb};
use smart_leds::{SmartLedsWrite, RGB8};
use ws2812_esp32_rmt_driver::Ws2812Esp32Rmt;

/// A WS2812 strip on one RMT channel. Every pixel shows the same colour.
pub struct Ws2812Strip {
    driver: Ws2812Esp32Rmt,
    pixels: usize,
    staged: RGB8,
}

impl Ws2812Strip {
    pub fn new(channel: u8, gpio: u32, pixels: usize) -> anyhow::Result<Self> {
        let driver = Ws2812Esp32Rmt::new(channel, gpio)?;
        log::info!("strip on gpio {gpio}, rmt channel {channel}, {pixels} pixels");
        Ok(Self {
            driver,
            pixels,
            staged: RGB8::default(),
        })
    }
}

impl PixelOutput for Ws2812Strip {
    fn fill(&mut self, color: Rgb) {
        self.staged = RGB8::new(color.r, color.g, color.b);
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        let pixels = std::iter::repeat(self.staged).take(self.pixels);
        self.driver.write(pixels)?;
        Ok(())
    }
}
