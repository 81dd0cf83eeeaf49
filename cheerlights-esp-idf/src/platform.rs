use anyhow::anyhow;
use cheerlights::config::Config;
use cheerlights::hal::pixel::PixelOutput;
use cheerlights::hal::wifi::Wifi;
use cheerlights::hal::Platform;
use cheerlights::svc::{Clock, Feed, StdClock};
use esp_idf_hal::peripherals::Peripherals;

use crate::drivers::feed::HttpFeed;
use crate::drivers::wifi::EspWifi;
use crate::drivers::ws2812::Ws2812Strip;

// RMT channels on the ESP32.
const MAX_STRIPS: usize = 8;

pub struct PlatformImpl {
    wifi: EspWifi,
    feed: HttpFeed,
    clock: StdClock,
    pixel_outputs: Vec<Box<dyn PixelOutput>>,
}

impl PlatformImpl {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let peripherals = Peripherals::take().ok_or_else(|| anyhow!("Peripherals already taken"))?;

        if config.pixel_outputs.len() > MAX_STRIPS {
            return Err(anyhow!("At most {MAX_STRIPS} strips are supported"));
        }

        let wifi = EspWifi::new(peripherals.modem)?;
        let feed = HttpFeed::new(&config.feed_url, &config.feed_field);

        let pixel_outputs = config
            .pixel_outputs
            .iter()
            .enumerate()
            .map(|(channel, &gpio)| {
                let strip = Ws2812Strip::new(channel as u8, gpio, config.pixels_per_strip)?;
                Ok(Box::new(strip) as Box<dyn PixelOutput>)
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Self {
            wifi,
            feed,
            clock: StdClock::default(),
            pixel_outputs,
        })
    }
}

impl Platform for PlatformImpl {
    fn wifi(&self) -> &(dyn Wifi + '_) {
        &self.wifi
    }

    fn feed(&self) -> &(dyn Feed + '_) {
        &self.feed
    }

    fn clock(&self) -> &(dyn Clock + '_) {
        &self.clock
    }

    fn take_pixel_outputs(&mut self) -> Vec<Box<dyn PixelOutput>> {
        std::mem::take(&mut self.pixel_outputs)
    }

    fn random_seed(&self) -> u64 {
        // Hardware RNG, seeded by RF noise once Wi-Fi is up.
        let (hi, lo) = unsafe { (esp_idf_sys::esp_random(), esp_idf_sys::esp_random()) };
        (u64::from(hi) << 32) | u64::from(lo)
    }
}
