use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::app::confirm::{confirm, FlashPattern};
use crate::app::poller::{FeedPoller, PollOutcome};
use crate::app::strip::{broadcast_target, off_all, Strip};
use crate::config::Config;
use crate::hal::wifi::WifiConfig;
use crate::hal::Platform;
use crate::svc::ensure_connected;

pub mod confirm;
pub mod palette;
pub mod poller;
pub mod strip;

pub struct App<'a> {
    platform: &'a dyn Platform,
    strips: Vec<Strip>,
    poller: FeedPoller,
    flash_pattern: FlashPattern,
    wifi_timeout: Duration,
}

impl<'a> App<'a> {
    pub fn new(platform: &'a mut dyn Platform, config: &Config) -> Self {
        let outputs = platform.take_pixel_outputs();
        let platform: &'a dyn Platform = platform;

        if outputs.len() != config.pixel_outputs.len() {
            log::warn!(
                "{} pixel outputs configured, platform provides {}",
                config.pixel_outputs.len(),
                outputs.len()
            );
        }

        let now = platform.clock().now();
        let timing = config.transition_timing();
        let mut seeds = SmallRng::seed_from_u64(platform.random_seed());

        let strips = outputs
            .into_iter()
            .enumerate()
            .map(|(id, output)| {
                let rng = SmallRng::seed_from_u64(seeds.gen());
                Strip::new(id, output, timing, rng, now)
            })
            .collect();

        Self {
            platform,
            strips,
            poller: FeedPoller::new(config.poll_interval()),
            flash_pattern: config.flash_pattern(),
            wifi_timeout: config.wifi_timeout(),
        }
    }

    pub fn strips(&self) -> &[Strip] {
        &self.strips
    }

    pub fn poller(&self) -> &FeedPoller {
        &self.poller
    }

    /// Switches everything off, connects, and flashes the outcome.
    ///
    /// Without credentials the app stays offline and flashes red.
    pub fn start(&mut self, credentials: Option<&WifiConfig>) -> anyhow::Result<bool> {
        off_all(&mut self.strips)?;

        let connected = match credentials {
            Some(credentials) => ensure_connected(
                self.platform.wifi(),
                credentials,
                self.platform.clock(),
                self.wifi_timeout,
            ),
            None => {
                log::error!("no Wi-Fi credentials, staying offline");
                false
            }
        };

        confirm(
            &mut self.strips,
            connected,
            &self.flash_pattern,
            self.platform.clock(),
        )?;

        Ok(connected)
    }

    /// One tick: maybe fetch a new target, then move every strip a step.
    ///
    /// Feed errors are logged and retried an interval later. Output errors
    /// are returned.
    pub fn update(&mut self) -> anyhow::Result<()> {
        let now = self.platform.clock().now();

        match self.poller.maybe_fetch(now, self.platform.feed()) {
            Ok(PollOutcome::Idle) => {}
            Ok(PollOutcome::Repeated { name, count }) => {
                log::info!("{count} : {name}");
            }
            Ok(PollOutcome::Changed { name, color }) => {
                log::info!("1 : {name}");
                log::debug!("new target {color}");
                broadcast_target(&mut self.strips, color, now);
            }
            Err(e) => {
                log::warn!("skipping colour update: {e}");
            }
        }

        for strip in self.strips.iter_mut() {
            strip.advance(now)?;
        }

        Ok(())
    }

    /// Best effort, for when the loop dies.
    pub fn halt(&mut self) {
        log::info!("switching all strips off");

        for strip in self.strips.iter_mut() {
            if let Err(e) = strip.off() {
                log::error!("{e:#}");
            }
        }
    }
}
