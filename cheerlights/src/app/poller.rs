use std::time::Duration;

use crate::app::palette;
use crate::hal::pixel::Rgb;
use crate::svc::{Feed, FeedError, Instant};

#[derive(Default, Copy, Clone, Eq, PartialEq, Debug)]
pub enum PollerState {
    #[default]
    Idle,
    Fetching,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum PollOutcome {
    /// The interval has not elapsed yet.
    Idle,
    /// The feed still reports the colour it reported last time.
    Repeated { name: String, count: u32 },
    /// The feed reports a new colour, strips should head for `color`.
    Changed { name: String, color: Rgb },
}

/// Decides when to ask the feed for the latest colour and whether the answer
/// is news.
#[derive(Debug)]
pub struct FeedPoller {
    interval: Duration,
    state: PollerState,
    last_fetch: Option<Instant>,
    last_color_name: Option<String>,
    repeat_count: u32,
}

impl FeedPoller {
    /// The first call to [`FeedPoller::maybe_fetch`] always fetches.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: PollerState::Idle,
            last_fetch: None,
            last_color_name: None,
            repeat_count: 0,
        }
    }

    pub fn state(&self) -> PollerState {
        self.state
    }

    pub fn last_color_name(&self) -> Option<&str> {
        self.last_color_name.as_deref()
    }

    pub fn repeat_count(&self) -> u32 {
        self.repeat_count
    }

    pub fn last_fetch(&self) -> Option<Instant> {
        self.last_fetch
    }

    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_fetch {
            None => true,
            Some(last) => now >= last.saturating_add(self.interval),
        }
    }

    /// Fetches if the interval has elapsed.
    ///
    /// A failed fetch still counts as an attempt: the next one happens an
    /// interval later, and the last colour and repeat count are untouched.
    pub fn maybe_fetch(&mut self, now: Instant, feed: &dyn Feed) -> Result<PollOutcome, FeedError> {
        if !self.is_due(now) {
            return Ok(PollOutcome::Idle);
        }

        self.state = PollerState::Fetching;
        let fetched = feed.fetch_latest_color_name();
        self.last_fetch = Some(now);
        self.state = PollerState::Idle;

        Ok(self.observe(fetched?))
    }

    /// Records a colour name reported by the feed.
    pub fn observe(&mut self, name: String) -> PollOutcome {
        if self.last_color_name.as_deref() == Some(name.as_str()) {
            self.repeat_count += 1;
            return PollOutcome::Repeated {
                name,
                count: self.repeat_count,
            };
        }

        let color = palette::get(&name).unwrap_or_else(|| {
            log::warn!(
                "unknown colour {name:?}, using {}",
                palette::DEFAULT_NAME
            );
            palette::DEFAULT
        });

        self.repeat_count = 1;
        self.last_color_name = Some(name.clone());

        PollOutcome::Changed { name, color }
    }
}
