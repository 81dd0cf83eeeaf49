//! Fakes for the platform traits. Clones share state, so a test can keep a
//! handle after lending the original to the app.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use anyhow::bail;

use crate::hal::pixel::{PixelOutput, Rgb};
use crate::hal::wifi::{Wifi, WifiConfig};
use crate::hal::Platform;
use crate::svc::{Clock, Feed, FeedError, Instant};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum PixelCall {
    Fill(Rgb),
    Flush,
}

#[derive(Clone, Default)]
pub struct FakeOutput {
    calls: Rc<RefCell<Vec<PixelCall>>>,
    fail: bool,
}

impl FakeOutput {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<PixelCall> {
        self.calls.borrow().clone()
    }

    /// Colours that were filled and then flushed.
    pub fn written(&self) -> Vec<Rgb> {
        self.calls
            .borrow()
            .windows(2)
            .filter_map(|pair| match pair {
                [PixelCall::Fill(color), PixelCall::Flush] => Some(*color),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl PixelOutput for FakeOutput {
    fn fill(&mut self, color: Rgb) {
        self.calls.borrow_mut().push(PixelCall::Fill(color));
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        self.calls.borrow_mut().push(PixelCall::Flush);
        if self.fail {
            bail!("pixel output failure");
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct FakeClock {
    now: Rc<Cell<u64>>,
    delays: Rc<RefCell<Vec<Duration>>>,
}

impl FakeClock {
    pub fn advance(&self, duration: Duration) {
        self.now.set(self.now.get() + duration.as_millis() as u64);
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.delays.borrow().clone()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        Instant::from_millis(self.now.get())
    }

    fn delay(&self, duration: Duration) {
        self.delays.borrow_mut().push(duration);
        self.advance(duration);
    }
}

#[derive(Clone, Default)]
pub struct FakeFeed {
    responses: Rc<RefCell<VecDeque<Result<String, FeedError>>>>,
    fetch_count: Rc<Cell<usize>>,
}

impl FakeFeed {
    pub fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let feed = FakeFeed::default();
        for name in names {
            feed.push_name(name);
        }
        feed
    }

    pub fn push_name(&self, name: &str) {
        self.responses.borrow_mut().push_back(Ok(name.to_owned()));
    }

    pub fn push_error(&self, error: FeedError) {
        self.responses.borrow_mut().push_back(Err(error));
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_count.get()
    }
}

impl Feed for FakeFeed {
    fn fetch_latest_color_name(&self) -> Result<String, FeedError> {
        self.fetch_count.set(self.fetch_count.get() + 1);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(FeedError::Network("no response".to_owned())))
    }
}

#[derive(Default)]
pub struct FakeWifi {
    connected: Cell<bool>,
    fail_setup: bool,
    connect_after: Option<u32>,
    polls: Cell<u32>,
    setup_calls: Cell<u32>,
}

impl FakeWifi {
    pub fn connected() -> Self {
        Self {
            connected: Cell::new(true),
            ..Default::default()
        }
    }

    /// Link comes up after `polls` failed checks following setup.
    pub fn connecting_after(polls: u32) -> Self {
        Self {
            connect_after: Some(polls),
            ..Default::default()
        }
    }

    pub fn never_connecting() -> Self {
        Self::default()
    }

    pub fn failing_setup() -> Self {
        Self {
            fail_setup: true,
            ..Default::default()
        }
    }

    pub fn setup_calls(&self) -> u32 {
        self.setup_calls.get()
    }
}

impl Wifi for FakeWifi {
    fn setup(&self, _config: &WifiConfig) -> anyhow::Result<()> {
        self.setup_calls.set(self.setup_calls.get() + 1);
        if self.fail_setup {
            bail!("radio failure");
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        if self.connected.get() {
            return true;
        }
        if self.setup_calls.get() == 0 {
            return false;
        }
        if let Some(after) = self.connect_after {
            self.polls.set(self.polls.get() + 1);
            if self.polls.get() > after {
                self.connected.set(true);
            }
        }
        self.connected.get()
    }
}

pub struct FakePlatform {
    pub wifi: FakeWifi,
    pub feed: FakeFeed,
    pub clock: FakeClock,
    outputs: Vec<FakeOutput>,
    pending: Vec<FakeOutput>,
}

impl FakePlatform {
    pub fn new(outputs: Vec<FakeOutput>) -> Self {
        Self {
            wifi: FakeWifi::connected(),
            feed: FakeFeed::default(),
            clock: FakeClock::default(),
            pending: outputs.clone(),
            outputs,
        }
    }

    pub fn with_strips(count: usize) -> Self {
        Self::new((0..count).map(|_| FakeOutput::default()).collect())
    }

    pub fn outputs(&self) -> &[FakeOutput] {
        &self.outputs
    }
}

impl Platform for FakePlatform {
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
        std::mem::take(&mut self.pending)
            .into_iter()
            .map(|output| Box::new(output) as Box<dyn PixelOutput>)
            .collect()
    }

    fn random_seed(&self) -> u64 {
        42
    }
}
