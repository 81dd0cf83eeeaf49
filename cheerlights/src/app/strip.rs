use std::time::Duration;

use anyhow::Context;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::hal::pixel::{PixelOutput, Rgb};
use crate::svc::Instant;

/// How fast a strip fades, and how much each strip wanders off from the
/// others.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TransitionTiming {
    /// Minimum hold after every fade step.
    pub base_delay: Duration,
    /// Upper bound of the random extra hold after every fade step.
    pub jitter_bound: Duration,
    /// Upper bound of the random hold before a strip starts moving toward a
    /// new target.
    pub target_hold: Duration,
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_millis(25),
            jitter_bound: Duration::from_millis(25),
            target_hold: Duration::from_millis(4095),
        }
    }
}

pub struct Strip {
    id: usize,
    output: Box<dyn PixelOutput>,
    current: Rgb,
    target: Rgb,
    next_transition: Instant,
    timing: TransitionTiming,
    rng: SmallRng,
}

impl Strip {
    /// The strip starts off, and in sync. Nothing is written to the output.
    pub fn new(
        id: usize,
        output: Box<dyn PixelOutput>,
        timing: TransitionTiming,
        rng: SmallRng,
        now: Instant,
    ) -> Self {
        Self {
            id,
            output,
            current: Rgb::OFF,
            target: Rgb::OFF,
            next_transition: now,
            timing,
            rng,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn current(&self) -> Rgb {
        self.current
    }

    pub fn target(&self) -> Rgb {
        self.target
    }

    pub fn next_transition(&self) -> Instant {
        self.next_transition
    }

    pub fn is_in_sync(&self) -> bool {
        self.current == self.target
    }

    pub fn set_target(&mut self, color: Rgb, now: Instant) {
        self.target = color;
        self.next_transition = now.saturating_add(self.random_delay(self.timing.target_hold));
        log::trace!(
            "strip {} holds until {}ms",
            self.id,
            self.next_transition.to_millis()
        );
    }

    pub fn write(&mut self, color: Rgb) -> anyhow::Result<()> {
        self.output.fill(color);
        self.output
            .flush()
            .with_context(|| format!("cannot write strip {}", self.id))?;
        self.current = color;
        Ok(())
    }

    pub fn off(&mut self) -> anyhow::Result<()> {
        self.write(Rgb::OFF)
    }

    /// One fade step. Returns whether anything was written.
    pub fn advance(&mut self, now: Instant) -> anyhow::Result<bool> {
        if self.is_in_sync() || now < self.next_transition {
            return Ok(false);
        }

        self.write(self.current.step_toward(self.target))?;

        let delay = self.timing.base_delay + self.random_delay(self.timing.jitter_bound);
        self.next_transition = now.saturating_add(delay);

        if self.is_in_sync() {
            log::debug!("strip {} reached {}", self.id, self.target);
        }

        Ok(true)
    }

    fn random_delay(&mut self, bound: Duration) -> Duration {
        let bound = u64::try_from(bound.as_millis()).unwrap_or(u64::MAX);
        Duration::from_millis(self.rng.gen_range(0..=bound))
    }
}

pub fn write_all(strips: &mut [Strip], color: Rgb) -> anyhow::Result<()> {
    for strip in strips.iter_mut() {
        strip.write(color)?;
    }
    Ok(())
}

pub fn off_all(strips: &mut [Strip]) -> anyhow::Result<()> {
    write_all(strips, Rgb::OFF)
}

/// Same target for everyone. Each strip still picks its own hold.
pub fn broadcast_target(strips: &mut [Strip], color: Rgb, now: Instant) {
    for strip in strips.iter_mut() {
        strip.set_target(color, now);
    }
}
