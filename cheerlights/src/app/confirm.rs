use std::time::Duration;

use crate::app::palette;
use crate::app::strip::{off_all, write_all, Strip};
use crate::svc::Clock;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FlashPattern {
    pub pulses: u32,
    pub on: Duration,
    pub off: Duration,
}

impl Default for FlashPattern {
    fn default() -> Self {
        Self {
            pulses: 3,
            on: Duration::from_millis(300),
            off: Duration::from_millis(300),
        }
    }
}

/// Flashes every strip green on success, red otherwise. Strips end up off.
pub fn confirm(
    strips: &mut [Strip],
    success: bool,
    pattern: &FlashPattern,
    clock: &dyn Clock,
) -> anyhow::Result<()> {
    let color = if success { palette::GREEN } else { palette::RED };

    for _ in 0..pattern.pulses {
        write_all(strips, color)?;
        clock.delay(pattern.on);
        off_all(strips)?;
        clock.delay(pattern.off);
    }

    Ok(())
}
