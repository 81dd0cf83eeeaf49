use std::time::Duration;

use crate::hal::wifi::{Wifi, WifiConfig};
use crate::svc::Clock;

const POLL_PERIOD: Duration = Duration::from_millis(100);

/// Associates with the configured network and waits for the link.
///
/// Fails closed: a setup error or a timeout yields `false`.
pub fn ensure_connected(
    wifi: &dyn Wifi,
    config: &WifiConfig,
    clock: &dyn Clock,
    timeout: Duration,
) -> bool {
    if wifi.is_connected() {
        return true;
    }

    log::info!("connecting to network: {}", config.ssid);

    if let Err(e) = wifi.setup(config) {
        log::error!("Wi-Fi setup failed: {e:#}");
        return false;
    }

    let start = clock.now();
    let mut last_reported = None;
    log::info!("timeout in {} seconds", timeout.as_secs());

    while !wifi.is_connected() {
        let elapsed = clock.now().saturating_duration_since(start);
        if elapsed >= timeout {
            log::warn!("couldn't connect, timed out");
            return false;
        }

        let remaining = (timeout - elapsed).as_secs();
        if last_reported != Some(remaining) {
            log::debug!("timeout in {remaining} seconds");
            last_reported = Some(remaining);
        }

        clock.delay(POLL_PERIOD);
    }

    log::info!("connected");
    true
}
