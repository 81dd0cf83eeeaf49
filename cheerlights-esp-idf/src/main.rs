use std::time::{Duration, Instant};

use cheerlights::app::App;
use cheerlights::config::Config;
use cheerlights::hal::wifi::WifiConfig;
use esp_idf_sys as _;

use cheerlights_esp_idf::platform::PlatformImpl;

const TASK_WAKEUP_PERIOD: Duration = Duration::from_millis(10);

fn main() -> anyhow::Result<()> {
    esp_idf_sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    let config = Config::from_json(include_str!("../cheerlights.json"))?;

    let credentials = match WifiConfig::from_env_var() {
        Ok(credentials) => Some(credentials),
        Err(e) => {
            log::error!("{e}");
            None
        }
    };

    log::info!("Create platform");
    let mut p = PlatformImpl::new(&config)?;

    log::info!("Create app");
    let mut app = App::new(&mut p, &config);

    if let Err(e) = run(&mut app, credentials.as_ref()) {
        log::error!("{e:#}");
        app.halt();
        return Err(e);
    }

    Ok(())
}

fn run(app: &mut App, credentials: Option<&WifiConfig>) -> anyhow::Result<()> {
    app.start(credentials)?;

    log::info!("Start loop");

    loop {
        let next_wakeup = Instant::now() + TASK_WAKEUP_PERIOD;

        {
            let start = Instant::now();
            app.update()?;

            log::trace!("app update took {}ms", (Instant::now() - start).as_millis());
        }

        if let Some(delay) = next_wakeup.checked_duration_since(Instant::now()) {
            std::thread::sleep(delay);
        } else {
            // Expected on fetch ticks, the request blocks.
            log::debug!("no delay");
        }
    }
}
