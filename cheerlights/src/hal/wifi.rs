use crate::config::ConfigError;

pub trait Wifi {
    fn setup(&self, config: &WifiConfig) -> anyhow::Result<()>;

    fn is_connected(&self) -> bool;
}

/// Station credentials, stored as `{"uid": "...", "passw": "..."}`.
#[derive(Eq, PartialEq, Debug, Clone, serde::Deserialize)]
pub struct WifiConfig {
    #[serde(rename = "uid")]
    pub ssid: String,
    #[serde(rename = "passw")]
    pub password: String,
}

impl WifiConfig {
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let config: WifiConfig = serde_json::from_str(s)?;

        if config.ssid.is_empty() {
            return Err(ConfigError::Invalid("Wi-Fi SSID must be non-empty"));
        }

        Ok(config)
    }

    pub fn from_env_var() -> Result<Self, ConfigError> {
        Self::from_optional_json(option_env!("CHEERLIGHTS_WIFI_CREDENTIALS"))
    }

    fn from_optional_json(s: Option<&str>) -> Result<Self, ConfigError> {
        match s {
            Some(s) => WifiConfig::from_json(s),
            None => Err(ConfigError::MissingCredentials),
        }
    }
}
