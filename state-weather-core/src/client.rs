use async_trait::async_trait;
use serde_json::Value;
use std::{fmt::Debug, time::Duration};

use crate::{Config, error::FetchError};

pub mod openweather;

pub use openweather::{DEFAULT_BASE_URL, OpenWeatherClient};

/// Something that can turn a city name into a raw weather payload.
///
/// The payload is returned untouched; shape checks belong to
/// [`WeatherRecord::from_payload`](crate::WeatherRecord::from_payload).
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch(&self, city: &str) -> Result<Value, FetchError>;
}

/// Construct the OpenWeather client from config.
pub fn client_from_config(config: &Config) -> anyhow::Result<OpenWeatherClient> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
             Hint: run `state-weather configure` or pass `--api-key <KEY>`."
        )
    })?;

    let mut client = OpenWeatherClient::new(api_key.to_owned());

    if let Some(base_url) = config.base_url.as_deref() {
        client = client.with_base_url(base_url);
    }
    if let Some(secs) = config.timeout_secs {
        client = client.with_timeout(Duration::from_secs(secs))?;
    }

    Ok(client)
}
