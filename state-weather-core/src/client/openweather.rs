use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;

use crate::error::FetchError;

use super::WeatherSource;

/// OpenWeather "current weather" endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    /// Client without a request timeout.
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, FetchError> {
        self.http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::transport)?;
        Ok(self)
    }

    /// `<base>?q=<city>&appid=<key>`, with both values percent-encoded.
    pub fn request_url(&self, city: &str) -> Result<Url, FetchError> {
        Url::parse_with_params(&self.base_url, &[("q", city), ("appid", self.api_key.as_str())])
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {e}", self.base_url)))
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn fetch(&self, city: &str) -> Result<Value, FetchError> {
        let url = self.request_url(city)?;
        tracing::debug!(city, base_url = %self.base_url, "requesting current weather");

        let res = self.http.get(url).send().await.map_err(FetchError::transport)?;

        let status = res.status();
        let body = res.text().await.map_err(FetchError::transport)?;

        if !status.is_success() {
            tracing::warn!(city, %status, "weather request rejected");
            return Err(FetchError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(FetchError::Decode)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_url_encodes_spaces() {
        let client = OpenWeatherClient::new("secret".into());
        let url = client.request_url("Tamil Nadu").unwrap();

        assert_eq!(
            url.as_str(),
            "https://api.openweathermap.org/data/2.5/weather?q=Tamil+Nadu&appid=secret"
        );
    }

    #[test]
    fn request_url_encodes_reserved_characters() {
        let client = OpenWeatherClient::new("k&y".into());
        let url = client.request_url("Daman & Diu").unwrap();

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![("q".into(), "Daman & Diu".into()), ("appid".into(), "k&y".into())]
        );
    }

    #[test]
    fn request_url_rejects_bad_base() {
        let client = OpenWeatherClient::new("k".into()).with_base_url("not a url");
        assert!(matches!(client.request_url("Goa"), Err(FetchError::InvalidUrl(_))));
    }

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("city not found"), "city not found");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "°".repeat(150);
        let out = truncate_body(&body);

        assert!(out.ends_with("..."));
        assert!(out.len() <= 203);
    }
}
