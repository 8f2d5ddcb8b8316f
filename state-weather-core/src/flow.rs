//! The fetch-and-display flow: selection → fetch → record.

use crate::{
    WeatherRecord,
    client::WeatherSource,
    error::{FlowError, ValidationError},
};

/// Run one fetch for `city` and distill the payload.
///
/// An empty (or all-whitespace) selection fails before the source is called.
pub async fn fetch_record(
    source: &dyn WeatherSource,
    city: &str,
) -> Result<WeatherRecord, FlowError> {
    let city = city.trim();
    if city.is_empty() {
        return Err(ValidationError::NoCitySelected.into());
    }

    let raw = source.fetch(city).await.inspect_err(|e| {
        tracing::warn!(city, error = %e, "weather fetch failed");
    })?;

    let record = WeatherRecord::from_payload(&raw).inspect_err(|e| {
        tracing::warn!(city, error = %e, "weather payload rejected");
    })?;

    tracing::info!(
        city,
        climate = record.climate(),
        temperature_c = record.temperature_c(),
        "weather fetched"
    );

    Ok(record)
}
