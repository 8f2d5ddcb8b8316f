use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ParseError;

/// Offset between Kelvin and Celsius.
pub const KELVIN_OFFSET: f64 = 273.15;

/// Current conditions for one region, distilled from a raw payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherRecord {
    climate: String,
    description: String,
    temperature_c: f64,
    pressure_hpa: u32,
    humidity_pct: u8,
}

impl WeatherRecord {
    /// Build a record from the JSON returned by the weather service.
    ///
    /// Only `weather[0].main`, `weather[0].description`, `main.temp`,
    /// `main.pressure` and `main.humidity` are read; everything else is ignored.
    pub fn from_payload(raw: &Value) -> Result<Self, ParseError> {
        let payload = OwPayload::deserialize(raw)?;

        let weather = payload.weather.into_iter().next().ok_or(ParseError::EmptyWeather)?;

        if weather.main.trim().is_empty() {
            return Err(invalid("weather[0].main", "must not be empty"));
        }
        if weather.description.trim().is_empty() {
            return Err(invalid("weather[0].description", "must not be empty"));
        }
        if !payload.main.temp.is_finite() {
            return Err(invalid("main.temp", "must be a finite number"));
        }
        if payload.main.pressure == 0 {
            return Err(invalid("main.pressure", "must be greater than zero"));
        }
        if payload.main.humidity > 100 {
            return Err(invalid("main.humidity", "must be between 0 and 100"));
        }

        let temperature_c = kelvin_to_celsius(payload.main.temp);
        if !temperature_c.is_finite() {
            return Err(invalid("main.temp", "must be a finite number"));
        }

        Ok(Self {
            climate: weather.main,
            description: weather.description,
            temperature_c,
            pressure_hpa: payload.main.pressure,
            humidity_pct: payload.main.humidity,
        })
    }

    /// Parse a response body and build a record from it.
    pub fn from_json_str(body: &str) -> Result<Self, ParseError> {
        let raw: Value = serde_json::from_str(body)?;
        Self::from_payload(&raw)
    }

    pub fn climate(&self) -> &str {
        &self.climate
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Temperature in degrees Celsius, rounded to one decimal.
    pub fn temperature_c(&self) -> f64 {
        self.temperature_c
    }

    pub fn pressure_hpa(&self) -> u32 {
        self.pressure_hpa
    }

    pub fn humidity_pct(&self) -> u8 {
        self.humidity_pct
    }
}

/// Convert Kelvin to Celsius and round the f64 difference to one decimal
/// with `f64::round`.
///
/// 273.15 is stored slightly below its decimal value, so a difference that is
/// `.x5` in decimal lands just above it: positive results round up
/// (300.0 K gives 26.9) and negative ones round toward zero (270.0 K gives -3.1).
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    round_to_tenth(kelvin - KELVIN_OFFSET)
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn invalid(field: &'static str, reason: &'static str) -> ParseError {
    ParseError::InvalidField { field, reason }
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    pressure: u32,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwPayload {
    weather: Vec<OwWeather>,
    main: OwMain,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(temp: f64) -> Value {
        json!({
            "weather": [{ "main": "Clouds", "description": "overcast clouds" }],
            "main": { "temp": temp, "pressure": 1012, "humidity": 77 }
        })
    }

    #[test]
    fn builds_record_from_payload() {
        let record = WeatherRecord::from_payload(&payload(298.15)).unwrap();

        assert_eq!(record.climate(), "Clouds");
        assert_eq!(record.description(), "overcast clouds");
        assert_eq!(record.temperature_c(), 25.0);
        assert_eq!(record.pressure_hpa(), 1012);
        assert_eq!(record.humidity_pct(), 77);
    }

    #[test]
    fn freezing_point_is_zero() {
        assert_eq!(kelvin_to_celsius(273.15), 0.0);
    }

    #[test]
    fn positive_halves_round_up() {
        // 300.0 K is 26.85 C
        assert_eq!(kelvin_to_celsius(300.0), 26.9);
        // 273.2 K is 0.05 C
        assert_eq!(kelvin_to_celsius(273.2), 0.1);
    }

    #[test]
    fn rounds_below_zero() {
        assert_eq!(kelvin_to_celsius(263.15), -10.0);
        // 273.15 is stored slightly low, so 270.0 K lands just above -3.15 C
        assert_eq!(kelvin_to_celsius(270.0), -3.1);
    }

    #[test]
    fn first_weather_entry_wins() {
        let raw = json!({
            "weather": [
                { "main": "Rain", "description": "light rain" },
                { "main": "Mist", "description": "mist" }
            ],
            "main": { "temp": 290.0, "pressure": 1000, "humidity": 90 }
        });

        let record = WeatherRecord::from_payload(&raw).unwrap();
        assert_eq!(record.climate(), "Rain");
        assert_eq!(record.description(), "light rain");
    }

    #[test]
    fn ignores_unknown_keys() {
        let raw = json!({
            "coord": { "lon": 78.0, "lat": 11.0 },
            "weather": [{ "id": 804, "main": "Clouds", "description": "overcast clouds", "icon": "04d" }],
            "main": { "temp": 298.15, "feels_like": 299.0, "pressure": 1012, "humidity": 77 },
            "name": "Tamil Nadu"
        });

        assert!(WeatherRecord::from_payload(&raw).is_ok());
    }

    #[test]
    fn missing_weather_is_shape_error() {
        let raw = json!({ "main": { "temp": 298.15, "pressure": 1012, "humidity": 77 } });

        let err = WeatherRecord::from_payload(&raw).unwrap_err();
        assert!(matches!(err, ParseError::Shape(_)));
        assert!(err.to_string().contains("weather"));
    }

    #[test]
    fn empty_weather_is_rejected() {
        let raw = json!({
            "weather": [],
            "main": { "temp": 298.15, "pressure": 1012, "humidity": 77 }
        });

        let err = WeatherRecord::from_payload(&raw).unwrap_err();
        assert!(matches!(err, ParseError::EmptyWeather));
    }

    #[test]
    fn missing_main_key_is_shape_error() {
        let raw = json!({
            "weather": [{ "main": "Clear", "description": "clear sky" }],
            "main": { "temp": 298.15, "humidity": 77 }
        });

        let err = WeatherRecord::from_payload(&raw).unwrap_err();
        assert!(matches!(err, ParseError::Shape(_)));
        assert!(err.to_string().contains("pressure"));
    }

    #[test]
    fn non_numeric_temperature_is_shape_error() {
        let raw = json!({
            "weather": [{ "main": "Clear", "description": "clear sky" }],
            "main": { "temp": "hot", "pressure": 1012, "humidity": 77 }
        });

        assert!(matches!(WeatherRecord::from_payload(&raw), Err(ParseError::Shape(_))));
    }

    #[test]
    fn non_object_payload_is_shape_error() {
        assert!(matches!(WeatherRecord::from_payload(&json!([1, 2, 3])), Err(ParseError::Shape(_))));
        assert!(matches!(WeatherRecord::from_payload(&Value::Null), Err(ParseError::Shape(_))));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let humid = json!({
            "weather": [{ "main": "Clear", "description": "clear sky" }],
            "main": { "temp": 298.15, "pressure": 1012, "humidity": 101 }
        });
        let flat = json!({
            "weather": [{ "main": "Clear", "description": "clear sky" }],
            "main": { "temp": 298.15, "pressure": 0, "humidity": 50 }
        });
        let blank = json!({
            "weather": [{ "main": "", "description": "clear sky" }],
            "main": { "temp": 298.15, "pressure": 1012, "humidity": 50 }
        });

        assert!(matches!(
            WeatherRecord::from_payload(&humid),
            Err(ParseError::InvalidField { field: "main.humidity", .. })
        ));
        assert!(matches!(
            WeatherRecord::from_payload(&flat),
            Err(ParseError::InvalidField { field: "main.pressure", .. })
        ));
        assert!(matches!(
            WeatherRecord::from_payload(&blank),
            Err(ParseError::InvalidField { field: "weather[0].main", .. })
        ));
    }

    #[test]
    fn from_json_str_rejects_garbage() {
        assert!(matches!(WeatherRecord::from_json_str("not json"), Err(ParseError::Shape(_))));

        let record = WeatherRecord::from_json_str(&payload(300.0).to_string()).unwrap();
        assert_eq!(record.temperature_c(), 26.9);
    }
}
