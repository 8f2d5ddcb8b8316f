use chrono::{DateTime, Local};

use crate::WeatherRecord;

/// Front-end side of the fetch-and-display flow.
pub trait Presenter {
    /// A request for `city` has been started.
    fn fetching(&mut self, _city: &str) {}

    fn render(&mut self, city: &str, record: &WeatherRecord, fetched_at: DateTime<Local>);

    fn show_error(&mut self, message: &str);
}

/// One label/value pair as shown on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub label: &'static str,
    pub value: String,
}

pub fn display_rows(record: &WeatherRecord) -> [DisplayRow; 5] {
    [
        DisplayRow { label: "Weather Climate", value: record.climate().to_string() },
        DisplayRow { label: "Weather Description", value: record.description().to_string() },
        DisplayRow { label: "Temperature", value: format_temperature(record.temperature_c()) },
        DisplayRow { label: "Pressure", value: format_pressure(record.pressure_hpa()) },
        DisplayRow { label: "Humidity", value: format_humidity(record.humidity_pct()) },
    ]
}

pub fn format_temperature(celsius: f64) -> String {
    format!("{celsius:.1}\u{00b0}C")
}

pub fn format_pressure(hpa: u32) -> String {
    format!("{hpa} hPa")
}

pub fn format_humidity(pct: u8) -> String {
    format!("{pct}%")
}
