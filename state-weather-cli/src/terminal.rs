use chrono::{DateTime, Local};
use std::io::Write;

use state_weather_core::{Presenter, WeatherRecord, display_rows};

/// Renders weather rows as aligned text.
pub struct TerminalPresenter<W: Write> {
    out: W,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_report(
        &mut self,
        city: &str,
        record: &WeatherRecord,
        fetched_at: DateTime<Local>,
    ) -> std::io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{city} (updated {})", fetched_at.format("%H:%M:%S"))?;
        for row in display_rows(record) {
            writeln!(self.out, "  {:<22}{}", row.label, row.value)?;
        }
        writeln!(self.out)?;
        self.out.flush()
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn fetching(&mut self, city: &str) {
        if let Err(e) = writeln!(self.out, "Fetching weather for {city}...") {
            tracing::warn!("failed to write to terminal: {e}");
        }
    }

    fn render(&mut self, city: &str, record: &WeatherRecord, fetched_at: DateTime<Local>) {
        if let Err(e) = self.write_report(city, record, fetched_at) {
            tracing::warn!("failed to write to terminal: {e}");
        }
    }

    fn show_error(&mut self, message: &str) {
        if let Err(e) = writeln!(self.out, "Error: {message}") {
            tracing::warn!("failed to write to terminal: {e}");
        }
    }
}
