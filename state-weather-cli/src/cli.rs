use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Select};
use std::{io, process::ExitCode, sync::Arc, time::Duration};
use tokio::runtime::Runtime;

use state_weather_core::{
    Config, FlowError, OpenWeatherClient, Presenter, WeatherApp, WeatherRecord, client_from_config,
    fetch_record, regions,
};

use crate::terminal::TerminalPresenter;

/// How often the selector loop checks for a finished request.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "state-weather",
    version,
    about = "Current weather for Indian states and union territories"
)]
pub struct Cli {
    /// OpenWeather API key; overrides the configured key for this run.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Alternative current-weather endpoint.
    #[arg(long, global = true, hide = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// List the selectable regions.
    Regions,

    /// Show weather for a single region and exit.
    Show {
        /// Region name, e.g. "Tamil Nadu".
        region: String,
    },

    /// Pick regions from a list until Esc is pressed (default).
    Interactive,
}

impl Cli {
    pub fn run(self, runtime: &Runtime) -> anyhow::Result<ExitCode> {
        match self.command {
            Some(Command::Configure) => configure().map(|()| ExitCode::SUCCESS),
            Some(Command::Regions) => {
                for region in regions::all() {
                    println!("{region}");
                }
                Ok(ExitCode::SUCCESS)
            }
            Some(Command::Show { ref region }) => {
                let client = self.client()?;
                show(runtime, &client, region)
            }
            Some(Command::Interactive) | None => {
                let client = self.client()?;
                interactive(runtime, client).map(|()| ExitCode::SUCCESS)
            }
        }
    }

    /// Client from the stored config, with command-line overrides applied.
    fn client(&self) -> anyhow::Result<OpenWeatherClient> {
        let mut config = Config::load()?;

        if let Some(key) = &self.api_key {
            config.set_api_key(key.clone());
        }
        if let Some(url) = &self.base_url {
            config.base_url = Some(url.clone());
        }

        client_from_config(&config)
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_help_message("Get one at https://home.openweathermap.org/api_keys")
        .prompt()
        .context("API key prompt aborted")?;

    config.set_api_key(key);
    if !config.is_configured() {
        anyhow::bail!("API key must not be empty");
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

fn show(runtime: &Runtime, client: &OpenWeatherClient, region: &str) -> anyhow::Result<ExitCode> {
    let city = match regions::find(region) {
        Some(canonical) => canonical,
        None => {
            tracing::warn!(region, "not in the region list; querying as typed");
            region.trim()
        }
    };

    let result = runtime.block_on(fetch_record(client, city));

    let mut presenter = TerminalPresenter::new(io::stdout());
    if present(&mut presenter, city, result) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Hand a one-shot result to the presenter. Returns `false` if an error was shown.
fn present<P: Presenter>(
    presenter: &mut P,
    city: &str,
    result: Result<WeatherRecord, FlowError>,
) -> bool {
    match result {
        Ok(record) => {
            presenter.render(city, &record, Local::now());
            true
        }
        Err(err) => {
            presenter.show_error(&err.user_message());
            false
        }
    }
}

fn interactive(runtime: &Runtime, client: OpenWeatherClient) -> anyhow::Result<()> {
    let choices = regions::all();
    let presenter = TerminalPresenter::new(io::stdout());
    let mut app = WeatherApp::new(Arc::new(client), presenter, runtime.handle().clone());
    let mut cursor = 0;

    loop {
        let selection = Select::new("Select a state:", choices.to_vec())
            .with_starting_cursor(cursor)
            .with_page_size(12)
            .with_help_message("↑↓ to move, enter to fetch, esc to quit")
            .prompt();

        let city = match selection {
            Ok(city) => city,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => {
                app.dispose();
                return Err(e).context("Region selector failed");
            }
        };

        cursor = choices.iter().position(|c| *c == city).unwrap_or(0);

        app.submit(city);
        while app.is_busy() {
            app.wait(POLL_INTERVAL);
        }
    }

    app.dispose();
    Ok(())
}
