//! Core library for the `state-weather` viewer.
//!
//! This crate defines:
//! - The fixed list of selectable regions
//! - The OpenWeather client and the `WeatherSource` seam
//! - `WeatherRecord`, the five fields shown to the user
//! - The fetch-and-display flow and the application context that runs it
//!   off the UI thread
//! - Configuration & credentials handling
//!
//! It is used by `state-weather-cli`, but can also back other front ends.

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod flow;
pub mod model;
pub mod presenter;
pub mod regions;

pub use app::{FetchCompleted, WeatherApp};
pub use client::{OpenWeatherClient, WeatherSource, client_from_config};
pub use config::Config;
pub use error::{FetchError, FlowError, ParseError, ValidationError};
pub use flow::fetch_record;
pub use model::WeatherRecord;
pub use presenter::{DisplayRow, Presenter, display_rows};
