//! Client library for the OpenWeatherMap current weather API.
//!
//! This crate defines:
//! - A blocking HTTP client with three lookups (city name, ZIP code, coordinates)
//! - The `WeatherReport` data model decoded from the service's JSON
//! - Decoding of the Unix-epoch timestamps the service embeds as bare integers
//!
//! It holds no global state; construct as many clients as needed.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod timestamp;

pub use client::{OwmClient, WeatherLookup};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use error::{DecodeError, OwmError, RequestBuildError, TransportError};
pub use model::{
    Atmosphere, Clouds, Condition, Coordinates, Precipitation, Region, Temperature, WeatherReport,
    Wind,
};
pub use timestamp::UnixTime;
