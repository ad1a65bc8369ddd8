use log::debug;
use reqwest::{
    Method,
    blocking::{Client, Request},
    header::{ACCEPT, USER_AGENT},
};
use serde::{Serialize, de::DeserializeOwned};
use std::{fmt::Debug, io::BufReader, io::Read, time::Duration};
use url::Url;

use crate::{
    config::ClientConfig,
    error::{OwmError, RequestBuildError, TransportError},
    model::{Coordinates, WeatherReport},
};

const WEATHER_PATH: &str = "/weather";

/// Current-weather lookups supported by the client.
pub trait WeatherLookup: Send + Sync + Debug {
    fn by_city_name(&self, city: &str) -> Result<WeatherReport, OwmError>;
    fn by_zip_code(&self, zip: &str) -> Result<WeatherReport, OwmError>;
    fn by_coordinates(&self, coordinates: Coordinates) -> Result<WeatherReport, OwmError>;
}

/// Blocking OpenWeatherMap client.
///
/// Holds only configuration, so one instance can serve lookups from several
/// threads at once.
#[derive(Debug, Clone)]
pub struct OwmClient {
    api_key: String,
    base_url: String,
    user_agent: String,
    timeout: Duration,
    http: Client,
}

impl OwmClient {
    /// Client with the default endpoint, user agent and 60 second timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_config(&ClientConfig::new(api_key))
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            user_agent: config.user_agent.clone(),
            timeout: config.timeout(),
            http: Client::new(),
        }
    }

    /// Point the client at another endpoint, e.g. a local test server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// An empty user agent omits the header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build an unsent request for `path` relative to the base URL.
    ///
    /// A body is sent as JSON; without one the request carries no body.
    pub fn request<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Request, OwmError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path)?;

        let mut builder = self
            .http
            .request(method, url)
            .timeout(self.timeout)
            .header(ACCEPT, "application/json");

        if !self.user_agent.is_empty() {
            builder = builder.header(USER_AGENT, self.user_agent.as_str());
        }

        if let Some(body) = body {
            builder = builder.json(body);
        }

        let request = builder.build().map_err(RequestBuildError::Request)?;
        Ok(request)
    }

    /// Send `request` and decode the response body into `T`.
    ///
    /// The status code is not inspected: an error payload is decoded like any
    /// other body. A request without its own timeout gets the client's.
    pub fn execute<T>(&self, mut request: Request) -> Result<T, OwmError>
    where
        T: DeserializeOwned,
    {
        if request.timeout().is_none() {
            *request.timeout_mut() = Some(self.timeout);
        }

        debug!("Sending {} {} to OpenWeatherMap", request.method(), request.url().path());

        let response = self.http.execute(request).map_err(TransportError::Send)?;

        debug!("OpenWeatherMap responded with {}", response.status());

        decode_body(response)
    }

    /// http://openweathermap.org/current#name
    pub fn by_city_name(&self, city: &str) -> Result<WeatherReport, OwmError> {
        self.current_weather(&[("q", city)])
    }

    /// http://openweathermap.org/current#zip
    pub fn by_zip_code(&self, zip: &str) -> Result<WeatherReport, OwmError> {
        self.current_weather(&[("zip", zip)])
    }

    /// http://openweathermap.org/current#geo
    pub fn by_coordinates(&self, coordinates: Coordinates) -> Result<WeatherReport, OwmError> {
        let lat = format!("{:.6}", coordinates.latitude);
        let lon = format!("{:.6}", coordinates.longitude);

        self.current_weather(&[("lat", lat.as_str()), ("lon", lon.as_str())])
    }

    fn current_weather(&self, params: &[(&str, &str)]) -> Result<WeatherReport, OwmError> {
        let request = self.weather_request(params)?;
        self.execute(request)
    }

    fn weather_request(&self, params: &[(&str, &str)]) -> Result<Request, OwmError> {
        let mut request = self.request::<()>(Method::GET, WEATHER_PATH, None)?;

        request
            .url_mut()
            .query_pairs_mut()
            .extend_pairs(params)
            .append_pair("APPID", &self.api_key);

        Ok(request)
    }

    /// Appends the segments of `path` to the base URL, keeping its own path
    /// prefix (`.../data/2.5` + `/weather`).
    fn endpoint(&self, path: &str) -> Result<Url, RequestBuildError> {
        let mut url = Url::parse(&self.base_url).map_err(|source| {
            RequestBuildError::InvalidBaseUrl { url: self.base_url.clone(), source }
        })?;

        url.path_segments_mut()
            .map_err(|()| RequestBuildError::BaseUrlCannotHavePath { url: self.base_url.clone() })?
            .pop_if_empty()
            .extend(path.split('/').filter(|segment| !segment.is_empty()));

        Ok(url)
    }
}

impl WeatherLookup for OwmClient {
    fn by_city_name(&self, city: &str) -> Result<WeatherReport, OwmError> {
        OwmClient::by_city_name(self, city)
    }

    fn by_zip_code(&self, zip: &str) -> Result<WeatherReport, OwmError> {
        OwmClient::by_zip_code(self, zip)
    }

    fn by_coordinates(&self, coordinates: Coordinates) -> Result<WeatherReport, OwmError> {
        OwmClient::by_coordinates(self, coordinates)
    }
}

/// Takes the body by value so it is dropped, and the connection released,
/// whether decoding succeeds or not.
fn decode_body<T, R>(body: R) -> Result<T, OwmError>
where
    T: DeserializeOwned,
    R: Read,
{
    let value = serde_json::from_reader(BufReader::new(body))?;
    Ok(value)
}
