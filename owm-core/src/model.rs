use serde::{Deserialize, Deserializer, Serialize};

use crate::timestamp::UnixTime;

/// Current weather for one location, as returned by `/weather`.
///
/// Every field may be missing from the payload; missing fields take their
/// zero value. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherReport {
    #[serde(rename = "id", deserialize_with = "null_as_default")]
    pub location_id: i64,
    #[serde(rename = "name", deserialize_with = "null_as_default")]
    pub location_name: String,
    /// When the service generated the report.
    #[serde(rename = "dt")]
    pub observed_at: UnixTime,
    #[serde(rename = "visibility", deserialize_with = "null_as_default")]
    pub visibility_meters: u32,
    #[serde(rename = "coord", deserialize_with = "null_as_default")]
    pub coordinates: Coordinates,
    /// Simultaneous conditions, in the order the service listed them.
    #[serde(rename = "weather", deserialize_with = "null_as_default")]
    pub conditions: Vec<Condition>,
    #[serde(rename = "main", deserialize_with = "null_as_default")]
    pub atmosphere: Atmosphere,
    #[serde(deserialize_with = "null_as_default")]
    pub wind: Wind,
    #[serde(deserialize_with = "null_as_default")]
    pub clouds: Clouds,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rain: Option<Precipitation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snow: Option<Precipitation>,
    #[serde(rename = "sys", deserialize_with = "null_as_default")]
    pub region: Region,
}

/// Geographic position in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coordinates {
    #[serde(rename = "lon", deserialize_with = "null_as_default")]
    pub longitude: f64,
    #[serde(rename = "lat", deserialize_with = "null_as_default")]
    pub latitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { longitude, latitude }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    /// Group of the condition, e.g. "Rain" or "Clear".
    #[serde(rename = "main", deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub icon: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Atmosphere {
    #[serde(flatten)]
    pub temperature: Temperature,
    #[serde(rename = "pressure", deserialize_with = "null_as_default")]
    pub pressure_hpa: u32,
    #[serde(rename = "humidity", deserialize_with = "null_as_default")]
    pub humidity_percent: u8,
}

/// Temperatures in Kelvin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Temperature {
    #[serde(rename = "temp", deserialize_with = "null_as_default")]
    pub current: f64,
    #[serde(rename = "temp_min", deserialize_with = "null_as_default")]
    pub min: f64,
    #[serde(rename = "temp_max", deserialize_with = "null_as_default")]
    pub max: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wind {
    #[serde(rename = "speed", deserialize_with = "null_as_default")]
    pub speed_mps: f64,
    #[serde(rename = "deg", deserialize_with = "null_as_default")]
    pub direction_degrees: u16,
    #[serde(rename = "gust", deserialize_with = "null_as_default")]
    pub gust_mps: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Clouds {
    #[serde(rename = "all", deserialize_with = "null_as_default")]
    pub coverage_percent: u8,
}

/// Rain or snow volume in millimetres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Precipitation {
    #[serde(rename = "1h", deserialize_with = "null_as_default")]
    pub last_hour_mm: f64,
    #[serde(rename = "3h", deserialize_with = "null_as_default")]
    pub last_3_hours_mm: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Region {
    #[serde(rename = "country", deserialize_with = "null_as_default")]
    pub country_code: String,
    pub sunrise: UnixTime,
    pub sunset: UnixTime,
}

/// `null` decodes like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
