//! Defines the `Field` enum, naming the numeric columns of an air-quality station file.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the numeric measurements recorded for every hourly observation.
///
/// Pollutant concentrations are in µg/m³ (CO included), meteorological readings
/// use the units of the source file (°C, hPa, mm, m/s).
///
/// The variant order is the column order of the source file and is the order
/// used for every table produced by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    /// Fine particulate matter (diameter ≤ 2.5 µm).
    #[serde(rename = "PM2.5")]
    Pm25,
    /// Particulate matter (diameter ≤ 10 µm).
    #[serde(rename = "PM10")]
    Pm10,
    /// Sulfur dioxide.
    #[serde(rename = "SO2")]
    So2,
    /// Nitrogen dioxide.
    #[serde(rename = "NO2")]
    No2,
    /// Carbon monoxide.
    #[serde(rename = "CO")]
    Co,
    /// Ozone.
    #[serde(rename = "O3")]
    O3,
    /// Air temperature.
    #[serde(rename = "TEMP")]
    Temperature,
    /// Air pressure.
    #[serde(rename = "PRES")]
    Pressure,
    /// Dew point temperature.
    #[serde(rename = "DEWP")]
    DewPoint,
    /// Precipitation.
    #[serde(rename = "RAIN")]
    Rain,
    /// Wind speed.
    #[serde(rename = "WSPM")]
    WindSpeed,
}

/// Returned when a string does not name any [`Field`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown field '{0}'")]
pub struct UnknownFieldError(pub String);

impl Field {
    /// Every field, in source column order.
    pub const ALL: [Field; 11] = [
        Field::Pm25,
        Field::Pm10,
        Field::So2,
        Field::No2,
        Field::Co,
        Field::O3,
        Field::Temperature,
        Field::Pressure,
        Field::DewPoint,
        Field::Rain,
        Field::WindSpeed,
    ];

    /// The pollutant fields.
    pub const POLLUTANTS: [Field; 6] = [
        Field::Pm25,
        Field::Pm10,
        Field::So2,
        Field::No2,
        Field::Co,
        Field::O3,
    ];

    /// The header name of this field's column in the source CSV.
    pub fn column_name(&self) -> &'static str {
        match self {
            Field::Pm25 => "PM2.5",
            Field::Pm10 => "PM10",
            Field::So2 => "SO2",
            Field::No2 => "NO2",
            Field::Co => "CO",
            Field::O3 => "O3",
            Field::Temperature => "TEMP",
            Field::Pressure => "PRES",
            Field::DewPoint => "DEWP",
            Field::Rain => "RAIN",
            Field::WindSpeed => "WSPM",
        }
    }

    /// `true` for the six pollutant concentrations.
    pub fn is_pollutant(&self) -> bool {
        Field::POLLUTANTS.contains(self)
    }
}

/// Formats a `Field` as its column name.
///
/// # Examples
///
/// ```
/// use air_quality::Field;
///
/// assert_eq!(Field::Pm25.to_string(), "PM2.5");
/// assert_eq!(format!("{}", Field::WindSpeed), "WSPM");
/// ```
impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Parses a column name back into a `Field`. Matching ignores ASCII case.
///
/// # Examples
///
/// ```
/// use air_quality::Field;
///
/// assert_eq!("pm2.5".parse::<Field>(), Ok(Field::Pm25));
/// assert!("humidity".parse::<Field>().is_err());
/// ```
impl FromStr for Field {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.column_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownFieldError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(field.column_name().parse::<Field>(), Ok(field));
        }
    }

    #[test]
    fn test_unknown_field() {
        let err = "wd".parse::<Field>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown field 'wd'");
    }

    #[test]
    fn test_pollutants() {
        assert!(Field::Co.is_pollutant());
        assert!(!Field::Temperature.is_pollutant());
        assert_eq!(Field::ALL.iter().filter(|f| f.is_pollutant()).count(), 6);
    }

    #[test]
    fn test_serializes_as_column_name() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&Field::Pm25)?, "\"PM2.5\"");
        assert_eq!(serde_json::from_str::<Field>("\"DEWP\"")?, Field::DewPoint);
        Ok(())
    }
}
