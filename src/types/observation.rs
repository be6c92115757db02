//! Row-level types: the readings of one hour at one station.

use crate::types::field::Field;
use chrono::NaiveDateTime;
use serde::Serialize;

/// The numeric measurements of one observation. `None` marks a missing cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Readings {
    #[serde(rename = "PM2.5")]
    pub pm25: Option<f64>,
    #[serde(rename = "PM10")]
    pub pm10: Option<f64>,
    #[serde(rename = "SO2")]
    pub so2: Option<f64>,
    #[serde(rename = "NO2")]
    pub no2: Option<f64>,
    #[serde(rename = "CO")]
    pub co: Option<f64>,
    #[serde(rename = "O3")]
    pub o3: Option<f64>,
    #[serde(rename = "TEMP")]
    pub temperature: Option<f64>,
    #[serde(rename = "PRES")]
    pub pressure: Option<f64>,
    #[serde(rename = "DEWP")]
    pub dew_point: Option<f64>,
    #[serde(rename = "RAIN")]
    pub rain: Option<f64>,
    #[serde(rename = "WSPM")]
    pub wind_speed: Option<f64>,
}

impl Readings {
    pub fn value(&self, field: Field) -> Option<f64> {
        match field {
            Field::Pm25 => self.pm25,
            Field::Pm10 => self.pm10,
            Field::So2 => self.so2,
            Field::No2 => self.no2,
            Field::Co => self.co,
            Field::O3 => self.o3,
            Field::Temperature => self.temperature,
            Field::Pressure => self.pressure,
            Field::DewPoint => self.dew_point,
            Field::Rain => self.rain,
            Field::WindSpeed => self.wind_speed,
        }
    }

    pub fn value_mut(&mut self, field: Field) -> &mut Option<f64> {
        match field {
            Field::Pm25 => &mut self.pm25,
            Field::Pm10 => &mut self.pm10,
            Field::So2 => &mut self.so2,
            Field::No2 => &mut self.no2,
            Field::Co => &mut self.co,
            Field::O3 => &mut self.o3,
            Field::Temperature => &mut self.temperature,
            Field::Pressure => &mut self.pressure,
            Field::DewPoint => &mut self.dew_point,
            Field::Rain => &mut self.rain,
            Field::WindSpeed => &mut self.wind_speed,
        }
    }

    /// Returns a copy with `field` set to `value`.
    pub fn with(mut self, field: Field, value: Option<f64>) -> Self {
        *self.value_mut(field) = value;
        self
    }

    /// Fills every `None` field with the corresponding value of `previous`.
    pub fn fill_from(&mut self, previous: &Self) {
        for field in Field::ALL {
            let slot = self.value_mut(field);
            if slot.is_none() {
                *slot = previous.value(field);
            }
        }
    }
}

/// One row of a station file before its timestamp has been validated.
///
/// The time components are kept as read so that out-of-range values can be
/// reported back verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub year: i64,
    pub month: i64,
    pub day: i64,
    pub hour: i64,
    pub readings: Readings,
    pub wind_direction: Option<String>,
    pub station: Option<String>,
}

impl RawRecord {
    pub fn new(year: i64, month: i64, day: i64, hour: i64, readings: Readings) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            readings,
            wind_direction: None,
            station: None,
        }
    }
}

/// One hourly observation with a validated timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub datetime: NaiveDateTime,
    #[serde(flatten)]
    pub readings: Readings,
    /// Compass direction of the wind, e.g. `"NNW"`.
    #[serde(rename = "wd")]
    pub wind_direction: Option<String>,
    pub station: Option<String>,
}

impl Observation {
    pub fn value(&self, field: Field) -> Option<f64> {
        self.readings.value(field)
    }

    /// Fills missing readings, wind direction and station name from `previous`.
    pub fn fill_from(&mut self, previous: &Self) {
        self.readings.fill_from(&previous.readings);
        if self.wind_direction.is_none() {
            self.wind_direction = previous.wind_direction.clone();
        }
        if self.station.is_none() {
            self.station = previous.station.clone();
        }
    }
}
