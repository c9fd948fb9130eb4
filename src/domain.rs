//! Boundary with the collaborators that sample the outside world.
//!
//! Each collaborator is polled once per tick and answers with its latest sample
//! or `None`. Nothing here starts a hardware or network transaction; drivers own
//! their own timing and must answer without blocking.

use heapless::String;
use time::{PrimitiveDateTime, Time};

/// Bytes kept of a weather description.
pub const DESCRIPTION_CAPACITY: usize = 32;

/// Local wall-clock time, or `None` until the clock has been set.
pub trait TimeSource {
    /// Latest local time; `None` while the time is not valid.
    fn now(&mut self) -> Option<PrimitiveDateTime>;
}

/// Indoor temperature and humidity sensor.
pub trait ClimateSensor {
    /// Latest temperature in whole degrees Celsius.
    fn temperature(&mut self) -> Option<i16>;
    /// Latest relative humidity in percent.
    fn humidity(&mut self) -> Option<u8>;
}

/// Ambient light sensor for adaptive brightness.
pub trait LightSensor {
    /// Latest reading, `0` dark to `255` bright.
    fn ambient(&mut self) -> Option<u8>;
}

/// Outdoor weather client.
pub trait WeatherSource {
    /// The latest successfully parsed report.
    fn latest(&mut self) -> Option<Weather>;
}

/// One outdoor weather report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Weather {
    /// Whole degrees Celsius.
    pub temperature: i16,
    /// Relative humidity in percent.
    pub humidity: u8,
    /// Pressure in hPa.
    pub pressure: u16,
    /// Local sunrise.
    pub sunrise: Time,
    /// Local sunset.
    pub sunset: Time,
    /// Short text such as "light rain", truncated to [`DESCRIPTION_CAPACITY`].
    pub description: String<DESCRIPTION_CAPACITY>,
}

/// A collaborator that has nothing to report.
///
/// Stands in for hardware a build does not have.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Absent;

impl TimeSource for Absent {
    fn now(&mut self) -> Option<PrimitiveDateTime> {
        None
    }
}

impl ClimateSensor for Absent {
    fn temperature(&mut self) -> Option<i16> {
        None
    }

    fn humidity(&mut self) -> Option<u8> {
        None
    }
}

impl LightSensor for Absent {
    fn ambient(&mut self) -> Option<u8> {
        None
    }
}

impl WeatherSource for Absent {
    fn latest(&mut self) -> Option<Weather> {
        None
    }
}

/// Every input a tick needs, sampled once so one frame never mixes two readings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Local time, `None` while invalid.
    pub time: Option<PrimitiveDateTime>,
    /// Indoor temperature in °C.
    pub indoor_temperature: Option<i16>,
    /// Indoor humidity in percent.
    pub indoor_humidity: Option<u8>,
    /// Ambient light, `0..=255`.
    pub ambient_light: Option<u8>,
    /// Outdoor weather.
    pub weather: Option<Weather>,
}

impl Snapshot {
    /// Poll every collaborator once.
    pub fn capture(
        time: &mut impl TimeSource,
        climate: &mut impl ClimateSensor,
        light: &mut impl LightSensor,
        weather: &mut impl WeatherSource,
    ) -> Self {
        Self {
            time: time.now(),
            indoor_temperature: climate.temperature(),
            indoor_humidity: climate.humidity(),
            ambient_light: light.ambient(),
            weather: weather.latest(),
        }
    }

    /// A snapshot holding only a valid time.
    #[must_use]
    pub fn at(time: PrimitiveDateTime) -> Self {
        Self {
            time: Some(time),
            ..Self::default()
        }
    }
}
