//! Configuration models and loaders for the Night Time Calculator.

use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use night_core::constants::DEFAULT_NIGHT_ANGLE_DEG;
use night_geodesy::{CoordinateError, GeoCoordinate};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Airport record as kept in the logbook's airport table.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AirportConfig {
    pub icao: String,
    #[serde(default)]
    pub iata: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub lat: f64,
    pub long: f64,
    #[serde(default)]
    pub country: Option<String>,
    /// Field elevation in feet.
    #[serde(default)]
    pub alt: Option<i32>,
}

impl AirportConfig {
    /// Validate the stored latitude/longitude.
    pub fn coordinate(&self) -> Result<GeoCoordinate, ConfigError> {
        GeoCoordinate::new(self.lat, self.long).map_err(|source| ConfigError::Coordinate {
            icao: self.icao.clone(),
            source,
        })
    }
}

/// Estimator settings, mirroring the logbook's settings file.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub flight_logging: FlightLoggingSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FlightLoggingSettings {
    /// Solar elevation below which a minute counts as night.
    #[serde(default = "default_night_angle")]
    pub night_angle_deg: f64,
}

impl Default for FlightLoggingSettings {
    fn default() -> Self {
        Self {
            night_angle_deg: DEFAULT_NIGHT_ANGLE_DEG,
        }
    }
}

fn default_night_angle() -> f64 {
    DEFAULT_NIGHT_ANGLE_DEG
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("airport `{icao}` has invalid coordinates: {source}")]
    Coordinate {
        icao: String,
        #[source]
        source: CoordinateError,
    },
    #[error("airport `{0}` is listed more than once")]
    DuplicateAirport(String),
}

/// Load airport records from a YAML list, a single TOML file, or a directory of TOML files.
///
/// Every record's coordinates are validated and ICAO codes must be unique
/// (case-insensitive).
pub fn load_airports<P: AsRef<Path>>(path: P) -> Result<Vec<AirportConfig>, ConfigError> {
    let path = path.as_ref();
    let airports: Vec<AirportConfig> = load_records(path)?;

    let mut seen = HashSet::with_capacity(airports.len());
    for airport in &airports {
        airport.coordinate()?;
        if !seen.insert(airport.icao.to_ascii_uppercase()) {
            return Err(ConfigError::DuplicateAirport(airport.icao.clone()));
        }
    }
    debug!(count = airports.len(), path = %path.display(), "loaded airport catalog");
    Ok(airports)
}

/// Load estimator settings from a TOML file. Missing keys take their defaults.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

fn load_records<T>(path: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
