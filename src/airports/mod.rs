//! Airport coordinate lookup.
//!
//! The estimator itself only needs coordinates; anything that can map an
//! airport code to a [`GeoCoordinate`] can sit behind
//! [`AirportCoordinateLookup`].

use std::collections::HashMap;
use std::path::Path;

use night_config::{AirportConfig, ConfigError, load_airports};
use night_geodesy::GeoCoordinate;
use serde::Serialize;
use tracing::debug;

/// Resolves airport codes to coordinates.
pub trait AirportCoordinateLookup {
    fn coordinates(&self, code: &str) -> Option<GeoCoordinate>;
}

impl<T: AirportCoordinateLookup + ?Sized> AirportCoordinateLookup for &T {
    fn coordinates(&self, code: &str) -> Option<GeoCoordinate> {
        (**self).coordinates(code)
    }
}

/// Exact-key lookup; the map's keys are used as given.
impl AirportCoordinateLookup for HashMap<String, GeoCoordinate> {
    fn coordinates(&self, code: &str) -> Option<GeoCoordinate> {
        self.get(code).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Airport {
    pub icao: String,
    pub iata: Option<String>,
    pub name: Option<String>,
    pub country: Option<String>,
    pub elevation_ft: Option<i32>,
    pub position: GeoCoordinate,
}

impl Airport {
    pub fn from_config(config: &AirportConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            position: config.coordinate()?,
            icao: config.icao.to_ascii_uppercase(),
            iata: config
                .iata
                .as_deref()
                .filter(|code| !code.trim().is_empty())
                .map(str::to_ascii_uppercase),
            name: config.name.clone(),
            country: config.country.clone(),
            elevation_ft: config.alt,
        })
    }
}

/// In-memory airport table indexed by ICAO and IATA code.
///
/// Lookups are case-insensitive. ICAO codes win over IATA codes when the
/// same string is both.
#[derive(Debug, Clone, Default)]
pub struct AirportCatalog {
    airports: Vec<Airport>,
    by_icao: HashMap<String, usize>,
    by_iata: HashMap<String, usize>,
}

impl AirportCatalog {
    pub fn from_configs(configs: &[AirportConfig]) -> Result<Self, ConfigError> {
        let mut catalog = Self::default();
        for config in configs {
            let airport = Airport::from_config(config)?;
            if catalog.by_icao.contains_key(&airport.icao) {
                return Err(ConfigError::DuplicateAirport(airport.icao));
            }
            let index = catalog.airports.len();
            catalog.by_icao.insert(airport.icao.clone(), index);
            if let Some(iata) = &airport.iata {
                catalog.by_iata.entry(iata.clone()).or_insert(index);
            }
            catalog.airports.push(airport);
        }
        Ok(catalog)
    }

    /// Load a catalog from any source accepted by [`load_airports`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let configs = load_airports(path)?;
        let catalog = Self::from_configs(&configs)?;
        debug!(airports = catalog.len(), "built airport catalog");
        Ok(catalog)
    }

    pub fn get(&self, code: &str) -> Option<&Airport> {
        let key = code.trim().to_ascii_uppercase();
        self.by_icao
            .get(&key)
            .or_else(|| self.by_iata.get(&key))
            .map(|&index| &self.airports[index])
    }

    pub fn name_for(&self, code: &str) -> Option<&str> {
        self.get(code).and_then(|airport| airport.name.as_deref())
    }

    /// Airports whose ICAO code starts with `prefix`, in catalog order.
    pub fn complete<'a>(&'a self, prefix: &str) -> impl Iterator<Item = &'a Airport> + use<'a> {
        let prefix = prefix.trim().to_ascii_uppercase();
        self.airports
            .iter()
            .filter(move |airport| airport.icao.starts_with(&prefix))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Airport> {
        self.airports.iter()
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }
}

impl AirportCoordinateLookup for AirportCatalog {
    fn coordinates(&self, code: &str) -> Option<GeoCoordinate> {
        self.get(code).map(|airport| airport.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(icao: &str, iata: Option<&str>, lat: f64, long: f64) -> AirportConfig {
        AirportConfig {
            icao: icao.to_string(),
            iata: iata.map(str::to_string),
            name: Some(format!("{icao} airport")),
            lat,
            long,
            country: None,
            alt: None,
        }
    }

    fn catalog() -> AirportCatalog {
        AirportCatalog::from_configs(&[
            config("EDDF", Some("FRA"), 50.0333, 8.5706),
            config("eddm", Some("muc"), 48.3538, 11.7861),
            config("EDFE", Some(""), 49.9608, 8.6436),
        ])
        .unwrap()
    }

    #[test]
    fn resolves_icao_and_iata_case_insensitively() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("eddf").unwrap().icao, "EDDF");
        assert_eq!(catalog.get("MUC").unwrap().icao, "EDDM");
        assert_eq!(catalog.get(" fra ").unwrap().icao, "EDDF");
        assert!(catalog.get("").is_none());
        assert!(catalog.get("XXXX").is_none());
        assert_eq!(catalog.name_for("EDDM"), Some("eddm airport"));
    }

    #[test]
    fn coordinates_come_from_the_catalog() {
        let fra = catalog().coordinates("FRA").unwrap();
        assert_eq!(fra.latitude_deg(), 50.0333);
        assert_eq!(fra.longitude_deg(), 8.5706);
    }

    #[test]
    fn completes_icao_prefixes() {
        let catalog = catalog();
        let codes: Vec<_> = catalog.complete("ed").map(|a| a.icao.as_str()).collect();
        assert_eq!(codes, ["EDDF", "EDDM", "EDFE"]);
        assert_eq!(catalog.complete("EDD").count(), 2);
        assert_eq!(catalog.complete("K").count(), 0);
    }

    #[test]
    fn rejects_duplicate_icao_codes() {
        let err = AirportCatalog::from_configs(&[
            config("EDDF", None, 50.0, 8.5),
            config("eddf", None, 50.0, 8.5),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateAirport(code) if code == "EDDF"));
    }

    #[test]
    fn hash_map_lookup_is_exact() {
        let mut map = HashMap::new();
        map.insert("EDDF".to_string(), GeoCoordinate::new(50.0333, 8.5706).unwrap());
        assert!(map.coordinates("EDDF").is_some());
        assert!(map.coordinates("eddf").is_none());
        assert!((&map).coordinates("EDDF").is_some());
    }
}
