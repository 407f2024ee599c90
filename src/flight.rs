//! Code-based entry points used by the logbook: airports are given as codes
//! and resolved through an [`AirportCoordinateLookup`] before estimation.

use chrono::{DateTime, Utc};
use night_geodesy::{GeoCoordinate, distance_nm};

use crate::airports::AirportCoordinateLookup;
use crate::night::{self, AirportRole, NightThreshold, NightTimeError, NightTimeSummary};

fn resolve<L: AirportCoordinateLookup + ?Sized>(
    lookup: &L,
    code: &str,
    role: AirportRole,
) -> Result<GeoCoordinate, NightTimeError> {
    lookup
        .coordinates(code)
        .ok_or_else(|| NightTimeError::UnknownAirport {
            code: code.to_string(),
            role,
        })
}

/// Resolve both ends of a flight, reporting which one is unknown.
pub fn resolve_airports<L: AirportCoordinateLookup + ?Sized>(
    lookup: &L,
    dept: &str,
    dest: &str,
) -> Result<(GeoCoordinate, GeoCoordinate), NightTimeError> {
    Ok((
        resolve(lookup, dept, AirportRole::Departure)?,
        resolve(lookup, dest, AirportRole::Destination)?,
    ))
}

/// Night minutes for a flight between two airport codes.
pub fn estimate_night_minutes<L: AirportCoordinateLookup + ?Sized>(
    lookup: &L,
    dept: &str,
    dest: &str,
    departure: DateTime<Utc>,
    block_minutes: u32,
    threshold: NightThreshold,
) -> Result<u32, NightTimeError> {
    let (from, to) = resolve_airports(lookup, dept, dest)?;
    night::estimate(&from, &to, departure, block_minutes, threshold)
}

/// Night minutes plus take-off and landing lighting for a flight between two airport codes.
pub fn summarize_flight<L: AirportCoordinateLookup + ?Sized>(
    lookup: &L,
    dept: &str,
    dest: &str,
    departure: DateTime<Utc>,
    block_minutes: u32,
    threshold: NightThreshold,
) -> Result<NightTimeSummary, NightTimeError> {
    let (from, to) = resolve_airports(lookup, dept, dest)?;
    night::summarize(&from, &to, departure, block_minutes, threshold)
}

/// Great-circle distance between two airports in nautical miles.
pub fn route_distance_nm<L: AirportCoordinateLookup + ?Sized>(
    lookup: &L,
    dept: &str,
    dest: &str,
) -> Result<f64, NightTimeError> {
    let (from, to) = resolve_airports(lookup, dept, dest)?;
    Ok(distance_nm(&from, &to))
}
