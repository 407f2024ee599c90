//! Minute-by-minute night time estimation along a great-circle route.
//!
//! A flight is assumed to follow the great circle between its airports at a
//! constant angular rate, at the cruise altitude fixed by the solar model. For
//! every minute of block time the Sun's elevation is evaluated at the
//! aircraft's position; minutes with the Sun strictly below the night
//! threshold count as night.

pub mod summary;

use chrono::{DateTime, Duration, Utc};
use night_core::constants::{CIVIL_TWILIGHT_DEG, MAX_BLOCK_MINUTES};
use night_geodesy::{CoordinateError, GeoCoordinate, Route, interpolate};
use night_solar::elevation;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, trace};

pub use summary::{Lighting, NightTimeSummary, summarize};

/// Which end of the flight an airport code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirportRole {
    Departure,
    Destination,
}

impl std::fmt::Display for AirportRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Departure => f.write_str("departure"),
            Self::Destination => f.write_str("destination"),
        }
    }
}

/// Reasons a route cannot be flown by the estimator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    #[error("block time must be at least one minute")]
    ZeroBlockTime,
    #[error("block time of {0} minutes exceeds {max} minutes", max = MAX_BLOCK_MINUTES)]
    BlockTimeTooLong(u32),
    #[error("arrival time falls outside the representable calendar")]
    TimeOutOfRange,
    #[error(transparent)]
    Coordinate(#[from] CoordinateError),
}

/// Errors surfaced by the night time estimator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NightTimeError {
    #[error("invalid route: {0}")]
    InvalidRoute(#[from] RouteError),
    #[error("night threshold {0} is not an elevation angle within [-90, 90]")]
    InvalidThreshold(f64),
    #[error("unknown {role} airport `{code}`")]
    UnknownAirport { code: String, role: AirportRole },
}

impl From<CoordinateError> for NightTimeError {
    fn from(err: CoordinateError) -> Self {
        Self::InvalidRoute(RouteError::Coordinate(err))
    }
}

/// Solar elevation (degrees) below which a minute counts as night.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct NightThreshold(f64);

impl NightThreshold {
    /// End of civil twilight, the EASA definition of night.
    pub const CIVIL_TWILIGHT: Self = Self(CIVIL_TWILIGHT_DEG);

    pub fn new(degrees: f64) -> Result<Self, NightTimeError> {
        if degrees.is_finite() && (-90.0..=90.0).contains(&degrees) {
            Ok(Self(degrees))
        } else {
            Err(NightTimeError::InvalidThreshold(degrees))
        }
    }

    pub fn degrees(self) -> f64 {
        self.0
    }

    /// Strict comparison: an elevation equal to the threshold is still day.
    #[inline]
    pub fn is_night(self, elevation_deg: f64) -> bool {
        elevation_deg < self.0
    }
}

impl Default for NightThreshold {
    fn default() -> Self {
        Self::CIVIL_TWILIGHT
    }
}

impl TryFrom<f64> for NightThreshold {
    type Error = NightTimeError;

    fn try_from(degrees: f64) -> Result<Self, Self::Error> {
        Self::new(degrees)
    }
}

/// One evaluated minute of a flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MinuteSample {
    /// Minutes since off-blocks.
    pub minute: u32,
    pub time: DateTime<Utc>,
    pub position: GeoCoordinate,
    pub solar_elevation_deg: f64,
    pub night: bool,
}

/// Count the minutes of a flight flown under night conditions.
///
/// Samples minutes `0..block_minutes` (the arrival point itself is not
/// sampled), so the result is always within `0..=block_minutes`. Block times
/// must lie within `1..=MAX_BLOCK_MINUTES`.
pub fn estimate(
    dept: &GeoCoordinate,
    dest: &GeoCoordinate,
    departure: DateTime<Utc>,
    block_minutes: u32,
    threshold: NightThreshold,
) -> Result<u32, NightTimeError> {
    let route = plan_route(dept, dest, departure, block_minutes)?;
    let night_minutes = walk(&route, departure, block_minutes, threshold)
        .fold(0u32, |count, sample| count + u32::from(sample.night));

    debug!(
        block_minutes,
        night_minutes,
        threshold_deg = threshold.degrees(),
        "estimated night time"
    );
    Ok(night_minutes)
}

/// Evaluate every minute of the flight, as used by [`estimate`].
pub fn minute_samples(
    dept: &GeoCoordinate,
    dest: &GeoCoordinate,
    departure: DateTime<Utc>,
    block_minutes: u32,
    threshold: NightThreshold,
) -> Result<Vec<MinuteSample>, NightTimeError> {
    let route = plan_route(dept, dest, departure, block_minutes)?;
    Ok(walk(&route, departure, block_minutes, threshold).collect())
}

/// Whether the Sun is below the night threshold at a single place and time.
pub fn is_night(coord: &GeoCoordinate, instant: DateTime<Utc>, threshold: NightThreshold) -> bool {
    threshold.is_night(elevation(instant, coord))
}

fn plan_route(
    dept: &GeoCoordinate,
    dest: &GeoCoordinate,
    departure: DateTime<Utc>,
    block_minutes: u32,
) -> Result<Route, RouteError> {
    if block_minutes == 0 {
        return Err(RouteError::ZeroBlockTime);
    }
    if block_minutes > MAX_BLOCK_MINUTES {
        return Err(RouteError::BlockTimeTooLong(block_minutes));
    }
    departure
        .checked_add_signed(Duration::minutes(i64::from(block_minutes)))
        .ok_or(RouteError::TimeOutOfRange)?;

    let route = interpolate(dept, dest, block_minutes);
    trace!(points = route.len(), "interpolated great-circle route");
    Ok(route)
}

fn walk(
    route: &Route,
    departure: DateTime<Utc>,
    block_minutes: u32,
    threshold: NightThreshold,
) -> impl Iterator<Item = MinuteSample> + '_ {
    route.points()[..block_minutes as usize]
        .iter()
        .zip(0..block_minutes)
        .map(move |(point, minute)| {
            let time = departure + Duration::minutes(i64::from(minute));
            let position = point.to_coordinate();
            let solar_elevation_deg = elevation(time, &position);
            MinuteSample {
                minute,
                time,
                position,
                solar_elevation_deg,
                night: threshold.is_night(solar_elevation_deg),
            }
        })
}
