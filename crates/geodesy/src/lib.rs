//! Spherical-Earth geodesy: validated coordinates, Haversine distance, and
//! great-circle route interpolation.
//!
//! Coordinates enter and leave this crate in decimal degrees; arcs and route
//! samples are expressed in radians.

use night_core::units::{deg_to_rad, rad_to_deg, rad_to_nautical_miles};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod route;

pub use route::{Route, RoutePoint, interpolate};

/// Errors raised when a latitude/longitude pair cannot describe a point on Earth.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("coordinate ({latitude}, {longitude}) is not finite")]
    NonFinite { latitude: f64, longitude: f64 },
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// A point on the Earth's surface in decimal degrees (N and E positive).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct GeoCoordinate {
    latitude_deg: f64,
    longitude_deg: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude_deg: f64,
    longitude_deg: f64,
}

impl TryFrom<RawCoordinate> for GeoCoordinate {
    type Error = CoordinateError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.latitude_deg, raw.longitude_deg)
    }
}

impl GeoCoordinate {
    /// Build a coordinate, rejecting non-finite or out-of-range values.
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Result<Self, CoordinateError> {
        if !latitude_deg.is_finite() || !longitude_deg.is_finite() {
            return Err(CoordinateError::NonFinite {
                latitude: latitude_deg,
                longitude: longitude_deg,
            });
        }
        if !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude_deg));
        }
        if !(-180.0..=180.0).contains(&longitude_deg) {
            return Err(CoordinateError::LongitudeOutOfRange(longitude_deg));
        }
        Ok(Self {
            latitude_deg,
            longitude_deg,
        })
    }

    /// Build a coordinate from radians, clamping rounding overshoot at the poles
    /// and the antimeridian back into range.
    pub(crate) fn from_radians_clamped(latitude_rad: f64, longitude_rad: f64) -> Self {
        Self {
            latitude_deg: rad_to_deg(latitude_rad).clamp(-90.0, 90.0),
            longitude_deg: rad_to_deg(longitude_rad).clamp(-180.0, 180.0),
        }
    }

    pub fn latitude_deg(&self) -> f64 {
        self.latitude_deg
    }

    pub fn longitude_deg(&self) -> f64 {
        self.longitude_deg
    }

    pub fn latitude_rad(&self) -> f64 {
        deg_to_rad(self.latitude_deg)
    }

    pub fn longitude_rad(&self) -> f64 {
        deg_to_rad(self.longitude_deg)
    }
}

/// Great-circle arc between two coordinates in radians (Haversine formula).
///
/// The result is symmetric in its arguments and exactly zero for identical
/// coordinates.
pub fn distance(a: &GeoCoordinate, b: &GeoCoordinate) -> f64 {
    let lat1 = a.latitude_rad();
    let lon1 = a.longitude_rad();
    let lat2 = b.latitude_rad();
    let lon2 = b.longitude_rad();

    let delta_lat = lat2 - lat1;
    let delta_lon = lon2 - lon1;

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1.0, which would make asin return NaN.
    2.0 * h.clamp(0.0, 1.0).sqrt().asin()
}

/// Great-circle distance between two coordinates in nautical miles.
pub fn distance_nm(a: &GeoCoordinate, b: &GeoCoordinate) -> f64 {
    rad_to_nautical_miles(distance(a, b))
}
