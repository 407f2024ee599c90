//! Night flying time estimation for pilot logbooks.
//!
//! Given two airports, an off-block time and the block time, the estimator
//! walks the great circle between the airports one minute at a time and
//! counts the minutes during which the Sun is below the night threshold
//! (civil twilight, -6° by default) as seen from the aircraft.
//!
//! The heavy lifting lives in the workspace crates, re-exported here:
//! [`geodesy`] for great-circle geometry, [`solar`] for the Sun's position
//! and [`config`] for airport tables and settings.

pub mod airports;
pub mod flight;
pub mod night;

pub use night_config as config;
pub use night_core::{constants, time, units};
pub use night_geodesy as geodesy;
pub use night_solar as solar;

pub use airports::{Airport, AirportCatalog, AirportCoordinateLookup};
pub use flight::{estimate_night_minutes, resolve_airports, route_distance_nm, summarize_flight};
pub use geodesy::{CoordinateError, GeoCoordinate};
pub use night::{
    AirportRole, Lighting, MinuteSample, NightThreshold, NightTimeError, NightTimeSummary,
    RouteError,
};
