use chrono::{DateTime, Duration, Utc};
use night_geodesy::GeoCoordinate;
use serde::Serialize;

use super::{NightThreshold, NightTimeError, RouteError, estimate, is_night};

/// Night time for a whole flight together with the lighting at either end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NightTimeSummary {
    pub night_minutes: u32,
    pub block_minutes: u32,
    pub takeoff_night: bool,
    pub landing_night: bool,
}

/// How the lighting changed over the course of a flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lighting {
    AllDay,
    AllNight,
    DayToNight,
    NightToDay,
    /// Partial night with the same lighting at both ends, e.g. a short
    /// polar night crossing.
    Mixed,
}

impl NightTimeSummary {
    pub fn day_minutes(&self) -> u32 {
        self.block_minutes - self.night_minutes
    }

    pub fn lighting(&self) -> Lighting {
        if self.night_minutes == 0 {
            return Lighting::AllDay;
        }
        if self.night_minutes == self.block_minutes {
            return Lighting::AllNight;
        }
        match (self.takeoff_night, self.landing_night) {
            (false, true) => Lighting::DayToNight,
            (true, false) => Lighting::NightToDay,
            _ => Lighting::Mixed,
        }
    }
}

impl std::fmt::Display for Lighting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::AllDay => "all day",
            Self::AllNight => "all night",
            Self::DayToNight => "day to night",
            Self::NightToDay => "night to day",
            Self::Mixed => "mixed",
        };
        f.write_str(label)
    }
}

/// Estimate night time and classify take-off and landing lighting.
///
/// A flight without night minutes takes off and lands by day, and one that
/// is night throughout takes off and lands at night. Only mixed flights look
/// at the Sun at either end: at the departure airport at off-blocks and at
/// the destination at the arrival time, which the per-minute walk never
/// samples.
pub fn summarize(
    dept: &GeoCoordinate,
    dest: &GeoCoordinate,
    departure: DateTime<Utc>,
    block_minutes: u32,
    threshold: NightThreshold,
) -> Result<NightTimeSummary, NightTimeError> {
    let night_minutes = estimate(dept, dest, departure, block_minutes, threshold)?;
    let arrival = departure
        .checked_add_signed(Duration::minutes(i64::from(block_minutes)))
        .ok_or(RouteError::TimeOutOfRange)?;

    let (takeoff_night, landing_night) = if night_minutes == 0 {
        (false, false)
    } else if night_minutes == block_minutes {
        (true, true)
    } else {
        (
            is_night(dept, departure, threshold),
            is_night(dest, arrival, threshold),
        )
    };

    Ok(NightTimeSummary {
        night_minutes,
        block_minutes,
        takeoff_night,
        landing_night,
    })
}
