//! Sun position from a simplified orbital-elements model referenced to J2000.
//!
//! The model treats the Sun's apparent orbit as a slowly precessing ellipse
//! whose elements are linear in the day count. It is good to roughly a minute
//! of arc around 2000–2050, which is plenty for deciding whether an aircraft
//! is flying at night. Accuracy, not correctness, degrades outside that range.
//!
//! All angles are carried in degrees; trigonometry goes through [`sind`] and
//! [`cosd`].

use chrono::{DateTime, Datelike, Timelike, Utc};
use night_core::constants::{
    AU_KM, CRUISE_ALTITUDE_KM, HOURS_PER_DAY, J2000_DAY_NUMBER, MINUTES_PER_DAY,
};
use night_core::units::{deg_to_rad, rad_to_deg};
use night_geodesy::GeoCoordinate;
use serde::Serialize;

/// Offset between chrono's days-from-CE count and the Julian day number.
const CE_TO_JULIAN_DAY_NUMBER: i64 = 1_721_425;

/// Sine of an angle given in degrees.
#[inline]
pub fn sind(deg: f64) -> f64 {
    deg_to_rad(deg).sin()
}

/// Cosine of an angle given in degrees.
#[inline]
pub fn cosd(deg: f64) -> f64 {
    deg_to_rad(deg).cos()
}

#[inline]
fn asind(x: f64) -> f64 {
    rad_to_deg(x.clamp(-1.0, 1.0).asin())
}

#[inline]
fn atan2d(y: f64, x: f64) -> f64 {
    rad_to_deg(y.atan2(x))
}

/// Days since 1999-12-31 00:00 UTC, including the fraction from hour and minute.
///
/// Seconds are deliberately dropped: the elements change by well under an
/// arc-second per minute.
pub fn days_since_j2000(instant: DateTime<Utc>) -> f64 {
    let day_number = i64::from(instant.date_naive().num_days_from_ce()) + CE_TO_JULIAN_DAY_NUMBER;
    (day_number - J2000_DAY_NUMBER) as f64
        + f64::from(instant.hour()) / HOURS_PER_DAY
        + f64::from(instant.minute()) / MINUTES_PER_DAY
}

/// Mean orbital elements of the Sun for a given day count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitalElements {
    /// Longitude of perihelion `w`.
    pub perihelion_longitude_deg: f64,
    /// Eccentricity `e`.
    pub eccentricity: f64,
    /// Mean anomaly `M`, in `[0, 360)`.
    pub mean_anomaly_deg: f64,
    /// Obliquity of the ecliptic.
    pub obliquity_deg: f64,
    /// Mean longitude `L = w + M`.
    pub mean_longitude_deg: f64,
}

impl OrbitalElements {
    pub fn at(days: f64) -> Self {
        let w = 282.9404 + 4.70935e-5 * days;
        let e = 0.016709 - 1.151e-9 * days;
        let m = (356.0470 + 0.9856002585 * days).rem_euclid(360.0);
        let obliquity = 23.4393 - 3.563e-7 * days;
        Self {
            perihelion_longitude_deg: w,
            eccentricity: e,
            mean_anomaly_deg: m,
            obliquity_deg: obliquity,
            mean_longitude_deg: w + m,
        }
    }
}

/// Geocentric equatorial position of the Sun.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EquatorialPosition {
    pub right_ascension_deg: f64,
    pub declination_deg: f64,
    /// Distance in AU after the observer-altitude correction.
    pub distance_au: f64,
}

impl EquatorialPosition {
    /// Solve for the Sun's position as seen by an observer `altitude_km` above the surface.
    pub fn at(elements: &OrbitalElements, altitude_km: f64) -> Self {
        let e = elements.eccentricity;
        let m = elements.mean_anomaly_deg;

        // First-order solution of Kepler's equation.
        let eccentric_anomaly = m + rad_to_deg(1.0) * e * sind(m) * (1.0 + e * cosd(m));

        let x = cosd(eccentric_anomaly) - e;
        let y = sind(eccentric_anomaly) * (1.0 - e * e).sqrt();
        let r = x.hypot(y);
        let true_anomaly = atan2d(y, x);
        let ecliptic_longitude = true_anomaly + elements.perihelion_longitude_deg;

        // The Sun stays in the ecliptic plane, so the ecliptic z component is zero.
        let x_eclip = r * cosd(ecliptic_longitude);
        let y_eclip = r * sind(ecliptic_longitude);

        let x_equat = x_eclip;
        let y_equat = y_eclip * cosd(elements.obliquity_deg);
        let z_equat = y_eclip * sind(elements.obliquity_deg);

        let distance_au = (x_equat * x_equat + y_equat * y_equat + z_equat * z_equat).sqrt()
            - altitude_km / AU_KM;

        Self {
            right_ascension_deg: atan2d(y_equat, x_equat),
            declination_deg: asind(z_equat / distance_au),
            distance_au,
        }
    }
}

/// Sun position for an instant as seen from cruise altitude.
pub fn sun_position(instant: DateTime<Utc>) -> EquatorialPosition {
    let elements = OrbitalElements::at(days_since_j2000(instant));
    EquatorialPosition::at(&elements, CRUISE_ALTITUDE_KM)
}

/// Solar elevation angle in degrees above the local horizon.
///
/// Negative values put the Sun below the horizon. The observer sits at the
/// fixed cruise altitude of [`CRUISE_ALTITUDE_KM`].
pub fn elevation(instant: DateTime<Utc>, coord: &GeoCoordinate) -> f64 {
    let elements = OrbitalElements::at(days_since_j2000(instant));
    let sun = EquatorialPosition::at(&elements, CRUISE_ALTITUDE_KM);

    let ut_hours = f64::from(instant.hour())
        + f64::from(instant.minute()) / 60.0
        + f64::from(instant.second()) / 3_600.0;

    let gmst0_hours = (elements.mean_longitude_deg + 180.0).rem_euclid(360.0) / 15.0;
    let sidereal_hours = gmst0_hours + ut_hours + coord.longitude_deg() / 15.0;
    let hour_angle = sidereal_hours * 15.0 - sun.right_ascension_deg;

    let x = cosd(hour_angle) * cosd(sun.declination_deg);
    let z = sind(sun.declination_deg);

    // Tilt the equatorial frame about the east-west axis onto the local horizon.
    let colatitude = 90.0 - coord.latitude_deg();
    let z_horizon = x * sind(colatitude) + z * cosd(colatitude);

    asind(z_horizon)
}
