//! Core units, constants, and shared primitives for the Night Time Calculator workspace.

/// Physical and domain constants. Angles are in degrees unless the name says otherwise.
pub mod constants {
    /// Mean Earth radius expressed in nautical miles, i.e. nautical miles per radian of arc.
    pub const NAUTICAL_MILES_PER_RADIAN: f64 = 3440.06479482;
    /// Kilometres per international nautical mile.
    pub const KM_PER_NAUTICAL_MILE: f64 = 1.852;
    /// Kilometres per astronomical unit, as used by the solar parallax correction.
    pub const AU_KM: f64 = 149_598_000.0;
    /// Assumed cruise altitude of a commercial passenger aircraft (~FL360), in kilometres.
    pub const CRUISE_ALTITUDE_KM: f64 = 11.0;
    /// Julian day number that maps to day zero of the solar model (1999-12-31, "2000 Jan 0.0").
    pub const J2000_DAY_NUMBER: i64 = 2_451_544;
    /// Solar elevation at the end of evening civil twilight.
    pub const CIVIL_TWILIGHT_DEG: f64 = -6.0;
    /// Night threshold used when neither caller nor settings provide one.
    pub const DEFAULT_NIGHT_ANGLE_DEG: f64 = CIVIL_TWILIGHT_DEG;
    /// Seconds per minute.
    pub const SECONDS_PER_MINUTE: i64 = 60;
    /// Minutes per hour.
    pub const MINUTES_PER_HOUR: u32 = 60;
    /// Minutes per day.
    pub const MINUTES_PER_DAY: f64 = 1_440.0;
    /// Hours per day.
    pub const HOURS_PER_DAY: f64 = 24.0;
    /// Longest block time the estimator accepts, one day.
    pub const MAX_BLOCK_MINUTES: u32 = 24 * MINUTES_PER_HOUR;
}

/// Angle and distance conversion helpers.
pub mod units {
    use std::f64::consts::PI;

    use super::constants::{KM_PER_NAUTICAL_MILE, NAUTICAL_MILES_PER_RADIAN};

    /// Convert degrees to radians.
    #[inline]
    pub fn deg_to_rad(deg: f64) -> f64 {
        deg * (PI / 180.0)
    }

    /// Convert radians to degrees.
    #[inline]
    pub fn rad_to_deg(rad: f64) -> f64 {
        rad * (180.0 / PI)
    }

    /// Convert an arc on the Earth's surface (radians) to nautical miles.
    #[inline]
    pub fn rad_to_nautical_miles(rad: f64) -> f64 {
        rad * NAUTICAL_MILES_PER_RADIAN
    }

    /// Convert nautical miles to kilometres.
    #[inline]
    pub fn nautical_miles_to_km(nm: f64) -> f64 {
        nm * KM_PER_NAUTICAL_MILE
    }
}

/// Clock-string helpers for block and night times.
pub mod time {
    use super::constants::MINUTES_PER_HOUR;

    /// Format a minute count as zero-padded `hh:mm`. Hours are not wrapped at 24.
    pub fn minutes_to_hhmm(minutes: u32) -> String {
        format!(
            "{:02}:{:02}",
            minutes / MINUTES_PER_HOUR,
            minutes % MINUTES_PER_HOUR
        )
    }

    /// Parse a clock-style duration into minutes.
    ///
    /// Accepts `hh:mm`, `h:mm`, `hhmm` and `hmm`. Hours must be below 24 and
    /// minutes below 60; anything else yields `None`.
    pub fn parse_hhmm(input: &str) -> Option<u32> {
        let input = input.trim();
        if !input.is_ascii() {
            return None;
        }
        let (hours, minutes) = match (input.len(), input.find(':')) {
            (5, Some(2)) => (&input[..2], &input[3..]),
            (4, Some(1)) => (&input[..1], &input[2..]),
            (4, None) => (&input[..2], &input[2..]),
            (3, None) => (&input[..1], &input[1..]),
            _ => return None,
        };
        let hours = digits(hours)?;
        let minutes = digits(minutes)?;
        if hours >= 24 || minutes >= MINUTES_PER_HOUR {
            return None;
        }
        Some(hours * MINUTES_PER_HOUR + minutes)
    }

    /// Normalise user input to `hh:mm`, or `None` if it is not a valid time.
    pub fn normalize_time_input(input: &str) -> Option<String> {
        parse_hhmm(input).map(minutes_to_hhmm)
    }

    fn digits(s: &str) -> Option<u32> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        s.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::time::{minutes_to_hhmm, normalize_time_input, parse_hhmm};
    use super::units::{deg_to_rad, rad_to_deg, rad_to_nautical_miles};
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;
    use std::f64::consts::PI;

    #[test]
    fn known_angles() {
        assert_abs_diff_eq!(deg_to_rad(180.0), PI, epsilon = 1e-15);
        assert_abs_diff_eq!(deg_to_rad(-90.0), -PI / 2.0, epsilon = 1e-15);
        assert_abs_diff_eq!(rad_to_deg(PI / 4.0), 45.0, epsilon = 1e-12);
    }

    #[test]
    fn one_degree_of_arc_is_sixty_nautical_miles() {
        assert_abs_diff_eq!(rad_to_nautical_miles(deg_to_rad(1.0)), 60.04, epsilon = 0.01);
    }

    #[test]
    fn hhmm_formats() {
        assert_eq!(minutes_to_hhmm(0), "00:00");
        assert_eq!(minutes_to_hhmm(95), "01:35");
        assert_eq!(minutes_to_hhmm(1_500), "25:00");
    }

    #[test]
    fn hhmm_parses_accepted_shapes() {
        assert_eq!(parse_hhmm("01:35"), Some(95));
        assert_eq!(parse_hhmm("1:35"), Some(95));
        assert_eq!(parse_hhmm("0135"), Some(95));
        assert_eq!(parse_hhmm("135"), Some(95));
        assert_eq!(parse_hhmm("245"), Some(165));
        assert_eq!(parse_hhmm(" 23:59 "), Some(1_439));
    }

    #[test]
    fn hhmm_rejects_invalid_input() {
        assert_eq!(parse_hhmm(""), None);
        assert_eq!(parse_hhmm("24:00"), None);
        assert_eq!(parse_hhmm("12:60"), None);
        assert_eq!(parse_hhmm("1a:30"), None);
        assert_eq!(parse_hhmm("12345"), None);
        assert_eq!(parse_hhmm("+1:30"), None);
        assert_eq!(normalize_time_input("7:05").as_deref(), Some("07:05"));
        assert_eq!(parse_hhmm("1é0"), None);
        assert_eq!(normalize_time_input("7:5"), None);
    }

    proptest! {
        #[test]
        fn degree_radian_round_trip(x in -1.0e5..1.0e5f64) {
            prop_assert!((rad_to_deg(deg_to_rad(x)) - x).abs() <= 1e-9);
        }

        #[test]
        fn hhmm_round_trip(minutes in 0u32..1_440) {
            prop_assert_eq!(parse_hhmm(&minutes_to_hhmm(minutes)), Some(minutes));
        }
    }
}
