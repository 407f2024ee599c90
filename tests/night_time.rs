use approx::assert_abs_diff_eq;
use chrono::{DateTime, Duration, TimeZone, Utc};
use night_time_calculator::night::{self, estimate, is_night, minute_samples, summarize};
use night_time_calculator::{GeoCoordinate, Lighting, NightThreshold, NightTimeError, RouteError};
use proptest::prelude::*;

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

fn fra() -> GeoCoordinate {
    GeoCoordinate::new(50.0333, 8.5706).unwrap()
}

fn muc() -> GeoCoordinate {
    GeoCoordinate::new(48.3538, 11.7861).unwrap()
}

#[test]
fn same_airport_counts_minutes_at_the_field() {
    let field = GeoCoordinate::new(50.0, 8.0).unwrap();
    let threshold = NightThreshold::default();
    // Straddles the end of civil twilight on a winter evening.
    let departure = utc(2023, 1, 10, 16, 20);

    let night_minutes = estimate(&field, &field, departure, 10, threshold).unwrap();
    let direct = (0..10)
        .filter(|&m| is_night(&field, departure + Duration::minutes(m), threshold))
        .count() as u32;
    assert_eq!(night_minutes, direct);
    assert!(night_minutes <= 10);
}

#[test]
fn frankfurt_munich_midsummer_noon_is_all_day() {
    let summary = summarize(
        &fra(),
        &muc(),
        utc(2023, 6, 21, 12, 0),
        60,
        NightThreshold::default(),
    )
    .unwrap();
    assert_eq!(summary.night_minutes, 0);
    assert_eq!(summary.lighting(), Lighting::AllDay);
}

#[test]
fn frankfurt_munich_midwinter_midnight_is_all_night() {
    let summary = summarize(
        &fra(),
        &muc(),
        utc(2023, 12, 21, 23, 0),
        60,
        NightThreshold::default(),
    )
    .unwrap();
    assert_eq!(summary.night_minutes, 60);
    assert_eq!(summary.lighting(), Lighting::AllNight);
}

#[test]
fn evening_departure_accrues_night_after_dusk() {
    let night_minutes = estimate(
        &fra(),
        &muc(),
        utc(2023, 10, 15, 16, 20),
        60,
        NightThreshold::default(),
    )
    .unwrap();
    assert_eq!(night_minutes, 20);
}

#[test]
fn zero_block_time_is_an_invalid_route() {
    let err = estimate(
        &fra(),
        &muc(),
        utc(2023, 6, 21, 12, 0),
        0,
        NightThreshold::default(),
    )
    .unwrap_err();
    assert_eq!(err, NightTimeError::InvalidRoute(RouteError::ZeroBlockTime));
    assert!(err.to_string().contains("at least one minute"));
}

#[test]
fn block_time_longer_than_a_day_is_an_invalid_route() {
    let err = estimate(
        &fra(),
        &muc(),
        utc(2023, 6, 21, 12, 0),
        u32::MAX,
        NightThreshold::default(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        NightTimeError::InvalidRoute(RouteError::BlockTimeTooLong(u32::MAX))
    );
}

#[test]
fn lower_threshold_never_adds_night() {
    let departure = utc(2023, 10, 15, 16, 20);
    let civil = estimate(&fra(), &muc(), departure, 60, NightThreshold::default()).unwrap();
    let horizon = estimate(
        &fra(),
        &muc(),
        departure,
        60,
        NightThreshold::new(-0.6).unwrap(),
    )
    .unwrap();
    assert!(horizon >= civil, "horizon {horizon} < civil {civil}");
}

#[test]
fn profile_follows_the_route_at_one_minute_spacing() {
    let departure = utc(2023, 3, 1, 5, 0);
    let samples = minute_samples(&fra(), &muc(), departure, 45, NightThreshold::default()).unwrap();
    assert_eq!(samples.len(), 45);
    assert_abs_diff_eq!(samples[0].position.latitude_deg(), 50.0333, epsilon = 1e-9);
    assert_abs_diff_eq!(samples[0].position.longitude_deg(), 8.5706, epsilon = 1e-9);
    for pair in samples.windows(2) {
        assert_eq!(pair[1].time - pair[0].time, Duration::minutes(1));
        assert!(pair[1].position.longitude_deg() > pair[0].position.longitude_deg());
    }
    let json = serde_json::to_value(&samples[0]).unwrap();
    assert_eq!(json["minute"], 0);
    assert!(json["solar_elevation_deg"].is_number());
}

#[test]
fn long_haul_westbound_flight_is_bounded() {
    let jfk = GeoCoordinate::new(40.6398, -73.7789).unwrap();
    let minutes = night::estimate(
        &fra(),
        &jfk,
        utc(2023, 11, 2, 16, 0),
        520,
        NightThreshold::default(),
    )
    .unwrap();
    assert!(minutes > 0 && minutes < 520, "night minutes {minutes}");
}

#[test]
fn antipodal_route_is_flown() {
    let a = GeoCoordinate::new(10.0, 20.0).unwrap();
    let b = GeoCoordinate::new(-10.0, -160.0).unwrap();
    let minutes =
        estimate(&a, &b, utc(2023, 6, 1, 0, 0), 1_200, NightThreshold::default()).unwrap();
    assert!(minutes <= 1_200);
}

fn coordinate() -> impl Strategy<Value = GeoCoordinate> {
    (-90.0..=90.0f64, -180.0..=180.0f64)
        .prop_map(|(lat, lon)| GeoCoordinate::new(lat, lon).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn night_count_never_exceeds_block_time(
        dept in coordinate(),
        dest in coordinate(),
        offset_minutes in 0i64..20_000_000,
        block in 1u32..600,
    ) {
        let departure = utc(2000, 1, 1, 0, 0) + Duration::minutes(offset_minutes);
        let minutes = estimate(&dept, &dest, departure, block, NightThreshold::default()).unwrap();
        prop_assert!(minutes <= block);
    }

    #[test]
    fn night_count_grows_with_threshold(
        dept in coordinate(),
        dest in coordinate(),
        offset_minutes in 0i64..20_000_000,
        block in 1u32..300,
        low in -20.0..0.0f64,
        raise in 0.0..20.0f64,
    ) {
        let departure = utc(2000, 1, 1, 0, 0) + Duration::minutes(offset_minutes);
        let lower = NightThreshold::new(low).unwrap();
        let higher = NightThreshold::new(low + raise).unwrap();
        let at_lower = estimate(&dept, &dest, departure, block, lower).unwrap();
        let at_higher = estimate(&dept, &dest, departure, block, higher).unwrap();
        prop_assert!(at_lower <= at_higher);
    }

    #[test]
    fn nothing_is_below_the_nadir(
        dept in coordinate(),
        dest in coordinate(),
        offset_minutes in 0i64..20_000_000,
        block in 1u32..120,
    ) {
        let departure = utc(2000, 1, 1, 0, 0) + Duration::minutes(offset_minutes);
        let nadir = NightThreshold::new(-90.0).unwrap();
        prop_assert_eq!(estimate(&dept, &dest, departure, block, nadir).unwrap(), 0);
    }
}
