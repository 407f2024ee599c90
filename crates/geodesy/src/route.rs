//! Great-circle route sampling between two coordinates.

use std::f64::consts::PI;
use std::ops::Index;

use serde::Serialize;

use crate::{GeoCoordinate, distance};

/// Arcs shorter than this (radians) are treated as a single point.
pub const DEGENERATE_EPSILON: f64 = 1e-12;
/// Arcs within this distance (radians) of a half turn are treated as antipodal.
pub const ANTIPODAL_EPSILON: f64 = 1e-6;

/// One interpolated sample along a route, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoutePoint {
    pub latitude_rad: f64,
    pub longitude_rad: f64,
}

impl RoutePoint {
    fn from_coordinate(coord: &GeoCoordinate) -> Self {
        Self {
            latitude_rad: coord.latitude_rad(),
            longitude_rad: coord.longitude_rad(),
        }
    }

    fn from_unit_vector(x: f64, y: f64, z: f64) -> Self {
        Self {
            latitude_rad: z.atan2((x * x + y * y).sqrt()),
            longitude_rad: y.atan2(x),
        }
    }

    /// Convert back to decimal degrees.
    pub fn to_coordinate(&self) -> GeoCoordinate {
        GeoCoordinate::from_radians_clamped(self.latitude_rad, self.longitude_rad)
    }
}

/// Ordered samples from departure (index 0) to destination (last index).
///
/// A route always holds at least one point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    points: Vec<RoutePoint>,
}

impl Route {
    pub fn points(&self) -> &[RoutePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RoutePoint> {
        self.points.iter()
    }

    pub fn departure(&self) -> &RoutePoint {
        &self.points[0]
    }

    pub fn destination(&self) -> &RoutePoint {
        &self.points[self.points.len() - 1]
    }
}

impl Index<usize> for Route {
    type Output = RoutePoint;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl<'a> IntoIterator for &'a Route {
    type Item = &'a RoutePoint;
    type IntoIter = std::slice::Iter<'a, RoutePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Sample `steps + 1` points along the great circle from `a` to `b`.
///
/// Point `i` sits at interpolation fraction `i / steps` of the arc. When the
/// two coordinates coincide the route is `steps + 1` copies of `a`; with
/// `steps == 0` it is the single point `a`. Antipodal pairs, which lie on
/// infinitely many great circles, are routed north along the departure
/// meridian.
pub fn interpolate(a: &GeoCoordinate, b: &GeoCoordinate, steps: u32) -> Route {
    let start = RoutePoint::from_coordinate(a);
    if steps == 0 {
        return Route {
            points: vec![start],
        };
    }

    let d = distance(a, b);
    let count = steps as usize + 1;

    if d < DEGENERATE_EPSILON {
        return Route {
            points: vec![start; count],
        };
    }
    if PI - d < ANTIPODAL_EPSILON {
        return antipodal_route(a, b, d, steps);
    }

    let (lat1, lon1) = (a.latitude_rad(), a.longitude_rad());
    let (lat2, lon2) = (b.latitude_rad(), b.longitude_rad());
    let sin_d = d.sin();

    let points = (0..=steps)
        .map(|i| {
            let fraction = f64::from(i) / f64::from(steps);
            let wa = ((1.0 - fraction) * d).sin() / sin_d;
            let wb = (fraction * d).sin() / sin_d;
            let x = wa * lat1.cos() * lon1.cos() + wb * lat2.cos() * lon2.cos();
            let y = wa * lat1.cos() * lon1.sin() + wb * lat2.cos() * lon2.sin();
            let z = wa * lat1.sin() + wb * lat2.sin();
            RoutePoint::from_unit_vector(x, y, z)
        })
        .collect();

    Route { points }
}

// Rotate from `a` towards its local north by `fraction * d`; at the end of the
// walk the point lies on the opposite side of the globe.
fn antipodal_route(a: &GeoCoordinate, b: &GeoCoordinate, d: f64, steps: u32) -> Route {
    let (lat, lon) = (a.latitude_rad(), a.longitude_rad());
    let origin = [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()];
    let north = [
        -lat.sin() * lon.cos(),
        -lat.sin() * lon.sin(),
        lat.cos(),
    ];

    let mut points: Vec<RoutePoint> = (0..=steps)
        .map(|i| {
            let theta = f64::from(i) / f64::from(steps) * d;
            let (s, c) = theta.sin_cos();
            RoutePoint::from_unit_vector(
                c * origin[0] + s * north[0],
                c * origin[1] + s * north[1],
                c * origin[2] + s * north[2],
            )
        })
        .collect();

    points[0] = RoutePoint::from_coordinate(a);
    points[steps as usize] = RoutePoint::from_coordinate(b);
    Route { points }
}
