//! Geodetic anchor of the map's local frame.

use odrive_core::Location;
use serde::Serialize;

const EARTH_RADIUS_EQUA: f64 = 6_378_137.0;

/// Latitude/longitude of the local origin, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoReference {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl Default for GeoReference {
    fn default() -> Self {
        Self {
            latitude: 42.0,
            longitude: 2.0,
            altitude: 0.0,
        }
    }
}

/// A point on the globe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl GeoReference {
    /// Reads `+lat_0=.. +lon_0=..` out of a PROJ-style string.
    ///
    /// Other tokens are ignored. `None` unless both keys are present and
    /// numeric.
    pub fn parse(proj: &str) -> Option<Self> {
        let mut latitude = None;
        let mut longitude = None;
        for token in proj.split_whitespace() {
            let Some((key, value)) = token.split_once('=') else {
                continue;
            };
            match key {
                "+lat_0" => latitude = value.parse::<f64>().ok(),
                "+lon_0" => longitude = value.parse::<f64>().ok(),
                _ => {}
            }
        }
        Some(Self {
            latitude: latitude?,
            longitude: longitude?,
            altitude: 0.0,
        })
    }

    /// Spherical Mercator projection anchored at this reference.
    pub fn to_geo(&self, location: Location) -> GeoLocation {
        let scale = (self.latitude.to_radians()).cos();
        let (mut mx, mut my) = self.lat_lon_to_mercator(scale);
        mx += location.x;
        my += location.y;

        let longitude = mx * 180.0 / (std::f64::consts::PI * EARTH_RADIUS_EQUA * scale);
        let latitude =
            360.0 * (my / (EARTH_RADIUS_EQUA * scale)).exp().atan() / std::f64::consts::PI - 90.0;

        GeoLocation {
            latitude,
            longitude,
            altitude: self.altitude + location.z,
        }
    }

    fn lat_lon_to_mercator(&self, scale: f64) -> (f64, f64) {
        let mx = scale * self.longitude.to_radians() * EARTH_RADIUS_EQUA;
        let my = scale
            * EARTH_RADIUS_EQUA
            * ((90.0 + self.latitude) * std::f64::consts::PI / 360.0)
                .tan()
                .ln();
        (mx, my)
    }
}
