//! Geodetic and Earth-Centered-Earth-Fixed coordinates.
//!
//! A `GeodeticPoint` is longitude/latitude in degrees plus elevation in
//! meters above the ellipsoid. It is validated when constructed, so the
//! solvers downstream never see an out-of-range coordinate.

use serde::{Deserialize, Serialize};

use crate::ellipsoid::Ellipsoid;
use crate::error::{GeoError, Result};

/// A validated geographic coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPoint")]
pub struct GeodeticPoint {
    longitude: f64,
    latitude: f64,
    #[serde(rename = "altitude")]
    elevation: f64,
}

#[derive(Deserialize)]
struct RawPoint {
    longitude: f64,
    latitude: f64,
    #[serde(default)]
    altitude: f64,
}

impl TryFrom<RawPoint> for GeodeticPoint {
    type Error = GeoError;

    fn try_from(raw: RawPoint) -> Result<Self> {
        Self::new(raw.longitude, raw.latitude, raw.altitude)
    }
}

impl GeodeticPoint {
    /// Build a point, rejecting latitudes outside [-90, 90], longitudes
    /// outside [-180, 180] and non-finite values.
    pub fn new(longitude: f64, latitude: f64, elevation: f64) -> Result<Self> {
        let valid = longitude.is_finite()
            && latitude.is_finite()
            && elevation.is_finite()
            && (-180.0..=180.0).contains(&longitude)
            && (-90.0..=90.0).contains(&latitude);

        if !valid {
            return Err(GeoError::InvalidCoordinate { longitude, latitude });
        }

        Ok(Self { longitude, latitude, elevation })
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    /// Shorthand for `to_ecef(self, model)`.
    pub fn to_ecef(&self, model: &Ellipsoid) -> EcefPoint {
        to_ecef(self, model)
    }
}

/// Cartesian position in meters, origin at the Earth's center of mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EcefPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl EcefPoint {
    /// Straight-line (chord) distance in meters.
    pub fn distance_to(&self, other: &EcefPoint) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Convert a geodetic point to ECEF.
///
/// At the poles cos(lat) is zero, which collapses X and Y to zero on its own.
pub fn to_ecef(point: &GeodeticPoint, model: &Ellipsoid) -> EcefPoint {
    let lat = point.latitude.to_radians();
    let lon = point.longitude.to_radians();
    let h = point.elevation;

    let e2 = model.e2();
    let sin_lat = lat.sin();
    let cos_lat = lat.cos();

    // Prime-vertical radius of curvature
    let n = model.a / (1.0 - e2 * sin_lat * sin_lat).sqrt();

    EcefPoint {
        x: (n + h) * cos_lat * lon.cos(),
        y: (n + h) * cos_lat * lon.sin(),
        z: ((1.0 - e2) * n + h) * sin_lat,
    }
}

/// Convert an ECEF position back to geodetic coordinates.
///
/// Starts from Bowring's closed-form latitude and refines it twice with the
/// fixed-point relation tan(lat) = (z + e²·N·sin(lat)) / p.
pub fn from_ecef(ecef: &EcefPoint, model: &Ellipsoid) -> Result<GeodeticPoint> {
    let EcefPoint { x, y, z } = *ecef;
    let e2 = model.e2();
    let ep2 = model.ep2();

    let lon = y.atan2(x);
    let p = (x * x + y * y).sqrt();

    let theta = (z * model.a).atan2(p * model.b);
    let (sin_t, cos_t) = theta.sin_cos();
    let mut lat = (z + ep2 * model.b * sin_t * sin_t * sin_t)
        .atan2(p - e2 * model.a * cos_t * cos_t * cos_t);

    for _ in 0..2 {
        let sin_lat = lat.sin();
        let n = model.a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        lat = (z + e2 * n * sin_lat).atan2(p);
    }

    // Height form that stays finite where cos(lat) = 0
    let (sin_lat, cos_lat) = lat.sin_cos();
    let h = p * cos_lat + z * sin_lat - model.a * (1.0 - e2 * sin_lat * sin_lat).sqrt();

    GeodeticPoint::new(
        lon.to_degrees().clamp(-180.0, 180.0),
        lat.to_degrees().clamp(-90.0, 90.0),
        h,
    )
}
