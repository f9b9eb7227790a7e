//! Distance solvers.
//!
//! Two independent computations, both returning kilometers and both ignoring
//! elevation:
//!
//! - a great-circle distance on a sphere of radius 6371 km, and
//! - the geodesic on the reference ellipsoid, via Vincenty's inverse method.
//!
//! The spherical value is a short-range approximation. It is *not* a rhumb
//! line (loxodrome) even though it has been labelled that way elsewhere.

use log::debug;

use crate::coord::GeodeticPoint;
use crate::ellipsoid::{Ellipsoid, GRS80};
use crate::error::{GeoError, Result};

/// Sphere radius used by the great-circle solver, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points on a sphere, in kilometers.
///
/// Identical points give y = 0, x = 1 and therefore exactly zero.
pub fn spherical_great_circle_distance(a: &GeodeticPoint, b: &GeodeticPoint) -> f64 {
    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let dlon = (b.longitude() - a.longitude()).to_radians();

    let (sin_lat1, cos_lat1) = lat1.sin_cos();
    let (sin_lat2, cos_lat2) = lat2.sin_cos();
    let (sin_dlon, cos_dlon) = dlon.sin_cos();

    let y = ((cos_lat2 * sin_dlon).powi(2)
        + (cos_lat1 * sin_lat2 - sin_lat1 * cos_lat2 * cos_dlon).powi(2))
    .sqrt();
    let x = sin_lat1 * sin_lat2 + cos_lat1 * cos_lat2 * cos_dlon;

    EARTH_RADIUS_KM * y.atan2(x)
}

/// Vincenty inverse solver settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vincenty {
    pub ellipsoid: Ellipsoid,
    /// Stop once successive λ estimates differ by no more than this (radians).
    pub tolerance: f64,
    /// Give up with `NonConvergence` after this many iterations.
    pub max_iterations: u32,
}

impl Default for Vincenty {
    fn default() -> Self {
        Self {
            ellipsoid: GRS80,
            tolerance: 1e-12,
            max_iterations: 200,
        }
    }
}

impl Vincenty {
    /// Geodesic distance between two points in kilometers.
    pub fn distance(&self, p1: &GeodeticPoint, p2: &GeodeticPoint) -> Result<f64> {
        let Ellipsoid { a, b, f } = self.ellipsoid;

        let l = (p2.longitude() - p1.longitude()).to_radians();
        let u1 = ((1.0 - f) * p1.latitude().to_radians().tan()).atan();
        let u2 = ((1.0 - f) * p2.latitude().to_radians().tan()).atan();
        let (sin_u1, cos_u1) = u1.sin_cos();
        let (sin_u2, cos_u2) = u2.sin_cos();

        let mut lambda = l;
        let mut iterations = 0;

        let (sin_sigma, cos_sigma, sigma, cos_sq_alpha, cos_2sigma_m) = loop {
            if iterations == self.max_iterations {
                return Err(GeoError::NonConvergence { iterations });
            }
            iterations += 1;

            let (sin_lambda, cos_lambda) = lambda.sin_cos();
            let sin_sigma = ((cos_u2 * sin_lambda).powi(2)
                + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
            .sqrt();

            // Coincident points
            if sin_sigma == 0.0 {
                return Ok(0.0);
            }

            let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
            let sigma = sin_sigma.atan2(cos_sigma);
            let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
            let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;

            // Equatorial line: cos²α = 0
            let cos_2sigma_m = if cos_sq_alpha != 0.0 {
                cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
            } else {
                0.0
            };

            let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
            let lambda_prev = lambda;
            lambda = l
                + (1.0 - c)
                    * f
                    * sin_alpha
                    * (sigma
                        + c * sin_sigma
                            * (cos_2sigma_m
                                + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));

            if (lambda - lambda_prev).abs() <= self.tolerance {
                break (sin_sigma, cos_sigma, sigma, cos_sq_alpha, cos_2sigma_m);
            }
        };

        debug!("vincenty converged after {iterations} iterations");

        let u_sq = cos_sq_alpha * (a * a - b * b) / (b * b);
        let big_a =
            1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
        let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
        let cos2 = cos_2sigma_m * cos_2sigma_m;
        let delta_sigma = big_b
            * sin_sigma
            * (cos_2sigma_m
                + big_b / 4.0
                    * (cos_sigma * (-1.0 + 2.0 * cos2)
                        - big_b / 6.0
                            * cos_2sigma_m
                            * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                            * (-3.0 + 4.0 * cos2)));

        Ok(b * big_a * (sigma - delta_sigma) / 1000.0)
    }
}

/// Geodesic distance on `model` in kilometers, with the default tolerance
/// (1e-12) and iteration cap (200).
pub fn ellipsoidal_geodesic_distance(
    p1: &GeodeticPoint,
    p2: &GeodeticPoint,
    model: &Ellipsoid,
) -> Result<f64> {
    Vincenty {
        ellipsoid: *model,
        ..Vincenty::default()
    }
    .distance(p1, p2)
}

/// Which distance computation to use for a pair of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Solver {
    SphericalGreatCircle,
    EllipsoidalGeodesic(Vincenty),
}

impl Solver {
    /// Ellipsoidal solver with default settings on GRS80.
    pub fn geodesic() -> Self {
        Solver::EllipsoidalGeodesic(Vincenty::default())
    }

    pub fn distance(&self, p1: &GeodeticPoint, p2: &GeodeticPoint) -> Result<f64> {
        match self {
            Solver::SphericalGreatCircle => Ok(spherical_great_circle_distance(p1, p2)),
            Solver::EllipsoidalGeodesic(vincenty) => vincenty.distance(p1, p2),
        }
    }
}
