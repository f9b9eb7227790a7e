//! Route length aggregation.
//!
//! Sums solver distances over consecutive points, left to right, so the
//! floating-point result is reproducible for a given input order.

use crate::coord::GeodeticPoint;
use crate::distance::Solver;
use crate::error::Result;

/// Distance of each consecutive leg in kilometers.
///
/// Empty for fewer than two points. The first failing leg aborts the
/// whole computation.
pub fn segment_distances(points: &[GeodeticPoint], solver: &Solver) -> Result<Vec<f64>> {
    points
        .windows(2)
        .map(|w| solver.distance(&w[0], &w[1]))
        .collect()
}

/// Total length of a point sequence in kilometers.
///
/// An empty or single-point sequence has length zero.
pub fn total_distance(points: &[GeodeticPoint], solver: &Solver) -> Result<f64> {
    let mut total = 0.0;
    for w in points.windows(2) {
        total += solver.distance(&w[0], &w[1])?;
    }
    Ok(total)
}
