//! Nearest-path selection over a set of candidate polylines.
//!
//! Candidates are compared by their own cumulative ECEF chord length. The
//! start/end query points do not take part in the comparison, so callers
//! that want "the candidate closest to my endpoints" must filter the set by
//! endpoint proximity before calling [`find_nearest_path`].

use log::debug;
use serde::{Deserialize, Serialize};

use crate::coord::{to_ecef, GeodeticPoint};
use crate::ellipsoid::{Ellipsoid, GRS80};
use crate::error::{GeoError, Result};

/// An ordered sequence of at least two points, e.g. one road network feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPolyline")]
pub struct Polyline {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    points: Vec<GeodeticPoint>,
}

#[derive(Deserialize)]
struct RawPolyline {
    #[serde(default)]
    name: Option<String>,
    points: Vec<GeodeticPoint>,
}

impl TryFrom<RawPolyline> for Polyline {
    type Error = GeoError;

    fn try_from(raw: RawPolyline) -> Result<Self> {
        Self::new(raw.name, raw.points)
    }
}

impl Polyline {
    pub fn new(name: Option<String>, points: Vec<GeodeticPoint>) -> Result<Self> {
        if points.len() < 2 {
            return Err(GeoError::DegeneratePolyline { len: points.len() });
        }
        Ok(Self { name, points })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn points(&self) -> &[GeodeticPoint] {
        &self.points
    }
}

/// Read-only collection of candidate paths, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathCandidateSet {
    pub paths: Vec<Polyline>,
}

impl PathCandidateSet {
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl From<Vec<Polyline>> for PathCandidateSet {
    fn from(paths: Vec<Polyline>) -> Self {
        Self { paths }
    }
}

/// The winning candidate.
#[derive(Debug, Clone, Serialize)]
pub struct NearestPath<'a> {
    /// Position of the candidate in the set (0-based).
    pub index: usize,
    pub polyline: &'a Polyline,
    /// Cumulative chord length in kilometers.
    pub length_km: f64,
}

/// Sum of straight-line ECEF distances between consecutive vertices, in km.
pub fn chord_length(polyline: &Polyline, model: &Ellipsoid) -> f64 {
    let ecef: Vec<_> = polyline.points.iter().map(|p| to_ecef(p, model)).collect();
    let meters: f64 = ecef.windows(2).map(|w| w[0].distance_to(&w[1])).sum();
    meters / 1000.0
}

/// Pick the candidate with the smallest cumulative chord length.
///
/// Ties go to the candidate that appears first. `start` and `end` are not
/// used for scoring; see the module docs.
pub fn find_nearest_path<'a>(
    start: &GeodeticPoint,
    end: &GeodeticPoint,
    candidates: &'a PathCandidateSet,
) -> Result<NearestPath<'a>> {
    let mut best: Option<NearestPath<'a>> = None;

    for (index, polyline) in candidates.paths.iter().enumerate() {
        let length_km = chord_length(polyline, &GRS80);

        let is_better = match &best {
            Some(prev) => length_km < prev.length_km,
            None => true,
        };

        if is_better {
            best = Some(NearestPath {
                index,
                polyline,
                length_km,
            });
        }
    }

    let best = best.ok_or(GeoError::NoCandidates)?;
    debug!(
        "nearest path for ({}, {}) -> ({}, {}): candidate {} of {}, {:.3} km",
        start.latitude(),
        start.longitude(),
        end.latitude(),
        end.longitude(),
        best.index,
        candidates.len(),
        best.length_km
    );
    Ok(best)
}
