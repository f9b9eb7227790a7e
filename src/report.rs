//! End-to-end summary of a recorded track.
//!
//! Straight-line (first to last point) distances with both solvers, the
//! accumulated track length with both solvers, and the shortest reference
//! path between the track's endpoints.

use log::info;
use serde::Serialize;

use crate::config::EngineConfig;
use crate::coord::GeodeticPoint;
use crate::distance::{spherical_great_circle_distance, Solver};
use crate::error::{GeoError, Result};
use crate::matcher::{find_nearest_path, PathCandidateSet, Polyline};
use crate::route::total_distance;

/// Shortest reference path, detached from the candidate set.
#[derive(Debug, Clone, Serialize)]
pub struct MatchedPath {
    pub index: usize,
    pub length_km: f64,
    pub path: Polyline,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteReport {
    pub start: GeodeticPoint,
    pub end: GeodeticPoint,
    pub point_count: usize,
    pub great_circle_km: f64,
    pub geodesic_km: f64,
    pub track_great_circle_km: f64,
    pub track_geodesic_km: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest_path: Option<MatchedPath>,
}

impl RouteReport {
    /// Measure `track` and match its endpoints against `candidates`.
    ///
    /// An empty candidate set yields no `nearest_path`; an empty track is an
    /// error.
    pub fn build(
        track: &[GeodeticPoint],
        candidates: &PathCandidateSet,
        config: &EngineConfig,
    ) -> Result<Self> {
        let (start, end) = match (track.first(), track.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return Err(GeoError::EmptyTrack),
        };

        let geodesic = Solver::EllipsoidalGeodesic(config.vincenty());

        let nearest_path = if candidates.is_empty() {
            None
        } else {
            let found = find_nearest_path(&start, &end, candidates)?;
            Some(MatchedPath {
                index: found.index,
                length_km: found.length_km,
                path: found.polyline.clone(),
            })
        };

        let report = RouteReport {
            start,
            end,
            point_count: track.len(),
            great_circle_km: spherical_great_circle_distance(&start, &end),
            geodesic_km: geodesic.distance(&start, &end)?,
            track_great_circle_km: total_distance(track, &Solver::SphericalGreatCircle)?,
            track_geodesic_km: total_distance(track, &geodesic)?,
            nearest_path,
        };

        info!(
            "track of {} points: {:.3} km geodesic, {:.3} km along track",
            report.point_count, report.geodesic_km, report.track_geodesic_km
        );

        Ok(report)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
