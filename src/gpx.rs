//! GPX 1.1 track reading.
//!
//! Wraps the `gpx` crate and turns tracks and routes into validated
//! `GeodeticPoint` sequences for the distance engine. Timestamps are
//! dropped; the engine does not use them.

use serde::{Deserialize, Serialize};
use std::io::Read;

use crate::coord::GeodeticPoint;
use crate::error::{GeoError, Result};

/// Reader settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackOptions {
    /// Elevation used when a point has no `<ele>` element, in meters.
    pub default_elevation_m: f64,
}

impl Default for TrackOptions {
    fn default() -> Self {
        Self {
            default_elevation_m: 100.0,
        }
    }
}

/// A named sequence of points representing a recorded path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub points: Vec<GeodeticPoint>,
}

/// All tracks and routes of a GPX file. Routes are planned paths but are
/// measured the same way, so they share the `Track` shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GpxData {
    pub tracks: Vec<Track>,
    pub routes: Vec<Track>,
}

impl GpxData {
    /// Every track point in file order, segments and tracks concatenated.
    pub fn track_points(&self) -> Vec<GeodeticPoint> {
        self.tracks
            .iter()
            .flat_map(|t| t.points.iter().copied())
            .collect()
    }
}

fn convert(wp: &gpx::Waypoint, options: &TrackOptions) -> Result<GeodeticPoint> {
    let point = wp.point();
    GeodeticPoint::new(
        point.x(),
        point.y(),
        wp.elevation.unwrap_or(options.default_elevation_m),
    )
}

/// Parse a GPX file from any reader.
pub fn parse<R: Read>(reader: R, options: &TrackOptions) -> Result<GpxData> {
    let gpx = gpx::read(reader).map_err(|e| GeoError::Gpx(e.to_string()))?;

    let tracks = gpx
        .tracks
        .iter()
        .map(|t| {
            let points = t
                .segments
                .iter()
                .flat_map(|seg| seg.points.iter())
                .map(|wp| convert(wp, options))
                .collect::<Result<Vec<_>>>()?;

            Ok(Track {
                name: t.name.clone(),
                points,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let routes = gpx
        .routes
        .iter()
        .map(|r| {
            let points = r
                .points
                .iter()
                .map(|wp| convert(wp, options))
                .collect::<Result<Vec<_>>>()?;

            Ok(Track {
                name: r.name.clone(),
                points,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(GpxData { tracks, routes })
}

/// Parse GPX from a byte slice with default options.
pub fn parse_bytes(data: &[u8]) -> Result<GpxData> {
    parse(data, &TrackOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_GPX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test"
     xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <name>Morning Ride</name>
    <trkseg>
      <trkpt lat="48.2082" lon="16.3738"><ele>171</ele><time>2023-05-01T07:00:00Z</time></trkpt>
      <trkpt lat="48.2090" lon="16.3750"><ele>173</ele></trkpt>
      <trkpt lat="48.2100" lon="16.3760"></trkpt>
    </trkseg>
  </trk>
  <rte>
    <name>Plan</name>
    <rtept lat="48.2000" lon="16.3500"></rtept>
    <rtept lat="48.2100" lon="16.3600"></rtept>
  </rte>
</gpx>"#;

    #[test]
    fn parse_track_points() {
        let data = parse_bytes(MINIMAL_GPX.as_bytes()).unwrap();

        assert_eq!(data.tracks.len(), 1);
        assert_eq!(data.tracks[0].name.as_deref(), Some("Morning Ride"));
        assert_eq!(data.tracks[0].points.len(), 3);

        let p = &data.tracks[0].points[0];
        assert!((p.latitude() - 48.2082).abs() < 1e-6);
        assert!((p.longitude() - 16.3738).abs() < 1e-6);
        assert_eq!(p.elevation(), 171.0);
    }

    #[test]
    fn missing_elevation_uses_default() {
        let data = parse_bytes(MINIMAL_GPX.as_bytes()).unwrap();
        assert_eq!(data.tracks[0].points[2].elevation(), 100.0);

        let options = TrackOptions {
            default_elevation_m: 0.0,
        };
        let data = parse(MINIMAL_GPX.as_bytes(), &options).unwrap();
        assert_eq!(data.tracks[0].points[2].elevation(), 0.0);
    }

    #[test]
    fn parse_route() {
        let data = parse_bytes(MINIMAL_GPX.as_bytes()).unwrap();

        assert_eq!(data.routes.len(), 1);
        assert_eq!(data.routes[0].name.as_deref(), Some("Plan"));
        assert_eq!(data.routes[0].points.len(), 2);
    }

    #[test]
    fn parse_empty_gpx() {
        let empty = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test"
     xmlns="http://www.topografix.com/GPX/1/1">
</gpx>"#;

        let data = parse_bytes(empty.as_bytes()).unwrap();
        assert!(data.tracks.is_empty());
        assert!(data.routes.is_empty());
        assert!(data.track_points().is_empty());
    }

    #[test]
    fn parse_invalid_xml_returns_error() {
        let result = parse_bytes(b"not xml at all");
        assert!(matches!(result, Err(GeoError::Gpx(_))));
    }

    #[test]
    fn multiple_tracks_and_segments_are_flattened() {
        let gpx = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test"
     xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <trkseg>
      <trkpt lat="48.0" lon="16.0"></trkpt>
      <trkpt lat="48.1" lon="16.1"></trkpt>
    </trkseg>
    <trkseg>
      <trkpt lat="48.2" lon="16.2"></trkpt>
    </trkseg>
  </trk>
  <trk>
    <trkseg>
      <trkpt lat="48.3" lon="16.3"></trkpt>
    </trkseg>
  </trk>
</gpx>"#;

        let data = parse_bytes(gpx.as_bytes()).unwrap();
        assert_eq!(data.tracks[0].points.len(), 3);

        let all = data.track_points();
        assert_eq!(all.len(), 4);
        assert!((all[3].latitude() - 48.3).abs() < 1e-9);
    }
}
