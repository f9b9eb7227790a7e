//! Reference network loading from GeoJSON.
//!
//! Every `LineString` feature and every part of a `MultiLineString` feature
//! becomes one candidate path, in document order. Positions are
//! `[lon, lat]` (elevation 0) or `[lon, lat, ele]`.

use geojson::{Feature, GeoJson, Geometry, Value};
use log::{debug, warn};

use crate::coord::GeodeticPoint;
use crate::error::{GeoError, Result};
use crate::matcher::{PathCandidateSet, Polyline};

fn to_point(position: &[f64]) -> Result<GeodeticPoint> {
    match position {
        [lon, lat] => GeodeticPoint::new(*lon, *lat, 0.0),
        [lon, lat, ele, ..] => GeodeticPoint::new(*lon, *lat, *ele),
        _ => Err(GeoError::GeoJson(format!(
            "position needs at least 2 values, got {}",
            position.len()
        ))),
    }
}

fn push_line(
    paths: &mut Vec<Polyline>,
    name: Option<&str>,
    positions: &[Vec<f64>],
) -> Result<()> {
    if positions.len() < 2 {
        warn!(
            "skipping line {:?} with {} position(s)",
            name.unwrap_or("<unnamed>"),
            positions.len()
        );
        return Ok(());
    }

    let points = positions
        .iter()
        .map(|p| to_point(p))
        .collect::<Result<Vec<_>>>()?;
    paths.push(Polyline::new(name.map(str::to_owned), points)?);
    Ok(())
}

fn collect_geometry(
    paths: &mut Vec<Polyline>,
    name: Option<&str>,
    geometry: &Geometry,
) -> Result<()> {
    match &geometry.value {
        Value::LineString(line) => push_line(paths, name, line),
        Value::MultiLineString(lines) => {
            for line in lines {
                push_line(paths, name, line)?;
            }
            Ok(())
        }
        Value::GeometryCollection(members) => {
            for member in members {
                collect_geometry(paths, name, member)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn collect_feature(paths: &mut Vec<Polyline>, feature: &Feature) -> Result<()> {
    let name = feature.property("name").and_then(|v| v.as_str());

    match &feature.geometry {
        Some(geometry) => collect_geometry(paths, name, geometry),
        None => Ok(()),
    }
}

/// Parse a GeoJSON document into candidate paths.
pub fn parse_candidates(text: &str) -> Result<PathCandidateSet> {
    let document: GeoJson = text
        .parse()
        .map_err(|e: geojson::Error| GeoError::GeoJson(e.to_string()))?;

    let mut paths = Vec::new();
    match &document {
        GeoJson::FeatureCollection(collection) => {
            for feature in &collection.features {
                collect_feature(&mut paths, feature)?;
            }
        }
        GeoJson::Feature(feature) => collect_feature(&mut paths, feature)?,
        GeoJson::Geometry(geometry) => collect_geometry(&mut paths, None, geometry)?,
    }

    debug!("loaded {} candidate paths", paths.len());
    Ok(PathCandidateSet::from(paths))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROADS: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "properties": { "name": "B1" },
      "geometry": {
        "type": "MultiLineString",
        "coordinates": [
          [[16.0, 48.0], [16.1, 48.0], [16.2, 48.05]],
          [[16.2, 48.05], [16.3, 48.1]]
        ]
      }
    },
    {
      "type": "Feature",
      "properties": { "name": "A21" },
      "geometry": {
        "type": "LineString",
        "coordinates": [[16.0, 48.0, 200.0], [16.3, 48.1, 180.0]]
      }
    },
    {
      "type": "Feature",
      "properties": { "name": "Rest area" },
      "geometry": { "type": "Point", "coordinates": [16.1, 48.02] }
    }
  ]
}"#;

    #[test]
    fn reads_line_and_multiline_features() {
        let set = parse_candidates(ROADS).unwrap();
        assert_eq!(set.len(), 3);

        assert_eq!(set.paths[0].name(), Some("B1"));
        assert_eq!(set.paths[0].points().len(), 3);
        assert_eq!(set.paths[1].name(), Some("B1"));
        assert_eq!(set.paths[2].name(), Some("A21"));
    }

    #[test]
    fn positions_map_to_lon_lat_ele() {
        let set = parse_candidates(ROADS).unwrap();

        let p = set.paths[0].points()[0];
        assert_eq!(p.longitude(), 16.0);
        assert_eq!(p.latitude(), 48.0);
        assert_eq!(p.elevation(), 0.0);

        assert_eq!(set.paths[2].points()[0].elevation(), 200.0);
    }

    #[test]
    fn skips_single_position_parts() {
        let doc = r#"{
  "type": "Feature",
  "properties": {},
  "geometry": {
    "type": "MultiLineString",
    "coordinates": [[[16.0, 48.0]], [[16.0, 48.0], [16.1, 48.1]]]
  }
}"#;
        let set = parse_candidates(doc).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.paths[0].name(), None);
    }

    #[test]
    fn bare_geometry_is_accepted() {
        let doc = r#"{"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]]}"#;
        assert_eq!(parse_candidates(doc).unwrap().len(), 1);
    }

    #[test]
    fn out_of_range_position_fails() {
        let doc = r#"{"type": "LineString", "coordinates": [[0.0, 95.0], [1.0, 1.0]]}"#;
        let err = parse_candidates(doc).unwrap_err();
        assert!(matches!(err, GeoError::InvalidCoordinate { .. }));
    }

    #[test]
    fn malformed_document_fails() {
        assert!(matches!(parse_candidates("{ nope"), Err(GeoError::GeoJson(_))));
    }
}
