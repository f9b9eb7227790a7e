//! Error type shared by the engine and its input adapters.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeoError {
    /// The Vincenty inverse solution did not settle within the iteration cap.
    /// Happens for antipodal and near-antipodal point pairs.
    #[error("geodesic solution did not converge after {iterations} iterations")]
    NonConvergence { iterations: u32 },

    #[error("no candidate paths to match against")]
    NoCandidates,

    #[error("invalid coordinate: longitude {longitude}, latitude {latitude}")]
    InvalidCoordinate { longitude: f64, latitude: f64 },

    #[error("polyline needs at least 2 points, got {len}")]
    DegeneratePolyline { len: usize },

    #[error("track contains no points")]
    EmptyTrack,

    #[error("GPX parse error: {0}")]
    Gpx(String),

    #[error("GeoJSON parse error: {0}")]
    GeoJson(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GeoError>;
