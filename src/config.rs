//! Engine settings.
//!
//! Every field has a default, so an empty JSON object (or no config at all)
//! gives the standard behavior.

use serde::{Deserialize, Serialize};

use crate::distance::Vincenty;
use crate::ellipsoid::GRS80;
use crate::error::Result;
use crate::gpx::TrackOptions;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Vincenty convergence threshold on λ, in radians.
    pub convergence_tolerance: f64,
    /// Vincenty iteration cap before reporting non-convergence.
    pub max_iterations: u32,
    /// Elevation assigned to GPX points without an `<ele>` element.
    pub default_elevation_m: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            convergence_tolerance: 1e-12,
            max_iterations: 200,
            default_elevation_m: 100.0,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn vincenty(&self) -> Vincenty {
        Vincenty {
            ellipsoid: GRS80,
            tolerance: self.convergence_tolerance,
            max_iterations: self.max_iterations,
        }
    }

    pub fn track_options(&self) -> TrackOptions {
        TrackOptions {
            default_elevation_m: self.default_elevation_m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_solver_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.vincenty(), Vincenty::default());
        assert_eq!(config.track_options(), TrackOptions::default());
    }

    #[test]
    fn empty_object_gives_defaults() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn partial_override() {
        let config = EngineConfig::from_json(r#"{"max_iterations": 50}"#).unwrap();
        assert_eq!(config.max_iterations, 50);
        assert_eq!(config.vincenty().max_iterations, 50);
        assert_eq!(config.default_elevation_m, 100.0);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(EngineConfig::from_json("max_iterations = 50").is_err());
    }
}
