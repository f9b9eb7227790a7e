pub mod android_jni;
pub mod config;
pub mod coord;
pub mod distance;
pub mod ellipsoid;
pub mod error;
pub mod gpx;
pub mod matcher;
pub mod network;
pub mod report;
pub mod route;

pub use coord::{from_ecef, to_ecef, EcefPoint, GeodeticPoint};
pub use distance::{ellipsoidal_geodesic_distance, spherical_great_circle_distance, Solver, Vincenty};
pub use ellipsoid::{Ellipsoid, GRS80};
pub use error::{GeoError, Result};
pub use matcher::{find_nearest_path, NearestPath, PathCandidateSet, Polyline};
pub use route::total_distance;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
