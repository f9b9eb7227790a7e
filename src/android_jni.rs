//! JNI bindings for the Android app.
//!
//! Each public function here corresponds to a `external fun` declaration
//! in RustBridge.kt. The function names follow JNI naming conventions:
//! Java_<package>_<class>_<method> with dots replaced by underscores.
//! Errors never cross the boundary as panics; they come back as JSON.

use jni::objects::{JByteArray, JClass, JString};
use jni::sys::jstring;
use jni::JNIEnv;
use log::{error, LevelFilter};

use crate::config::EngineConfig;
use crate::error::{GeoError, Result};
use crate::report::RouteReport;
use crate::{gpx, network};

fn to_jstring(env: &JNIEnv, value: &str) -> jstring {
    env.new_string(value)
        .map(|s| s.into_raw())
        .unwrap_or(std::ptr::null_mut())
}

fn error_json(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

/// Returns the library version.
/// Maps to: RustBridge.version() -> String
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_gnssgeodesy_app_RustBridge_version(
    env: JNIEnv,
    _class: JClass,
) -> jstring {
    to_jstring(&env, crate::VERSION)
}

/// Routes `log` output to logcat. Safe to call more than once.
/// Maps to: RustBridge.initLogging()
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_gnssgeodesy_app_RustBridge_initLogging(
    _env: JNIEnv,
    _class: JClass,
) {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(LevelFilter::Debug)
            .with_tag("gnss-geodesy"),
    );
}

fn route_report(env: &mut JNIEnv, gpx_bytes: &JByteArray, geojson: &JString) -> Result<String> {
    let data = env
        .convert_byte_array(gpx_bytes)
        .map_err(|e| GeoError::Gpx(e.to_string()))?;
    let geojson: String = env
        .get_string(geojson)
        .map_err(|e| GeoError::GeoJson(e.to_string()))?
        .into();

    let config = EngineConfig::default();
    let track = gpx::parse(data.as_slice(), &config.track_options())?;
    let candidates = if geojson.trim().is_empty() {
        Default::default()
    } else {
        network::parse_candidates(&geojson)?
    };

    RouteReport::build(&track.track_points(), &candidates, &config)?.to_json()
}

/// Measures the GPX track and matches it against the GeoJSON network.
/// An empty network string skips matching.
/// Maps to: RustBridge.routeReport(gpx: ByteArray, geojson: String) -> String
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_gnssgeodesy_app_RustBridge_routeReport(
    mut env: JNIEnv,
    _class: JClass,
    gpx_bytes: JByteArray,
    geojson: JString,
) -> jstring {
    let json = match route_report(&mut env, &gpx_bytes, &geojson) {
        Ok(json) => json,
        Err(e) => {
            error!("route report failed: {e}");
            error_json(&e.to_string())
        }
    };
    to_jstring(&env, &json)
}
