//! Conversions from the engineering units used in configuration files to SI units and radians.
//! Each is applied exactly once, when a value enters a [RadarConfig](super::RadarConfig).

use crate::helper::{from_decibels, wrap_angle};

// Added to every configured duplexer switch time.
pub const DUPLEXER_MARGIN: f64 = 0.9e-6; // s

pub fn ghz_to_hz(f: f64) -> f64 {
    f * 1e9
}

pub fn mhz_to_hz(f: f64) -> f64 {
    f * 1e6
}

pub fn microseconds_to_seconds(t: f64) -> f64 {
    t * 1e-6
}

pub fn milliseconds_to_seconds(t: f64) -> f64 {
    t * 1e-3
}

pub fn db_to_linear(db: f64) -> f64 {
    from_decibels(db)
}

pub fn degrees_to_radians(deg: f64) -> f64 {
    deg.to_radians()
}

pub fn duplexer_switch_time(microseconds: f64) -> f64 {
    microseconds_to_seconds(microseconds) + DUPLEXER_MARGIN
}

// Compass azimuth (deg, clockwise from north) to the internal angle (rad, counter-clockwise from
// the x axis) in [0, 2π). An azimuth of 90° gives 0.
pub fn azimuth_to_theta(azimuth: f64) -> f64 {
    wrap_angle(degrees_to_radians(90. - azimuth))
}

// Clockwise deg/s to counter-clockwise rad/s.
pub fn rotation_speed(deg_per_second: f64) -> f64 {
    -degrees_to_radians(deg_per_second)
}
