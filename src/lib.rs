//! Receive chain simulator for a pulsed monostatic radar.
//!
//! A [Radar](radar::Radar) built from a [RadarConfig](config::RadarConfig) turns a scene of point
//! targets into one digitized range-bin registry per pulse.

pub mod adc;
pub mod antenna;
pub mod config;
pub mod error;
pub mod helper;
pub mod helper_traits;
pub mod radar;
pub mod scene;
pub mod signal;

pub use error::{RadarError, Result};
