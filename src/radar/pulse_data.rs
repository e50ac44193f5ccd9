use nalgebra::Vector3;
use ndarray::Array1;

use crate::error::{check_index, Result};

/// The digitized result of one pulse: one ADC level per range bin.
#[derive(Clone, Debug, PartialEq)]
pub struct PulseData {
    // s, start of emission
    time: f64,
    boresight: Vector3<f64>,
    registry: Array1<u16>,
    has_original_data: bool,
}

impl PulseData {
    pub(crate) fn new(
        time: f64,
        boresight: Vector3<f64>,
        registry: Array1<u16>,
        has_original_data: bool,
    ) -> PulseData {
        PulseData {
            time,
            boresight,
            registry,
            has_original_data,
        }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn boresight(&self) -> Vector3<f64> {
        self.boresight
    }

    pub fn registry(&self) -> Array1<u16> {
        self.registry.clone()
    }

    pub fn level(&self, bin: usize) -> Result<u16> {
        check_index(bin, self.registry.len())?;
        Ok(self.registry[bin])
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// True when noise or at least one echo contributed to the registry.
    pub fn has_original_data(&self) -> bool {
        self.has_original_data
    }
}
