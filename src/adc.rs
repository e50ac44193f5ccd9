use crate::error::{RadarError, Result};

pub const MAX_RESOLUTION: u32 = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdcMode {
    // Output level proportional to received power
    Power,
    // Output level proportional to the logarithm of received power
    Logarithm,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Scale {
    Linear,
    // Levels per natural-log unit of power above the minimum
    Logarithmic { log_constant: f64 },
}

/// Analog to digital converter. Maps a received power in W onto an integer level in
/// [0, num_levels - 1].
#[derive(Clone, Debug, PartialEq)]
pub struct Adc {
    mode: AdcMode,
    scale: Scale,
    num_levels: u32,
    // W, inputs at or below this give level 0
    min_power: f64,
    // W, inputs at or above this give the top level
    max_power: f64,
}

impl Adc {
    /// `max_power` is only read in [AdcMode::Logarithm]; in [AdcMode::Power] the ceiling is
    /// (num_levels - 1) * min_power.
    pub fn new(resolution: u32, mode: AdcMode, min_power: f64, max_power: f64) -> Result<Adc> {
        if resolution == 0 || resolution > MAX_RESOLUTION {
            return Err(RadarError::domain(format!(
                "ADC resolution must be between 1 and {} bits, got {}",
                MAX_RESOLUTION, resolution
            )));
        }
        if !(min_power > 0. && min_power.is_finite()) {
            return Err(RadarError::domain(format!(
                "ADC minimum power must be positive, got {}",
                min_power
            )));
        }

        let num_levels = 1u32 << resolution;
        let top = (num_levels - 1) as f64;

        let (scale, max_power) = match mode {
            AdcMode::Power => (Scale::Linear, top * min_power),
            AdcMode::Logarithm => {
                if !(max_power > min_power && max_power.is_finite()) {
                    return Err(RadarError::domain(format!(
                        "ADC maximum power {} must exceed minimum power {}",
                        max_power, min_power
                    )));
                }
                let log_constant = top / (max_power / min_power).ln();
                (Scale::Logarithmic { log_constant }, max_power)
            }
        };

        Ok(Adc {
            mode,
            scale,
            num_levels,
            min_power,
            max_power,
        })
    }

    pub fn num_levels(&self) -> u32 {
        self.num_levels
    }

    pub fn mode(&self) -> AdcMode {
        self.mode
    }

    /// W, the smallest power producing a non-zero level.
    pub fn sensitivity(&self) -> f64 {
        self.min_power
    }

    pub fn max_power(&self) -> f64 {
        self.max_power
    }

    pub fn convert(&self, power: f64) -> Result<u16> {
        if power.is_nan() {
            return Err(RadarError::invalid("ADC input is not a number"));
        }

        let top = self.num_levels - 1;
        if power <= self.min_power {
            return Ok(0);
        }
        if power >= self.max_power {
            return Ok(top as u16);
        }

        let level = match self.scale {
            Scale::Linear => power / self.min_power,
            Scale::Logarithmic { log_constant } => log_constant * (power / self.min_power).ln(),
        };
        Ok((level.floor() as u32).min(top) as u16)
    }
}
