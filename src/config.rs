use std::f64::consts::PI;

use crate::{
    adc::AdcMode,
    antenna::BeamPattern,
    error::{require_positive, RadarError, Result},
};

pub mod parser;
pub mod units;

/**
Physical parameters of a radar.

Setters take engineering units (GHz, MHz, µs, ms, deg, dB) and store SI units and radians,
converting through [units]. Getters return the stored SI values. Getters of required parameters
fail with [RadarError::ConfigIncomplete] while the parameter is unset; optional parameters fall
back to their documented defaults.

A config is checked as a whole by [RadarConfig::assert_parameters_set] before a radar is built
from it.
*/
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RadarConfig {
    frequency: Option<f64>,            // Hz
    peak_power: Option<f64>,           // W
    pulse_width: Option<f64>,          // s
    sampling_time: Option<f64>,        // s
    prt: Option<f64>,                  // s
    max_receive_time: Option<f64>,     // s
    bandwidth: Option<f64>,            // Hz
    noise_figure: Option<f64>,         // linear
    duplexer_switch_time: Option<f64>, // s, margin included
    antennae_gain: Option<f64>,        // linear
    az_beamwidth: Option<f64>,         // rad
    el_beamwidth: Option<f64>,         // rad
    ant_rot_speed: Option<f64>,        // rad/s, counter-clockwise
    theta: Option<f64>,                // rad
    horizontal_beam_shape: Option<BeamPattern>,
    elevation_beam_shape: Option<BeamPattern>,
    adc_resolution: Option<u32>,
    adc_mode: Option<AdcMode>,
    adc_min2noise: Option<f64>,
    adc_max2noise: Option<f64>,
}

fn required<T: Copy>(value: Option<T>, key: &str) -> Result<T> {
    value.ok_or_else(|| RadarError::ConfigIncomplete(format!("{} is not set", key)))
}

impl RadarConfig {
    pub fn new() -> RadarConfig {
        RadarConfig::default()
    }

    // GHz
    pub fn set_frequency(&mut self, f: f64) {
        self.frequency = Some(units::ghz_to_hz(f));
    }

    // W
    pub fn set_peak_power(&mut self, power: f64) {
        self.peak_power = Some(power);
    }

    // µs
    pub fn set_pulse_width(&mut self, t: f64) {
        self.pulse_width = Some(units::microseconds_to_seconds(t));
    }

    // µs
    pub fn set_sampling_time(&mut self, t: f64) {
        self.sampling_time = Some(units::microseconds_to_seconds(t));
    }

    // ms
    pub fn set_prt(&mut self, t: f64) {
        self.prt = Some(units::milliseconds_to_seconds(t));
    }

    // ms
    pub fn set_max_receive_time(&mut self, t: f64) {
        self.max_receive_time = Some(units::milliseconds_to_seconds(t));
    }

    // MHz
    pub fn set_bandwidth(&mut self, f: f64) {
        self.bandwidth = Some(units::mhz_to_hz(f));
    }

    // dB
    pub fn set_noise_figure(&mut self, db: f64) {
        self.noise_figure = Some(units::db_to_linear(db));
    }

    // µs, stored with the duplexer margin added
    pub fn set_duplexer_switch_time(&mut self, t: f64) {
        self.duplexer_switch_time = Some(units::duplexer_switch_time(t));
    }

    // dB
    pub fn set_antennae_gain(&mut self, db: f64) {
        self.antennae_gain = Some(units::db_to_linear(db));
    }

    // deg
    pub fn set_az_beamwidth(&mut self, deg: f64) {
        self.az_beamwidth = Some(units::degrees_to_radians(deg));
    }

    // deg
    pub fn set_el_beamwidth(&mut self, deg: f64) {
        self.el_beamwidth = Some(units::degrees_to_radians(deg));
    }

    // deg/s, clockwise
    pub fn set_ant_rot_speed(&mut self, speed: f64) {
        self.ant_rot_speed = Some(units::rotation_speed(speed));
    }

    // deg, compass azimuth
    pub fn set_azimuth(&mut self, azimuth: f64) {
        self.theta = Some(units::azimuth_to_theta(azimuth));
    }

    pub fn set_horizontal_beam_shape(&mut self, shape: BeamPattern) {
        self.horizontal_beam_shape = Some(shape);
    }

    pub fn set_elevation_beam_shape(&mut self, shape: BeamPattern) {
        self.elevation_beam_shape = Some(shape);
    }

    // bits
    pub fn set_adc_resolution(&mut self, bits: u32) {
        self.adc_resolution = Some(bits);
    }

    pub fn set_adc_mode(&mut self, mode: AdcMode) {
        self.adc_mode = Some(mode);
    }

    pub fn set_adc_min2noise(&mut self, ratio: f64) {
        self.adc_min2noise = Some(ratio);
    }

    pub fn set_adc_max2noise(&mut self, ratio: f64) {
        self.adc_max2noise = Some(ratio);
    }

    pub fn frequency(&self) -> Result<f64> {
        required(self.frequency, "Frequency")
    }

    pub fn peak_power(&self) -> Result<f64> {
        required(self.peak_power, "PeakPower")
    }

    pub fn pulse_width(&self) -> Result<f64> {
        required(self.pulse_width, "PulseWidth")
    }

    // Half the pulse width unless set.
    pub fn sampling_time(&self) -> Result<f64> {
        match self.sampling_time {
            Some(t) => Ok(t),
            None => Ok(0.5 * self.pulse_width()?),
        }
    }

    pub fn prt(&self) -> Result<f64> {
        required(self.prt, "PRT")
    }

    // The PRT less the duplexer switch time unless set.
    pub fn max_receive_time(&self) -> Result<f64> {
        match self.max_receive_time {
            Some(t) => Ok(t),
            None => Ok(self.prt()? - self.duplexer_switch_time()?),
        }
    }

    pub fn bandwidth(&self) -> Result<f64> {
        required(self.bandwidth, "BandWidth")
    }

    pub fn noise_figure(&self) -> Result<f64> {
        required(self.noise_figure, "NoiseFigure")
    }

    pub fn duplexer_switch_time(&self) -> Result<f64> {
        required(self.duplexer_switch_time, "DuplexSwitchTime")
    }

    pub fn antennae_gain(&self) -> Result<f64> {
        required(self.antennae_gain, "AntennaeGain")
    }

    pub fn az_beamwidth(&self) -> Result<f64> {
        required(self.az_beamwidth, "AzBeamWidth")
    }

    pub fn el_beamwidth(&self) -> Result<f64> {
        required(self.el_beamwidth, "ElBeamWidth")
    }

    pub fn ant_rot_speed(&self) -> f64 {
        self.ant_rot_speed.unwrap_or(0.)
    }

    // Initial boresight angle. Points along +y (north) unless an azimuth was set.
    pub fn theta(&self) -> f64 {
        self.theta.unwrap_or(0.5 * PI)
    }

    pub fn horizontal_beam_shape(&self) -> BeamPattern {
        self.horizontal_beam_shape.unwrap_or(BeamPattern::Gaussian)
    }

    pub fn elevation_beam_shape(&self) -> BeamPattern {
        self.elevation_beam_shape.unwrap_or(BeamPattern::Gaussian)
    }

    pub fn adc_resolution(&self) -> Result<u32> {
        required(self.adc_resolution, "ADCResolution")
    }

    pub fn adc_mode(&self) -> Result<AdcMode> {
        required(self.adc_mode, "ADCMode")
    }

    pub fn adc_min2noise(&self) -> Result<f64> {
        required(self.adc_min2noise, "ADCMin2Noise")
    }

    // Only required in logarithmic mode.
    pub fn adc_max2noise(&self) -> Result<f64> {
        required(self.adc_max2noise, "ADCMax2Noise")
    }

    fn missing_parameters(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        let mut check = |set: bool, key: &'static str| {
            if !set {
                missing.push(key);
            }
        };
        check(self.peak_power.is_some(), "PeakPower");
        check(self.frequency.is_some(), "Frequency");
        check(self.pulse_width.is_some(), "PulseWidth");
        check(self.prt.is_some(), "PRT");
        check(self.bandwidth.is_some(), "BandWidth");
        check(self.noise_figure.is_some(), "NoiseFigure");
        check(self.duplexer_switch_time.is_some(), "DuplexSwitchTime");
        check(self.antennae_gain.is_some(), "AntennaeGain");
        check(self.az_beamwidth.is_some(), "AzBeamWidth");
        check(self.el_beamwidth.is_some(), "ElBeamWidth");
        check(self.adc_resolution.is_some(), "ADCResolution");
        check(self.adc_mode.is_some(), "ADCMode");
        check(self.adc_min2noise.is_some(), "ADCMin2Noise");
        if self.adc_mode == Some(AdcMode::Logarithm) {
            check(self.adc_max2noise.is_some(), "ADCMax2Noise");
        }
        missing
    }

    /// Fails with [RadarError::ConfigIncomplete] naming every required parameter that is unset,
    /// then with [RadarError::DomainError] if the timing parameters are inconsistent or a
    /// parameter is outside its physical range.
    pub fn assert_parameters_set(&self) -> Result<()> {
        let missing = self.missing_parameters();
        if !missing.is_empty() {
            return Err(RadarError::ConfigIncomplete(format!(
                "parameters not set: {}",
                missing.join(", ")
            )));
        }

        require_positive("Frequency", self.frequency()?)?;
        require_positive("PeakPower", self.peak_power()?)?;
        require_positive("PulseWidth", self.pulse_width()?)?;
        require_positive("SamplingTime", self.sampling_time()?)?;
        require_positive("PRT", self.prt()?)?;
        require_positive("BandWidth", self.bandwidth()?)?;
        require_positive("NoiseFigure", self.noise_figure()?)?;
        require_positive("AntennaeGain", self.antennae_gain()?)?;
        require_positive("AzBeamWidth", self.az_beamwidth()?)?;
        require_positive("ElBeamWidth", self.el_beamwidth()?)?;
        require_positive("ADCMin2Noise", self.adc_min2noise()?)?;
        if self.adc_mode()? == AdcMode::Logarithm {
            require_positive("ADCMax2Noise", self.adc_max2noise()?)?;
        }
        if !self.ant_rot_speed().is_finite() {
            return Err(RadarError::domain("AntRotationSpeed must be finite"));
        }

        let pulse_width = self.pulse_width()?;
        let switch_time = self.duplexer_switch_time()?;
        let prt = self.prt()?;
        let max_receive_time = self.max_receive_time()?;
        let min_receive_time = pulse_width + switch_time;

        if prt < min_receive_time {
            return Err(RadarError::domain(format!(
                "PRT {} s is shorter than the minimum receive time {} s",
                prt, min_receive_time
            )));
        }
        if max_receive_time < min_receive_time {
            return Err(RadarError::domain(format!(
                "maximum receive time {} s is shorter than the minimum receive time {} s",
                max_receive_time, min_receive_time
            )));
        }
        if prt < max_receive_time + switch_time {
            return Err(RadarError::domain(format!(
                "PRT {} s leaves no room for the maximum receive time {} s and the switch time {} s",
                prt, max_receive_time, switch_time
            )));
        }
        if self.sampling_time()? > pulse_width {
            return Err(RadarError::domain(
                "sampling time must not exceed the pulse width",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;

    use crate::{adc::AdcMode, antenna::BeamPattern, error::RadarError};

    use super::RadarConfig;

    // Every required parameter set, defaults left for the optional ones.
    pub(crate) fn short_range_config() -> RadarConfig {
        let mut config = RadarConfig::new();
        config.set_frequency(10.);
        config.set_peak_power(10_000.);
        config.set_pulse_width(0.25);
        config.set_prt(0.133333);
        config.set_bandwidth(4.);
        config.set_noise_figure(4.);
        config.set_duplexer_switch_time(2.183333);
        config.set_antennae_gain(30.);
        config.set_az_beamwidth(2.);
        config.set_el_beamwidth(40.);
        config.set_adc_resolution(10);
        config.set_adc_mode(AdcMode::Power);
        config.set_adc_min2noise(1.);
        config
    }

    #[test]
    fn stores_si_units() {
        let config = short_range_config();
        assert_relative_eq!(config.frequency().unwrap(), 1e10);
        assert_relative_eq!(config.pulse_width().unwrap(), 0.25e-6);
        assert_relative_eq!(config.prt().unwrap(), 0.133333e-3);
        assert_relative_eq!(config.bandwidth().unwrap(), 4e6);
        assert_relative_eq!(config.antennae_gain().unwrap(), 1000., max_relative = 1e-12);
        assert_relative_eq!(
            config.duplexer_switch_time().unwrap(),
            3.083333e-6,
            max_relative = 1e-9
        );
        assert_relative_eq!(config.az_beamwidth().unwrap(), 2. * PI / 180.);
    }

    #[test]
    fn optional_defaults() {
        let config = short_range_config();
        assert_relative_eq!(config.sampling_time().unwrap(), 0.125e-6);
        assert_relative_eq!(
            config.max_receive_time().unwrap(),
            0.133333e-3 - 3.083333e-6,
            max_relative = 1e-9
        );
        assert_relative_eq!(config.theta(), 0.5 * PI);
        assert_eq!(config.ant_rot_speed(), 0.);
        assert_eq!(config.horizontal_beam_shape(), BeamPattern::Gaussian);
        assert_eq!(config.elevation_beam_shape(), BeamPattern::Gaussian);
    }

    #[test]
    fn complete_config_passes() {
        short_range_config().assert_parameters_set().unwrap();
    }

    #[test]
    fn empty_config_is_incomplete() {
        let result = RadarConfig::new().assert_parameters_set();
        match result {
            Err(RadarError::ConfigIncomplete(msg)) => {
                assert!(msg.contains("PeakPower"));
                assert!(msg.contains("ADCMin2Noise"));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn missing_single_parameter() {
        let mut config = short_range_config();
        config.bandwidth = None;
        assert!(matches!(
            config.assert_parameters_set(),
            Err(RadarError::ConfigIncomplete(msg)) if msg.contains("BandWidth")
        ));
        assert!(matches!(
            config.bandwidth(),
            Err(RadarError::ConfigIncomplete(_))
        ));
    }

    #[test]
    fn logarithm_mode_needs_max() {
        let mut config = short_range_config();
        config.set_adc_mode(AdcMode::Logarithm);
        assert!(matches!(
            config.assert_parameters_set(),
            Err(RadarError::ConfigIncomplete(msg)) if msg.contains("ADCMax2Noise")
        ));
        config.set_adc_max2noise(1000.);
        config.assert_parameters_set().unwrap();
    }

    #[test]
    fn inconsistent_timing() {
        let mut config = short_range_config();
        config.set_prt(0.001);
        assert!(matches!(
            config.assert_parameters_set(),
            Err(RadarError::DomainError(_))
        ));

        let mut config = short_range_config();
        config.set_max_receive_time(0.002);
        assert!(matches!(
            config.assert_parameters_set(),
            Err(RadarError::DomainError(_))
        ));

        let mut config = short_range_config();
        config.set_max_receive_time(0.133);
        assert!(matches!(
            config.assert_parameters_set(),
            Err(RadarError::DomainError(_))
        ));

        let mut config = short_range_config();
        config.set_sampling_time(0.5);
        assert!(matches!(
            config.assert_parameters_set(),
            Err(RadarError::DomainError(_))
        ));
    }

    #[test]
    fn rejects_non_positive_values() {
        let mut config = short_range_config();
        config.set_bandwidth(0.);
        assert!(matches!(
            config.assert_parameters_set(),
            Err(RadarError::DomainError(_))
        ));
    }
}
