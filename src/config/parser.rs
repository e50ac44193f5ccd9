/*!
Text format for radar configurations.

One `Key Value` pair per line. A token starting with `#` begins a comment that runs to the end of
the line, and blank lines are ignored. Keys are case sensitive and may appear at most once.

```text
Frequency        10.0   # GHz
PeakPower        10000  # W
PulseWidth       0.25   # µs
ADCMode          Power
```
*/

use std::{collections::HashSet, fs, path::Path};

use tracing::debug;

use crate::{
    adc::AdcMode,
    error::{RadarError, Result},
};

use super::RadarConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Keyword {
    Frequency,
    PeakPower,
    PulseWidth,
    SamplingTime,
    Prt,
    MaxReceiveTime,
    BandWidth,
    NoiseFigure,
    DuplexSwitchTime,
    AntennaeGain,
    AzBeamWidth,
    ElBeamWidth,
    AntRotationSpeed,
    Azimuth,
    AdcResolution,
    AdcMode,
    AdcMin2Noise,
    AdcMax2Noise,
}

impl Keyword {
    fn from_token(token: &str) -> Option<Keyword> {
        let keyword = match token {
            "Frequency" => Keyword::Frequency,
            "PeakPower" => Keyword::PeakPower,
            "PulseWidth" => Keyword::PulseWidth,
            "SamplingTime" => Keyword::SamplingTime,
            "PRT" => Keyword::Prt,
            "MaxReceiveTime" => Keyword::MaxReceiveTime,
            "BandWidth" => Keyword::BandWidth,
            "NoiseFigure" => Keyword::NoiseFigure,
            "DuplexSwitchTime" => Keyword::DuplexSwitchTime,
            "AntennaeGain" => Keyword::AntennaeGain,
            "AzBeamWidth" => Keyword::AzBeamWidth,
            "ElBeamWidth" => Keyword::ElBeamWidth,
            "AntRotationSpeed" => Keyword::AntRotationSpeed,
            "Azimuth" => Keyword::Azimuth,
            "ADCResolution" => Keyword::AdcResolution,
            "ADCMode" => Keyword::AdcMode,
            "ADCMin2Noise" => Keyword::AdcMin2Noise,
            "ADCMax2Noise" => Keyword::AdcMax2Noise,
            _ => return None,
        };
        Some(keyword)
    }
}

// Tokens of a line up to the first comment token.
fn split_line(line: &str) -> Vec<&str> {
    line.split_whitespace()
        .take_while(|token| !token.starts_with('#'))
        .collect()
}

fn parse_float(key: &str, value: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .map_err(|_| RadarError::invalid(format!("failed to read value '{}' of '{}'", value, key)))
}

fn parse_integer(key: &str, value: &str) -> Result<u32> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(RadarError::invalid(format!(
            "'{}' expects an integer, got '{}'",
            key, value
        )));
    }
    value
        .parse::<u32>()
        .map_err(|_| RadarError::invalid(format!("integer '{}' of '{}' is out of range", value, key)))
}

fn parse_adc_mode(value: &str) -> Result<AdcMode> {
    match value {
        "Power" => Ok(AdcMode::Power),
        "Logarithm" => Ok(AdcMode::Logarithm),
        _ => Err(RadarError::invalid(format!(
            "unrecognized ADCMode '{}'",
            value
        ))),
    }
}

fn apply(config: &mut RadarConfig, keyword: Keyword, key: &str, value: &str) -> Result<()> {
    let float = || parse_float(key, value);
    match keyword {
        Keyword::Frequency => config.set_frequency(float()?),
        Keyword::PeakPower => config.set_peak_power(float()?),
        Keyword::PulseWidth => config.set_pulse_width(float()?),
        Keyword::SamplingTime => config.set_sampling_time(float()?),
        Keyword::Prt => config.set_prt(float()?),
        Keyword::MaxReceiveTime => config.set_max_receive_time(float()?),
        Keyword::BandWidth => config.set_bandwidth(float()?),
        Keyword::NoiseFigure => config.set_noise_figure(float()?),
        Keyword::DuplexSwitchTime => config.set_duplexer_switch_time(float()?),
        Keyword::AntennaeGain => config.set_antennae_gain(float()?),
        Keyword::AzBeamWidth => config.set_az_beamwidth(float()?),
        Keyword::ElBeamWidth => config.set_el_beamwidth(float()?),
        Keyword::AntRotationSpeed => config.set_ant_rot_speed(float()?),
        Keyword::Azimuth => config.set_azimuth(float()?),
        Keyword::AdcResolution => config.set_adc_resolution(parse_integer(key, value)?),
        Keyword::AdcMode => config.set_adc_mode(parse_adc_mode(value)?),
        Keyword::AdcMin2Noise => config.set_adc_min2noise(float()?),
        Keyword::AdcMax2Noise => config.set_adc_max2noise(float()?),
    }
    Ok(())
}

/// Parses configuration text. The result is not validated; call
/// [RadarConfig::assert_parameters_set] or build a radar from it.
pub fn parse_str(text: &str) -> Result<RadarConfig> {
    let mut config = RadarConfig::new();
    let mut seen = HashSet::new();

    for (line_number, line) in text.lines().enumerate() {
        let tokens = split_line(line);
        if tokens.is_empty() {
            continue;
        }

        let key = tokens[0];
        let keyword = Keyword::from_token(key).ok_or_else(|| {
            RadarError::invalid(format!(
                "line {}: unknown keyword '{}'",
                line_number + 1,
                key
            ))
        })?;
        if !seen.insert(keyword) {
            return Err(RadarError::invalid(format!(
                "line {}: keyword '{}' given more than once",
                line_number + 1,
                key
            )));
        }
        if tokens.len() != 2 {
            return Err(RadarError::invalid(format!(
                "line {}: keyword '{}' takes exactly one value, got {}",
                line_number + 1,
                key,
                tokens.len() - 1
            )));
        }

        apply(&mut config, keyword, key, tokens[1])?;
        debug!(key, value = tokens[1], "parsed radar parameter");
    }

    Ok(config)
}

pub fn parse_file(path: impl AsRef<Path>) -> Result<RadarConfig> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| {
        RadarError::invalid(format!(
            "failed to read radar config {}: {}",
            path.display(),
            e
        ))
    })?;
    debug!(path = %path.display(), "loading radar config");
    parse_str(&text)
}
