use std::f64::consts::PI;

use nalgebra::Vector3;
use ndarray::Array1;
use num::complex::Complex64;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use crate::{
    adc::Adc,
    antenna::{create_beam_pattern, BeamShape},
    config::RadarConfig,
    error::{check_index, RadarError, Result},
    helper::{
        power_to_amplitude, round_trip_time, time_to_range, wavelength, BOLTZMANN_CONSTANT,
        NOISE_TEMPERATURE,
    },
    helper_traits::SphericalFunction,
    scene::TargetCollection,
    signal::{
        approx::{ComplexApproxFunction, DoubleApproxFunction},
        filter::{create_bandpass_filter, BandpassFilter},
        fourier::{transform, Direction},
        SampledDomain,
    },
};

use self::{
    noise::NoiseModel,
    pulse_data::PulseData,
    state::{PulseCarry, RadarState},
};

pub mod noise;
pub mod pulse_data;
pub mod state;

// Echoes from further away than this are never received.
pub const MAX_SIM_DISTANCE: f64 = 150_000.; // m

// An echo spreads over the bins from its first bin - SPREAD_BEFORE to its first bin + SPREAD_AFTER.
const SPREAD_BEFORE: i64 = 3;
const SPREAD_AFTER: i64 = 4;

const PULSE_SPECTRUM_SAMPLES: usize = 1000;
const FILTERED_PULSE_SAMPLES: usize = 1000;

pub fn range_equation(
    power_xmtd: f64,
    range: f64,
    xmtr_gain: f64,
    rcvr_gain: f64,
    signature: f64,
    freq: f64,
) -> f64 {
    let wavelength = wavelength(freq);
    let effective_aperture = rcvr_gain * wavelength.powi(2) / (4. * PI);
    let density_at_tgt = power_xmtd * xmtr_gain / (4. * PI * range * range);
    let reflected_power = signature * density_at_tgt;
    let density_at_rcvr = reflected_power / (4. * PI * range * range);

    effective_aperture * density_at_rcvr
}

/*
The receiver sees the emitted rectangular pulse s(t) through its bandpass filter H(f). The filtered
pulse is s₀(t) = F⁻¹[S(f)·H(f)](t), with S = F[s]. Both transforms are evaluated by quadrature:
S on 1000 frequencies across ±3/pulse_width (the main lobe and two side lobes of the sinc), s₀ on
1000 times across [-2, 3) pulse widths so the filter's ringing on either side is kept.
*/
fn compute_filtered_pulse(
    emitted: &DoubleApproxFunction,
    pulse_width: f64,
    bandwidth: f64,
) -> Result<ComplexApproxFunction> {
    let f_min = -3. / pulse_width;
    let f_max = 3. / pulse_width;
    let frequencies: Array1<f64> =
        SampledDomain::from_sample_count(f_min, f_max, PULSE_SPECTRUM_SAMPLES)?.into();
    let df = frequencies[1] - frequencies[0];

    let spectrum = transform(
        emitted,
        &frequencies,
        pulse_width * 1e-3,
        0.,
        pulse_width,
        Direction::Forward,
    )?;
    let response = create_bandpass_filter(BandpassFilter::Standard, bandwidth)?
        .eval_many(&frequencies);
    let modulated = ComplexApproxFunction::new(frequencies, spectrum * response)?;

    let times: Array1<f64> = SampledDomain::from_sample_count(
        -2. * pulse_width,
        3. * pulse_width,
        FILTERED_PULSE_SAMPLES,
    )?
    .into();
    let values = transform(&modulated, &times, df, f_min, f_max, Direction::Inverse)?;
    ComplexApproxFunction::new(times, values)
}

// In-phase and quadrature amplitude per range bin.
struct Quadrature {
    i: Array1<f64>,
    q: Array1<f64>,
}

impl Quadrature {
    fn zeros(len: usize) -> Quadrature {
        Quadrature {
            i: Array1::zeros(len),
            q: Array1::zeros(len),
        }
    }

    fn add(&mut self, bin: usize, amplitude: Complex64) {
        self.i[bin] += amplitude.re;
        self.q[bin] += amplitude.im;
    }
}

/**
A pulsed monostatic radar with a rotating antenna.

Each call to [Radar::generate_pulse_data] emits one pulse at the current time and boresight,
collects echoes from the targets and the receiver noise into range bins, digitizes them, and
moves on by one PRT. The boresight angle at time t is θ₀ + ω·t.

Positions are relative to the radar in m. Angles are counter-clockwise from the x axis in rad.
*/
pub struct Radar {
    config: RadarConfig,

    peak_power: f64,     // W
    antennae_gain: f64,  // linear
    frequency: f64,      // Hz
    wavelength: f64,     // m
    pulse_width: f64,    // s
    prt: f64,            // s
    sampling_time: f64,  // s
    duplexer_switch_time: f64, // s
    max_receive_time: f64,     // s
    min_receive_time: f64,     // s
    max_sim_receive_time: f64, // s
    num_range_bins: usize,
    range_bin: f64,          // m
    minimum_range: f64,      // m
    instrumented_range: f64, // m
    unambiguous_range: f64,  // m
    avg_noise: f64,          // W

    ant_rot_speed: f64,  // rad/s
    init_hor_theta: f64, // rad

    adc: Adc,
    beam_shape: BeamShape,
    emitted_pulse: DoubleApproxFunction,
    filtered_pulse: ComplexApproxFunction,
    // |filtered_pulse|, what an echo's amplitude is shaped by
    filtered_envelope: DoubleApproxFunction,

    add_noise: bool,
    add_target: bool,
    use_pdf: bool,
    use_filtered_pulse: bool,

    state: RadarState,
    rng: ChaCha8Rng,
}

impl Radar {
    pub fn new(config: &RadarConfig) -> Result<Radar> {
        config.assert_parameters_set()?;

        let peak_power = config.peak_power()?;
        let frequency = config.frequency()?;
        let pulse_width = config.pulse_width()?;
        let prt = config.prt()?;
        let sampling_time = config.sampling_time()?;
        let duplexer_switch_time = config.duplexer_switch_time()?;
        let max_receive_time = config.max_receive_time()?;
        let bandwidth = config.bandwidth()?;

        let min_receive_time = duplexer_switch_time + pulse_width;
        let num_range_bins = ((max_receive_time - min_receive_time) / sampling_time).floor() as usize;
        let range_bin = time_to_range(sampling_time);
        let minimum_range = time_to_range(min_receive_time);
        let avg_noise = config.noise_figure()? * BOLTZMANN_CONSTANT * NOISE_TEMPERATURE * bandwidth;

        let adc_max2noise = config.adc_max2noise().unwrap_or(0.);
        let adc = Adc::new(
            config.adc_resolution()?,
            config.adc_mode()?,
            config.adc_min2noise()? * avg_noise,
            adc_max2noise * avg_noise,
        )?;

        let beam_shape = BeamShape {
            horizontal: create_beam_pattern(config.horizontal_beam_shape(), config.az_beamwidth()?)?,
            elevation: create_beam_pattern(config.elevation_beam_shape(), config.el_beamwidth()?)?,
        };

        let emitted_pulse = DoubleApproxFunction::new(vec![0., pulse_width], vec![1., 1.])?;
        let filtered_pulse = compute_filtered_pulse(&emitted_pulse, pulse_width, bandwidth)?;
        let filtered_envelope = DoubleApproxFunction::new(
            filtered_pulse.entries(),
            filtered_pulse.values().mapv(|v| v.norm()),
        )?;

        let init_hor_theta = config.theta();

        let radar = Radar {
            config: config.clone(),
            peak_power,
            antennae_gain: config.antennae_gain()?,
            frequency,
            wavelength: wavelength(frequency),
            pulse_width,
            prt,
            sampling_time,
            duplexer_switch_time,
            max_receive_time,
            min_receive_time,
            max_sim_receive_time: round_trip_time(MAX_SIM_DISTANCE),
            num_range_bins,
            range_bin,
            minimum_range,
            instrumented_range: minimum_range + num_range_bins as f64 * range_bin,
            unambiguous_range: time_to_range(prt),
            avg_noise,
            ant_rot_speed: config.ant_rot_speed(),
            init_hor_theta,
            adc,
            beam_shape,
            emitted_pulse,
            filtered_pulse,
            filtered_envelope,
            add_noise: true,
            add_target: true,
            use_pdf: true,
            use_filtered_pulse: true,
            state: RadarState::new(0., init_hor_theta),
            rng: ChaCha8Rng::seed_from_u64(rand::random()),
        };

        debug!(
            num_range_bins,
            range_bin,
            minimum_range,
            unambiguous_range = radar.unambiguous_range,
            avg_noise,
            "radar initialised"
        );
        Ok(radar)
    }

    pub fn config(&self) -> &RadarConfig {
        &self.config
    }

    /// Rewinds the simulation to time `t`. Pending far echoes are discarded.
    pub fn reset(&mut self, t: f64) {
        self.state.reset(t, self.theta_at(t));
    }

    fn theta_at(&self, t: f64) -> f64 {
        self.init_hor_theta + self.ant_rot_speed * t
    }

    // Two-way independent antenna gain towards `pos`, given the current boresight.
    fn offset_gain(&self, pos: Vector3<f64>) -> f64 {
        self.beam_shape.lookup_vec(
            pos,
            self.state.boresight(),
            self.state.frame_x(),
            &self.state.frame_y(),
        )
    }

    // W, received power of an echo from `range` had the target been on boresight.
    pub fn radar_equation_power(&self, range: f64, rcs: f64) -> f64 {
        range_equation(
            self.peak_power,
            range,
            self.antennae_gain,
            self.antennae_gain,
            rcs,
            self.frequency,
        )
    }

    // First range bin of an echo arriving `receive_time` after emission. May lie outside the registry.
    fn find_range_bin(&self, receive_time: f64) -> i64 {
        ((receive_time - self.min_receive_time) / self.sampling_time).floor() as i64
    }

    fn pulse_envelope(&self, t: f64) -> f64 {
        if self.use_filtered_pulse {
            self.filtered_envelope.eval(t)
        } else {
            self.emitted_pulse.eval(t)
        }
    }

    // Adds an echo to the bins around its arrival. Returns whether any bin of the registry was hit.
    fn spread_echo(&mut self, signal: &mut Quadrature, receive_time: f64, power: f64) -> bool {
        let first_bin = self.find_range_bin(receive_time);
        let amplitude = power_to_amplitude(power);
        let last = self.num_range_bins as i64 - 1;
        let lo = (first_bin - SPREAD_BEFORE).max(0);
        let hi = (first_bin + SPREAD_AFTER).min(last);

        for n in lo..=hi {
            let phase = if self.use_pdf {
                2. * PI * self.rng.gen::<f64>()
            } else {
                0.
            };
            let t = self.min_receive_time + n as f64 * self.sampling_time - receive_time;
            let bin_amplitude = amplitude * self.pulse_envelope(t);
            signal.add(n as usize, Complex64::from_polar(bin_amplitude, phase));
        }
        lo <= hi
    }

    /**
    Simulates one pulse emitted at the current time.

    `signal_override` replaces the radar equation: every target then returns this power in W when
    on boresight. Echoes arriving after the next pulse has been emitted are held back and received
    during the pulse in which they arrive.

    On error the radar state, random generator included, is left unchanged.
    */
    pub fn generate_pulse_data(
        &mut self,
        targets: &TargetCollection,
        signal_override: Option<f64>,
    ) -> Result<PulseData> {
        if let Some(power) = signal_override {
            if !(power >= 0. && power.is_finite()) {
                return Err(RadarError::domain(format!(
                    "signal override must be a non-negative power, got {}",
                    power
                )));
            }
        }

        let time = self.state.time();
        let echoes = if self.add_target {
            targets
                .iter()
                .map(|target| {
                    let pos = target.position(time);
                    if pos.iter().all(|x| x.is_finite()) {
                        Ok((pos, target.rcs()))
                    } else {
                        Err(RadarError::invalid(format!(
                            "target position {:?} at t = {} s is not finite",
                            pos, time
                        )))
                    }
                })
                .collect::<Result<Vec<_>>>()?
        } else {
            Vec::new()
        };

        let rng = self.rng.clone();
        let pulse = self.simulate_pulse(&echoes, signal_override);
        if pulse.is_err() {
            self.rng = rng;
        }
        pulse
    }

    // Target positions are already validated. Only the random generator is touched before success.
    fn simulate_pulse(
        &mut self,
        echoes: &[(Vector3<f64>, f64)],
        signal_override: Option<f64>,
    ) -> Result<PulseData> {
        let time = self.state.time();
        let mut signal = Quadrature::zeros(self.num_range_bins);
        let mut carry = Vec::with_capacity(self.state.carry_size());
        let mut landed = false;

        if self.add_target {
            for echo in self.state.carry().to_vec() {
                if echo.time < self.prt {
                    let power = echo.power * self.offset_gain(echo.pos);
                    landed |= self.spread_echo(&mut signal, echo.time, power);
                } else {
                    carry.push(PulseCarry {
                        time: echo.time - self.prt,
                        ..echo
                    });
                }
            }

            for &(pos, rcs) in echoes {
                let range = pos.norm();
                let boresight_power = match signal_override {
                    Some(power) => power,
                    None => self.radar_equation_power(range, rcs),
                };
                let transmit_power = boresight_power * self.offset_gain(pos);
                let receive_time = round_trip_time(range);

                if receive_time > self.prt {
                    if receive_time <= self.max_sim_receive_time {
                        carry.push(PulseCarry {
                            time: receive_time - self.prt,
                            power: transmit_power,
                            pos,
                        });
                    } else {
                        trace!(range, "echo beyond simulated distance dropped");
                    }
                } else {
                    let power = transmit_power * self.offset_gain(pos);
                    landed |= self.spread_echo(&mut signal, receive_time, power);
                }
            }
        } else {
            carry = self.state.carry().to_vec();
        }

        let noise = if self.add_noise {
            Some(NoiseModel::from_use_pdf(self.use_pdf))
        } else {
            None
        };
        let mut registry = Array1::zeros(self.num_range_bins);
        for n in 0..self.num_range_bins {
            let noise_amplitude = match noise {
                Some(model) => power_to_amplitude(model.power(self.avg_noise, &mut self.rng)),
                None => 0.,
            };
            let amp_i = noise_amplitude + signal.i[n];
            let amp_q = signal.q[n];
            registry[n] = self.adc.convert(amp_i * amp_i + amp_q * amp_q)?;
        }

        let has_original_data = landed || (noise.is_some() && self.num_range_bins > 0);
        let pulse = PulseData::new(time, *self.state.boresight(), registry, has_original_data);

        trace!(
            time,
            theta = self.state.theta(),
            carry = carry.len(),
            "pulse generated"
        );
        let next = time + self.prt;
        self.state.advance(next, self.theta_at(next), carry);
        Ok(pulse)
    }

    pub fn minimum_range(&self) -> f64 {
        self.minimum_range
    }

    pub fn instrumented_range(&self) -> f64 {
        self.instrumented_range
    }

    pub fn range_bin(&self) -> f64 {
        self.range_bin
    }

    pub fn unambiguous_range(&self) -> f64 {
        self.unambiguous_range
    }

    /// m, range at the start of bin `bin_index`.
    pub fn get_range(&self, bin_index: usize) -> Result<f64> {
        check_index(bin_index, self.num_range_bins)?;
        Ok(self.minimum_range + bin_index as f64 * self.range_bin)
    }

    pub fn num_range_bins(&self) -> usize {
        self.num_range_bins
    }

    pub fn sampling_time(&self) -> f64 {
        self.sampling_time
    }

    pub fn minimum_receive_time(&self) -> f64 {
        self.min_receive_time
    }

    pub fn max_receive_time(&self) -> f64 {
        self.max_receive_time
    }

    pub fn avg_noise(&self) -> f64 {
        self.avg_noise
    }

    pub fn peak_power(&self) -> f64 {
        self.peak_power
    }

    pub fn pulse_width(&self) -> f64 {
        self.pulse_width
    }

    pub fn prt(&self) -> f64 {
        self.prt
    }

    pub fn duplexer_switch_time(&self) -> f64 {
        self.duplexer_switch_time
    }

    pub fn wavelength(&self) -> f64 {
        self.wavelength
    }

    /// Time domain response of the receiver to the emitted pulse.
    pub fn get_filtered_pulse(&self) -> ComplexApproxFunction {
        self.filtered_pulse.clone()
    }

    pub fn get_horizontal_beam_shape(&self) -> DoubleApproxFunction {
        self.beam_shape.horizontal.clone()
    }

    pub fn get_elevation_beam_shape(&self) -> DoubleApproxFunction {
        self.beam_shape.elevation.clone()
    }

    pub fn get_adc(&self) -> Adc {
        self.adc.clone()
    }

    pub fn current_time(&self) -> f64 {
        self.state.time()
    }

    pub fn current_theta(&self) -> f64 {
        self.state.theta()
    }

    pub fn current_boresight(&self) -> Vector3<f64> {
        *self.state.boresight()
    }

    pub fn current_carry_size(&self) -> usize {
        self.state.carry_size()
    }

    pub fn add_noise(&self) -> bool {
        self.add_noise
    }

    pub fn set_add_noise(&mut self, set: bool) {
        self.add_noise = set;
    }

    pub fn add_target(&self) -> bool {
        self.add_target
    }

    pub fn set_add_target(&mut self, set: bool) {
        self.add_target = set;
    }

    pub fn use_pdf(&self) -> bool {
        self.use_pdf
    }

    // Random echo phases and noise when set, zero phase and mean noise otherwise.
    pub fn set_use_pdf(&mut self, set: bool) {
        self.use_pdf = set;
    }

    pub fn use_filtered_pulse(&self) -> bool {
        self.use_filtered_pulse
    }

    pub fn set_use_filtered_pulse(&mut self, set: bool) {
        self.use_filtered_pulse = set;
    }

    pub fn ant_rot_speed(&self) -> f64 {
        self.ant_rot_speed
    }

    // rad/s, counter-clockwise. Applies from the next pulse on.
    pub fn set_ant_rot_speed(&mut self, w: f64) -> Result<()> {
        if !w.is_finite() {
            return Err(RadarError::domain("antenna rotation speed must be finite"));
        }
        self.ant_rot_speed = w;
        Ok(())
    }

    pub fn initial_hor_theta(&self) -> f64 {
        self.init_hor_theta
    }

    // rad. Applies from the next reset on.
    pub fn set_initial_hor_theta(&mut self, theta: f64) -> Result<()> {
        if !theta.is_finite() {
            return Err(RadarError::domain("initial boresight angle must be finite"));
        }
        self.init_hor_theta = theta;
        Ok(())
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }
}
