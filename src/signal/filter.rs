use std::f64::consts::PI;

use num::complex::Complex64;

use crate::error::{require_positive, Result};

use super::{approx::ComplexApproxFunction, SampledDomain};

const STANDARD_FILTER_ENTRIES: usize = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BandpassFilter {
    // Flat top with raised cosine skirts, |H| = 0.5 at ±bandwidth/2
    Standard,
    // Hard cutoff at ±bandwidth/2
    Rectangular,
}

/**
Raised cosine taper with a flat top on |f| < bandwidth/4 and skirts that fall to zero at
|f| = 3·bandwidth/4. This is the frequency domain counterpart of a Tukey window with α = 1/2
over [-3B/4, 3B/4].
*/
fn raised_cosine(f: f64, bandwidth: f64) -> f64 {
    let f_abs = f.abs();
    let flat_edge = 0.25 * bandwidth;
    let stop_edge = 0.75 * bandwidth;
    if f_abs < flat_edge {
        1.
    } else if f_abs < stop_edge {
        0.5 * (1. - (PI * (f_abs - stop_edge) / (0.5 * bandwidth)).cos())
    } else {
        0.
    }
}

fn standard(bandwidth: f64) -> Result<ComplexApproxFunction> {
    let frequencies = SampledDomain::inclusive(-bandwidth, bandwidth, STANDARD_FILTER_ENTRIES)?;
    ComplexApproxFunction::from_fn(frequencies, |f| {
        Complex64::new(raised_cosine(f, bandwidth), 0.)
    })
}

fn rectangular(bandwidth: f64) -> Result<ComplexApproxFunction> {
    let one = Complex64::new(1., 0.);
    ComplexApproxFunction::new(vec![-0.5 * bandwidth, 0.5 * bandwidth], vec![one, one])
}

/// Frequency response H(f) of a receiver bandpass filter centred on 0 Hz. `bandwidth` in Hz.
pub fn create_bandpass_filter(kind: BandpassFilter, bandwidth: f64) -> Result<ComplexApproxFunction> {
    require_positive("filter bandwidth", bandwidth)?;
    match kind {
        BandpassFilter::Standard => standard(bandwidth),
        BandpassFilter::Rectangular => rectangular(bandwidth),
    }
}
