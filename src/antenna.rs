use crate::{
    error::{require_positive, Result},
    helper_traits::SphericalFunction,
    signal::{approx::DoubleApproxFunction, SampledDomain},
};

// Odd, so that boresight (0 rad) is a table entry.
const GAUSSIAN_PATTERN_ENTRIES: usize = 1001;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BeamPattern {
    Triangular,
    Gaussian,
}

// Gain 1 on boresight falling linearly to 0 at ±beamwidth.
fn triangular(beamwidth: f64) -> Result<DoubleApproxFunction> {
    DoubleApproxFunction::new(vec![-beamwidth, 0., beamwidth], vec![0., 1., 0.])
}

// exp(-kθ²) with k chosen so that the gain is exactly one half at θ = ±beamwidth/2.
fn gaussian(beamwidth: f64) -> Result<DoubleApproxFunction> {
    let k = 4. * 2f64.ln() / (beamwidth * beamwidth);
    let angles = SampledDomain::inclusive(-2. * beamwidth, 2. * beamwidth, GAUSSIAN_PATTERN_ENTRIES)?;
    DoubleApproxFunction::from_fn(angles, |theta| (-k * theta * theta).exp())
}

/// One-way power gain relative to boresight as a function of angular offset. `beamwidth` in rad.
pub fn create_beam_pattern(kind: BeamPattern, beamwidth: f64) -> Result<DoubleApproxFunction> {
    require_positive("beamwidth", beamwidth)?;
    match kind {
        BeamPattern::Triangular => triangular(beamwidth),
        BeamPattern::Gaussian => gaussian(beamwidth),
    }
}

// Separable antenna pattern: the gain is the product of a horizontal and an elevation pattern.
#[derive(Clone, Debug)]
pub struct BeamShape {
    pub horizontal: DoubleApproxFunction,
    pub elevation: DoubleApproxFunction,
}

impl SphericalFunction for BeamShape {
    fn lookup(&self, az: f64, el: f64) -> f64 {
        self.horizontal.eval(az) * self.elevation.eval(el)
    }
}
