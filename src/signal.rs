use ndarray::Array1;
use num::complex::Complex64;

use self::{approx::ApproxFunction, scalar::Scalar};
use crate::error::{RadarError, Result};

pub mod approx;
pub mod filter;
pub mod fourier;
pub mod scalar;

pub trait Signal {
    type Valued: Scalar;
    fn generate(&self, t: f64) -> Self::Valued;

    fn generate_signal(&self, domain: &SampledDomain) -> Array1<Self::Valued> {
        domain.iter().map(|t| self.generate(t)).collect()
    }
}

impl Signal for ApproxFunction<f64> {
    type Valued = f64;

    fn generate(&self, t: f64) -> Self::Valued {
        self.eval(t)
    }
}

impl Signal for ApproxFunction<Complex64> {
    type Valued = Complex64;

    fn generate(&self, t: f64) -> Self::Valued {
        self.eval(t)
    }
}

/// Adapts a plain closure into a [Signal].
pub struct FnSignal<F>(pub F);

impl<F, T> Signal for FnSignal<F>
where
    F: Fn(f64) -> T,
    T: Scalar,
{
    type Valued = T;

    fn generate(&self, t: f64) -> Self::Valued {
        (self.0)(t)
    }
}

// Represents a time or frequency interval, sampled at a fixed interval.
// Sample n sits at start + n * interval, for n < samples.
#[derive(Clone, Debug)]
pub struct SampledDomain {
    start: f64,
    interval: f64,
    samples: usize,
}

impl SampledDomain {
    pub fn from_sample_interval(start: f64, interval: f64, num: usize) -> SampledDomain {
        SampledDomain {
            start,
            interval,
            samples: num,
        }
    }

    // `num` samples covering [start, end), the end point excluded.
    pub fn from_sample_count(start: f64, end: f64, num: usize) -> Result<SampledDomain> {
        if !(start.is_finite() && end.is_finite()) || end < start || num == 0 {
            return Err(RadarError::domain(format!(
                "cannot take {} samples of [{}, {})",
                num, start, end
            )));
        }
        Ok(Self::from_sample_interval(start, (end - start) / num as f64, num))
    }

    // `num` samples covering [start, end], both end points included.
    pub fn inclusive(start: f64, end: f64, num: usize) -> Result<SampledDomain> {
        if !(start.is_finite() && end.is_finite()) || end < start || num < 2 {
            return Err(RadarError::domain(format!(
                "cannot take {} samples of [{}, {}]",
                num, start, end
            )));
        }
        Ok(Self::from_sample_interval(
            start,
            (end - start) / (num - 1) as f64,
            num,
        ))
    }

    // Every sample of the half-open interval [start, end) at spacing `interval`.
    pub fn covering(start: f64, end: f64, interval: f64) -> SampledDomain {
        let mut num = ((end - start) / interval).ceil().max(0.) as usize;
        while num > 0 && start + (num - 1) as f64 * interval >= end {
            num -= 1;
        }
        Self::from_sample_interval(start, interval, num)
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.start + self.interval * self.samples as f64
    }

    pub fn sample_count(&self) -> usize {
        self.samples
    }

    pub fn sample_interval(&self) -> f64 {
        self.interval
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> {
        let (start, interval) = (self.start, self.interval);
        (0..self.samples).map(move |n| start + n as f64 * interval)
    }
}

impl From<SampledDomain> for Array1<f64> {
    fn from(domain: SampledDomain) -> Self {
        domain.iter().collect()
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use super::{FnSignal, SampledDomain, Signal};
    use crate::error::RadarError;

    #[test]
    fn covering_excludes_end() {
        let domain = SampledDomain::covering(0., 1., 0.25);
        assert_eq!(domain.sample_count(), 4);
        assert_relative_eq!(domain.iter().last().unwrap(), 0.75);

        let domain = SampledDomain::covering(-3., 3., 4e-4);
        assert_eq!(domain.sample_count(), 15000);
    }

    #[test]
    fn inclusive_hits_both_ends() {
        let domain = SampledDomain::inclusive(-2., 2., 5).unwrap();
        let samples: Vec<f64> = domain.iter().collect();
        assert_eq!(samples, vec![-2., -1., 0., 1., 2.]);
    }

    #[test]
    fn closure_signal() {
        let signal = FnSignal(|t: f64| 2. * t);
        let samples = signal.generate_signal(&SampledDomain::from_sample_count(0., 1., 4).unwrap());
        assert_relative_eq!(samples[3], 1.5);
    }

    #[test]
    fn rejects_bad_sampling() {
        assert!(matches!(
            SampledDomain::inclusive(1., -1., 5),
            Err(RadarError::DomainError(_))
        ));
        assert!(SampledDomain::inclusive(0., 1., 1).is_err());
        assert!(SampledDomain::from_sample_count(0., f64::NAN, 4).is_err());
        assert!(SampledDomain::from_sample_count(0., 1., 0).is_err());
    }
}
