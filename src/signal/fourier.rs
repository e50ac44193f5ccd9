use std::f64::consts::PI;

use ndarray::Array1;
use num::complex::Complex64;
use rustfft::FftPlanner;

use crate::error::{require_positive, RadarError, Result};

use super::{
    approx::ComplexApproxFunction,
    scalar::Scalar,
    SampledDomain, Signal,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    // F(p) = ∫ f(t) exp(-2πipt) dt
    Forward,
    // F(p) = ∫ f(t) exp(+2πipt) dt
    Inverse,
}

impl Direction {
    fn sign(self) -> f64 {
        match self {
            Direction::Forward => -1.,
            Direction::Inverse => 1.,
        }
    }
}

fn integration_domain(step: f64, lower: f64, upper: f64) -> Result<SampledDomain> {
    require_positive("integration step", step)?;
    if !(lower.is_finite() && upper.is_finite()) || upper <= lower {
        return Err(RadarError::domain(format!(
            "integration bounds must satisfy lower < upper, got [{}, {}]",
            lower, upper
        )));
    }
    Ok(SampledDomain::covering(lower, upper, step))
}

fn integrate(
    samples: &[(f64, Complex64)],
    point: f64,
    step: f64,
    direction: Direction,
) -> Complex64 {
    let k = direction.sign() * 2. * PI * point;
    let sum: Complex64 = samples
        .iter()
        .map(|(t, x)| x * Complex64::from_polar(1., k * t))
        .sum();
    sum * step
}

fn sample<S: Signal + ?Sized>(signal: &S, domain: &SampledDomain) -> Vec<(f64, Complex64)> {
    domain
        .iter()
        .map(|t| (t, signal.generate(t).to_complex()))
        .collect()
}

/**
Numerically evaluates the Fourier transform of `signal` at a single point.

The integral over [lower, upper) is approximated by a left Riemann sum with spacing `step`, so the
accuracy is governed by `step` and by how well [lower, upper) covers the support of the signal.
*/
pub fn transform_single<S: Signal + ?Sized>(
    signal: &S,
    point: f64,
    step: f64,
    lower: f64,
    upper: f64,
    direction: Direction,
) -> Result<Complex64> {
    let domain = integration_domain(step, lower, upper)?;
    let samples = sample(signal, &domain);
    Ok(integrate(&samples, point, step, direction))
}

/// Evaluates the transform at each of `points`. The signal is sampled once and reused.
pub fn transform<S: Signal + ?Sized>(
    signal: &S,
    points: &Array1<f64>,
    step: f64,
    lower: f64,
    upper: f64,
    direction: Direction,
) -> Result<Array1<Complex64>> {
    let domain = integration_domain(step, lower, upper)?;
    let samples = sample(signal, &domain);
    Ok(points.mapv(|p| integrate(&samples, p, step, direction)))
}

/// As [transform], packaged as a tabulated function over `points`, which must be strictly increasing.
pub fn transform_table<S: Signal + ?Sized>(
    signal: &S,
    points: Array1<f64>,
    step: f64,
    lower: f64,
    upper: f64,
    direction: Direction,
) -> Result<ComplexApproxFunction> {
    let values = transform(signal, &points, step, lower, upper, direction)?;
    ComplexApproxFunction::new(points, values)
}

/**
Evaluates the same Riemann sum as [transform] on the natural grid of the sampling,
p_k = k / (N * step) for k < N, using an FFT.

With t_n = lower + n * step, the sum factors as
  step * exp(∓2πi p_k lower) * Σ x_n exp(∓2πi k n / N),
where the remaining sum is exactly an unnormalized DFT.
*/
pub fn transform_uniform<S: Signal + ?Sized>(
    signal: &S,
    step: f64,
    lower: f64,
    upper: f64,
    direction: Direction,
) -> Result<ComplexApproxFunction> {
    let domain = integration_domain(step, lower, upper)?;
    let n = domain.sample_count();
    if n < 2 {
        return Err(RadarError::domain(
            "uniform transform needs at least two samples",
        ));
    }

    let mut buffer: Vec<Complex64> = sample(signal, &domain).into_iter().map(|s| s.1).collect();
    let mut planner = FftPlanner::new();
    let fft = match direction {
        Direction::Forward => planner.plan_fft_forward(n),
        Direction::Inverse => planner.plan_fft_inverse(n),
    };
    fft.process(&mut buffer);

    let frequencies = SampledDomain::from_sample_interval(0., 1. / (n as f64 * step), n);
    let sign = direction.sign();
    let values: Array1<Complex64> = frequencies
        .iter()
        .zip(buffer.into_iter())
        .map(|(p, x)| x * Complex64::from_polar(step, sign * 2. * PI * p * lower))
        .collect();

    ComplexApproxFunction::new(Array1::from(frequencies), values)
}

#[cfg(test)]
mod test {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;
    use ndarray::array;
    use num::complex::Complex64;

    use crate::{
        error::RadarError,
        signal::{approx::DoubleApproxFunction, FnSignal},
    };

    use super::{transform, transform_single, transform_table, transform_uniform, Direction};

    fn gauss(t: f64) -> f64 {
        (-t * t).exp()
    }

    // Unit area pulse of width 2e-3 centred on 0.5.
    fn narrow_pulse() -> DoubleApproxFunction {
        let width = 1e-3;
        DoubleApproxFunction::new(
            vec![0.5 - width - 1e-9, 0.5 - width, 0.5 + width, 0.5 + width + 1e-9],
            vec![0., 0.5 / width, 0.5 / width, 0.],
        )
        .unwrap()
    }

    fn assert_complex_close(a: Complex64, b: Complex64, tol: f64) {
        assert!((a - b).norm() < tol, "{} differs from {}", a, b);
    }

    #[test]
    fn gaussian_transform() {
        let g = FnSignal(gauss);
        let f0 = transform_single(&g, 0., 4e-4, -3., 3., Direction::Forward).unwrap();
        assert_complex_close(f0, Complex64::new(PI.sqrt(), 0.), 1e-3);

        let points = array![-0.5, 0.0, 0.5];
        let values = transform(&g, &points, 4e-4, -3., 3., Direction::Forward).unwrap();
        for (p, v) in points.iter().zip(values.iter()) {
            let expected = PI.sqrt() * (-PI * PI * p * p).exp();
            assert_complex_close(*v, Complex64::new(expected, 0.), 1e-3);
        }
    }

    #[test]
    fn gaussian_table_interpolates() {
        let g = FnSignal(gauss);
        let points = ndarray::Array1::linspace(-1., 1., 201);
        let table = transform_table(&g, points, 1e-3, -4., 4., Direction::Forward).unwrap();
        let expected = PI.sqrt() * (-0.25 * PI * PI).exp();
        assert_complex_close(table.eval(0.499999), Complex64::new(expected, 0.), 2e-3);
    }

    #[test]
    fn narrow_pulse_phase() {
        let pulse = narrow_pulse();
        let at_zero = transform_single(&pulse, 0., 1e-5, -3., 3., Direction::Forward).unwrap();
        assert_complex_close(at_zero, Complex64::new(1., 0.), 1e-2);

        let forward = transform_single(&pulse, 0.5, 1e-5, -3., 3., Direction::Forward).unwrap();
        assert_complex_close(forward, Complex64::new(0., -1.), 1e-2);

        let inverse = transform_single(&pulse, 0.5, 1e-5, -3., 3., Direction::Inverse).unwrap();
        assert_complex_close(inverse, Complex64::new(0., 1.), 1e-2);

        for f in [-2., -0.7, 1.3] {
            let value = transform_single(&pulse, f, 1e-5, 0., 1., Direction::Forward).unwrap();
            assert_relative_eq!(value.norm(), 1., epsilon = 1e-2);
            assert_complex_close(value, Complex64::from_polar(1., -PI * f), 1e-2);
        }
    }

    #[test]
    fn forward_then_inverse_recovers_gaussian() {
        let g = FnSignal(gauss);
        let spectrum = transform_table(
            &g,
            ndarray::Array1::linspace(-3., 3., 1201),
            2e-3,
            -4.,
            4.,
            Direction::Forward,
        )
        .unwrap();
        for t in [0., 0.3, -0.8] {
            let back = transform_single(&spectrum, t, 5e-3, -3., 3., Direction::Inverse).unwrap();
            assert_complex_close(back, Complex64::new(gauss(t), 0.), 1e-3);
        }
    }

    #[test]
    fn uniform_grid_matches_quadrature() {
        let g = FnSignal(|t: f64| gauss(t - 0.3));
        let uniform = transform_uniform(&g, 0.01, -3., 3., Direction::Forward).unwrap();
        let entries = uniform.entries();
        let values = uniform.values();
        for k in [0usize, 1, 7, 40] {
            let direct =
                transform_single(&g, entries[k], 0.01, -3., 3., Direction::Forward).unwrap();
            assert_complex_close(values[k], direct, 1e-9);
        }

        let inverse = transform_uniform(&g, 0.01, -3., 3., Direction::Inverse).unwrap();
        let p = inverse.entries()[3];
        let direct = transform_single(&g, p, 0.01, -3., 3., Direction::Inverse).unwrap();
        assert_complex_close(inverse.values()[3], direct, 1e-9);
    }

    #[test]
    fn rejects_bad_quadrature() {
        let g = FnSignal(gauss);
        assert!(matches!(
            transform_single(&g, 0., 0., -1., 1., Direction::Forward),
            Err(RadarError::DomainError(_))
        ));
        assert!(matches!(
            transform_single(&g, 0., 1e-3, 1., -1., Direction::Forward),
            Err(RadarError::DomainError(_))
        ));
    }
}
