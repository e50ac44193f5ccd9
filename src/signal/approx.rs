use std::{
    fmt::Debug,
    ops::{Add, Mul},
};

use nalgebra::Vector3;
use ndarray::Array1;
use num::complex::Complex64;

use crate::error::{RadarError, Result};

/// Values that can be stored in an [ApproxFunction] and linearly interpolated.
/// Interpolation acts component-wise: real and imaginary parts of complex values and each of the
/// three components of a vector are interpolated independently.
pub trait TableValue: Copy + Debug + Add<Self, Output = Self> + Mul<f64, Output = Self> {
    fn zero() -> Self;
}

impl TableValue for f64 {
    fn zero() -> Self {
        0.
    }
}

impl TableValue for Complex64 {
    fn zero() -> Self {
        Complex64::new(0., 0.)
    }
}

impl TableValue for Vector3<f64> {
    fn zero() -> Self {
        Vector3::zeros()
    }
}

/**
A function of one real parameter given by a table of (entry, value) pairs.

Between two neighbouring entries the function is linear. At or below the first entry the function
returns the below-range value, at or above the last entry it returns the above-range value.
Both default to zero.

Example:
```rust
use radsim::signal::approx::DoubleApproxFunction;

let f = DoubleApproxFunction::new(vec![0., 2., 4.], vec![-2., 2., 6.]).unwrap();
assert_eq!(f.eval(1.), 0.);
assert_eq!(f.eval(3.), 4.);
assert_eq!(f.eval(5.), 0.);
```
*/
#[derive(Clone, Debug, PartialEq)]
pub struct ApproxFunction<T: TableValue> {
    // Strictly increasing. Same length as values.
    entries: Array1<f64>,
    values: Array1<T>,
    below: T,
    above: T,
}

pub type DoubleApproxFunction = ApproxFunction<f64>;
pub type ComplexApproxFunction = ApproxFunction<Complex64>;
pub type VectorApproxFunction = ApproxFunction<Vector3<f64>>;

impl<T: TableValue> ApproxFunction<T> {
    pub fn new(
        entries: impl Into<Array1<f64>>,
        values: impl Into<Array1<T>>,
    ) -> Result<ApproxFunction<T>> {
        Self::with_extrapolation(entries, values, T::zero(), T::zero())
    }

    pub fn with_extrapolation(
        entries: impl Into<Array1<f64>>,
        values: impl Into<Array1<T>>,
        below: T,
        above: T,
    ) -> Result<ApproxFunction<T>> {
        let entries = entries.into();
        let values = values.into();

        if entries.len() != values.len() {
            return Err(RadarError::invalid(format!(
                "entry and value tables differ in length ({} vs {})",
                entries.len(),
                values.len()
            )));
        }
        if entries.len() < 2 {
            return Err(RadarError::invalid(
                "a tabulated function needs at least two entries",
            ));
        }
        if entries.iter().any(|e| !e.is_finite()) {
            return Err(RadarError::invalid("table entries must be finite"));
        }
        if entries.windows(2).into_iter().any(|w| w[1] <= w[0]) {
            return Err(RadarError::invalid(
                "table entries must be strictly increasing",
            ));
        }

        Ok(ApproxFunction {
            entries,
            values,
            below,
            above,
        })
    }

    /// Tabulates `f` at each of `entries`.
    pub fn from_fn(
        entries: impl Into<Array1<f64>>,
        f: impl Fn(f64) -> T,
    ) -> Result<ApproxFunction<T>> {
        let entries = entries.into();
        let values = entries.mapv(f);
        Self::new(entries, values)
    }

    pub fn eval(&self, x: f64) -> T {
        let last = self.entries.len() - 1;
        if x <= self.entries[0] {
            return self.below;
        }
        if x >= self.entries[last] {
            return self.above;
        }

        // Invariant: entries[lo] < x < entries[hi]
        let (mut lo, mut hi) = (0, last);
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if self.entries[mid] <= x {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        let w = (x - self.entries[lo]) / (self.entries[hi] - self.entries[lo]);
        self.values[lo] * (1. - w) + self.values[hi] * w
    }

    pub fn eval_many(&self, xs: &Array1<f64>) -> Array1<T> {
        xs.mapv(|x| self.eval(x))
    }

    pub fn entries(&self) -> Array1<f64> {
        self.entries.clone()
    }

    pub fn values(&self) -> Array1<T> {
        self.values.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // Tables always hold at least two entries.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// First and last entry.
    pub fn domain(&self) -> (f64, f64) {
        (self.entries[0], self.entries[self.entries.len() - 1])
    }

    pub fn below_value(&self) -> T {
        self.below
    }

    pub fn above_value(&self) -> T {
        self.above
    }
}
