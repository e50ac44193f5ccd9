use std::fmt::Debug;

use num::complex::Complex64;

// Scalar values a signal can take. Both are integrable against a complex exponential.
pub trait Scalar: Copy + Debug {
    fn norm(&self) -> f64;
    fn to_complex(&self) -> Complex64;
}

impl Scalar for f64 {
    fn norm(&self) -> f64 {
        self.abs()
    }

    fn to_complex(&self) -> Complex64 {
        Complex64::new(*self, 0.)
    }
}

impl Scalar for Complex64 {
    fn norm(&self) -> f64 {
        Complex64::norm(*self)
    }

    fn to_complex(&self) -> Complex64 {
        *self
    }
}

#[cfg(test)]
mod test {
    use num::complex::Complex64;

    use super::Scalar;

    #[test]
    fn real_and_complex_agree() {
        assert_eq!(Scalar::norm(&-3f64), 3.);
        assert_eq!((-3f64).to_complex(), Complex64::new(-3., 0.));
        assert_eq!(Scalar::norm(&Complex64::new(3., 4.)), 5.);
    }
}
