use std::f64::consts::PI;

use nalgebra::Vector3;

pub const SPEED_OF_LIGHT: f64 = 299_792_458.0; // m/s
pub const BOLTZMANN_CONSTANT: f64 = 1.380649e-23; // J/K
// Receiver reference temperature used for thermal noise
pub const NOISE_TEMPERATURE: f64 = 300.0; // K

// Given a vector in the antenna frame, compute the angular deviation from boresight.
// `forward` is the boresight axis, `right` the horizontal axis, `up` the vertical axis.
// Returns (azimuth deviation, elevation deviation). Positive azimuth goes from forward to right,
// positive elevation goes from forward to up.
pub fn vec_to_aspect(
    vec: Vector3<f64>,
    forward: &Vector3<f64>,
    right: &Vector3<f64>,
    up: &Vector3<f64>,
) -> (f64, f64) {
    let z = vec.dot(forward);
    let x = vec.dot(right);
    let y = vec.dot(up);
    (f64::atan2(x, z), f64::atan2(y, z))
}

// Computes the horizontal unit vector pointing at angle `theta`, counter-clockwise from the x axis.
pub fn horizontal_direction(theta: f64) -> Vector3<f64> {
    Vector3::new(theta.cos(), theta.sin(), 0.)
}

pub fn wavelength(f: f64) -> f64 {
    SPEED_OF_LIGHT / f
}

pub fn decibels(x: f64) -> f64 {
    10. * x.log10()
}

pub fn from_decibels(db: f64) -> f64 {
    10f64.powf(0.1 * db)
}

pub fn power_to_amplitude(power: f64) -> f64 {
    power.sqrt()
}

// Round trip delay of an echo from `range`.
pub fn round_trip_time(range: f64) -> f64 {
    2. * range / SPEED_OF_LIGHT
}

// One-way distance covered by half of a round trip lasting `t`.
pub fn time_to_range(t: f64) -> f64 {
    SPEED_OF_LIGHT * t / 2.
}

// Wraps an angle into [0, 2π).
pub fn wrap_angle(theta: f64) -> f64 {
    let wrapped = theta.rem_euclid(2. * PI);
    // rem_euclid can round up to exactly 2π for tiny negative inputs
    if wrapped >= 2. * PI {
        0.
    } else {
        wrapped
    }
}

#[cfg(test)]
mod test {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    use super::*;

    #[test]
    fn aspect_of_boresight_is_zero() {
        let forward = Vector3::new(1., 0., 0.);
        let right = Vector3::new(0., 1., 0.);
        let up = Vector3::new(0., 0., 1.);
        let (az, el) = vec_to_aspect(Vector3::new(100., 0., 0.), &forward, &right, &up);
        assert_eq!(az, 0.);
        assert_eq!(el, 0.);

        let (az, el) = vec_to_aspect(Vector3::new(1., 1., 1.), &forward, &right, &up);
        assert_relative_eq!(az, PI / 4.);
        assert_relative_eq!(el, PI / 4.);
    }

    #[test]
    fn decibel_round_trip() {
        assert_relative_eq!(from_decibels(30.), 1000., max_relative = 1e-12);
        assert_relative_eq!(decibels(from_decibels(4.)), 4., max_relative = 1e-12);
    }

    #[test]
    fn wrap_angle_range() {
        assert_relative_eq!(wrap_angle(-PI / 2.), 1.5 * PI);
        assert_relative_eq!(wrap_angle(5. * PI), PI, epsilon = 1e-12);
        assert_eq!(wrap_angle(0.), 0.);
        assert!(wrap_angle(-1e-18) < 2. * PI);
    }

    #[test]
    fn range_time_inverse() {
        assert_relative_eq!(time_to_range(round_trip_time(1234.5)), 1234.5);
    }
}
