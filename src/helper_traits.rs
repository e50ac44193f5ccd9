use nalgebra::Vector3;

use crate::helper::vec_to_aspect;

// A gain function defined over angular deviations from a pointing direction.
pub trait SphericalFunction {
    fn lookup(&self, az: f64, el: f64) -> f64;

    // Looks up the gain for a vector expressed through the three axes of the pointing frame.
    // Directions behind the frame (non-positive forward component) have no gain.
    fn lookup_vec(
        &self,
        vec: Vector3<f64>,
        forward: &Vector3<f64>,
        right: &Vector3<f64>,
        up: &Vector3<f64>,
    ) -> f64 {
        if vec.dot(forward) <= 0. {
            return 0.;
        }
        let (az, el) = vec_to_aspect(vec, forward, right, up);
        self.lookup(az, el)
    }
}
