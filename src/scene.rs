use nalgebra::Vector3;

use crate::{
    error::{check_index, RadarError, Result},
    signal::approx::VectorApproxFunction,
};

// Where a target is at a given time.
#[derive(Clone, Debug, PartialEq)]
pub enum Position {
    Fixed(Vector3<f64>),
    // Position in m as a function of time in s
    Path(VectorApproxFunction),
}

impl Position {
    pub fn at(&self, t: f64) -> Vector3<f64> {
        match self {
            Position::Fixed(pos) => *pos,
            Position::Path(path) => path.eval(t),
        }
    }
}

impl From<Vector3<f64>> for Position {
    fn from(pos: Vector3<f64>) -> Self {
        Position::Fixed(pos)
    }
}

impl From<VectorApproxFunction> for Position {
    fn from(path: VectorApproxFunction) -> Self {
        Position::Path(path)
    }
}

// Integrate the equations of motion to get an estimate of the target position after a timestep dt.
pub fn dead_reckon(mut pos: Vector3<f64>, vel: Vector3<f64>, dt: f64) -> Vector3<f64> {
    pos += dt * vel;
    pos
}

/// A point scatterer. Positions are relative to the radar, in m.
#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    position: Position,
    // m²
    rcs: f64,
}

impl Target {
    pub fn new(position: impl Into<Position>, rcs: f64) -> Result<Target> {
        if !(rcs >= 0. && rcs.is_finite()) {
            return Err(RadarError::domain(format!(
                "radar cross section must be non-negative, got {}",
                rcs
            )));
        }
        Ok(Target {
            position: position.into(),
            rcs,
        })
    }

    pub fn fixed(pos: Vector3<f64>, rcs: f64) -> Result<Target> {
        Self::new(Position::Fixed(pos), rcs)
    }

    pub fn with_path(path: VectorApproxFunction, rcs: f64) -> Result<Target> {
        Self::new(Position::Path(path), rcs)
    }

    /// A target moving in a straight line at constant velocity between `t_start` and `t_end`.
    /// Outside that window the path extrapolates to the end points.
    pub fn moving(
        start: Vector3<f64>,
        vel: Vector3<f64>,
        t_start: f64,
        t_end: f64,
        rcs: f64,
    ) -> Result<Target> {
        let end = dead_reckon(start, vel, t_end - t_start);
        let path = VectorApproxFunction::with_extrapolation(
            vec![t_start, t_end],
            vec![start, end],
            start,
            end,
        )?;
        Self::with_path(path, rcs)
    }

    pub fn position(&self, t: f64) -> Vector3<f64> {
        self.position.at(t)
    }

    // Replaces any path with a fixed position.
    pub fn set_position(&mut self, pos: Vector3<f64>) {
        self.position = Position::Fixed(pos);
    }

    pub fn rcs(&self) -> f64 {
        self.rcs
    }
}

/// Ordered collection of targets. Entries are owned copies, so changes made to a target after
/// it was appended do not reach the collection and vice versa.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TargetCollection(Vec<Target>);

impl TargetCollection {
    pub fn new() -> TargetCollection {
        TargetCollection(Vec::new())
    }

    pub fn append_copy(&mut self, target: &Target) {
        self.0.push(target.clone());
    }

    pub fn iget_copy(&self, i: usize) -> Result<Target> {
        check_index(i, self.0.len())?;
        Ok(self.0[i].clone())
    }

    // Removes entry i, shifting later entries down by one.
    pub fn idelete(&mut self, i: usize) -> Result<()> {
        check_index(i, self.0.len())?;
        self.0.remove(i);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn size(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.0.iter()
    }
}

impl FromIterator<Target> for TargetCollection {
    fn from_iter<I: IntoIterator<Item = Target>>(iter: I) -> Self {
        TargetCollection(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    use crate::{error::RadarError, signal::approx::VectorApproxFunction};

    use super::{Target, TargetCollection};

    #[test]
    fn fixed_target_ignores_time() {
        let pos = Vector3::new(1000., 2000., 10.);
        let target = Target::fixed(pos, 1.5).unwrap();
        assert_eq!(target.position(0.), pos);
        assert_eq!(target.position(123.), pos);
        assert_eq!(target.rcs(), 1.5);
    }

    #[test]
    fn path_target_follows_path() {
        let path = VectorApproxFunction::new(
            vec![0., 10.],
            vec![Vector3::new(0., 1000., 0.), Vector3::new(100., 1000., 0.)],
        )
        .unwrap();
        let target = Target::with_path(path, 1.).unwrap();
        assert_relative_eq!(target.position(2.5), Vector3::new(25., 1000., 0.));
    }

    #[test]
    fn moving_target() {
        let target = Target::moving(
            Vector3::new(5000., 0., 0.),
            Vector3::new(-10., 20., 0.),
            0.,
            100.,
            1.,
        )
        .unwrap();
        assert_relative_eq!(target.position(50.), Vector3::new(4500., 1000., 0.));
        assert_relative_eq!(target.position(200.), Vector3::new(4000., 2000., 0.));
        assert_relative_eq!(target.position(-1.), Vector3::new(5000., 0., 0.));
    }

    #[test]
    fn set_position_replaces_path() {
        let mut target = Target::moving(
            Vector3::new(5000., 0., 0.),
            Vector3::new(-10., 0., 0.),
            0.,
            100.,
            1.,
        )
        .unwrap();
        target.set_position(Vector3::new(1., 2., 3.));
        assert_eq!(target.position(50.), Vector3::new(1., 2., 3.));
    }

    #[test]
    fn rejects_negative_rcs() {
        assert!(matches!(
            Target::fixed(Vector3::zeros(), -1.),
            Err(RadarError::DomainError(_))
        ));
        assert!(Target::fixed(Vector3::zeros(), 0.).is_ok());
    }

    #[test]
    fn collection_stores_copies() {
        let mut target = Target::fixed(Vector3::new(100., 0., 0.), 1.).unwrap();
        let mut targets = TargetCollection::new();
        targets.append_copy(&target);
        target.set_position(Vector3::new(200., 0., 0.));

        assert_eq!(targets.size(), 1);
        assert_eq!(
            targets.iget_copy(0).unwrap().position(0.),
            Vector3::new(100., 0., 0.)
        );

        let mut copy = targets.iget_copy(0).unwrap();
        copy.set_position(Vector3::new(300., 0., 0.));
        assert_eq!(
            targets.iget_copy(0).unwrap().position(0.),
            Vector3::new(100., 0., 0.)
        );
    }

    #[test]
    fn collection_delete_and_clear() {
        let mut targets: TargetCollection = (1..=3)
            .map(|i| Target::fixed(Vector3::new(i as f64, 0., 0.), 1.).unwrap())
            .collect();
        assert_eq!(targets.size(), 3);

        targets.idelete(0).unwrap();
        assert_eq!(targets.size(), 2);
        assert_eq!(targets.iget_copy(0).unwrap().position(0.).x, 2.);

        assert_eq!(
            targets.idelete(2),
            Err(RadarError::IndexError { index: 2, len: 2 })
        );
        assert!(matches!(
            targets.iget_copy(5),
            Err(RadarError::IndexError { .. })
        ));

        targets.clear();
        assert_eq!(targets.size(), 0);
        assert!(targets.is_empty());
        assert_eq!(targets.iter().count(), 0);
    }
}
