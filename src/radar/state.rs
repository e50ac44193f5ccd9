use nalgebra::Vector3;

use crate::helper::horizontal_direction;

// An echo from beyond the unambiguous range, waiting to be received during a later pulse.
#[derive(Clone, Debug, PartialEq)]
pub struct PulseCarry {
    // s, delay remaining relative to the start of the next pulse
    pub time: f64,
    // W, received boresight power times the transmit gain
    pub power: f64,
    // m, target position at emission
    pub pos: Vector3<f64>,
}

/// Time, antenna orientation and pending far echoes of a radar between pulses.
#[derive(Clone, Debug, PartialEq)]
pub struct RadarState {
    time: f64,
    theta: f64,
    // Antenna frame: boresight, horizontal axis, vertical axis
    boresight: Vector3<f64>,
    frame_x: Vector3<f64>,
    carry: Vec<PulseCarry>,
}

impl RadarState {
    pub fn new(time: f64, theta: f64) -> RadarState {
        RadarState {
            time,
            theta,
            boresight: horizontal_direction(theta),
            frame_x: Vector3::new(-theta.sin(), theta.cos(), 0.),
            carry: Vec::new(),
        }
    }

    pub fn reset(&mut self, time: f64, theta: f64) {
        *self = RadarState::new(time, theta);
    }

    // Moves to the next pulse, replacing the pending echoes.
    pub fn advance(&mut self, time: f64, theta: f64, carry: Vec<PulseCarry>) {
        *self = RadarState {
            carry,
            ..RadarState::new(time, theta)
        };
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    pub fn boresight(&self) -> &Vector3<f64> {
        &self.boresight
    }

    pub fn frame_x(&self) -> &Vector3<f64> {
        &self.frame_x
    }

    pub fn frame_y(&self) -> Vector3<f64> {
        Vector3::z()
    }

    pub fn carry(&self) -> &[PulseCarry] {
        &self.carry
    }

    pub fn carry_size(&self) -> usize {
        self.carry.len()
    }
}
