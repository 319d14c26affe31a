use crate::vars::FULL_TURN;

pub trait Unit<T> {
    fn confine(value: T) -> Self;
    fn release(self) -> T;
}

/// compass bearing in degrees, clockwise from north
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Bearing(f64);

impl Bearing {
    /// same bearing reduced into [0, 360)
    pub fn wrapped(self) -> Self {
        let wrapped = self.0.rem_euclid(FULL_TURN);
        // rem_euclid can round up to the modulus for tiny negative inputs
        Self(if wrapped >= FULL_TURN { 0.0 } else { wrapped })
    }

    /// counter-clockwise angle of the inflow from the +x axis, in radians
    pub fn inflow(self) -> f64 {
        Bearing(270.0 - self.0).wrapped().0.to_radians()
    }
}

impl Unit<f64> for Bearing {
    fn confine(value: f64) -> Self {
        Self(value)
    }

    fn release(self) -> f64 {
        self.0
    }
}
