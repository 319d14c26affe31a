use crate::vars::{BLADE_OFFSET, BLADE_SCALE};
use nalgebra::{Point2, Rotation2, Vector2};

// reference blade outline, drawn for a rotor of BLADE_SCALE diameter
const BLADE_X: [f64; 16] = [
    3.0, 7.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 30.0, 25.0, 20.0, 15.0, 10.0, 5.0, 3.0, 3.0,
];
const BLADE_Y: [f64; 16] = [
    0.0, 0.0, 0.8, 1.5, 1.7, 1.9, 2.1, 2.3, 2.4, 2.4, 2.4, 2.4, 2.4, 2.4, 2.4, 0.0,
];

#[derive(Clone, Debug, PartialEq)]
pub struct Turbine {
    pub hub_height: f64,
    pub rotor_diameter: f64,
    /// tower diameter at the bottom, the middle and the top
    pub tower_diameters: [f64; 3],
}

#[derive(Clone, Debug, PartialEq)]
pub struct Disc {
    pub centre: Point2<f64>,
    pub radius: f64,
}

/// side view of a turbine, x across the rotor plane and y up
#[derive(Clone, Debug, PartialEq)]
pub struct Silhouette {
    pub tower: Vec<Point2<f64>>,
    pub rotor: Disc,
    pub blades: [Vec<Point2<f64>>; 3],
}

impl Turbine {
    pub fn new(hub_height: f64, rotor_diameter: f64, tower_diameters: [f64; 3]) -> Self {
        Self {
            hub_height,
            rotor_diameter,
            tower_diameters,
        }
    }

    fn tower(&self) -> Vec<Point2<f64>> {
        let [bottom, middle, top] = self.tower_diameters.map(|d| d / 2.0);
        let (h, m) = (self.hub_height, self.hub_height / 2.0);
        vec![
            Point2::new(-bottom, 0.0),
            Point2::new(-middle, m),
            Point2::new(-top, h),
            Point2::new(top, h),
            Point2::new(middle, m),
            Point2::new(bottom, 0.0),
            Point2::new(-bottom, 0.0),
        ]
    }

    fn blade(&self, angle: f64) -> Vec<Point2<f64>> {
        let scale = self.rotor_diameter / BLADE_SCALE;
        let rotation = Rotation2::new(angle.to_radians());
        let hub = Vector2::new(0.0, self.hub_height);
        BLADE_X
            .iter()
            .zip(BLADE_Y.iter())
            .map(|(&x, &y)| rotation * Point2::new(x, y - BLADE_OFFSET) * scale + hub)
            .collect()
    }

    /// outline with the first blade turned by `blade_angle` degrees
    pub fn silhouette(&self, blade_angle: f64) -> Silhouette {
        Silhouette {
            tower: self.tower(),
            rotor: Disc {
                centre: Point2::new(0.0, self.hub_height),
                radius: self.rotor_diameter / 2.0,
            },
            blades: [0.0, 120.0, 240.0].map(|offset| self.blade(blade_angle + offset)),
        }
    }
}
