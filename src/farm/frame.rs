use crate::units::Bearing;
use geo::Coordinate;
use nalgebra::{Point2, Rotation2};
use ord_subset::OrdSubsetSliceExt;

/// turbine positions in the wind frame, x downwind and y crosswind
pub fn wind_frame(
    wind_direction: Bearing,
    positions: &[Coordinate<f64>],
) -> Vec<Coordinate<f64>> {
    let rotation = Rotation2::new(-wind_direction.inflow());
    positions
        .iter()
        .map(|position| {
            let turned = rotation * Point2::new(position.x, position.y);
            Coordinate {
                x: turned.x,
                y: turned.y,
            }
        })
        .collect()
}

/// indices of the turbines from the most upwind to the most downwind
pub fn downwind_order(wind_direction: Bearing, positions: &[Coordinate<f64>]) -> Vec<usize> {
    let framed = wind_frame(wind_direction, positions);
    let mut order = (0..framed.len()).collect::<Vec<usize>>();
    order.ord_subset_sort_by_key(|&i| framed[i].x);
    order
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::units::Unit;
    use float_eq::assert_float_eq;
    const EPSILON: f64 = 0.0000_01;

    fn framed(degrees: f64, points: &[(f64, f64)]) -> Vec<Coordinate<f64>> {
        wind_frame(Bearing::confine(degrees), &coords(points))
    }

    fn coords(points: &[(f64, f64)]) -> Vec<Coordinate<f64>> {
        points.iter().map(|&(x, y)| Coordinate { x, y }).collect()
    }

    fn assert_coords(left: &[Coordinate<f64>], right: &[(f64, f64)]) {
        assert_eq!(left.len(), right.len());
        for (coord, &(x, y)) in left.iter().zip(right) {
            assert_float_eq!(coord.x, x, abs <= EPSILON);
            assert_float_eq!(coord.y, y, abs <= EPSILON);
        }
    }

    #[test]
    fn westerly_is_identity() {
        let points = [(0.0, 0.0), (500.0, 0.0), (250.0, -100.0)];
        assert_coords(&framed(270.0, &points), &points);
    }

    #[test]
    fn northerly_blows_south() {
        assert_coords(
            &framed(0.0, &[(0.0, -1.0), (1.0, 0.0)]),
            &[(1.0, 0.0), (0.0, 1.0)],
        );
    }

    #[test]
    fn easterly_blows_west() {
        assert_coords(&framed(90.0, &[(-1.0, 0.0)]), &[(1.0, 0.0)]);
        assert_coords(&framed(450.0, &[(-1.0, 0.0)]), &[(1.0, 0.0)]);
    }

    #[test]
    fn order_follows_wind() {
        let positions = coords(&[
            (0.0, 0.0),
            (100.0, 500.0),
            (200.0, 1000.0),
            (500.0, -300.0),
        ]);
        assert_eq!(
            downwind_order(Bearing::confine(0.0), &positions),
            vec![2, 1, 0, 3]
        );
        assert_eq!(
            downwind_order(Bearing::confine(270.0), &positions),
            vec![0, 1, 2, 3]
        );
    }
}
