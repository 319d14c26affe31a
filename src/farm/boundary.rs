use crate::error::{Error, Result};
use geo::{Coordinate, LineString, Polygon};
use log::debug;
use nalgebra::Point3;
use std::f64::consts::TAU;

/// closed ring of points on a circle at ground level
pub fn circular_boundary(
    n_points: usize,
    radius: f64,
    centre: Coordinate<f64>,
) -> Result<Vec<Point3<f64>>> {
    //! An odd count is bumped to the next even one. The angles run over
    //! [0, 2pi] inclusive, so the first and the last point coincide.

    if n_points < 3 {
        return Err(Error::SparseBoundary(n_points));
    }
    let n_points = n_points + n_points % 2;
    debug!("circular boundary of {} points, radius {}", n_points, radius);

    let step = TAU / (n_points - 1) as f64;
    Ok((0..n_points)
        .map(|k| {
            let theta = step * k as f64;
            Point3::new(
                centre.x + radius * theta.cos(),
                centre.y + radius * theta.sin(),
                0.0,
            )
        })
        .collect())
}

/// planar polygon of a boundary ring, closed by its first point
pub fn boundary_polygon(points: &[Point3<f64>]) -> Polygon<f64> {
    let open = points.split_last().map_or(points, |(_, rest)| rest);
    Polygon::new(
        LineString::from(
            open.iter()
                .map(|point| Coordinate {
                    x: point.x,
                    y: point.y,
                })
                .collect::<Vec<Coordinate<f64>>>(),
        ),
        vec![],
    )
}
