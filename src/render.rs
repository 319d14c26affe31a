use crate::{
    error::{Error, Result},
    farm::turbine::Silhouette,
    rose::sample::WindRose,
    vars::*,
};
use geo::{Coordinate, LineString, Polygon, Rect};
use log::trace;
use nalgebra::Point2;
use std::{
    fs,
    path::{Path as FilePath, PathBuf},
};
use svg::{
    node::{
        element::{Circle, Path, Polyline, Text as Label},
        Text,
    },
    Document,
};

/* # geometry to svg */

// svg grows downwards, everything here is drawn with y up

fn coord_to_svg(coord: &Coordinate<f64>) -> String {
    format!("{} {}", coord.x, -coord.y)
}

fn ring_to_svg(line: &LineString<f64>) -> String {
    line.0
        .iter()
        .map(coord_to_svg)
        .collect::<Vec<String>>()
        .join("L")
}

fn poly_to_svg(poly: &Polygon<f64>) -> String {
    if poly.exterior().0.is_empty() {
        "".into()
    } else {
        format!("M{}Z", ring_to_svg(poly.exterior()))
    }
}

fn points_to_svg(points: &[Point2<f64>]) -> String {
    points
        .iter()
        .map(|point| format!("{},{}", point.x, -point.y))
        .collect::<Vec<String>>()
        .join(" ")
}

/// point at `radius` along a compass bearing, north up and clockwise
fn compass(bearing: f64, radius: f64) -> (f64, f64) {
    let angle = bearing.to_radians();
    (radius * angle.sin(), -radius * angle.cos())
}

/// smallest and largest coordinate over all points
fn fit_bounds<'a>(
    coords: impl Iterator<Item = &'a Coordinate<f64>>,
) -> (Coordinate<f64>, Coordinate<f64>) {
    coords.fold(
        (
            Coordinate {
                x: f64::INFINITY,
                y: f64::INFINITY,
            },
            Coordinate {
                x: f64::NEG_INFINITY,
                y: f64::NEG_INFINITY,
            },
        ),
        |(min, max), c| {
            (
                Coordinate {
                    x: min.x.min(c.x),
                    y: min.y.min(c.y),
                },
                Coordinate {
                    x: max.x.max(c.x),
                    y: max.y.max(c.y),
                },
            )
        },
    )
}

/* # wind roses */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quantity {
    Frequency,
    Speed,
}

/// pie slice from the centre spanning `width` degrees around `bearing`
fn wedge(bearing: f64, width: f64, radius: f64) -> String {
    if width >= FULL_TURN {
        return format!(
            "M0 {r}A{r} {r} 0 1 1 0 {s}A{r} {r} 0 1 1 0 {r}Z",
            r = radius,
            s = -radius
        );
    }
    let (x0, y0) = compass(bearing - width / 2.0, radius);
    let (x1, y1) = compass(bearing + width / 2.0, radius);
    let large = if width > FULL_TURN / 2.0 { 1 } else { 0 };
    format!(
        "M0 0L{} {}A{} {} 0 {} 1 {} {}Z",
        x0, y0, radius, radius, large, x1, y1
    )
}

/// polar bar chart of a wind rose, one wedge per direction
pub fn rose_chart(rose: &WindRose, quantity: Quantity) -> Document {
    let values = match quantity {
        Quantity::Frequency => &rose.frequencies,
        Quantity::Speed => &rose.speeds,
    };
    let outer = CANVAS / 2.0 * 0.8;
    let peak = values.iter().copied().fold(0.0, f64::max);
    let scale = if peak > 0.0 { outer / peak } else { 0.0 };
    let half = CANVAS / 2.0;

    let mut image = Document::new().set("viewBox", (-half, -half, CANVAS, CANVAS));
    for ring in 1..=3 {
        image = image.add(
            Circle::new()
                .set("r", outer * ring as f64 / 3.0)
                .set("fill", "none")
                .set("stroke", "gray")
                .set("stroke-width", 0.5),
        );
    }
    for (direction, value) in rose.directions.iter().zip(values) {
        image = image.add(
            Path::new()
                .set("d", wedge(*direction, rose.width(), value * scale))
                .set("fill", ROSE_FILL)
                .set("fill-opacity", 0.5),
        );
    }
    for (bearing, name) in [(0.0, "N"), (90.0, "E"), (180.0, "S"), (270.0, "W")] {
        let (x, y) = compass(bearing, outer + 0.1 * half);
        image = image.add(
            Label::new()
                .set("x", x)
                .set("y", y)
                .set("text-anchor", "middle")
                .set("dominant-baseline", "middle")
                .set("font-family", "serif")
                .add(Text::new(name)),
        );
    }
    image
}

/* # layouts */

/// turbine rotors seen from above with an optional boundary
pub fn layout_chart(
    positions: &[Coordinate<f64>],
    rotor_diameters: &[f64],
    boundary: Option<&Polygon<f64>>,
    bounds: Option<Rect<f64>>,
) -> Result<Document> {
    //! Without explicit `bounds` the view fits the turbines and the boundary
    //! with two rotor diameters to spare on every side.

    if positions.len() != rotor_diameters.len() {
        return Err(Error::LayoutMismatch {
            positions: positions.len(),
            diameters: rotor_diameters.len(),
        });
    }
    if positions.is_empty() {
        return Err(Error::Empty);
    }

    let margin = 2.0 * rotor_diameters[0];
    let (min, max) = match bounds {
        Some(rect) => (rect.min(), rect.max()),
        None => {
            let (min, max) = fit_bounds(
                positions
                    .iter()
                    .chain(boundary.iter().flat_map(|poly| poly.exterior().0.iter())),
            );
            (
                Coordinate {
                    x: min.x - margin,
                    y: min.y - margin,
                },
                Coordinate {
                    x: max.x + margin,
                    y: max.y + margin,
                },
            )
        }
    };
    trace!("layout view from {:?} to {:?}", min, max);

    let mut image =
        Document::new().set("viewBox", (min.x, -max.y, max.x - min.x, max.y - min.y));
    for (position, diameter) in positions.iter().zip(rotor_diameters) {
        image = image.add(
            Circle::new()
                .set("cx", position.x)
                .set("cy", -position.y)
                .set("r", diameter / 2.0)
                .set("fill", TURBINE_FILL)
                .set("fill-opacity", 0.25),
        );
    }
    if let Some(poly) = boundary {
        image = image.add(
            Path::new()
                .set("d", poly_to_svg(poly))
                .set("fill", "none")
                .set("stroke", "black")
                .set("stroke-width", margin / 40.0)
                .set("stroke-dasharray", format!("{} {}", margin / 4.0, margin / 8.0)),
        );
    }
    Ok(image)
}

/* # turbines */

pub fn turbine_chart(silhouette: &Silhouette) -> Document {
    let rotor = &silhouette.rotor;
    let pad = rotor.radius * 0.1;
    let top = rotor.centre.y + rotor.radius + pad;
    let mut image = Document::new().set(
        "viewBox",
        (
            -rotor.radius - pad,
            -top,
            2.0 * (rotor.radius + pad),
            top + pad,
        ),
    );

    image = image.add(
        Polyline::new()
            .set("points", points_to_svg(&silhouette.tower))
            .set("fill", "none")
            .set("stroke", "blue")
            .set("stroke-width", 2),
    );
    image = image.add(
        Circle::new()
            .set("cx", rotor.centre.x)
            .set("cy", -rotor.centre.y)
            .set("r", rotor.radius)
            .set("fill", "none")
            .set("stroke", "black")
            .set("stroke-width", 2)
            .set("stroke-dasharray", "6 4"),
    );
    for blade in &silhouette.blades {
        image = image.add(
            Polyline::new()
                .set("points", points_to_svg(blade))
                .set("fill", "none")
                .set("stroke", "blue")
                .set("stroke-width", 1),
        );
    }
    image
}

/* # saving */

/// write a document into the render directory, returns the written path
pub fn save(image: &Document, name: &str) -> Result<PathBuf> {
    fs::create_dir_all(RENDER_DIR)?;
    let path = FilePath::new(RENDER_DIR).join(format!("{}.svg", name));
    trace!("saving image to {}", path.display());
    svg::save(&path, image)?;
    Ok(path)
}
