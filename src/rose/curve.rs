use crate::error::{Error, Result};
use itertools::Itertools;
use splines::{Interpolation, Key, Spline};

/* # samples */

/// value of a fitted curve and its first three derivatives at a point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub value: f64,
    pub d1: f64,
    pub d2: f64,
    pub d3: f64,
}

/// a one-dimensional interpolant, fitted once and queried many times
pub trait Curve: Sized {
    fn fit(xs: &[f64], ys: &[f64]) -> Result<Self>;

    fn sample(&self, x: f64) -> Sample;

    fn value(&self, x: f64) -> f64 {
        self.sample(x).value
    }
}

fn check_knots(xs: &[f64], ys: &[f64]) -> Result<()> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return Err(Error::DegenerateCurve);
    }
    if xs.iter().tuple_windows().any(|(a, b)| a >= b) {
        return Err(Error::DegenerateCurve);
    }
    Ok(())
}

fn secants(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    xs.iter()
        .tuple_windows()
        .zip(ys.iter().tuple_windows())
        .map(|((x0, x1), (y0, y1))| (y1 - y0) / (x1 - x0))
        .collect()
}

/// index of the knot interval holding x, end intervals extend outwards
fn segment(xs: &[f64], x: f64) -> usize {
    xs.partition_point(|&knot| knot <= x)
        .saturating_sub(1)
        .min(xs.len() - 2)
}

/* # cubic hermite */

/// piecewise cubic given by knot values and knot slopes
#[derive(Clone, Debug)]
struct Hermite {
    xs: Vec<f64>,
    ys: Vec<f64>,
    slopes: Vec<f64>,
}

impl Hermite {
    fn sample(&self, x: f64) -> Sample {
        let i = segment(&self.xs, x);
        let h = self.xs[i + 1] - self.xs[i];
        let secant = (self.ys[i + 1] - self.ys[i]) / h;
        let (t0, t1) = (self.slopes[i], self.slopes[i + 1]);

        let b = t0;
        let c = (3.0 * secant - 2.0 * t0 - t1) / h;
        let d = (t0 + t1 - 2.0 * secant) / (h * h);
        let s = x - self.xs[i];

        Sample {
            value: self.ys[i] + s * (b + s * (c + s * d)),
            d1: b + s * (2.0 * c + 3.0 * d * s),
            d2: 2.0 * c + 6.0 * d * s,
            d3: 6.0 * d,
        }
    }
}

/* ## akima */

/// Akima spline, local and free of the overshoot of a global cubic
#[derive(Clone, Debug)]
pub struct Akima(Hermite);

impl Curve for Akima {
    fn fit(xs: &[f64], ys: &[f64]) -> Result<Self> {
        check_knots(xs, ys)?;
        let m = secants(xs, ys);

        // two extrapolated secants on either side
        let mut ext = Vec::with_capacity(m.len() + 4);
        if m.len() == 1 {
            ext.extend([m[0]; 5]);
        } else {
            let first = 2.0 * m[0] - m[1];
            let last = 2.0 * m[m.len() - 1] - m[m.len() - 2];
            ext.push(2.0 * first - m[0]);
            ext.push(first);
            ext.extend(m.iter().copied());
            ext.push(last);
            ext.push(2.0 * last - m[m.len() - 1]);
        }

        let slopes = ext
            .iter()
            .tuple_windows()
            .map(|(m0, m1, m2, m3)| {
                let w1 = (m3 - m2).abs();
                let w2 = (m1 - m0).abs();
                if w1 + w2 > f64::EPSILON * (m1.abs() + m2.abs()).max(f64::MIN_POSITIVE) {
                    (w1 * m1 + w2 * m2) / (w1 + w2)
                } else {
                    0.5 * (m1 + m2)
                }
            })
            .collect::<Vec<f64>>();

        Ok(Self(Hermite {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            slopes,
        }))
    }

    fn sample(&self, x: f64) -> Sample {
        self.0.sample(x)
    }
}

/* ## pchip */

/// Fritsch-Carlson monotone cubic, never overshoots monotone data
#[derive(Clone, Debug)]
pub struct Pchip(Hermite);

fn pchip_end(h0: f64, h1: f64, m0: f64, m1: f64) -> f64 {
    let slope = ((2.0 * h0 + h1) * m0 - h0 * m1) / (h0 + h1);
    if slope * m0 <= 0.0 {
        0.0
    } else if m0 * m1 <= 0.0 && slope.abs() > 3.0 * m0.abs() {
        3.0 * m0
    } else {
        slope
    }
}

impl Curve for Pchip {
    fn fit(xs: &[f64], ys: &[f64]) -> Result<Self> {
        check_knots(xs, ys)?;
        let m = secants(xs, ys);
        let h = xs
            .iter()
            .tuple_windows()
            .map(|(a, b)| b - a)
            .collect::<Vec<f64>>();
        let n = xs.len();

        let slopes = if n == 2 {
            vec![m[0]; 2]
        } else {
            let mut slopes = vec![0.0; n];
            for k in 1..n - 1 {
                if m[k - 1] * m[k] > 0.0 {
                    let w1 = 2.0 * h[k] + h[k - 1];
                    let w2 = h[k] + 2.0 * h[k - 1];
                    slopes[k] = (w1 + w2) / (w1 / m[k - 1] + w2 / m[k]);
                }
            }
            slopes[0] = pchip_end(h[0], h[1], m[0], m[1]);
            slopes[n - 1] = pchip_end(h[n - 2], h[n - 3], m[n - 2], m[n - 3]);
            slopes
        };

        Ok(Self(Hermite {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            slopes,
        }))
    }

    fn sample(&self, x: f64) -> Sample {
        self.0.sample(x)
    }
}

/* # linear */

/// piecewise linear curve, continues the end segments outside the knots
#[derive(Clone, Debug)]
pub struct Linear {
    spline: Spline<f64, f64>,
    xs: Vec<f64>,
    slopes: Vec<f64>,
}

impl Curve for Linear {
    fn fit(xs: &[f64], ys: &[f64]) -> Result<Self> {
        check_knots(xs, ys)?;
        Ok(Self {
            spline: Spline::from_vec(
                xs.iter()
                    .zip(ys)
                    .map(|(&x, &y)| Key::new(x, y, Interpolation::Linear))
                    .collect(),
            ),
            xs: xs.to_vec(),
            slopes: secants(xs, ys),
        })
    }

    fn sample(&self, x: f64) -> Sample {
        let i = segment(&self.xs, x);
        let slope = self.slopes[i];
        let last = self.xs.len() - 1;
        let value = if x < self.xs[0] {
            self.spline.clamped_sample(self.xs[0]).unwrap_or_default() + slope * (x - self.xs[0])
        } else if x > self.xs[last] {
            self.spline.clamped_sample(self.xs[last]).unwrap_or_default()
                + slope * (x - self.xs[last])
        } else {
            self.spline.clamped_sample(x).unwrap_or_default()
        };

        Sample {
            value,
            d1: slope,
            d2: 0.0,
            d3: 0.0,
        }
    }
}
