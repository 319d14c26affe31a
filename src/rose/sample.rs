use crate::{
    error::{Error, Result},
    rose::curve::{Akima, Curve},
    units::{Bearing, Unit},
    vars::*,
};
use itertools::{izip, Itertools};
use log::{debug, info, trace, warn};
use ord_subset::OrdSubsetSliceExt;
use std::ops::Add;

/* # wind roses */

/// a wind rose resampled onto evenly spaced directions
#[derive(Clone, Debug, PartialEq)]
pub struct WindRose {
    pub directions: Vec<f64>,
    pub frequencies: Vec<f64>,
    pub speeds: Vec<f64>,
}

impl WindRose {
    pub fn len(&self) -> usize {
        self.directions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }

    /// angular width of a single bin in degrees
    pub fn width(&self) -> f64 {
        FULL_TURN / self.len() as f64
    }

    /// (direction, frequency, speed) triples
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        izip!(&self.directions, &self.frequencies, &self.speeds).map(|(&d, &f, &s)| (d, f, s))
    }
}

/* # input preparation */

fn check_values(field: &'static str, values: &[f64], signed: bool) -> Result<()> {
    match values
        .iter()
        .enumerate()
        .find(|(_, v)| !v.is_finite() || (!signed && **v < 0.0))
    {
        Some((index, &value)) => Err(Error::InvalidValue {
            field,
            index,
            value,
        }),
        None => Ok(()),
    }
}

/// validated samples, sorted by direction and repeated periodically across the seam
struct Periodic {
    directions: Vec<f64>,
    frequencies: Vec<f64>,
    speeds: Vec<f64>,
}

impl Periodic {
    fn new(directions: &[f64], frequencies: &[f64], speeds: &[f64]) -> Result<Self> {
        if directions.len() != frequencies.len() || directions.len() != speeds.len() {
            return Err(Error::LengthMismatch {
                directions: directions.len(),
                frequencies: frequencies.len(),
                speeds: speeds.len(),
            });
        }
        if directions.is_empty() {
            return Err(Error::Empty);
        }
        check_values("direction", directions, true)?;
        check_values("frequency", frequencies, false)?;
        check_values("speed", speeds, false)?;

        let total = frequencies.iter().sum::<f64>();
        if (total - 1.0).abs() > FREQ_TOLERANCE {
            warn!("input frequencies sum to {}, not one", total);
        }

        let mut samples = izip!(directions, frequencies, speeds)
            .map(|(&d, &f, &s)| (Bearing::confine(d).wrapped().release(), f, s))
            .collect::<Vec<(f64, f64, f64)>>();
        samples.ord_subset_sort_by_key(|sample| sample.0);
        if let Some((duplicate, _)) = samples
            .iter()
            .tuple_windows()
            .find(|(a, b)| a.0 == b.0)
        {
            return Err(Error::DuplicateDirection(duplicate.0));
        }

        let n = samples.len() as i64;
        let span = -PADDING..n + PADDING;
        let (directions, frequencies, speeds): (Vec<f64>, Vec<f64>, Vec<f64>) = span
            .map(|j| {
                let (d, f, s) = samples[j.rem_euclid(n) as usize];
                (d + FULL_TURN * j.div_euclid(n) as f64, f, s)
            })
            .multiunzip();

        Ok(Self {
            directions,
            frequencies,
            speeds,
        })
    }
}

/* # quadrature */

/// frequency and frequency-weighted speed integrated over an angular interval
#[derive(Clone, Copy, Debug, PartialEq)]
struct Bin {
    frequency: f64,
    weighted: f64,
}

impl Add for Bin {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self {
            frequency: self.frequency + other.frequency,
            weighted: self.weighted + other.weighted,
        }
    }
}

fn linspace(start: f64, end: f64, num: usize) -> Vec<f64> {
    let step = (end - start) / (num - 1) as f64;
    (0..num).map(|k| start + step * k as f64).collect()
}

fn trapezoid(xs: &[f64], ys: &[f64]) -> f64 {
    xs.iter()
        .tuple_windows()
        .zip(ys.iter().tuple_windows())
        .map(|((x0, x1), (y0, y1))| 0.5 * (x1 - x0) * (y0 + y1))
        .sum()
}

/// integrates over [start, end] at `num` nodes, clamping undershoot at every node
fn integrate<C: Curve>(frequency: &C, speed: &C, start: f64, end: f64, num: usize) -> Bin {
    let nodes = linspace(start, end, num);
    let freqs = nodes
        .iter()
        .map(|&x| frequency.value(x).max(0.0))
        .collect::<Vec<f64>>();
    let weighted = nodes
        .iter()
        .zip(&freqs)
        .map(|(&x, f)| f * speed.value(x).max(0.0))
        .collect::<Vec<f64>>();

    Bin {
        frequency: trapezoid(&nodes, &freqs),
        weighted: trapezoid(&nodes, &weighted),
    }
}

/* # resampling */

/// resample a wind rose onto `n_directions` evenly spaced directions using Akima curves
pub fn sample_wind_rose(
    n_directions: usize,
    directions: &[f64],
    frequencies: &[f64],
    speeds: &[f64],
    num_int: usize,
) -> Result<WindRose> {
    sample_wind_rose_with::<Akima>(n_directions, directions, frequencies, speeds, num_int)
}

pub fn sample_wind_rose_with<C: Curve>(
    n_directions: usize,
    directions: &[f64],
    frequencies: &[f64],
    speeds: &[f64],
    num_int: usize,
) -> Result<WindRose> {
    //! Input directions may come in any order and spacing. Each output bin
    //! integrates the fitted frequency curve with the trapezoidal rule at
    //! `num_int` nodes, the bin around north is split at the seam into two
    //! halves of `num_int / 2` nodes. Speeds are frequency weighted averages.

    if n_directions == 0 {
        return Err(Error::NoDirections);
    }
    if num_int % 2 == 1 {
        return Err(Error::OddQuadrature(num_int));
    }
    if num_int < MIN_NUM_INT {
        return Err(Error::SparseQuadrature(num_int));
    }
    let periodic = Periodic::new(directions, frequencies, speeds)?;

    info!(
        "resampling wind rose of {} samples onto {} directions",
        directions.len(),
        n_directions
    );
    let frequency = C::fit(&periodic.directions, &periodic.frequencies)?;
    let speed = C::fit(&periodic.directions, &periodic.speeds)?;

    let width = FULL_TURN / n_directions as f64;
    debug!("bin width {} degrees, {} nodes per bin", width, num_int);
    let centres = (0..n_directions)
        .map(|i| i as f64 * width)
        .collect::<Vec<f64>>();

    let bins = centres.iter().enumerate().map(|(i, &centre)| {
        if i == 0 {
            integrate(
                &frequency,
                &speed,
                FULL_TURN - width / 2.0,
                FULL_TURN,
                num_int / 2,
            ) + integrate(&frequency, &speed, 0.0, width / 2.0, num_int / 2)
        } else {
            integrate(
                &frequency,
                &speed,
                centre - width / 2.0,
                centre + width / 2.0,
                num_int,
            )
        }
    });

    let (mut out_frequencies, out_speeds): (Vec<f64>, Vec<f64>) = bins
        .zip(&centres)
        .map(|(bin, &centre)| {
            trace!(
                "bin at {}: frequency {}, weighted speed {}",
                centre,
                bin.frequency,
                bin.weighted
            );
            if bin.frequency > 0.0 {
                (bin.frequency, (bin.weighted / bin.frequency).max(0.0))
            } else {
                // no wind through this bin, report the curve itself
                (0.0, speed.value(centre).max(0.0))
            }
        })
        .unzip();

    let total = out_frequencies.iter().sum::<f64>();
    if total <= 0.0 {
        return Err(Error::ZeroFrequency);
    }
    out_frequencies.iter_mut().for_each(|f| *f /= total);

    Ok(WindRose {
        directions: centres,
        frequencies: out_frequencies,
        speeds: out_speeds,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::rose::curve::{Linear, Pchip};
    use float_eq::assert_float_eq;
    use std::f64::consts::TAU;
    const EPSILON: f64 = 0.0000_01;

    fn resample(
        n_directions: usize,
        directions: &[f64],
        frequencies: &[f64],
        speeds: &[f64],
    ) -> Result<WindRose> {
        sample_wind_rose(n_directions, directions, frequencies, speeds, NUM_INT)
    }

    fn smooth_rose(n: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let directions = (0..n)
            .map(|i| i as f64 * FULL_TURN / n as f64)
            .collect::<Vec<f64>>();
        let weights = directions
            .iter()
            .map(|d| 1.0 + 0.5 * (d / FULL_TURN * TAU).cos())
            .collect::<Vec<f64>>();
        let total = weights.iter().sum::<f64>();
        let frequencies = weights.iter().map(|w| w / total).collect();
        let speeds = directions
            .iter()
            .map(|d| 8.0 + 2.0 * (d / FULL_TURN * TAU).sin())
            .collect();
        (directions, frequencies, speeds)
    }

    fn sparse_rose() -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        (
            vec![350.0, 10.0, 45.0, 100.0, 170.0, 200.0, 260.0, 300.0],
            vec![0.05, 0.2, 0.0, 0.0, 0.3, 0.15, 0.2, 0.1],
            vec![4.0, 9.0, 0.0, 0.0, 7.5, 6.0, 11.0, 5.0],
        )
    }

    #[test]
    fn rose_quarters() {
        let rose = sample_wind_rose(
            4,
            &[0.0, 90.0, 180.0, 270.0],
            &[0.25; 4],
            &[5.0, 6.0, 7.0, 8.0],
            NUM_INT,
        )
        .unwrap();
        assert_eq!(rose.directions, vec![0.0, 90.0, 180.0, 270.0]);
        assert_float_eq!(rose.frequencies, vec![0.25; 4], abs <= vec![EPSILON; 4]);
        assert_float_eq!(rose.speeds[1], 6.0, abs <= EPSILON);
        assert_float_eq!(rose.speeds[2], 7.0, abs <= EPSILON);
        // the jump from 8 back to 5 across north spreads into the neighbouring bins
        assert_float_eq!(rose.speeds[0], 5.375, abs <= 0.001);
        assert_float_eq!(rose.speeds[3], 7.625, abs <= 0.001);
        assert_float_eq!(rose.speeds[0] + rose.speeds[3], 13.0, abs <= 0.0001);
    }

    #[test]
    fn rose_quarters_turn_with_input() {
        let speeds = [5.0, 6.0, 7.0, 8.0];
        let base = resample(4, &[0.0, 90.0, 180.0, 270.0], &[0.25; 4], &speeds).unwrap();
        let turned = resample(4, &[90.0, 180.0, 270.0, 360.0], &[0.25; 4], &speeds).unwrap();
        for k in 0..4 {
            assert_float_eq!(turned.speeds[(k + 1) % 4], base.speeds[k], abs <= 0.001);
            assert_float_eq!(turned.frequencies[(k + 1) % 4], 0.25, abs <= EPSILON);
        }
    }

    #[test]
    fn rose_near_identity() {
        let (directions, frequencies, speeds) = smooth_rose(36);
        let rose = resample(36, &directions, &frequencies, &speeds).unwrap();
        assert_float_eq!(rose.directions, directions, abs <= vec![EPSILON; 36]);
        assert_float_eq!(rose.frequencies, frequencies, abs <= vec![0.0002; 36]);
        assert_float_eq!(rose.speeds, speeds, abs <= vec![0.02; 36]);
    }

    #[test]
    fn rose_invariants() {
        let (directions, frequencies, speeds) = sparse_rose();
        for n in [1, 3, 8, 50, 73] {
            let rose = resample(n, &directions, &frequencies, &speeds).unwrap();
            assert_eq!(rose.len(), n);
            assert_float_eq!(rose.frequencies.iter().sum::<f64>(), 1.0, abs <= 1e-9);
            assert!(rose.frequencies.iter().all(|&f| f >= 0.0));
            assert!(rose.speeds.iter().all(|&s| s >= 0.0 && s.is_finite()));
            assert_float_eq!(rose.width() * n as f64, FULL_TURN, abs <= EPSILON);
        }
    }

    #[test]
    fn rose_invariants_other_curves() {
        let (directions, frequencies, speeds) = sparse_rose();
        let pchip =
            sample_wind_rose_with::<Pchip>(24, &directions, &frequencies, &speeds, 100).unwrap();
        let linear =
            sample_wind_rose_with::<Linear>(24, &directions, &frequencies, &speeds, 100).unwrap();
        for rose in [pchip, linear] {
            assert_float_eq!(rose.frequencies.iter().sum::<f64>(), 1.0, abs <= 1e-9);
            assert!(rose.iter().all(|(_, f, s)| f >= 0.0 && s >= 0.0));
        }
    }

    #[test]
    fn rose_deterministic() {
        let (directions, frequencies, speeds) = sparse_rose();
        let first = resample(30, &directions, &frequencies, &speeds).unwrap();
        let second = resample(30, &directions, &frequencies, &speeds).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rose_order_independent() {
        let (directions, frequencies, speeds) = smooth_rose(12);
        let sorted = resample(8, &directions, &frequencies, &speeds).unwrap();
        let reversed = resample(
            8,
            &directions.iter().rev().copied().collect::<Vec<f64>>(),
            &frequencies.iter().rev().copied().collect::<Vec<f64>>(),
            &speeds.iter().rev().copied().collect::<Vec<f64>>(),
        )
        .unwrap();
        assert_float_eq!(sorted.frequencies, reversed.frequencies, abs <= vec![EPSILON; 8]);
        assert_float_eq!(sorted.speeds, reversed.speeds, abs <= vec![EPSILON; 8]);
    }

    #[test]
    fn rose_calm_bin_keeps_speed_finite() {
        let rose = resample(
            4,
            &[0.0, 90.0, 180.0, 270.0],
            &[0.5, 0.0, 0.0, 0.5],
            &[5.0, 6.0, 7.0, 8.0],
        )
        .unwrap();
        assert!(rose.speeds.iter().all(|s| s.is_finite()));
        assert_float_eq!(rose.frequencies.iter().sum::<f64>(), 1.0, abs <= 1e-9);
    }

    #[test]
    fn rose_zero_frequency() {
        assert!(matches!(
            resample(4, &[0.0, 90.0, 180.0, 270.0], &[0.0; 4], &[5.0; 4]),
            Err(Error::ZeroFrequency)
        ));
    }

    #[test]
    fn rose_rejects_bad_input() {
        let dirs = [0.0, 120.0, 240.0];
        let freqs = [0.3, 0.3, 0.4];
        let speeds = [5.0, 6.0, 7.0];
        assert!(matches!(
            sample_wind_rose(4, &dirs, &freqs[..2], &speeds, NUM_INT),
            Err(Error::LengthMismatch { .. })
        ));
        assert!(matches!(
            sample_wind_rose(0, &dirs, &freqs, &speeds, NUM_INT),
            Err(Error::NoDirections)
        ));
        assert!(matches!(
            sample_wind_rose(4, &dirs, &freqs, &speeds, 501),
            Err(Error::OddQuadrature(501))
        ));
        assert!(matches!(
            sample_wind_rose(4, &dirs, &freqs, &speeds, 2),
            Err(Error::SparseQuadrature(2))
        ));
        assert!(matches!(
            sample_wind_rose(4, &[], &[], &[], NUM_INT),
            Err(Error::Empty)
        ));
        assert!(matches!(
            sample_wind_rose(4, &dirs, &[0.3, -0.1, 0.8], &speeds, NUM_INT),
            Err(Error::InvalidValue {
                field: "frequency",
                index: 1,
                ..
            })
        ));
        assert!(matches!(
            sample_wind_rose(4, &[0.0, 360.0, 240.0], &freqs, &speeds, NUM_INT),
            Err(Error::DuplicateDirection(_))
        ));
    }

    #[test]
    fn rose_single_sample() {
        let rose = resample(6, &[45.0], &[1.0], &[7.0]).unwrap();
        assert_float_eq!(rose.frequencies, vec![1.0 / 6.0; 6], abs <= vec![EPSILON; 6]);
        assert_float_eq!(rose.speeds, vec![7.0; 6], abs <= vec![EPSILON; 6]);
    }
}
