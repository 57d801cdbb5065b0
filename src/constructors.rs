//! The public constructor surface: the functions a caller composes to
//! build up a [`crate::connection_set::ConnectionSet`] or a bare
//! [`Mask`], mirroring the reference's module-level `full`, `oneToOne`,
//! `cross`, `random`, `randomN`, `fanIn`, `fanOut`, `disc`, `rectangle`,
//! `block`, `repeat`, `shift`, `transpose`, `fix` constructors
//! (`elementary.py`, `_elementary.py`, `_misc.py`).

use crate::error::Result;
use crate::geometry::Point2d;
use crate::interval::IntervalSet;
use crate::mask::{partition_fan_in, partition_sample_n, Mask};
use crate::value::ValueSet;

/// `full`: every `(i, j)`.
pub fn full() -> Mask {
    Mask::full()
}

/// `full(n)` / `full(n0, n1)`: every connection within a finite rectangle.
pub fn full_bounded(n0: u64, n1: u64) -> Mask {
    Mask::cross(bounded_set(n0), bounded_set(n1))
}

fn bounded_set(n: u64) -> IntervalSet {
    if n == 0 {
        IntervalSet::empty()
    } else {
        IntervalSet::from_intervals(vec![crate::interval::Interval::new(0, n as i64 - 1).unwrap()])
            .unwrap()
    }
}

pub fn one_to_one() -> Mask {
    Mask::one_to_one()
}

/// `cross(set0, set1)`: the cross product of two interval sets.
pub fn cross(set0: IntervalSet, set1: IntervalSet) -> Mask {
    Mask::cross(set0, set1)
}

/// `random(p)`: a Bernoulli mask with constant connection probability `p`.
pub fn random(p: f64, seed: u64) -> Mask {
    Mask::random(p, seed)
}

/// `random(valueSet)`: a Bernoulli mask whose probability varies with
/// `(i, j)`, per `valueset`.
pub fn random_value(probability: ValueSet, seed: u64) -> Mask {
    Mask::random_value(probability, seed)
}

/// `random(N=n) * cross(rows, cols)`: samples exactly `n` connections
/// total, spread across `cols`. Errors if either population is infinite.
pub fn random_n(n: u64, rows: IntervalSet, cols: IntervalSet, seed: u64) -> Result<Mask> {
    Mask::sample_n(n, rows, cols, seed)
}

/// `random(fanIn=k) * cross(rows, cols)`: every target in `cols` gets
/// exactly `k` sources drawn from `rows`. Errors if either population is
/// infinite.
pub fn fan_in(k: u64, rows: IntervalSet, cols: IntervalSet, seed: u64) -> Result<Mask> {
    Mask::fan_in(k, rows, cols, seed)
}

/// `random(fanOut=k) * cross(rows, cols)`: every source in `rows` gets
/// exactly `k` targets drawn from `cols`. Implemented as `fanIn` on the
/// transposed rectangle, transposed back. Errors if either population is
/// infinite.
pub fn fan_out(k: u64, rows: IntervalSet, cols: IntervalSet, seed: u64) -> Result<Mask> {
    Mask::fan_out(k, rows, cols, seed)
}

/// `sampleN(total, row_partitions, cols, selected, seed)`: the
/// partition-consistent form of [`random_n`].
pub fn random_n_partition(
    total_n: u64,
    row_partitions: &[IntervalSet],
    cols: IntervalSet,
    selected: usize,
    seed: u64,
) -> Mask {
    partition_sample_n(total_n, row_partitions, cols, selected, seed)
}

/// Partition-consistent form of [`fan_in`].
pub fn fan_in_partition(
    fan_in: u64,
    row_partitions: &[IntervalSet],
    cols: IntervalSet,
    selected: usize,
    seed: u64,
) -> Mask {
    partition_fan_in(fan_in, row_partitions, cols, selected, seed)
}

/// `disc(radius, metric)`: connects `(i, j)` whenever `metric(i, j) <=
/// radius`, inside the given bounding rectangle.
pub fn disc(radius: f64, rows: IntervalSet, cols: IntervalSet, metric: impl Fn(u64, u64) -> f64) -> Result<Mask> {
    let mut connections = Vec::new();
    let lo0 = rows.min()?;
    let hi0 = rows.max()? + 1;
    let lo1 = cols.min()?;
    let hi1 = cols.max()? + 1;
    for j in lo1..hi1 {
        if !cols.contains(j) {
            continue;
        }
        for i in lo0..hi0 {
            if rows.contains(i) && metric(i, j) < radius {
                connections.push((i, j));
            }
        }
    }
    Ok(Mask::explicit(connections))
}

/// `rectangle(width, height, metric_coords)`: connects `(i, j)` whenever
/// both axis distances are within half the given width/height — an
/// axis-aligned analogue of [`disc`].
pub fn rectangle(
    width: f64,
    height: f64,
    rows: IntervalSet,
    cols: IntervalSet,
    coords: impl Fn(u64) -> Point2d,
) -> Result<Mask> {
    let lo0 = rows.min()?;
    let hi0 = rows.max()? + 1;
    let lo1 = cols.min()?;
    let hi1 = cols.max()? + 1;
    let mut connections = Vec::new();
    for j in lo1..hi1 {
        if !cols.contains(j) {
            continue;
        }
        let (xj, yj) = coords(j);
        for i in lo0..hi0 {
            if !rows.contains(i) {
                continue;
            }
            let (xi, yi) = coords(i);
            if (xi - xj).abs() < width / 2.0 && (yi - yj).abs() < height / 2.0 {
                connections.push((i, j));
            }
        }
    }
    Ok(Mask::explicit(connections))
}

/// `gaussian(sigma, cutoff) * metric`: a value set weighted by a Gaussian
/// falloff of `metric(i, j)`, zero beyond `cutoff`.
pub fn gaussian(sigma: f64, cutoff: f64, metric: impl Fn(u64, u64) -> f64 + Send + Sync + 'static) -> ValueSet {
    let sigma22 = 2.0 * sigma * sigma;
    ValueSet::from_fn(move |i, j| {
        let d = metric(i, j);
        if d < cutoff {
            (-d * d / sigma22).exp()
        } else {
            0.0
        }
    })
}

/// `block(m, n) * mask`.
pub fn block(m: u64, n: u64, mask: Mask) -> Mask {
    Mask::Block {
        m,
        n,
        mask: Box::new(mask),
    }
}

/// `repeat(m, n) * mask`.
pub fn repeat(m: u64, n: u64, mask: Mask) -> Mask {
    Mask::Repeat {
        m,
        n,
        mask: Box::new(mask),
    }
}

/// `shift(m, n) * mask`.
pub fn shift(m: i64, n: i64, mask: Mask) -> Mask {
    mask.shift(m, n)
}

/// `transpose * mask`.
pub fn transpose(mask: Mask) -> Result<Mask> {
    mask.transpose()
}

/// `fix * mask`.
pub fn fix(mask: Mask) -> Result<Mask> {
    mask.fix()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_bounded_matches_full_cross() {
        let m = full_bounded(3, 3);
        assert_eq!(
            m.bounded_iterate(0, 3, 0, 3),
            vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1), (0, 2), (1, 2), (2, 2)]
        );
    }

    #[test]
    fn disc_respects_radius() {
        let rows = bounded_set(5);
        let cols = bounded_set(5);
        let metric = |i: u64, j: u64| (i as f64 - j as f64).abs();
        let m = disc(1.5, rows, cols, metric).unwrap();
        let got = m.bounded_iterate(0, 5, 2, 3);
        assert_eq!(got, vec![(1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn gaussian_falls_off_with_distance_and_cuts_off() {
        let metric = |i: u64, j: u64| (i as f64 - j as f64).abs();
        let v = gaussian(1.0, 2.0, metric);
        assert_eq!(v.call(5, 5), 1.0);
        assert!(v.call(5, 6) < 1.0);
        assert_eq!(v.call(5, 8), 0.0);
    }
}
