//! Random-mask leaves: Bernoulli masks, value-set-driven probability masks,
//! and the sample-count/fan-in family that samples a fixed number of
//! sources per target.
//!
//! Grounded on `_elementary.py`'s `ConstantRandomMask`, `SampleNRandomMask`,
//! `FanInRandomMask` and `_misc.py`'s `ValueSetRandomMask`. Each keeps an
//! internal, interior-mutable [`CsaRng`] that [`super::node::Mask::begin_iteration`]
//! rewinds to its captured starting state, matching the reference's
//! `random.getstate()`/`random.setstate()` dance.

use std::sync::RwLock;

use rand::Rng;

use crate::interval::IntervalSet;
use crate::rng::{multinomial, CsaRng};
use crate::value::ValueSet;

use super::node::Bounds;

#[derive(Debug)]
pub struct ConstantRandomMask {
    p: f64,
    rng: RwLock<CsaRng>,
}

impl ConstantRandomMask {
    pub fn new(p: f64, seed: u64) -> Self {
        ConstantRandomMask {
            p,
            rng: RwLock::new(CsaRng::from_seed(seed)),
        }
    }

    pub fn restart(&self) {
        self.rng.write().unwrap().restart();
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::unbounded()
    }

    pub fn bounded_iterate(&self, low0: u64, high0: u64, low1: u64, high1: u64) -> Vec<(u64, u64)> {
        let mut guard = self.rng.write().unwrap();
        let mut out = Vec::new();
        for j in low1..high1 {
            for i in low0..high0 {
                if guard.rng().gen::<f64>() < self.p {
                    out.push((i, j));
                }
            }
        }
        out
    }
}

#[derive(Debug)]
pub struct ValueSetRandomMask {
    probability: ValueSet,
    rng: RwLock<CsaRng>,
}

impl ValueSetRandomMask {
    pub fn new(probability: ValueSet, seed: u64) -> Self {
        ValueSetRandomMask {
            probability,
            rng: RwLock::new(CsaRng::from_seed(seed)),
        }
    }

    pub fn restart(&self) {
        self.rng.write().unwrap().restart();
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::unbounded()
    }

    pub fn bounded_iterate(&self, low0: u64, high0: u64, low1: u64, high1: u64) -> Vec<(u64, u64)> {
        let mut guard = self.rng.write().unwrap();
        let mut out = Vec::new();
        for j in low1..high1 {
            for i in low0..high0 {
                if guard.rng().gen::<f64>() < self.probability.call(i, j) {
                    out.push((i, j));
                }
            }
        }
        out
    }
}

/// Shared machinery for `SampleNRandomMask`/`FanInRandomMask`: both draw a
/// per-target connection count, then sample that many source indices
/// uniformly (with replacement, deduplicated by the original's own
/// rejection-free design — a duplicate draw just produces one fewer
/// distinct source) from `rows`, for each target in `cols`.
#[derive(Debug)]
struct SampledCross {
    rows: IntervalSet,
    cols: IntervalSet,
    rng: RwLock<CsaRng>,
}

impl SampledCross {
    fn bounds(&self) -> Bounds {
        Bounds {
            low0: self.rows.min().unwrap_or(0),
            high0: self.rows.max().ok().map(|m| m + 1),
            low1: self.cols.min().unwrap_or(0),
            high1: self.cols.max().ok().map(|m| m + 1),
        }
    }

    /// Draws `count` source indices for one target, uniformly from the
    /// full `rows` ordinal range, keeping only those that land within the
    /// currently cached `sources` window — exactly the reference's
    /// `i < nSources` filter, which relies on callers windowing only the
    /// target axis and always passing the full source range.
    fn sample_target(
        rng: &mut CsaRng,
        n0_total: u64,
        sources: &[u64],
        count: u64,
    ) -> Vec<u64> {
        let mut s = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let idx = rng.rng().gen_range(0..n0_total);
            if let Some(&src) = sources.get(idx as usize) {
                s.push(src);
            }
        }
        s.sort_unstable();
        s
    }

    fn bounded_iterate(
        &self,
        low0: u64,
        high0: u64,
        low1: u64,
        high1: u64,
        per_target_at: impl Fn(usize) -> u64,
    ) -> Vec<(u64, u64)> {
        let n0_total = self.rows.len().unwrap_or(0);
        let sources = self.rows.bounded_iterate(low0, high0);
        let m0 = self.cols.count(0, low1) as usize;
        let targets = self.cols.bounded_iterate(low1, high1);

        let mut guard = self.rng.write().unwrap();
        let mut out = Vec::new();
        for (offset, j) in targets.into_iter().enumerate() {
            let target_ordinal = m0 + offset;
            // Re-seed from the captured start state plus this target's
            // ordinal (spec §4.3's "replacement for a missing jump-ahead"):
            // each target's source draw depends only on `(seed,
            // target_ordinal)`, never on which other targets were drawn in
            // this call or in an earlier one, so repeated or differently
            // windowed queries over the same target stay consistent.
            guard.reseed_for_offset(target_ordinal as u64);
            let count = per_target_at(target_ordinal);
            for i in Self::sample_target(&mut guard, n0_total, &sources, count) {
                out.push((i, j));
            }
        }
        out
    }
}

#[derive(Debug)]
pub struct SampleNRandomMask {
    n: u64,
    cross: SampledCross,
    per_target: RwLock<Option<Vec<u64>>>,
}

impl SampleNRandomMask {
    pub fn new(n: u64, rows: IntervalSet, cols: IntervalSet, seed: u64) -> Self {
        SampleNRandomMask {
            n,
            cross: SampledCross {
                rows,
                cols,
                rng: RwLock::new(CsaRng::from_seed(seed)),
            },
            per_target: RwLock::new(None),
        }
    }

    pub fn restart(&self) {
        self.cross.rng.write().unwrap().restart();
        *self.per_target.write().unwrap() = None;
    }

    pub fn bounds(&self) -> Bounds {
        self.cross.bounds()
    }

    fn ensure_per_target(&self) {
        let mut slot = self.per_target.write().unwrap();
        if slot.is_none() {
            let n1 = self.cross.cols.len().unwrap_or(0);
            let weights = vec![1.0; n1 as usize];
            let mut rng = self.cross.rng.write().unwrap();
            *slot = Some(multinomial(rng.rng(), self.n, &weights));
        }
    }

    pub fn bounded_iterate(&self, low0: u64, high0: u64, low1: u64, high1: u64) -> Vec<(u64, u64)> {
        self.ensure_per_target();
        let per_target = self.per_target.read().unwrap().clone().unwrap();
        self.cross
            .bounded_iterate(low0, high0, low1, high1, |idx| {
                per_target.get(idx).copied().unwrap_or(0)
            })
    }
}

#[derive(Debug)]
pub struct FanInRandomMask {
    fan_in: u64,
    cross: SampledCross,
}

impl FanInRandomMask {
    pub fn new(fan_in: u64, rows: IntervalSet, cols: IntervalSet, seed: u64) -> Self {
        FanInRandomMask {
            fan_in,
            cross: SampledCross {
                rows,
                cols,
                rng: RwLock::new(CsaRng::from_seed(seed)),
            },
        }
    }

    pub fn restart(&self) {
        self.cross.rng.write().unwrap().restart();
    }

    pub fn bounds(&self) -> Bounds {
        self.cross.bounds()
    }

    pub fn bounded_iterate(&self, low0: u64, high0: u64, low1: u64, high1: u64) -> Vec<(u64, u64)> {
        self.cross
            .bounded_iterate(low0, high0, low1, high1, |_idx| self.fan_in)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::Interval;

    fn interval_set(pairs: &[(i64, i64)]) -> IntervalSet {
        IntervalSet::from_intervals(
            pairs.iter().map(|&(lo, hi)| Interval::new(lo, hi).unwrap()).collect(),
        )
        .unwrap()
    }

    #[test]
    fn constant_random_is_deterministic_after_restart() {
        let m = ConstantRandomMask::new(0.5, 42);
        let first = m.bounded_iterate(0, 20, 0, 20);
        m.restart();
        let second = m.bounded_iterate(0, 20, 0, 20);
        assert_eq!(first, second);
    }

    #[test]
    fn fan_in_draws_fixed_count_per_target() {
        let rows = interval_set(&[(0, 99)]);
        let cols = interval_set(&[(0, 4)]);
        let m = FanInRandomMask::new(10, rows, cols, 1);
        let out = m.bounded_iterate(0, 100, 0, 5);
        let mut per_target = [0u32; 5];
        for (_, j) in &out {
            per_target[*j as usize] += 1;
        }
        assert!(per_target.iter().all(|&c| c <= 10));
    }

    #[test]
    fn sample_n_total_draws_sum_to_n() {
        let rows = interval_set(&[(0, 49)]);
        let cols = interval_set(&[(0, 9)]);
        let m = SampleNRandomMask::new(30, rows, cols, 2);
        let out = m.bounded_iterate(0, 50, 0, 10);
        assert!(out.len() as u64 <= 30);
    }

    #[test]
    fn sample_n_window_split_matches_full_query() {
        let rows = interval_set(&[(0, 19)]);
        let cols = interval_set(&[(0, 9)]);
        let whole = SampleNRandomMask::new(20, rows.clone(), cols.clone(), 9);
        let full = whole.bounded_iterate(0, 20, 0, 10);

        let split = SampleNRandomMask::new(20, rows, cols, 9);
        let mut combined = split.bounded_iterate(0, 20, 0, 4);
        combined.extend(split.bounded_iterate(0, 20, 4, 10));
        assert_eq!(full, combined);
    }
}
