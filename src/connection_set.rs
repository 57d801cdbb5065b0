//! L4: connection sets — a mask paired with `arity` value sets.
//!
//! Grounded on the reference `CSet`/`ConnectionSet`/`ExplicitCSet`/
//! `SubCSet`/`BinaryCSet` family. `ConnectionSet` plays the role of both
//! `CSet` (mask + value sets) and the arity-dispatching `ConnectionSet`
//! wrapper at once, since Rust's tuple-returning iterator already handles
//! "however many values" without needing `ConnectionSet.iter0/iter1/iter2`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{CsaError, Result};
use crate::mask::Mask;
use crate::value::ValueSet;

/// How to recover the value tuple for a connection already known to be in
/// the mask.
#[derive(Debug)]
enum ValueSource {
    /// Evaluate each value set directly at `(i, j)` — the common case.
    Direct(Vec<ValueSet>),
    /// A precomputed table, used when an operation (like
    /// [`ConnectionSet::multiset_sum`]) combines two connection sets whose
    /// value sets can't both be evaluated against the same mask anymore.
    /// Mirrors the reference `BinaryCSet.makeValueSetMap`'s memoized dict,
    /// including its "last write wins" handling of a connection produced
    /// by both operands. `Arc`-wrapped so [`ConnectionSet::value`] can hand
    /// back a slot-`k` accessor without cloning the whole table.
    Table(Arc<HashMap<(u64, u64), Vec<f64>>>),
}

#[derive(Debug)]
pub struct ConnectionSet {
    mask: Mask,
    values: ValueSource,
    arity: usize,
}

impl ConnectionSet {
    pub fn new(mask: Mask, values: Vec<ValueSet>) -> Self {
        let arity = values.len();
        ConnectionSet {
            mask,
            values: ValueSource::Direct(values),
            arity,
        }
    }

    /// A mask with no associated values (arity 0).
    pub fn from_mask(mask: Mask) -> Self {
        Self::new(mask, Vec::new())
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Every connection with its value tuple, in post-order.
    pub fn iter(&self) -> Result<Vec<(u64, u64, Vec<f64>)>> {
        match &self.values {
            ValueSource::Direct(values) => self.mask.iter_with_values(values),
            ValueSource::Table(table) => {
                let b = self.mask.bounds();
                if !b.is_finite() {
                    return Err(CsaError::InfiniteOperation(
                        "attempt to retrieve iterator over infinite connection-set".into(),
                    ));
                }
                self.mask.begin_iteration();
                Ok(self
                    .mask
                    .bounded_iterate(b.low0, b.high0.unwrap(), b.low1, b.high1.unwrap())
                    .into_iter()
                    .map(|(i, j)| {
                        let vals = table.get(&(i, j)).cloned().unwrap_or_default();
                        (i, j, vals)
                    })
                    .collect())
            }
        }
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.iter()?.len())
    }

    /// Intersects the mask with `other`, keeping this connection set's own
    /// value sets (mirrors `SubCSet`: the parent cset's values are reused
    /// unchanged against the narrower mask).
    pub fn intersection(self, other: Mask) -> ConnectionSet {
        ConnectionSet {
            mask: self.mask.intersection(other),
            values: self.values,
            arity: self.arity,
        }
    }

    pub fn difference(self, other: Mask) -> ConnectionSet {
        ConnectionSet {
            mask: self.mask.difference(other),
            values: self.values,
            arity: self.arity,
        }
    }

    /// Combines two connection sets of equal arity into their multiset
    /// sum. Values are memoized into a lookup table keyed by `(i, j)`
    /// (see [`ValueSource::Table`]) since the merged mask no longer has a
    /// single, uniform rule for evaluating either side's value sets.
    pub fn multiset_sum(self, other: ConnectionSet) -> Result<ConnectionSet> {
        if self.arity != other.arity {
            return Err(CsaError::ArityMismatch {
                expected: self.arity,
                found: other.arity,
            });
        }
        let arity = self.arity;
        let left = self.iter()?;
        let mask = self.mask.multiset_sum(other.mask)?;
        let right = other.iter()?;
        let mut table = HashMap::with_capacity(left.len() + right.len());
        for (i, j, v) in left {
            table.insert((i, j), v);
        }
        for (i, j, v) in right {
            table.insert((i, j), v);
        }
        Ok(ConnectionSet {
            mask,
            values: ValueSource::Table(Arc::new(table)),
            arity,
        })
    }

    /// `value(cs, k)`: the value set at slot `k` (spec §6), matching the
    /// reference `ExplicitCSet`'s "preserves the un-coerced user expression
    /// for each value slot so a consumer can recover the original form"
    /// (spec §4.4) for the common case where this connection set's values
    /// were supplied directly. For a [`ConnectionSet::multiset_sum`] result
    /// the original per-operand expressions no longer apply to the merged
    /// mask, so the returned value set instead reads slot `k` back out of
    /// the memoized table.
    ///
    /// Panics if `k >= self.arity()`, mirroring an out-of-range index into
    /// the reference's fixed-arity value-slot tuple.
    pub fn value(&self, k: usize) -> ValueSet {
        assert!(
            k < self.arity,
            "value slot {k} out of range for arity {}",
            self.arity
        );
        match &self.values {
            ValueSource::Direct(values) => values[k].clone(),
            ValueSource::Table(table) => {
                let table = Arc::clone(table);
                ValueSet::from_fn(move |i, j| table.get(&(i, j)).map(|v| v[k]).unwrap_or(0.0))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::{Interval, IntervalSet};

    fn interval_set(pairs: &[(i64, i64)]) -> IntervalSet {
        IntervalSet::from_intervals(
            pairs.iter().map(|&(lo, hi)| Interval::new(lo, hi).unwrap()).collect(),
        )
        .unwrap()
    }

    #[test]
    fn direct_values_evaluate_per_connection() {
        let mask = Mask::cross(interval_set(&[(0, 2)]), interval_set(&[(0, 1)]));
        let cset = ConnectionSet::new(mask, vec![ValueSet::from_fn(|i, j| (i * 10 + j) as f64)]);
        let got = cset.iter().unwrap();
        assert_eq!(got.len(), 6);
        assert_eq!(got[0], (0, 0, vec![0.0]));
    }

    #[test]
    fn value_recovers_a_direct_value_set_by_slot() {
        let mask = Mask::explicit(vec![(0, 0), (1, 0)]);
        let cset = ConnectionSet::new(
            mask,
            vec![ValueSet::constant(1.0), ValueSet::from_fn(|i, _j| i as f64)],
        );
        assert_eq!(cset.value(0).call(0, 0), 1.0);
        assert_eq!(cset.value(1).call(5, 0), 5.0);
    }

    #[test]
    fn value_reads_the_memoized_table_after_multiset_sum() {
        let a = ConnectionSet::new(Mask::explicit(vec![(0, 0)]), vec![ValueSet::constant(1.0)]);
        let b = ConnectionSet::new(Mask::explicit(vec![(1, 0)]), vec![ValueSet::constant(2.0)]);
        let combined = a.multiset_sum(b).unwrap();
        let v = combined.value(0);
        assert_eq!(v.call(0, 0), 1.0);
        assert_eq!(v.call(1, 0), 2.0);
    }

    #[test]
    fn arity_mismatch_is_rejected() {
        let m = Mask::full();
        let a = ConnectionSet::new(m.intersection(Mask::one_to_one()), vec![ValueSet::constant(1.0)]);
        let b = ConnectionSet::from_mask(Mask::one_to_one());
        let err = a.multiset_sum(b).unwrap_err();
        assert!(matches!(err, CsaError::ArityMismatch { .. }));
    }

    #[test]
    fn multiset_sum_combines_disjoint_masks() {
        let a = ConnectionSet::new(
            Mask::explicit(vec![(0, 0)]),
            vec![ValueSet::constant(1.0)],
        );
        let b = ConnectionSet::new(
            Mask::explicit(vec![(1, 0)]),
            vec![ValueSet::constant(2.0)],
        );
        let combined = a.multiset_sum(b).unwrap();
        let mut got = combined.iter().unwrap();
        got.sort_by_key(|c| c.0);
        assert_eq!(got, vec![(0, 0, vec![1.0]), (1, 0, vec![2.0])]);
    }
}
