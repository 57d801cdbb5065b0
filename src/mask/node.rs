//! L3: the mask algebra — a tagged-union expression tree over connectivity
//! patterns between two index populations, with a windowed iteration
//! protocol that never needs to materialize an infinite mask in full.
//!
//! Mirrors the reference `Mask` class hierarchy (`IntervalSetMask`,
//! `BinaryMask` and its `Intersection`/`MultisetSum`/`Difference`
//! subclasses, `TransposedMask`, `ShiftedMask`, the random-mask family) as
//! one recursive enum, the way `virolai::constraints::node::ConstraintExpr`
//! folds `Leaf`/`Not`/`Intersection`/`Union` into a single type rather than
//! a class per node kind.

use std::sync::RwLock;

use crate::error::{CsaError, Result};
use crate::interval::IntervalSet;
use crate::value::ValueSet;

use super::block::{block_window, repeat_window};
use super::fixed::FixedMask;
use super::ops::{difference_window, intersection_window, multiset_sum_window};
use super::random::{ConstantRandomMask, FanInRandomMask, SampleNRandomMask, ValueSetRandomMask};

/// A bounding box `(low0, high0, low1, high1)`: sources in `[low0, high0)`,
/// targets in `[low1, high1)`. `None` in either dimension means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub low0: u64,
    pub high0: Option<u64>,
    pub low1: u64,
    pub high1: Option<u64>,
}

impl Bounds {
    pub fn finite(low0: u64, high0: u64, low1: u64, high1: u64) -> Self {
        Bounds {
            low0,
            high0: Some(high0),
            low1,
            high1: Some(high1),
        }
    }

    pub fn unbounded() -> Self {
        Bounds {
            low0: 0,
            high0: None,
            low1: 0,
            high1: None,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.high0.is_some() && self.high1.is_some()
    }
}

/// The connectivity pattern between two index populations.
///
/// `arity`-0 connection sets in the reference terminology: a mask says
/// *whether* `(i, j)` is connected, nothing about associated values (those
/// live in [`crate::connection_set::ConnectionSet`]).
#[derive(Debug)]
pub enum Mask {
    /// Every `(i, j)` with `i, j >= 0`.
    Full,
    /// `(i, i)` for every `i`.
    OneToOne,
    /// A fixed, explicit list of connections.
    Explicit(Vec<(u64, u64)>),
    /// The cross product `set0 x set1` of two interval sets.
    Cross { rows: IntervalSet, cols: IntervalSet },
    Intersection(Box<Mask>, Box<Mask>),
    MultisetSum(Box<Mask>, Box<Mask>),
    Difference(Box<Mask>, Box<Mask>),
    Complement(Box<Mask>),
    Transposed(Box<Mask>),
    Shifted {
        mask: Box<Mask>,
        dm: i64,
        dn: i64,
    },
    Block {
        m: u64,
        n: u64,
        mask: Box<Mask>,
    },
    Repeat {
        m: u64,
        n: u64,
        mask: Box<Mask>,
    },
    /// Memoizes a finite mask's connections, computed once on first use.
    Fixed(FixedMask),
    ConstantRandom(ConstantRandomMask),
    ValueSetRandom(ValueSetRandomMask),
    SampleN(SampleNRandomMask),
    FanIn(FanInRandomMask),
    /// `fanOut(k) * m == transpose(fanIn(k) * transpose(m))`.
    FanOut(FanInRandomMask),
}

impl Mask {
    pub fn full() -> Mask {
        Mask::Full
    }

    pub fn one_to_one() -> Mask {
        Mask::OneToOne
    }

    pub fn explicit(mut connections: Vec<(u64, u64)>) -> Mask {
        connections.sort_by_key(|&(i, j)| (j, i));
        connections.dedup();
        Mask::Explicit(connections)
    }

    pub fn cross(rows: IntervalSet, cols: IntervalSet) -> Mask {
        Mask::Cross { rows, cols }
    }

    /// A Bernoulli mask with constant connection probability `p`.
    pub fn random(p: f64, seed: u64) -> Mask {
        Mask::ConstantRandom(ConstantRandomMask::new(p, seed))
    }

    /// A Bernoulli mask whose connection probability varies with `(i, j)`.
    pub fn random_value(probability: ValueSet, seed: u64) -> Mask {
        Mask::ValueSetRandom(ValueSetRandomMask::new(probability, seed))
    }

    /// Samples exactly `n` connections total, sources drawn from `rows`
    /// and spread across the targets in `cols`. Both must be finite: the
    /// reference raises on a `SampleNRandomMask` built over an unbounded
    /// interval set, since there is no way to draw "uniformly" from an
    /// infinite source population.
    pub fn sample_n(n: u64, rows: IntervalSet, cols: IntervalSet, seed: u64) -> Result<Mask> {
        require_finite_operand(&rows, &cols)?;
        Ok(Mask::SampleN(SampleNRandomMask::new(n, rows, cols, seed)))
    }

    /// Every target in `cols` gets exactly `fan_in` sources drawn from
    /// `rows`. Both must be finite, for the same reason as [`Mask::sample_n`].
    pub fn fan_in(fan_in: u64, rows: IntervalSet, cols: IntervalSet, seed: u64) -> Result<Mask> {
        require_finite_operand(&rows, &cols)?;
        Ok(Mask::FanIn(FanInRandomMask::new(fan_in, rows, cols, seed)))
    }

    /// Every source in `rows` gets exactly `fan_out` targets drawn from
    /// `cols`: `fanOut(k) * cross(rows, cols) == transpose(fanIn(k) *
    /// cross(cols, rows))`.
    pub fn fan_out(fan_out: u64, rows: IntervalSet, cols: IntervalSet, seed: u64) -> Result<Mask> {
        require_finite_operand(&rows, &cols)?;
        Ok(Mask::FanOut(FanInRandomMask::new(fan_out, cols, rows, seed)))
    }

    pub fn is_finite(&self) -> bool {
        self.bounds().is_finite()
    }

    /// The natural bounding box of a finite mask; unbounded dimensions for
    /// infinite ones (`Full`, a `Cross` over a complement, etc).
    pub fn bounds(&self) -> Bounds {
        match self {
            Mask::Full => Bounds::unbounded(),
            Mask::OneToOne => Bounds::unbounded(),
            Mask::Explicit(cs) => {
                if cs.is_empty() {
                    return Bounds::finite(0, 0, 0, 0);
                }
                let low0 = cs.iter().map(|c| c.0).min().unwrap();
                let high0 = cs.iter().map(|c| c.0).max().unwrap() + 1;
                let low1 = cs.first().unwrap().1;
                let high1 = cs.last().unwrap().1 + 1;
                Bounds::finite(low0, high0, low1, high1)
            }
            Mask::Cross { rows, cols } => Bounds {
                low0: rows.min().unwrap_or(0),
                high0: rows.max().ok().map(|m| m + 1),
                low1: cols.min().unwrap_or(0),
                high1: cols.max().ok().map(|m| m + 1),
            },
            Mask::Intersection(a, b) => {
                let ab = a.bounds();
                if ab.is_finite() {
                    ab
                } else {
                    b.bounds()
                }
            }
            Mask::MultisetSum(a, b) => max_bounds(a.bounds(), b.bounds()),
            Mask::Difference(a, _) => a.bounds(),
            Mask::Complement(_) => Bounds::unbounded(),
            Mask::Transposed(m) => m.bounds().transpose(),
            Mask::Shifted { mask, dm, dn } => mask.bounds().shift(*dm, *dn),
            Mask::Block { m, n, mask } => mask.bounds().scale(*m, *n),
            Mask::Repeat { .. } => Bounds::unbounded(),
            Mask::Fixed(fm) => fm.bounds(),
            Mask::ConstantRandom(cr) => cr.bounds(),
            Mask::ValueSetRandom(vr) => vr.bounds(),
            Mask::SampleN(sn) => sn.bounds(),
            Mask::FanIn(fi) => fi.bounds(),
            Mask::FanOut(fi) => fi.bounds().transpose(),
        }
    }

    /// Resets every random leaf's generator to its captured start state.
    ///
    /// Call once before a batch of [`Mask::bounded_iterate`] calls that
    /// must be mutually consistent (the two-phase windowed iteration
    /// protocol); every subsequent call within that batch replays
    /// deterministically from here.
    pub fn begin_iteration(&self) {
        match self {
            Mask::Intersection(a, b)
            | Mask::MultisetSum(a, b)
            | Mask::Difference(a, b) => {
                a.begin_iteration();
                b.begin_iteration();
            }
            Mask::Complement(m)
            | Mask::Transposed(m)
            | Mask::Shifted { mask: m, .. }
            | Mask::Block { mask: m, .. }
            | Mask::Repeat { mask: m, .. } => m.begin_iteration(),
            Mask::ConstantRandom(cr) => cr.restart(),
            Mask::ValueSetRandom(vr) => vr.restart(),
            Mask::SampleN(sn) => sn.restart(),
            Mask::FanIn(fi) | Mask::FanOut(fi) => fi.restart(),
            _ => {}
        }
    }

    /// Materializes every connection in `[low0, high0) x [low1, high1)`,
    /// sorted in post-order (`j` major, `i` minor).
    ///
    /// This is the windowed-iteration protocol's second phase. It returns a
    /// concrete `Vec` rather than a lazy stream: a deliberate simplification
    /// over the reference implementation's coroutine-style generators,
    /// justified by [`FixedMask`] already doing the same eager
    /// materialization in the original.
    pub fn bounded_iterate(&self, low0: u64, high0: u64, low1: u64, high1: u64) -> Vec<(u64, u64)> {
        if high0 <= low0 || high1 <= low1 {
            return Vec::new();
        }
        match self {
            Mask::Full => {
                let mut out = Vec::new();
                for j in low1..high1 {
                    for i in low0..high0 {
                        out.push((i, j));
                    }
                }
                out
            }
            Mask::OneToOne => {
                let lo = low0.max(low1);
                let hi = high0.min(high1);
                (lo..hi).map(|i| (i, i)).collect()
            }
            Mask::Explicit(cs) => cs
                .iter()
                .copied()
                .filter(|&(i, j)| i >= low0 && i < high0 && j >= low1 && j < high1)
                .collect(),
            Mask::Cross { rows, cols } => {
                let mut out = Vec::new();
                for j in cols.bounded_iterate(low1, high1) {
                    for i in rows.bounded_iterate(low0, high0) {
                        out.push((i, j));
                    }
                }
                out.sort_by_key(|&(i, j)| (j, i));
                out
            }
            Mask::Intersection(a, b) => {
                let wa = a.bounded_iterate(low0, high0, low1, high1);
                let wb = b.bounded_iterate(low0, high0, low1, high1);
                intersection_window(wa, wb)
            }
            Mask::MultisetSum(a, b) => {
                let wa = a.bounded_iterate(low0, high0, low1, high1);
                let wb = b.bounded_iterate(low0, high0, low1, high1);
                multiset_sum_window(wa, wb)
            }
            Mask::Difference(a, b) => {
                let wa = a.bounded_iterate(low0, high0, low1, high1);
                let wb = b.bounded_iterate(low0, high0, low1, high1);
                difference_window(wa, wb)
            }
            Mask::Complement(m) => {
                let present = m.bounded_iterate(low0, high0, low1, high1);
                let present: std::collections::HashSet<_> = present.into_iter().collect();
                let mut out = Vec::new();
                for j in low1..high1 {
                    for i in low0..high0 {
                        if !present.contains(&(i, j)) {
                            out.push((i, j));
                        }
                    }
                }
                out
            }
            Mask::Transposed(m) => {
                let mut out: Vec<(u64, u64)> = m
                    .bounded_iterate(low1, high1, low0, high0)
                    .into_iter()
                    .map(|(i, j)| (j, i))
                    .collect();
                out.sort_by_key(|&(i, j)| (j, i));
                out
            }
            Mask::Shifted { mask, dm, dn } => {
                let src_low0 = shift_bound(low0, -dm);
                let src_high0 = shift_bound(high0, -dm);
                let src_low1 = shift_bound(low1, -dn);
                let src_high1 = shift_bound(high1, -dn);
                mask.bounded_iterate(src_low0, src_high0, src_low1, src_high1)
                    .into_iter()
                    .filter_map(|(i, j)| {
                        let ni = i as i64 + dm;
                        let nj = j as i64 + dn;
                        if ni >= 0 && nj >= 0 {
                            Some((ni as u64, nj as u64))
                        } else {
                            None
                        }
                    })
                    .collect()
            }
            Mask::Block { m, n, mask } => block_window(mask, *m, *n, low0, high0, low1, high1),
            Mask::Repeat { m, n, mask } => repeat_window(mask, *m, *n, low0, high0, low1, high1),
            Mask::Fixed(fm) => fm.bounded_iterate(low0, high0, low1, high1),
            Mask::ConstantRandom(cr) => cr.bounded_iterate(low0, high0, low1, high1),
            Mask::ValueSetRandom(vr) => vr.bounded_iterate(low0, high0, low1, high1),
            Mask::SampleN(sn) => sn.bounded_iterate(low0, high0, low1, high1),
            Mask::FanIn(fi) => fi.bounded_iterate(low0, high0, low1, high1),
            Mask::FanOut(fi) => {
                let mut out: Vec<(u64, u64)> = fi
                    .bounded_iterate(low1, high1, low0, high0)
                    .into_iter()
                    .map(|(i, j)| (j, i))
                    .collect();
                out.sort_by_key(|&(i, j)| (j, i));
                out
            }
        }
    }

    pub fn intersection(self, other: Mask) -> Mask {
        Mask::Intersection(Box::new(self), Box::new(other))
    }

    pub fn multiset_sum(self, other: Mask) -> Result<Mask> {
        if let (Mask::Cross { rows: r0, cols: c0 }, Mask::Cross { rows: r1, cols: c1 }) =
            (&self, &other)
        {
            if r0.intersection(r1).is_empty() || c0.intersection(c1).is_empty() {
                return Ok(Mask::Cross {
                    rows: r0.union(r1),
                    cols: c0.union(c1),
                });
            }
            return Err(CsaError::OverlappingMaskSum {
                i: r0.min().unwrap_or(0),
                j: c0.min().unwrap_or(0),
            });
        }
        Ok(Mask::MultisetSum(Box::new(self), Box::new(other)))
    }

    pub fn difference(self, other: Mask) -> Mask {
        Mask::Difference(Box::new(self), Box::new(other))
    }

    pub fn complement(self) -> Mask {
        match self {
            Mask::Complement(inner) => *inner,
            other => Mask::Complement(Box::new(other)),
        }
    }

    pub fn transpose(self) -> Result<Mask> {
        if !self.is_finite() {
            return Err(CsaError::WrongOperandClass {
                expected: "finite mask",
                found: "infinite mask",
            });
        }
        Ok(match self {
            Mask::Transposed(inner) => *inner,
            Mask::Cross { rows, cols } => Mask::Cross { rows: cols, cols: rows },
            other => Mask::Transposed(Box::new(other)),
        })
    }

    pub fn shift(self, dm: i64, dn: i64) -> Mask {
        match self {
            Mask::Cross { rows, cols } => Mask::Cross {
                rows: rows.shift(dm),
                cols: cols.shift(dn),
            },
            Mask::Shifted { mask, dm: m0, dn: n0 } => Mask::Shifted {
                mask,
                dm: m0 + dm,
                dn: n0 + dn,
            },
            other => Mask::Shifted {
                mask: Box::new(other),
                dm,
                dn,
            },
        }
    }

    pub fn fix(self) -> Result<Mask> {
        if !self.is_finite() {
            return Err(CsaError::InfiniteOperation(
                "cannot fix an infinite mask".into(),
            ));
        }
        Ok(Mask::Fixed(FixedMask::materialize(&self)))
    }

    /// `true` if this mask has no connections at all.
    pub fn is_empty(&self) -> Result<bool> {
        let b = self.bounds();
        if !b.is_finite() {
            return Err(CsaError::InfiniteOperation(
                "cannot check emptiness of an infinite mask".into(),
            ));
        }
        self.begin_iteration();
        Ok(self
            .bounded_iterate(b.low0, b.high0.unwrap(), b.low1, b.high1.unwrap())
            .is_empty())
    }

    /// Iterates every connection of a finite mask with the paired value sets.
    pub fn iter_with_values<'a>(
        &'a self,
        values: &'a [ValueSet],
    ) -> Result<Vec<(u64, u64, Vec<f64>)>> {
        let b = self.bounds();
        if !b.is_finite() {
            return Err(CsaError::InfiniteOperation(
                "attempt to retrieve iterator over infinite mask".into(),
            ));
        }
        self.begin_iteration();
        Ok(self
            .bounded_iterate(b.low0, b.high0.unwrap(), b.low1, b.high1.unwrap())
            .into_iter()
            .map(|(i, j)| (i, j, values.iter().map(|v| v.call(i, j)).collect()))
            .collect())
    }

    /// A short, stable tag naming this node's variant, independent of its
    /// operands — e.g. for an external serializer (XML `apply`/`bind`
    /// tags) building a tree of `(tag, operands)` without matching on
    /// [`Mask`] itself.
    pub fn node_kind(&self) -> &'static str {
        match self {
            Mask::Full => "full",
            Mask::OneToOne => "oneToOne",
            Mask::Explicit(_) => "explicit",
            Mask::Cross { .. } => "cross",
            Mask::Intersection(..) => "intersection",
            Mask::MultisetSum(..) => "multisetSum",
            Mask::Difference(..) => "difference",
            Mask::Complement(_) => "complement",
            Mask::Transposed(_) => "transpose",
            Mask::Shifted { .. } => "shift",
            Mask::Block { .. } => "block",
            Mask::Repeat { .. } => "repeat",
            Mask::Fixed(_) => "fix",
            Mask::ConstantRandom(_) => "randomConstant",
            Mask::ValueSetRandom(_) => "randomValueSet",
            Mask::SampleN(_) => "randomN",
            Mask::FanIn(_) => "fanIn",
            Mask::FanOut(_) => "fanOut",
        }
    }

    /// This node's direct operands, in the order an XML `apply` element
    /// would list them (empty for leaves).
    pub fn children(&self) -> Vec<&Mask> {
        match self {
            Mask::Full
            | Mask::OneToOne
            | Mask::Explicit(_)
            | Mask::Cross { .. }
            | Mask::ConstantRandom(_)
            | Mask::ValueSetRandom(_)
            | Mask::SampleN(_)
            | Mask::FanIn(_)
            | Mask::FanOut(_)
            | Mask::Fixed(_) => Vec::new(),
            Mask::Intersection(a, b) | Mask::MultisetSum(a, b) | Mask::Difference(a, b) => {
                vec![a.as_ref(), b.as_ref()]
            }
            Mask::Complement(m)
            | Mask::Transposed(m)
            | Mask::Shifted { mask: m, .. }
            | Mask::Block { mask: m, .. }
            | Mask::Repeat { mask: m, .. } => vec![m.as_ref()],
        }
    }

    /// Visits every node in the expression tree in pre-order (this node,
    /// then each child's subtree left to right). The reflection primitive
    /// an external serializer (e.g. CSA's XML adapter) needs to walk the
    /// tree without depending on [`Mask`]'s internal representation.
    pub fn visit_preorder<'a, F: FnMut(&'a Mask)>(&'a self, visitor: &mut F) {
        visitor(self);
        for child in self.children() {
            child.visit_preorder(visitor);
        }
    }

    /// Total number of nodes in this expression tree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(|c| c.node_count()).sum::<usize>()
    }
}

/// Rejects an unbounded `rows`/`cols` pair for generators (`sampleN`,
/// `fanIn`, `fanOut`) that need to draw uniformly over a finite population.
fn require_finite_operand(rows: &IntervalSet, cols: &IntervalSet) -> Result<()> {
    if rows.len().is_none() || cols.len().is_none() {
        return Err(CsaError::WrongOperandClass {
            expected: "finite IntervalSet",
            found: "infinite IntervalSet",
        });
    }
    Ok(())
}

fn shift_bound(b: u64, delta: i64) -> u64 {
    let shifted = b as i64 + delta;
    shifted.max(0) as u64
}

fn max_bounds(a: Bounds, b: Bounds) -> Bounds {
    Bounds {
        low0: a.low0.min(b.low0),
        high0: match (a.high0, b.high0) {
            (Some(x), Some(y)) => Some(x.max(y)),
            _ => None,
        },
        low1: a.low1.min(b.low1),
        high1: match (a.high1, b.high1) {
            (Some(x), Some(y)) => Some(x.max(y)),
            _ => None,
        },
    }
}

impl Bounds {
    fn transpose(self) -> Bounds {
        Bounds {
            low0: self.low1,
            high0: self.high1,
            low1: self.low0,
            high1: self.high0,
        }
    }

    fn shift(self, dm: i64, dn: i64) -> Bounds {
        Bounds {
            low0: shift_bound(self.low0, dm),
            high0: self.high0.map(|h| shift_bound(h, dm)),
            low1: shift_bound(self.low1, dn),
            high1: self.high1.map(|h| shift_bound(h, dn)),
        }
    }

    fn scale(self, m: u64, n: u64) -> Bounds {
        Bounds {
            low0: self.low0 * m,
            high0: self.high0.map(|h| h * m),
            low1: self.low1 * n,
            high1: self.high1.map(|h| h * n),
        }
    }
}

/// A read-write guarded slot used by random-mask leaves to hold interior
/// generator state reachable through a shared `&Mask` tree.
pub(crate) type Cell<T> = RwLock<T>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::Interval;

    fn interval_set(pairs: &[(i64, i64)]) -> IntervalSet {
        IntervalSet::from_intervals(
            pairs
                .iter()
                .map(|&(lo, hi)| Interval::new(lo, hi).unwrap())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn full_mask_fills_window() {
        let m = Mask::full();
        let got = m.bounded_iterate(0, 2, 0, 2);
        assert_eq!(got, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn one_to_one_restricted_to_window() {
        let m = Mask::one_to_one();
        assert_eq!(m.bounded_iterate(0, 5, 2, 4), vec![(2, 2), (3, 3)]);
    }

    #[test]
    fn cross_mask_is_post_order() {
        let rows = interval_set(&[(0, 1)]);
        let cols = interval_set(&[(0, 1)]);
        let m = Mask::cross(rows, cols);
        assert_eq!(m.bounded_iterate(0, 2, 0, 2), vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn intersection_of_crosses() {
        let a = Mask::cross(interval_set(&[(0, 3)]), interval_set(&[(0, 3)]));
        let b = Mask::cross(interval_set(&[(1, 2)]), interval_set(&[(1, 2)]));
        let m = a.intersection(b);
        assert_eq!(m.bounded_iterate(0, 4, 0, 4), vec![(1, 1), (2, 1), (1, 2), (2, 2)]);
    }

    #[test]
    fn intersection_bounds_fall_back_to_the_finite_operand_on_either_side() {
        let rows = interval_set(&[(0, 7)]);
        let cols = interval_set(&[(0, 7)]);
        let finite = Mask::cross(rows, cols);

        let left_infinite = Mask::full().intersection(
            Mask::cross(interval_set(&[(0, 7)]), interval_set(&[(0, 7)])),
        );
        assert!(left_infinite.is_finite());
        assert_eq!(left_infinite.bounds(), finite.bounds());

        let right_infinite = Mask::cross(interval_set(&[(0, 7)]), interval_set(&[(0, 7)]))
            .intersection(Mask::full());
        assert!(right_infinite.is_finite());
        assert_eq!(right_infinite.bounds(), finite.bounds());
    }

    #[test]
    fn difference_removes_matching_connections() {
        let a = Mask::explicit(vec![(0, 0), (1, 0), (2, 0)]);
        let b = Mask::explicit(vec![(1, 0)]);
        let m = a.difference(b);
        assert_eq!(m.bounded_iterate(0, 3, 0, 1), vec![(0, 0), (2, 0)]);
    }

    #[test]
    fn complement_of_explicit_within_window() {
        let a = Mask::explicit(vec![(0, 0)]);
        let m = a.complement();
        assert_eq!(m.bounded_iterate(0, 2, 0, 1), vec![(1, 0)]);
    }

    #[test]
    fn transpose_swaps_indices_and_stays_post_order() {
        let m = Mask::explicit(vec![(0, 1), (1, 0)]).transpose().unwrap();
        assert_eq!(m.bounded_iterate(0, 2, 0, 2), vec![(1, 0), (0, 1)]);
    }

    #[test]
    fn shift_drops_out_of_range_sources() {
        let m = Mask::one_to_one().shift(-2, 0);
        assert_eq!(m.bounded_iterate(0, 3, 0, 3), vec![(0, 2)]);
    }

    #[test]
    fn node_kind_and_children_describe_a_composite_tree() {
        let m = Mask::one_to_one().complement().intersection(Mask::full());
        assert_eq!(m.node_kind(), "intersection");
        let kinds: Vec<&'static str> = m.children().iter().map(|c| c.node_kind()).collect();
        assert_eq!(kinds, vec!["complement", "full"]);
        assert_eq!(m.node_count(), 3);
    }

    #[test]
    fn visit_preorder_walks_every_node_once() {
        let m = Mask::explicit(vec![(0, 0)]).difference(Mask::one_to_one());
        let mut seen = Vec::new();
        m.visit_preorder(&mut |node| seen.push(node.node_kind()));
        assert_eq!(seen, vec!["difference", "explicit", "oneToOne"]);
    }

    #[test]
    fn fix_memoizes_a_finite_mask() {
        let m = Mask::one_to_one().shift(0, 0);
        let bounded = Mask::cross(interval_set(&[(0, 4)]), interval_set(&[(0, 4)]))
            .intersection(m)
            .fix()
            .unwrap();
        assert_eq!(bounded.bounded_iterate(0, 5, 0, 5).len(), 5);
    }
}
