//! Free-function set algebra over canonical interval lists.
//!
//! Kept separate from [`super::set::IntervalSet`] itself, the way the
//! teacher keeps `compute_union`/`compute_intersection`/`compute_complement`
//! apart from the `IntervalSet` type they operate on.

use super::set::{Interval, IntervalSet};

/// `true` if `intervals` is sorted by start with no two intervals
/// overlapping or touching.
pub fn is_canonical(intervals: &[Interval]) -> bool {
    intervals
        .windows(2)
        .all(|w| w[0].hi() + 1 < w[1].lo())
}

fn finite_finite_union(a: &[Interval], b: &[Interval]) -> (Vec<Interval>, u64) {
    let mut result = Vec::with_capacity(a.len() + b.len());
    let mut n = 0u64;
    let mut i = 0usize;
    let mut j = 0usize;

    fn merge_into(result: &mut Vec<Interval>, n: &mut u64, iv: Interval) {
        if let Some(last) = result.last_mut() {
            if last.hi() + 1 >= iv.lo() {
                if iv.hi() > last.hi() {
                    *n += iv.hi() - last.hi();
                    *last = Interval::new(last.lo() as i64, iv.hi() as i64).unwrap();
                }
                return;
            }
        }
        *n += iv.len();
        result.push(iv);
    }

    while i < a.len() && j < b.len() {
        if a[i].lo() <= b[j].lo() {
            merge_into(&mut result, &mut n, a[i]);
            i += 1;
        } else {
            merge_into(&mut result, &mut n, b[j]);
            j += 1;
        }
    }
    for iv in &a[i..] {
        merge_into(&mut result, &mut n, *iv);
    }
    for iv in &b[j..] {
        merge_into(&mut result, &mut n, *iv);
    }
    (result, n)
}

fn finite_finite_intersection(a: &[Interval], b: &[Interval]) -> (Vec<Interval>, u64) {
    let mut result = Vec::new();
    let mut n = 0u64;
    let mut i = 0usize;
    let mut j = 0usize;
    while i < a.len() && j < b.len() {
        let ia = a[i];
        let ib = b[j];
        if ia.hi() <= ib.hi() {
            if ia.hi() >= ib.lo() {
                let lower = ia.lo().max(ib.lo());
                n += ia.hi() - lower + 1;
                result.push(Interval::new(lower as i64, ia.hi() as i64).unwrap());
            }
            i += 1;
        } else {
            if ib.hi() >= ia.lo() {
                let lower = ia.lo().max(ib.lo());
                n += ib.hi() - lower + 1;
                result.push(Interval::new(lower as i64, ib.hi() as i64).unwrap());
            }
            j += 1;
        }
    }
    (result, n)
}

/// `a` with every member of `b` removed; both lists must already be the
/// *finite* raw interval lists of their sets (a complement's underlying
/// list, or a finite set's own list).
///
/// Walks both sorted lists once with a single persistent cursor into `b`,
/// the direct analogue of [`finite_finite_intersection`] rather than
/// `a ∩ ~b` expressed through [`intersection`]: routing difference through
/// intersection-of-a-complement would call back into `intersection`, which
/// for a complement operand dispatches to difference again — a recursion
/// with no base case. This computes the split directly instead.
fn finite_finite_difference(a: &[Interval], b: &[Interval]) -> (Vec<Interval>, u64) {
    let mut result = Vec::new();
    let mut n = 0u64;
    let mut j = 0usize;
    for &ia in a {
        let mut lo = ia.lo();
        let hi = ia.hi();
        while j < b.len() && b[j].hi() < lo {
            j += 1;
        }
        while lo <= hi && j < b.len() && b[j].lo() <= hi {
            let ib = b[j];
            if ib.lo() > lo {
                let seg_hi = ib.lo() - 1;
                result.push(Interval::new(lo as i64, seg_hi as i64).unwrap());
                n += seg_hi - lo + 1;
            }
            if ib.hi() > hi {
                lo = hi + 1;
                break;
            }
            lo = ib.hi() + 1;
            j += 1;
        }
        if lo <= hi {
            result.push(Interval::new(lo as i64, hi as i64).unwrap());
            n += hi - lo + 1;
        }
    }
    (result, n)
}

/// Union of two interval sets, dispatching on finiteness the way the
/// reference `IntervalSet.union`/`ComplementaryIntervalSet.union` do: a
/// union involving a complement is expressed via De Morgan directly against
/// the operands' raw (finite) interval lists, never by recursing back
/// through `intersection`/`difference`.
pub fn union(a: &IntervalSet, b: &IntervalSet) -> IntervalSet {
    match (a.is_complement(), b.is_complement()) {
        (false, false) => {
            if a.is_empty() {
                return b.clone();
            }
            if b.is_empty() {
                return a.clone();
            }
            let (intervals, n) = finite_finite_union(a.raw_intervals(), b.raw_intervals());
            IntervalSet::from_canonical_unchecked(intervals, Some(n), false)
        }
        // ~A' ∪ ~B' = ~(A' ∩ B')
        (true, true) => {
            let (intervals, _) = finite_finite_intersection(a.raw_intervals(), b.raw_intervals());
            IntervalSet::from_canonical_unchecked(intervals, None, true)
        }
        // ~A' ∪ B = ~(A' − B)
        (true, false) => {
            let (intervals, _) = finite_finite_difference(a.raw_intervals(), b.raw_intervals());
            IntervalSet::from_canonical_unchecked(intervals, None, true)
        }
        // A ∪ ~B' = ~(B' − A)
        (false, true) => {
            let (intervals, _) = finite_finite_difference(b.raw_intervals(), a.raw_intervals());
            IntervalSet::from_canonical_unchecked(intervals, None, true)
        }
    }
}

/// Intersection of two interval sets.
///
/// `finite ∩ finite` is a direct two-pointer merge; a complement operand
/// reduces straight to [`finite_finite_difference`] against the other
/// operand's raw list (`A ∩ ~B' = A − B'`), never by reconstructing a
/// complement value and recursing.
pub fn intersection(a: &IntervalSet, b: &IntervalSet) -> IntervalSet {
    match (a.is_complement(), b.is_complement()) {
        (false, false) => {
            let (intervals, n) = finite_finite_intersection(a.raw_intervals(), b.raw_intervals());
            IntervalSet::from_canonical_unchecked(intervals, Some(n), false)
        }
        // ~A' ∩ ~B' = ~(A' ∪ B')
        (true, true) => {
            let (intervals, _) = finite_finite_union(a.raw_intervals(), b.raw_intervals());
            IntervalSet::from_canonical_unchecked(intervals, None, true)
        }
        // A ∩ ~B' = A − B'
        (false, true) => {
            let (intervals, n) = finite_finite_difference(a.raw_intervals(), b.raw_intervals());
            IntervalSet::from_canonical_unchecked(intervals, Some(n), false)
        }
        // ~A' ∩ B = B − A'
        (true, false) => {
            let (intervals, n) = finite_finite_difference(b.raw_intervals(), a.raw_intervals());
            IntervalSet::from_canonical_unchecked(intervals, Some(n), false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(lo: i64, hi: i64) -> Interval {
        Interval::new(lo, hi).unwrap()
    }

    #[test]
    fn union_disjoint() {
        let a = IntervalSet::from_intervals(vec![iv(0, 2)]).unwrap();
        let b = IntervalSet::from_intervals(vec![iv(10, 12)]).unwrap();
        let u = union(&a, &b);
        assert_eq!(u.raw_intervals(), &[iv(0, 2), iv(10, 12)]);
    }

    #[test]
    fn union_overlapping() {
        let a = IntervalSet::from_intervals(vec![iv(0, 5)]).unwrap();
        let b = IntervalSet::from_intervals(vec![iv(3, 8)]).unwrap();
        let u = union(&a, &b);
        assert_eq!(u.raw_intervals(), &[iv(0, 8)]);
    }

    #[test]
    fn intersection_basic() {
        let a = IntervalSet::from_intervals(vec![iv(0, 5), iv(10, 15)]).unwrap();
        let b = IntervalSet::from_intervals(vec![iv(3, 12)]).unwrap();
        let i = intersection(&a, &b);
        assert_eq!(i.raw_intervals(), &[iv(3, 5), iv(10, 12)]);
    }

    #[test]
    fn intersection_with_complement_is_difference() {
        let a = IntervalSet::from_intervals(vec![iv(0, 9)]).unwrap();
        let hole = IntervalSet::from_intervals(vec![iv(3, 5)]).unwrap().complement();
        let i = intersection(&a, &hole);
        assert_eq!(i.raw_intervals(), &[iv(0, 2), iv(6, 9)]);
    }

    #[test]
    fn union_of_two_complements_is_complement_of_intersection() {
        // ~{0..5} ∪ ~{3..10} = ~({0..5} ∩ {3..10}) = ~{3,4,5}
        let a = IntervalSet::from_intervals(vec![iv(0, 5)]).unwrap().complement();
        let b = IntervalSet::from_intervals(vec![iv(3, 10)]).unwrap().complement();
        let u = union(&a, &b);
        assert!(u.is_complement());
        assert!(u.contains(20));
        assert!(!u.contains(4));
    }

    #[test]
    fn canonical_check() {
        assert!(is_canonical(&[iv(0, 2), iv(4, 6)]));
        assert!(!is_canonical(&[iv(0, 2), iv(3, 6)]));
        assert!(!is_canonical(&[iv(0, 4), iv(2, 6)]));
    }
}
