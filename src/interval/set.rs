//! Canonical sets of closed integer intervals.
//!
//! An [`IntervalSet`] is the engine underneath every [`crate::mask::Mask`]:
//! a sorted, non-overlapping, merged list of closed intervals `[lo, hi]`
//! over the non-negative integers. Touching intervals (`hi + 1 == next.lo`)
//! are merged into one, matching the reference implementation's `coerce`.
//!
//! A set can also be the **complement** of such a list — conceptually
//! infinite, iterable only through [`IntervalSet::bounded_iterate`].

use std::fmt;

use crate::error::{CsaError, Result};

/// A closed interval `[lo, hi]` over the non-negative integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Interval {
    lo: u64,
    hi: u64,
}

impl Interval {
    /// Builds a single point or range, rejecting negative or inverted bounds.
    pub fn new(lo: i64, hi: i64) -> Result<Self> {
        if lo < 0 {
            return Err(CsaError::NegativeIndex(lo));
        }
        if hi < 0 {
            return Err(CsaError::NegativeIndex(hi));
        }
        if lo > hi {
            return Err(CsaError::MalformedInterval { lo, hi });
        }
        Ok(Interval {
            lo: lo as u64,
            hi: hi as u64,
        })
    }

    /// Builds a single-element interval `[n, n]`.
    pub fn point(n: u64) -> Self {
        Interval { lo: n, hi: n }
    }

    pub fn lo(&self) -> u64 {
        self.lo
    }

    pub fn hi(&self) -> u64 {
        self.hi
    }

    pub fn len(&self) -> u64 {
        self.hi - self.lo + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, n: u64) -> bool {
        n >= self.lo && n <= self.hi
    }

    fn touches_or_overlaps(&self, other: &Interval) -> bool {
        self.hi + 1 >= other.lo
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lo == self.hi {
            write!(f, "{}", self.lo)
        } else {
            write!(f, "[{}, {}]", self.lo, self.hi)
        }
    }
}

/// A canonical set of closed intervals, finite or the complement of a finite one.
///
/// The `complement` flag distinguishes the two readings of the same
/// underlying interval list, the way the reference implementation splits
/// `IntervalSet`/`ComplementaryIntervalSet` into a class pair; here it is a
/// single tagged type rather than a subclass, since the only thing that
/// differs is how the list is interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalSet {
    intervals: Vec<Interval>,
    /// `None` when the set is infinite (a non-empty complement).
    n_integers: Option<u64>,
    complement: bool,
}

impl Default for IntervalSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl IntervalSet {
    /// The empty finite interval set.
    pub fn empty() -> Self {
        IntervalSet {
            intervals: Vec::new(),
            n_integers: Some(0),
            complement: false,
        }
    }

    /// The universal set (complement of the empty set): all non-negative integers.
    pub fn universe() -> Self {
        IntervalSet {
            intervals: Vec::new(),
            n_integers: None,
            complement: true,
        }
    }

    /// Builds a finite interval set from unsorted, possibly-overlapping points.
    ///
    /// Sorts and merges touching/overlapping runs, exactly like the
    /// reference `coerce`: two input intervals that actually overlap (not
    /// merely touch) are rejected rather than silently merged, since that
    /// signals a malformed construction rather than a gap to close.
    pub fn from_intervals(mut raw: Vec<Interval>) -> Result<Self> {
        raw.sort();
        let mut merged: Vec<Interval> = Vec::with_capacity(raw.len());
        let mut n_integers = 0u64;
        for iv in raw {
            match merged.last_mut() {
                Some(last) if last.touches_or_overlaps(&iv) => {
                    if last.hi < iv.lo {
                        // Touching, not overlapping: extend.
                        n_integers += iv.hi - last.hi;
                        last.hi = iv.hi;
                    } else if iv.hi > last.hi {
                        return Err(CsaError::OverlappingIntervals {
                            prev_lo: last.lo,
                            prev_hi: last.hi,
                            lo: iv.lo,
                            hi: iv.hi,
                        });
                    } else {
                        return Err(CsaError::OverlappingIntervals {
                            prev_lo: last.lo,
                            prev_hi: last.hi,
                            lo: iv.lo,
                            hi: iv.hi,
                        });
                    }
                }
                _ => {
                    n_integers += iv.len();
                    merged.push(iv);
                }
            }
        }
        Ok(IntervalSet {
            intervals: merged,
            n_integers: Some(n_integers),
            complement: false,
        })
    }

    /// Wraps an already-canonical interval list without re-validating it.
    ///
    /// Used internally by set operations that produce a canonical result by
    /// construction (two-pointer merges). Debug builds assert the invariant.
    pub(crate) fn from_canonical_unchecked(
        intervals: Vec<Interval>,
        n_integers: Option<u64>,
        complement: bool,
    ) -> Self {
        debug_assert!(super::ops::is_canonical(&intervals));
        IntervalSet {
            intervals,
            n_integers,
            complement,
        }
    }

    pub fn is_complement(&self) -> bool {
        self.complement
    }

    /// `true` for an ordinary finite set, `false` for a (non-empty) complement.
    pub fn finite(&self) -> bool {
        !self.complement
    }

    pub(crate) fn raw_intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Cardinality of a finite set. `None` if infinite.
    pub fn len(&self) -> Option<u64> {
        self.n_integers
    }

    pub fn is_empty(&self) -> bool {
        !self.complement && self.intervals.is_empty()
    }

    pub fn contains(&self, n: u64) -> bool {
        for iv in &self.intervals {
            if n > iv.hi {
                continue;
            } else if n >= iv.lo {
                return !self.complement;
            } else {
                break;
            }
        }
        self.complement
    }

    /// Smallest element. Errors on the empty set.
    pub fn min(&self) -> Result<u64> {
        if self.complement {
            return Ok(if self.intervals.first().is_some_and(|iv| iv.lo == 0) {
                self.intervals[0].hi + 1
            } else {
                0
            });
        }
        self.intervals
            .first()
            .map(|iv| iv.lo)
            .ok_or_else(|| CsaError::InfiniteOperation("min() of an empty interval set".into()))
    }

    /// Largest element. Errors on an infinite (complement) set.
    pub fn max(&self) -> Result<u64> {
        if self.complement {
            return Err(CsaError::InfiniteOperation(
                "max() of a complementary interval set is unbounded".into(),
            ));
        }
        self.intervals
            .last()
            .map(|iv| iv.hi)
            .ok_or_else(|| CsaError::InfiniteOperation("max() of an empty interval set".into()))
    }

    /// Counts members of the set within `[low, high)`.
    pub fn count(&self, low: u64, high: u64) -> u64 {
        if high <= low {
            return 0;
        }
        if self.complement {
            let mut c = 0u64;
            let mut prev = low;
            for iv in &self.intervals {
                if iv.hi < low {
                    continue;
                }
                if iv.lo >= high {
                    break;
                }
                c += iv.lo.saturating_sub(prev);
                prev = iv.hi + 1;
            }
            if prev < high {
                c += high - prev;
            }
            c
        } else {
            let mut c = 0u64;
            for iv in &self.intervals {
                if iv.hi < low {
                    continue;
                }
                if iv.lo >= high {
                    break;
                }
                c += (iv.hi + 1).min(high) - iv.lo.max(low);
            }
            c
        }
    }

    /// Shifts every member by `n` (which may be negative); members that would
    /// fall below zero are dropped, mirroring the reference `shift`.
    pub fn shift(&self, n: i64) -> Self {
        if n == 0 || self.is_empty() {
            return self.clone();
        }
        let mut intervals = Vec::with_capacity(self.intervals.len());
        let mut n_integers = self.n_integers;
        for iv in &self.intervals {
            let lo = iv.lo as i64 + n;
            let hi = iv.hi as i64 + n;
            if lo >= 0 {
                intervals.push(Interval {
                    lo: lo as u64,
                    hi: hi as u64,
                });
            } else if hi >= 0 {
                intervals.push(Interval { lo: 0, hi: hi as u64 });
                if let Some(total) = n_integers.as_mut() {
                    *total = total.saturating_sub((-lo) as u64);
                }
            } else if let Some(total) = n_integers.as_mut() {
                *total = total.saturating_sub(iv.len());
            }
        }
        IntervalSet {
            intervals,
            n_integers,
            complement: self.complement,
        }
    }

    /// Materializes the members of the set that fall in `[low, high)`.
    ///
    /// This is the windowed-iteration protocol's `boundedIterate`: callers
    /// ask for a bounded window and get back a concrete, sorted `Vec<u64>`
    /// rather than a lazy stream, so a set that is conceptually infinite
    /// (a complement) can still be walked safely.
    pub fn bounded_iterate(&self, low: u64, high: u64) -> Vec<u64> {
        if high <= low {
            return Vec::new();
        }
        let mut out = Vec::new();
        if self.complement {
            let mut prev = low;
            for iv in &self.intervals {
                if iv.hi < low {
                    continue;
                }
                if iv.lo >= high {
                    break;
                }
                for e in prev..iv.lo.min(high) {
                    out.push(e);
                }
                prev = iv.hi + 1;
            }
            for e in prev..high {
                out.push(e);
            }
        } else {
            for iv in &self.intervals {
                if iv.hi < low {
                    continue;
                }
                if iv.lo >= high {
                    break;
                }
                for e in iv.lo.max(low)..(iv.hi + 1).min(high) {
                    out.push(e);
                }
            }
        }
        out
    }

    /// Detects a single arithmetic run of singleton intervals with common
    /// stride `s`, returning `(s, runs)`; falls back to `(1, self.intervals)`
    /// whenever the set isn't exactly that shape. Ported from the reference
    /// `skipIntervals`, used by block/repeat generators to recognize
    /// strided index sets without materializing them.
    pub fn skip_intervals(&self) -> (u64, Vec<Interval>) {
        if self.intervals.len() <= 1 || self.intervals[0].lo != self.intervals[0].hi {
            return (1, self.intervals.clone());
        }
        let skip = self.intervals[1].lo - self.intervals[0].lo;
        let mut res = Vec::new();
        let mut start = self.intervals[0].lo;
        let mut last = start;
        for iv in &self.intervals[1..] {
            if iv.lo != iv.hi {
                return (1, self.intervals.clone());
            }
            if iv.lo != last + skip {
                if iv.lo % skip != 0 {
                    return (1, self.intervals.clone());
                }
                res.push(Interval { lo: start, hi: last });
                start = iv.lo;
            }
            last = iv.lo;
        }
        res.push(Interval { lo: start, hi: last });
        (skip, res)
    }

    pub fn union(&self, other: &IntervalSet) -> IntervalSet {
        super::ops::union(self, other)
    }

    pub fn intersection(&self, other: &IntervalSet) -> IntervalSet {
        super::ops::intersection(self, other)
    }

    /// Flips finite and infinite: complementing a finite set makes the same
    /// interval list stand for everything *outside* it (so `n_integers`
    /// becomes `None`), and complementing an infinite set collapses it back
    /// to the finite count its interval list already encodes.
    pub fn complement(&self) -> IntervalSet {
        let n_integers = if self.complement {
            Some(self.intervals.iter().map(|iv| iv.len()).sum())
        } else {
            None
        };
        IntervalSet {
            intervals: self.intervals.clone(),
            n_integers,
            complement: !self.complement,
        }
    }
}

impl fmt::Display for IntervalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.complement {
            write!(f, "~")?;
        }
        write!(f, "{{")?;
        for (idx, iv) in self.intervals.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{iv}")?;
        }
        write!(f, "}}")
    }
}
