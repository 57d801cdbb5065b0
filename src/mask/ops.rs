//! Free-function algebra over materialized, post-order-sorted connection
//! windows, the counterpart to [`crate::interval::IntervalSet`]'s free
//! `union`/`intersection` functions but for `(i, j)` pairs.
//!
//! The reference implementation streams these via coroutine-style
//! generators walking two `(j, i)`-ordered iterators in lockstep
//! (`MaskIntersection.iterator`, `MaskMultisetSum.iterator`,
//! `MaskDifference.iterator`); here both operand windows are already fully
//! materialized `Vec`s, so the same lockstep merges collapse to ordinary
//! sorted-vector merges.

/// Connections present in both `a` and `b` (as multisets: a duplicate in
/// both contributes once per matched pair).
pub fn intersection_window(a: Vec<(u64, u64)>, b: Vec<(u64, u64)>) -> Vec<(u64, u64)> {
    let mut out = Vec::new();
    let mut i = 0usize;
    let mut j = 0usize;
    while i < a.len() && j < b.len() {
        match key(a[i]).cmp(&key(b[j])) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}

/// Every connection of `a` and `b`, as a multiset union (duplicates from
/// both sides are kept), sorted in post-order.
pub fn multiset_sum_window(mut a: Vec<(u64, u64)>, b: Vec<(u64, u64)>) -> Vec<(u64, u64)> {
    a.extend(b);
    a.sort_by_key(|&c| key(c));
    a
}

/// `a` with one occurrence of each connection also in `b` removed.
pub fn difference_window(a: Vec<(u64, u64)>, b: Vec<(u64, u64)>) -> Vec<(u64, u64)> {
    let mut out = Vec::with_capacity(a.len());
    let mut j = 0usize;
    for c in a {
        while j < b.len() && key(b[j]) < key(c) {
            j += 1;
        }
        if j < b.len() && key(b[j]) == key(c) {
            j += 1;
        } else {
            out.push(c);
        }
    }
    out
}

fn key(c: (u64, u64)) -> (u64, u64) {
    (c.1, c.0)
}
