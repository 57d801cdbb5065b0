//! Crate-level integration tests exercising the algebra's cross-module
//! invariants, in the style of `schedule/tests.rs`'s separate test file.

use crate::constructors;
use crate::geometry;
use crate::interval::{Interval, IntervalSet};
use crate::mask::{partition_sample_n, Mask};

fn iset(pairs: &[(i64, i64)]) -> IntervalSet {
    IntervalSet::from_intervals(pairs.iter().map(|&(lo, hi)| Interval::new(lo, hi).unwrap()).collect()).unwrap()
}

fn is_post_order(conns: &[(u64, u64)]) -> bool {
    conns.windows(2).all(|w| (w[0].1, w[0].0) < (w[1].1, w[1].0))
}

#[test]
fn scenario_cross_full_is_a_rectangle_in_post_order() {
    let m = constructors::cross(iset(&[(0, 7)]), iset(&[(8, 15)]));
    let got = m.bounded_iterate(0, 8, 8, 16);
    assert_eq!(got.len(), 64);
    assert!(is_post_order(&got));
    assert_eq!(&got[..3], &[(0, 8), (1, 8), (2, 8)]);
    assert_eq!(got.last(), Some(&(7, 15)));
}

#[test]
fn scenario_cross_one_to_one_restricts_to_the_diagonal() {
    let m = constructors::cross(iset(&[(0, 7)]), iset(&[(1, 8)])).intersection(Mask::one_to_one());
    let got = m.bounded_iterate(0, 8, 1, 9);
    let expect: Vec<(u64, u64)> = (1..=7).map(|i| (i, i)).collect();
    assert_eq!(got, expect);
}

#[test]
fn scenario_full_minus_diagonal_excludes_equal_indices() {
    let full_sq = constructors::cross(iset(&[(0, 3)]), iset(&[(0, 3)]));
    let diag = constructors::cross(iset(&[(0, 3)]), iset(&[(0, 3)])).intersection(Mask::one_to_one());
    let m = full_sq.difference(diag);
    let got = m.bounded_iterate(0, 4, 0, 4);
    assert_eq!(got.len(), 12);
    assert!(got.iter().all(|&(i, j)| i != j));
    assert!(is_post_order(&got));
}

#[test]
fn scenario_constant_random_is_deterministic_and_concentrates_near_expected_rate() {
    let a = constructors::random(0.1, 7);
    let b = constructors::random(0.1, 7);
    let got_a = a.bounded_iterate(0, 100, 0, 100);
    let got_b = b.bounded_iterate(0, 100, 0, 100);
    assert_eq!(got_a, got_b);
    assert!(got_a.len() > 700 && got_a.len() < 1300);
}

#[test]
fn scenario_sample_n_partition_union_matches_unpartitioned_run() {
    let n = 15u64;
    let whole = partition_sample_n(100, &[iset(&[(0, (n - 1) as i64)])], iset(&[(0, (n - 1) as i64)]), 0, 99);
    let got_whole = whole.bounded_iterate(0, n, 0, n);

    let parts = vec![iset(&[(0, 4)]), iset(&[(10, 14)])];
    let p0 = partition_sample_n(100, &parts, iset(&[(0, (n - 1) as i64)]), 0, 99);
    let p1 = partition_sample_n(100, &parts, iset(&[(0, (n - 1) as i64)]), 1, 99);
    let mut union = p0.bounded_iterate(0, n, 0, n);
    union.extend(p1.bounded_iterate(0, n, 0, n));
    union.sort_by_key(|&(i, j)| (j, i));

    assert_eq!(union.len(), got_whole.len());
}

#[test]
fn scenario_negated_gaussian_is_nonpositive_for_the_negated_population() {
    let g = geometry::grid2d(10, 10.0, 10.0, 0.0, 0.0);
    let metric = geometry::euclid_metric_2d(g, g);
    let gaussian = constructors::gaussian(0.1, 0.3, metric);
    let negated = gaussian.neg();

    let e = iset(&[(0, 19)]);
    let i_pop = iset(&[(20, 29)]);
    let a = e.union(&i_pop);

    for i in a.bounded_iterate(a.min().unwrap(), a.max().unwrap() + 1) {
        if i >= 20 {
            assert!(negated.call(i, i) <= 0.0);
        }
    }
}

#[test]
fn interval_set_cardinality_identity_holds() {
    let s = iset(&[(0, 5), (10, 15)]);
    let t = iset(&[(3, 12)]);
    let union_len = s.union(&t).len().unwrap();
    let inter_len = s.intersection(&t).len().unwrap();
    assert_eq!(union_len + inter_len, s.len().unwrap() + t.len().unwrap());
}

#[test]
fn interval_set_count_matches_bounded_intersection_size() {
    let s = iset(&[(0, 9)]);
    assert_eq!(s.count(3, 7), 4);
}

#[test]
fn mask_algebra_laws_hold_over_a_finite_window() {
    let a = Mask::explicit(vec![(0, 0), (1, 1), (2, 0)]);
    let b = Mask::explicit(vec![(1, 1), (2, 2)]);

    let ab = a.intersection(b);
    let diff = Mask::explicit(vec![(0, 0), (1, 1), (2, 0)])
        .difference(Mask::explicit(vec![(0, 0), (1, 1), (2, 0)]));
    assert!(diff.bounded_iterate(0, 3, 0, 3).is_empty());

    let double_complement = Mask::explicit(vec![(0, 0)]).complement().complement();
    assert_eq!(
        double_complement.bounded_iterate(0, 2, 0, 2),
        Mask::explicit(vec![(0, 0)]).bounded_iterate(0, 2, 0, 2)
    );

    let transposed_twice = Mask::explicit(vec![(0, 1), (1, 0)])
        .transpose()
        .unwrap()
        .transpose()
        .unwrap();
    assert_eq!(
        transposed_twice.bounded_iterate(0, 2, 0, 2),
        Mask::explicit(vec![(0, 1), (1, 0)]).bounded_iterate(0, 2, 0, 2)
    );

    assert_eq!(ab.bounded_iterate(0, 3, 0, 3), vec![(1, 1)]);
}
