//! Partition-consistent construction: restricting a mask (or a random
//! generator) to one partition of the source population while keeping the
//! whole ensemble of partitions reproducible from one shared seed.
//!
//! Grounded on the reference `MaskPartition`/`CSetPartition`, which thread
//! a `state['partitions']`/`state['selected']`/`state['seed']` triple down
//! into `SampleNRandomMask`/`FanInRandomMask` so that, e.g., a `sampleN`
//! generator split across partitions draws its total `N` once (via a
//! shared multinomial over partition sizes) and then gives each partition
//! an independently-seeded, non-overlapping RNG sub-stream.
//!
//! `FanInRandomMask`'s per-partition split here is a simplification: the
//! original computes a per-*target* source distribution (weighted by which
//! partitions actually contain that target); this instead draws one
//! overall multinomial split of `fan_in` across partitions by partition row
//! count, applied uniformly to every target. Documented as an accepted
//! simplification in DESIGN.md.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::interval::IntervalSet;
use crate::rng::multinomial;

use super::node::Mask;
use super::random::{FanInRandomMask, SampleNRandomMask};

/// Restricts `mask` to connections whose source lies in `partition`.
pub fn restrict_to_partition(mask: Mask, partition: IntervalSet) -> Mask {
    Mask::cross(partition, IntervalSet::universe()).intersection(mask)
}

fn partition_seed(seed: u64, selected: usize) -> u64 {
    seed.wrapping_add(selected as u64).wrapping_mul(0x2545F4914F6CDD1D)
}

/// Builds the `selected`-th partition of a `sampleN(n) * cross(rows, cols)`
/// generator: `n` is split across `row_partitions` by a shared multinomial
/// draw from `seed`, and the selected partition gets its own independent
/// RNG sub-stream.
pub fn partition_sample_n(
    total_n: u64,
    row_partitions: &[IntervalSet],
    cols: IntervalSet,
    selected: usize,
    seed: u64,
) -> Mask {
    let sizes: Vec<f64> = row_partitions
        .iter()
        .map(|p| p.len().unwrap_or(0) as f64)
        .collect();
    let mut master = StdRng::seed_from_u64(seed);
    let split = multinomial(&mut master, total_n, &sizes);
    let n_selected = split[selected];
    Mask::SampleN(SampleNRandomMask::new(
        n_selected,
        row_partitions[selected].clone(),
        cols,
        partition_seed(seed, selected),
    ))
}

/// Builds the `selected`-th partition of a `fanIn(k) * cross(rows, cols)`
/// generator, splitting `fan_in` across partitions proportional to
/// partition size (see module docs for how this differs from the
/// reference's per-target weighting).
pub fn partition_fan_in(
    fan_in: u64,
    row_partitions: &[IntervalSet],
    cols: IntervalSet,
    selected: usize,
    seed: u64,
) -> Mask {
    let sizes: Vec<f64> = row_partitions
        .iter()
        .map(|p| p.len().unwrap_or(0) as f64)
        .collect();
    let mut master = StdRng::seed_from_u64(seed);
    let split = multinomial(&mut master, fan_in, &sizes);
    let fan_in_selected = split[selected];
    Mask::FanIn(FanInRandomMask::new(
        fan_in_selected,
        row_partitions[selected].clone(),
        cols,
        partition_seed(seed, selected),
    ))
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
    fn sample_n_partitions_sum_to_total() {
        let parts = vec![interval_set(&[(0, 9)]), interval_set(&[(10, 29)])];
        let cols = interval_set(&[(0, 4)]);
        let m0 = partition_sample_n(20, &parts, cols.clone(), 0, 5);
        let m1 = partition_sample_n(20, &parts, cols, 1, 5);
        let n0 = m0.bounded_iterate(0, 10, 0, 5).len();
        let n1 = m1.bounded_iterate(10, 30, 0, 5).len();
        assert!(n0 + n1 <= 20);
    }

    #[test]
    fn restrict_to_partition_drops_sources_outside_it() {
        let base = Mask::full();
        let restricted = restrict_to_partition(base, interval_set(&[(0, 2)]));
        let got = restricted.bounded_iterate(0, 5, 0, 1);
        assert_eq!(got, vec![(0, 0), (1, 0), (2, 0)]);
    }
}
