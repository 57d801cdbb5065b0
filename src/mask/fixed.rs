//! `Fix`: freezes a finite mask's connections so repeated queries never
//! re-walk the expression tree that produced them.
//!
//! Grounded on the reference `FixedMask`, which eagerly materializes its
//! operand's entire connection list on construction — the same eager
//! materialization this crate's [`Mask::bounded_iterate`] performs per
//! window, just hoisted to construction time here.

use super::node::{Bounds, Mask};

#[derive(Debug, Clone)]
pub struct FixedMask {
    connections: Vec<(u64, u64)>,
    bounds: Bounds,
}

impl FixedMask {
    pub fn materialize(mask: &Mask) -> Self {
        let b = mask.bounds();
        debug_assert!(b.is_finite(), "Fix requires a finite mask");
        mask.begin_iteration();
        let connections = mask.bounded_iterate(b.low0, b.high0.unwrap(), b.low1, b.high1.unwrap());
        FixedMask {
            connections,
            bounds: b,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn bounded_iterate(&self, low0: u64, high0: u64, low1: u64, high1: u64) -> Vec<(u64, u64)> {
        self.connections
            .iter()
            .copied()
            .filter(|&(i, j)| i >= low0 && i < high0 && j >= low1 && j < high1)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn materializes_once_and_filters_by_window() {
        let m = Mask::one_to_one();
        let cross = Mask::cross(
            crate::interval::IntervalSet::from_intervals(vec![crate::interval::Interval::new(0, 9).unwrap()])
                .unwrap(),
            crate::interval::IntervalSet::from_intervals(vec![crate::interval::Interval::new(0, 9).unwrap()])
                .unwrap(),
        );
        let fixed = FixedMask::materialize(&cross.intersection(m));
        assert_eq!(fixed.connections.len(), 10);
        assert_eq!(fixed.bounded_iterate(2, 5, 0, 10).len(), 3);
    }
}
