//! L1: canonical sets of closed integer intervals.

mod ops;
mod set;

pub use set::{Interval, IntervalSet};
