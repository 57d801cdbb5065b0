//! L3: mask algebra and the windowed iteration protocol.

mod block;
mod fixed;
mod node;
mod ops;
mod partition;
mod random;

pub use node::{Bounds, Mask};
pub use partition::{partition_fan_in, partition_sample_n, restrict_to_partition};
