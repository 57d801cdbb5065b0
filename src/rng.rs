//! Deterministic RNG plumbing for random masks.
//!
//! The windowed iteration protocol requires that re-querying the same mask
//! over different, possibly overlapping windows be reproducible: calling
//! [`crate::mask::Mask::begin_iteration`] captures a starting RNG state that
//! every subsequent [`crate::mask::Mask::bounded_iterate`] call replays from,
//! the same role `random.getstate()`/`random.setstate()` play in the
//! reference implementation's `ConstantRandomMask`/`SampleNRandomMask`.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// A cloneable, seedable RNG handle.
///
/// Cloning captures the exact generator state, which is how
/// `begin_iteration` "rewinds" a random mask to the state it had when the
/// mask was constructed.
#[derive(Debug, Clone)]
pub struct CsaRng {
    seed: u64,
    state: StdRng,
}

impl CsaRng {
    pub fn from_seed(seed: u64) -> Self {
        CsaRng {
            seed,
            state: StdRng::seed_from_u64(seed),
        }
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Reseeds deterministically from this generator's original seed plus a
    /// partition offset `m` — the "replacement for a missing jump-ahead"
    /// from the reference `SampleNRandomMask`/`FanInRandomMask`: it keeps
    /// overlapping windows queried within one partition from replaying the
    /// same sub-stream, while remaining a pure function of `(seed, m)` so
    /// different partitions stay mutually independent and reproducible.
    pub fn reseed_for_offset(&mut self, m: u64) {
        self.state = StdRng::seed_from_u64(self.seed.wrapping_add(m).wrapping_mul(0x9E3779B97F4A7C15));
    }

    /// Restarts this generator from its original seed.
    pub fn restart(&mut self) {
        self.state = StdRng::seed_from_u64(self.seed);
    }
}

/// Draws a multinomial sample: splits `n` trials across `weights.len()`
/// categories with probability proportional to `weights`, without pulling
/// in `rand_distr` (no crate in the corpus uses it) — a straightforward
/// repeated-binomial decomposition: draw the count for category `0` as
/// `Binomial(n, w0 / total)`, then recurse on the remaining categories with
/// the remaining trials and remaining weight mass.
pub fn multinomial(rng: &mut StdRng, n: u64, weights: &[f64]) -> Vec<u64> {
    let mut remaining_n = n;
    let mut remaining_mass: f64 = weights.iter().sum();
    let mut out = Vec::with_capacity(weights.len());
    for (idx, &w) in weights.iter().enumerate() {
        if idx == weights.len() - 1 {
            out.push(remaining_n);
            break;
        }
        if remaining_n == 0 || remaining_mass <= 0.0 {
            out.push(0);
            continue;
        }
        let p = (w / remaining_mass).clamp(0.0, 1.0);
        let count = binomial(rng, remaining_n, p);
        out.push(count);
        remaining_n -= count;
        remaining_mass -= w;
    }
    out
}

fn binomial(rng: &mut StdRng, n: u64, p: f64) -> u64 {
    use rand::Rng;
    let mut successes = 0u64;
    for _ in 0..n {
        if rng.gen::<f64>() < p {
            successes += 1;
        }
    }
    successes
}
