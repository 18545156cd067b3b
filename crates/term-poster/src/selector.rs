//! Offset selection for single-item pagination.

use std::num::NonZeroU64;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::warn;

/// Picks a zero-based offset into a collection of `total` entries.
///
/// Implementations must return a value in `[0, total)`.
pub trait OffsetSelector {
    fn select(&mut self, total: NonZeroU64) -> u64;
}

/// Uniform selection backed by a `rand` generator.
#[derive(Debug)]
pub struct RandomOffset<R = StdRng> {
    rng: R,
}

impl RandomOffset<StdRng> {
    /// Seed from the operating system's entropy source.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl<R: Rng> RandomOffset<R> {
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> OffsetSelector for RandomOffset<R> {
    fn select(&mut self, total: NonZeroU64) -> u64 {
        self.rng.gen_range(0..total.get())
    }
}

/// Always picks the same offset, clamped to the last entry.
#[derive(Debug, Clone, Copy)]
pub struct FixedOffset(pub u64);

impl OffsetSelector for FixedOffset {
    fn select(&mut self, total: NonZeroU64) -> u64 {
        let last = total.get() - 1;
        if self.0 > last {
            warn!(
                requested = self.0,
                total = total.get(),
                used = last,
                "Offset past end of collection, using last entry"
            );
            return last;
        }
        self.0
    }
}
