use std::num::NonZero;

use new_zealand::nz;
use static_assertions::const_assert;

use crate::MAX_THREADS;

/// Default worker thread count, one per slot up to [`MAX_THREADS`].
pub const DEFAULT_THREADS: NonZero<usize> = nz!(12);

/// Default countdown start value: every worker performs 2^24 decrements.
pub const DEFAULT_START_COUNT: u32 = 1 << 24;

/// Default spacing between logical table entries, in cells.
///
/// 32 four-byte counter cells is 128 bytes, a full cache line on current
/// hardware. Set the stride lower than that and watch the cycle count jump:
/// neighboring slots start sharing cache lines and every decrement invalidates
/// the neighbors' lines. That cliff is a performance property, not a
/// correctness one, so smaller strides remain legal.
pub const DEFAULT_STRIDE: NonZero<usize> = nz!(32);

// The default stride must keep each logical counter on its own cache line.
const_assert!(DEFAULT_STRIDE.get() * size_of::<u32>() >= 128);

/// How a worker resolves which counter slot belongs to it inside the hot loop.
///
/// Selected once, before any worker is spawned. The hot loops contain no
/// strategy branching; each strategy is measured in isolation.
#[derive(Clone, Copy, Debug, derive_more::Display, Eq, PartialEq)]
pub enum Strategy {
    /// The slot index is obtained once from the allocator and cached in the
    /// worker's own stack frame for the thread's lifetime.
    #[display("cached_slot")]
    CachedSlot,

    /// The worker re-resolves its slot on every iteration by scanning the
    /// identifier table for its own thread identifier.
    #[display("linear_search")]
    LinearSearch,
}

/// Immutable configuration for a single benchmark run.
///
/// All values are fixed before the run starts; there is no runtime reconfiguration
/// and no dynamic thread count.
#[derive(Clone, Copy, Debug)]
pub struct RunConfig {
    threads: NonZero<usize>,
    start_count: u32,
    stride: NonZero<usize>,
    strategy: Strategy,
}

impl RunConfig {
    /// Creates a run configuration.
    ///
    /// # Panics
    ///
    /// Panics if `threads` exceeds [`MAX_THREADS`] or if `start_count` is zero
    /// (a zero start would wrap the countdown instead of terminating it).
    #[must_use]
    pub fn new(
        threads: NonZero<usize>,
        start_count: u32,
        stride: NonZero<usize>,
        strategy: Strategy,
    ) -> Self {
        assert!(
            threads.get() <= MAX_THREADS,
            "a run may use at most {MAX_THREADS} worker threads, got {threads}"
        );
        assert!(
            start_count > 0,
            "the countdown start value must be at least 1"
        );

        Self {
            threads,
            start_count,
            stride,
            strategy,
        }
    }

    /// The number of worker threads (and counter slots) in the run.
    #[must_use]
    pub fn threads(&self) -> NonZero<usize> {
        self.threads
    }

    /// The value every worker counts down from.
    #[must_use]
    pub fn start_count(&self) -> u32 {
        self.start_count
    }

    /// The spacing between logical table entries, in cells.
    #[must_use]
    pub fn stride(&self) -> NonZero<usize> {
        self.stride
    }

    /// The slot resolution strategy under measurement.
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_THREADS,
            DEFAULT_START_COUNT,
            DEFAULT_STRIDE,
            Strategy::CachedSlot,
        )
    }
}
