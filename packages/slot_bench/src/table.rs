use std::num::NonZero;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

/// The most worker slots a single run may use. Table storage is sized from the
/// configured thread count, which must not exceed this.
pub const MAX_THREADS: usize = 12;

/// A fixed table of per-slot countdown counters, spaced a configurable stride
/// apart so that each logical counter can occupy its own cache line.
///
/// Physical storage is `slots × stride` cells; the logical counter for slot `s`
/// lives at physical index `s × stride`, and the remaining cells are padding.
/// After the owning worker's initializing [`reset()`](Self::reset), each logical
/// counter is only ever written by that one thread. The cells are atomics to
/// satisfy shared-access rules, but the single-writer discipline means the
/// relaxed operations never contend - the absence of write contention is exactly
/// what the benchmark measures.
#[derive(Debug)]
pub struct CounterTable {
    cells: Box<[AtomicU32]>,
    slots: usize,
    stride: NonZero<usize>,
}

impl CounterTable {
    /// Creates a zero-initialized table with the given logical slot count and
    /// stride (in counter cells).
    ///
    /// # Panics
    ///
    /// Panics if `slots` exceeds [`MAX_THREADS`].
    #[must_use]
    pub fn new(slots: NonZero<usize>, stride: NonZero<usize>) -> Self {
        assert!(
            slots.get() <= MAX_THREADS,
            "a counter table holds at most {MAX_THREADS} slots, got {slots}"
        );

        let cells = (0..slots.get() * stride.get())
            .map(|_| AtomicU32::new(0))
            .collect();

        Self {
            cells,
            slots: slots.get(),
            stride,
        }
    }

    /// The number of logical counters in the table.
    #[must_use]
    pub fn slots(&self) -> usize {
        self.slots
    }

    fn cell(&self, slot: usize) -> &AtomicU32 {
        // Indexing is the backstop for an over-issued slot: out of range panics.
        &self.cells[slot * self.stride.get()]
    }

    /// The owning worker's initializing write, performed before the rendezvous.
    pub fn reset(&self, slot: usize, value: u32) {
        self.cell(slot).store(value, Ordering::Relaxed);
    }

    /// Decrements the logical counter for `slot`, returning the new value.
    ///
    /// This is the hot-loop operation. Only the owning worker may call it.
    #[inline]
    pub fn decrement(&self, slot: usize) -> u32 {
        self.cell(slot).fetch_sub(1, Ordering::Relaxed).wrapping_sub(1)
    }

    /// Reads the logical counter for `slot`.
    #[must_use]
    pub fn get(&self, slot: usize) -> u32 {
        self.cell(slot).load(Ordering::Relaxed)
    }
}

/// A fixed table mapping slot index to owning thread identifier, with the same
/// strided layout as [`CounterTable`].
///
/// Each entry is written exactly once by the slot's owner before the rendezvous
/// releases, then read by every worker on every iteration of the linear-search
/// strategy. Read-only sharing after the one-time write is the contended access
/// pattern this table exists to model.
#[derive(Debug)]
pub struct IdentifierTable {
    cells: Box<[AtomicU64]>,
    slots: usize,
    stride: NonZero<usize>,
}

impl IdentifierTable {
    /// Creates a zero-initialized table with the given logical slot count and
    /// stride (in identifier cells).
    ///
    /// # Panics
    ///
    /// Panics if `slots` exceeds [`MAX_THREADS`].
    #[must_use]
    pub fn new(slots: NonZero<usize>, stride: NonZero<usize>) -> Self {
        assert!(
            slots.get() <= MAX_THREADS,
            "an identifier table holds at most {MAX_THREADS} slots, got {slots}"
        );

        let cells = (0..slots.get() * stride.get())
            .map(|_| AtomicU64::new(0))
            .collect();

        Self {
            cells,
            slots: slots.get(),
            stride,
        }
    }

    fn cell(&self, slot: usize) -> &AtomicU64 {
        &self.cells[slot * self.stride.get()]
    }

    /// Records the owning thread's identifier for `slot`. Write-once publish.
    pub fn record(&self, slot: usize, id: u64) {
        self.cell(slot).store(id, Ordering::Release);
    }

    /// Reads the identifier recorded for `slot`.
    #[must_use]
    pub fn get(&self, slot: usize) -> u64 {
        self.cell(slot).load(Ordering::Acquire)
    }

    /// Scans the table linearly from slot 0 for the given identifier.
    ///
    /// Visits at most [`slots`](CounterTable::slots) entries. A worker searching
    /// for its own identifier after recording it always finds a match; once the
    /// rendezvous has released, the table is fully populated and every worker's
    /// identifier is findable.
    #[inline]
    #[must_use]
    pub fn find(&self, id: u64) -> Option<usize> {
        (0..self.slots).find(|&slot| self.cell(slot).load(Ordering::Acquire) == id)
    }
}
